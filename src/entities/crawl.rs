use serde::{Deserialize, Serialize};

use crate::error::{validation_error, Error};

pub const MISSING_PARAMETERS: &str = "Missing required parameters: location and radius";

/// Body of a crawl request. Both fields are optional on the wire so that a
/// missing one is reported as a validation failure rather than a decode error.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CrawlRequest {
    pub location: Option<String>,
    pub radius: Option<f64>,
}

impl CrawlRequest {
    pub fn new(location: &str, radius: f64) -> Self {
        Self {
            location: Some(location.into()),
            radius: Some(radius),
        }
    }

    /// Returns the location and radius, or a validation error when either is
    /// absent, blank or not a positive number. The format of `location` is
    /// left to the upstream API.
    pub fn validate(self) -> Result<(String, f64), Error> {
        let location = self
            .location
            .map(|location| location.trim().to_owned())
            .filter(|location| !location.is_empty());

        let radius = self
            .radius
            .filter(|radius| radius.is_finite() && *radius > 0.0);

        match (location, radius) {
            (Some(location), Some(radius)) => Ok((location, radius)),
            _ => Err(validation_error(MISSING_PARAMETERS)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlSummary {
    pub message: String,
    /// Rows saved.
    pub count: usize,
    /// Records fetched.
    pub total: usize,
}

impl CrawlSummary {
    pub fn new(count: usize, total: usize) -> Self {
        Self {
            message: "Data saved successfully".into(),
            count,
            total,
        }
    }
}

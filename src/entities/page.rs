use serde::{Deserialize, Serialize};

use crate::error::{validation_error, Error};

pub const DEFAULT_LIMIT: i64 = 10;
pub const DEFAULT_OFFSET: i64 = 0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub limit: i64,
    pub offset: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: DEFAULT_OFFSET,
        }
    }
}

impl PageRequest {
    pub fn new(limit: i64, offset: i64) -> Result<Self, Error> {
        if limit < 0 || offset < 0 {
            return Err(validation_error("limit and offset must not be negative"));
        }

        Ok(Self { limit, offset })
    }

    /// Interprets the raw `limit`/`offset` query parameters.
    ///
    /// `None` means neither was supplied and the caller wants the full list.
    /// A parameter that is present but empty takes its default. Anything that
    /// is not a non-negative integer is rejected.
    pub fn from_query(limit: Option<&str>, offset: Option<&str>) -> Result<Option<Self>, Error> {
        if limit.is_none() && offset.is_none() {
            return Ok(None);
        }

        let limit = parse_param("limit", limit, DEFAULT_LIMIT)?;
        let offset = parse_param("offset", offset, DEFAULT_OFFSET)?;

        Self::new(limit, offset).map(Some)
    }
}

fn parse_param(name: &str, raw: Option<&str>, default: i64) -> Result<i64, Error> {
    match raw.map(str::trim) {
        None | Some("") => Ok(default),
        Some(raw) => raw
            .parse::<i64>()
            .map_err(|_| validation_error(format!("{} must be a non-negative integer", name))),
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: i64,
}

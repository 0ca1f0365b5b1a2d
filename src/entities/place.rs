use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::error::{validation_error, Error};

/// One result of a places search, kept as the JSON object the upstream API
/// returned.
///
/// The service only reads a handful of fields, through the accessors below.
/// They return `None` when a field is missing, `null`, or of an unexpected
/// type; the object itself is never rewritten, so it is stored and read back
/// exactly as received.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Place(Map<String, Value>);

/// A `geometry.location` pair with both coordinates present and numeric.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl From<Map<String, Value>> for Place {
    fn from(record: Map<String, Value>) -> Self {
        Self(record)
    }
}

impl TryFrom<Value> for Place {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Error> {
        match value {
            Value::Object(record) => Ok(Self(record)),
            other => Err(validation_error(format!(
                "place record is not a JSON object: {}",
                other
            ))),
        }
    }
}

impl Place {
    pub fn named(place_id: &str, name: &str) -> Self {
        let mut record = Map::new();
        record.insert("place_id".into(), json!(place_id));
        record.insert("name".into(), json!(name));
        Self(record)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn record(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn place_id(&self) -> Option<&str> {
        self.get("place_id").and_then(Value::as_str)
    }

    pub fn name(&self) -> Option<&str> {
        self.get("name").and_then(Value::as_str)
    }

    pub fn vicinity(&self) -> Option<&str> {
        self.get("vicinity").and_then(Value::as_str)
    }

    pub fn business_status(&self) -> Option<&str> {
        self.get("business_status").and_then(Value::as_str)
    }

    pub fn rating(&self) -> Option<f64> {
        self.get("rating").and_then(Value::as_f64)
    }

    pub fn user_ratings_total(&self) -> Option<i64> {
        self.get("user_ratings_total").and_then(Value::as_i64)
    }

    /// String entries of `types`; anything else in the array is skipped.
    pub fn types(&self) -> Vec<&str> {
        self.get("types")
            .and_then(Value::as_array)
            .map(|types| types.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    pub fn location(&self) -> Option<Coordinates> {
        let location = self.get("geometry")?.get("location")?;

        Some(Coordinates {
            lat: location.get("lat")?.as_f64()?,
            lng: location.get("lng")?.as_f64()?,
        })
    }
}

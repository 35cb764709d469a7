//! Shared data structures for the profile state
//!
//! These structs mirror what the rental backend sends. Only the identifiers
//! and references are typed; every other attribute is kept as-is so the
//! screen can show whatever the backend provides.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Identifier sent by the backend either as a string or as a number
#[derive(Serialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(text) => RecordId(text),
            Raw::Signed(n) => RecordId(n.to_string()),
            Raw::Unsigned(n) => RecordId(n.to_string()),
        })
    }
}

pub type CarId = RecordId;
pub type BookingId = RecordId;

/// A car listed by the user
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Car {
    #[serde(rename = "CarID")]
    pub id: CarId,
    /// Owner's email, when the backend includes it
    #[serde(rename = "UserID", default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    /// Everything else about the car
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// A booking made by the user
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Booking {
    #[serde(rename = "BookingID")]
    pub id: BookingId,
    #[serde(rename = "CarID", default, skip_serializing_if = "Option::is_none")]
    pub car_id: Option<CarId>,
    #[serde(rename = "UserID", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// Flatten the scalar attributes of a record into label/value pairs.
/// Nested objects and arrays are skipped. Sorted by label.
pub fn scalar_attributes(details: &Map<String, Value>) -> Vec<(&str, String)> {
    let mut attributes: Vec<(&str, String)> = details
        .iter()
        .filter_map(|(key, value)| {
            let text = match value {
                Value::String(s) if !s.is_empty() => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(true) => "yes".to_string(),
                Value::Bool(false) => "no".to_string(),
                _ => return None,
            };
            Some((key.as_str(), text))
        })
        .collect();

    attributes.sort_by(|a, b| a.0.cmp(b.0));
    attributes
}

impl Car {
    /// Short heading for the car card, e.g. "Toyota Corolla"
    pub fn title(&self) -> String {
        let name: Vec<&str> = ["Make", "Model"]
            .iter()
            .filter_map(|key| self.details.get(*key).and_then(Value::as_str))
            .collect();

        if name.is_empty() {
            format!("Car #{}", self.id)
        } else {
            name.join(" ")
        }
    }

    pub fn attributes(&self) -> Vec<(&str, String)> {
        scalar_attributes(&self.details)
    }
}

impl Booking {
    pub fn title(&self) -> String {
        match &self.car_id {
            Some(car) => format!("Booking #{} for car #{}", self.id, car),
            None => format!("Booking #{}", self.id),
        }
    }

    pub fn attributes(&self) -> Vec<(&str, String)> {
        scalar_attributes(&self.details)
    }
}

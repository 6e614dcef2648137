//! Flight and airport records as they appear in the data files.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Airport identifier. Data files use either integers or UUID strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AirportId {
    Number(i64),
    Text(String),
}

impl fmt::Display for AirportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AirportId::Number(n) => write!(f, "{}", n),
            AirportId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for AirportId {
    fn from(n: i64) -> Self {
        AirportId::Number(n)
    }
}

impl From<&str> for AirportId {
    fn from(s: &str) -> Self {
        AirportId::Text(s.to_string())
    }
}

/// A direct flight between two airports. Other fields in the file are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flight {
    #[serde(rename = "SourceAirportId")]
    pub source: AirportId,
    #[serde(rename = "DestAirportId")]
    pub dest: AirportId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    #[serde(rename = "Name")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airport {
    #[serde(rename = "Id")]
    pub id: AirportId,
    #[serde(rename = "City")]
    pub city: City,
}

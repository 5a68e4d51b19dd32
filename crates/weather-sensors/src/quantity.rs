//! Measured quantities and their field mappings.
//!
//! Data files store flat per-location records while the weather API nests
//! values under groups such as `main` or `wind`. Each quantity carries a
//! static table describing where its values live in both schemas.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Location of one reading value in both source schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// Name of the value inside a normalized record.
    pub name: &'static str,
    /// Key inside a location record of a data file.
    pub file_key: &'static str,
    /// Nested path inside an API payload.
    pub api_path: &'static [&'static str],
}

const TEMPERATURE_FIELDS: &[Field] = &[Field {
    name: "temperature",
    file_key: "temp",
    api_path: &["main", "temp"],
}];

const HUMIDITY_FIELDS: &[Field] = &[Field {
    name: "humidity",
    file_key: "humidity",
    api_path: &["main", "humidity"],
}];

const PRESSURE_FIELDS: &[Field] = &[Field {
    name: "pressure",
    file_key: "pressure",
    api_path: &["main", "pressure"],
}];

// The API has no precipitation figure in this payload, cloud coverage stands in for it.
const RAINFALL_FIELDS: &[Field] = &[Field {
    name: "rainfall",
    file_key: "rainfall",
    api_path: &["clouds", "all"],
}];

const WIND_FIELDS: &[Field] = &[
    Field {
        name: "speed",
        file_key: "wind_speed",
        api_path: &["wind", "speed"],
    },
    Field {
        name: "direction",
        file_key: "wind_deg",
        api_path: &["wind", "deg"],
    },
    Field {
        name: "gust",
        file_key: "wind_gust",
        api_path: &["wind", "gust"],
    },
];

/// Physical quantity reported by a sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quantity {
    /// Air temperature in degrees Celsius.
    Temperature,
    /// Relative humidity in percent.
    Humidity,
    /// Atmospheric pressure in hectopascals.
    Pressure,
    /// Wind speed, direction and gust.
    Wind,
    /// Rainfall amount.
    Rainfall,
}

impl Quantity {
    /// All quantities, in display order.
    pub const ALL: [Quantity; 5] = [
        Quantity::Temperature,
        Quantity::Humidity,
        Quantity::Pressure,
        Quantity::Wind,
        Quantity::Rainfall,
    ];

    /// Returns the fields a reading of this quantity is built from.
    pub fn fields(&self) -> &'static [Field] {
        match self {
            Quantity::Temperature => TEMPERATURE_FIELDS,
            Quantity::Humidity => HUMIDITY_FIELDS,
            Quantity::Pressure => PRESSURE_FIELDS,
            Quantity::Wind => WIND_FIELDS,
            Quantity::Rainfall => RAINFALL_FIELDS,
        }
    }

    /// Returns the unit of the stored reading.
    pub fn unit(&self) -> &'static str {
        match self {
            Quantity::Temperature => "°C",
            Quantity::Humidity => "%",
            Quantity::Pressure => "hPa",
            Quantity::Wind => "m/s",
            Quantity::Rainfall => "mm",
        }
    }
}

impl FromStr for Quantity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "temperature" | "temp" => Ok(Quantity::Temperature),
            "humidity" => Ok(Quantity::Humidity),
            "pressure" => Ok(Quantity::Pressure),
            "wind" => Ok(Quantity::Wind),
            "rainfall" | "rain" => Ok(Quantity::Rainfall),
            _ => Err(Error::InvalidQuantity(s.to_string())),
        }
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Quantity::Temperature => write!(f, "temperature"),
            Quantity::Humidity => write!(f, "humidity"),
            Quantity::Pressure => write!(f, "pressure"),
            Quantity::Wind => write!(f, "wind"),
            Quantity::Rainfall => write!(f, "rainfall"),
        }
    }
}

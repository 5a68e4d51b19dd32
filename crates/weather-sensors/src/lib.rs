//! Weather Sensors Library
//!
//! Models environmental sensors (temperature, humidity, pressure, wind and
//! rainfall) that acquire a reading from a local JSON data file or from a
//! remote weather API, and derive statistics from batches of historical
//! readings.

pub mod aggregate;
pub mod error;
pub mod loader;
pub mod quantity;
pub mod reader;
pub mod sensor;
pub mod source;
pub mod units;

#[cfg(test)]
pub(crate) mod testing;

pub use aggregate::{aggregate, Derived, Trend};
pub use error::{Error, Result};
pub use loader::{DataLoader, DocumentLoader};
pub use quantity::{Field, Quantity};
pub use reader::{fetch, RawRecord};
pub use sensor::{
    AnySensor, Humidity, HumiditySensor, Kind, Pressure, PressureSensor, Rainfall,
    RainfallSensor, Reading, Sensor, SensorConfig, Temperature, TemperatureSensor, Thresholds,
    Wind, WindReading, WindSensor,
};
pub use source::{Source, SourceKind};

/// Status value that allows a sensor to acquire data.
pub const STATUS_ACTIVE: &str = "active";

/// Bundled sample data file, relative to the workspace root.
///
/// Relative paths resolve against the process working directory, so this
/// default only finds the sample when run from the workspace root. Configure
/// an absolute `file_path` for anything else.
pub const DEFAULT_DATA_FILE: &str = "data/data.json";

/// Top-level key of a data file holding the per-location records.
pub const CITY_DATA_KEY: &str = "city_data";

/// Default threshold (%) above which humidity counts as humid.
pub const DEFAULT_HUMID_THRESHOLD: f64 = 70.0;

/// Default threshold above which rainfall counts as raining.
pub const DEFAULT_RAIN_THRESHOLD: f64 = 50.0;

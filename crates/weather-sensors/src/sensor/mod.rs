//! Environmental sensors.
//!
//! A [`Sensor`] is generic over a [`Kind`], a marker type per physical
//! quantity that knows how to normalize a raw record and which statistic to
//! derive from a historical batch. Acquisition, status gating and storage
//! are shared by all kinds.

mod any;
mod kinds;

pub use any::{AnySensor, Reading, Thresholds};
pub use kinds::{
    Humidity, HumiditySensor, Pressure, PressureSensor, Rainfall, RainfallSensor, Temperature,
    TemperatureSensor, Wind, WindReading, WindSensor,
};

use crate::loader::{DataLoader, DocumentLoader};
use crate::reader::{self, RawRecord};
use crate::source::Source;
use crate::{Error, Quantity, Result, DEFAULT_DATA_FILE, STATUS_ACTIVE};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Per-quantity behavior of a sensor.
pub trait Kind {
    /// Quantity this kind measures.
    const QUANTITY: Quantity;

    /// Normalized value stored after a successful acquisition.
    type Reading: Clone + fmt::Debug + PartialEq;

    /// Statistic derived from a historical batch.
    type Derived: Clone + fmt::Debug + PartialEq;

    /// Builds a reading from the fields extracted by the reader.
    fn normalize(record: &RawRecord) -> Result<Self::Reading>;

    /// Computes the statistic for a batch of readings.
    fn derive(batch: &[f64]) -> Result<Self::Derived>;
}

/// Construction parameters of a sensor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorConfig {
    /// Caller-assigned identifier
    pub sensor_id: String,

    /// Location key looked up in the data source
    pub location: String,

    /// Operational status; only "active" sensors acquire data
    #[serde(default = "default_status")]
    pub status: String,

    /// Source kind: "file" or "api"
    #[serde(default = "default_source")]
    pub source: String,

    /// Data file used by file sources
    #[serde(default = "default_file_path")]
    pub file_path: PathBuf,

    /// Endpoint used by api sources
    #[serde(default)]
    pub api_endpoint: String,
}

fn default_status() -> String {
    STATUS_ACTIVE.to_string()
}

fn default_source() -> String {
    "file".to_string()
}

fn default_file_path() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

impl SensorConfig {
    /// Creates a configuration for an active, file-backed sensor.
    pub fn new(sensor_id: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            sensor_id: sensor_id.into(),
            location: location.into(),
            status: default_status(),
            source: default_source(),
            file_path: default_file_path(),
            api_endpoint: String::new(),
        }
    }

    /// Resolves the configured source.
    pub fn source(&self) -> Result<Source> {
        Source::from_parts(&self.source, &self.file_path, &self.api_endpoint)
    }
}

/// A sensor measuring the quantity of `K`.
pub struct Sensor<K: Kind> {
    id: String,
    location: String,
    status: String,
    source: Source,
    last_reading: Option<K::Reading>,
    derived: Option<K::Derived>,
}

impl<K: Kind> Sensor<K> {
    /// Creates an active sensor.
    pub fn new(id: impl Into<String>, location: impl Into<String>, source: Source) -> Self {
        Self {
            id: id.into(),
            location: location.into(),
            status: STATUS_ACTIVE.to_string(),
            source,
            last_reading: None,
            derived: None,
        }
    }

    /// Creates a sensor from its configuration.
    pub fn from_config(config: &SensorConfig) -> Result<Self> {
        let source = config.source()?;
        let mut sensor = Self::new(config.sensor_id.clone(), config.location.clone(), source);
        sensor.status = config.status.clone();
        Ok(sensor)
    }

    /// Returns the sensor identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the location key.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Returns the acquisition source.
    pub fn source(&self) -> &Source {
        &self.source
    }

    /// Returns the measured quantity.
    pub fn quantity(&self) -> Quantity {
        K::QUANTITY
    }

    /// Returns the operational status.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Sets the operational status. Any value is accepted.
    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// Returns true if the sensor may acquire data.
    pub fn is_active(&self) -> bool {
        self.status == STATUS_ACTIVE
    }

    /// Acquires a reading from the configured source.
    pub fn acquire(&mut self) -> Result<&K::Reading> {
        self.acquire_with(&DataLoader::new())
    }

    /// Acquires a reading using `loader` for document access.
    ///
    /// Inactive sensors are refused without touching the loader. Any failure
    /// clears the last reading.
    pub fn acquire_with(&mut self, loader: &dyn DocumentLoader) -> Result<&K::Reading> {
        if !self.is_active() {
            self.last_reading = None;
            return Err(Error::SensorInactive {
                id: self.id.clone(),
                status: self.status.clone(),
            });
        }

        let result = reader::fetch(loader, &self.source, &self.location, K::QUANTITY.fields())
            .and_then(|record| K::normalize(&record));

        match result {
            Ok(reading) => {
                debug!(
                    "Sensor {} ({} at {}) read {:?} from {}",
                    self.id,
                    K::QUANTITY,
                    self.location,
                    reading,
                    self.source
                );
                Ok(&*self.last_reading.insert(reading))
            }
            Err(e) => {
                self.last_reading = None;
                warn!("Sensor {} failed to acquire {}: {}", self.id, K::QUANTITY, e);
                Err(Error::AcquisitionFailed {
                    sensor_id: self.id.clone(),
                    source: Box::new(e),
                })
            }
        }
    }

    /// Returns the last acquired reading.
    pub fn last_reading(&self) -> Option<&K::Reading> {
        self.last_reading.as_ref()
    }

    /// Derives the statistic of a historical batch and stores it.
    pub fn process(&mut self, batch: &[f64]) -> Result<K::Derived> {
        let derived = K::derive(batch)?;
        info!(
            "Sensor {} derived {:?} from {} {} readings",
            self.id,
            derived,
            batch.len(),
            K::QUANTITY
        );
        self.derived = Some(derived.clone());
        Ok(derived)
    }

    /// Returns the last derived statistic.
    pub fn derived(&self) -> Option<&K::Derived> {
        self.derived.as_ref()
    }
}

impl<K: Kind> fmt::Display for Sensor<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sensor ID: {}, Location: {}, Status: {}",
            self.id, self.location, self.status
        )
    }
}

impl<K: Kind> fmt::Debug for Sensor<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sensor")
            .field("quantity", &K::QUANTITY)
            .field("id", &self.id)
            .field("location", &self.location)
            .field("status", &self.status)
            .field("source", &self.source)
            .field("last_reading", &self.last_reading)
            .field("derived", &self.derived)
            .finish()
    }
}

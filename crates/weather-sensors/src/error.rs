//! Error types for the weather sensors library.

use crate::quantity::Quantity;
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when acquiring or processing sensor data.
#[derive(Error, Debug)]
pub enum Error {
    /// Acquisition attempted while the sensor status is not "active".
    #[error("Sensor {id} is not active (status: {status})")]
    SensorInactive { id: String, status: String },

    /// Source kind is neither "file" nor "api", or lacks its parameter.
    #[error("Invalid source: {0}")]
    InvalidSource(String),

    /// Unknown quantity name.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    /// Location key absent from the data file.
    #[error("Location not found in data file: {0}")]
    LocationNotFound(String),

    /// Required field(s) absent or not numeric.
    #[error("Missing field: {0}")]
    FieldMissing(String),

    /// File cannot be read or parsed, or the HTTP request failed.
    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),

    /// Any reader failure raised from within `acquire()`.
    #[error("Failed to acquire data for sensor {sensor_id}: {source}")]
    AcquisitionFailed {
        sensor_id: String,
        #[source]
        source: Box<Error>,
    },

    /// Aggregation over an empty batch.
    #[error("No {0} data provided")]
    EmptyBatch(Quantity),

    /// Batch value that is NaN or infinite.
    #[error("Reading {index} is not a finite number: {value}")]
    NonFiniteReading { index: usize, value: f64 },

    /// Aggregation over a batch that is too short.
    #[error("Not enough data: need at least {needed} readings, got {got}")]
    InsufficientData { needed: usize, got: usize },
}

impl Error {
    /// Returns the wrapped reader error for `AcquisitionFailed`, or `self`.
    pub fn inner(&self) -> &Error {
        match self {
            Error::AcquisitionFailed { source, .. } => source,
            other => other,
        }
    }
}

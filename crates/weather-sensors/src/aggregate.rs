//! Statistics over batches of historical readings.
//!
//! Batches are supplied by the caller and are independent of a sensor's
//! last acquired reading.

use crate::sensor::{Humidity, Kind, Pressure, Rainfall, Temperature, Wind};
use crate::{Error, Quantity, Result};
use serde::Serialize;

/// Minimum batch length for a pressure trend.
pub const MIN_TREND_READINGS: usize = 2;

/// Direction of change between the first and last reading of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trend::Increasing => write!(f, "increasing"),
            Trend::Decreasing => write!(f, "decreasing"),
            Trend::Stable => write!(f, "stable"),
        }
    }
}

/// Result of aggregating a batch for any quantity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Derived {
    Value(f64),
    Trend(Trend),
}

impl std::fmt::Display for Derived {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Derived::Value(value) => write!(f, "{:.2}", value),
            Derived::Trend(trend) => write!(f, "{}", trend),
        }
    }
}

/// Rejects a batch holding NaN or an infinity.
pub fn ensure_finite(batch: &[f64]) -> Result<&[f64]> {
    match batch.iter().position(|value| !value.is_finite()) {
        Some(index) => Err(Error::NonFiniteReading {
            index,
            value: batch[index],
        }),
        None => Ok(batch),
    }
}

/// Arithmetic mean, `None` for an empty batch.
pub fn mean(batch: &[f64]) -> Option<f64> {
    if batch.is_empty() {
        return None;
    }
    Some(batch.iter().sum::<f64>() / batch.len() as f64)
}

/// Largest value, `None` for an empty batch. NaN values are skipped, see
/// [`ensure_finite`].
pub fn max(batch: &[f64]) -> Option<f64> {
    batch.iter().copied().reduce(f64::max)
}

/// Total, `None` for an empty batch.
pub fn sum(batch: &[f64]) -> Option<f64> {
    if batch.is_empty() {
        return None;
    }
    Some(batch.iter().sum())
}

/// Compares the last reading to the first; interior readings are ignored.
pub fn trend(batch: &[f64]) -> Result<Trend> {
    ensure_finite(batch)?;
    match (batch.first(), batch.last()) {
        (Some(first), Some(last)) if batch.len() >= MIN_TREND_READINGS => Ok(if last > first {
            Trend::Increasing
        } else if last < first {
            Trend::Decreasing
        } else {
            Trend::Stable
        }),
        _ => Err(Error::InsufficientData {
            needed: MIN_TREND_READINGS,
            got: batch.len(),
        }),
    }
}

/// Aggregates a batch with the statistic of `quantity`.
pub fn aggregate(quantity: Quantity, batch: &[f64]) -> Result<Derived> {
    match quantity {
        Quantity::Temperature => Temperature::derive(batch).map(Derived::Value),
        Quantity::Humidity => Humidity::derive(batch).map(Derived::Value),
        Quantity::Pressure => Pressure::derive(batch).map(Derived::Trend),
        Quantity::Wind => Wind::derive(batch).map(Derived::Value),
        Quantity::Rainfall => Rainfall::derive(batch).map(Derived::Value),
    }
}

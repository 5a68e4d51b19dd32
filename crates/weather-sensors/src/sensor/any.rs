//! Sensors of any kind behind one type.

use super::kinds::{
    HumiditySensor, PressureSensor, RainfallSensor, TemperatureSensor, WindReading, WindSensor,
};
use super::SensorConfig;
use crate::aggregate::Derived;
use crate::loader::{DataLoader, DocumentLoader};
use crate::{Quantity, Result, Source, DEFAULT_HUMID_THRESHOLD, DEFAULT_RAIN_THRESHOLD};
use serde::Serialize;
use std::fmt;

/// A normalized reading of any quantity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Reading {
    Scalar(f64),
    Wind(WindReading),
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reading::Scalar(value) => write!(f, "{}", value),
            Reading::Wind(wind) => write!(f, "{}", wind),
        }
    }
}

/// Thresholds used when describing humidity and rainfall readings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub humid: f64,
    pub rain: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            humid: DEFAULT_HUMID_THRESHOLD,
            rain: DEFAULT_RAIN_THRESHOLD,
        }
    }
}

/// One sensor of any quantity.
#[derive(Debug)]
pub enum AnySensor {
    Temperature(TemperatureSensor),
    Humidity(HumiditySensor),
    Pressure(PressureSensor),
    Wind(WindSensor),
    Rainfall(RainfallSensor),
}

/// Runs `$body` with `$s` bound to the inner sensor.
macro_rules! each {
    ($any:expr, $s:ident => $body:expr) => {
        match $any {
            AnySensor::Temperature($s) => $body,
            AnySensor::Humidity($s) => $body,
            AnySensor::Pressure($s) => $body,
            AnySensor::Wind($s) => $body,
            AnySensor::Rainfall($s) => $body,
        }
    };
}

impl AnySensor {
    /// Creates a sensor of `quantity` from its configuration.
    pub fn from_config(quantity: Quantity, config: &SensorConfig) -> Result<Self> {
        Ok(match quantity {
            Quantity::Temperature => AnySensor::Temperature(TemperatureSensor::from_config(config)?),
            Quantity::Humidity => AnySensor::Humidity(HumiditySensor::from_config(config)?),
            Quantity::Pressure => AnySensor::Pressure(PressureSensor::from_config(config)?),
            Quantity::Wind => AnySensor::Wind(WindSensor::from_config(config)?),
            Quantity::Rainfall => AnySensor::Rainfall(RainfallSensor::from_config(config)?),
        })
    }

    /// Returns the measured quantity.
    pub fn quantity(&self) -> Quantity {
        each!(self, s => s.quantity())
    }

    /// Returns the sensor identifier.
    pub fn id(&self) -> &str {
        each!(self, s => s.id())
    }

    /// Returns the location key.
    pub fn location(&self) -> &str {
        each!(self, s => s.location())
    }

    /// Returns the acquisition source.
    pub fn source(&self) -> &Source {
        each!(self, s => s.source())
    }

    /// Returns the operational status.
    pub fn status(&self) -> &str {
        each!(self, s => s.status())
    }

    /// Sets the operational status.
    pub fn set_status(&mut self, status: impl Into<String>) {
        let status = status.into();
        each!(self, s => s.set_status(status))
    }

    /// Acquires a reading from the configured source.
    pub fn acquire(&mut self) -> Result<Reading> {
        self.acquire_with(&DataLoader::new())
    }

    /// Acquires a reading using `loader` for document access.
    pub fn acquire_with(&mut self, loader: &dyn DocumentLoader) -> Result<Reading> {
        match self {
            AnySensor::Wind(s) => s.acquire_with(loader).map(|w| Reading::Wind(*w)),
            AnySensor::Temperature(s) => s.acquire_with(loader).map(|v| Reading::Scalar(*v)),
            AnySensor::Humidity(s) => s.acquire_with(loader).map(|v| Reading::Scalar(*v)),
            AnySensor::Pressure(s) => s.acquire_with(loader).map(|v| Reading::Scalar(*v)),
            AnySensor::Rainfall(s) => s.acquire_with(loader).map(|v| Reading::Scalar(*v)),
        }
    }

    /// Returns the last acquired reading.
    pub fn last_reading(&self) -> Option<Reading> {
        match self {
            AnySensor::Wind(s) => s.last_reading().copied().map(Reading::Wind),
            AnySensor::Temperature(s) => s.last_reading().copied().map(Reading::Scalar),
            AnySensor::Humidity(s) => s.last_reading().copied().map(Reading::Scalar),
            AnySensor::Pressure(s) => s.last_reading().copied().map(Reading::Scalar),
            AnySensor::Rainfall(s) => s.last_reading().copied().map(Reading::Scalar),
        }
    }

    /// Derives the statistic of a historical batch and stores it.
    pub fn process(&mut self, batch: &[f64]) -> Result<Derived> {
        match self {
            AnySensor::Pressure(s) => s.process(batch).map(Derived::Trend),
            AnySensor::Temperature(s) => s.process(batch).map(Derived::Value),
            AnySensor::Humidity(s) => s.process(batch).map(Derived::Value),
            AnySensor::Wind(s) => s.process(batch).map(Derived::Value),
            AnySensor::Rainfall(s) => s.process(batch).map(Derived::Value),
        }
    }

    /// Describes the last reading with its quantity-specific conversions.
    pub fn describe(&self, thresholds: &Thresholds) -> Option<String> {
        let unit = self.quantity().unit();
        match self {
            AnySensor::Temperature(s) => {
                let celsius = s.last_reading()?;
                let fahrenheit = s.to_fahrenheit()?;
                Some(format!("{:.1} {} ({:.1} °F)", celsius, unit, fahrenheit))
            }
            AnySensor::Humidity(s) => {
                let humidity = s.last_reading()?;
                let label = if s.is_humid(thresholds.humid)? {
                    "humid"
                } else {
                    "not humid"
                };
                Some(format!("{:.0} {} ({})", humidity, unit, label))
            }
            AnySensor::Pressure(s) => {
                let hpa = s.last_reading()?;
                Some(format!("{:.1} {} ({:.2} psi)", hpa, unit, s.to_psi()?))
            }
            AnySensor::Wind(s) => {
                let wind = s.last_reading()?;
                Some(format!("{} ({:.1} km/h)", wind, s.speed_kmh()?))
            }
            AnySensor::Rainfall(s) => {
                let rainfall = s.last_reading()?;
                let label = if s.is_raining(thresholds.rain)? {
                    "raining"
                } else {
                    "not raining"
                };
                Some(format!("{:.1} {} ({})", rainfall, unit, label))
            }
        }
    }
}

impl fmt::Display for AnySensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        each!(self, s => write!(f, "{}", s))
    }
}

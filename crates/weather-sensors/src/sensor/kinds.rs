//! Sensor kinds and their quantity-specific operations.

use super::{Kind, Sensor};
use crate::aggregate::{self, Trend};
use crate::reader::RawRecord;
use crate::units;
use crate::{Error, Quantity, Result};
use serde::Serialize;

/// Air temperature in degrees Celsius.
#[derive(Debug, Clone, Copy)]
pub struct Temperature;

/// Relative humidity in percent.
#[derive(Debug, Clone, Copy)]
pub struct Humidity;

/// Atmospheric pressure in hectopascals.
#[derive(Debug, Clone, Copy)]
pub struct Pressure;

/// Wind speed, direction and gust.
#[derive(Debug, Clone, Copy)]
pub struct Wind;

/// Rainfall amount.
#[derive(Debug, Clone, Copy)]
pub struct Rainfall;

pub type TemperatureSensor = Sensor<Temperature>;
pub type HumiditySensor = Sensor<Humidity>;
pub type PressureSensor = Sensor<Pressure>;
pub type WindSensor = Sensor<Wind>;
pub type RainfallSensor = Sensor<Rainfall>;

/// A complete wind observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WindReading {
    /// Speed in m/s
    pub speed: f64,
    /// Direction in degrees
    pub direction: f64,
    /// Gust speed in m/s
    pub gust: f64,
}

impl std::fmt::Display for WindReading {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.1} m/s from {:.0}°, gusts {:.1} m/s",
            self.speed, self.direction, self.gust
        )
    }
}

fn scalar<K: Kind>(record: &RawRecord) -> Result<f64> {
    record.get(K::QUANTITY.fields()[0].name)
}

impl Kind for Temperature {
    const QUANTITY: Quantity = Quantity::Temperature;
    type Reading = f64;
    type Derived = f64;

    fn normalize(record: &RawRecord) -> Result<f64> {
        scalar::<Self>(record)
    }

    fn derive(batch: &[f64]) -> Result<f64> {
        aggregate::mean(aggregate::ensure_finite(batch)?).ok_or(Error::EmptyBatch(Self::QUANTITY))
    }
}

impl Kind for Humidity {
    const QUANTITY: Quantity = Quantity::Humidity;
    type Reading = f64;
    type Derived = f64;

    fn normalize(record: &RawRecord) -> Result<f64> {
        scalar::<Self>(record)
    }

    fn derive(batch: &[f64]) -> Result<f64> {
        aggregate::max(aggregate::ensure_finite(batch)?).ok_or(Error::EmptyBatch(Self::QUANTITY))
    }
}

impl Kind for Pressure {
    const QUANTITY: Quantity = Quantity::Pressure;
    type Reading = f64;
    type Derived = Trend;

    fn normalize(record: &RawRecord) -> Result<f64> {
        scalar::<Self>(record)
    }

    fn derive(batch: &[f64]) -> Result<Trend> {
        aggregate::trend(batch)
    }
}

impl Kind for Wind {
    const QUANTITY: Quantity = Quantity::Wind;
    type Reading = WindReading;
    type Derived = f64;

    fn normalize(record: &RawRecord) -> Result<WindReading> {
        Ok(WindReading {
            speed: record.get("speed")?,
            direction: record.get("direction")?,
            gust: record.get("gust")?,
        })
    }

    /// Highest wind speed in the batch.
    fn derive(batch: &[f64]) -> Result<f64> {
        aggregate::max(aggregate::ensure_finite(batch)?).ok_or(Error::EmptyBatch(Self::QUANTITY))
    }
}

impl Kind for Rainfall {
    const QUANTITY: Quantity = Quantity::Rainfall;
    type Reading = f64;
    type Derived = f64;

    fn normalize(record: &RawRecord) -> Result<f64> {
        scalar::<Self>(record)
    }

    /// Total rainfall over the batch.
    fn derive(batch: &[f64]) -> Result<f64> {
        aggregate::sum(aggregate::ensure_finite(batch)?).ok_or(Error::EmptyBatch(Self::QUANTITY))
    }
}

impl Sensor<Temperature> {
    /// Last reading in degrees Fahrenheit.
    pub fn to_fahrenheit(&self) -> Option<f64> {
        self.last_reading().copied().map(units::celsius_to_fahrenheit)
    }
}

impl Sensor<Pressure> {
    /// Last reading in pounds per square inch.
    pub fn to_psi(&self) -> Option<f64> {
        self.last_reading().copied().map(units::hpa_to_psi)
    }
}

impl Sensor<Humidity> {
    /// Whether the last reading is strictly above `threshold`.
    pub fn is_humid(&self, threshold: f64) -> Option<bool> {
        self.last_reading().map(|&humidity| humidity > threshold)
    }
}

impl Sensor<Rainfall> {
    /// Whether the last reading is strictly above `threshold`.
    pub fn is_raining(&self, threshold: f64) -> Option<bool> {
        self.last_reading().map(|&rainfall| rainfall > threshold)
    }
}

impl Sensor<Wind> {
    /// Last wind speed in km/h.
    pub fn speed_kmh(&self) -> Option<f64> {
        self.last_reading().map(|wind| units::ms_to_kmh(wind.speed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubLoader;
    use crate::{Source, DEFAULT_HUMID_THRESHOLD, DEFAULT_RAIN_THRESHOLD};
    use serde_json::{json, Value};

    /// Builds an api sensor and acquires `payload` through a stub loader.
    fn acquired<K: Kind>(payload: Value) -> Sensor<K> {
        let mut sensor = Sensor::new("test", "TestCity", Source::Api("https://fake.url".into()));
        sensor.acquire_with(&StubLoader::new(payload)).unwrap();
        sensor
    }

    #[test]
    fn test_to_fahrenheit() {
        let sensor: TemperatureSensor = acquired(json!({"main": {"temp": 0}}));
        assert_eq!(sensor.to_fahrenheit(), Some(32.0));

        let sensor: TemperatureSensor = acquired(json!({"main": {"temp": -40}}));
        assert_eq!(sensor.to_fahrenheit(), Some(-40.0));
    }

    #[test]
    fn test_to_psi() {
        let sensor: PressureSensor = acquired(json!({"main": {"pressure": 1013.25}}));
        let psi = sensor.to_psi().unwrap();
        assert!((psi - 14.6959).abs() < 1e-3);
    }

    #[test]
    fn test_is_humid() {
        for (humidity, threshold, expected) in [
            (40, 50.0, false),
            (60, 50.0, true),
            (100, 50.0, true),
            (0, 50.0, false),
        ] {
            let sensor: HumiditySensor = acquired(json!({"main": {"humidity": humidity}}));
            assert_eq!(sensor.is_humid(threshold), Some(expected));
        }

        let sensor: HumiditySensor = acquired(json!({"main": {"humidity": 70}}));
        assert_eq!(sensor.is_humid(DEFAULT_HUMID_THRESHOLD), Some(false));
    }

    #[test]
    fn test_is_raining_excludes_boundary() {
        for (rainfall, expected) in [(0, false), (30, false), (50, false), (51, true), (100, true)] {
            let sensor: RainfallSensor = acquired(json!({"clouds": {"all": rainfall}}));
            assert_eq!(sensor.is_raining(DEFAULT_RAIN_THRESHOLD), Some(expected));
        }
    }

    #[test]
    fn test_speed_kmh() {
        let sensor: WindSensor =
            acquired(json!({"wind": {"speed": 10, "deg": 90, "gust": 14.2}}));
        assert_eq!(sensor.speed_kmh(), Some(36.0));
    }

    #[test]
    fn test_derived_ops_without_reading() {
        let source = Source::Api("https://fake.url".into());
        assert_eq!(TemperatureSensor::new("t", "X", source.clone()).to_fahrenheit(), None);
        assert_eq!(PressureSensor::new("p", "X", source.clone()).to_psi(), None);
        assert_eq!(HumiditySensor::new("h", "X", source.clone()).is_humid(50.0), None);
        assert_eq!(RainfallSensor::new("r", "X", source.clone()).is_raining(50.0), None);
        assert_eq!(WindSensor::new("w", "X", source).speed_kmh(), None);
    }

    #[test]
    fn test_derive_per_kind() {
        assert_eq!(Humidity::derive(&[60.0, 65.0, 63.0, 70.0, 75.0]).unwrap(), 75.0);
        assert_eq!(Wind::derive(&[3.5, 12.1, 7.0]).unwrap(), 12.1);
        assert_eq!(Rainfall::derive(&[0.5, 1.5]).unwrap(), 2.0);
        assert_eq!(
            Pressure::derive(&[1010.0, 1012.0, 1015.0]).unwrap(),
            Trend::Increasing
        );
        assert!(matches!(
            Pressure::derive(&[1010.0]),
            Err(Error::InsufficientData { .. })
        ));
        assert!(matches!(
            Humidity::derive(&[]),
            Err(Error::EmptyBatch(Quantity::Humidity))
        ));
        assert!(matches!(
            Wind::derive(&[f64::NAN, 4.0]),
            Err(Error::NonFiniteReading { index: 0, .. })
        ));
        assert!(matches!(
            Temperature::derive(&[20.0, f64::NEG_INFINITY]),
            Err(Error::NonFiniteReading { index: 1, .. })
        ));
    }

    #[test]
    fn test_wind_reading_display() {
        let reading = WindReading {
            speed: 3.5,
            direction: 250.0,
            gust: 6.1,
        };
        assert_eq!(reading.to_string(), "3.5 m/s from 250°, gusts 6.1 m/s");
    }
}

//! Configuration management.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use weather_sensors::{
    Quantity, SensorConfig, Thresholds, DEFAULT_DATA_FILE, DEFAULT_HUMID_THRESHOLD,
    DEFAULT_RAIN_THRESHOLD, STATUS_ACTIVE,
};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Data file used by file sensors that do not name their own
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// API endpoint used by api sensors that do not name their own
    #[serde(default)]
    pub api_endpoint: String,

    /// Humidity (%) above which a reading counts as humid
    #[serde(default = "default_humid_threshold")]
    pub humid_threshold: f64,

    /// Rainfall above which a reading counts as raining
    #[serde(default = "default_rain_threshold")]
    pub rain_threshold: f64,

    /// Configured sensors
    #[serde(default)]
    pub sensors: Vec<SensorEntry>,
}

/// One configured sensor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorEntry {
    /// Measured quantity
    pub quantity: Quantity,

    /// Sensor identifier
    pub sensor_id: String,

    /// Location key
    pub location: String,

    /// Operational status (default: active)
    pub status: Option<String>,

    /// Source kind: "file" or "api" (default: file)
    pub source: Option<String>,

    /// Overrides the global data file
    pub file_path: Option<PathBuf>,

    /// Overrides the global API endpoint
    pub api_endpoint: Option<String>,
}

// Default value functions
fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

fn default_humid_threshold() -> f64 {
    DEFAULT_HUMID_THRESHOLD
}

fn default_rain_threshold() -> f64 {
    DEFAULT_RAIN_THRESHOLD
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read configuration file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse configuration")?;
        Ok(config)
    }

    /// Returns the thresholds for describing readings.
    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            humid: self.humid_threshold,
            rain: self.rain_threshold,
        }
    }

    /// Builds the sensor configuration of an entry, filling in global defaults.
    pub fn sensor_config(&self, entry: &SensorEntry) -> SensorConfig {
        SensorConfig {
            sensor_id: entry.sensor_id.clone(),
            location: entry.location.clone(),
            status: entry
                .status
                .clone()
                .unwrap_or_else(|| STATUS_ACTIVE.to_string()),
            source: entry.source.clone().unwrap_or_else(|| "file".to_string()),
            file_path: entry
                .file_path
                .clone()
                .unwrap_or_else(|| self.data_file.clone()),
            api_endpoint: entry
                .api_endpoint
                .clone()
                .unwrap_or_else(|| self.api_endpoint.clone()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            api_endpoint: String::new(),
            humid_threshold: default_humid_threshold(),
            rain_threshold: default_rain_threshold(),
            sensors: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_for_empty_file() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.data_file, PathBuf::from("data/data.json"));
        assert_eq!(config.humid_threshold, 70.0);
        assert_eq!(config.rain_threshold, 50.0);
        assert!(config.sensors.is_empty());
    }

    #[test]
    fn test_entry_inherits_globals() {
        let config: Config = toml::from_str(
            r#"
            data_file = "/srv/weather/data.json"
            api_endpoint = "https://api.example/weather"

            [[sensors]]
            quantity = "pressure"
            sensor_id = "2"
            location = "Kosice"

            [[sensors]]
            quantity = "wind"
            sensor_id = "8"
            location = "Dolny Kubin"
            source = "api"
            status = "inactive"
            "#,
        )
        .unwrap();

        let pressure = config.sensor_config(&config.sensors[0]);
        assert_eq!(config.sensors[0].quantity, Quantity::Pressure);
        assert_eq!(pressure.source, "file");
        assert_eq!(pressure.status, "active");
        assert_eq!(pressure.file_path, PathBuf::from("/srv/weather/data.json"));

        let wind = config.sensor_config(&config.sensors[1]);
        assert_eq!(wind.source, "api");
        assert_eq!(wind.status, "inactive");
        assert_eq!(wind.api_endpoint, "https://api.example/weather");
    }

    #[test]
    fn test_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "rain_threshold = 20.0").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.thresholds().rain, 20.0);
        assert_eq!(config.thresholds().humid, 70.0);
    }

    #[test]
    fn test_unknown_quantity_is_rejected() {
        let result = toml::from_str::<Config>(
            r#"
            [[sensors]]
            quantity = "visibility"
            sensor_id = "1"
            location = "Zilina"
            "#,
        );
        assert!(result.is_err());
    }
}

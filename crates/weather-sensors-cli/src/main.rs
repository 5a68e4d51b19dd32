//! Weather Sensors Control Tool
//!
//! CLI for reading environmental sensors from a data file or a weather API
//! and for aggregating historical readings.

mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use weather_sensors::{
    AnySensor, Error, Quantity, Reading, SensorConfig, Thresholds, STATUS_ACTIVE,
};

use config::Config;

/// Configuration file read when `--config` is not given. Resolved against
/// the current directory, so it is only found when run from the workspace
/// root; pass `--config` elsewhere.
const DEFAULT_CONFIG: &str = "config/default.toml";

/// Status given to a sensor by `read --inactive`.
const STATUS_INACTIVE: &str = "inactive";

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum CliQuantity {
    /// Air temperature (°C)
    Temperature,
    /// Relative humidity (%)
    Humidity,
    /// Atmospheric pressure (hPa)
    Pressure,
    /// Wind speed, direction and gust
    Wind,
    /// Rainfall
    Rainfall,
}

impl From<CliQuantity> for Quantity {
    fn from(quantity: CliQuantity) -> Self {
        match quantity {
            CliQuantity::Temperature => Quantity::Temperature,
            CliQuantity::Humidity => Quantity::Humidity,
            CliQuantity::Pressure => Quantity::Pressure,
            CliQuantity::Wind => Quantity::Wind,
            CliQuantity::Rainfall => Quantity::Rainfall,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
enum CliSource {
    /// Local JSON data file
    #[default]
    File,
    /// Remote weather API
    Api,
}

impl CliSource {
    fn as_str(&self) -> &'static str {
        match self {
            CliSource::File => "file",
            CliSource::Api => "api",
        }
    }
}

#[derive(Parser)]
#[command(name = "sensorctl")]
#[command(about = "Read weather sensors and aggregate historical readings")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Configuration file (default: config/default.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Acquire one reading
    Read {
        /// Quantity to read
        #[arg(value_enum)]
        quantity: CliQuantity,

        /// Location key (e.g., Bratislava)
        location: String,

        /// Acquisition source
        #[arg(long, default_value = "file", value_enum)]
        source: CliSource,

        /// Data file (default: from configuration)
        #[arg(long)]
        file: Option<PathBuf>,

        /// API endpoint URL (default: from configuration)
        #[arg(long)]
        endpoint: Option<String>,

        /// Sensor identifier
        #[arg(long, default_value = "0")]
        id: String,

        /// Mark the sensor inactive, which refuses acquisition
        #[arg(long)]
        inactive: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Acquire a reading from every configured sensor
    Poll {
        /// Print one JSON object per sensor
        #[arg(long)]
        json: bool,
    },
    /// Derive the statistic of a batch of historical readings
    Aggregate {
        /// Quantity the readings belong to
        #[arg(value_enum)]
        quantity: CliQuantity,

        /// Readings, oldest first
        #[arg(allow_negative_numbers = true)]
        values: Vec<f64>,
    },
    /// List quantities and where their values are read from
    Quantities,
}

/// Outcome of acquiring one sensor.
#[derive(Serialize)]
struct ReadingReport<'a> {
    sensor_id: &'a str,
    quantity: Quantity,
    location: &'a str,
    status: &'a str,
    reading: Option<Reading>,
    description: Option<String>,
    error: Option<String>,
}

impl<'a> ReadingReport<'a> {
    fn new(sensor: &'a AnySensor, thresholds: &Thresholds, error: Option<&Error>) -> Self {
        Self {
            sensor_id: sensor.id(),
            quantity: sensor.quantity(),
            location: sensor.location(),
            status: sensor.status(),
            reading: sensor.last_reading(),
            description: sensor.describe(thresholds),
            error: error.map(|e| e.to_string()),
        }
    }

    fn print(&self, json: bool) -> Result<()> {
        if json {
            println!("{}", serde_json::to_string(self)?);
            return Ok(());
        }

        println!(
            "[{}] Sensor ID: {}, Location: {}, Status: {}",
            self.quantity, self.sensor_id, self.location, self.status
        );
        match (&self.description, &self.error) {
            (_, Some(error)) => println!("  Error: {}", error),
            (Some(description), None) => println!("  Reading: {}", description),
            (None, None) => println!("  Reading: none"),
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Read {
            quantity,
            location,
            source,
            file,
            endpoint,
            id,
            inactive,
            json,
        } => {
            let status = if inactive { STATUS_INACTIVE } else { STATUS_ACTIVE };
            let sensor_config = SensorConfig {
                sensor_id: id,
                location,
                status: status.to_string(),
                source: source.as_str().to_string(),
                file_path: file.unwrap_or_else(|| config.data_file.clone()),
                api_endpoint: endpoint.unwrap_or_else(|| config.api_endpoint.clone()),
            };
            handle_read(quantity.into(), &sensor_config, &config.thresholds(), json)
        }
        Commands::Poll { json } => handle_poll(&config, json),
        Commands::Aggregate { quantity, values } => handle_aggregate(quantity.into(), &values),
        Commands::Quantities => {
            handle_quantities();
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None if Path::new(DEFAULT_CONFIG).exists() => {
            debug!("Loading configuration from {}", DEFAULT_CONFIG);
            Config::load(DEFAULT_CONFIG).context("Failed to load default configuration")
        }
        None => {
            debug!("No configuration file, using defaults");
            Ok(Config::default())
        }
    }
}

fn handle_read(
    quantity: Quantity,
    sensor_config: &SensorConfig,
    thresholds: &Thresholds,
    json: bool,
) -> Result<()> {
    let mut sensor = AnySensor::from_config(quantity, sensor_config)
        .context("Invalid sensor configuration")?;

    let result = sensor.acquire();
    ReadingReport::new(&sensor, thresholds, result.as_ref().err()).print(json)?;
    result.with_context(|| format!("Failed to read {} sensor", quantity))?;
    Ok(())
}

fn handle_poll(config: &Config, json: bool) -> Result<()> {
    if config.sensors.is_empty() {
        anyhow::bail!("No sensors configured");
    }

    let thresholds = config.thresholds();
    let mut failed = 0;

    for entry in &config.sensors {
        let sensor_config = config.sensor_config(entry);
        let mut sensor = match AnySensor::from_config(entry.quantity, &sensor_config) {
            Ok(sensor) => sensor,
            Err(e) => {
                eprintln!("Sensor {}: {}", entry.sensor_id, e);
                failed += 1;
                continue;
            }
        };

        let result = sensor.acquire();
        ReadingReport::new(&sensor, &thresholds, result.as_ref().err()).print(json)?;
        match result {
            Ok(_) | Err(Error::SensorInactive { .. }) => {}
            Err(_) => failed += 1,
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} sensors failed", failed, config.sensors.len());
    }
    Ok(())
}

fn handle_aggregate(quantity: Quantity, values: &[f64]) -> Result<()> {
    let derived = weather_sensors::aggregate(quantity, values)
        .with_context(|| format!("Failed to aggregate {} readings", quantity))?;
    println!(
        "{} {} over {} readings: {}",
        quantity,
        statistic_name(quantity),
        values.len(),
        derived
    );
    Ok(())
}

fn handle_quantities() {
    println!("Quantities:");
    for quantity in Quantity::ALL {
        println!(
            "  {} ({}), batch statistic: {}",
            quantity,
            quantity.unit(),
            statistic_name(quantity)
        );
        for field in quantity.fields() {
            println!(
                "      {:<12} file: {:<12} api: {}",
                field.name,
                field.file_key,
                field.api_path.join(".")
            );
        }
    }
}

fn statistic_name(quantity: Quantity) -> &'static str {
    match quantity {
        Quantity::Temperature => "mean",
        Quantity::Humidity | Quantity::Wind => "max",
        Quantity::Rainfall => "sum",
        Quantity::Pressure => "trend",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn sample_config(locations: &[(&str, &str)]) -> Config {
        let mut config = Config {
            data_file: Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data/data.json"),
            ..Config::default()
        };
        for (index, (quantity, location)) in locations.iter().enumerate() {
            config.sensors.push(config::SensorEntry {
                quantity: quantity.parse().unwrap(),
                sensor_id: index.to_string(),
                location: location.to_string(),
                status: None,
                source: None,
                file_path: None,
                api_endpoint: None,
            });
        }
        config
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_aggregate_with_negative_values() {
        let cli = Cli::try_parse_from(["sensorctl", "aggregate", "temperature", "-3.5", "2"])
            .unwrap();
        match cli.command {
            Commands::Aggregate { quantity, values } => {
                assert!(matches!(quantity, CliQuantity::Temperature));
                assert_eq!(values, vec![-3.5, 2.0]);
            }
            _ => panic!("expected aggregate command"),
        }
    }

    #[test]
    fn test_parse_read_inactive_flag() {
        let cli = Cli::try_parse_from(["sensorctl", "read", "humidity", "Zilina", "--inactive"])
            .unwrap();
        match cli.command {
            Commands::Read { inactive, source, .. } => {
                assert!(inactive);
                assert!(matches!(source, CliSource::File));
            }
            _ => panic!("expected read command"),
        }

        let cli = Cli::try_parse_from(["sensorctl", "read", "humidity", "Zilina"]).unwrap();
        assert!(matches!(cli.command, Commands::Read { inactive: false, .. }));
        let args = ["sensorctl", "read", "humidity", "Zilina", "--status", "x"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_read_inactive_sensor_fails_without_reading() {
        let mut sensor_config = SensorConfig::new("0", "Bratislava");
        sensor_config.file_path =
            Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data/data.json");
        sensor_config.status = STATUS_INACTIVE.to_string();
        let thresholds = Thresholds::default();

        let err =
            handle_read(Quantity::Temperature, &sensor_config, &thresholds, false).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::SensorInactive { .. })
        ));

        sensor_config.status = STATUS_ACTIVE.to_string();
        assert!(handle_read(Quantity::Temperature, &sensor_config, &thresholds, false).is_ok());
    }

    #[test]
    fn test_aggregate_rejects_nan() {
        let err = handle_aggregate(Quantity::Humidity, &[f64::NAN, 1.0]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::NonFiniteReading { index: 0, .. })
        ));
    }

    #[test]
    fn test_aggregate_empty_batch_fails() {
        assert!(handle_aggregate(Quantity::Rainfall, &[]).is_err());
        assert!(handle_aggregate(Quantity::Pressure, &[1010.0]).is_err());
        assert!(handle_aggregate(Quantity::Pressure, &[1010.0, 1015.0]).is_ok());
    }

    #[test]
    fn test_poll_sample_file() {
        let config = sample_config(&[
            ("temperature", "Bratislava"),
            ("rainfall", "Zilina"),
            ("pressure", "Kosice"),
            ("wind", "Bratislava"),
            ("humidity", "Zilina"),
        ]);
        assert!(handle_poll(&config, false).is_ok());
    }

    #[test]
    fn test_poll_reports_failures() {
        let config = sample_config(&[("temperature", "Bratislava"), ("wind", "Presov")]);
        let err = handle_poll(&config, true).unwrap_err();
        assert_eq!(err.to_string(), "1 of 2 sensors failed");
    }

    #[test]
    fn test_poll_skips_inactive_sensors() {
        let mut config = sample_config(&[("humidity", "Kosice")]);
        config.sensors[0].status = Some("inactive".to_string());
        assert!(handle_poll(&config, false).is_ok());
    }

    #[test]
    fn test_poll_without_sensors() {
        assert!(handle_poll(&Config::default(), false).is_err());
    }
}

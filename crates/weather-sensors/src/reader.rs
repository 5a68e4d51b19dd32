//! Data source reader.
//!
//! Fetches the values one sensor needs for one location. The file schema is
//! a `city_data` object of flat per-location records; the API schema is a
//! single-location payload with nested groups. Which keys are read is driven
//! entirely by the quantity's [`Field`] table.

use crate::loader::DocumentLoader;
use crate::quantity::Field;
use crate::source::Source;
use crate::{Error, Result, CITY_DATA_KEY};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// Numeric values extracted for one location, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    values: BTreeMap<&'static str, f64>,
}

impl RawRecord {
    /// Returns the value of a field.
    pub fn get(&self, name: &str) -> Result<f64> {
        self.values
            .get(name)
            .copied()
            .ok_or_else(|| Error::FieldMissing(name.to_string()))
    }

    /// Returns the number of values in the record.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the record holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Fetches the fields for `location` from `source`.
pub fn fetch(
    loader: &dyn DocumentLoader,
    source: &Source,
    location: &str,
    fields: &[Field],
) -> Result<RawRecord> {
    match source {
        Source::File(path) => {
            let document = loader.load_file(path)?;
            extract_from_document(&document, location, fields)
        }
        Source::Api(endpoint) => {
            let payload = loader.load_url(endpoint)?;
            extract_from_payload(&payload, fields)
        }
    }
}

/// Extracts a location's fields from a data file document.
pub fn extract_from_document(
    document: &Value,
    location: &str,
    fields: &[Field],
) -> Result<RawRecord> {
    let cities = document
        .get(CITY_DATA_KEY)
        .and_then(Value::as_object)
        .ok_or_else(|| {
            Error::SourceUnavailable(format!("document has no '{}' object", CITY_DATA_KEY))
        })?;

    let record = cities
        .get(location)
        .ok_or_else(|| Error::LocationNotFound(location.to_string()))?;

    debug!("Found record for {}", location);
    collect(fields, |field| {
        (record.get(field.file_key), field.file_key.to_string())
    })
}

/// Extracts fields from an API payload.
pub fn extract_from_payload(payload: &Value, fields: &[Field]) -> Result<RawRecord> {
    collect(fields, |field| {
        (lookup(payload, field.api_path), field.api_path.join("."))
    })
}

fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |current, key| current.get(key))
}

/// Builds a record from every field, failing if any of them is unusable.
fn collect<'a, F>(fields: &[Field], mut locate: F) -> Result<RawRecord>
where
    F: FnMut(&Field) -> (Option<&'a Value>, String),
{
    let mut values = BTreeMap::new();
    let mut missing = Vec::new();

    for field in fields {
        match locate(field) {
            (Some(Value::Null), key) | (None, key) => missing.push(key),
            (Some(value), key) => match value.as_f64() {
                Some(number) => {
                    values.insert(field.name, number);
                }
                None => missing.push(format!("{} (not a number)", key)),
            },
        }
    }

    if !missing.is_empty() {
        return Err(Error::FieldMissing(missing.join(", ")));
    }
    Ok(RawRecord { values })
}

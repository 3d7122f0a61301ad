//! Raw dataset ingestion.
//!
//! # Responsibility
//! - Decode GeoJSON feature collections and SPARQL JSON result sets into
//!   [`RawFeature`] records.
//!
//! # Invariants
//! - Missing optional properties become `None`; present ones pass through
//!   verbatim, so an explicit `""` stays `Some("")`.
//! - A missing identity token or a non-numeric/out-of-range coordinate is a
//!   corrupt dataset and fails the whole load.

mod geojson;
mod sparql;

use crate::model::feature::RawFeature;
use crate::model::site::Coords;
use log::{error, info};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::time::Instant;

pub type DatasetResult<T> = Result<T, DatasetError>;

#[derive(Debug)]
pub enum DatasetError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    /// Document is neither a GeoJSON `FeatureCollection` nor a SPARQL result set.
    UnsupportedShape,
    /// Record at `index` is corrupt.
    InvalidRecord { index: usize, message: String },
}

impl Display for DatasetError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read dataset: {err}"),
            Self::Parse(err) => write!(f, "failed to parse dataset: {err}"),
            Self::UnsupportedShape => write!(
                f,
                "dataset is neither a GeoJSON FeatureCollection nor a SPARQL result set"
            ),
            Self::InvalidRecord { index, message } => {
                write!(f, "invalid dataset record #{index}: {message}")
            }
        }
    }
}

impl Error for DatasetError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DatasetError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for DatasetError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Detected source document shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    GeoJson,
    Sparql,
}

/// Parses a dataset document, detecting its shape.
pub fn parse_dataset(source: &str) -> DatasetResult<Vec<RawFeature>> {
    let document: Value = serde_json::from_str(source)?;
    match detect_format(&document) {
        Some(DatasetFormat::GeoJson) => geojson::decode(&document),
        Some(DatasetFormat::Sparql) => sparql::decode(&document),
        None => Err(DatasetError::UnsupportedShape),
    }
}

/// Reads and parses a dataset file.
///
/// # Side effects
/// - Emits one `dataset_load` event with record count or error.
pub fn load_dataset_file(path: impl AsRef<Path>) -> DatasetResult<Vec<RawFeature>> {
    let started_at = Instant::now();
    let result = std::fs::read_to_string(path.as_ref())
        .map_err(DatasetError::from)
        .and_then(|source| parse_dataset(&source));

    match &result {
        Ok(features) => info!(
            "event=dataset_load module=ingest status=ok records={} duration_ms={}",
            features.len(),
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=dataset_load module=ingest status=error duration_ms={} error={}",
            started_at.elapsed().as_millis(),
            err
        ),
    }
    result
}

pub fn detect_format(document: &Value) -> Option<DatasetFormat> {
    if document.get("type").and_then(Value::as_str) == Some("FeatureCollection") {
        return Some(DatasetFormat::GeoJson);
    }
    if document
        .get("results")
        .and_then(|results| results.get("bindings"))
        .is_some_and(Value::is_array)
    {
        return Some(DatasetFormat::Sparql);
    }
    None
}

/// Reads a scalar as text; numbers are rendered, strings are kept verbatim.
fn scalar_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn checked_coords(index: usize, lat: f64, lon: f64) -> DatasetResult<Coords> {
    let coords = Coords::new(lat, lon);
    if !coords.is_valid() {
        return Err(DatasetError::InvalidRecord {
            index,
            message: format!("coordinates out of range: lat={lat} lon={lon}"),
        });
    }
    Ok(coords)
}

fn required_token(index: usize, token: Option<String>) -> DatasetResult<String> {
    token
        .filter(|token| !token.trim().is_empty())
        .ok_or_else(|| DatasetError::InvalidRecord {
            index,
            message: "missing or blank identity token `item`".to_string(),
        })
}

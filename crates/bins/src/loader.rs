//! Lenient loader for the bundled recycling-bin GeoJSON.
//!
//! The dataset comes from a municipal export and is not guaranteed to be
//! clean, so individual features never fail the load:
//!
//! - the id is taken from `properties.id`, then `properties.ObjectId`, then the
//!   feature `id`, and finally falls back to `bin-{index}`
//! - coordinates are read from `geometry.coordinates` as `[lon, lat, ..]`;
//!   anything shorter than two entries places the bin at (0, 0)
//!
//! Only a document that is not JSON at all, or has no `features` array, is
//! rejected by [`parse_dataset`]. [`bins_from_geojson_str`] turns that into an
//! empty catalog.

use serde_json::Value;
use tracing::{debug, warn};

use crate::identifiers::BinIdentifier;
use crate::models::types::{Bin, BinError, Result};

/// Parse a feature collection into bins, failing only on structural problems.
pub fn parse_dataset(raw: &str) -> Result<Vec<Bin>> {
    let document: Value = serde_json::from_str(raw)?;
    bins_from_features(&document)
}

/// Parse a feature collection into bins, yielding an empty list when the
/// document itself is malformed.
pub fn bins_from_geojson_str(raw: &str) -> Vec<Bin> {
    match parse_dataset(raw) {
        Ok(bins) => bins,
        Err(error) => {
            warn!("ignoring bin dataset: {error}");
            Vec::new()
        }
    }
}

fn bins_from_features(document: &Value) -> Result<Vec<Bin>> {
    let features = document
        .get("features")
        .and_then(Value::as_array)
        .ok_or_else(|| BinError::InvalidDataset("missing `features` array".into()))?;

    let bins: Vec<Bin> = features
        .iter()
        .enumerate()
        .map(|(index, feature)| bin_from_feature(index, feature))
        .collect();

    debug!("loaded {} bins", bins.len());
    Ok(bins)
}

fn bin_from_feature(index: usize, feature: &Value) -> Bin {
    let properties = feature.get("properties");

    let id = [
        properties.and_then(|p| p.get("id")),
        properties.and_then(|p| p.get("ObjectId")),
        feature.get("id"),
    ]
    .into_iter()
    .flatten()
    .find_map(id_from_value)
    .map(BinIdentifier::new)
    .unwrap_or_else(|| BinIdentifier::from_index(index));

    let coordinates = feature
        .get("geometry")
        .and_then(|g| g.get("coordinates"))
        .and_then(Value::as_array)
        .filter(|c| c.len() >= 2);

    let (latitude, longitude) = match coordinates {
        Some(c) => (coordinate(&c[1]), coordinate(&c[0])),
        None => {
            debug!("bin {id} has no usable coordinates, placing it at (0, 0)");
            (0.0, 0.0)
        }
    };

    Bin::new(id, latitude, longitude)
}

fn id_from_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn coordinate(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

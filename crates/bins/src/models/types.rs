//! Core data types for recycling-bin locations.

use std::sync::Arc;

use geo::Point;

use crate::identifiers::BinIdentifier;

/// Display title shared by every bin in the bundled dataset.
pub const DEFAULT_BIN_TITLE: &str = "Recycle Bin";

// ============================================================================
// Data Structures
// ============================================================================

/// A recycling bin the player can walk to.
///
/// `location` follows the `geo` convention of `x = longitude`, `y = latitude`.
#[derive(Clone, Debug, PartialEq)]
pub struct Bin {
    pub id: BinIdentifier,
    pub title: Arc<str>,
    pub location: Point,
}

impl Bin {
    pub fn new(id: BinIdentifier, latitude: f64, longitude: f64) -> Self {
        Self {
            id,
            title: DEFAULT_BIN_TITLE.into(),
            location: Point::new(longitude, latitude),
        }
    }

    pub fn latitude(&self) -> f64 {
        self.location.y()
    }

    pub fn longitude(&self) -> f64 {
        self.location.x()
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum BinError {
    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),

    #[error("Dataset is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BinError>;

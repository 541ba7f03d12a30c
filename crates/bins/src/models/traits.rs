//! Core trait for bin lookups.
//!
//! Implementations can be in-memory or backed by some other store; the game
//! only ever talks to this interface.

use std::sync::Arc;

use geo::Point;

use crate::identifiers::BinIdentifier;
use crate::models::types::Bin;

/// Read-only access to the set of bins loaded at startup
pub trait BinProvider: Send + Sync {
    fn get_bin(&self, id: &BinIdentifier) -> Option<Arc<Bin>>;

    fn all_bins(&self) -> Vec<Arc<Bin>>;

    /// Bins whose haversine distance to `point` is at most `radius_m`
    fn bins_near(&self, point: Point, radius_m: f64) -> Vec<Arc<Bin>>;

    fn len(&self) -> usize {
        self.all_bins().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

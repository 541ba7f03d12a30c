//! In-memory bin provider built from the bundled dataset.
//!
//! Stores every bin in memory with a spatial index for radius queries.

use std::collections::HashMap;
use std::sync::Arc;

use geo::Point;
use rstar::RTree;

use crate::identifiers::BinIdentifier;
use crate::models::{traits::BinProvider, types::Bin};
use crate::spatial::index::{unit_vector, BinNode};
use crate::spatial::queries::{chord_for_distance, haversine_distance};

/// In-memory bin provider with spatial indexing
///
/// This type is cheap to clone since all data is stored in `Arc`s.
#[derive(Clone)]
pub struct StaticBinProvider {
    bins: Vec<Arc<Bin>>,
    bin_map: HashMap<BinIdentifier, Arc<Bin>>,
    bin_tree: RTree<BinNode>,
}

impl StaticBinProvider {
    /// Create a new empty provider
    pub fn new() -> Self {
        Self {
            bins: Vec::new(),
            bin_map: HashMap::new(),
            bin_tree: RTree::new(),
        }
    }

    /// Build provider from loaded bins
    ///
    /// Later duplicates of an identifier shadow earlier ones in id lookups but
    /// all of them stay on the map.
    pub fn from_bins(bins: Vec<Bin>) -> Self {
        let bins: Vec<Arc<Bin>> = bins.into_iter().map(Arc::new).collect();

        let bin_map: HashMap<_, _> = bins.iter().map(|b| (b.id.clone(), b.clone())).collect();

        let bin_tree = RTree::bulk_load(
            bins.iter()
                .enumerate()
                .map(|(index, b)| BinNode::new(index, b.clone()))
                .collect(),
        );

        Self {
            bins,
            bin_map,
            bin_tree,
        }
    }
}

impl Default for StaticBinProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl BinProvider for StaticBinProvider {
    fn get_bin(&self, id: &BinIdentifier) -> Option<Arc<Bin>> {
        self.bin_map.get(id).cloned()
    }

    fn all_bins(&self) -> Vec<Arc<Bin>> {
        self.bins.clone()
    }

    fn bins_near(&self, point: Point, radius_m: f64) -> Vec<Arc<Bin>> {
        // Validate radius is non-negative
        if radius_m < 0.0 || !radius_m.is_finite() {
            return Vec::new();
        }

        // Small pad so bins sitting exactly on the radius survive the coarse stage
        let chord = chord_for_distance(radius_m) * (1.0 + 1e-9) + 1e-12;

        let mut found: Vec<&BinNode> = self
            .bin_tree
            .locate_within_distance(unit_vector(point), chord * chord)
            .filter(|node| haversine_distance(point, node.bin.location) <= radius_m)
            .collect();

        // Dataset order keeps marker lists stable between updates
        found.sort_by_key(|node| node.index);
        found.into_iter().map(|node| node.bin.clone()).collect()
    }

    fn len(&self) -> usize {
        self.bins.len()
    }
}

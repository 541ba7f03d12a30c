//! R-tree nodes for spatial indexing.
//!
//! ## Two-Stage Filtering
//!
//! Radius queries run in two stages:
//! 1. **R-tree filter**: Euclidean distance between unit-sphere (ECEF)
//!    vectors, compared against the chord that spans the requested meters
//! 2. **Haversine filter**: Exact geodesic distance on the candidates
//!
//! Chords have no seam at ±180° longitude and no singularity at the poles, so
//! the first stage never drops a bin the second would keep.

use std::sync::Arc;

use geo::Point;
use rstar::{PointDistance, RTreeObject, AABB};

use crate::models::types::Bin;

/// Position of `point` on the unit sphere, as `[x, y, z]`
pub fn unit_vector(point: Point) -> [f64; 3] {
    let lat = point.y().to_radians();
    let lon = point.x().to_radians();
    [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()]
}

#[derive(Clone)]
pub struct BinNode {
    pub bin: Arc<Bin>,
    /// Position of the bin in the dataset
    pub index: usize,
    point: [f64; 3],
}

impl BinNode {
    pub fn new(index: usize, bin: Arc<Bin>) -> Self {
        Self {
            point: unit_vector(bin.location),
            index,
            bin,
        }
    }
}

impl RTreeObject for BinNode {
    type Envelope = AABB<[f64; 3]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for BinNode {
    fn distance_2(&self, point: &[f64; 3]) -> f64 {
        self.point
            .iter()
            .zip(point)
            .map(|(a, b)| (a - b) * (a - b))
            .sum()
    }
}

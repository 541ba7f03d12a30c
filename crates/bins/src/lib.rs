//! # ecotrail-bins
//!
//! Recycling-bin locations and the geodesic math used to reach them.
//!
//! ## Features
//!
//! - **Lenient loading**: Bins are read from a bundled GeoJSON feature collection;
//!   malformed entries fall back to defaults instead of failing the load
//! - **Spatial queries**: R-tree backed radius lookups that hold up across the
//!   antimeridian and near the poles
//! - **Haversine distances**: Great-circle distances in meters
//!
//! ## Example
//!
//! ```
//! use ecotrail_bins::prelude::*;
//! use geo::Point;
//!
//! let bin = Bin {
//!     id: BinIdentifier::new("bin-0"),
//!     title: "Recycle Bin".into(),
//!     location: Point::new(-73.9935, 40.7505),
//! };
//!
//! let provider = StaticBinProvider::from_bins(vec![bin]);
//!
//! // A player standing about 30m north of the bin
//! let player = Point::new(-73.9935, 40.75077);
//! let nearby = provider.bins_near(player, 50.0);
//! assert_eq!(nearby.len(), 1);
//! ```

pub mod identifiers;
pub mod loader;
pub mod models;
pub mod provider;
pub mod spatial;

// Re-exports for convenience
pub mod prelude {
    pub use crate::identifiers::*;
    pub use crate::loader::bins_from_geojson_str;
    pub use crate::models::{traits::*, types::*};
    pub use crate::provider::static_provider::StaticBinProvider;
    pub use crate::spatial::{distance_between, haversine_distance};
}

pub use prelude::*;

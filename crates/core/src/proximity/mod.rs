//! The map tab: where the player is, which bins are around, which can be tapped.
//!
//! The screen runs as a small state machine
//!
//! ```text
//! AwaitingPermission --denied--> Denied
//!         |
//!      granted
//!         v
//!    AwaitingFix --first fix--> Active
//! ```
//!
//! Device location and heading arrive as [`MapEvent`]s on a queue owned by the
//! [`MapScreen`]; they are applied one at a time, and every applied event may
//! move the map camera.

pub mod device;
pub mod marker;
pub mod screen;
pub mod state;

pub use device::{
    EventSender, LocationFix, LocationService, MapEvent, PermissionStatus, Subscription,
};
pub use marker::{BinMarker, MarkerColor, markers_geojson, nearby_markers};
pub use screen::{MapCamera, MapScreen, Navigation, TapOutcome};
pub use state::{ProximityPhase, ProximityState};

//! The player's progress: points, profile, badges and mission tracking.
//!
//! There is exactly one [`ProgressStore`] per running game. It is owned by
//! whoever provisions the game and lent to screens by reference; nothing
//! reaches it through globals.

pub mod player;
pub mod store;

pub use player::{Badge, PlayerState};
pub use store::ProgressStore;

use std::sync::Arc;

use crate::{clock::Clock, progress::ProgressStore, rules::GameRules};

pub mod camera;
pub mod clock;
pub mod error;
pub mod leaderboard;
pub mod mission;
pub mod profile;
pub mod progress;
pub mod proximity;
pub mod rules;

// Re-export bins from the bins crate
pub use ecotrail_bins as bins;

pub use error::{GameError, Result};

/// Everything a running game needs, created once at app start.
pub struct Game {
    pub rules: Arc<GameRules>,
    pub bins: Arc<dyn bins::BinProvider>,
    pub progress: ProgressStore,
}

impl Game {
    pub fn new(rules: GameRules, bins: Arc<dyn bins::BinProvider>, clock: Arc<dyn Clock>) -> Self {
        Self {
            rules: Arc::new(rules),
            bins,
            progress: ProgressStore::new(clock),
        }
    }

    /// Build a game from the bundled GeoJSON dataset. A malformed dataset
    /// yields a game without bins rather than an error.
    pub fn from_dataset(rules: GameRules, dataset: &str, clock: Arc<dyn Clock>) -> Self {
        let bins = bins::StaticBinProvider::from_bins(bins::bins_from_geojson_str(dataset));
        tracing::info!("game starting with {} bins", bins::BinProvider::len(&bins));
        Self::new(rules, Arc::new(bins), clock)
    }
}

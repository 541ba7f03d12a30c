use ecotrail_bins::BinIdentifier;

use crate::proximity::ProximityPhase;

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("unknown bin: {0}")]
    UnknownBin(BinIdentifier),

    #[error("map is not active (currently {0})")]
    MapInactive(ProximityPhase),

    #[error("{kind} updates could not be started: {message}")]
    Subscription { kind: &'static str, message: String },

    #[error("invalid game rules: {0}")]
    InvalidRules(String),

    #[error("failed to parse game rules: {0}")]
    RulesJson(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;

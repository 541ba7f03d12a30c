use ecotrail_core::GameError;

pub mod bridge;
pub mod map;
pub mod mission;
pub mod session;

#[derive(Debug, thiserror::Error, uniffi::Error)]
#[uniffi(flat_error)]
pub enum SessionError {
    /// The store was used before the session started or after it shut down
    #[error("progress store used outside of an active game session")]
    StoreUnavailable,

    #[error("map screen already closed")]
    MapClosed,

    #[error("{0}")]
    Game(String),
}

impl From<GameError> for SessionError {
    fn from(error: GameError) -> Self {
        Self::Game(error.to_string())
    }
}

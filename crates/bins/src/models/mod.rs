//! Bin data models, types, and traits.

pub mod traits;
pub mod types;

// Re-exports for convenience
pub use traits::BinProvider;
pub use types::{Bin, BinError, Result, DEFAULT_BIN_TITLE};

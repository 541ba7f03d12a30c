//! Type-safe identifiers for bins and missions.
//!
//! All identifiers use Arc<str> for cheap cloning and minimal memory overhead.

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

macro_rules! impl_identifier {
    ($name:ident) => {
        #[derive(Clone, Debug, PartialOrd, Ord)]
        pub struct $name(Arc<str>);

        impl $name {
            pub fn new(s: impl AsRef<str>) -> Self {
                Self(s.as_ref().into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
            }
        }

        impl Eq for $name {}

        impl Hash for $name {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.0.hash(state);
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::new(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }
    };
}

impl_identifier!(BinIdentifier);
impl_identifier!(MissionIdentifier);

/// Identifier prefix given to bins that carry no id of their own in the dataset.
pub const BIN_ID_PREFIX: &str = "bin-";

/// Legacy identifier for the single hardcoded bin of early builds.
pub const LEGACY_BIN_ID: &str = "recyclingBin";

impl MissionIdentifier {
    /// Whether this identifier follows the bin naming convention, i.e. a visit
    /// to it also counts towards the "visit any bin" daily mission.
    pub fn is_bin_visit(&self) -> bool {
        self.0.starts_with(BIN_ID_PREFIX) || &*self.0 == LEGACY_BIN_ID
    }
}

impl BinIdentifier {
    /// Fallback identifier for the bin at `index` in the dataset.
    pub fn from_index(index: usize) -> Self {
        Self::new(format!("{BIN_ID_PREFIX}{index}"))
    }
}

// Every bin doubles as a mission of the same name; both ids share the Arc.
impl From<&BinIdentifier> for MissionIdentifier {
    fn from(id: &BinIdentifier) -> Self {
        Self(Arc::clone(&id.0))
    }
}

impl From<BinIdentifier> for MissionIdentifier {
    fn from(id: BinIdentifier) -> Self {
        Self(id.0)
    }
}

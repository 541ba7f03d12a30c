use strum::{AsRefStr, Display};

use crate::proximity::device::{LocationFix, PermissionStatus};

pub const LOCATION_DENIED_MESSAGE: &str = "Permission to access location was denied";
pub const AWAITING_FIX_MESSAGE: &str = "Fetching your location...";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum ProximityPhase {
    AwaitingPermission,
    AwaitingFix,
    Active,
    Denied,
    Failed,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ProximityState {
    AwaitingPermission,
    AwaitingFix,
    Active { fix: LocationFix },
    /// Location permission was refused; terminal
    Denied,
    /// Location updates could not be started; terminal
    Failed { message: String },
}

impl ProximityState {
    pub fn phase(&self) -> ProximityPhase {
        match self {
            Self::AwaitingPermission => ProximityPhase::AwaitingPermission,
            Self::AwaitingFix => ProximityPhase::AwaitingFix,
            Self::Active { .. } => ProximityPhase::Active,
            Self::Denied => ProximityPhase::Denied,
            Self::Failed { .. } => ProximityPhase::Failed,
        }
    }

    pub fn fix(&self) -> Option<LocationFix> {
        match self {
            Self::Active { fix } => Some(*fix),
            _ => None,
        }
    }

    /// The static message to show in place of the map, if any
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::AwaitingFix => Some(AWAITING_FIX_MESSAGE),
            Self::Denied => Some(LOCATION_DENIED_MESSAGE),
            Self::Failed { message } => Some(message.as_str()),
            Self::AwaitingPermission | Self::Active { .. } => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Denied | Self::Failed { .. })
    }

    pub(crate) fn on_permission(&self, status: PermissionStatus) -> Option<Self> {
        match (self, status) {
            (Self::AwaitingPermission, PermissionStatus::Granted) => Some(Self::AwaitingFix),
            (Self::AwaitingPermission, PermissionStatus::Denied) => Some(Self::Denied),
            _ => None,
        }
    }

    pub(crate) fn on_fix(&self, fix: LocationFix) -> Option<Self> {
        match self {
            Self::AwaitingFix | Self::Active { .. } => Some(Self::Active { fix }),
            _ => None,
        }
    }
}

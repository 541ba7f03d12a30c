//! The mission screen opened after tapping a bin: a live camera viewfinder
//! with the mission name on top.

use futures_core::future::BoxFuture;
use tracing::info;

use ecotrail_bins::MissionIdentifier;

use crate::proximity::PermissionStatus;

pub const REQUESTING_MESSAGE: &str = "Requesting camera permission...";
pub const DENIED_MESSAGE: &str = "No access to camera";

pub trait CameraService: Send + Sync {
    fn request_camera_permission(&self) -> BoxFuture<'_, PermissionStatus>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraState {
    Requesting,
    Denied,
    Viewfinder,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MissionDetailScreen {
    mission_id: MissionIdentifier,
    state: CameraState,
}

impl MissionDetailScreen {
    pub fn new(mission_id: MissionIdentifier) -> Self {
        Self {
            mission_id,
            state: CameraState::Requesting,
        }
    }

    pub async fn mount(mission_id: MissionIdentifier, camera: &dyn CameraService) -> Self {
        let mut screen = Self::new(mission_id);
        let status = camera.request_camera_permission().await;
        screen.on_permission(status);
        screen
    }

    pub fn on_permission(&mut self, status: PermissionStatus) {
        if self.state != CameraState::Requesting {
            return;
        }
        info!(mission = %self.mission_id, "camera permission {status}");
        self.state = match status {
            PermissionStatus::Granted => CameraState::Viewfinder,
            PermissionStatus::Denied => CameraState::Denied,
        };
    }

    pub fn mission_id(&self) -> &MissionIdentifier {
        &self.mission_id
    }

    pub fn state(&self) -> CameraState {
        self.state
    }

    /// Text shown instead of the viewfinder, if any
    pub fn message(&self) -> Option<&'static str> {
        match self.state {
            CameraState::Requesting => Some(REQUESTING_MESSAGE),
            CameraState::Denied => Some(DENIED_MESSAGE),
            CameraState::Viewfinder => None,
        }
    }

    /// Text drawn over the viewfinder
    pub fn overlay(&self) -> Option<String> {
        (self.state == CameraState::Viewfinder).then(|| format!("Mission: {}", self.mission_id))
    }
}

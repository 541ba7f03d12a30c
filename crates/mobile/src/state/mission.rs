use ecotrail_core::{
    camera::{CameraState, MissionDetailScreen},
    mission::{DailyMissionStatus, MissionBoard, PermanentMissionStatus},
};

#[derive(Clone, Debug, uniffi::Record)]
pub struct DailyMissionRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub xp: u32,
    pub completed_today: bool,
}

impl From<&DailyMissionStatus> for DailyMissionRecord {
    fn from(status: &DailyMissionStatus) -> Self {
        Self {
            id: status.mission.id.to_owned(),
            title: status.mission.title.to_owned(),
            description: status.mission.description.to_owned(),
            xp: status.mission.xp,
            completed_today: status.completed_today,
        }
    }
}

#[derive(Clone, Debug, uniffi::Record)]
pub struct PermanentMissionRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub xp: u32,
    pub goal: u32,
    pub progress: u32,
    /// e.g. `3/5`
    pub progress_label: String,
    pub completed: bool,
}

impl From<&PermanentMissionStatus> for PermanentMissionRecord {
    fn from(status: &PermanentMissionStatus) -> Self {
        Self {
            id: status.mission.id.to_owned(),
            title: status.mission.title.to_owned(),
            description: status.mission.description.to_owned(),
            xp: status.mission.xp,
            goal: status.mission.goal,
            progress: status.progress,
            progress_label: status.progress_label(),
            completed: status.completed,
        }
    }
}

#[derive(Clone, Debug, uniffi::Record)]
pub struct MissionBoardRecord {
    pub daily: Vec<DailyMissionRecord>,
    pub permanent: Vec<PermanentMissionRecord>,
    pub time_left: String,
}

impl From<MissionBoard> for MissionBoardRecord {
    fn from(board: MissionBoard) -> Self {
        Self {
            daily: board.daily.iter().map(Into::into).collect(),
            permanent: board.permanent.iter().map(Into::into).collect(),
            time_left: board.time_left,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, uniffi::Enum)]
pub enum CameraStatus {
    Requesting,
    Denied,
    Viewfinder,
}

impl From<CameraState> for CameraStatus {
    fn from(state: CameraState) -> Self {
        match state {
            CameraState::Requesting => Self::Requesting,
            CameraState::Denied => Self::Denied,
            CameraState::Viewfinder => Self::Viewfinder,
        }
    }
}

/// The mission screen after the camera permission prompt
#[derive(Clone, Debug, uniffi::Record)]
pub struct MissionScreenRecord {
    pub mission_id: String,
    pub camera: CameraStatus,
    /// Shown instead of the viewfinder
    pub message: Option<String>,
    /// Drawn over the viewfinder
    pub overlay: Option<String>,
}

impl From<&MissionDetailScreen> for MissionScreenRecord {
    fn from(screen: &MissionDetailScreen) -> Self {
        Self {
            mission_id: screen.mission_id().to_string(),
            camera: screen.state().into(),
            message: screen.message().map(str::to_owned),
            overlay: screen.overlay(),
        }
    }
}

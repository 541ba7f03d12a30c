pub mod board;
pub mod catalog;

pub use board::{DailyMissionStatus, MissionBoard, PermanentMissionStatus, time_until_midnight};
pub use catalog::{
    COMPLETE_ANY_MISSION, COMPLETE_FIVE_MISSIONS, DAILY_MISSIONS, DailyMission, PERMANENT_MISSIONS,
    PermanentMission, VISIT_ANY_BIN, VISIT_FIVE_BINS,
};

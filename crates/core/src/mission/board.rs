//! What the missions tab shows: today's dailies, permanent progress, and the
//! countdown to the daily reset.

use chrono::{Duration, NaiveDateTime, NaiveTime};

use crate::{
    mission::catalog::{DAILY_MISSIONS, DailyMission, PERMANENT_MISSIONS, PermanentMission},
    progress::ProgressStore,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DailyMissionStatus {
    pub mission: DailyMission,
    pub completed_today: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PermanentMissionStatus {
    pub mission: PermanentMission,
    pub progress: u32,
    pub completed: bool,
}

impl PermanentMissionStatus {
    /// e.g. `3/5`
    pub fn progress_label(&self) -> String {
        format!("{}/{}", self.progress, self.mission.goal)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MissionBoard {
    pub daily: Vec<DailyMissionStatus>,
    pub permanent: Vec<PermanentMissionStatus>,
    /// Until the dailies reset, e.g. `5h 12m`
    pub time_left: String,
}

impl MissionBoard {
    pub fn from_store(store: &ProgressStore) -> Self {
        let today = store.today();

        let daily = DAILY_MISSIONS
            .iter()
            .map(|mission| DailyMissionStatus {
                mission: *mission,
                completed_today: store.visited_on(mission.id, today),
            })
            .collect();

        let permanent = PERMANENT_MISSIONS
            .iter()
            .map(|mission| PermanentMissionStatus {
                mission: *mission,
                progress: store.permanent_progress(mission.id),
                completed: store.is_completed(mission.id),
            })
            .collect();

        Self {
            daily,
            permanent,
            time_left: format_time_left(time_until_midnight(store.clock().now())),
        }
    }
}

/// Time from `now` until the next local midnight
pub fn time_until_midnight(now: NaiveDateTime) -> Duration {
    let next_midnight = (now.date() + Duration::days(1)).and_time(NaiveTime::MIN);
    next_midnight - now
}

fn format_time_left(left: Duration) -> String {
    format!("{}h {}m", left.num_hours(), left.num_minutes() % 60)
}

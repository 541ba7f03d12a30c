//! The fixed set of missions shipped with the game.

/// Daily: tap any recycling bin
pub const VISIT_ANY_BIN: &str = "d1";
/// Daily: finish any mission
pub const COMPLETE_ANY_MISSION: &str = "d2";
/// Permanent: tap five bins
pub const VISIT_FIVE_BINS: &str = "p1";
/// Permanent: finish five missions
pub const COMPLETE_FIVE_MISSIONS: &str = "p2";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DailyMission {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub xp: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PermanentMission {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub xp: u32,
    pub goal: u32,
}

pub static DAILY_MISSIONS: [DailyMission; 2] = [
    DailyMission {
        id: VISIT_ANY_BIN,
        title: "Visit a Recycling Bin",
        description: "Go to a recycling bin nearby and tap it.",
        xp: 10,
    },
    DailyMission {
        id: COMPLETE_ANY_MISSION,
        title: "Complete a Mission",
        description: "Finish any mission to earn extra XP.",
        xp: 10,
    },
];

pub static PERMANENT_MISSIONS: [PermanentMission; 2] = [
    PermanentMission {
        id: VISIT_FIVE_BINS,
        title: "Visit 5 Recycling Bins",
        description: "Go to 5 recycling bins and tap it.",
        xp: 10,
        goal: 5,
    },
    PermanentMission {
        id: COMPLETE_FIVE_MISSIONS,
        title: "Complete 5 Missions",
        description: "Finish 5 missions.",
        xp: 10,
        goal: 5,
    },
];

pub fn daily_mission(id: &str) -> Option<&'static DailyMission> {
    DAILY_MISSIONS.iter().find(|m| m.id == id)
}

pub fn permanent_mission(id: &str) -> Option<&'static PermanentMission> {
    PERMANENT_MISSIONS.iter().find(|m| m.id == id)
}

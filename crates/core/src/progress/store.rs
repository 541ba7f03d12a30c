use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::NaiveDate;
use ecotrail_bins::MissionIdentifier;
use tracing::{debug, info};

use crate::{
    clock::Clock,
    mission::VISIT_ANY_BIN,
    progress::player::{Badge, PlayerState},
    rules::MissionStep,
};

/// Single owner of all mutable game progress.
///
/// Every mutation is a plain read-modify-write through `&mut self`, so
/// updates are applied one at a time in the order they are issued.
pub struct ProgressStore {
    player: PlayerState,
    /// Mission or bin id -> the last day it was credited
    visit_tracker: HashMap<MissionIdentifier, NaiveDate>,
    /// Only ever grows
    completed_missions: HashSet<MissionIdentifier>,
    /// Only ever grows, never above the mission goal
    permanent_progress: HashMap<MissionIdentifier, u32>,
    clock: Arc<dyn Clock>,
}

impl ProgressStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            player: PlayerState::default(),
            visit_tracker: HashMap::new(),
            completed_missions: HashSet::new(),
            permanent_progress: HashMap::new(),
            clock,
        }
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn points(&self) -> u64 {
        self.player.points
    }

    pub fn clock(&self) -> &dyn Clock {
        &*self.clock
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn add_xp(&mut self, amount: u32) {
        self.player.points = self.player.points.saturating_add(u64::from(amount));
        debug!(amount, total = self.player.points, "xp added");
    }

    /// Award `xp` for visiting `id`, at most once per local calendar day.
    ///
    /// Bin ids also credit the shared "visit any bin" daily mission under its
    /// own id, so one call can pay out twice. Returns whether anything was paid.
    pub fn add_visit_xp(&mut self, id: &MissionIdentifier, xp: u32) -> bool {
        let today = self.today();
        let mut added = false;

        if id.is_bin_visit() {
            let any_bin = MissionIdentifier::new(VISIT_ANY_BIN);
            if self.credit_daily(any_bin, today, xp) {
                added = true;
            }
        }

        if self.credit_daily(id.clone(), today, xp) {
            added = true;
        }

        added
    }

    fn credit_daily(&mut self, id: MissionIdentifier, today: NaiveDate, xp: u32) -> bool {
        if self.visit_tracker.get(&id) == Some(&today) {
            debug!(%id, "already credited today");
            return false;
        }

        info!(%id, xp, %today, "daily credit");
        self.add_xp(xp);
        self.visit_tracker.insert(id, today);
        true
    }

    /// Mark `id` complete, granting `xp` the first time only.
    pub fn complete_mission(&mut self, id: &MissionIdentifier, xp: u32) -> bool {
        if self.completed_missions.contains(id) {
            return false;
        }

        info!(%id, xp, "mission completed");
        self.add_xp(xp);
        self.completed_missions.insert(id.clone());
        true
    }

    /// Advance a permanent mission by `step.increment`, completing it once the
    /// counter reaches `step.goal`. Returns the new counter value.
    pub fn increment_permanent_mission(
        &mut self,
        id: &MissionIdentifier,
        step: MissionStep,
    ) -> u32 {
        let current = self.permanent_progress(id.as_str());
        let next = current.saturating_add(step.increment);

        let stored = if next >= step.goal {
            self.complete_mission(id, step.xp);
            step.goal.max(current)
        } else {
            next
        };

        self.permanent_progress.insert(id.clone(), stored);
        debug!(%id, progress = stored, goal = step.goal, "permanent mission progress");
        stored
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.player.username = username.into();
    }

    pub fn set_avatar(&mut self, avatar: Option<String>) {
        self.player.avatar = avatar;
    }

    pub fn set_badges(&mut self, badges: Vec<Badge>) {
        self.player.badges = badges;
    }

    /// Append `badge` unless one with the same id is already held.
    pub fn award_badge(&mut self, badge: Badge) -> bool {
        if self.player.badges.iter().any(|b| b.id == badge.id) {
            return false;
        }
        info!(badge = %badge.id, "badge awarded");
        self.player.badges.push(badge);
        true
    }

    pub fn last_visit(&self, id: &str) -> Option<NaiveDate> {
        self.visit_tracker.get(id).copied()
    }

    pub fn visited_on(&self, id: &str, date: NaiveDate) -> bool {
        self.last_visit(id) == Some(date)
    }

    pub fn visited_today(&self, id: &str) -> bool {
        self.visited_on(id, self.today())
    }

    pub fn is_completed(&self, id: &str) -> bool {
        self.completed_missions.contains(id)
    }

    pub fn permanent_progress(&self, id: &str) -> u32 {
        self.permanent_progress.get(id).copied().unwrap_or(0)
    }

    pub fn visit_tracker(&self) -> &HashMap<MissionIdentifier, NaiveDate> {
        &self.visit_tracker
    }

    pub fn completed_missions(&self) -> impl Iterator<Item = &MissionIdentifier> {
        self.completed_missions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use chrono::Duration;

    fn store() -> (ProgressStore, Arc<ManualClock>) {
        let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let clock = Arc::new(ManualClock::new(day.and_hms_opt(9, 30, 0).unwrap()));
        (ProgressStore::new(clock.clone()), clock)
    }

    fn id(s: &str) -> MissionIdentifier {
        MissionIdentifier::new(s)
    }

    #[test]
    fn test_defaults() {
        let (store, _) = store();
        assert_eq!(store.points(), 0);
        assert_eq!(store.player().username, "Player");
        assert_eq!(store.player().avatar, None);
        assert_eq!(store.player().badges, vec![Badge::began_journey()]);
    }

    #[test]
    fn test_add_xp_is_unconditional() {
        let (mut store, _) = store();
        store.add_xp(10);
        store.add_xp(10);
        assert_eq!(store.points(), 20);
    }

    #[test]
    fn test_visit_xp_once_per_day() {
        let (mut store, clock) = store();

        assert!(store.add_visit_xp(&id("d2"), 10));
        assert!(!store.add_visit_xp(&id("d2"), 10));
        assert_eq!(store.points(), 10);

        clock.advance(Duration::days(1));
        assert!(store.add_visit_xp(&id("d2"), 10));
        assert_eq!(store.points(), 20);
    }

    #[test]
    fn test_bin_visit_pays_twice() {
        let (mut store, _) = store();

        assert!(store.add_visit_xp(&id("bin-4"), 10));
        assert_eq!(store.points(), 20);
        assert!(store.visited_today("bin-4"));
        assert!(store.visited_today(VISIT_ANY_BIN));

        // A different bin the same day only earns its own credit
        assert!(store.add_visit_xp(&id("bin-5"), 10));
        assert_eq!(store.points(), 30);

        assert!(!store.add_visit_xp(&id("bin-4"), 10));
        assert_eq!(store.points(), 30);
    }

    #[test]
    fn test_legacy_bin_id_counts_as_bin() {
        let (mut store, _) = store();
        assert!(store.add_visit_xp(&id("recyclingBin"), 5));
        assert_eq!(store.points(), 10);
    }

    #[test]
    fn test_complete_mission_is_idempotent() {
        let (mut store, _) = store();

        assert!(store.complete_mission(&id("m1"), 25));
        assert!(!store.complete_mission(&id("m1"), 25));
        assert_eq!(store.points(), 25);
        assert!(store.is_completed("m1"));
    }

    #[test]
    fn test_permanent_mission_completes_once() {
        let (mut store, _) = store();
        let p1 = id("p1");

        for expected in 1..=4 {
            assert_eq!(store.increment_permanent_mission(&p1, MissionStep::default()), expected);
            assert!(!store.is_completed("p1"));
        }
        assert_eq!(store.points(), 0);

        assert_eq!(store.increment_permanent_mission(&p1, MissionStep::default()), 5);
        assert!(store.is_completed("p1"));
        assert_eq!(store.points(), 10);

        assert_eq!(store.increment_permanent_mission(&p1, MissionStep::default()), 5);
        assert_eq!(store.points(), 10);
    }

    #[test]
    fn test_permanent_mission_overshoot_clamps() {
        let (mut store, _) = store();
        let step = MissionStep { increment: 7, goal: 5, xp: 3 };

        assert_eq!(store.increment_permanent_mission(&id("p2"), step), 5);
        assert_eq!(store.points(), 3);
    }

    #[test]
    fn test_permanent_progress_never_decreases() {
        let (mut store, _) = store();
        let p = id("p9");

        store.increment_permanent_mission(&p, MissionStep { increment: 4, goal: 10, xp: 1 });
        let step = MissionStep { increment: 1, goal: 2, xp: 1 };
        let stored = store.increment_permanent_mission(&p, step);
        assert_eq!(stored, 4);
    }

    #[test]
    fn test_profile_setters() {
        let (mut store, _) = store();
        store.set_username("Robin");
        store.set_avatar(Some("file:///avatar.jpg".into()));

        assert_eq!(store.player().username, "Robin");
        assert_eq!(store.player().avatar.as_deref(), Some("file:///avatar.jpg"));
    }

    #[test]
    fn test_award_badge_skips_duplicates() {
        let (mut store, _) = store();
        assert!(!store.award_badge(Badge::began_journey()));
        assert!(store.award_badge(Badge::new("b1", "First bin", "Tapped a bin")));
        assert_eq!(store.player().badges.len(), 2);

        store.set_badges(Vec::new());
        assert!(store.player().badges.is_empty());
    }
}

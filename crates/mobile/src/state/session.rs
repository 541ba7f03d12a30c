use std::sync::Arc;

use ecotrail_core::{
    Game,
    bins::{BinProvider, MissionIdentifier},
    camera::MissionDetailScreen,
    clock::LocalClock,
    leaderboard::{LeaderboardEntry, leaderboard},
    mission::MissionBoard,
    profile::{self, ProfileView},
    progress::{Badge, ProgressStore},
    proximity::MapScreen,
    rules::{GameRules, MissionStep},
};
use tokio::sync::Mutex;
use tracing::info;

use crate::{
    logging::setup_logging,
    state::{
        SessionError,
        bridge::{
            CameraBridge, LocationBridge, NativeCamera, NativeLocation, NativePhotoLibrary,
            PhotoLibraryBridge,
        },
        map::MapSession,
        mission::{MissionBoardRecord, MissionScreenRecord},
    },
};

#[derive(Clone, Debug, uniffi::Record)]
pub struct BadgeRecord {
    pub id: String,
    pub title: String,
    pub description: String,
}

impl From<&Badge> for BadgeRecord {
    fn from(badge: &Badge) -> Self {
        Self {
            id: badge.id.to_string(),
            title: badge.title.to_string(),
            description: badge.description.to_string(),
        }
    }
}

#[derive(Clone, Debug, uniffi::Record)]
pub struct ProfileRecord {
    pub username: String,
    pub avatar: Option<String>,
    pub points: u64,
    pub level: u64,
    pub xp_into_level: u64,
    pub level_xp: u64,
    /// Fill of the XP bar, in `0.0..1.0`
    pub level_fraction: f64,
    pub level_label: String,
    pub badges: Vec<BadgeRecord>,
}

impl From<ProfileView> for ProfileRecord {
    fn from(view: ProfileView) -> Self {
        Self {
            level_fraction: view.level.fraction(),
            level_label: view.level.label(),
            level: view.level.level,
            xp_into_level: view.level.xp_into_level,
            level_xp: view.level.level_xp,
            badges: view.badges.iter().map(Into::into).collect(),
            username: view.username,
            avatar: view.avatar,
            points: view.points,
        }
    }
}

#[derive(Clone, Debug, uniffi::Record)]
pub struct LeaderboardRow {
    pub rank: u32,
    pub id: String,
    pub name: String,
    pub points: u64,
    pub avatar: Option<String>,
    pub is_local_player: bool,
}

impl From<LeaderboardEntry> for LeaderboardRow {
    fn from(entry: LeaderboardEntry) -> Self {
        Self {
            rank: u32::try_from(entry.rank).unwrap_or(u32::MAX),
            id: entry.id,
            name: entry.name,
            points: entry.points,
            avatar: entry.avatar,
            is_local_player: entry.is_local_player,
        }
    }
}

/// One running game: the bin catalog, the rules, and the only progress store.
///
/// The store lives exactly as long as the session is active. Any call after
/// [`GameSession::shutdown`] fails with [`SessionError::StoreUnavailable`].
#[derive(uniffi::Object)]
pub struct GameSession {
    rules: Arc<GameRules>,
    bins: Arc<dyn BinProvider>,
    store: Mutex<Option<ProgressStore>>,
}

impl GameSession {
    pub(crate) fn from_game(game: Game) -> Self {
        Self {
            rules: game.rules,
            bins: game.bins,
            store: Mutex::new(Some(game.progress)),
        }
    }

    pub(crate) async fn with_store<T>(
        &self,
        f: impl FnOnce(&mut ProgressStore) -> T,
    ) -> Result<T, SessionError> {
        let mut guard = self.store.lock().await;
        let store = guard.as_mut().ok_or(SessionError::StoreUnavailable)?;
        Ok(f(store))
    }
}

#[uniffi::export]
impl GameSession {
    /// Start a game from the bundled bin GeoJSON and, optionally, a JSON
    /// object overriding some of the default rules.
    #[uniffi::constructor]
    pub fn new(
        dataset_geojson: String,
        rules_json: Option<String>,
    ) -> Result<Arc<Self>, SessionError> {
        setup_logging();

        let rules = match rules_json {
            Some(raw) => GameRules::from_json(&raw)?,
            None => GameRules::default(),
        };
        let game = Game::from_dataset(rules, &dataset_geojson, Arc::new(LocalClock));

        Ok(Arc::new(Self::from_game(game)))
    }

    pub fn bin_count(&self) -> u64 {
        self.bins.len() as u64
    }

    pub async fn is_active(&self) -> bool {
        self.store.lock().await.is_some()
    }

    pub async fn add_xp(&self, amount: u32) -> Result<(), SessionError> {
        self.with_store(|store| store.add_xp(amount)).await
    }

    pub async fn add_visit_xp(&self, id: String, xp: u32) -> Result<bool, SessionError> {
        let id = MissionIdentifier::new(id);
        self.with_store(|store| store.add_visit_xp(&id, xp)).await
    }

    pub async fn complete_mission(&self, id: String, xp: u32) -> Result<bool, SessionError> {
        let id = MissionIdentifier::new(id);
        self.with_store(|store| store.complete_mission(&id, xp)).await
    }

    /// Advance a permanent mission. `None` arguments fall back to the rules'
    /// permanent step.
    pub async fn increment_permanent_mission(
        &self,
        id: String,
        increment: Option<u32>,
        goal: Option<u32>,
        xp: Option<u32>,
    ) -> Result<u32, SessionError> {
        let id = MissionIdentifier::new(id);
        let defaults = self.rules.permanent_step;
        let step = MissionStep {
            increment: increment.unwrap_or(defaults.increment),
            goal: goal.unwrap_or(defaults.goal),
            xp: xp.unwrap_or(defaults.xp),
        };
        self.with_store(|store| store.increment_permanent_mission(&id, step))
            .await
    }

    pub async fn set_username(&self, username: String) -> Result<(), SessionError> {
        self.with_store(|store| store.set_username(username)).await
    }

    pub async fn set_avatar(&self, avatar: Option<String>) -> Result<(), SessionError> {
        self.with_store(|store| store.set_avatar(avatar)).await
    }

    pub async fn award_badge(
        &self,
        id: String,
        title: String,
        description: String,
    ) -> Result<bool, SessionError> {
        let badge = Badge::new(&id, &title, &description);
        self.with_store(|store| store.award_badge(badge)).await
    }

    /// Open the photo library for a square avatar. Returns whether it changed.
    pub async fn choose_avatar(
        &self,
        picker: Arc<dyn PhotoLibraryBridge>,
    ) -> Result<bool, SessionError> {
        let mut guard = self.store.lock().await;
        let store = guard.as_mut().ok_or(SessionError::StoreUnavailable)?;
        Ok(profile::choose_avatar(&NativePhotoLibrary(picker), store).await)
    }

    pub async fn profile(&self) -> Result<ProfileRecord, SessionError> {
        self.with_store(|store| ProfileView::from_store(store, &self.rules).into())
            .await
    }

    pub async fn mission_board(&self) -> Result<MissionBoardRecord, SessionError> {
        self.with_store(|store| MissionBoard::from_store(store).into())
            .await
    }

    pub async fn leaderboard(&self) -> Result<Vec<LeaderboardRow>, SessionError> {
        self.with_store(|store| leaderboard(store).into_iter().map(Into::into).collect())
            .await
    }

    /// Mount the map tab. Location updates start if permission is granted and
    /// stop when the returned session is closed or dropped.
    pub async fn open_map(
        self: Arc<Self>,
        location: Arc<dyn LocationBridge>,
    ) -> Result<Arc<MapSession>, SessionError> {
        if !self.is_active().await {
            return Err(SessionError::StoreUnavailable);
        }

        let screen = MapScreen::mount(
            Arc::clone(&self.bins),
            Arc::clone(&self.rules),
            &NativeLocation(location),
        )
        .await;

        Ok(Arc::new(MapSession::new(self, screen)))
    }

    /// Mount the mission screen for `mission_id`, asking for camera access.
    pub async fn open_mission(
        &self,
        mission_id: String,
        camera: Arc<dyn CameraBridge>,
    ) -> MissionScreenRecord {
        let mission_id = MissionIdentifier::new(mission_id);
        let screen = MissionDetailScreen::mount(mission_id, &NativeCamera(camera)).await;
        MissionScreenRecord::from(&screen)
    }

    /// End the session. All progress is dropped.
    pub async fn shutdown(&self) {
        if let Some(store) = self.store.lock().await.take() {
            info!(points = store.points(), "game session ended");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::mission::CameraStatus;

    const DATASET: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            { "type": "Feature", "properties": { "id": "bin-0" },
              "geometry": { "type": "Point", "coordinates": [0.0, 0.0003] } },
            { "type": "Feature", "properties": { "id": "bin-1" },
              "geometry": { "type": "Point", "coordinates": [0.0, 0.004] } }
        ]
    }"#;

    struct FakeCamera(bool);

    impl CameraBridge for FakeCamera {
        fn request_camera_permission(&self) -> bool {
            self.0
        }
    }

    struct FakePicker(Option<String>);

    impl PhotoLibraryBridge for FakePicker {
        fn pick_image(
            &self,
            allows_editing: bool,
            aspect_width: u32,
            aspect_height: u32,
            _quality: f32,
        ) -> Option<String> {
            assert!(allows_editing);
            assert_eq!((aspect_width, aspect_height), (1, 1));
            self.0.clone()
        }
    }

    #[tokio::test]
    async fn test_new_session() {
        let session = GameSession::new(DATASET.to_owned(), None).unwrap();
        assert_eq!(session.bin_count(), 2);
        assert!(session.is_active().await);

        let profile = session.profile().await.unwrap();
        assert_eq!(profile.username, "Player");
        assert_eq!(profile.level, 1);
        assert_eq!(profile.level_label, "0/50 XP to next level");
        assert_eq!(profile.badges.len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_inputs() {
        let session = GameSession::new("not json".to_owned(), None).unwrap();
        assert_eq!(session.bin_count(), 0);

        let rules = r#"{ "interaction_radius_m": 900.0 }"#.to_owned();
        assert!(matches!(
            GameSession::new(DATASET.to_owned(), Some(rules)),
            Err(SessionError::Game(_))
        ));
    }

    #[tokio::test]
    async fn test_progress_through_session() {
        let session = GameSession::new(DATASET.to_owned(), None).unwrap();

        assert!(session.add_visit_xp("bin-0".into(), 10).await.unwrap());
        assert!(!session.add_visit_xp("bin-0".into(), 10).await.unwrap());
        for _ in 0..5 {
            session
                .increment_permanent_mission("p1".into(), None, None, None)
                .await
                .unwrap();
        }
        session.set_username("Robin".into()).await.unwrap();

        let profile = session.profile().await.unwrap();
        assert_eq!(profile.points, 30);
        assert_eq!(profile.username, "Robin");

        let board = session.mission_board().await.unwrap();
        assert!(board.daily[0].completed_today);
        assert_eq!(board.permanent[0].progress_label, "5/5");
        assert!(board.permanent[0].completed);

        let rows = session.leaderboard().await.unwrap();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[4].name, "Robin");
        assert_eq!(rows[4].rank, 5);
    }

    #[tokio::test]
    async fn test_choose_avatar() {
        let session = GameSession::new(DATASET.to_owned(), None).unwrap();

        let picked = Arc::new(FakePicker(Some("file:///me.jpg".into())));
        assert!(session.choose_avatar(picked).await.unwrap());
        assert!(!session.choose_avatar(Arc::new(FakePicker(None))).await.unwrap());

        let profile = session.profile().await.unwrap();
        assert_eq!(profile.avatar.as_deref(), Some("file:///me.jpg"));
    }

    #[tokio::test]
    async fn test_open_mission() {
        let session = GameSession::new(DATASET.to_owned(), None).unwrap();

        let screen = session.open_mission("bin-0".into(), Arc::new(FakeCamera(true))).await;
        assert_eq!(screen.camera, CameraStatus::Viewfinder);
        assert_eq!(screen.overlay.as_deref(), Some("Mission: bin-0"));

        let screen = session.open_mission("bin-0".into(), Arc::new(FakeCamera(false))).await;
        assert_eq!(screen.camera, CameraStatus::Denied);
        assert_eq!(screen.message.as_deref(), Some("No access to camera"));
    }

    #[tokio::test]
    async fn test_store_unavailable_after_shutdown() {
        let session = GameSession::new(DATASET.to_owned(), None).unwrap();
        session.add_xp(5).await.unwrap();
        session.shutdown().await;

        assert!(!session.is_active().await);
        assert!(matches!(session.add_xp(5).await, Err(SessionError::StoreUnavailable)));
        assert!(matches!(session.profile().await, Err(SessionError::StoreUnavailable)));
        assert!(matches!(
            session.choose_avatar(Arc::new(FakePicker(None))).await,
            Err(SessionError::StoreUnavailable)
        ));
    }
}

use std::sync::Arc;

use ecotrail_core::{
    bins::BinIdentifier,
    proximity::{
        BinMarker, LocationFix, MapCamera, MapEvent, MapScreen, Navigation, TapOutcome,
        markers_geojson,
    },
};
use tokio::sync::Mutex;

use crate::state::{SessionError, session::GameSession};

#[derive(Clone, Copy, Debug, PartialEq, uniffi::Record)]
pub struct CameraRecord {
    pub latitude: f64,
    pub longitude: f64,
    pub heading: f64,
    pub pitch: f64,
    pub altitude_m: f64,
    pub zoom: f64,
}

impl From<MapCamera> for CameraRecord {
    fn from(camera: MapCamera) -> Self {
        Self {
            latitude: camera.center.latitude,
            longitude: camera.center.longitude,
            heading: camera.heading,
            pitch: camera.pitch,
            altitude_m: camera.altitude_m,
            zoom: camera.zoom,
        }
    }
}

/// The ring drawn around the player; taps outside it are refused
#[derive(Clone, Copy, Debug, PartialEq, uniffi::Record)]
pub struct CircleRecord {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_m: f64,
}

#[derive(Clone, Debug, uniffi::Record)]
pub struct MapStatusRecord {
    /// `awaiting-permission`, `awaiting-fix`, `active`, `denied` or `failed`
    pub phase: String,
    /// Shown in place of the map
    pub message: Option<String>,
    pub camera: Option<CameraRecord>,
    /// Absent until the first location fix
    pub interaction_circle: Option<CircleRecord>,
}

#[derive(Clone, Debug, uniffi::Record)]
pub struct MarkerRecord {
    pub bin_id: String,
    pub title: String,
    pub latitude: f64,
    pub longitude: f64,
    pub distance_m: f64,
    pub reachable: bool,
    pub completed: bool,
    /// `red`, `yellow` or `green`
    pub color: String,
    pub description: String,
}

impl From<&BinMarker> for MarkerRecord {
    fn from(marker: &BinMarker) -> Self {
        Self {
            bin_id: marker.bin.id.to_string(),
            title: marker.bin.title.to_string(),
            latitude: marker.bin.latitude(),
            longitude: marker.bin.longitude(),
            distance_m: marker.distance_m,
            reachable: marker.reachable,
            completed: marker.completed,
            color: marker.color.to_string(),
            description: marker.description().to_owned(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, uniffi::Enum)]
pub enum TapResult {
    /// Navigate to `path` to show the mission screen
    Started {
        mission_id: String,
        path: String,
        xp_granted: bool,
    },
    TooFar {
        distance_m: f64,
    },
}

impl From<TapOutcome> for TapResult {
    fn from(outcome: TapOutcome) -> Self {
        match outcome {
            TapOutcome::Started { xp_granted, navigation } => {
                let path = navigation.path();
                let Navigation::MissionDetail { mission_id } = navigation;
                Self::Started {
                    mission_id: mission_id.to_string(),
                    path,
                    xp_granted,
                }
            }
            TapOutcome::TooFar { distance_m } => Self::TooFar { distance_m },
        }
    }
}

/// The map tab while it is on screen. Native location and heading callbacks
/// are forwarded here; every call returns the camera move to apply, if any.
#[derive(uniffi::Object)]
pub struct MapSession {
    game: Arc<GameSession>,
    screen: Mutex<Option<MapScreen>>,
}

impl MapSession {
    pub(crate) fn new(game: Arc<GameSession>, screen: MapScreen) -> Self {
        Self {
            game,
            screen: Mutex::new(Some(screen)),
        }
    }

    async fn push(&self, event: MapEvent) -> Result<Option<CameraRecord>, SessionError> {
        let mut guard = self.screen.lock().await;
        let screen = guard.as_mut().ok_or(SessionError::MapClosed)?;

        screen.sender().send(event).map_err(|_| SessionError::MapClosed)?;
        Ok(screen.process_pending().map(Into::into))
    }
}

#[uniffi::export]
impl MapSession {
    pub async fn push_location(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Option<CameraRecord>, SessionError> {
        self.push(MapEvent::Location(LocationFix::new(latitude, longitude)))
            .await
    }

    pub async fn push_heading(&self, degrees: f64) -> Result<Option<CameraRecord>, SessionError> {
        self.push(MapEvent::Heading { degrees }).await
    }

    pub async fn status(&self) -> Result<MapStatusRecord, SessionError> {
        let guard = self.screen.lock().await;
        let screen = guard.as_ref().ok_or(SessionError::MapClosed)?;

        Ok(MapStatusRecord {
            phase: screen.state().phase().to_string(),
            message: screen.state().message().map(str::to_owned),
            camera: screen.camera().map(Into::into),
            interaction_circle: screen.interaction_circle().map(|(center, radius_m)| {
                CircleRecord {
                    latitude: center.latitude,
                    longitude: center.longitude,
                    radius_m,
                }
            }),
        })
    }

    /// Bins within the nearby radius, empty until the first location fix
    pub async fn markers(&self) -> Result<Vec<MarkerRecord>, SessionError> {
        let guard = self.screen.lock().await;
        let screen = guard.as_ref().ok_or(SessionError::MapClosed)?;

        self.game
            .with_store(|store| screen.markers(store).iter().map(Into::into).collect())
            .await
    }

    /// The same markers as a GeoJSON feature collection
    pub async fn markers_geojson(&self) -> Result<String, SessionError> {
        let guard = self.screen.lock().await;
        let screen = guard.as_ref().ok_or(SessionError::MapClosed)?;

        self.game
            .with_store(|store| markers_geojson(&screen.markers(store)))
            .await
    }

    pub async fn tap(&self, bin_id: String) -> Result<TapResult, SessionError> {
        let guard = self.screen.lock().await;
        let screen = guard.as_ref().ok_or(SessionError::MapClosed)?;
        let bin_id = BinIdentifier::new(bin_id);

        let outcome = self.game.with_store(|store| screen.tap(&bin_id, store)).await??;
        Ok(outcome.into())
    }

    /// Leave the map, stopping native location and heading updates.
    pub async fn close(&self) {
        if let Some(screen) = self.screen.lock().await.take() {
            screen.unmount();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::state::bridge::LocationBridge;

    const DATASET: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            { "type": "Feature", "properties": { "id": "bin-0" },
              "geometry": { "type": "Point", "coordinates": [0.0, 0.0003] } },
            { "type": "Feature", "properties": { "id": "bin-1" },
              "geometry": { "type": "Point", "coordinates": [0.0, 0.004] } },
            { "type": "Feature", "properties": { "id": "bin-2" },
              "geometry": { "type": "Point", "coordinates": [0.0, 0.01] } }
        ]
    }"#;

    #[derive(Default)]
    struct FakeLocation {
        denied: bool,
        started: AtomicUsize,
        stopped: AtomicUsize,
    }

    impl LocationBridge for FakeLocation {
        fn request_foreground_permission(&self) -> bool {
            !self.denied
        }

        fn start_position_updates(&self, distance_interval_m: f64) {
            assert_eq!(distance_interval_m, 15.0);
            self.started.fetch_add(1, Ordering::SeqCst);
        }

        fn stop_position_updates(&self) {
            self.stopped.fetch_add(1, Ordering::SeqCst);
        }

        fn start_heading_updates(&self) {
            self.started.fetch_add(1, Ordering::SeqCst);
        }

        fn stop_heading_updates(&self) {
            self.stopped.fetch_add(1, Ordering::SeqCst);
        }
    }

    async fn open(location: Arc<FakeLocation>) -> (Arc<GameSession>, Arc<MapSession>) {
        let game = GameSession::new(DATASET.to_owned(), None).unwrap();
        let map = Arc::clone(&game).open_map(location).await.unwrap();
        (game, map)
    }

    #[tokio::test]
    async fn test_denied_map() {
        let location = Arc::new(FakeLocation {
            denied: true,
            ..Default::default()
        });
        let (_game, map) = open(location.clone()).await;

        let status = map.status().await.unwrap();
        assert_eq!(status.phase, "denied");
        assert_eq!(status.message.as_deref(), Some("Permission to access location was denied"));
        assert_eq!(location.started.load(Ordering::SeqCst), 0);

        assert_eq!(map.push_location(0.0, 0.0).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_updates_move_camera() {
        let location = Arc::new(FakeLocation::default());
        let (_game, map) = open(location.clone()).await;
        assert_eq!(location.started.load(Ordering::SeqCst), 2);
        let status = map.status().await.unwrap();
        assert_eq!(status.phase, "awaiting-fix");
        assert_eq!(status.interaction_circle, None);
        assert!(map.markers().await.unwrap().is_empty());

        let camera = map.push_location(0.0, 0.0).await.unwrap().unwrap();
        assert_eq!((camera.latitude, camera.longitude), (0.0, 0.0));
        assert_eq!(camera.zoom, 18.0);

        let camera = map.push_heading(90.0).await.unwrap().unwrap();
        assert_eq!(camera.heading, 90.0);

        let circle = map.status().await.unwrap().interaction_circle.unwrap();
        assert_eq!((circle.latitude, circle.longitude), (0.0, 0.0));
        assert_eq!(circle.radius_m, 50.0);

        let markers = map.markers().await.unwrap();
        let colors: Vec<&str> = markers.iter().map(|m| m.color.as_str()).collect();
        assert_eq!(colors, vec!["yellow", "red"]);
        assert!(map.markers_geojson().await.unwrap().contains("\"bin-0\""));
    }

    #[tokio::test]
    async fn test_tap_through_session() {
        let location = Arc::new(FakeLocation::default());
        let (game, map) = open(location).await;
        map.push_location(0.0, 0.0).await.unwrap();

        let result = map.tap("bin-0".into()).await.unwrap();
        assert_eq!(
            result,
            TapResult::Started {
                mission_id: "bin-0".into(),
                path: "/game/bin-0".into(),
                xp_granted: true,
            }
        );
        assert_eq!(game.profile().await.unwrap().points, 20);
        // Visit credit alone leaves the bin open
        assert_eq!(map.markers().await.unwrap()[0].color, "yellow");

        assert!(matches!(map.tap("bin-1".into()).await.unwrap(), TapResult::TooFar { .. }));
        assert!(matches!(map.tap("bin-9".into()).await, Err(SessionError::Game(_))));
    }

    #[tokio::test]
    async fn test_close_stops_updates() {
        let location = Arc::new(FakeLocation::default());
        let (game, map) = open(location.clone()).await;

        map.close().await;
        assert_eq!(location.stopped.load(Ordering::SeqCst), 2);
        assert!(matches!(map.status().await, Err(SessionError::MapClosed)));
        assert!(matches!(map.push_heading(1.0).await, Err(SessionError::MapClosed)));

        game.shutdown().await;
        assert!(matches!(
            Arc::clone(&game).open_map(location).await,
            Err(SessionError::StoreUnavailable)
        ));
    }

    #[tokio::test]
    async fn test_tap_after_shutdown_fails_fast() {
        let (game, map) = open(Arc::new(FakeLocation::default())).await;
        map.push_location(0.0, 0.0).await.unwrap();
        game.shutdown().await;

        assert!(matches!(map.tap("bin-0".into()).await, Err(SessionError::StoreUnavailable)));
        assert!(matches!(map.markers().await, Err(SessionError::StoreUnavailable)));
    }
}

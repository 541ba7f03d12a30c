use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use ecotrail_bins::{BinIdentifier, BinProvider, MissionIdentifier, haversine_distance};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::{
    error::{GameError, Result},
    mission::{COMPLETE_FIVE_MISSIONS, VISIT_FIVE_BINS},
    progress::ProgressStore,
    proximity::{
        device::{
            EventSender, LocationFix, LocationService, MapEvent, PermissionStatus, Subscription,
        },
        marker::{BinMarker, nearby_markers},
        state::ProximityState,
    },
    rules::GameRules,
};

/// Where the map view should look after an update
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapCamera {
    pub center: LocationFix,
    pub heading: f64,
    pub pitch: f64,
    pub altitude_m: f64,
    pub zoom: f64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Navigation {
    MissionDetail { mission_id: MissionIdentifier },
}

impl Navigation {
    /// Router path understood by the native shell
    pub fn path(&self) -> String {
        match self {
            Self::MissionDetail { mission_id } => format!("/game/{mission_id}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum TapOutcome {
    /// The mission started; `xp_granted` is false if the bin was already
    /// credited today.
    Started {
        xp_granted: bool,
        navigation: Navigation,
    },
    /// The bin is outside the interaction radius; nothing happened
    TooFar { distance_m: f64 },
}

/// The map tab while it is on screen.
///
/// Location and heading subscriptions live exactly as long as the screen:
/// they are released on [`MapScreen::unmount`], on drop, and when mounting
/// fails part-way.
pub struct MapScreen {
    bins: Arc<dyn BinProvider>,
    rules: Arc<GameRules>,
    state: ProximityState,
    heading: f64,
    last_heading_at: Option<Instant>,
    events_tx: EventSender,
    events_rx: mpsc::UnboundedReceiver<MapEvent>,
    subscriptions: Vec<Subscription>,
}

impl MapScreen {
    pub fn new(bins: Arc<dyn BinProvider>, rules: Arc<GameRules>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        Self {
            bins,
            rules,
            state: ProximityState::AwaitingPermission,
            heading: 0.0,
            last_heading_at: None,
            events_tx,
            events_rx,
            subscriptions: Vec::new(),
        }
    }

    /// Ask for location access and, if granted, start position and heading
    /// updates.
    pub async fn mount(
        bins: Arc<dyn BinProvider>,
        rules: Arc<GameRules>,
        service: &dyn LocationService,
    ) -> Self {
        let mut screen = Self::new(bins, rules);

        let status = service.request_foreground_permission().await;
        screen.on_permission(status);
        if status == PermissionStatus::Denied {
            return screen;
        }

        if let Err(error) = screen.subscribe(service).await {
            screen.fail(error);
        }

        screen
    }

    async fn subscribe(&mut self, service: &dyn LocationService) -> Result<()> {
        let position = service
            .watch_position(self.rules.position_interval_m, self.events_tx.clone())
            .await?;
        self.subscriptions.push(position);

        let heading = service.watch_heading(self.events_tx.clone()).await?;
        self.subscriptions.push(heading);

        Ok(())
    }

    fn fail(&mut self, error: GameError) {
        warn!("map updates unavailable: {error}");
        self.subscriptions.clear();
        self.state = ProximityState::Failed {
            message: error.to_string(),
        };
    }

    pub fn state(&self) -> &ProximityState {
        &self.state
    }

    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn active_subscriptions(&self) -> usize {
        self.subscriptions.len()
    }

    /// Queue for device updates; events are applied by
    /// [`process_pending`](Self::process_pending) or [`next_camera`](Self::next_camera).
    pub fn sender(&self) -> EventSender {
        self.events_tx.clone()
    }

    /// Keep a subscription started outside of [`MapScreen::mount`] alive for
    /// as long as the screen.
    pub fn adopt(&mut self, subscription: Subscription) {
        if self.state.is_terminal() {
            return;
        }
        self.subscriptions.push(subscription);
    }

    pub fn on_permission(&mut self, status: PermissionStatus) {
        match self.state.on_permission(status) {
            Some(next) => {
                info!("location permission {status}");
                self.state = next;
            }
            None => debug!("ignoring permission result in {}", self.state.phase()),
        }
    }

    /// Apply one device update received at `at`.
    pub fn apply(&mut self, event: MapEvent, at: Instant) -> Option<MapCamera> {
        match event {
            MapEvent::Location(fix) => {
                let Some(next) = self.state.on_fix(fix) else {
                    debug!("ignoring location in {}", self.state.phase());
                    return None;
                };
                if !matches!(self.state, ProximityState::Active { .. }) {
                    info!("first location fix");
                }
                self.state = next;
                self.camera()
            }
            MapEvent::Heading { degrees } => {
                if !self.heading_due(at) {
                    return None;
                }
                self.last_heading_at = Some(at);
                self.heading = degrees;
                self.camera()
            }
        }
    }

    fn heading_due(&self, at: Instant) -> bool {
        let throttle: Duration = self.rules.heading_throttle();
        match self.last_heading_at {
            Some(last) => at.duration_since(last) > throttle,
            None => true,
        }
    }

    /// Apply everything queued so far, returning the latest camera move.
    pub fn process_pending(&mut self) -> Option<MapCamera> {
        let mut camera = None;
        while let Ok(event) = self.events_rx.try_recv() {
            if let Some(next) = self.apply(event, Instant::now()) {
                camera = Some(next);
            }
        }
        camera
    }

    /// Wait for the next update that moves the camera.
    pub async fn next_camera(&mut self) -> Option<MapCamera> {
        loop {
            let event = self.events_rx.recv().await?;
            if let Some(camera) = self.apply(event, Instant::now()) {
                return Some(camera);
            }
        }
    }

    pub fn camera(&self) -> Option<MapCamera> {
        self.state.fix().map(|center| MapCamera {
            center,
            heading: self.heading,
            pitch: 0.0,
            altitude_m: self.rules.camera_altitude_m,
            zoom: self.rules.camera_zoom,
        })
    }

    /// The circle around the player within which bins can be tapped
    pub fn interaction_circle(&self) -> Option<(LocationFix, f64)> {
        self.state
            .fix()
            .map(|fix| (fix, self.rules.interaction_radius_m))
    }

    /// Bins to draw around the current fix; empty until the screen is active.
    pub fn markers(&self, store: &ProgressStore) -> Vec<BinMarker> {
        match self.state.fix() {
            Some(fix) => nearby_markers(&*self.bins, fix, &self.rules, store),
            None => Vec::new(),
        }
    }

    /// Handle a tap on the marker for `bin_id`.
    ///
    /// A reachable bin pays its daily visit XP, advances the "visit bins" and
    /// "complete missions" permanent missions, and opens the mission screen.
    pub fn tap(&self, bin_id: &BinIdentifier, store: &mut ProgressStore) -> Result<TapOutcome> {
        let fix = self
            .state
            .fix()
            .ok_or_else(|| GameError::MapInactive(self.state.phase()))?;
        let bin = self
            .bins
            .get_bin(bin_id)
            .ok_or_else(|| GameError::UnknownBin(bin_id.clone()))?;

        let distance_m = haversine_distance(fix.point(), bin.location);
        if distance_m > self.rules.interaction_radius_m {
            debug!(%bin_id, distance_m, "tap out of reach");
            return Ok(TapOutcome::TooFar { distance_m });
        }

        let mission_id = MissionIdentifier::from(&bin.id);
        let xp_granted = store.add_visit_xp(&mission_id, self.rules.visit_xp);
        let step = self.rules.permanent_step;
        store.increment_permanent_mission(&MissionIdentifier::new(VISIT_FIVE_BINS), step);
        store.increment_permanent_mission(&MissionIdentifier::new(COMPLETE_FIVE_MISSIONS), step);

        info!(%bin_id, xp_granted, points = store.points(), "bin tapped");
        Ok(TapOutcome::Started {
            xp_granted,
            navigation: Navigation::MissionDetail { mission_id },
        })
    }

    /// Leave the screen, stopping all device updates.
    pub fn unmount(mut self) {
        info!("map unmounted, releasing {} subscriptions", self.subscriptions.len());
        self.subscriptions.clear();
    }
}

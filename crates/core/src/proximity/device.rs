//! Device location capabilities, as seen by the map screen.
//!
//! Platform code implements [`LocationService`]; updates are pushed into the
//! [`EventSender`] handed over when a watch starts, and stop once the returned
//! [`Subscription`] is dropped.

use std::fmt;

use futures_core::future::BoxFuture;
use strum::Display;
use tokio::sync::mpsc;
use tracing::debug;

use crate::error::Result;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

impl From<bool> for PermissionStatus {
    fn from(granted: bool) -> Self {
        if granted { Self::Granted } else { Self::Denied }
    }
}

/// A position reported by the device, in degrees
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocationFix {
    pub latitude: f64,
    pub longitude: f64,
}

impl LocationFix {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    pub fn point(&self) -> geo::Point {
        geo::Point::new(self.longitude, self.latitude)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MapEvent {
    Location(LocationFix),
    /// Magnetic heading in degrees
    Heading { degrees: f64 },
}

pub type EventSender = mpsc::UnboundedSender<MapEvent>;

pub trait LocationService: Send + Sync {
    /// Ask for foreground location access
    fn request_foreground_permission(&self) -> BoxFuture<'_, PermissionStatus>;

    /// Start position updates, reported only after moving `distance_interval_m`
    fn watch_position(
        &self,
        distance_interval_m: f64,
        events: EventSender,
    ) -> BoxFuture<'_, Result<Subscription>>;

    /// Start compass heading updates
    fn watch_heading(&self, events: EventSender) -> BoxFuture<'_, Result<Subscription>>;
}

/// A running watch. Dropping it stops the updates.
pub struct Subscription {
    kind: &'static str,
    release: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    pub fn new(kind: &'static str, release: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            kind,
            release: Some(Box::new(release)),
        }
    }

    /// Stop the updates now
    pub fn remove(self) {
        drop(self)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            debug!("removing {} subscription", self.kind);
            release();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("kind", &self.kind).finish()
    }
}

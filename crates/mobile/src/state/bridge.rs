//! Device capabilities implemented in Kotlin/Swift, adapted to the core traits.

use std::sync::Arc;

use ecotrail_core::{
    Result,
    camera::CameraService,
    profile::{ImagePicker, PickerOptions},
    proximity::{EventSender, LocationService, PermissionStatus, Subscription},
};
use futures_core::future::BoxFuture;
use futures_util::{FutureExt, future};

/// Location access on the native side.
///
/// Once started, updates are reported back through
/// [`MapSession::push_location`](crate::state::map::MapSession::push_location) and
/// [`MapSession::push_heading`](crate::state::map::MapSession::push_heading).
#[uniffi::export(with_foreign)]
pub trait LocationBridge: Send + Sync {
    fn request_foreground_permission(&self) -> bool;
    fn start_position_updates(&self, distance_interval_m: f64);
    fn stop_position_updates(&self);
    fn start_heading_updates(&self);
    fn stop_heading_updates(&self);
}

#[uniffi::export(with_foreign)]
pub trait CameraBridge: Send + Sync {
    fn request_camera_permission(&self) -> bool;
}

#[uniffi::export(with_foreign)]
pub trait PhotoLibraryBridge: Send + Sync {
    /// Returns the URI of the picked image, or nothing if the user cancelled
    fn pick_image(
        &self,
        allows_editing: bool,
        aspect_width: u32,
        aspect_height: u32,
        quality: f32,
    ) -> Option<String>;
}

pub(crate) struct NativeLocation(pub Arc<dyn LocationBridge>);

impl LocationService for NativeLocation {
    fn request_foreground_permission(&self) -> BoxFuture<'_, PermissionStatus> {
        future::ready(PermissionStatus::from(self.0.request_foreground_permission())).boxed()
    }

    // The native side reports through the map session, which feeds the same
    // queue `_events` belongs to.
    fn watch_position(
        &self,
        distance_interval_m: f64,
        _events: EventSender,
    ) -> BoxFuture<'_, Result<Subscription>> {
        self.0.start_position_updates(distance_interval_m);
        let bridge = Arc::clone(&self.0);
        let subscription = Subscription::new("position", move || bridge.stop_position_updates());
        future::ready(Ok(subscription)).boxed()
    }

    fn watch_heading(&self, _events: EventSender) -> BoxFuture<'_, Result<Subscription>> {
        self.0.start_heading_updates();
        let bridge = Arc::clone(&self.0);
        let subscription = Subscription::new("heading", move || bridge.stop_heading_updates());
        future::ready(Ok(subscription)).boxed()
    }
}

pub(crate) struct NativeCamera(pub Arc<dyn CameraBridge>);

impl CameraService for NativeCamera {
    fn request_camera_permission(&self) -> BoxFuture<'_, PermissionStatus> {
        future::ready(PermissionStatus::from(self.0.request_camera_permission())).boxed()
    }
}

pub(crate) struct NativePhotoLibrary(pub Arc<dyn PhotoLibraryBridge>);

impl ImagePicker for NativePhotoLibrary {
    fn pick_image(&self, options: PickerOptions) -> BoxFuture<'_, Option<String>> {
        let (width, height) = options.aspect;
        let picked = self
            .0
            .pick_image(options.allows_editing, width, height, options.quality);
        future::ready(picked).boxed()
    }
}

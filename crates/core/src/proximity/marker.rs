use std::sync::Arc;

use ecotrail_bins::{Bin, BinProvider, haversine_distance};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, feature::Id};
use serde_json::json;
use strum::{AsRefStr, Display};

use crate::{progress::ProgressStore, proximity::device::LocationFix, rules::GameRules};

pub const REACHABLE_DESCRIPTION: &str = "Tap to start mission!";
pub const UNREACHABLE_DESCRIPTION: &str = "Walk closer to activate.";

/// Pin color of a bin on the map
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum MarkerColor {
    /// Outside the interaction radius
    Red,
    /// Reachable, not done yet
    Yellow,
    /// Reachable and already done
    Green,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BinMarker {
    pub bin: Arc<Bin>,
    pub distance_m: f64,
    pub reachable: bool,
    pub completed: bool,
    pub color: MarkerColor,
}

impl BinMarker {
    pub fn classify(bin: Arc<Bin>, distance_m: f64, completed: bool, rules: &GameRules) -> Self {
        let reachable = distance_m <= rules.interaction_radius_m;
        let color = match (reachable, completed) {
            (false, _) => MarkerColor::Red,
            (true, false) => MarkerColor::Yellow,
            (true, true) => MarkerColor::Green,
        };

        Self {
            bin,
            distance_m,
            reachable,
            completed,
            color,
        }
    }

    pub fn description(&self) -> &'static str {
        if self.reachable {
            REACHABLE_DESCRIPTION
        } else {
            UNREACHABLE_DESCRIPTION
        }
    }
}

/// A bin counts as done once its mission is in the completed set. A daily
/// visit credit alone leaves it open.
pub fn bin_completed(store: &ProgressStore, bin: &Bin) -> bool {
    store.is_completed(bin.id.as_str())
}

/// Markers for every bin within the nearby radius of `fix`, in dataset order.
pub fn nearby_markers(
    bins: &dyn BinProvider,
    fix: LocationFix,
    rules: &GameRules,
    store: &ProgressStore,
) -> Vec<BinMarker> {
    let player = fix.point();

    bins.bins_near(player, rules.nearby_radius_m)
        .into_iter()
        .map(|bin| {
            let distance = haversine_distance(player, bin.location);
            let completed = bin_completed(store, &bin);
            BinMarker::classify(bin, distance, completed, rules)
        })
        .collect()
}

/// Render markers as a GeoJSON feature collection for the native map source.
pub fn markers_geojson(markers: &[BinMarker]) -> String {
    let features = markers
        .iter()
        .map(|marker| {
            let mut properties = JsonObject::new();
            properties.insert("title".into(), json!(&*marker.bin.title));
            properties.insert("description".into(), json!(marker.description()));
            properties.insert("color".into(), json!(marker.color.as_ref()));
            properties.insert("reachable".into(), json!(marker.reachable));
            properties.insert("distance_m".into(), json!(marker.distance_m));

            Feature {
                bbox: None,
                geometry: Some(Geometry::new(geojson::Value::Point(vec![
                    marker.bin.longitude(),
                    marker.bin.latitude(),
                ]))),
                id: Some(Id::String(marker.bin.id.to_string())),
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
    .to_string()
}

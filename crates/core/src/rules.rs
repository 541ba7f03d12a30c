//! Tunable game rules.
//!
//! Defaults match the shipped game; the native shell may override any field
//! with a JSON document, e.g. `{"interaction_radius_m": 75}`.

use std::time::Duration;

use serde::Deserialize;

use crate::error::{GameError, Result};

/// How one step of a permanent mission is counted
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MissionStep {
    pub increment: u32,
    pub goal: u32,
    pub xp: u32,
}

impl Default for MissionStep {
    fn default() -> Self {
        Self {
            increment: 1,
            goal: 5,
            xp: 10,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameRules {
    /// Bins within this distance of the player can be tapped
    pub interaction_radius_m: f64,
    /// Bins within this distance of the player are drawn at all
    pub nearby_radius_m: f64,
    /// XP for the first tap of a bin on a given day
    pub visit_xp: u32,
    /// XP needed per level
    pub level_xp: u64,
    pub permanent_step: MissionStep,
    /// Minimum movement before the OS reports a new position
    pub position_interval_m: f64,
    /// Heading updates arriving faster than this are dropped
    pub heading_throttle_ms: u64,
    pub camera_altitude_m: f64,
    pub camera_zoom: f64,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            interaction_radius_m: 50.0,
            nearby_radius_m: 500.0,
            visit_xp: 10,
            level_xp: 50,
            permanent_step: MissionStep::default(),
            position_interval_m: 15.0,
            heading_throttle_ms: 50,
            camera_altitude_m: 1000.0,
            camera_zoom: 18.0,
        }
    }
}

impl GameRules {
    pub fn from_json(raw: &str) -> Result<Self> {
        let rules: Self = serde_json::from_str(raw)?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn validate(&self) -> Result<()> {
        let radius_ok = |r: f64| r.is_finite() && r >= 0.0;

        if !radius_ok(self.interaction_radius_m) || !radius_ok(self.nearby_radius_m) {
            return Err(GameError::InvalidRules("radii must be finite and non-negative".into()));
        }
        if self.interaction_radius_m > self.nearby_radius_m {
            return Err(GameError::InvalidRules(format!(
                "interaction radius {}m exceeds nearby radius {}m",
                self.interaction_radius_m, self.nearby_radius_m
            )));
        }
        if self.level_xp == 0 {
            return Err(GameError::InvalidRules("level_xp must be positive".into()));
        }
        if self.permanent_step.goal == 0 {
            return Err(GameError::InvalidRules("permanent mission goal must be positive".into()));
        }
        Ok(())
    }

    pub fn heading_throttle(&self) -> Duration {
        Duration::from_millis(self.heading_throttle_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let rules = GameRules::default();
        assert_eq!(rules.interaction_radius_m, 50.0);
        assert_eq!(rules.nearby_radius_m, 500.0);
        assert_eq!(rules.permanent_step, MissionStep { increment: 1, goal: 5, xp: 10 });
        assert!(rules.validate().is_ok());
    }

    #[test]
    fn test_partial_override() {
        let json = r#"{"interaction_radius_m": 75, "permanent_step": {"goal": 3}}"#;
        let rules = GameRules::from_json(json).unwrap();

        assert_eq!(rules.interaction_radius_m, 75.0);
        assert_eq!(rules.nearby_radius_m, 500.0);
        assert_eq!(rules.permanent_step.goal, 3);
        assert_eq!(rules.permanent_step.xp, 10);
    }

    #[test]
    fn test_rejects_inverted_radii() {
        let err = GameRules::from_json(r#"{"interaction_radius_m": 600}"#).unwrap_err();
        assert!(matches!(err, GameError::InvalidRules(_)));

        let err = GameRules::from_json(r#"{"level_xp": "many"}"#).unwrap_err();
        assert!(matches!(err, GameError::RulesJson(_)));
    }
}

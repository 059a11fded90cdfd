//! Data-driven gameplay tuning
//!
//! Everything here can be overridden from a JSON file; missing fields keep
//! their defaults, so a tuning file only needs the values it changes.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::consts::GAME_HEIGHT;

/// Tunable gameplay values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Curve progress speed for a normal jump (progress += speed / 100 per frame)
    pub jump_speed: f32,
    /// Curve progress speed while dashing
    pub dash_speed: f32,
    /// Downward drift per frame before a curve has been consumed
    pub free_fall_speed: f32,

    /// Drags not taller than this are discarded
    pub min_jump_height: f32,
    /// Horizontal multiplier from launch point to the mirrored endpoint
    pub aim_extension: f32,
    /// Height every jump curve ends at
    pub reference_height: f32,

    /// Dash control point rise above the hero
    pub dash_lift: f32,
    /// Dash endpoint rise above the hero
    pub dash_drop: f32,

    /// Hero stands this far above a floor it lands on
    pub landing_offset: f32,
    /// Hero is pushed this far away from a wall it hits
    pub wall_offset: f32,

    /// Seed for death particle variance
    pub particle_seed: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            jump_speed: 1.6,
            dash_speed: 6.0,
            free_fall_speed: 10.0,

            min_jump_height: 30.0,
            aim_extension: 2.0,
            reference_height: GAME_HEIGHT,

            dash_lift: 70.0,
            dash_drop: 6.0,

            landing_offset: 16.0,
            wall_offset: 16.0,

            particle_seed: 0x5EED,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON, keeping defaults for missing fields
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid tuning JSON")
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read tuning file {}", path.display()))?;
        let tuning = Self::from_json(&json)
            .with_context(|| format!("failed to parse tuning file {}", path.display()))?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Serialize to pretty JSON (for writing a starter tuning file)
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize tuning")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "dash_speed": 8.0 }"#).unwrap();
        assert_eq!(tuning.dash_speed, 8.0);
        assert_eq!(tuning.jump_speed, Tuning::default().jump_speed);
        assert_eq!(tuning.reference_height, GAME_HEIGHT);
    }

    #[test]
    fn test_dash_is_faster_than_jump() {
        let tuning = Tuning::default();
        assert!(tuning.dash_speed > tuning.jump_speed);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Tuning::from_json("{ not json").is_err());
        assert!(Tuning::from_json(r#"{ "jump_speed": "fast" }"#).is_err());
    }

    #[test]
    fn test_json_survives_a_trip_through_text() {
        let mut tuning = Tuning::default();
        tuning.particle_seed = 42;
        let json = tuning.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let err = Tuning::load("/definitely/not/here.json").unwrap_err();
        assert!(format!("{err:#}").contains("/definitely/not/here.json"));
    }
}

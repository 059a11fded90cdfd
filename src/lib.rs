//! Catapult - a single-screen drag-to-launch platformer
//!
//! Core modules:
//! - `sim`: Frame-synchronous simulation (trajectory, hero, collisions, level flow)
//! - `renderer`: Draw pass over an abstract render surface
//! - `platform`: Pointer input and frame clock
//! - `tuning`: Data-driven gameplay tuning

pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
///
/// Speeds are expressed per nominal 60 Hz frame; `dt == 1.0` is one frame.
pub mod consts {
    /// One nominal frame
    pub const FRAME_DT: f32 = 1.0;
    /// Frames per second the `dt` unit is normalized to
    pub const TARGET_FPS: f32 = 60.0;
    /// Longest wall-clock gap fed into a single frame
    pub const MAX_ELAPSED_MS: f64 = 100.0;

    /// Playfield dimensions
    pub const GAME_WIDTH: f32 = 800.0;
    pub const GAME_HEIGHT: f32 = 600.0;
    pub const BRICK_SIZE: f32 = 32.0;

    /// Hero body rectangle, centered on the hero position
    pub const HERO_BODY_HALF_WIDTH: f32 = 12.0;
    pub const HERO_BODY_HALF_HEIGHT: f32 = 15.0;
    /// Hero landing rectangle (feet), offset from the hero position
    pub const HERO_LAND_OFFSET_X: f32 = -8.0;
    pub const HERO_LAND_OFFSET_Y: f32 = 6.0;
    pub const HERO_LAND_WIDTH: f32 = 16.0;
    pub const HERO_LAND_HEIGHT: f32 = 10.0;

    /// Death burst
    pub const DEATH_PARTICLE_COUNT: usize = 30;
    pub const DEATH_PARTICLE_OFFSET: f32 = 16.0;
    /// Particles at or below this scale are spent
    pub const PARTICLE_MIN_SCALE: f32 = 0.2;
    pub const PARTICLE_SHRINK: f32 = 0.1;

    /// Falling floor alpha lost per frame once struck
    pub const FALLING_FLOOR_DECAY: f32 = 0.008;
    /// How far a collapsed floor's hit box moves up
    pub const FALLING_FLOOR_SHIFT: f32 = 6.0;

    /// Orb hit box inset and size
    pub const ORB_HIT_INSET: f32 = 3.0;
    pub const ORB_HIT_SIZE: f32 = 10.0;
    pub const ORB_COLLECT_ANIM_SPEED: f32 = 0.8;
    pub const ORB_COLLECT_ANIM_END: f32 = 5.0;

    /// Escalator spike tile scroll period (pixels)
    pub const ESCALATOR_PERIOD: f32 = 32.0;

    /// Slide block speed (pixels per frame)
    pub const SLIDE_BLOCK_SPEED: f32 = 10.0;

    /// Bugger orbit
    pub const BUGGER_SIZE: f32 = 24.0;
    pub const BUGGER_ORBIT_RADIUS: f32 = 50.0;
    pub const BUGGER_ANGULAR_SPEED: f32 = 0.05;

    /// Level transition
    pub const TRANSITION_GROW_SPEED: f32 = 2.0;
    pub const TRANSITION_SPIN_SPEED: f32 = 5.0;
    pub const TRANSITION_PEAK_SCALE: f32 = 70.0;

    /// Win message fade-in and tap gate
    pub const WIN_FADE_SPEED: f32 = 0.02;
    pub const WIN_SECONDARY_FADE_SPEED: f32 = 0.05;
    pub const WIN_SETTLE_FRAMES: f32 = 20.0;
}

/// Snap a coordinate to a whole pixel (truncates toward zero)
#[inline]
pub fn snap(value: f32) -> f32 {
    value.trunc()
}

/// Snap both components of a point to whole pixels
#[inline]
pub fn snap_point(point: Vec2) -> Vec2 {
    Vec2::new(snap(point.x), snap(point.y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_truncates_toward_zero() {
        assert_eq!(snap(12.9), 12.0);
        assert_eq!(snap(-12.9), -12.0);
        assert_eq!(snap_point(Vec2::new(3.7, -0.5)), Vec2::new(3.0, 0.0));
    }
}

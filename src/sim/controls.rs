//! Drag-to-aim controls
//!
//! A gesture starts on pointer-down (capturing the hero position), follows the
//! pointer, and completes on pointer-up. A tall enough drag yields a
//! [`Projectile`]; anything shorter is dropped silently.

use glam::Vec2;

use super::trajectory::{Projectile, ProjectileIds, mirrored_endpoint};
use crate::platform::InputProvider;
use crate::snap_point;
use crate::tuning::Tuning;

/// Marching-ants offset of the aim line wraps back to this value
const DASH_OFFSET_WRAP: f32 = 12.0;
const DASH_OFFSET_SPEED: f32 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Gesture {
    start: Vec2,
    pointer: Vec2,
}

impl Gesture {
    /// How far the pointer is above the start point
    fn height(&self) -> f32 {
        self.start.y - self.pointer.y
    }
}

/// What the draw pass needs to show the aim line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimPreview {
    pub p0: Vec2,
    pub p1: Vec2,
    pub p2: Vec2,
    /// Releasing now would launch
    pub is_valid: bool,
    pub dash_offset: f32,
}

/// Per-level aiming state, recreated on every level load
#[derive(Debug, Clone, Default)]
pub struct HeroControls {
    enabled: bool,
    gesture: Option<Gesture>,
    result: Option<Projectile>,
    dash_offset: f32,
}

impl HeroControls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Last completed launch, handed to the hero every frame
    #[inline]
    pub fn result(&self) -> Option<Projectile> {
        self.result
    }

    pub fn clear_result(&mut self) {
        self.result = None;
        self.reset();
    }

    /// Abandon any gesture in progress
    pub fn reset(&mut self) {
        self.gesture = None;
        self.dash_offset = 0.0;
    }

    pub fn update(
        &mut self,
        dt: f32,
        hero_pos: Vec2,
        input: &impl InputProvider,
        ids: &mut ProjectileIds,
        tuning: &Tuning,
    ) {
        if !self.enabled {
            return;
        }

        self.dash_offset -= DASH_OFFSET_SPEED * dt;
        if self.dash_offset < 0.0 {
            self.dash_offset = DASH_OFFSET_WRAP;
        }

        let pointer = snap_point(input.pointer());

        if self.gesture.is_none() && input.is_primary_pointer_down() {
            self.reset();
            self.gesture = Some(Gesture {
                start: snap_point(hero_pos),
                pointer,
            });
            self.result = None;
        }

        let Some(gesture) = self.gesture.as_mut() else {
            return;
        };
        gesture.pointer = pointer;

        if !input.is_primary_pointer_up() {
            return;
        }

        let gesture = *gesture;
        if gesture.height() <= tuning.min_jump_height {
            log::debug!("Gesture too short ({} px), dropped", gesture.height());
            self.reset();
            return;
        }

        let projectile = Projectile::from_gesture(gesture.start, gesture.pointer, tuning, ids.next_id());
        log::debug!(
            "Launch {:?}: p0={} p1={} p2={}",
            projectile.id,
            projectile.p0,
            projectile.p1,
            projectile.p2
        );
        self.result = Some(projectile);
        self.gesture = None;
        self.enabled = false;
    }

    /// Aim line for the gesture in progress, if any
    pub fn aim_preview(&self, tuning: &Tuning) -> Option<AimPreview> {
        if !self.enabled {
            return None;
        }
        let gesture = self.gesture?;
        Some(AimPreview {
            p0: gesture.start,
            p1: gesture.pointer,
            p2: mirrored_endpoint(
                gesture.start,
                gesture.pointer,
                tuning.aim_extension,
                tuning.reference_height,
            ),
            is_valid: gesture.height() > tuning.min_jump_height,
            dash_offset: self.dash_offset,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::PointerState;

    const HERO: Vec2 = Vec2::new(100.4, 544.9);

    fn enabled() -> HeroControls {
        let mut controls = HeroControls::new();
        controls.set_enabled(true);
        controls
    }

    /// Press at `from`, drag to `to` over one frame, release there
    fn drag(controls: &mut HeroControls, ids: &mut ProjectileIds, from: Vec2, to: Vec2) {
        let tuning = Tuning::default();
        let mut input = PointerState::new();

        input.press(from);
        controls.update(1.0, HERO, &input, ids, &tuning);
        input.end_frame();

        input.move_to(to);
        controls.update(1.0, HERO, &input, ids, &tuning);

        input.release(to);
        controls.update(1.0, HERO, &input, ids, &tuning);
        input.end_frame();
    }

    #[test]
    fn test_valid_drag_produces_projectile() {
        let mut controls = enabled();
        let mut ids = ProjectileIds::default();
        drag(&mut controls, &mut ids, Vec2::new(300.0, 300.0), Vec2::new(160.7, 400.2));

        let result = controls.result().unwrap();
        assert_eq!(result.p0, Vec2::new(100.0, 544.0));
        assert_eq!(result.p1, Vec2::new(160.0, 400.0));
        assert_eq!(result.p2, Vec2::new(220.0, 600.0));
        assert!(!controls.is_enabled());
        assert!(controls.aim_preview(&Tuning::default()).is_none());
    }

    #[test]
    fn test_short_drag_is_discarded() {
        let mut controls = enabled();
        let mut ids = ProjectileIds::default();
        // 544 - 514 == 30, not above the threshold
        drag(&mut controls, &mut ids, Vec2::new(300.0, 300.0), Vec2::new(160.0, 514.0));

        assert!(controls.result().is_none());
        assert!(controls.is_enabled());
        assert!(controls.aim_preview(&Tuning::default()).is_none());
    }

    #[test]
    fn test_disabled_controls_ignore_input() {
        let mut controls = HeroControls::new();
        let mut ids = ProjectileIds::default();
        drag(&mut controls, &mut ids, Vec2::new(300.0, 300.0), Vec2::new(160.0, 100.0));
        assert!(controls.result().is_none());
    }

    #[test]
    fn test_each_launch_gets_a_new_id() {
        let mut controls = enabled();
        let mut ids = ProjectileIds::default();
        drag(&mut controls, &mut ids, Vec2::ZERO, Vec2::new(160.0, 100.0));
        let first = controls.result().unwrap().id;

        controls.clear_result();
        controls.set_enabled(true);
        drag(&mut controls, &mut ids, Vec2::ZERO, Vec2::new(40.0, 100.0));
        let second = controls.result().unwrap().id;
        assert_ne!(first, second);
    }

    #[test]
    fn test_aim_preview_tracks_pointer() {
        let tuning = Tuning::default();
        let mut controls = enabled();
        let mut ids = ProjectileIds::default();
        let mut input = PointerState::new();

        input.press(Vec2::new(100.0, 530.0));
        controls.update(1.0, HERO, &input, &mut ids, &tuning);
        input.end_frame();

        // Starting a gesture restarts the marching ants
        let preview = controls.aim_preview(&tuning).unwrap();
        assert!(!preview.is_valid);
        assert_eq!(preview.dash_offset, 0.0);

        input.move_to(Vec2::new(50.0, 300.0));
        controls.update(1.0, HERO, &input, &mut ids, &tuning);
        let preview = controls.aim_preview(&tuning).unwrap();
        assert!(preview.is_valid);
        assert_eq!(preview.p1, Vec2::new(50.0, 300.0));
        assert_eq!(preview.p2, Vec2::new(0.0, 600.0));
        assert_eq!(preview.dash_offset, DASH_OFFSET_WRAP);

        controls.update(1.0, HERO, &input, &mut ids, &tuning);
        let preview = controls.aim_preview(&tuning).unwrap();
        assert!(preview.dash_offset < DASH_OFFSET_WRAP);
        assert!(preview.dash_offset > 0.0);
    }
}

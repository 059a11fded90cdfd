//! Scripted player for demos and headless runs
//!
//! Aims each launch so the curve passes through the nearest uncollected orb
//! at its midpoint, and taps through the win screen.

use glam::Vec2;

use super::state::GameState;
use crate::platform::{InputProvider, PointerState};

/// Gesture step in progress
#[derive(Debug, Clone, Copy, PartialEq)]
enum Step {
    Idle,
    /// Pressed last frame; release at this point
    Release(Vec2),
}

/// Input provider that plays the game on its own
#[derive(Debug, Clone)]
pub struct Autopilot {
    pointer: PointerState,
    step: Step,
    /// Frames to wait between actions
    cooldown: u32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self::new()
    }
}

impl Autopilot {
    pub fn new() -> Self {
        Self {
            pointer: PointerState::new(),
            step: Step::Idle,
            cooldown: 0,
        }
    }

    /// Decide this frame's pointer events. Call once before each tick and
    /// [`end_frame`](Self::end_frame) after it.
    pub fn plan(&mut self, state: &GameState) {
        if let Step::Release(target) = self.step {
            self.pointer.release(target);
            self.step = Step::Idle;
            self.cooldown = 10;
            return;
        }
        if self.cooldown > 0 {
            self.cooldown -= 1;
            return;
        }

        let target = if state.win_message.is_ready() {
            Some(self.pointer.pointer())
        } else {
            aim(state)
        };
        if let Some(target) = target {
            self.pointer.press(target);
            self.step = Step::Release(target);
        }
    }

    pub fn end_frame(&mut self) {
        self.pointer.end_frame();
    }
}

/// Release point that sends the hero through the nearest orb
fn aim(state: &GameState) -> Option<Vec2> {
    let level = state.level.as_ref()?;
    if !level.controls.is_enabled() || !level.hero.is_idle() {
        return None;
    }

    let hero = level.hero.position();
    let orb = level
        .orbs
        .iter()
        .filter(|orb| !orb.is_collected)
        .map(|orb| orb.hit_rect().origin() + orb.hit_rect().size() / 2.0)
        .min_by(|a, b| {
            a.distance_squared(hero)
                .partial_cmp(&b.distance_squared(hero))
                .unwrap_or(std::cmp::Ordering::Equal)
        })?;

    // With p2 mirrored, the curve's midpoint is (p1.x, (p0.y + 2 p1.y + h) / 4)
    let reference = state.tuning.reference_height;
    let mut release = Vec2::new(orb.x, 2.0 * orb.y - (hero.y + reference) / 2.0);
    let min_height = state.tuning.min_jump_height + 10.0;
    if hero.y - release.y < min_height {
        release.y = hero.y - min_height;
    }
    Some(release)
}

impl InputProvider for Autopilot {
    fn is_primary_pointer_down(&self) -> bool {
        self.pointer.is_primary_pointer_down()
    }

    fn is_primary_pointer_up(&self) -> bool {
        self.pointer.is_primary_pointer_up()
    }

    fn pointer_x(&self) -> f32 {
        self.pointer.pointer_x()
    }

    fn pointer_y(&self) -> f32 {
        self.pointer.pointer_y()
    }
}

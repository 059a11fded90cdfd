//! End-of-game message
//!
//! Fades in after the last level, then waits for a full tap (press followed
//! by release) before reporting completion. A single release without a prior
//! press does not count.

use super::signal::OneShot;
use crate::consts::{WIN_FADE_SPEED, WIN_SECONDARY_FADE_SPEED, WIN_SETTLE_FRAMES};
use crate::platform::InputProvider;

/// Lines drawn under the title, top to bottom
pub const WIN_LINES: [&str; 3] = ["congrats", "you have finished the game", "tap to play again"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum TapState {
    #[default]
    Waiting,
    Pressed,
    Done,
}

#[derive(Debug, Clone, Default)]
pub struct WinMessage {
    visible: bool,
    /// Title opacity
    pub alpha: f32,
    /// Text opacity, starts once the title is half visible
    pub secondary_alpha: f32,
    settle: f32,
    tap: TapState,
    completion: OneShot<()>,
}

impl WinMessage {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Accepting taps
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.completion.is_armed() && self.settle >= WIN_SETTLE_FRAMES
    }

    /// Start showing. Returns false if already shown.
    pub fn show(&mut self) -> bool {
        if self.visible {
            return false;
        }
        log::info!("Show win message");
        *self = Self {
            visible: true,
            ..Self::default()
        };
        self.completion.arm(());
        true
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Advance the fade and watch for the tap. Returns true on the frame the
    /// tap completes.
    pub fn update(&mut self, dt: f32, input: &impl InputProvider) -> bool {
        if !self.visible || !self.completion.is_armed() {
            return false;
        }

        self.alpha = (self.alpha + WIN_FADE_SPEED * dt).min(1.0);
        if self.alpha > 0.5 {
            self.secondary_alpha += WIN_SECONDARY_FADE_SPEED * dt;
        }
        if self.secondary_alpha > 1.0 {
            self.secondary_alpha = 1.0;
            self.settle += dt;
        }

        if self.settle <= WIN_SETTLE_FRAMES {
            return false;
        }
        self.settle = WIN_SETTLE_FRAMES;

        if self.tap == TapState::Waiting && input.is_primary_pointer_down() {
            self.tap = TapState::Pressed;
        }
        if self.tap == TapState::Pressed && input.is_primary_pointer_up() {
            self.tap = TapState::Done;
            return self.completion.fire().is_some();
        }
        false
    }
}

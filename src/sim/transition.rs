//! Level transition animation
//!
//! A sprite grows and spins until it covers the screen, at which point the
//! pending level swap is handed back to the caller, then shrinks back to
//! nothing.

use serde::{Deserialize, Serialize};

use super::signal::OneShot;
use crate::consts::{TRANSITION_GROW_SPEED, TRANSITION_PEAK_SCALE, TRANSITION_SPIN_SPEED};

/// What to load when the transition covers the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionTarget {
    /// Load this level index
    Level(usize),
    /// Hide the win message and start over from level 0
    Restart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionPhase {
    /// Growing toward the peak
    Grow,
    /// Shrinking back to zero
    Shrink,
}

/// Produced by [`LevelTransition::update`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionEvent {
    Midpoint(TransitionTarget),
    Finished,
}

#[derive(Debug, Clone, Default)]
pub struct LevelTransition {
    pub scale: f32,
    /// Degrees
    pub rotation: f32,
    direction: f32,
    phase: Option<TransitionPhase>,
    midpoint: OneShot<TransitionTarget>,
}

impl LevelTransition {
    pub fn new() -> Self {
        Self {
            direction: 1.0,
            ..Default::default()
        }
    }

    #[inline]
    pub fn phase(&self) -> Option<TransitionPhase> {
        self.phase
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase.is_some()
    }

    /// Midpoint not reached yet
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.midpoint.is_armed()
    }

    /// Start growing toward a swap to `target`. A transition that is already
    /// running grows again from its current scale; a pending target is replaced.
    pub fn start(&mut self, target: TransitionTarget) {
        log::info!("Level transition start ({target:?})");
        if self.phase.is_none() {
            self.clear();
        }
        self.phase = Some(TransitionPhase::Grow);
        self.direction = 1.0;
        self.midpoint.disarm();
        self.midpoint.arm(target);
    }

    /// Drop any running animation and its pending target
    pub fn clear(&mut self) {
        self.midpoint.disarm();
        self.phase = None;
        self.scale = 0.0;
        self.rotation = 0.0;
        self.direction = 1.0;
    }

    pub fn update(&mut self, dt: f32) -> Option<TransitionEvent> {
        let phase = self.phase?;

        self.scale += TRANSITION_GROW_SPEED * dt * self.direction;
        self.rotation += TRANSITION_SPIN_SPEED * dt * self.direction;
        if self.rotation > 360.0 {
            self.rotation = 0.0;
        }

        match phase {
            TransitionPhase::Grow if self.scale > TRANSITION_PEAK_SCALE => {
                self.direction = -1.0;
                self.phase = Some(TransitionPhase::Shrink);
                self.midpoint.fire().map(TransitionEvent::Midpoint)
            }
            TransitionPhase::Shrink if self.scale <= 0.0 => {
                log::info!("Level transition end");
                self.clear();
                Some(TransitionEvent::Finished)
            }
            _ => None,
        }
    }
}

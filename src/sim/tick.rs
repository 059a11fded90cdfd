//! Per-frame simulation tick
//!
//! Frame order: backdrop, transition, win message, then (with a live level)
//! collision resolution against last frame's positions, controls, hero, and
//! finally entity motion.

use super::collision::{self, Reaction};
use super::state::{GameEvent, GamePhase, GameState};
use super::transition::{TransitionEvent, TransitionTarget};
use crate::platform::InputProvider;

/// Advance the game by `dt` frames
pub fn tick(state: &mut GameState, input: &impl InputProvider, dt: f32) {
    state.time_ticks += 1;

    state.background.update(dt);
    update_transition(state, dt);

    if state.win_message.update(dt, input) {
        log::info!("Win message tapped, restarting");
        state.push_event(GameEvent::WinTapComplete);
        state.transition.start(TransitionTarget::Restart);
    }

    let Some(level) = state.level.as_mut() else {
        return;
    };
    let mut events = Vec::new();
    let mut level_complete = false;

    // Resolve against positions from the previous frame
    let mut reactions = collision::resolve_flight(level, &mut state.rng, &state.tuning);
    reactions.extend(collision::resolve_idle(level, &mut state.rng));
    for reaction in reactions {
        match reaction {
            Reaction::OrbCollected(index) => events.push(GameEvent::OrbCollected { index }),
            Reaction::Landed {
                level_complete: true,
                ..
            } => level_complete = true,
            _ => {}
        }
    }

    level.controls.update(
        dt,
        level.hero.position(),
        input,
        &mut state.projectile_ids,
        &state.tuning,
    );
    let step = level.hero.update(dt, level.controls.result(), &state.tuning);

    if step.jump_started {
        let dash = level.hero.is_dash_mode();
        log::debug!("Jump started (dash: {dash})");
        if !dash {
            level.toggle_slide_blocks();
        }
        events.push(GameEvent::JumpStarted { dash });
    }
    let index = level.index;

    for event in events {
        state.push_event(event);
    }

    if level_complete && !state.transition.is_pending() {
        log::info!("Level {index} complete");
        state.push_event(GameEvent::LevelComplete { level: index });
        state.phase = GamePhase::Transitioning;
        state.transition.start(TransitionTarget::Level(index + 1));
    }

    if step.died {
        state.push_event(GameEvent::PlayerDied);
        state.respawn();
    }

    if let Some(level) = state.level.as_mut() {
        level.update_entities(dt);
    }
}

fn update_transition(state: &mut GameState, dt: f32) {
    match state.transition.update(dt) {
        Some(TransitionEvent::Midpoint(target)) => {
            state.push_event(GameEvent::TransitionMidpoint);
            match target {
                TransitionTarget::Level(index) => state.load_level(index),
                TransitionTarget::Restart => {
                    state.win_message.hide();
                    state.load_level(0);
                }
            }
        }
        Some(TransitionEvent::Finished) => state.push_event(GameEvent::TransitionFinished),
        None => {}
    }
}

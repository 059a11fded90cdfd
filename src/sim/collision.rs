//! Collision resolution
//!
//! Two independent passes run against last frame's positions:
//! - The flight pass, while the hero is airborne, walks blocks, resting slide
//!   blocks, orbs, spikes, buggers and the bottom of the screen in that order.
//!   Within each group the first hit in list order wins.
//! - The idle pass, while the hero stands still, only drops it through
//!   collapsed falling floors and checks buggers.

use super::entities::BlockKind;
use super::hero::WallSnap;
use super::particle::ParticleRng;
use super::state::Level;
use crate::consts::GAME_HEIGHT;
use crate::tuning::Tuning;

/// What killed the hero
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hazard {
    Spike,
    Bugger,
    OffScreen,
}

/// One applied collision reaction
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reaction {
    /// Stopped against a wall
    WallStop(WallSnap),
    /// Landed on a floor or resting slide block
    Landed {
        floor_y: f32,
        /// No orbs left: the level is done
        level_complete: bool,
    },
    /// Orb at this index collected; the hero dashes
    OrbCollected(usize),
    /// Hazard contact. `fatal` is false when the hero was already dead.
    Died { hazard: Hazard, fatal: bool },
    /// Standing floor collapsed; the hero starts falling
    FloorGone,
}

/// Flight pass. Does nothing unless the hero is alive and airborne.
pub fn resolve_flight(level: &mut Level, rng: &mut ParticleRng, tuning: &Tuning) -> Vec<Reaction> {
    let mut reactions = Vec::new();
    if level.hero.is_idle() || !level.hero.is_alive() {
        return reactions;
    }

    // Blocks
    let body = level.hero.body_rect();
    let feet = level.hero.landing_rect();
    let hit = level.blocks.iter().position(|block| {
        let hero_rect = if block.kind.uses_landing_rect() { feet } else { body };
        block.hit_rect().intersects(&hero_rect)
    });
    if let Some(i) = hit {
        let block = &mut level.blocks[i];
        match block.kind {
            BlockKind::WallVertical => {
                let x = if level.hero.is_flipped() {
                    block.rect.right() + tuning.wall_offset
                } else {
                    block.rect.x - tuning.wall_offset
                };
                reactions.extend(wall_stop(level, WallSnap::X(x)));
            }
            BlockKind::WallHorizontal => {
                let y = block.rect.bottom() + tuning.wall_offset;
                reactions.extend(wall_stop(level, WallSnap::Y(y)));
            }
            BlockKind::Floor | BlockKind::FallingFloor => {
                // A collapsed floor still stops the block scan
                if block.is_active {
                    block.strike();
                    let floor_y = block.rect.y;
                    reactions.push(land(level, floor_y, tuning));
                }
            }
        }
    }

    // Slide blocks, only while resting
    let feet = level.hero.landing_rect();
    if let Some(floor_y) = level
        .slide_blocks
        .iter()
        .find(|slide| !slide.is_moving && slide.hit_rect().intersects(&feet))
        .map(|slide| slide.pos.y)
    {
        reactions.push(land(level, floor_y, tuning));
    }

    // Orbs
    let body = level.hero.body_rect();
    if let Some(i) = level
        .orbs
        .iter()
        .position(|orb| !orb.is_collected && orb.hit_rect().intersects(&body))
        && level.orbs[i].collect()
    {
        log::debug!("Orb {i} collected");
        level.hero.perform_dash();
        reactions.push(Reaction::OrbCollected(i));
    }

    // Hazards
    let body = level.hero.body_rect();
    if level.spikes.iter().any(|spike| spike.hit_rect().intersects(&body)) {
        reactions.push(kill(level, Hazard::Spike, rng));
    }
    if level.buggers.iter().any(|bugger| bugger.hit_rect().intersects(&body)) {
        reactions.push(kill(level, Hazard::Bugger, rng));
    }
    if level.hero.body_rect().y > GAME_HEIGHT {
        reactions.push(kill(level, Hazard::OffScreen, rng));
    }

    reactions
}

/// Idle pass. Does nothing unless the hero is alive and standing.
pub fn resolve_idle(level: &mut Level, rng: &mut ParticleRng) -> Vec<Reaction> {
    let mut reactions = Vec::new();
    if !level.hero.is_idle() || !level.hero.is_alive() {
        return reactions;
    }

    let body = level.hero.body_rect();
    let floor_gone = level.blocks.iter().any(|block| {
        block.kind == BlockKind::FallingFloor && !block.is_active && block.hit_rect().intersects(&body)
    });
    if floor_gone {
        log::debug!("Floor collapsed under the hero");
        level.hero.set_idle(false);
        reactions.push(Reaction::FloorGone);
    }

    if level.buggers.iter().any(|bugger| bugger.hit_rect().intersects(&body)) {
        reactions.push(kill(level, Hazard::Bugger, rng));
    }

    reactions
}

/// No reaction while the hero is already stopped against a wall
fn wall_stop(level: &mut Level, snap: WallSnap) -> Option<Reaction> {
    if !level.hero.stop_at_wall(snap) {
        return None;
    }
    log::debug!("Hero stopped at wall {snap:?}");
    level.controls.clear_result();
    Some(Reaction::WallStop(snap))
}

fn land(level: &mut Level, floor_y: f32, tuning: &Tuning) -> Reaction {
    log::debug!("Hero landed at y={floor_y}");
    level.hero.land(floor_y - tuning.landing_offset);
    level.controls.clear_result();

    let level_complete = !level.orbs_pending();
    if !level_complete {
        level.controls.set_enabled(true);
    }
    Reaction::Landed {
        floor_y,
        level_complete,
    }
}

fn kill(level: &mut Level, hazard: Hazard, rng: &mut ParticleRng) -> Reaction {
    let fatal = level.hero.die(rng);
    if fatal {
        log::info!("Player died ({hazard:?})");
    }
    Reaction::Died { hazard, fatal }
}

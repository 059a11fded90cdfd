//! Frame-synchronous simulation
//!
//! All gameplay logic lives here:
//! - Explicit `dt` per frame, no wall clock
//! - Seeded RNG only
//! - Stable iteration order (entity list order)
//! - No rendering or platform dependencies beyond the input query surface

pub mod autopilot;
pub mod background;
pub mod collision;
pub mod controls;
pub mod entities;
pub mod hero;
pub mod levels;
pub mod particle;
pub mod rect;
pub mod signal;
pub mod state;
pub mod tick;
pub mod trajectory;
pub mod transition;
pub mod win_message;

pub use autopilot::Autopilot;
pub use background::{Background, BackgroundKind};
pub use collision::{Hazard, Reaction, resolve_flight, resolve_idle};
pub use controls::{AimPreview, HeroControls};
pub use entities::{Block, BlockKind, Bugger, BuggerKind, Orb, SlideBlock, Spike, SpikeKind};
pub use hero::{Hero, HeroMode, HeroStep, WallSnap};
pub use levels::{BuiltinLevels, LevelCatalog, LevelData};
pub use particle::{BloodParticle, ParticleRng};
pub use rect::Rect;
pub use signal::OneShot;
pub use state::{GameEvent, GamePhase, GameState, Level};
pub use tick::tick;
pub use trajectory::{Projectile, ProjectileId, ProjectileIds, quadratic_bezier};
pub use transition::{LevelTransition, TransitionEvent, TransitionPhase, TransitionTarget};
pub use win_message::WinMessage;

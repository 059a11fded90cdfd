//! Game state structures
//!
//! `GameState` owns everything that survives a level reload (catalog, index,
//! backdrop, transition, win message, RNG). `Level` owns everything that does
//! not: the hero, its controls and the entity collections, all rebuilt from
//! the catalog on every load.

use serde::{Deserialize, Serialize};

use super::background::{Background, BackgroundKind};
use super::controls::HeroControls;
use super::entities::{Block, Bugger, Orb, SlideBlock, Spike};
use super::hero::Hero;
use super::levels::{BuiltinLevels, LevelCatalog, LevelData};
use super::particle::ParticleRng;
use super::trajectory::ProjectileIds;
use super::transition::LevelTransition;
use super::win_message::WinMessage;
use crate::tuning::Tuning;

/// Orchestrator phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Between dispose and the next level being built
    Loading,
    /// A level is live
    Playing,
    /// Level complete; waiting for the transition to swap levels
    Transitioning,
    /// Past the last level: win message on screen
    Finished,
}

/// Lifecycle notifications, drained by the host each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new curve started (gesture or dash)
    JumpStarted { dash: bool },
    OrbCollected { index: usize },
    /// Death animation finished; the level is about to reload
    PlayerDied,
    LevelComplete { level: usize },
    LevelLoaded { level: usize },
    TransitionMidpoint,
    TransitionFinished,
    WinShown,
    WinTapComplete,
}

/// One live level
#[derive(Debug, Clone)]
pub struct Level {
    pub index: usize,
    pub hero: Hero,
    pub controls: HeroControls,
    pub blocks: Vec<Block>,
    pub orbs: Vec<Orb>,
    pub spikes: Vec<Spike>,
    pub slide_blocks: Vec<SlideBlock>,
    pub buggers: Vec<Bugger>,
}

impl Level {
    pub fn new(index: usize, data: LevelData) -> Self {
        Self {
            index,
            hero: Hero::new(data.hero_spawn),
            controls: HeroControls::new(),
            blocks: data.blocks,
            orbs: data.orbs,
            spikes: data.spikes,
            slide_blocks: data.slide_blocks,
            buggers: data.buggers,
        }
    }

    /// Any orb still uncollected
    pub fn orbs_pending(&self) -> bool {
        self.orbs.iter().any(|orb| !orb.is_collected)
    }

    /// Advance entity animation and motion
    pub fn update_entities(&mut self, dt: f32) {
        for orb in &mut self.orbs {
            orb.update(dt);
        }
        for block in &mut self.blocks {
            block.update(dt);
        }
        for spike in &mut self.spikes {
            spike.update(dt);
        }
        for slide in &mut self.slide_blocks {
            slide.update(dt);
        }
        for bugger in &mut self.buggers {
            bugger.update(dt);
        }
    }

    pub fn toggle_slide_blocks(&mut self) {
        for slide in &mut self.slide_blocks {
            slide.toggle();
        }
    }
}

/// Complete game state
pub struct GameState {
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Index of the live level, or of the last one attempted
    pub level_index: usize,
    pub level: Option<Level>,
    pub background: Background,
    pub transition: LevelTransition,
    pub win_message: WinMessage,
    pub rng: ParticleRng,
    pub projectile_ids: ProjectileIds,
    /// Frames simulated so far
    pub time_ticks: u64,
    events: Vec<GameEvent>,
    catalog: Box<dyn LevelCatalog>,
}

impl std::fmt::Debug for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameState")
            .field("phase", &self.phase)
            .field("level_index", &self.level_index)
            .field("level", &self.level)
            .field("background", &self.background)
            .field("time_ticks", &self.time_ticks)
            .finish_non_exhaustive()
    }
}

impl GameState {
    /// New game on the built-in levels, starting at level 0
    pub fn new(tuning: Tuning) -> Self {
        Self::with_catalog(tuning, BuiltinLevels)
    }

    /// New game on a custom catalog, starting at level 0
    pub fn with_catalog(tuning: Tuning, catalog: impl LevelCatalog + 'static) -> Self {
        let mut state = Self {
            rng: ParticleRng::new(tuning.particle_seed),
            tuning,
            phase: GamePhase::Loading,
            level_index: 0,
            level: None,
            background: Background::default(),
            transition: LevelTransition::new(),
            win_message: WinMessage::new(),
            projectile_ids: ProjectileIds::default(),
            time_ticks: 0,
            events: Vec::new(),
            catalog: Box::new(catalog),
        };
        state.load_level(0);
        state
    }

    /// Tear down the live level and build `index` from the catalog. Past the
    /// end of the catalog the game is finished instead.
    pub fn load_level(&mut self, index: usize) {
        self.dispose_level();
        self.phase = GamePhase::Loading;

        let Some(data) = self.catalog.get_level(index) else {
            self.finish();
            return;
        };

        log::info!("Load level {index}");
        self.level_index = index;
        self.background.set_kind(data.background);
        self.level = Some(Level::new(index, data));
        // A respawn before the midpoint still waits for the swap
        self.phase = if self.transition.is_pending() {
            GamePhase::Transitioning
        } else {
            GamePhase::Playing
        };
        self.events.push(GameEvent::LevelLoaded { level: index });
    }

    /// Reload the current level after a death
    pub fn respawn(&mut self) {
        log::info!("Respawn");
        self.load_level(self.level_index);
    }

    fn dispose_level(&mut self) {
        if let Some(level) = self.level.take() {
            log::info!("Dispose level {}", level.index);
        }
    }

    fn finish(&mut self) {
        log::info!("Game finished");
        self.phase = GamePhase::Finished;
        self.background.set_kind(BackgroundKind::Win);
        if self.win_message.show() {
            self.events.push(GameEvent::WinShown);
        }
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Index of the level on screen, if any
    pub fn current_level(&self) -> Option<usize> {
        self.level.as_ref().map(|level| level.index)
    }
}

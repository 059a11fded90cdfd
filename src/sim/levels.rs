//! Level catalog
//!
//! Levels are plain builder functions in a fixed, zero-based sequence. Every
//! call builds fresh entities, so reloading a level never reuses instances
//! from a previous attempt.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::background::BackgroundKind;
use super::entities::{Block, BlockKind, Bugger, BuggerKind, Orb, SlideBlock, Spike, SpikeKind};
use crate::consts::{BRICK_SIZE, GAME_HEIGHT, GAME_WIDTH};

/// Everything needed to (re)build one level
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LevelData {
    pub hero_spawn: Vec2,
    pub background: BackgroundKind,
    pub blocks: Vec<Block>,
    pub orbs: Vec<Orb>,
    pub spikes: Vec<Spike>,
    pub slide_blocks: Vec<SlideBlock>,
    pub buggers: Vec<Bugger>,
}

/// Source of level data. The first index returning `None` ends the game.
pub trait LevelCatalog {
    fn get_level(&self, index: usize) -> Option<LevelData>;
}

/// The shipped levels
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinLevels;

impl BuiltinLevels {
    pub fn len(&self) -> usize {
        LEVELS.len()
    }

    pub fn is_empty(&self) -> bool {
        LEVELS.is_empty()
    }
}

impl LevelCatalog for BuiltinLevels {
    fn get_level(&self, index: usize) -> Option<LevelData> {
        LEVELS.get(index).map(|build| build())
    }
}

/// Ad-hoc catalogs (tests, custom level packs)
impl LevelCatalog for Vec<LevelData> {
    fn get_level(&self, index: usize) -> Option<LevelData> {
        self.get(index).cloned()
    }
}

const LEVELS: &[fn() -> LevelData] = &[
    level_0, level_1, level_2, level_3, level_4, level_5, level_6, level_7, level_8,
];

const B: f32 = BRICK_SIZE;
const W: f32 = GAME_WIDTH;
const H: f32 = GAME_HEIGHT;

fn wall_v(x: f32, y: f32, w: f32, h: f32) -> Block {
    Block::new(BlockKind::WallVertical, x, y, w, h)
}

fn wall_h(x: f32, y: f32, w: f32, h: f32) -> Block {
    Block::new(BlockKind::WallHorizontal, x, y, w, h)
}

fn floor(x: f32, y: f32, w: f32, h: f32) -> Block {
    Block::new(BlockKind::Floor, x, y, w, h)
}

fn falling_floor(x: f32, y: f32, w: f32, h: f32) -> Block {
    Block::new(BlockKind::FallingFloor, x, y, w, h)
}

fn spikes(x: f32, y: f32, w: f32, h: f32) -> Spike {
    Spike::new(SpikeKind::Static, x, y, w, h, false)
}

fn spikes_flipped(x: f32, y: f32, w: f32, h: f32) -> Spike {
    Spike::new(SpikeKind::Static, x, y, w, h, true)
}

fn escalator(x: f32, y: f32, w: f32, h: f32) -> Spike {
    Spike::new(SpikeKind::Escalator { tile_offset: 0.0 }, x, y, w, h, false)
}

fn escalator_flipped(x: f32, y: f32, w: f32, h: f32) -> Spike {
    Spike::new(SpikeKind::Escalator { tile_offset: 0.0 }, x, y, w, h, true)
}

fn spinner(x: f32, y: f32, angle: f32) -> Bugger {
    Bugger::new(BuggerKind::CircleSpin, x, y, angle)
}

fn orbs(points: &[(f32, f32)]) -> Vec<Orb> {
    points.iter().map(|&(x, y)| Orb::new(x, y)).collect()
}

fn level_0() -> LevelData {
    LevelData {
        hero_spawn: Vec2::new(100.0, 420.0),
        blocks: vec![
            wall_v(0.0, 0.0, B, H),
            wall_v(W - B, 0.0, B * 2.0, H),
            wall_h(0.0, 0.0, W, B),
            floor(0.0, H - B, W, B),
        ],
        orbs: orbs(&[(200.0, 300.0), (400.0, 400.0), (600.0, 300.0)]),
        ..Default::default()
    }
}

fn level_1() -> LevelData {
    LevelData {
        hero_spawn: Vec2::new(380.0, 360.0),
        blocks: vec![
            wall_v(0.0, 0.0, B * 4.0, H),
            wall_v(W - B * 4.0, 0.0, B * 6.0, H),
            wall_h(0.0, 0.0, W, B * 4.0),
            floor(0.0, H - B * 4.0, W, B * 4.0),
        ],
        orbs: orbs(&[(180.0, 300.0), (380.0, 200.0), (600.0, 300.0)]),
        spikes: vec![
            spikes(220.0, 440.0, B * 2.0, B),
            spikes(500.0, 440.0, B * 2.0, B),
        ],
        ..Default::default()
    }
}

fn level_2() -> LevelData {
    LevelData {
        hero_spawn: Vec2::new(70.0, 300.0),
        background: BackgroundKind::Title,
        blocks: vec![
            wall_v(0.0, 0.0, B, H),
            wall_v(W - B, 0.0, B, H),
            wall_h(B, 236.0, 200.0, B),
            wall_h(570.0, 236.0, 200.0, B),
            wall_h(B, 268.0, 300.0, B),
            wall_h(470.0, 268.0, 300.0, B),
            wall_h(0.0, 300.0, W, B),
            floor(B, 470.0, 100.0, 32.0),
            floor(0.0, 500.0, W, 200.0),
            floor(W - 100.0 - B, 470.0, 100.0, 32.0),
        ],
        orbs: orbs(&[(550.0, 400.0)]),
        spikes: vec![escalator(132.0, 470.0, 536.0, 32.0)],
        ..Default::default()
    }
}

fn level_3() -> LevelData {
    LevelData {
        hero_spawn: Vec2::new(90.0, 70.0),
        blocks: vec![
            wall_v(0.0, 0.0, B * 2.0, H),
            wall_v(W - B * 2.0, 0.0, B * 2.0, H),
            wall_h(0.0, 0.0, W, B * 2.0),
            floor(0.0, H - B * 2.0, W, B * 2.0),
            floor(64.0, 160.0, 200.0, 32.0),
            floor(200.0, 300.0, 540.0, 32.0),
            floor(60.0, 420.0, 32.0, 32.0),
            floor(536.0, 472.0, 200.0, 64.0),
        ],
        orbs: orbs(&[(400.0, 200.0), (600.0, 400.0)]),
        spikes: vec![
            spikes(200.0, 270.0, B * 7.0, B),
            spikes(542.0, 270.0, B * 6.0, B),
            escalator(64.0, 504.0, 472.0, 32.0),
        ],
        ..Default::default()
    }
}

fn level_4() -> LevelData {
    LevelData {
        hero_spawn: Vec2::new(450.0, 100.0),
        blocks: vec![
            wall_v(0.0, 0.0, B, H),
            wall_v(W - B, 0.0, B, H),
            wall_v(400.0 - B, 0.0, B, 240.0),
            wall_h(0.0, 0.0, W, B),
            floor(400.0, 208.0, 180.0, 32.0),
            floor(188.0, 208.0, 180.0, 32.0),
            floor(0.0, 540.0, W, 64.0),
        ],
        orbs: orbs(&[(240.0, 100.0)]),
        spikes: vec![
            spikes_flipped(190.0, 240.0, B * 12.0, B),
            escalator(B, 508.0, 96.0 * 8.0, 32.0),
        ],
        slide_blocks: vec![SlideBlock::new(60.0, 460.0, 200.0, 32.0, 730.0)],
        ..Default::default()
    }
}

fn level_5() -> LevelData {
    LevelData {
        hero_spawn: Vec2::new(200.0, 300.0),
        blocks: vec![
            wall_v(0.0, 0.0, B, H),
            wall_v(W - B, 0.0, B, H),
            wall_h(0.0, 0.0, W, B),
            wall_h(0.0, H - B, W, B),
            floor(120.0, 460.0, 160.0, 32.0),
            floor(500.0, 460.0, 160.0, 32.0),
        ],
        orbs: orbs(&[(370.0, 200.0)]),
        spikes: vec![
            spikes_flipped(B, B, 96.0 * 8.0, 32.0),
            spikes(B, 536.0, 96.0 * 8.0, 32.0),
            spikes(B, B * 2.0 + 8.0, 32.0, B * 14.0),
            spikes_flipped(770.0 - B, B * 2.0 + 8.0, 32.0, B * 14.0),
        ],
        buggers: vec![spinner(378.0, 280.0, 0.0), spinner(580.0, 320.0, 10.0)],
        ..Default::default()
    }
}

fn level_6() -> LevelData {
    LevelData {
        hero_spawn: Vec2::new(160.0, 300.0),
        blocks: vec![
            wall_v(0.0, 0.0, B * 3.0, H),
            wall_v(W - B, 0.0, B, H),
            wall_h(0.0, 0.0, W, B),
            floor(0.0, H - B, W, B),
            floor(94.0, 200.0, 300.0, B * 2.0),
            wall_h(94.0, 232.0, 300.0, B),
            floor(540.0, 200.0, 100.0, B * 2.0),
            wall_h(540.0, 232.0, 100.0, B),
            floor(94.0, 360.0, 100.0, B * 7.0),
            floor(190.0, 472.0, 580.0, B * 3.0),
            falling_floor(580.0, 400.0, 100.0, 32.0),
        ],
        orbs: orbs(&[(140.0, 140.0)]),
        spikes: vec![
            escalator_flipped(B * 3.0, B, B * 22.0, B),
            escalator(194.0, 440.0, B * 18.0, B),
            spikes(266.0, 168.0, B * 4.0, B),
            spikes_flipped(542.0, 264.0, B * 3.0, B),
        ],
        ..Default::default()
    }
}

fn level_7() -> LevelData {
    LevelData {
        hero_spawn: Vec2::new(380.0, 80.0),
        blocks: vec![
            wall_v(0.0, 0.0, B, H),
            wall_v(W - B, 0.0, B, H),
            wall_h(0.0, 0.0, W, B),
            floor(0.0, H - B, W, B),
            floor(320.0, 160.0, 160.0, 32.0),
        ],
        orbs: orbs(&[(120.0, 220.0), (560.0, 220.0), (600.0, 400.0), (160.0, 400.0)]),
        spikes: vec![
            escalator_flipped(B, B, B * 24.0, B),
            escalator(B, 540.0, B * 24.0, B),
        ],
        slide_blocks: vec![
            SlideBlock::new(60.0, 260.0, 100.0, 32.0, 260.0),
            SlideBlock::new(520.0, 260.0, 100.0, 32.0, 740.0),
            SlideBlock::new(60.0, 460.0, 200.0, 32.0, 730.0),
        ],
        buggers: vec![spinner(512.0, 276.0, 0.0), spinner(268.0, 276.0, 10.0)],
        ..Default::default()
    }
}

fn level_8() -> LevelData {
    LevelData {
        hero_spawn: Vec2::new(406.0, 300.0),
        blocks: vec![
            wall_v(0.0, 0.0, B, H),
            wall_v(W - B, 0.0, B, H),
            wall_v(228.0, 132.0, B, 200.0),
            wall_h(260.0, 300.0, 540.0, B),
            wall_h(0.0, 0.0, W, B),
            floor(0.0, H - B, W, B),
            floor(330.0, 480.0, 160.0, B * 3.0),
            falling_floor(32.0, 440.0, 100.0, 32.0),
            floor(228.0, 120.0, 380.0, 32.0),
            wall_h(270.0, 136.0, 338.0, 16.0),
        ],
        orbs: orbs(&[(440.0, 180.0)]),
        spikes: vec![
            spikes(330.0, 448.0, 32.0, 32.0),
            spikes(458.0, 448.0, 32.0, 32.0),
            escalator(32.0, 536.0, B * 10.0, 32.0),
            escalator(490.0, 536.0, B * 10.0, 32.0),
            spikes(260.0, 270.0, B * 16.0, 32.0),
            spikes(260.0, 164.0, 32.0, B * 3.0),
        ],
        slide_blocks: vec![SlideBlock::new(400.0, 238.0, 60.0, 32.0, 730.0)],
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_contiguous_and_terminates() {
        let catalog = BuiltinLevels;
        for index in 0..catalog.len() {
            assert!(catalog.get_level(index).is_some(), "level {index} missing");
        }
        assert!(catalog.get_level(catalog.len()).is_none());
        assert!(catalog.get_level(usize::MAX).is_none());
    }

    #[test]
    fn test_every_level_has_orbs_and_ground() {
        let catalog = BuiltinLevels;
        for index in 0..catalog.len() {
            let level = catalog.get_level(index).unwrap();
            assert!(!level.orbs.is_empty(), "level {index} has no orbs");
            assert!(
                level.blocks.iter().any(|b| b.kind == BlockKind::Floor),
                "level {index} has no floor"
            );
        }
    }

    #[test]
    fn test_each_load_builds_fresh_entities() {
        let catalog = BuiltinLevels;
        let mut first = catalog.get_level(0).unwrap();
        first.orbs[0].collect();
        let second = catalog.get_level(0).unwrap();
        assert!(!second.orbs[0].is_collected);
    }

    #[test]
    fn test_title_level_background() {
        let level = BuiltinLevels.get_level(2).unwrap();
        assert_eq!(level.background, BackgroundKind::Title);
        assert_eq!(BuiltinLevels.get_level(0).unwrap().background, BackgroundKind::Default);
    }

    #[test]
    fn test_vec_catalog() {
        let catalog = vec![LevelData::default()];
        assert!(catalog.get_level(0).is_some());
        assert!(catalog.get_level(1).is_none());
    }
}

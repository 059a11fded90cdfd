//! Level entities: blocks, orbs, spikes, slide blocks and buggers
//!
//! Each entity owns its hit rectangle and a little private motion or
//! animation state, advanced once per frame after collisions are resolved.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;
use crate::snap;

/// Block types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockKind {
    /// Solid ground, tested against the hero's landing rectangle
    Floor,
    /// Side wall: stops the hero horizontally
    WallVertical,
    /// Ceiling: stops the hero vertically
    WallHorizontal,
    /// Ground that fades away after the hero first lands on it
    FallingFloor,
}

impl BlockKind {
    /// Floors are tested with the landing rectangle, everything else with the body
    #[inline]
    pub fn uses_landing_rect(&self) -> bool {
        *self == BlockKind::Floor
    }
}

/// A static (or collapsing) rectangle of level geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub kind: BlockKind,
    /// Visual bounds
    pub rect: Rect,
    hit_rect: Rect,
    pub is_active: bool,
    /// Opacity; only decays for falling floors
    pub alpha: f32,
    /// Landed on at least once
    pub player_hit_once: bool,
}

impl Block {
    pub fn new(kind: BlockKind, x: f32, y: f32, width: f32, height: f32) -> Self {
        let rect = Rect::new(x, y, width, height);
        Self {
            kind,
            rect,
            hit_rect: rect,
            is_active: true,
            alpha: 1.0,
            player_hit_once: false,
        }
    }

    #[inline]
    pub fn hit_rect(&self) -> Rect {
        self.hit_rect
    }

    /// Record a landing. Starts the fade of a falling floor.
    pub fn strike(&mut self) {
        self.player_hit_once = true;
    }

    pub fn update(&mut self, dt: f32) {
        if self.kind != BlockKind::FallingFloor || !self.player_hit_once || self.alpha <= 0.0 {
            return;
        }
        self.alpha -= FALLING_FLOOR_DECAY * dt;
        if self.alpha <= 0.0 {
            self.alpha = 0.0;
            self.collapse();
        }
    }

    /// Stop being solid. The hit box moves up so a hero standing on it
    /// overlaps it and drops.
    fn collapse(&mut self) {
        log::debug!("Falling floor at ({}, {}) collapsed", self.rect.x, self.rect.y);
        self.is_active = false;
        self.hit_rect = self.hit_rect.shifted_y(-FALLING_FLOOR_SHIFT);
    }
}

/// A collectible orb
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Orb {
    /// Top-left of the sprite
    pub pos: Vec2,
    hit_rect: Rect,
    pub is_collected: bool,
    /// Post-collection flash progress
    pub collect_anim: f32,
    pub collect_anim_done: bool,
}

impl Orb {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            hit_rect: Rect::new(
                x + ORB_HIT_INSET,
                y + ORB_HIT_INSET,
                ORB_HIT_SIZE,
                ORB_HIT_SIZE,
            ),
            is_collected: false,
            collect_anim: 0.0,
            collect_anim_done: false,
        }
    }

    #[inline]
    pub fn hit_rect(&self) -> Rect {
        self.hit_rect
    }

    /// Mark collected. Returns true only the first time.
    pub fn collect(&mut self) -> bool {
        if self.is_collected {
            return false;
        }
        self.is_collected = true;
        true
    }

    pub fn update(&mut self, dt: f32) {
        if self.is_collected && !self.collect_anim_done {
            self.collect_anim += ORB_COLLECT_ANIM_SPEED * dt;
            if self.collect_anim >= ORB_COLLECT_ANIM_END {
                self.collect_anim_done = true;
                self.collect_anim = 0.0;
            }
        }
    }
}

/// Spike variants, resolved once at construction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SpikeKind {
    Static,
    /// Tiles scroll along the strip; purely visual
    Escalator { tile_offset: f32 },
}

/// A lethal strip of spikes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spike {
    pub kind: SpikeKind,
    /// Visual bounds
    pub rect: Rect,
    hit_rect: Rect,
    /// Points the other way (down for horizontal strips)
    pub flipped: bool,
}

impl Spike {
    pub fn new(kind: SpikeKind, x: f32, y: f32, width: f32, height: f32, flipped: bool) -> Self {
        Self {
            kind,
            rect: Rect::new(x, y, width, height),
            // Hit box is half the sprite height
            hit_rect: Rect::new(x, y, width, (height / 2.0).floor()),
            flipped,
        }
    }

    #[inline]
    pub fn hit_rect(&self) -> Rect {
        self.hit_rect
    }

    /// Vertical strips are drawn with rotated tiles
    pub fn tile_rotation(&self) -> Option<f32> {
        if self.rect.height > self.rect.width {
            Some(if self.flipped { -90.0 } else { 90.0 })
        } else {
            None
        }
    }

    pub fn tile_offset(&self) -> f32 {
        match self.kind {
            SpikeKind::Static => 0.0,
            SpikeKind::Escalator { tile_offset } => tile_offset,
        }
    }

    pub fn update(&mut self, dt: f32) {
        if let SpikeKind::Escalator { tile_offset } = &mut self.kind {
            *tile_offset += dt;
            if *tile_offset > ESCALATOR_PERIOD {
                *tile_offset = 0.0;
            }
        }
    }
}

/// A platform that ping-pongs between two x bounds each time it is toggled
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlideBlock {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub start_x: f32,
    /// Right bound of the rail (the block's right edge stops here)
    pub end_x: f32,
    pub target_x: f32,
    /// +1 heading to `start_x`, -1 heading to `end_x - width`
    pub direction: f32,
    pub is_moving: bool,
    hit_rect: Rect,
}

impl SlideBlock {
    pub fn new(x: f32, y: f32, width: f32, height: f32, end_x: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            width,
            height,
            start_x: x,
            end_x,
            target_x: x,
            direction: 1.0,
            is_moving: false,
            hit_rect: Rect::new(x, y, width, height),
        }
    }

    #[inline]
    pub fn hit_rect(&self) -> Rect {
        self.hit_rect
    }

    /// Far resting x (right bound minus width)
    #[inline]
    pub fn far_x(&self) -> f32 {
        self.end_x - self.width
    }

    /// Reverse direction and retarget the opposite bound
    pub fn toggle(&mut self) {
        self.direction = -self.direction;
        self.target_x = if self.direction > 0.0 {
            self.start_x
        } else {
            self.far_x()
        };
    }

    pub fn update(&mut self, dt: f32) {
        let at_rest = if self.direction > 0.0 {
            self.pos.x <= self.start_x
        } else {
            self.pos.x >= self.far_x()
        };
        if at_rest {
            self.is_moving = false;
            return;
        }

        let delta = self.target_x - self.pos.x;
        let max_move = SLIDE_BLOCK_SPEED * dt;
        if delta.abs() <= max_move {
            self.pos.x = snap(self.target_x);
        } else {
            self.pos.x += snap(delta.signum() * max_move);
        }

        self.is_moving = true;
        self.hit_rect = Rect::new(self.pos.x, self.pos.y, self.width, self.height);
    }
}

/// Bugger motion patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuggerKind {
    /// Sits at its spawn point
    Static,
    /// Circles its spawn point
    CircleSpin,
}

/// A small lethal critter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bugger {
    pub kind: BuggerKind,
    /// Orbit center
    pub center: Vec2,
    pub pos: Vec2,
    /// Orbit phase (radians)
    pub angle: f32,
    hit_rect: Rect,
}

impl Bugger {
    pub fn new(kind: BuggerKind, x: f32, y: f32, angle: f32) -> Self {
        let center = Vec2::new(x, y);
        Self {
            kind,
            center,
            pos: center,
            angle,
            hit_rect: Self::rect_at(center),
        }
    }

    fn rect_at(pos: Vec2) -> Rect {
        Rect::centered(pos, BUGGER_SIZE / 2.0, BUGGER_SIZE / 2.0)
    }

    #[inline]
    pub fn hit_rect(&self) -> Rect {
        self.hit_rect
    }

    /// Point on the orbit at `radius` for the current phase
    pub fn orbit_point(&self, radius: f32) -> Vec2 {
        let offset = Vec2::new(self.angle.cos(), self.angle.sin()) * radius;
        Vec2::new(snap(self.center.x + offset.x), snap(self.center.y + offset.y))
    }

    pub fn update(&mut self, dt: f32) {
        if self.kind == BuggerKind::CircleSpin {
            self.angle += BUGGER_ANGULAR_SPEED * dt;
            self.pos = self.orbit_point(BUGGER_ORBIT_RADIUS);
            self.hit_rect = Self::rect_at(self.pos);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_floor_never_fades() {
        let mut block = Block::new(BlockKind::Floor, 0.0, 500.0, 800.0, 32.0);
        block.strike();
        for _ in 0..500 {
            block.update(1.0);
        }
        assert!(block.is_active);
        assert_eq!(block.alpha, 1.0);
    }

    #[test]
    fn test_falling_floor_waits_for_first_strike() {
        let mut block = Block::new(BlockKind::FallingFloor, 580.0, 400.0, 100.0, 32.0);
        for _ in 0..500 {
            block.update(1.0);
        }
        assert!(block.is_active);
        assert_eq!(block.alpha, 1.0);
    }

    #[test]
    fn test_falling_floor_collapses_once() {
        let mut block = Block::new(BlockKind::FallingFloor, 580.0, 400.0, 100.0, 32.0);
        let original = block.hit_rect();
        block.strike();

        let mut last_alpha = block.alpha;
        let mut collapses = 0;
        for _ in 0..200 {
            let was_active = block.is_active;
            block.update(1.0);
            if was_active {
                assert!(block.alpha < last_alpha);
            }
            if was_active && !block.is_active {
                collapses += 1;
                assert_eq!(block.alpha, 0.0);
                assert_eq!(block.hit_rect().y, original.y - FALLING_FLOOR_SHIFT);
            }
            last_alpha = block.alpha;
        }
        assert_eq!(collapses, 1);
        assert!(!block.is_active);
        assert_eq!(block.alpha, 0.0);
        assert_eq!(block.hit_rect().y, original.y - FALLING_FLOOR_SHIFT);
        assert_eq!(block.rect, original);
    }

    #[test]
    fn test_orb_collect_is_idempotent() {
        let mut orb = Orb::new(200.0, 300.0);
        assert_eq!(orb.hit_rect(), Rect::new(203.0, 303.0, 10.0, 10.0));
        assert!(orb.collect());
        assert!(!orb.collect());
        assert!(orb.is_collected);
    }

    #[test]
    fn test_orb_flash_terminates() {
        let mut orb = Orb::new(0.0, 0.0);
        orb.update(1.0);
        assert_eq!(orb.collect_anim, 0.0);

        orb.collect();
        let mut frames = 0;
        while !orb.collect_anim_done {
            orb.update(1.0);
            frames += 1;
            assert!(frames < 20);
        }
        assert_eq!(orb.collect_anim, 0.0);
        orb.update(1.0);
        assert_eq!(orb.collect_anim, 0.0);
    }

    #[test]
    fn test_spike_hit_box_is_half_height() {
        let spike = Spike::new(SpikeKind::Static, 220.0, 440.0, 64.0, 33.0, false);
        assert_eq!(spike.hit_rect(), Rect::new(220.0, 440.0, 64.0, 16.0));
        assert_eq!(spike.tile_rotation(), None);

        let wall = Spike::new(SpikeKind::Static, 32.0, 72.0, 32.0, 448.0, true);
        assert_eq!(wall.tile_rotation(), Some(-90.0));
    }

    #[test]
    fn test_escalator_wraps_without_moving_hit_box() {
        let mut spike = Spike::new(
            SpikeKind::Escalator { tile_offset: 0.0 },
            0.0,
            500.0,
            320.0,
            32.0,
            false,
        );
        let hit = spike.hit_rect();
        let mut wrapped = false;
        for _ in 0..40 {
            spike.update(1.0);
            assert!(spike.tile_offset() <= ESCALATOR_PERIOD);
            if spike.tile_offset() == 0.0 {
                wrapped = true;
            }
        }
        assert!(wrapped);
        assert_eq!(spike.hit_rect(), hit);
    }

    #[test]
    fn test_slide_block_rests_until_toggled() {
        let mut block = SlideBlock::new(60.0, 460.0, 200.0, 32.0, 730.0);
        block.update(1.0);
        assert!(!block.is_moving);
        assert_eq!(block.pos.x, 60.0);
    }

    #[test]
    fn test_slide_block_toggle_alternates_targets() {
        let mut block = SlideBlock::new(60.0, 460.0, 200.0, 32.0, 730.0);
        block.toggle();
        assert_eq!(block.target_x, 530.0);
        block.toggle();
        assert_eq!(block.target_x, 60.0);
        block.toggle();
        assert_eq!(block.target_x, 530.0);
    }

    #[test]
    fn test_slide_block_travels_and_snaps() {
        let mut block = SlideBlock::new(60.0, 460.0, 200.0, 32.0, 730.0);
        block.toggle();

        block.update(1.0);
        assert!(block.is_moving);
        assert_eq!(block.pos.x, 70.0);
        assert_eq!(block.hit_rect().x, 70.0);

        for _ in 0..100 {
            block.update(1.0);
        }
        assert_eq!(block.pos.x, 530.0);
        assert!(!block.is_moving);
        assert_eq!(block.hit_rect().x, 530.0);
    }

    #[test]
    fn test_slide_block_reverses_mid_travel() {
        let mut block = SlideBlock::new(60.0, 460.0, 200.0, 32.0, 730.0);
        block.toggle();
        for _ in 0..5 {
            block.update(1.0);
        }
        assert_eq!(block.pos.x, 110.0);

        block.toggle();
        block.update(1.0);
        assert_eq!(block.pos.x, 100.0);
        assert!(block.is_moving);

        for _ in 0..20 {
            block.update(1.0);
        }
        assert_eq!(block.pos.x, 60.0);
        assert!(!block.is_moving);
    }

    #[test]
    fn test_bugger_orbits_spawn_point() {
        let mut bugger = Bugger::new(BuggerKind::CircleSpin, 378.0, 280.0, 0.0);
        assert_eq!(bugger.hit_rect(), Rect::new(366.0, 268.0, 24.0, 24.0));

        for _ in 0..40 {
            bugger.update(1.0);
            let dist = (bugger.pos - bugger.center).length();
            assert!((dist - BUGGER_ORBIT_RADIUS).abs() < 2.0);
            assert_eq!(bugger.hit_rect(), Rect::centered(bugger.pos, 12.0, 12.0));
        }
    }

    #[test]
    fn test_static_bugger_stays() {
        let mut bugger = Bugger::new(BuggerKind::Static, 100.0, 100.0, 0.0);
        bugger.update(1.0);
        assert_eq!(bugger.pos, Vec2::new(100.0, 100.0));
    }
}

//! The hero: flight, wall stops, landings, dash and death
//!
//! Position is private. Every move goes through [`Hero::move_to`], which
//! recomputes both hit rectangles; the collision resolver relies on them
//! always matching the current position.

use glam::Vec2;

use super::particle::{BloodParticle, ParticleRng};
use super::rect::Rect;
use super::signal::OneShot;
use super::trajectory::{Projectile, advance_progress};
use crate::consts::*;
use crate::tuning::Tuning;

/// Coarse hero state derived from its flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeroMode {
    /// Standing on a floor, no active curve
    Idle,
    /// Flying a gesture curve (or sagging before one starts)
    Jumping,
    /// Flying a synthetic dash curve
    Dashing,
    /// Stopped by a wall, dropping until it lands
    WallContact,
    /// Death burst playing, or finished and waiting for respawn
    Dead,
}

/// Where a wall stop snaps the hero to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WallSnap {
    /// Vertical wall: new x
    X(f32),
    /// Horizontal wall (ceiling): new y
    Y(f32),
}

/// What happened during one hero update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeroStep {
    /// A curve with a new id was picked up this frame
    pub jump_started: bool,
    /// The death burst finished this frame
    pub died: bool,
}

#[derive(Debug, Clone)]
pub struct Hero {
    pos: Vec2,
    body_rect: Rect,
    landing_rect: Rect,

    is_idle: bool,
    is_wall_hit: bool,
    is_alive: bool,
    is_dash_mode: bool,
    flip: bool,

    /// Progress along the active curve (not clamped)
    t_param: f32,
    projectile: Option<Projectile>,
    dash_projectile: Option<Projectile>,
    /// Captured when the dash is triggered
    dash_distance: f32,

    particles: Vec<BloodParticle>,
    died: OneShot<()>,
}

impl Hero {
    pub fn new(spawn: Vec2) -> Self {
        let mut hero = Self {
            pos: spawn,
            body_rect: Rect::default(),
            landing_rect: Rect::default(),
            is_idle: false,
            is_wall_hit: false,
            is_alive: true,
            is_dash_mode: false,
            flip: false,
            t_param: 0.0,
            projectile: None,
            dash_projectile: None,
            dash_distance: 0.0,
            particles: Vec::new(),
            died: OneShot::new(),
        };
        hero.move_to(spawn);
        hero
    }

    /// Move the hero and recompute its hit rectangles
    pub fn move_to(&mut self, pos: Vec2) {
        self.pos = pos;
        self.body_rect = Rect::centered(pos, HERO_BODY_HALF_WIDTH, HERO_BODY_HALF_HEIGHT);
        self.landing_rect = Rect::new(
            pos.x + HERO_LAND_OFFSET_X,
            pos.y + HERO_LAND_OFFSET_Y,
            HERO_LAND_WIDTH,
            HERO_LAND_HEIGHT,
        );
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.pos
    }

    /// Hit box for hazards, orbs, walls and falling floors
    #[inline]
    pub fn body_rect(&self) -> Rect {
        self.body_rect
    }

    /// Hit box for solid floors and slide blocks
    #[inline]
    pub fn landing_rect(&self) -> Rect {
        self.landing_rect
    }

    pub fn is_idle(&self) -> bool {
        self.is_idle
    }

    pub fn is_wall_hit(&self) -> bool {
        self.is_wall_hit
    }

    pub fn is_alive(&self) -> bool {
        self.is_alive
    }

    pub fn is_dash_mode(&self) -> bool {
        self.is_dash_mode
    }

    /// Facing left
    pub fn is_flipped(&self) -> bool {
        self.flip
    }

    pub fn t_param(&self) -> f32 {
        self.t_param
    }

    pub fn projectile(&self) -> Option<&Projectile> {
        self.projectile.as_ref()
    }

    pub fn dash_distance(&self) -> f32 {
        self.dash_distance
    }

    pub fn particles(&self) -> &[BloodParticle] {
        &self.particles
    }

    pub fn mode(&self) -> HeroMode {
        if !self.is_alive {
            HeroMode::Dead
        } else if self.is_idle {
            HeroMode::Idle
        } else if self.is_dash_mode {
            HeroMode::Dashing
        } else if self.is_wall_hit {
            HeroMode::WallContact
        } else {
            HeroMode::Jumping
        }
    }

    /// Enter or leave the idle state. Becoming idle drops the active curve.
    pub fn set_idle(&mut self, idle: bool) {
        if self.is_idle == idle {
            return;
        }
        self.is_idle = idle;
        if idle {
            self.reset();
        }
    }

    /// Clear flight state: curve, progress, dash flag and any pending died signal
    pub fn reset(&mut self) {
        self.t_param = 0.0;
        self.projectile = None;
        self.dash_projectile = None;
        self.is_dash_mode = false;
        self.died.disarm();
    }

    /// Stop against a wall. Ignored while already in wall contact.
    pub fn stop_at_wall(&mut self, snap: WallSnap) -> bool {
        if self.is_wall_hit {
            return false;
        }
        self.is_wall_hit = true;
        self.set_idle(false);
        let pos = match snap {
            WallSnap::X(x) => Vec2::new(x, self.pos.y),
            WallSnap::Y(y) => Vec2::new(self.pos.x, y),
        };
        self.move_to(pos);
        self.reset();
        true
    }

    /// Stand on a floor at height `y`
    pub fn land(&mut self, y: f32) {
        self.is_wall_hit = false;
        self.set_idle(true);
        self.move_to(Vec2::new(self.pos.x, y));
    }

    /// Switch to a dash, sized from the curve being flown
    pub fn perform_dash(&mut self) {
        self.dash_distance = self
            .projectile
            .as_ref()
            .map_or(0.0, Projectile::dash_distance);
        log::debug!("Dash triggered, distance {}", self.dash_distance);
        self.reset();
        self.is_dash_mode = true;
    }

    /// Kill the hero and spawn the death burst. Returns false if already dead.
    pub fn die(&mut self, rng: &mut ParticleRng) -> bool {
        if !self.is_alive {
            return false;
        }
        log::info!("Hero died at ({:.0}, {:.0})", self.pos.x, self.pos.y);
        self.is_alive = false;
        self.died.arm(());

        let origin = self.pos - Vec2::splat(DEATH_PARTICLE_OFFSET);
        self.particles.clear();
        self.particles
            .extend((0..DEATH_PARTICLE_COUNT).map(|_| BloodParticle::spawn(origin, rng)));
        true
    }

    /// Advance one frame.
    ///
    /// `gesture` is the latest curve produced by the controls, if any. While
    /// dashing it is ignored in favour of the synthetic dash curve.
    pub fn update(&mut self, dt: f32, gesture: Option<Projectile>, tuning: &Tuning) -> HeroStep {
        let mut step = HeroStep::default();

        if !self.is_alive {
            if !self.particles.is_empty() {
                for particle in &mut self.particles {
                    particle.update(dt);
                }
                self.particles.retain(|p| !p.is_spent());
            }
            if self.particles.is_empty() && self.died.fire().is_some() {
                log::info!("Death sequence complete");
                step.died = true;
            }
            return step;
        }

        let mut curve = gesture;
        if self.is_dash_mode {
            let dash = *self
                .dash_projectile
                .get_or_insert_with(|| Projectile::dash(self.pos, self.dash_distance, tuning));
            curve = Some(dash);
        }

        // Brief sag before a curve is consumed
        if !self.is_idle && self.t_param == 0.0 && !self.is_dash_mode {
            self.move_to(self.pos + Vec2::new(0.0, tuning.free_fall_speed * dt));
            return step;
        }

        let Some(curve) = curve else {
            return step;
        };

        step.jump_started = self.accept_projectile(curve);
        let Some(projectile) = self.projectile else {
            return step;
        };
        if self.is_idle {
            return step;
        }

        let speed = if self.is_dash_mode {
            tuning.dash_speed
        } else {
            tuning.jump_speed
        };
        self.t_param = advance_progress(self.t_param, speed, dt);
        self.flip = projectile.is_flipped();
        self.move_to(projectile.point_at(self.t_param));

        step
    }

    /// Start flying `curve` unless it is the one already in flight
    fn accept_projectile(&mut self, curve: Projectile) -> bool {
        if self.projectile.is_some_and(|p| p.id == curve.id) {
            return false;
        }
        self.set_idle(false);
        self.projectile = Some(curve);
        self.t_param = 0.0;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::trajectory::ProjectileId;

    fn idle_hero() -> Hero {
        let mut hero = Hero::new(Vec2::new(100.0, 544.0));
        hero.land(544.0);
        hero
    }

    fn jump(id: u64, p1x: f32) -> Projectile {
        Projectile::new(
            Vec2::new(100.0, 544.0),
            Vec2::new(p1x, 400.0),
            Vec2::new(100.0 + (p1x - 100.0) * 2.0, 600.0),
            ProjectileId(id),
        )
    }

    #[test]
    fn test_rects_follow_every_move() {
        let mut hero = Hero::new(Vec2::new(100.0, 200.0));
        assert_eq!(hero.body_rect(), Rect::new(88.0, 185.0, 24.0, 30.0));
        assert_eq!(hero.landing_rect(), Rect::new(92.0, 206.0, 16.0, 10.0));

        hero.move_to(Vec2::new(10.0, 20.0));
        assert_eq!(hero.body_rect(), Rect::new(-2.0, 5.0, 24.0, 30.0));
        assert_eq!(hero.landing_rect(), Rect::new(2.0, 26.0, 16.0, 10.0));
    }

    #[test]
    fn test_spawned_hero_sags() {
        let tuning = Tuning::default();
        let mut hero = Hero::new(Vec2::new(100.0, 200.0));
        assert_eq!(hero.mode(), HeroMode::Jumping);
        hero.update(1.0, None, &tuning);
        assert_eq!(hero.position(), Vec2::new(100.0, 210.0));
        assert_eq!(hero.body_rect().y, 195.0);
    }

    #[test]
    fn test_idle_hero_without_curve_stays_put() {
        let tuning = Tuning::default();
        let mut hero = idle_hero();
        let step = hero.update(1.0, None, &tuning);
        assert_eq!(step, HeroStep::default());
        assert_eq!(hero.position(), Vec2::new(100.0, 544.0));
        assert_eq!(hero.mode(), HeroMode::Idle);
    }

    #[test]
    fn test_new_curve_starts_jump_once() {
        let tuning = Tuning::default();
        let mut hero = idle_hero();
        let curve = jump(0, 160.0);

        let step = hero.update(1.0, Some(curve), &tuning);
        assert!(step.jump_started);
        assert_eq!(hero.mode(), HeroMode::Jumping);
        assert!((hero.t_param() - 0.016).abs() < 1e-6);

        // Same id again: progress continues, no second notification
        let step = hero.update(1.0, Some(curve), &tuning);
        assert!(!step.jump_started);
        assert!((hero.t_param() - 0.032).abs() < 1e-6);

        // A new id restarts the curve
        let step = hero.update(1.0, Some(jump(1, 160.0)), &tuning);
        assert!(step.jump_started);
        assert!((hero.t_param() - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_facing_follows_curve_direction() {
        let tuning = Tuning::default();
        let mut hero = idle_hero();
        hero.update(1.0, Some(jump(0, 40.0)), &tuning);
        assert!(hero.is_flipped());

        let mut hero = idle_hero();
        hero.update(1.0, Some(jump(0, 160.0)), &tuning);
        assert!(!hero.is_flipped());
    }

    #[test]
    fn test_progress_is_not_clamped() {
        let tuning = Tuning::default();
        let mut hero = idle_hero();
        let curve = jump(0, 160.0);
        for _ in 0..100 {
            hero.update(1.0, Some(curve), &tuning);
        }
        assert!(hero.t_param() > 1.0);
        assert!(hero.position().y > curve.p2.y);
    }

    #[test]
    fn test_landing_resets_flight() {
        let tuning = Tuning::default();
        let mut hero = idle_hero();
        hero.update(1.0, Some(jump(0, 160.0)), &tuning);
        hero.land(300.0);
        assert!(hero.is_idle());
        assert_eq!(hero.t_param(), 0.0);
        assert!(hero.projectile().is_none());
        assert_eq!(hero.position().y, 300.0);
        assert_eq!(hero.landing_rect().y, 306.0);
    }

    #[test]
    fn test_wall_stop_snaps_and_resets() {
        let tuning = Tuning::default();
        let mut hero = idle_hero();
        hero.update(1.0, Some(jump(0, 160.0)), &tuning);

        assert!(hero.stop_at_wall(WallSnap::X(50.0)));
        assert_eq!(hero.mode(), HeroMode::WallContact);
        assert_eq!(hero.position().x, 50.0);
        assert_eq!(hero.body_rect().x, 38.0);
        assert_eq!(hero.t_param(), 0.0);
        assert!(hero.projectile().is_none());

        // Second wall while still in contact is ignored
        assert!(!hero.stop_at_wall(WallSnap::Y(10.0)));
        assert_ne!(hero.position().y, 10.0);

        // Drops until it lands
        let y = hero.position().y;
        hero.update(1.0, None, &tuning);
        assert_eq!(hero.position().y, y + tuning.free_fall_speed);

        hero.land(500.0);
        assert!(!hero.is_wall_hit());
        assert!(hero.stop_at_wall(WallSnap::Y(40.0)));
        assert_eq!(hero.position().y, 40.0);
    }

    #[test]
    fn test_dash_uses_quarter_of_jump_width() {
        let tuning = Tuning::default();
        let mut hero = idle_hero();
        hero.update(1.0, Some(jump(0, 160.0)), &tuning);
        hero.perform_dash();
        assert!(hero.is_dash_mode());
        assert_eq!(hero.dash_distance(), 15.0);

        let start = hero.position();
        let step = hero.update(1.0, Some(jump(0, 160.0)), &tuning);
        assert!(step.jump_started);
        assert_eq!(hero.mode(), HeroMode::Dashing);
        let dash = *hero.projectile().unwrap();
        assert_eq!(dash.id, ProjectileId::DASH);
        assert_eq!(dash.p0, crate::snap_point(start));
        assert_eq!(dash.p1, dash.p0 + Vec2::new(15.0, -70.0));
        assert!((hero.t_param() - 0.06).abs() < 1e-6);

        // The dash curve is derived once
        let step = hero.update(1.0, None, &tuning);
        assert!(!step.jump_started);
        assert_eq!(*hero.projectile().unwrap(), dash);
    }

    #[test]
    fn test_dash_from_idle_without_curve_has_zero_distance() {
        let tuning = Tuning::default();
        let mut hero = idle_hero();
        hero.perform_dash();
        assert_eq!(hero.dash_distance(), 0.0);
        let step = hero.update(1.0, None, &tuning);
        assert!(step.jump_started);
        assert!(!hero.is_idle());
    }

    #[test]
    fn test_death_sequence() {
        let tuning = Tuning::default();
        let mut rng = ParticleRng::new(1);
        let mut hero = idle_hero();

        assert!(hero.die(&mut rng));
        assert_eq!(hero.particles().len(), DEATH_PARTICLE_COUNT);
        assert_eq!(hero.mode(), HeroMode::Dead);

        // Dying again does not add particles
        assert!(!hero.die(&mut rng));
        assert_eq!(hero.particles().len(), DEATH_PARTICLE_COUNT);

        let frozen = hero.position();
        let mut died_frames = 0;
        for _ in 0..100 {
            let step = hero.update(1.0, Some(jump(9, 160.0)), &tuning);
            if step.died {
                died_frames += 1;
                assert!(hero.particles().is_empty());
            } else if died_frames == 0 {
                assert!(!hero.particles().is_empty());
            }
        }
        assert_eq!(died_frames, 1);
        assert_eq!(hero.position(), frozen);
    }
}

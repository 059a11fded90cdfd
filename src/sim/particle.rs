//! Death burst particles
//!
//! Particle variance is drawn from an explicitly seeded generator so that a
//! given seed and input sequence always replays the same frames.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::{PARTICLE_MIN_SCALE, PARTICLE_SHRINK};

/// Seeded source of particle variance
#[derive(Debug, Clone)]
pub struct ParticleRng {
    seed: u64,
    rng: Pcg32,
}

impl ParticleRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Starting scale in [1, 3)
    pub fn scale(&mut self) -> f32 {
        self.rng.random_range(0.0..2.0) + 1.0
    }

    /// One velocity component in [-1.5, 1.5)
    pub fn speed(&mut self) -> f32 {
        self.rng.random_range(0.0..3.0) - 1.5
    }
}

/// One blood particle of the death burst
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BloodParticle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub scale: f32,
}

impl BloodParticle {
    pub fn spawn(pos: Vec2, rng: &mut ParticleRng) -> Self {
        let scale = rng.scale();
        let vel = Vec2::new(rng.speed(), rng.speed());
        Self { pos, vel, scale }
    }

    pub fn update(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        if self.scale > PARTICLE_MIN_SCALE {
            self.scale -= PARTICLE_SHRINK * dt;
        }
    }

    /// Shrunk far enough to be removed
    #[inline]
    pub fn is_spent(&self) -> bool {
        self.scale <= PARTICLE_MIN_SCALE
    }
}

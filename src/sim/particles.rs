//! Visual-only particles: explosion sparks and the background starfield
//!
//! Stars never fade and are recycled when they drift off the bottom, so the
//! starfield size is fixed for the whole run. Explosion sparks fade by a fixed
//! step per frame and are pruned on the sweep after they reach zero opacity.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::remove_marked;
use super::rng::RandomSource;
use super::state::{LILAC, Rgb, WHITE};
use crate::consts::*;

/// A single particle (circle, position is the center)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: Rgb,
    /// Always in [0, 1]
    pub opacity: f32,
    pub fades: bool,
}

impl Particle {
    pub fn advance(&mut self) {
        self.pos += self.vel;
        if self.fades {
            self.opacity = (self.opacity - PARTICLE_FADE_STEP).max(0.0);
        }
    }

    /// A faded-out spark waiting to be pruned
    pub fn is_spent(&self) -> bool {
        self.fades && self.opacity <= 0.0
    }
}

/// All live particles, in spawn order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParticlePool {
    particles: Vec<Particle>,
}

impl ParticlePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scatter `count` stars across the screen
    pub fn seed_starfield(&mut self, count: usize, bounds: Vec2, rng: &mut impl RandomSource) {
        self.particles.reserve(count);
        for _ in 0..count {
            let pos = Vec2::new(rng.range(0.0, bounds.x), rng.range(0.0, bounds.y));
            let radius = rng.range(0.0, STAR_MAX_RADIUS);
            self.particles.push(Particle {
                pos,
                vel: Vec2::new(0.0, STAR_SPEED),
                radius,
                color: WHITE,
                opacity: 1.0,
                fades: false,
            });
        }
    }

    /// Burst of fading sparks around `center`, lilac unless a color is given
    pub fn spawn_explosion(&mut self, center: Vec2, color: Option<Rgb>, rng: &mut impl RandomSource) {
        let color = color.unwrap_or(LILAC);
        for _ in 0..EXPLOSION_PARTICLES {
            let vel = Vec2::new(rng.range(-1.0, 1.0), rng.range(-1.0, 1.0));
            let radius = rng.range(0.0, EXPLOSION_MAX_RADIUS);
            self.particles.push(Particle {
                pos: center,
                vel,
                radius,
                color,
                opacity: 1.0,
                fades: true,
            });
        }
    }

    /// Advance every particle, recycle stars, prune spent sparks
    ///
    /// Sparks that were already at zero opacity before this sweep are removed
    /// instead of advanced. Returns the number pruned.
    pub fn advance(&mut self, bounds: Vec2, rng: &mut impl RandomSource) -> usize {
        let spent: Vec<bool> = self.particles.iter().map(Particle::is_spent).collect();

        for (particle, &skip) in self.particles.iter_mut().zip(&spent) {
            if skip {
                continue;
            }
            particle.advance();

            if !particle.fades && particle.pos.y - particle.radius >= bounds.y {
                particle.pos = Vec2::new(rng.range(0.0, bounds.x), rng.range(0.0, bounds.y));
            }
        }

        remove_marked(&mut self.particles, &spent)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Non-fading particles
    pub fn star_count(&self) -> usize {
        self.particles.iter().filter(|p| !p.fades).count()
    }

    /// Fading particles still alive
    pub fn spark_count(&self) -> usize {
        self.particles.iter().filter(|p| p.fades).count()
    }
}

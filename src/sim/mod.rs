//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed-order update per frame
//! - Injected RNG only
//! - Stable iteration order (construction order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod formation;
pub mod particles;
pub mod rng;
pub mod state;
pub mod tick;

pub use collision::{Aabb, enemy_shot_hits_player, remove_marked, shot_hits_unit, sweep};
pub use formation::{EnemyUnit, Formation, WaveTier};
pub use particles::{Particle, ParticlePool};
pub use rng::{RandomSource, ScriptedRng, SeededRng};
pub use state::{
    EnemyProjectile, GameEvent, GamePhase, GameState, Player, Projectile, Rgb, Sprite, SpriteKind,
};
pub use tick::{FireLatch, Movement, TickInput, resolve_movement, tick};

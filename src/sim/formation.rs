//! Enemy formations
//!
//! A formation is a grid of units sharing one velocity. It bounces off the
//! side walls, picking up a little extra downward speed on every bounce, so
//! each wave descends in an accelerating stair-step.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, remove_marked, shot_hits_unit};
use super::particles::ParticlePool;
use super::rng::RandomSource;
use super::state::{EnemyProjectile, GameEvent, Projectile, Sprite};
use crate::consts::*;

/// Difficulty tier used to size new formations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WaveTier {
    /// Columns in [5, 15), rows in [2, 7)
    Normal,
    /// Columns in [6, 16), rows in [3, 8)
    Veteran,
}

impl WaveTier {
    pub fn for_spawn_count(spawned: u32) -> Self {
        if spawned < VETERAN_TIER_AFTER {
            WaveTier::Normal
        } else {
            WaveTier::Veteran
        }
    }

    /// Half-open column range
    pub fn columns(&self) -> (u32, u32) {
        match self {
            WaveTier::Normal => (5, 15),
            WaveTier::Veteran => (6, 16),
        }
    }

    /// Half-open row range
    pub fn rows(&self) -> (u32, u32) {
        match self {
            WaveTier::Normal => (2, 7),
            WaveTier::Veteran => (3, 8),
        }
    }
}

/// A single enemy sprite
///
/// Units have no velocity of their own; the formation moves them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyUnit {
    pub pos: Vec2,
    /// Offset from the formation origin at construction
    pub grid_offset: Vec2,
    pub sprite: Sprite,
}

impl EnemyUnit {
    pub fn new(origin: Vec2, grid_offset: Vec2, sprite_size: Option<Vec2>) -> Self {
        Self {
            pos: origin + grid_offset,
            grid_offset,
            sprite: sprite_size.map_or(Sprite::Pending, |size| Sprite::Ready { size }),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.sprite.is_ready()
    }

    /// Sprite loaded: take its natural size and snap back onto the grid
    pub fn on_sprite_ready(&mut self, size: Vec2, origin: Vec2) {
        self.sprite = Sprite::Ready { size };
        self.pos = origin + self.grid_offset;
    }

    /// Move by the formation's step; no-op while pending
    pub fn advance(&mut self, shared_step: Vec2) {
        if self.is_ready() {
            self.pos += shared_step;
        }
    }

    pub fn aabb(&self) -> Option<Aabb> {
        self.sprite.size().map(|size| Aabb::from_pos_size(self.pos, size))
    }

    pub fn center(&self) -> Vec2 {
        self.aabb().map_or(self.pos, |hitbox| hitbox.center())
    }

    /// Drop a projectile centered under the unit's bottom edge
    pub fn fire(&self, sink: &mut Vec<EnemyProjectile>) {
        let Some(size) = self.sprite.size() else {
            return;
        };
        let muzzle = Vec2::new(
            self.pos.x + size.x / 2.0 - ENEMY_PROJECTILE_WIDTH / 2.0,
            self.pos.y + size.y,
        );
        sink.push(EnemyProjectile::new(muzzle));
    }
}

/// Where a formation's side effects land during an advance
pub struct Spawns<'a> {
    pub enemy_projectiles: &'a mut Vec<EnemyProjectile>,
    pub particles: &'a mut ParticlePool,
    pub events: &'a mut Vec<GameEvent>,
}

/// A grid of enemy units sharing one velocity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Formation {
    pub pos: Vec2,
    pub vel: Vec2,
    pub columns: u32,
    pub rows: u32,
    /// Grid extent, fixed at construction
    pub width: f32,
    pub height: f32,
    /// Column-major (low x, then low y)
    pub units: Vec<EnemyUnit>,
    cleared: bool,
}

impl Formation {
    /// Randomly sized formation for the given tier
    pub fn new(tier: WaveTier, sprite_size: Option<Vec2>, rng: &mut impl RandomSource) -> Self {
        let (col_lo, col_hi) = tier.columns();
        let (row_lo, row_hi) = tier.rows();
        let columns = rng.index(col_lo, col_hi);
        let rows = rng.index(row_lo, row_hi);
        Self::from_grid(columns, rows, sprite_size)
    }

    /// Formation at the origin with an explicit grid
    pub fn from_grid(columns: u32, rows: u32, sprite_size: Option<Vec2>) -> Self {
        let origin = Vec2::ZERO;
        let mut units = Vec::with_capacity((columns * rows) as usize);
        for x in 0..columns {
            for y in 0..rows {
                let offset = Vec2::new(x as f32, y as f32) * FORMATION_CELL;
                units.push(EnemyUnit::new(origin, offset, sprite_size));
            }
        }

        Self {
            pos: origin,
            vel: Vec2::new(FORMATION_START_SPEED, 0.0),
            columns,
            rows,
            width: columns as f32 * FORMATION_CELL,
            height: rows as f32 * FORMATION_CELL,
            units,
            cleared: false,
        }
    }

    /// True once every unit has been destroyed
    pub fn is_cleared(&self) -> bool {
        self.cleared
    }

    pub fn on_sprite_ready(&mut self, size: Vec2) {
        let origin = self.pos;
        for unit in self.units.iter_mut().filter(|u| !u.is_ready()) {
            unit.on_sprite_ready(size, origin);
        }
    }

    /// Advance one frame and resolve hits from player projectiles
    ///
    /// `spent` is parallel to `shots`; a projectile already marked there is
    /// ignored, and a projectile that destroys a unit is marked. Each unit
    /// takes the first unspent projectile that overlaps it, so neither a unit
    /// nor a projectile takes part in more than one kill per frame. Returns
    /// the number of units destroyed.
    pub fn advance(
        &mut self,
        bounds: Vec2,
        shots: &[Projectile],
        spent: &mut [bool],
        rng: &mut impl RandomSource,
        out: &mut Spawns<'_>,
    ) -> usize {
        debug_assert_eq!(shots.len(), spent.len());

        self.pos += self.vel;

        if self.pos.x <= 0.0 || self.pos.x + self.width > bounds.x {
            self.vel.x = -self.vel.x;
            self.vel.y += FORMATION_DESCENT_STEP;
        }

        // Units take the velocity as it stands after the bounce
        let step = self.vel;

        let mut destroyed = vec![false; self.units.len()];
        for (unit, doomed) in self.units.iter_mut().zip(destroyed.iter_mut()) {
            if !unit.is_ready() {
                continue;
            }
            unit.advance(step);

            if rng.next_unit() * 100.0 > ENEMY_FIRE_THRESHOLD {
                unit.fire(out.enemy_projectiles);
            }

            let Some(hitbox) = unit.aabb() else {
                continue;
            };
            let hit = shots
                .iter()
                .zip(spent.iter())
                .position(|(shot, &used)| !used && shot_hits_unit(shot, &hitbox));

            if let Some(index) = hit {
                spent[index] = true;
                *doomed = true;
                let center = unit.center();
                out.particles.spawn_explosion(center, None, rng);
                out.events.push(GameEvent::EnemyDestroyed { center });
            }
        }

        let removed = remove_marked(&mut self.units, &destroyed);
        if self.units.is_empty() {
            self.cleared = true;
        }
        removed
    }
}

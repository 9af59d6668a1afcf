//! Game state and core simulation types
//!
//! The loop owns every top-level collection; formations own their units.
//! Nothing here stores a reference to another entity.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::formation::{Formation, WaveTier};
use super::particles::ParticlePool;
use super::rng::{RandomSource, SeededRng};
use super::tick::{FireLatch, Movement};
use crate::consts::*;

/// Linear RGB color, each channel in [0, 1]
pub type Rgb = [f32; 3];

pub const WHITE: Rgb = [1.0, 1.0, 1.0];
/// Default explosion color (#BAA0DE)
pub const LILAC: Rgb = [186.0 / 255.0, 160.0 / 255.0, 222.0 / 255.0];

/// Sprite-backed entity kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteKind {
    Player,
    Enemy,
}

/// Load state of a sprite-backed entity
///
/// Pending entities are present but inert: they do not move, draw or collide.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Sprite {
    #[default]
    Pending,
    Ready { size: Vec2 },
}

impl Sprite {
    pub fn is_ready(&self) -> bool {
        matches!(self, Sprite::Ready { .. })
    }

    pub fn size(&self) -> Option<Vec2> {
        match self {
            Sprite::Ready { size } => Some(*size),
            Sprite::Pending => None,
        }
    }
}

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Normal play
    Playing,
    /// Player was hit; world keeps animating, input is ignored
    Over,
    /// Run finished; ticks do nothing
    Inactive,
}

/// Things the host may want to react to (sound, HUD, game-over screen)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    FormationSpawned { columns: u32, rows: u32, tier: WaveTier },
    EnemyDestroyed { center: Vec2 },
    FormationCleared,
    PlayerHit { center: Vec2 },
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub speed: f32,
    /// Tilt in radians, in [-PLAYER_TILT, PLAYER_TILT]
    pub rotation: f32,
    pub opacity: f32,
    pub sprite: Sprite,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            speed: PLAYER_SPEED,
            rotation: 0.0,
            opacity: 1.0,
            sprite: Sprite::Pending,
        }
    }
}

impl Player {
    pub fn is_ready(&self) -> bool {
        self.sprite.is_ready()
    }

    /// Drawn size, zero while the sprite is pending
    pub fn size(&self) -> Vec2 {
        self.sprite.size().unwrap_or(Vec2::ZERO)
    }

    /// Sprite finished loading: scale it and park the ship at the bottom center
    pub fn on_sprite_ready(&mut self, natural_size: Vec2, bounds: Vec2) {
        let size = natural_size * PLAYER_SPRITE_SCALE;
        self.sprite = Sprite::Ready { size };
        self.pos = Vec2::new(
            bounds.x / 2.0 - size.x / 2.0,
            bounds.y - size.y - PLAYER_BOTTOM_MARGIN,
        );
    }

    /// Apply a resolved movement state for the next advance
    pub fn set_movement(&mut self, movement: Movement) {
        let (vx, rotation) = match movement {
            Movement::Idle => (0.0, 0.0),
            Movement::Left => (-self.speed, -PLAYER_TILT),
            Movement::Right => (self.speed, PLAYER_TILT),
        };
        self.vel = Vec2::new(vx, 0.0);
        self.rotation = rotation;
    }

    /// Horizontal-only move; no-op until the sprite is ready
    pub fn advance(&mut self) {
        if !self.is_ready() {
            return;
        }
        self.pos.x += self.vel.x;
    }

    pub fn aabb(&self) -> Option<Aabb> {
        self.sprite.size().map(|size| Aabb::from_pos_size(self.pos, size))
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size() / 2.0
    }
}

/// A player-fired projectile (circle, position is the center)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Projectile {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::new(0.0, -PROJECTILE_SPEED),
            radius: PROJECTILE_RADIUS,
        }
    }

    pub fn advance(&mut self) {
        self.pos += self.vel;
    }

    /// Entirely above the top edge
    pub fn is_off_top(&self) -> bool {
        self.pos.y + self.radius <= 0.0
    }
}

/// An enemy-fired projectile (rect, position is the top-left corner)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyProjectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
}

impl EnemyProjectile {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::new(0.0, ENEMY_PROJECTILE_SPEED),
            size: Vec2::new(ENEMY_PROJECTILE_WIDTH, ENEMY_PROJECTILE_HEIGHT),
        }
    }

    pub fn advance(&mut self) {
        self.pos += self.vel;
    }

    pub fn is_below(&self, screen_height: f32) -> bool {
        self.pos.y >= screen_height
    }
}

/// Complete simulation state
///
/// Generic over its random source so tests can script every draw.
#[derive(Debug, Clone)]
pub struct GameState<R: RandomSource = SeededRng> {
    /// Current screen bounds (width, height), re-read every tick
    pub bounds: Vec2,
    /// Shared random source
    pub rng: R,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Ticks spent in `GamePhase::Over`
    pub over_ticks: u32,
    pub player: Player,
    /// Player projectiles in fire order
    pub projectiles: Vec<Projectile>,
    /// Enemy projectiles in fire order
    pub enemy_projectiles: Vec<EnemyProjectile>,
    /// Live formations, oldest first
    ///
    /// Only clearing removes a formation. One that descends past the bottom
    /// edge stays here (and keeps firing) for the rest of the run.
    pub formations: Vec<Formation>,
    pub particles: ParticlePool,
    pub fire_latch: FireLatch,
    /// Total formations spawned this run
    pub formations_spawned: u32,
    /// Jitter for the newest formation's spawn threshold, in [0, SPAWN_THRESHOLD_JITTER)
    pub spawn_jitter: f32,
    /// Natural enemy sprite size once it has loaded
    pub enemy_sprite: Option<Vec2>,
    pub(crate) events: Vec<GameEvent>,
}

impl GameState<SeededRng> {
    /// Create a new game with a seeded PCG source
    pub fn new(seed: u64, bounds: Vec2, star_count: usize) -> Self {
        Self::with_rng(SeededRng::new(seed), bounds, star_count)
    }
}

impl<R: RandomSource> GameState<R> {
    /// Create a new game around an explicit random source
    pub fn with_rng(mut rng: R, bounds: Vec2, star_count: usize) -> Self {
        let mut particles = ParticlePool::new();
        particles.seed_starfield(star_count, bounds, &mut rng);

        Self {
            bounds,
            rng,
            phase: GamePhase::Playing,
            time_ticks: 0,
            over_ticks: 0,
            player: Player::default(),
            projectiles: Vec::new(),
            enemy_projectiles: Vec::new(),
            formations: Vec::new(),
            particles,
            fire_latch: FireLatch::default(),
            formations_spawned: 0,
            spawn_jitter: 0.0,
            enemy_sprite: None,
            events: Vec::new(),
        }
    }

    /// Screen was resized; takes effect from the next tick
    pub fn resize(&mut self, width: f32, height: f32) {
        self.bounds = Vec2::new(width, height);
    }

    /// External "image loaded" callback
    pub fn sprite_ready(&mut self, kind: SpriteKind, natural_size: Vec2) {
        match kind {
            SpriteKind::Player => {
                self.player.on_sprite_ready(natural_size, self.bounds);
                log::debug!("Player sprite ready at {:?}", self.player.pos);
            }
            SpriteKind::Enemy => {
                self.enemy_sprite = Some(natural_size);
                for formation in &mut self.formations {
                    formation.on_sprite_ready(natural_size);
                }
            }
        }
    }

    /// Events raised since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// True once an enemy projectile has reached the player
    pub fn player_hit(&self) -> bool {
        self.phase != GamePhase::Playing
    }

    /// Spawn a projectile from the top center of the ship
    pub fn fire_projectile(&mut self) -> bool {
        if !self.player.is_ready() {
            return false;
        }
        let muzzle = Vec2::new(self.player.pos.x + self.player.size().x / 2.0, self.player.pos.y);
        self.projectiles.push(Projectile::new(muzzle));
        true
    }

    /// Spawn a new formation at the origin and draw its spawn-threshold jitter
    pub fn spawn_formation(&mut self) {
        let tier = WaveTier::for_spawn_count(self.formations_spawned);
        let formation = Formation::new(tier, self.enemy_sprite, &mut self.rng);
        self.spawn_jitter = self.rng.range(0.0, SPAWN_THRESHOLD_JITTER);
        self.formations_spawned += 1;

        log::debug!(
            "Formation {} spawned: {}x{} ({:?})",
            self.formations_spawned,
            formation.columns,
            formation.rows,
            tier
        );
        self.push_event(GameEvent::FormationSpawned {
            columns: formation.columns,
            rows: formation.rows,
            tier,
        });
        self.formations.push(formation);
    }

    /// Vertical position the newest formation must pass before the next spawn
    pub fn spawn_threshold(&self) -> f32 {
        (self.bounds.y / 2.0 - self.spawn_jitter).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::ScriptedRng;

    fn bounds() -> Vec2 {
        Vec2::new(800.0, 600.0)
    }

    #[test]
    fn test_new_state_has_starfield_only() {
        let state = GameState::new(1, bounds(), 100);
        assert_eq!(state.particles.star_count(), 100);
        assert_eq!(state.particles.len(), 100);
        assert!(state.formations.is_empty());
        assert!(state.projectiles.is_empty());
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(!state.player.is_ready());
    }

    #[test]
    fn test_player_sprite_ready_places_ship() {
        let mut state = GameState::with_rng(ScriptedRng::constant(0.5), bounds(), 0);
        state.sprite_ready(SpriteKind::Player, Vec2::new(400.0, 200.0));

        let size = state.player.size();
        assert!((size.x - 60.0).abs() < 1e-4);
        assert!((size.y - 30.0).abs() < 1e-4);
        assert!((state.player.pos.x - 370.0).abs() < 1e-4);
        assert!((state.player.pos.y - 550.0).abs() < 1e-4);
    }

    #[test]
    fn test_pending_player_is_inert() {
        let mut player = Player::default();
        player.set_movement(Movement::Right);
        player.advance();
        assert_eq!(player.pos, Vec2::ZERO);
        assert!(player.aabb().is_none());
    }

    #[test]
    fn test_player_movement_sets_tilt() {
        let mut player = Player::default();
        player.set_movement(Movement::Left);
        assert_eq!(player.vel.x, -PLAYER_SPEED);
        assert_eq!(player.rotation, -PLAYER_TILT);
        player.set_movement(Movement::Right);
        assert_eq!(player.rotation, PLAYER_TILT);
        player.set_movement(Movement::Idle);
        assert_eq!(player.vel, Vec2::ZERO);
        assert_eq!(player.rotation, 0.0);
    }

    #[test]
    fn test_fire_requires_ready_player() {
        let mut state = GameState::with_rng(ScriptedRng::constant(0.5), bounds(), 0);
        assert!(!state.fire_projectile());
        assert!(state.projectiles.is_empty());

        state.sprite_ready(SpriteKind::Player, Vec2::new(400.0, 200.0));
        assert!(state.fire_projectile());
        let shot = &state.projectiles[0];
        assert!((shot.pos.x - 400.0).abs() < 1e-4);
        assert_eq!(shot.pos.y, state.player.pos.y);
        assert_eq!(shot.vel, Vec2::new(0.0, -PROJECTILE_SPEED));
    }

    #[test]
    fn test_projectile_off_top() {
        assert!(Projectile::new(Vec2::new(10.0, -3.0)).is_off_top());
        assert!(Projectile::new(Vec2::new(10.0, -50.0)).is_off_top());
        assert!(!Projectile::new(Vec2::new(10.0, 0.1)).is_off_top());
    }

    #[test]
    fn test_enemy_projectile_below() {
        assert!(EnemyProjectile::new(Vec2::new(0.0, 600.0)).is_below(600.0));
        assert!(!EnemyProjectile::new(Vec2::new(0.0, 599.9)).is_below(600.0));
    }

    #[test]
    fn test_spawn_threshold_tracks_resize() {
        let mut state = GameState::with_rng(ScriptedRng::constant(0.5), bounds(), 0);
        state.spawn_formation();
        assert!((state.spawn_jitter - 75.0).abs() < 1e-3);
        assert!((state.spawn_threshold() - 225.0).abs() < 1e-3);

        state.resize(800.0, 1000.0);
        assert!((state.spawn_threshold() - 425.0).abs() < 1e-3);

        state.resize(800.0, 100.0);
        assert_eq!(state.spawn_threshold(), 0.0);
    }

    #[test]
    fn test_enemy_sprite_ready_wakes_pending_units() {
        let mut state = GameState::with_rng(ScriptedRng::constant(0.0), bounds(), 0);
        state.spawn_formation();
        assert!(state.formations[0].units.iter().all(|u| !u.is_ready()));

        state.sprite_ready(SpriteKind::Enemy, Vec2::new(30.0, 30.0));
        assert!(state.formations[0].units.iter().all(|u| u.is_ready()));

        // Formations spawned afterwards start ready
        state.spawn_formation();
        assert!(state.formations[1].units.iter().all(|u| u.is_ready()));
        assert_eq!(state.drain_events().len(), 2);
        assert!(state.events().is_empty());
    }
}

//! Star Raid - a fixed-tick arcade shooter simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, formations, collisions, game loop)
//! - `renderer`: Render-sink interface and a vertex-batch sink
//! - `settings`: JSON configuration for the headless runner

pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Player horizontal speed (pixels per frame)
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Player tilt while moving (radians)
    pub const PLAYER_TILT: f32 = 0.15;
    /// Player sprites are drawn at this fraction of their natural size
    pub const PLAYER_SPRITE_SCALE: f32 = 0.15;
    /// Gap between the player's bottom edge and the bottom of the screen
    pub const PLAYER_BOTTOM_MARGIN: f32 = 20.0;

    /// Player projectile radius and upward speed
    pub const PROJECTILE_RADIUS: f32 = 3.0;
    pub const PROJECTILE_SPEED: f32 = 10.0;

    /// Enemy projectile extent and downward speed
    pub const ENEMY_PROJECTILE_WIDTH: f32 = 3.0;
    pub const ENEMY_PROJECTILE_HEIGHT: f32 = 10.0;
    pub const ENEMY_PROJECTILE_SPEED: f32 = 3.0;
    /// A unit fires when a draw in [0, 100) exceeds this (~0.05% per frame)
    pub const ENEMY_FIRE_THRESHOLD: f32 = 99.95;

    /// Formation grid cell size
    pub const FORMATION_CELL: f32 = 30.0;
    /// Initial formation velocity (pixels per frame)
    pub const FORMATION_START_SPEED: f32 = 1.0;
    /// Added to a formation's downward speed on every wall bounce
    pub const FORMATION_DESCENT_STEP: f32 = 0.05;
    /// Formations spawned before the veteran tier kicks in
    pub const VETERAN_TIER_AFTER: u32 = 5;
    /// Maximum jitter subtracted from the half-screen spawn threshold
    pub const SPAWN_THRESHOLD_JITTER: f32 = 150.0;

    /// Particles per explosion batch
    pub const EXPLOSION_PARTICLES: usize = 15;
    /// Opacity lost per frame by fading particles
    pub const PARTICLE_FADE_STEP: f32 = 0.01;
    /// Upper bound (exclusive) of explosion particle radius
    pub const EXPLOSION_MAX_RADIUS: f32 = 3.0;
    /// Starfield drift speed and maximum star radius
    pub const STAR_SPEED: f32 = 0.3;
    pub const STAR_MAX_RADIUS: f32 = 2.0;
    /// Default starfield size
    pub const STAR_COUNT: usize = 100;

    /// Frames the world keeps animating after the player is hit
    pub const GAME_OVER_LINGER_FRAMES: u32 = 120;
}

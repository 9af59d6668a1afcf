//! Star Raid headless runner
//!
//! Plays one run with a scripted autopilot, renders every frame into a vertex
//! batch, and prints a JSON summary.

use serde::Serialize;

use star_raid::Settings;
use star_raid::renderer::{VertexBatch, draw_frame};
use star_raid::sim::{GameEvent, GamePhase, GameState, SpriteKind, TickInput, tick};

/// Frames spent sweeping in one direction
const SWEEP_FRAMES: u64 = 90;
/// Fire is tapped once every this many frames
const FIRE_PERIOD: u64 = 8;

#[derive(Debug, Default, Serialize)]
struct RunSummary {
    seed: u64,
    frames: u64,
    formations_spawned: u32,
    enemies_destroyed: u32,
    formations_cleared: u32,
    player_hit: bool,
    final_phase: Option<GamePhase>,
    live_formations: usize,
    live_projectiles: usize,
    live_enemy_projectiles: usize,
    particles: usize,
    last_frame_triangles: usize,
}

/// Sweep left and right across the screen while tapping fire
fn autopilot(frame: u64) -> TickInput {
    let leftward = (frame / SWEEP_FRAMES) % 2 == 0;
    TickInput {
        move_left: leftward,
        move_right: !leftward,
        fire: frame % FIRE_PERIOD == 0,
    }
}

fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };
    log::info!(
        "Star Raid starting: {}x{} seed {}",
        settings.screen_width,
        settings.screen_height,
        settings.seed
    );

    let mut state = GameState::new(settings.seed, settings.bounds(), settings.star_count);
    state.sprite_ready(SpriteKind::Player, settings.player_sprite_size());
    state.sprite_ready(SpriteKind::Enemy, settings.enemy_sprite_size());

    let mut batch = VertexBatch::new();
    let mut summary = RunSummary {
        seed: state.rng.seed(),
        ..Default::default()
    };

    for frame in 0..u64::from(settings.max_frames) {
        if state.phase == GamePhase::Inactive {
            break;
        }
        tick(&mut state, &autopilot(frame));
        summary.frames += 1;

        batch.clear();
        draw_frame(&state, &mut batch);

        for event in state.drain_events() {
            match event {
                GameEvent::FormationSpawned { columns, rows, tier } => {
                    log::debug!("Frame {}: {}x{} {:?} formation", frame, columns, rows, tier);
                }
                GameEvent::EnemyDestroyed { .. } => summary.enemies_destroyed += 1,
                GameEvent::FormationCleared => {
                    summary.formations_cleared += 1;
                    log::info!("Frame {}: formation cleared", frame);
                }
                GameEvent::PlayerHit { center } => {
                    summary.player_hit = true;
                    log::info!("Frame {}: player hit at {:?}", frame, center);
                }
            }
        }
    }

    summary.formations_spawned = state.formations_spawned;
    summary.final_phase = Some(state.phase);
    summary.live_formations = state.formations.len();
    summary.live_projectiles = state.projectiles.len();
    summary.live_enemy_projectiles = state.enemy_projectiles.len();
    summary.particles = state.particles.len();
    summary.last_frame_triangles = batch.triangle_count();

    let json = serde_json::to_string_pretty(&summary).map_err(std::io::Error::other)?;
    println!("{}", json);
    Ok(())
}

//! Fixed-order simulation tick
//!
//! One call advances the whole world by one frame:
//! 1. player
//! 2. particles (recycle stars, prune sparks)
//! 3. formations (collisions against player shots), prune cleared
//! 4. spawn cadence
//! 5. player projectiles, prune off the top
//! 6. enemy projectiles, prune off the bottom or on a player hit
//! 7. input intents for the next frame

use serde::{Deserialize, Serialize};

use super::collision::{enemy_shot_hits_player, remove_marked, sweep};
use super::formation::{Formation, Spawns};
use super::rng::RandomSource;
use super::state::{GameEvent, GamePhase, GameState, Player, WHITE};
use crate::consts::*;

/// Normalized input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Left intent (level-triggered)
    pub move_left: bool,
    /// Right intent (level-triggered)
    pub move_right: bool,
    /// Fire key currently held; turned into one pulse per press
    pub fire: bool,
}

/// Player movement state, re-derived from intents every frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Movement {
    #[default]
    Idle,
    Left,
    Right,
}

/// Edge trigger for the fire key
///
/// The latch stays set while the key is held, so only the first frame of a
/// press produces a pulse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FireLatch {
    held: bool,
}

impl FireLatch {
    /// Feed the current key level; true exactly on a fresh press
    pub fn pulse(&mut self, pressed: bool) -> bool {
        let fire = pressed && !self.held;
        self.held = pressed;
        fire
    }

    pub fn is_held(&self) -> bool {
        self.held
    }
}

/// Decide the player's movement for the next frame
///
/// Moves that would carry the ship past either screen edge are refused
/// rather than clamped afterwards.
pub fn resolve_movement(player: &Player, input: &TickInput, screen_width: f32) -> Movement {
    if !player.is_ready() || (input.move_left && input.move_right) {
        return Movement::Idle;
    }
    if input.move_left && player.pos.x - player.speed >= 0.0 {
        Movement::Left
    } else if input.move_right && player.pos.x + player.size().x + player.speed <= screen_width {
        Movement::Right
    } else {
        Movement::Idle
    }
}

/// Advance the game state by one frame
pub fn tick<R: RandomSource>(state: &mut GameState<R>, input: &TickInput) {
    if state.phase == GamePhase::Inactive {
        return;
    }
    state.time_ticks += 1;
    let bounds = state.bounds;

    // 1. Player
    state.player.advance();

    // 2. Particles
    state.particles.advance(bounds, &mut state.rng);

    // 3. Formations
    let mut spent = vec![false; state.projectiles.len()];
    {
        let mut spawns = Spawns {
            enemy_projectiles: &mut state.enemy_projectiles,
            particles: &mut state.particles,
            events: &mut state.events,
        };
        for formation in &mut state.formations {
            formation.advance(bounds, &state.projectiles, &mut spent, &mut state.rng, &mut spawns);
        }
    }
    remove_marked(&mut state.projectiles, &spent);

    let cleared = sweep(&mut state.formations, Formation::is_cleared);
    for _ in 0..cleared {
        log::debug!("Formation cleared at tick {}", state.time_ticks);
        state.push_event(GameEvent::FormationCleared);
    }

    // 4. Spawn cadence: newest formation must drop past a jittered half-screen line
    let spawn_due = match state.formations.last() {
        None => true,
        Some(newest) => newest.pos.y > state.spawn_threshold(),
    };
    if spawn_due {
        state.spawn_formation();
    }

    // 5. Player projectiles
    for shot in &mut state.projectiles {
        shot.advance();
    }
    sweep(&mut state.projectiles, |shot| shot.is_off_top());

    // 6. Enemy projectiles
    for shot in &mut state.enemy_projectiles {
        shot.advance();
    }
    let target = match state.phase {
        GamePhase::Playing => state.player.aabb(),
        _ => None,
    };
    let hits: Vec<bool> = state
        .enemy_projectiles
        .iter()
        .map(|shot| target.is_some_and(|player| enemy_shot_hits_player(shot, &player)))
        .collect();
    let marks: Vec<bool> = state
        .enemy_projectiles
        .iter()
        .zip(&hits)
        .map(|(shot, &hit)| hit || shot.is_below(bounds.y))
        .collect();
    remove_marked(&mut state.enemy_projectiles, &marks);

    if hits.contains(&true) {
        player_hit(state);
    }

    // 7. Intents for the next frame
    let fire = state.fire_latch.pulse(input.fire);
    match state.phase {
        GamePhase::Playing => {
            let movement = resolve_movement(&state.player, input, bounds.x);
            state.player.set_movement(movement);
            if fire {
                state.fire_projectile();
            }
        }
        GamePhase::Over => {
            state.player.set_movement(Movement::Idle);
            state.over_ticks += 1;
            if state.over_ticks >= GAME_OVER_LINGER_FRAMES {
                log::info!("Run finished after {} ticks", state.time_ticks);
                state.phase = GamePhase::Inactive;
            }
        }
        GamePhase::Inactive => {}
    }
}

/// Terminal hit: explode the ship, hide it and stop taking input
fn player_hit<R: RandomSource>(state: &mut GameState<R>) {
    let center = state.player.center();
    state.particles.spawn_explosion(center, Some(WHITE), &mut state.rng);
    state.player.opacity = 0.0;
    state.phase = GamePhase::Over;
    log::info!("Player hit at tick {} ({:.1}, {:.1})", state.time_ticks, center.x, center.y);
    state.push_event(GameEvent::PlayerHit { center });
}

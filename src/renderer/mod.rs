//! Render-sink interface
//!
//! The simulation never draws. After a tick the host walks the state with
//! `draw_frame` and each visible entity is handed to a `RenderSink` as a
//! plain `Drawable`. Sinks must not feed anything back into the simulation.

pub mod shapes;
pub mod vertex;

pub use shapes::VertexBatch;
pub use vertex::Vertex;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::state::{LILAC, Rgb, WHITE};
use crate::sim::{GameState, RandomSource, SpriteKind};

/// What to draw
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Sprite image, `position` is the top-left corner
    Sprite { kind: SpriteKind, size: Vec2 },
    /// Filled circle, `position` is the center
    Circle { radius: f32 },
    /// Filled rectangle, `position` is the top-left corner
    Rect { size: Vec2 },
}

/// One visible entity for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Drawable {
    pub shape: Shape,
    pub position: Vec2,
    /// Radians, about the shape's center
    pub rotation: f32,
    pub opacity: f32,
    /// Fill color (tint for sprites)
    pub color: Rgb,
}

impl Drawable {
    fn plain(shape: Shape, position: Vec2, color: Rgb) -> Self {
        Self {
            shape,
            position,
            rotation: 0.0,
            opacity: 1.0,
            color,
        }
    }
}

/// Receives drawables in paint order
pub trait RenderSink {
    fn draw(&mut self, item: &Drawable);
}

impl RenderSink for Vec<Drawable> {
    fn draw(&mut self, item: &Drawable) {
        self.push(*item);
    }
}

/// Player projectile color
pub const PROJECTILE_RED: Rgb = [1.0, 0.0, 0.0];

/// Emit every visible entity: particles, player, enemies, player shots, enemy shots
///
/// Pending sprites are skipped.
pub fn draw_frame<R: RandomSource>(state: &GameState<R>, sink: &mut impl RenderSink) {
    for particle in state.particles.iter() {
        sink.draw(&Drawable {
            opacity: particle.opacity,
            ..Drawable::plain(
                Shape::Circle {
                    radius: particle.radius,
                },
                particle.pos,
                particle.color,
            )
        });
    }

    let player = &state.player;
    if let Some(size) = player.sprite.size() {
        sink.draw(&Drawable {
            shape: Shape::Sprite {
                kind: SpriteKind::Player,
                size,
            },
            position: player.pos,
            rotation: player.rotation,
            opacity: player.opacity,
            color: WHITE,
        });
    }

    for formation in &state.formations {
        for unit in &formation.units {
            let Some(size) = unit.sprite.size() else {
                continue;
            };
            sink.draw(&Drawable::plain(
                Shape::Sprite {
                    kind: SpriteKind::Enemy,
                    size,
                },
                unit.pos,
                LILAC,
            ));
        }
    }

    for shot in &state.projectiles {
        sink.draw(&Drawable::plain(
            Shape::Circle { radius: shot.radius },
            shot.pos,
            PROJECTILE_RED,
        ));
    }

    for shot in &state.enemy_projectiles {
        sink.draw(&Drawable::plain(Shape::Rect { size: shot.size }, shot.pos, WHITE));
    }
}

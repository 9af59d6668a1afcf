//! Shape generation for 2D primitives, and a sink that batches them

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, colors, rgba, tint};
use super::{Drawable, RenderSink, Shape};
use crate::sim::SpriteKind;

/// Segments used for particle and projectile circles
pub const CIRCLE_SEGMENTS: u32 = 12;

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a rectangle rotated about its center
pub fn quad(top_left: Vec2, size: Vec2, rotation: f32, color: [f32; 4]) -> Vec<Vertex> {
    let center = top_left + size / 2.0;
    let half = size / 2.0;
    let rot = Vec2::from_angle(rotation);

    let corners = [
        Vec2::new(-half.x, -half.y),
        Vec2::new(half.x, -half.y),
        Vec2::new(half.x, half.y),
        Vec2::new(-half.x, half.y),
    ]
    .map(|corner| center + rot.rotate(corner));

    // Two triangles
    [0, 1, 2, 0, 2, 3]
        .into_iter()
        .map(|i| Vertex::new(corners[i].x, corners[i].y, color))
        .collect()
}

/// Collects one frame of drawables as a flat triangle list
#[derive(Debug, Clone, Default)]
pub struct VertexBatch {
    pub vertices: Vec<Vertex>,
    /// Drawables received since the last clear
    pub draw_calls: usize,
}

impl VertexBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset for the next frame, keeping the allocation
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.draw_calls = 0;
    }

    /// Raw bytes ready for a vertex buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }
}

impl RenderSink for VertexBatch {
    fn draw(&mut self, item: &Drawable) {
        self.draw_calls += 1;
        let color = rgba(item.color, item.opacity);

        let vertices = match item.shape {
            Shape::Circle { radius } => circle(item.position, radius, color, CIRCLE_SEGMENTS),
            Shape::Rect { size } => quad(item.position, size, item.rotation, color),
            Shape::Sprite { kind, size } => {
                let fill = match kind {
                    SpriteKind::Player => colors::PLAYER,
                    SpriteKind::Enemy => colors::ENEMY,
                };
                quad(
                    item.position,
                    size,
                    item.rotation,
                    rgba(tint(fill, item.color), item.opacity),
                )
            }
        };
        self.vertices.extend(vertices);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_vertex_count() {
        let verts = circle(Vec2::ZERO, 3.0, [1.0; 4], 8);
        assert_eq!(verts.len(), 24);
        assert_eq!(verts[0].position, [0.0, 0.0]);
        assert!((verts[1].position[0] - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_unrotated_quad_corners() {
        let verts = quad(Vec2::new(10.0, 20.0), Vec2::new(4.0, 6.0), 0.0, [1.0; 4]);
        assert_eq!(verts.len(), 6);
        let near = |v: &Vertex, x: f32, y: f32| {
            (v.position[0] - x).abs() < 1e-4 && (v.position[1] - y).abs() < 1e-4
        };
        assert!(near(&verts[0], 10.0, 20.0));
        assert!(near(&verts[2], 14.0, 26.0));
        assert!(near(&verts[5], 10.0, 26.0));
    }

    #[test]
    fn test_rotated_quad_keeps_center() {
        let verts = quad(Vec2::ZERO, Vec2::new(10.0, 10.0), 0.15, [1.0; 4]);
        // Triangles are 0,1,2 and 0,2,3
        let distinct = [verts[0], verts[1], verts[2], verts[5]];
        let center = distinct
            .iter()
            .fold(Vec2::ZERO, |acc, v| acc + Vec2::from(v.position))
            / 4.0;
        assert!((verts[0].position[0]).abs() > 1e-3);
        assert!((center - Vec2::splat(5.0)).length() < 1e-4);
    }

    #[test]
    fn test_batch_applies_opacity() {
        let mut batch = VertexBatch::new();
        batch.draw(&Drawable {
            shape: Shape::Circle { radius: 2.0 },
            position: Vec2::ZERO,
            rotation: 0.0,
            opacity: 0.25,
            color: [1.0, 0.0, 0.0],
        });
        assert_eq!(batch.draw_calls, 1);
        assert_eq!(batch.triangle_count(), CIRCLE_SEGMENTS as usize);
        assert!(batch.vertices.iter().all(|v| v.color == [1.0, 0.0, 0.0, 0.25]));
        assert_eq!(batch.as_bytes().len(), batch.vertices.len() * Vertex::STRIDE);

        batch.clear();
        assert!(batch.vertices.is_empty());
        assert_eq!(batch.draw_calls, 0);
    }
}

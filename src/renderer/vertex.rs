//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

use crate::sim::Rgb;

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    /// Byte stride of one vertex in a buffer
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
}

/// RGB plus opacity as straight (non-premultiplied) RGBA
pub fn rgba(color: Rgb, opacity: f32) -> [f32; 4] {
    [color[0], color[1], color[2], opacity.clamp(0.0, 1.0)]
}

/// Component-wise multiply
pub fn tint(color: Rgb, by: Rgb) -> Rgb {
    [color[0] * by[0], color[1] * by[1], color[2] * by[2]]
}

/// Placeholder fills for sprites when no texture is bound
pub mod colors {
    pub const PLAYER: [f32; 3] = [0.2, 0.8, 0.4];
    pub const ENEMY: [f32; 3] = [1.0, 1.0, 1.0];
}

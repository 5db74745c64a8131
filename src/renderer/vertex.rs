//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

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

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Convert 8-bit RGBA to a linear float color
pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> [f32; 4] {
    [
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        a as f32 / 255.0,
    ]
}

/// Colors for game elements
pub mod colors {
    use super::rgba;

    // Quiz map
    pub const QUIZ_BACKGROUND: [f32; 4] = rgba(30, 30, 30, 255);
    pub const WALL: [f32; 4] = rgba(100, 100, 100, 255);
    pub const QUESTION_BLOCK: [f32; 4] = rgba(255, 215, 0, 255);
    /// Player drawn as a plain rectangle (no sprite)
    pub const WALKER: [f32; 4] = rgba(255, 0, 0, 255);

    // Platformer
    pub const PLATFORMER_BACKGROUND: [f32; 4] = rgba(20, 20, 30, 255);
    pub const PLATFORM: [f32; 4] = rgba(150, 150, 150, 255);
    pub const ECHO_PASSABLE: [f32; 4] = rgba(100, 100, 100, 150);
    pub const ECHO_SOLID: [f32; 4] = rgba(100, 255, 100, 255);
    pub const RUNNER: [f32; 4] = rgba(50, 150, 255, 255);

    // Quiz popup
    pub const POPUP: [f32; 4] = rgba(240, 240, 240, 255);
    pub const POPUP_BORDER: [f32; 4] = rgba(0, 0, 0, 255);
    pub const BUTTON: [f32; 4] = rgba(200, 200, 200, 255);
    pub const BUTTON_HOVER: [f32; 4] = rgba(180, 180, 180, 255);
    pub const FEEDBACK_CORRECT: [f32; 4] = rgba(0, 150, 0, 255);
    pub const FEEDBACK_WRONG: [f32; 4] = rgba(255, 0, 0, 255);

    // High contrast overrides
    pub const HC_BACKGROUND: [f32; 4] = rgba(0, 0, 0, 255);
    pub const HC_SOLID: [f32; 4] = rgba(255, 255, 255, 255);
    pub const HC_PLAYER: [f32; 4] = rgba(255, 255, 0, 255);
}

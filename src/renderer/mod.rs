//! WebGPU rendering module
//!
//! The scene is a list of flat-colored rectangles built from `GameState`.
//! Text (questions, options, feedback) is left to the host page.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use shapes::{background, scene};
pub use vertex::Vertex;

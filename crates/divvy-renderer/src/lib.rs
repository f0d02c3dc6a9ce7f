// ABOUTME: GPU rendering for divvy.
// ABOUTME: Uses wgpu to paint split regions and divider strips as solid rectangles.

mod gpu;
mod rect_pipeline;
pub mod renderer;

pub use renderer::{Quad, RenderError, Renderer};

//! Render pipeline: pure projection of simulation state to pixels.
//!
//! `scene` is the platform-free description; `canvas` is the browser back
//! end that paints it.

pub mod scene;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;

//! Handwriting board: freehand strokes on a canvas, image upload, and text
//! recognition of the result.
//!
//! The painting pipeline is target independent; the DOM wiring only builds
//! for `wasm32`.

pub mod actions;
pub mod config;
pub mod geometry;
pub mod import;
pub mod recognize;
pub mod render;
pub mod smoothing;
pub mod state;
pub mod surface;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod net;

#[cfg(target_arch = "wasm32")]
pub use app::run;

#![deny(unsafe_code)]
//! Core of webgl-rect: draws one centered, solid-colored rectangle into a
//! WebGL canvas.
//!
//! Provides the `Rectangle` geometry, the `Surface` sizing traits,
//! `SceneConfig`, the `RenderError` taxonomy, and the `render` module with
//! shader compile/link helpers and the one-shot `mount` routine.

pub mod config;
pub mod error;
pub mod geometry;
pub mod render;
pub mod surface;

pub use config::SceneConfig;
pub use error::RenderError;
pub use geometry::{Rectangle, RectangleVertices};
pub use render::{mount, Gpu, Mounted, ShaderSources, ShaderStage};
pub use surface::{sync_backing_size, DrawingSurface, Surface};

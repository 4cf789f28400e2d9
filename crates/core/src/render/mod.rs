//! WebGL rendering for the rectangle scene.
//!
//! Everything here is written against the [`Gpu`] trait. With the `render`
//! feature enabled, `glow::Context` implements it and the same code drives a
//! real WebGL context.
//!
//! # Module overview
//!
//! - [`backend`] -- The `Gpu` trait and the GL enums it uses.
//! - [`sources`] -- Shader stages and the bundled GLSL pair.
//! - [`shader`] -- Shader compilation, linking, and error formatting.
//! - [`rectangle`] -- Rectangle upload into the bound array buffer.
//! - [`scene`] -- The one-shot mount routine and the objects it owns.

pub mod backend;
pub mod rectangle;
pub mod scene;
pub mod shader;
pub mod sources;

#[cfg(test)]
pub(crate) mod fake;

pub use backend::Gpu;
pub use rectangle::write_rectangle;
pub use scene::{draw_scene, mount, Locations, Mounted, Scene};
pub use shader::{compile_program, compile_shader, format_shader_error, link_program};
pub use sources::{ShaderSources, ShaderStage};

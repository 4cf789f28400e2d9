//! Shader stages and the bundled GLSL sources.
//!
//! Both stages are plain GLSL ES 1.00 assets under `shaders/`, embedded at
//! build time. GLSL ES 1.00 is accepted by WebGL1 and WebGL2 contexts alike.

use super::backend::{FRAGMENT_SHADER, VERTEX_SHADER};

/// Name of the per-vertex pixel-space position attribute.
pub const POSITION_ATTRIBUTE: &str = "a_position";

/// Name of the canvas-resolution uniform (pixels).
pub const RESOLUTION_UNIFORM: &str = "u_resolution";

/// Name of the RGBA fill-color uniform.
pub const COLOR_UNIFORM: &str = "u_color";

/// Vertex stage: maps pixel positions to clip space with Y pointing down.
pub const RECT_VERTEX_SHADER: &str = include_str!("../../shaders/rect.vert");

/// Fragment stage: fills with `u_color`.
pub const RECT_FRAGMENT_SHADER: &str = include_str!("../../shaders/rect.frag");

/// A programmable pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// The GL enum passed to `create_shader`.
    pub fn gl_type(self) -> u32 {
        match self {
            ShaderStage::Vertex => VERTEX_SHADER,
            ShaderStage::Fragment => FRAGMENT_SHADER,
        }
    }

    /// Lowercase stage name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        }
    }
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The source text for both stages of the rectangle program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSources {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSources {
    pub fn new(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }

    /// Source text for `stage`.
    pub fn get(&self, stage: ShaderStage) -> &str {
        match stage {
            ShaderStage::Vertex => &self.vertex,
            ShaderStage::Fragment => &self.fragment,
        }
    }
}

impl Default for ShaderSources {
    /// The bundled `rect.vert` / `rect.frag` pair.
    fn default() -> Self {
        Self::new(RECT_VERTEX_SHADER, RECT_FRAGMENT_SHADER)
    }
}

//! Error types for the webgl-rect core.

use thiserror::Error;

/// Errors that abort the mount routine.
///
/// Every variant is handled the same way at the mount boundary: it is
/// logged, partially created GL objects are released, and the canvas is
/// left cleared with nothing drawn.
#[derive(Debug, Clone, Error)]
pub enum RenderError {
    /// The surface could not produce a WebGL context.
    #[error("webgl context unavailable: {0}")]
    ContextUnavailable(String),

    /// A shader stage failed to compile.
    #[error("shader compile error ({stage}):\n{log}")]
    ShaderCompile {
        /// The shader stage that failed ("vertex" or "fragment").
        stage: String,
        /// Line-numbered source followed by the driver's info log.
        log: String,
    },

    /// The program failed to link.
    #[error("shader link error:\n{0}")]
    ProgramLink(String),

    /// An attribute used by the routine is not active in the linked program.
    #[error("attribute '{0}' not found in program")]
    MissingAttribute(String),

    /// A uniform used by the routine is not active in the linked program.
    #[error("uniform '{0}' not found in program")]
    MissingUniform(String),

    /// The vertex buffer could not be allocated.
    #[error("failed to create vertex buffer: {0}")]
    BufferCreate(String),

    /// The scene configuration was malformed or out of range.
    #[error("invalid scene config: {0}")]
    InvalidConfig(String),
}

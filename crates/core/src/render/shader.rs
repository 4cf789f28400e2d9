//! Shader compilation and program linking.
//!
//! Failures never panic: the partially created GL object is deleted and the
//! driver's info log is returned inside a [`RenderError`]. Compile errors
//! carry a line-numbered listing of the source so the driver's
//! `0:<line>` references can be read against it.

use std::fmt::Write as _;

use super::backend::Gpu;
use super::sources::{ShaderSources, ShaderStage};
use crate::error::RenderError;

/// Prefixes each line of `source` with a right-aligned line number and
/// appends the driver `log` after a blank line.
///
/// Either input may be empty; an empty side is simply left out.
pub fn format_shader_error(source: &str, log: &str) -> String {
    let line_count = source.lines().count();
    let width = line_count.max(1).to_string().len();

    let mut out = String::new();
    for (i, line) in source.lines().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        // Writing into a String cannot fail.
        let _ = write!(out, "{:>width$}: {line}", i + 1);
    }

    if !log.is_empty() {
        if !out.is_empty() {
            out.push_str("\n\n");
        }
        out.push_str(log);
    }
    out
}

/// Creates, sources and compiles one shader stage.
///
/// # Errors
///
/// Returns `RenderError::ShaderCompile` if the shader object cannot be
/// created or the source fails to compile. The shader is deleted first.
pub fn compile_shader<G: Gpu>(
    gl: &G,
    stage: ShaderStage,
    source: &str,
) -> Result<G::Shader, RenderError> {
    let shader = gl
        .create_shader(stage.gl_type())
        .map_err(|log| RenderError::ShaderCompile {
            stage: stage.name().to_string(),
            log,
        })?;

    gl.shader_source(shader, source);
    gl.compile_shader(shader);

    if gl.shader_compile_status(shader) {
        log::debug!("{stage} shader compiled");
        return Ok(shader);
    }

    let info_log = gl.shader_info_log(shader);
    gl.delete_shader(shader);
    Err(RenderError::ShaderCompile {
        stage: stage.name().to_string(),
        log: format_shader_error(source, &info_log),
    })
}

/// Links a compiled vertex and fragment shader into a program.
///
/// Both shaders are detached after the link attempt; the caller still owns
/// them and decides when to delete them.
///
/// # Errors
///
/// Returns `RenderError::ProgramLink` if the program cannot be created or
/// fails to link. A program that failed to link is deleted.
pub fn link_program<G: Gpu>(
    gl: &G,
    vertex: G::Shader,
    fragment: G::Shader,
) -> Result<G::Program, RenderError> {
    let program = gl.create_program().map_err(RenderError::ProgramLink)?;

    gl.attach_shader(program, vertex);
    gl.attach_shader(program, fragment);
    gl.link_program(program);
    gl.detach_shader(program, vertex);
    gl.detach_shader(program, fragment);

    if gl.program_link_status(program) {
        log::debug!("program linked");
        return Ok(program);
    }

    let info_log = gl.program_info_log(program);
    gl.delete_program(program);
    Err(RenderError::ProgramLink(info_log))
}

/// Compiles both stages of `sources` and links them.
///
/// Both stages are compiled before either result is checked. When both
/// fail, the fragment error is logged here at `error` level and the vertex
/// error is returned, so every failed stage reaches the console once the
/// caller logs what it got back. Shader objects are deleted once linking
/// has been attempted, whatever the outcome.
///
/// # Errors
///
/// Returns the first `ShaderCompile` error (vertex before fragment), or
/// `ProgramLink` if linking fails.
pub fn compile_program<G: Gpu>(
    gl: &G,
    sources: &ShaderSources,
) -> Result<G::Program, RenderError> {
    let compile = |stage: ShaderStage| compile_shader(gl, stage, sources.get(stage));
    let vertex = compile(ShaderStage::Vertex);
    let fragment = compile(ShaderStage::Fragment);

    let (vertex, fragment) = match (vertex, fragment) {
        (Ok(v), Ok(f)) => (v, f),
        (Err(e), Ok(f)) => {
            gl.delete_shader(f);
            return Err(e);
        }
        (Ok(v), Err(e)) => {
            gl.delete_shader(v);
            return Err(e);
        }
        (Err(e), Err(other)) => {
            log::error!("{other}");
            return Err(e);
        }
    };

    let linked = link_program(gl, vertex, fragment);
    gl.delete_shader(vertex);
    gl.delete_shader(fragment);
    linked
}

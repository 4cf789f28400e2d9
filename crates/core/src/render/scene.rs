//! The one-shot mount routine: compile, link, upload, draw.
//!
//! [`mount`] runs once when a canvas is attached. Each step depends on the
//! handles produced by the previous one and the first failure aborts the
//! rest, so a failed mount leaves the canvas with nothing drawn. Objects
//! created before the failure are deleted before the error is returned.

use super::backend::{Gpu, ARRAY_BUFFER, COLOR_BUFFER_BIT, FLOAT, TRIANGLES};
use super::rectangle::write_rectangle;
use super::shader::compile_program;
use super::sources::{ShaderSources, COLOR_UNIFORM, POSITION_ATTRIBUTE, RESOLUTION_UNIFORM};
use crate::config::{clamp_color, SceneConfig};
use crate::error::RenderError;
use crate::geometry::{Rectangle, RectangleVertices, COMPONENTS_PER_VERTEX, RECT_VERTEX_COUNT};
use crate::surface::{sync_backing_size, DrawingSurface, Surface};

/// Attribute and uniform locations of the linked rectangle program.
#[derive(Debug, Clone)]
pub struct Locations<U> {
    pub position: u32,
    pub resolution: U,
    pub color: U,
}

impl<U> Locations<U> {
    /// Looks up `a_position`, `u_resolution` and `u_color`.
    ///
    /// # Errors
    ///
    /// Returns `MissingAttribute` or `MissingUniform` naming the first
    /// variable the program does not expose (for example because the
    /// compiler optimized an unused uniform away).
    pub fn resolve<G>(gl: &G, program: G::Program) -> Result<Self, RenderError>
    where
        G: Gpu<UniformLocation = U>,
    {
        let position = gl
            .attrib_location(program, POSITION_ATTRIBUTE)
            .ok_or_else(|| RenderError::MissingAttribute(POSITION_ATTRIBUTE.to_string()))?;
        let uniform = |name: &str| {
            gl.uniform_location(program, name)
                .ok_or_else(|| RenderError::MissingUniform(name.to_string()))
        };

        Ok(Self {
            position,
            resolution: uniform(RESOLUTION_UNIFORM)?,
            color: uniform(COLOR_UNIFORM)?,
        })
    }
}

/// Everything a successful draw created or uploaded.
pub struct Scene<G: Gpu> {
    program: G::Program,
    buffer: G::Buffer,
    locations: Locations<G::UniformLocation>,
    rectangle: Rectangle,
    vertices: RectangleVertices,
    color: [f32; 4],
}

impl<G: Gpu> Scene<G> {
    pub fn program(&self) -> G::Program {
        self.program
    }

    pub fn buffer(&self) -> G::Buffer {
        self.buffer
    }

    pub fn locations(&self) -> &Locations<G::UniformLocation> {
        &self.locations
    }

    /// The rectangle that was drawn, in backing-store pixels.
    pub fn rectangle(&self) -> Rectangle {
        self.rectangle
    }

    /// The vertex data uploaded to the buffer.
    pub fn vertices(&self) -> &RectangleVertices {
        &self.vertices
    }

    /// The `u_color` value sent to the GPU, after clamping.
    pub fn color(&self) -> [f32; 4] {
        self.color
    }

    /// Unbinds and deletes the program and buffer.
    pub fn release(&self, gl: &G) {
        gl.use_program(None);
        gl.bind_buffer(ARRAY_BUFFER, None);
        gl.delete_buffer(self.buffer);
        gl.delete_program(self.program);
    }
}

/// A drawn canvas: owns its context and the scene's GL objects.
///
/// Dropping it releases the program and buffer, then the context.
pub struct Mounted<G: Gpu> {
    gl: G,
    scene: Scene<G>,
}

impl<G: Gpu> Mounted<G> {
    pub fn gl(&self) -> &G {
        &self.gl
    }

    pub fn scene(&self) -> &Scene<G> {
        &self.scene
    }
}

impl<G: Gpu> Drop for Mounted<G> {
    fn drop(&mut self) {
        log::debug!("releasing rectangle scene");
        self.scene.release(&self.gl);
    }
}

/// Acquires a context from `surface` and draws the configured rectangle.
///
/// A failure is logged once at `error` level before it is returned, so
/// callers that only need best-effort drawing can discard the error.
///
/// # Errors
///
/// - `InvalidConfig` if `config` fails validation (nothing is touched).
/// - `ContextUnavailable` if the surface cannot produce a context (no
///   shader is compiled and nothing is drawn).
/// - Any error from [`draw_scene`].
pub fn mount<S: DrawingSurface>(
    surface: &mut S,
    sources: &ShaderSources,
    config: &SceneConfig,
) -> Result<Mounted<S::Context>, RenderError> {
    let mounted = acquire_and_draw(surface, sources, config);
    if let Err(e) = &mounted {
        log::error!("{e}");
    }
    mounted
}

fn acquire_and_draw<S: DrawingSurface>(
    surface: &mut S,
    sources: &ShaderSources,
    config: &SceneConfig,
) -> Result<Mounted<S::Context>, RenderError> {
    config.validate()?;

    let gl = surface
        .create_context()
        .map_err(RenderError::ContextUnavailable)?;
    log::debug!("context acquired");

    let scene = draw_scene(&gl, surface, sources, config)?;
    Ok(Mounted { gl, scene })
}

/// Runs the draw sequence on an existing context.
///
/// Compiles and links the program, resolves its locations, creates and
/// binds the vertex buffer, syncs the backing store to the displayed size,
/// clears, sets uniforms and attribute layout, uploads the centered
/// rectangle and issues one `draw_arrays(TRIANGLES, 0, 6)`.
///
/// # Errors
///
/// `ShaderCompile`, `ProgramLink`, `MissingAttribute`, `MissingUniform` or
/// `BufferCreate`. Nothing is drawn in any of these cases.
pub fn draw_scene<G: Gpu, S: Surface + ?Sized>(
    gl: &G,
    surface: &mut S,
    sources: &ShaderSources,
    config: &SceneConfig,
) -> Result<Scene<G>, RenderError> {
    let program = compile_program(gl, sources)?;

    let locations = match Locations::resolve(gl, program) {
        Ok(locations) => locations,
        Err(e) => {
            gl.delete_program(program);
            return Err(e);
        }
    };

    let buffer = match gl.create_buffer() {
        Ok(buffer) => buffer,
        Err(reason) => {
            gl.delete_program(program);
            return Err(RenderError::BufferCreate(reason));
        }
    };
    gl.bind_buffer(ARRAY_BUFFER, Some(buffer));

    sync_backing_size(surface);
    let (width, height) = surface.backing_size();

    gl.viewport(0, 0, to_gl_size(width), to_gl_size(height));
    let [r, g, b, a] = config.clear_color;
    gl.clear_color(r, g, b, a);
    gl.clear(COLOR_BUFFER_BIT);

    gl.use_program(Some(program));
    gl.uniform_2_f32(&locations.resolution, width as f32, height as f32);

    gl.enable_vertex_attrib_array(locations.position);
    gl.bind_buffer(ARRAY_BUFFER, Some(buffer));
    gl.vertex_attrib_pointer_f32(
        locations.position,
        COMPONENTS_PER_VERTEX as i32,
        FLOAT,
        false,
        0,
        0,
    );

    let rectangle = Rectangle::centered(width, height, config.rect_width, config.rect_height);
    let vertices = write_rectangle(gl, &rectangle);

    let (color, clamped) = clamp_color(config.color);
    if clamped {
        log::warn!(
            "u_color {:?} is outside [0, 1]; drawing with {color:?}",
            config.color
        );
    }
    let [r, g, b, a] = color;
    gl.uniform_4_f32(&locations.color, r, g, b, a);

    gl.draw_arrays(TRIANGLES, 0, RECT_VERTEX_COUNT as i32);
    log::debug!("drew {rectangle:?} on {width}x{height} surface");

    Ok(Scene {
        program,
        buffer,
        locations,
        rectangle,
        vertices,
        color,
    })
}

fn to_gl_size(pixels: u32) -> i32 {
    i32::try_from(pixels).unwrap_or(i32::MAX)
}

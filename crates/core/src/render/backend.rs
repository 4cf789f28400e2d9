//! The GL calls the mount routine issues.
//!
//! [`Gpu`] names exactly the subset of WebGL that compiling, linking,
//! uploading and drawing one rectangle needs. `glow::Context` implements it
//! when the `render` feature is enabled; tests drive the same code through
//! a recording fake.

/// GL enum for `ARRAY_BUFFER`.
pub const ARRAY_BUFFER: u32 = 0x8892;
/// GL enum for `STATIC_DRAW`.
pub const STATIC_DRAW: u32 = 0x88E4;
/// GL enum for `FLOAT`.
pub const FLOAT: u32 = 0x1406;
/// GL enum for `TRIANGLES`.
pub const TRIANGLES: u32 = 0x0004;
/// GL enum for `COLOR_BUFFER_BIT`.
pub const COLOR_BUFFER_BIT: u32 = 0x0000_4000;
/// GL enum for `VERTEX_SHADER`.
pub const VERTEX_SHADER: u32 = 0x8B31;
/// GL enum for `FRAGMENT_SHADER`.
pub const FRAGMENT_SHADER: u32 = 0x8B30;

/// Minimal WebGL surface used by the renderer.
///
/// Handle types are opaque and owned by the context. Methods mirror the GL
/// entry points of the same name; creation calls report driver failures as
/// strings.
pub trait Gpu {
    type Shader: Copy;
    type Program: Copy;
    type Buffer: Copy;
    type UniformLocation: Clone;

    fn create_shader(&self, shader_type: u32) -> Result<Self::Shader, String>;
    fn shader_source(&self, shader: Self::Shader, source: &str);
    fn compile_shader(&self, shader: Self::Shader);
    fn shader_compile_status(&self, shader: Self::Shader) -> bool;
    fn shader_info_log(&self, shader: Self::Shader) -> String;
    fn delete_shader(&self, shader: Self::Shader);

    fn create_program(&self) -> Result<Self::Program, String>;
    fn attach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn detach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn link_program(&self, program: Self::Program);
    fn program_link_status(&self, program: Self::Program) -> bool;
    fn program_info_log(&self, program: Self::Program) -> String;
    fn use_program(&self, program: Option<Self::Program>);
    fn delete_program(&self, program: Self::Program);

    fn attrib_location(&self, program: Self::Program, name: &str) -> Option<u32>;
    fn uniform_location(&self, program: Self::Program, name: &str) -> Option<Self::UniformLocation>;

    fn create_buffer(&self) -> Result<Self::Buffer, String>;
    fn bind_buffer(&self, target: u32, buffer: Option<Self::Buffer>);
    fn buffer_data(&self, target: u32, data: &[u8], usage: u32);
    fn delete_buffer(&self, buffer: Self::Buffer);

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);
    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32);
    fn clear(&self, mask: u32);

    fn uniform_2_f32(&self, location: &Self::UniformLocation, x: f32, y: f32);
    fn uniform_4_f32(&self, location: &Self::UniformLocation, x: f32, y: f32, z: f32, w: f32);
    fn enable_vertex_attrib_array(&self, index: u32);
    fn vertex_attrib_pointer_f32(
        &self,
        index: u32,
        size: i32,
        data_type: u32,
        normalized: bool,
        stride: i32,
        offset: i32,
    );

    fn draw_arrays(&self, mode: u32, first: i32, count: i32);
}

#[cfg(feature = "render")]
mod glow_backend {
    use glow::HasContext;

    use super::Gpu;

    // SAFETY (all methods): glow marks raw GL entry points unsafe. Every
    // handle passed in was produced by this same context, and the routine
    // never uses a handle after deleting it.
    #[allow(unsafe_code)]
    impl Gpu for glow::Context {
        type Shader = glow::Shader;
        type Program = glow::Program;
        type Buffer = glow::Buffer;
        type UniformLocation = glow::UniformLocation;

        fn create_shader(&self, shader_type: u32) -> Result<Self::Shader, String> {
            unsafe { HasContext::create_shader(self, shader_type) }
        }

        fn shader_source(&self, shader: Self::Shader, source: &str) {
            unsafe { HasContext::shader_source(self, shader, source) }
        }

        fn compile_shader(&self, shader: Self::Shader) {
            unsafe { HasContext::compile_shader(self, shader) }
        }

        fn shader_compile_status(&self, shader: Self::Shader) -> bool {
            unsafe { self.get_shader_compile_status(shader) }
        }

        fn shader_info_log(&self, shader: Self::Shader) -> String {
            unsafe { self.get_shader_info_log(shader) }
        }

        fn delete_shader(&self, shader: Self::Shader) {
            unsafe { HasContext::delete_shader(self, shader) }
        }

        fn create_program(&self) -> Result<Self::Program, String> {
            unsafe { HasContext::create_program(self) }
        }

        fn attach_shader(&self, program: Self::Program, shader: Self::Shader) {
            unsafe { HasContext::attach_shader(self, program, shader) }
        }

        fn detach_shader(&self, program: Self::Program, shader: Self::Shader) {
            unsafe { HasContext::detach_shader(self, program, shader) }
        }

        fn link_program(&self, program: Self::Program) {
            unsafe { HasContext::link_program(self, program) }
        }

        fn program_link_status(&self, program: Self::Program) -> bool {
            unsafe { self.get_program_link_status(program) }
        }

        fn program_info_log(&self, program: Self::Program) -> String {
            unsafe { self.get_program_info_log(program) }
        }

        fn use_program(&self, program: Option<Self::Program>) {
            unsafe { HasContext::use_program(self, program) }
        }

        fn delete_program(&self, program: Self::Program) {
            unsafe { HasContext::delete_program(self, program) }
        }

        fn attrib_location(&self, program: Self::Program, name: &str) -> Option<u32> {
            unsafe { self.get_attrib_location(program, name) }
        }

        fn uniform_location(
            &self,
            program: Self::Program,
            name: &str,
        ) -> Option<Self::UniformLocation> {
            unsafe { self.get_uniform_location(program, name) }
        }

        fn create_buffer(&self) -> Result<Self::Buffer, String> {
            unsafe { HasContext::create_buffer(self) }
        }

        fn bind_buffer(&self, target: u32, buffer: Option<Self::Buffer>) {
            unsafe { HasContext::bind_buffer(self, target, buffer) }
        }

        fn buffer_data(&self, target: u32, data: &[u8], usage: u32) {
            unsafe { self.buffer_data_u8_slice(target, data, usage) }
        }

        fn delete_buffer(&self, buffer: Self::Buffer) {
            unsafe { HasContext::delete_buffer(self, buffer) }
        }

        fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
            unsafe { HasContext::viewport(self, x, y, width, height) }
        }

        fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
            unsafe { HasContext::clear_color(self, r, g, b, a) }
        }

        fn clear(&self, mask: u32) {
            unsafe { HasContext::clear(self, mask) }
        }

        fn uniform_2_f32(&self, location: &Self::UniformLocation, x: f32, y: f32) {
            unsafe { HasContext::uniform_2_f32(self, Some(location), x, y) }
        }

        fn uniform_4_f32(&self, location: &Self::UniformLocation, x: f32, y: f32, z: f32, w: f32) {
            unsafe { HasContext::uniform_4_f32(self, Some(location), x, y, z, w) }
        }

        fn enable_vertex_attrib_array(&self, index: u32) {
            unsafe { HasContext::enable_vertex_attrib_array(self, index) }
        }

        fn vertex_attrib_pointer_f32(
            &self,
            index: u32,
            size: i32,
            data_type: u32,
            normalized: bool,
            stride: i32,
            offset: i32,
        ) {
            unsafe {
                HasContext::vertex_attrib_pointer_f32(
                    self,
                    index,
                    size,
                    data_type,
                    normalized,
                    stride,
                    offset,
                )
            }
        }

        fn draw_arrays(&self, mode: u32, first: i32, count: i32) {
            unsafe { HasContext::draw_arrays(self, mode, first, count) }
        }
    }
}

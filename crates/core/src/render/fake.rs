//! Recording [`Gpu`] used by the unit tests.
//!
//! Every call is appended to a log that tests inspect. Compilation and
//! linking follow a few GLSL rules that are enough to exercise failure
//! paths: a shader compiles when it has a `void main()` and balanced
//! braces, and a program links when every `varying` the fragment stage
//! reads is declared by the vertex stage.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Once;

use super::backend::{Gpu, FRAGMENT_SHADER, VERTEX_SHADER};
use super::sources::{RECT_FRAGMENT_SHADER, RECT_VERTEX_SHADER};
use crate::surface::{DrawingSurface, Surface};

pub const VALID_VERTEX: &str = RECT_VERTEX_SHADER;
pub const VALID_FRAGMENT: &str = RECT_FRAGMENT_SHADER;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateShader(u32),
    ShaderSource(u32),
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram,
    AttachShader { program: u32, shader: u32 },
    DetachShader { program: u32, shader: u32 },
    LinkProgram(u32),
    UseProgram(Option<u32>),
    DeleteProgram(u32),
    CreateBuffer,
    BindBuffer { target: u32, buffer: Option<u32> },
    BufferData { target: u32, floats: Vec<f32>, usage: u32 },
    DeleteBuffer(u32),
    Viewport(i32, i32, i32, i32),
    ClearColor([f32; 4]),
    Clear(u32),
    Uniform2f(String, [f32; 2]),
    Uniform4f(String, [f32; 4]),
    EnableVertexAttribArray(u32),
    VertexAttribPointer {
        index: u32,
        size: i32,
        data_type: u32,
        normalized: bool,
        stride: i32,
        offset: i32,
    },
    DrawArrays { mode: u32, first: i32, count: i32 },
}

struct FakeShader {
    kind: u32,
    source: String,
    compiled: bool,
}

#[derive(Default)]
struct FakeProgram {
    attached: Vec<u32>,
    linked: bool,
    log: String,
    vertex_source: String,
    fragment_source: String,
}

#[derive(Default)]
struct FakeState {
    next_id: u32,
    shaders: HashMap<u32, FakeShader>,
    programs: HashMap<u32, FakeProgram>,
    buffers: Vec<u32>,
    calls: Vec<Call>,
    create_shader_error: Option<String>,
    create_buffer_error: Option<String>,
}

impl FakeState {
    fn alloc(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

/// Shared-state fake; clones observe the same call log.
#[derive(Clone, Default)]
pub struct FakeGpu {
    state: Rc<RefCell<FakeState>>,
}

impl FakeGpu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_create_shader(&self, reason: &str) {
        self.state.borrow_mut().create_shader_error = Some(reason.to_string());
    }

    pub fn fail_create_buffer(&self, reason: &str) {
        self.state.borrow_mut().create_buffer_error = Some(reason.to_string());
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.state.borrow().calls.iter().filter(|c| pred(c)).count()
    }

    pub fn draw_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::DrawArrays { .. }))
            .collect()
    }

    pub fn is_live_shader(&self, shader: u32) -> bool {
        self.state.borrow().shaders.contains_key(&shader)
    }

    pub fn is_live_program(&self, program: u32) -> bool {
        self.state.borrow().programs.contains_key(&program)
    }

    pub fn live_shader_count(&self) -> usize {
        self.state.borrow().shaders.len()
    }

    pub fn live_program_count(&self) -> usize {
        self.state.borrow().programs.len()
    }

    pub fn live_buffer_count(&self) -> usize {
        self.state.borrow().buffers.len()
    }

    fn record(&self, call: Call) {
        self.state.borrow_mut().calls.push(call);
    }
}

fn check_compiles(source: &str) -> Result<(), String> {
    if !source.contains("void main()") {
        return Err("ERROR: 0:1: syntax error: missing entry point 'main'".to_string());
    }
    let opens = source.matches('{').count();
    let closes = source.matches('}').count();
    if opens != closes {
        return Err(format!(
            "ERROR: 0:{}: syntax error: unbalanced braces",
            source.lines().count()
        ));
    }
    Ok(())
}

fn declared(source: &str, qualifier: &str) -> Vec<String> {
    source
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with(qualifier))
        .filter_map(|line| line.trim_end_matches(';').split_whitespace().last())
        .map(String::from)
        .collect()
}

impl Gpu for FakeGpu {
    type Shader = u32;
    type Program = u32;
    type Buffer = u32;
    type UniformLocation = String;

    fn create_shader(&self, shader_type: u32) -> Result<u32, String> {
        self.record(Call::CreateShader(shader_type));
        let mut state = self.state.borrow_mut();
        if let Some(reason) = state.create_shader_error.clone() {
            return Err(reason);
        }
        let id = state.alloc();
        state.shaders.insert(
            id,
            FakeShader {
                kind: shader_type,
                source: String::new(),
                compiled: false,
            },
        );
        Ok(id)
    }

    fn shader_source(&self, shader: u32, source: &str) {
        self.record(Call::ShaderSource(shader));
        if let Some(s) = self.state.borrow_mut().shaders.get_mut(&shader) {
            s.source = source.to_string();
        }
    }

    fn compile_shader(&self, shader: u32) {
        self.record(Call::CompileShader(shader));
        if let Some(s) = self.state.borrow_mut().shaders.get_mut(&shader) {
            s.compiled = check_compiles(&s.source).is_ok();
        }
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        self.state
            .borrow()
            .shaders
            .get(&shader)
            .is_some_and(|s| s.compiled)
    }

    fn shader_info_log(&self, shader: u32) -> String {
        self.state
            .borrow()
            .shaders
            .get(&shader)
            .and_then(|s| check_compiles(&s.source).err())
            .unwrap_or_default()
    }

    fn delete_shader(&self, shader: u32) {
        self.record(Call::DeleteShader(shader));
        self.state.borrow_mut().shaders.remove(&shader);
    }

    fn create_program(&self) -> Result<u32, String> {
        self.record(Call::CreateProgram);
        let mut state = self.state.borrow_mut();
        let id = state.alloc();
        state.programs.insert(id, FakeProgram::default());
        Ok(id)
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        self.record(Call::AttachShader { program, shader });
        if let Some(p) = self.state.borrow_mut().programs.get_mut(&program) {
            p.attached.push(shader);
        }
    }

    fn detach_shader(&self, program: u32, shader: u32) {
        self.record(Call::DetachShader { program, shader });
        if let Some(p) = self.state.borrow_mut().programs.get_mut(&program) {
            p.attached.retain(|s| *s != shader);
        }
    }

    fn link_program(&self, program: u32) {
        self.record(Call::LinkProgram(program));
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;
        let shaders = &state.shaders;
        let Some(p) = state.programs.get_mut(&program) else {
            return;
        };

        let stage = |kind: u32| {
            p.attached
                .iter()
                .filter_map(|id| shaders.get(id))
                .find(|s| s.kind == kind && s.compiled)
                .map(|s| s.source.clone())
        };
        let (Some(vs), Some(fs)) = (stage(VERTEX_SHADER), stage(FRAGMENT_SHADER)) else {
            p.linked = false;
            p.log = "ERROR: missing compiled vertex or fragment stage".to_string();
            return;
        };

        let written = declared(&vs, "varying ");
        let missing: Vec<String> = declared(&fs, "varying ")
            .into_iter()
            .filter(|v| !written.contains(v))
            .collect();

        p.linked = missing.is_empty();
        p.log = missing
            .iter()
            .map(|v| format!("ERROR: varying {v} not written by vertex shader"))
            .collect::<Vec<_>>()
            .join("\n");
        p.vertex_source = vs;
        p.fragment_source = fs;
    }

    fn program_link_status(&self, program: u32) -> bool {
        self.state
            .borrow()
            .programs
            .get(&program)
            .is_some_and(|p| p.linked)
    }

    fn program_info_log(&self, program: u32) -> String {
        self.state
            .borrow()
            .programs
            .get(&program)
            .map(|p| p.log.clone())
            .unwrap_or_default()
    }

    fn use_program(&self, program: Option<u32>) {
        self.record(Call::UseProgram(program));
    }

    fn delete_program(&self, program: u32) {
        self.record(Call::DeleteProgram(program));
        self.state.borrow_mut().programs.remove(&program);
    }

    fn attrib_location(&self, program: u32, name: &str) -> Option<u32> {
        let state = self.state.borrow();
        let p = state.programs.get(&program).filter(|p| p.linked)?;
        declared(&p.vertex_source, "attribute ")
            .iter()
            .position(|a| a == name)
            .map(|i| i as u32)
    }

    fn uniform_location(&self, program: u32, name: &str) -> Option<String> {
        let state = self.state.borrow();
        let p = state.programs.get(&program).filter(|p| p.linked)?;
        let found = declared(&p.vertex_source, "uniform ")
            .into_iter()
            .chain(declared(&p.fragment_source, "uniform "))
            .any(|u| u == name);
        found.then(|| name.to_string())
    }

    fn create_buffer(&self) -> Result<u32, String> {
        self.record(Call::CreateBuffer);
        let mut state = self.state.borrow_mut();
        if let Some(reason) = state.create_buffer_error.clone() {
            return Err(reason);
        }
        let id = state.alloc();
        state.buffers.push(id);
        Ok(id)
    }

    fn bind_buffer(&self, target: u32, buffer: Option<u32>) {
        self.record(Call::BindBuffer { target, buffer });
    }

    fn buffer_data(&self, target: u32, data: &[u8], usage: u32) {
        let floats = data
            .chunks_exact(4)
            .map(|c| f32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
            .collect();
        self.record(Call::BufferData {
            target,
            floats,
            usage,
        });
    }

    fn delete_buffer(&self, buffer: u32) {
        self.record(Call::DeleteBuffer(buffer));
        self.state.borrow_mut().buffers.retain(|b| *b != buffer);
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.record(Call::Viewport(x, y, width, height));
    }

    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        self.record(Call::ClearColor([r, g, b, a]));
    }

    fn clear(&self, mask: u32) {
        self.record(Call::Clear(mask));
    }

    fn uniform_2_f32(&self, location: &String, x: f32, y: f32) {
        self.record(Call::Uniform2f(location.clone(), [x, y]));
    }

    fn uniform_4_f32(&self, location: &String, x: f32, y: f32, z: f32, w: f32) {
        self.record(Call::Uniform4f(location.clone(), [x, y, z, w]));
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.record(Call::EnableVertexAttribArray(index));
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
        self.record(Call::VertexAttribPointer {
            index,
            size,
            data_type,
            normalized,
            stride,
            offset,
        });
    }

    fn draw_arrays(&self, mode: u32, first: i32, count: i32) {
        self.record(Call::DrawArrays { mode, first, count });
    }
}

thread_local! {
    static CAPTURED: RefCell<Option<Vec<(log::Level, String)>>> = const { RefCell::new(None) };
}

/// Logger that records into the calling thread's capture buffer, so tests
/// running in parallel only see their own records.
struct ThreadLogger;

impl log::Log for ThreadLogger {
    fn enabled(&self, _: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        CAPTURED.with(|captured| {
            if let Some(records) = captured.borrow_mut().as_mut() {
                records.push((record.level(), record.args().to_string()));
            }
        });
    }

    fn flush(&self) {}
}

static LOGGER: ThreadLogger = ThreadLogger;
static INSTALL_LOGGER: Once = Once::new();

/// Runs `f` and returns its result with every log record it emitted on this
/// thread.
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, Vec<(log::Level, String)>) {
    INSTALL_LOGGER.call_once(|| {
        // Only fails if another logger is installed, which tests never do.
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(log::LevelFilter::Trace);
    });

    CAPTURED.with(|captured| *captured.borrow_mut() = Some(Vec::new()));
    let result = f();
    let records = CAPTURED.with(|captured| captured.borrow_mut().take().unwrap_or_default());
    (result, records)
}

/// Number of `error`-level records in `records`.
pub fn error_count(records: &[(log::Level, String)]) -> usize {
    records
        .iter()
        .filter(|(level, _)| *level == log::Level::Error)
        .count()
}

/// Canvas stand-in whose context shares state with `gl`.
pub struct FakeSurface {
    pub display: (u32, u32),
    pub backing: (u32, u32),
    pub gl: FakeGpu,
    pub context_error: Option<String>,
}

impl FakeSurface {
    pub fn new(display: (u32, u32), backing: (u32, u32)) -> Self {
        Self {
            display,
            backing,
            gl: FakeGpu::new(),
            context_error: None,
        }
    }

    pub fn without_context(reason: &str) -> Self {
        Self {
            context_error: Some(reason.to_string()),
            ..Self::new((300, 150), (300, 150))
        }
    }
}

impl Surface for FakeSurface {
    fn display_size(&self) -> (u32, u32) {
        self.display
    }

    fn backing_size(&self) -> (u32, u32) {
        self.backing
    }

    fn set_backing_size(&mut self, width: u32, height: u32) {
        self.backing = (width, height);
    }
}

impl DrawingSurface for FakeSurface {
    type Context = FakeGpu;

    fn create_context(&self) -> Result<FakeGpu, String> {
        match &self.context_error {
            Some(reason) => Err(reason.clone()),
            None => Ok(self.gl.clone()),
        }
    }
}

//! `HtmlCanvasElement` as a drawing surface.

use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, WebGl2RenderingContext, WebGlRenderingContext};
use webgl_rect_core::{DrawingSurface, Surface};

/// A canvas element. The displayed size is its client (layout) size; the
/// backing size is its `width`/`height` attributes.
#[derive(Debug, Clone)]
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas }
    }

    /// Calls `getContext(kind)` and casts the result, treating a thrown
    /// exception like an unsupported context type.
    fn context<T: JsCast>(&self, kind: &str) -> Option<T> {
        match self.canvas.get_context(kind) {
            Ok(Some(ctx)) => ctx.dyn_into::<T>().ok(),
            Ok(None) => None,
            Err(e) => {
                log::debug!("getContext(\"{kind}\") threw: {e:?}");
                None
            }
        }
    }
}

impl Surface for CanvasSurface {
    fn display_size(&self) -> (u32, u32) {
        (
            self.canvas.client_width().max(0) as u32,
            self.canvas.client_height().max(0) as u32,
        )
    }

    fn backing_size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn set_backing_size(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }
}

impl DrawingSurface for CanvasSurface {
    type Context = glow::Context;

    /// Prefers WebGL2 and falls back to WebGL1; the bundled shaders are
    /// GLSL ES 1.00 and run on either.
    fn create_context(&self) -> Result<glow::Context, String> {
        if let Some(gl) = self.context::<WebGl2RenderingContext>("webgl2") {
            log::info!("using WebGL2 context");
            return Ok(glow::Context::from_webgl2_context(gl));
        }
        if let Some(gl) = self.context::<WebGlRenderingContext>("webgl") {
            log::info!("using WebGL1 context");
            return Ok(glow::Context::from_webgl1_context(gl));
        }
        Err("webgl is not supported by this browser".to_string())
    }
}

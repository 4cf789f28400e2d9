//! WASM bindings for webgl-rect.
//!
//! JavaScript mounts the scene on a canvas with [`mount`],
//! [`mount_with_config`] or [`mount_by_id`]. Each returns a
//! [`RectangleView`] that owns the WebGL context and the objects drawn with
//! it; calling `free()` on the view (or dropping it) releases them.
//!
//! Draw failures never throw: they are logged to the browser console and
//! the view reports `isDrawn() === false`.
#![cfg(target_arch = "wasm32")]

mod canvas;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlCanvasElement;
use webgl_rect_core::{Mounted, SceneConfig, ShaderSources, Surface};

pub use canvas::CanvasSurface;

/// Installs the panic hook and routes `log` output to the browser console.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info)
        .map_err(|e| JsValue::from_str(&format!("failed to init logger: {e}")))?;
    log::debug!("webgl-rect loaded");
    Ok(())
}

/// A canvas the rectangle scene was mounted on.
#[wasm_bindgen]
pub struct RectangleView {
    surface: CanvasSurface,
    mounted: Option<Mounted<glow::Context>>,
}

#[wasm_bindgen]
impl RectangleView {
    /// Whether the rectangle was drawn. `false` means the mount failed and
    /// the reason was logged.
    #[wasm_bindgen(js_name = isDrawn)]
    pub fn is_drawn(&self) -> bool {
        self.mounted.is_some()
    }

    /// Backing-store width in pixels.
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.surface.backing_size().0
    }

    /// Backing-store height in pixels.
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.surface.backing_size().1
    }

    /// The uploaded vertices as a flat `[x0, y0, x1, y1, ...]` array, or an
    /// empty array if nothing was drawn.
    pub fn vertices(&self) -> Vec<f32> {
        self.mounted
            .as_ref()
            .map(|m| m.scene().vertices().iter().flatten().copied().collect())
            .unwrap_or_default()
    }
}

/// Mounts the default scene (300x250, bundled shaders) on `canvas`.
#[wasm_bindgen]
pub fn mount(canvas: HtmlCanvasElement) -> RectangleView {
    mount_canvas(canvas, &SceneConfig::default())
}

/// Mounts a scene described by a JSON `SceneConfig` on `canvas`.
///
/// Only a malformed config throws; draw failures are logged.
#[wasm_bindgen(js_name = mountWithConfig)]
pub fn mount_with_config(
    canvas: HtmlCanvasElement,
    config_json: &str,
) -> Result<RectangleView, JsValue> {
    let config =
        SceneConfig::from_json(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(mount_canvas(canvas, &config))
}

/// Mounts the default scene on the canvas element with the given id.
#[wasm_bindgen(js_name = mountById)]
pub fn mount_by_id(id: &str) -> Result<RectangleView, JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("no document found")?;
    let canvas = document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("canvas '{id}' not found")))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| JsValue::from_str(&format!("element '{id}' is not a canvas")))?;
    Ok(mount(canvas))
}

fn mount_canvas(canvas: HtmlCanvasElement, config: &SceneConfig) -> RectangleView {
    let mut surface = CanvasSurface::new(canvas);
    // Failures are already logged by the core mount; the view just stays undrawn.
    let result = webgl_rect_core::mount(&mut surface, &ShaderSources::default(), config);
    let mounted = result.ok();
    if let Some(mounted) = &mounted {
        log::info!("drew {:?}", mounted.scene().rectangle());
    }
    RectangleView { surface, mounted }
}

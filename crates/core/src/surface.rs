//! Drawable surfaces and backing-store sizing.
//!
//! A surface has two sizes: the size it is displayed at (layout size) and
//! the size of its pixel backing store. WebGL renders into the backing
//! store, so the two are kept equal before drawing.

use crate::render::Gpu;

/// A surface with a displayed size and a resizable backing store.
pub trait Surface {
    /// Size the surface is laid out at, in CSS pixels.
    fn display_size(&self) -> (u32, u32);

    /// Size of the pixel backing store.
    fn backing_size(&self) -> (u32, u32);

    /// Resizes the pixel backing store.
    fn set_backing_size(&mut self, width: u32, height: u32);
}

/// A surface that can produce a graphics context to draw into it.
pub trait DrawingSurface: Surface {
    type Context: Gpu;

    /// Acquires a rendering context for this surface.
    ///
    /// # Errors
    ///
    /// Returns a description of why no context is available (for example,
    /// the browser does not support WebGL).
    fn create_context(&self) -> Result<Self::Context, String>;
}

/// Resizes the backing store to the displayed size when they differ.
///
/// Returns `true` if the backing store was resized. Calling this again with
/// an unchanged display size performs no further mutation.
pub fn sync_backing_size<S: Surface + ?Sized>(surface: &mut S) -> bool {
    let (display_w, display_h) = surface.display_size();
    if surface.backing_size() == (display_w, display_h) {
        return false;
    }

    log::debug!(
        "resizing backing store {:?} -> {display_w}x{display_h}",
        surface.backing_size()
    );
    surface.set_backing_size(display_w, display_h);
    true
}

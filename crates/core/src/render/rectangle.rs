//! Rectangle upload into the bound array buffer.

use super::backend::{Gpu, ARRAY_BUFFER, STATIC_DRAW};
use crate::geometry::{Rectangle, RectangleVertices};

/// Uploads the six vertices of `rect` into the buffer currently bound to
/// `ARRAY_BUFFER`, replacing its data store with a `STATIC_DRAW` one.
///
/// A buffer must already be bound. Returns the vertices that were written.
pub fn write_rectangle<G: Gpu>(gl: &G, rect: &Rectangle) -> RectangleVertices {
    let vertices = rect.vertices();
    gl.buffer_data(ARRAY_BUFFER, bytemuck::cast_slice(vertices.as_slice()), STATIC_DRAW);
    vertices
}

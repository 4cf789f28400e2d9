//! Rectangle geometry in pixel coordinates.
//!
//! A [`Rectangle`] is decomposed into two triangles (six vertices) that
//! together tile it. Coordinates are pixels with the origin at the top-left
//! of the canvas; the vertex shader maps them to clip space.

use glam::Vec2;

/// Number of vertices uploaded for one rectangle (two triangles).
pub const RECT_VERTEX_COUNT: usize = 6;

/// Components per vertex (x, y).
pub const COMPONENTS_PER_VERTEX: usize = 2;

/// Six `(x, y)` vertices describing two triangles that tile a rectangle.
pub type RectangleVertices = [[f32; COMPONENTS_PER_VERTEX]; RECT_VERTEX_COUNT];

/// An axis-aligned rectangle in pixel units. Fractional values are allowed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rectangle {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A rectangle of the given size whose center coincides with the center
    /// of a `canvas_width` x `canvas_height` surface.
    pub fn centered(canvas_width: u32, canvas_height: u32, width: f32, height: f32) -> Self {
        let center = Vec2::new(canvas_width as f32, canvas_height as f32) / 2.0;
        let origin = center - Vec2::new(width, height) / 2.0;
        Self::new(origin.x, origin.y, width, height)
    }

    /// Top-left and bottom-right corners.
    pub fn corners(&self) -> (Vec2, Vec2) {
        let min = Vec2::new(self.x, self.y);
        (min, min + Vec2::new(self.width, self.height))
    }

    /// The six vertices of the two triangles tiling this rectangle:
    /// `(x1,y1) (x2,y1) (x1,y2)` then `(x1,y2) (x2,y1) (x2,y2)`.
    pub fn vertices(&self) -> RectangleVertices {
        let (min, max) = self.corners();
        [
            [min.x, min.y],
            [max.x, min.y],
            [min.x, max.y],
            [min.x, max.y],
            [max.x, min.y],
            [max.x, max.y],
        ]
    }
}

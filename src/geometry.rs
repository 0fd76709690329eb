//! Axis-aligned bounding boxes and the overlap test every collision
//! check goes through.

/// An axis-aligned rectangle. `x`/`y` is the top-left corner, in canvas
/// units; y grows downward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// True iff the two rectangles overlap. The comparisons are strict, so
/// rectangles that merely touch along an edge do not collide.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.width
        && a.x + a.width > b.x
        && a.y < b.y + b.height
        && a.y + a.height > b.y
}

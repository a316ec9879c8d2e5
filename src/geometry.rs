/// Float rectangles in world pixels, on top of `glam::Vec2`.
///
/// Positions are kept as `f32` so fractional speeds (bombs, the UFO's
/// homing step) accumulate exactly; renderers round via [`Rect::rounded`].

pub use glam::Vec2;

/// Axis-aligned rectangle; `y` grows downward.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn top_left(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn with_center(w: f32, h: f32, center: Vec2) -> Self {
        Self::new(center.x - w / 2.0, center.y - h / 2.0, w, h)
    }

    pub fn with_bottom_left(w: f32, h: f32, left: f32, bottom: f32) -> Self {
        Self::new(left, bottom - h, w, h)
    }

    pub fn with_bottom_right(w: f32, h: f32, right: f32, bottom: f32) -> Self {
        Self::new(right - w, bottom - h, w, h)
    }

    pub fn with_top_right(w: f32, h: f32, right: f32, top: f32) -> Self {
        Self::new(right - w, top, w, h)
    }

    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.w, self.h)
    }

    /// Strict overlap: rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Integer rectangle for drawing.
    pub fn rounded(&self) -> (i32, i32, i32, i32) {
        (
            self.x.round() as i32,
            self.y.round() as i32,
            self.w.round() as i32,
            self.h.round() as i32,
        )
    }
}

/// Size of the bounding box of a `w`×`h` image rotated by `degrees`.
pub fn rotated_bounds(w: f32, h: f32, degrees: f32) -> (f32, f32) {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let (sin, cos) = (sin.abs(), cos.abs());
    (w * cos + h * sin, w * sin + h * cos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_contact_is_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
        assert!(a.intersects(&b.translated(-1.0, 0.0)));
    }

    #[test]
    fn zero_vector_has_no_direction() {
        assert_eq!(Vec2::ZERO.try_normalize(), None);
        let unit = Vec2::new(3.0, 4.0).try_normalize().unwrap();
        assert!((unit.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn quarter_turn_swaps_dimensions() {
        let (w, h) = rotated_bounds(40.0, 20.0, 90.0);
        assert!((w - 20.0).abs() < 1e-3);
        assert!((h - 40.0).abs() < 1e-3);
    }

    #[test]
    fn anchors_place_edges() {
        let r = Rect::with_bottom_right(100.0, 50.0, 800.0, 600.0);
        assert_eq!(r.right(), 800.0);
        assert_eq!(r.bottom(), 600.0);
        let c = Rect::with_center(10.0, 20.0, Vec2::new(5.0, 5.0));
        assert_eq!(c.top_left(), Vec2::new(0.0, -5.0));
    }
}

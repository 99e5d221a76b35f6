//! Screen ↔ field coordinate mapping for a mounted canvas.

use crate::field::FieldSize;
use kurbo::{Affine, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Maps field coordinates to screen coordinates.
///
/// The field is drawn into a client rectangle that may be scaled by the
/// host layout; pointer input is mapped back through the inverse so that
/// drawing stays pixel-accurate under any uniform or non-uniform scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    /// Screen position of the field origin.
    pub offset: Vec2,
    /// Screen pixels per field pixel, per axis.
    pub scale: Vec2,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl ViewTransform {
    /// Field coordinates equal screen coordinates.
    pub fn identity() -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: Vec2::new(1.0, 1.0),
        }
    }

    /// Uniform scale at an offset.
    pub fn new(offset: Vec2, scale: f64) -> Self {
        Self {
            offset,
            scale: Vec2::new(scale, scale),
        }
    }

    /// The transform that stretches `field` onto the on-screen `client` box.
    ///
    /// Degenerate client boxes fall back to a unit scale at the box origin.
    pub fn from_client_rect(client: Rect, field: FieldSize) -> Self {
        let sx = client.width() / field.w;
        let sy = client.height() / field.h;
        let valid = |s: f64| s.is_finite() && s > 0.0;
        Self {
            offset: Vec2::new(client.x0, client.y0),
            scale: Vec2::new(
                if valid(sx) { sx } else { 1.0 },
                if valid(sy) { sy } else { 1.0 },
            ),
        }
    }

    /// Whether pointer input can be mapped back to the field: the offset is
    /// finite and both scales are finite and non-zero.
    pub fn is_invertible(&self) -> bool {
        let usable = |s: f64| s.is_finite() && s != 0.0;
        self.offset.is_finite() && usable(self.scale.x) && usable(self.scale.y)
    }

    /// Field → screen.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale_non_uniform(self.scale.x, self.scale.y)
    }

    /// Screen → field.
    pub fn inverse_transform(&self) -> Affine {
        self.transform().inverse()
    }

    pub fn screen_to_field(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    pub fn field_to_screen(&self, field_point: Point) -> Point {
        self.transform() * field_point
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invertible() {
        assert!(ViewTransform::identity().is_invertible());
        assert!(ViewTransform::new(Vec2::new(10.0, 20.0), 0.5).is_invertible());
        assert!(!ViewTransform::new(Vec2::ZERO, 0.0).is_invertible());
        assert!(!ViewTransform::new(Vec2::ZERO, f64::NAN).is_invertible());
        let stretched = ViewTransform {
            offset: Vec2::new(f64::INFINITY, 0.0),
            scale: Vec2::new(1.0, 1.0),
        };
        assert!(!stretched.is_invertible());
    }

    fn approx(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn test_identity() {
        let view = ViewTransform::identity();
        let p = Point::new(150.0, 150.0);
        assert!(approx(view.screen_to_field(p), p));
    }

    #[test]
    fn test_scaled_client_rect() {
        // 600x800 field drawn at half size, 10px from the left edge.
        let client = Rect::new(10.0, 20.0, 310.0, 420.0);
        let view = ViewTransform::from_client_rect(client, FieldSize::default());
        assert!(approx(view.screen_to_field(Point::new(85.0, 95.0)), Point::new(150.0, 150.0)));
        assert!(approx(view.field_to_screen(Point::new(600.0, 800.0)), Point::new(310.0, 420.0)));
    }

    #[test]
    fn test_round_trip() {
        let view = ViewTransform::new(Vec2::new(-30.0, 12.5), 1.7);
        let p = Point::new(42.0, -7.0);
        assert!(approx(view.screen_to_field(view.field_to_screen(p)), p));
    }

    #[test]
    fn test_degenerate_client_rect() {
        let client = Rect::new(5.0, 5.0, 5.0, 5.0);
        let view = ViewTransform::from_client_rect(client, FieldSize::default());
        assert!(approx(view.screen_to_field(Point::new(6.0, 7.0)), Point::new(1.0, 2.0)));
    }
}

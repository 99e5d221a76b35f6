//! Rectangular areas: outlined rectangles and translucent zones.

use super::{ElementId, Rgba};
use kurbo::{Point, Rect, Vec2};
use uuid::Uuid;

/// An axis-aligned rectangle. Used for both the `Rect` and `Zone` elements.
#[derive(Debug, Clone, PartialEq)]
pub struct Area {
    pub(crate) id: ElementId,
    /// Top-left corner position.
    pub position: Point,
    pub width: f64,
    pub height: f64,
    pub color: Rgba,
}

impl Area {
    pub const DEFAULT_RECT_COLOR: Rgba = Rgba::opaque(0x11, 0x18, 0x27);
    pub const DEFAULT_ZONE_COLOR: Rgba = Rgba::opaque(0xf5, 0x9e, 0x0b);

    pub fn new(position: Point, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            width,
            height,
            color: Self::DEFAULT_RECT_COLOR,
        }
    }

    /// Create an area from two corner points.
    pub fn from_corners(p1: Point, p2: Point) -> Self {
        let min_x = p1.x.min(p2.x);
        let min_y = p1.y.min(p2.y);
        let width = (p2.x - p1.x).abs();
        let height = (p2.y - p1.y).abs();

        Self::new(Point::new(min_x, min_y), width, height)
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Get the area as a kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width,
            self.position.y + self.height,
        )
    }

    pub fn center(&self) -> Point {
        self.as_rect().center()
    }

    /// Hit anywhere inside (zones).
    pub fn hit_test_fill(&self, point: Point, tolerance: f64) -> bool {
        self.as_rect().inflate(tolerance, tolerance).contains(point)
    }

    /// Hit only on the border band (outlined rectangles).
    pub fn hit_test_outline(&self, point: Point, tolerance: f64, stroke_width: f64) -> bool {
        let band = tolerance + stroke_width / 2.0;
        let outer = self.as_rect().inflate(band, band);
        let inner = self.as_rect().inflate(-band, -band);
        outer.contains(point) && !(inner.width() > 0.0 && inner.height() > 0.0 && inner.contains(point))
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }
}

//! Player marker.

use super::{ElementId, Rgba};
use kurbo::{Point, Rect, Vec2};
use uuid::Uuid;

/// A circular player marker with a short text label.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub(crate) id: ElementId,
    /// Center of the marker.
    pub position: Point,
    /// Fill color.
    pub color: Rgba,
    /// Label drawn inside the marker (e.g. "QB").
    pub label: String,
    /// Marker radius in field pixels.
    pub radius: f64,
}

impl Player {
    pub const DEFAULT_RADIUS: f64 = 25.0;
    pub const DEFAULT_COLOR: Rgba = Rgba::opaque(0x25, 0x63, 0xeb);

    /// Create a new player with default styling.
    pub fn new(position: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            color: Self::DEFAULT_COLOR,
            label: String::new(),
            radius: Self::DEFAULT_RADIUS,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_center_size(self.position, (self.radius * 2.0, self.radius * 2.0))
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.position.distance(point) <= self.radius + tolerance
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }
}

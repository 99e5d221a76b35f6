//! Football marker.

use super::{ElementId, Rgba};
use kurbo::{Point, Rect, Vec2};
use uuid::Uuid;

/// The ball. Its laces and outline are render details, not state.
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub(crate) id: ElementId,
    /// Center of the ball.
    pub position: Point,
    /// Fill color.
    pub color: Rgba,
}

impl Ball {
    /// Horizontal half-extent of the drawn ball.
    pub const RADIUS_X: f64 = 12.0;
    /// Vertical half-extent of the drawn ball.
    pub const RADIUS_Y: f64 = 8.0;
    pub const DEFAULT_COLOR: Rgba = Rgba::opaque(0x8b, 0x45, 0x13);

    pub fn new(position: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            color: Self::DEFAULT_COLOR,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_center_size(self.position, (Self::RADIUS_X * 2.0, Self::RADIUS_Y * 2.0))
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.position.distance(point) <= Self::RADIUS_X + tolerance
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }
}

//! Straight route segments: arrows, plain lines and blocking lines.

use super::{ElementId, Rgba, point_to_segment_dist};
use kurbo::{Line as KurboLine, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stroke style for lines and arrows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dashed,
}

impl StrokeStyle {
    /// Cycle to the next stroke style.
    pub fn next(self) -> Self {
        match self {
            StrokeStyle::Solid => StrokeStyle::Dashed,
            StrokeStyle::Dashed => StrokeStyle::Solid,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StrokeStyle::Solid => "solid",
            StrokeStyle::Dashed => "dashed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "solid" => Some(StrokeStyle::Solid),
            "dashed" => Some(StrokeStyle::Dashed),
            _ => None,
        }
    }
}

/// A single straight segment. Used for both the `Arrow` and `Line` elements;
/// the arrowhead is a rendering distinction.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub(crate) id: ElementId,
    /// Start point (where the route begins).
    pub start: Point,
    /// End point (where the route ends; arrowheads and ticks are drawn here).
    pub end: Point,
    pub color: Rgba,
    pub stroke_style: StrokeStyle,
    /// Stroke thickness in field pixels.
    pub thickness: f64,
}

impl Line {
    pub const DEFAULT_THICKNESS: f64 = 3.0;
    pub const DEFAULT_COLOR: Rgba = Rgba::opaque(0x11, 0x18, 0x27);

    /// Create a new line.
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            color: Self::DEFAULT_COLOR,
            stroke_style: StrokeStyle::default(),
            thickness: Self::DEFAULT_THICKNESS,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Get the length of the line.
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    /// Get the midpoint of the line.
    pub fn midpoint(&self) -> Point {
        self.start.midpoint(self.end)
    }

    /// Get as a kurbo Line.
    pub fn as_kurbo(&self) -> KurboLine {
        KurboLine::new(self.start, self.end)
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_points(self.start, self.end)
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        point_to_segment_dist(point, self.start, self.end) <= tolerance + self.thickness / 2.0
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.start += delta;
        self.end += delta;
    }
}

/// A blocking line: a segment ending in a short perpendicular tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Perpendicular {
    pub line: Line,
    /// Full length of the tick drawn across the end point.
    pub tick: f64,
}

impl Perpendicular {
    pub const DEFAULT_TICK: f64 = 12.0;

    pub fn new(start: Point, end: Point) -> Self {
        Self {
            line: Line::new(start, end),
            tick: Self::DEFAULT_TICK,
        }
    }

    pub fn id(&self) -> ElementId {
        self.line.id
    }

    /// The tick segment, centered on the end point and normal to the line.
    /// Degenerate (zero-length) lines have no direction and yield `None`.
    pub fn tick_segment(&self) -> Option<KurboLine> {
        let dir = self.line.end - self.line.start;
        let len = dir.hypot();
        if len < f64::EPSILON {
            return None;
        }
        let normal = Vec2::new(-dir.y / len, dir.x / len) * (self.tick / 2.0);
        Some(KurboLine::new(self.line.end - normal, self.line.end + normal))
    }

    pub fn bounds(&self) -> Rect {
        match self.tick_segment() {
            Some(tick) => self.line.bounds().union(Rect::from_points(tick.p0, tick.p1)),
            None => self.line.bounds(),
        }
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        if self.line.hit_test(point, tolerance) {
            return true;
        }
        self.tick_segment().is_some_and(|tick| {
            point_to_segment_dist(point, tick.p0, tick.p1) <= tolerance + self.line.thickness / 2.0
        })
    }
}

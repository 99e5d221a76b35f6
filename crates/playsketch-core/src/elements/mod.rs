//! Element definitions for the play field.

mod area;
mod ball;
mod color;
mod line;
mod normalize;
mod player;

pub use area::Area;
pub use ball::Ball;
pub use color::Rgba;
pub use line::{Line, Perpendicular, StrokeStyle};
pub use normalize::normalize_value;
pub use player::Player;

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Value, json};
use uuid::Uuid;

/// Unique identifier for elements.
pub type ElementId = Uuid;

/// Stroke width used when hit-testing outlined rectangles.
pub const RECT_STROKE_WIDTH: f64 = 2.0;

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = a + seg * t;
    point.distance(proj)
}

/// The `type` discriminator of every known element variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Player,
    Ball,
    Arrow,
    Line,
    Perpendicular,
    Rect,
    Zone,
}

impl ElementKind {
    /// Tag written to JSON.
    pub fn tag(self) -> &'static str {
        match self {
            ElementKind::Player => "player",
            ElementKind::Ball => "ball",
            ElementKind::Arrow => "arrow",
            ElementKind::Line => "line",
            ElementKind::Perpendicular => "perp",
            ElementKind::Rect => "rect",
            ElementKind::Zone => "zone",
        }
    }

    /// Parse a tag. Accepts the long spelling of the blocking line as well.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "player" => Some(ElementKind::Player),
            "ball" => Some(ElementKind::Ball),
            "arrow" => Some(ElementKind::Arrow),
            "line" => Some(ElementKind::Line),
            "perp" | "perpendicular" => Some(ElementKind::Perpendicular),
            "rect" => Some(ElementKind::Rect),
            "zone" => Some(ElementKind::Zone),
            _ => None,
        }
    }

    /// Arrow, Line and Perpendicular.
    pub fn is_line_like(self) -> bool {
        matches!(
            self,
            ElementKind::Arrow | ElementKind::Line | ElementKind::Perpendicular
        )
    }
}

/// An element whose `type` tag is not recognized.
///
/// The raw JSON is kept verbatim so that documents written by newer
/// versions survive a load/save cycle. Such elements are never drawn,
/// hit or snapped to.
#[derive(Debug, Clone)]
pub struct UnknownElement {
    pub(crate) id: ElementId,
    pub raw: Value,
}

// The id of an unknown element is session-local unless the raw JSON carried
// a valid one, so equality is decided by content alone.
impl PartialEq for UnknownElement {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

/// Every drawable thing on the field.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Player(Player),
    Ball(Ball),
    Arrow(Line),
    Line(Line),
    Perpendicular(Perpendicular),
    Rect(Area),
    Zone(Area),
    Unknown(UnknownElement),
}

impl Element {
    pub fn id(&self) -> ElementId {
        match self {
            Element::Player(p) => p.id,
            Element::Ball(b) => b.id,
            Element::Arrow(l) | Element::Line(l) => l.id,
            Element::Perpendicular(p) => p.line.id,
            Element::Rect(a) | Element::Zone(a) => a.id,
            Element::Unknown(u) => u.id,
        }
    }

    /// Known kind, `None` for unrecognized elements.
    pub fn kind(&self) -> Option<ElementKind> {
        match self {
            Element::Player(_) => Some(ElementKind::Player),
            Element::Ball(_) => Some(ElementKind::Ball),
            Element::Arrow(_) => Some(ElementKind::Arrow),
            Element::Line(_) => Some(ElementKind::Line),
            Element::Perpendicular(_) => Some(ElementKind::Perpendicular),
            Element::Rect(_) => Some(ElementKind::Rect),
            Element::Zone(_) => Some(ElementKind::Zone),
            Element::Unknown(_) => None,
        }
    }

    pub fn is_player(&self) -> bool {
        matches!(self, Element::Player(_))
    }

    /// The underlying segment of line-like elements.
    pub fn as_line(&self) -> Option<&Line> {
        match self {
            Element::Arrow(l) | Element::Line(l) => Some(l),
            Element::Perpendicular(p) => Some(&p.line),
            _ => None,
        }
    }

    pub fn as_line_mut(&mut self) -> Option<&mut Line> {
        match self {
            Element::Arrow(l) | Element::Line(l) => Some(l),
            Element::Perpendicular(p) => Some(&mut p.line),
            _ => None,
        }
    }

    /// Reference point used for dragging: the center of players, balls and
    /// areas, the first endpoint of line-like elements.
    pub fn anchor(&self) -> Point {
        match self {
            Element::Player(p) => p.position,
            Element::Ball(b) => b.position,
            Element::Arrow(l) | Element::Line(l) => l.start,
            Element::Perpendicular(p) => p.line.start,
            Element::Rect(a) | Element::Zone(a) => a.center(),
            Element::Unknown(_) => Point::ZERO,
        }
    }

    /// Move the element rigidly so that its anchor lands on `point`.
    pub fn move_anchor_to(&mut self, point: Point) {
        let delta = point - self.anchor();
        self.translate(delta);
    }

    pub fn translate(&mut self, delta: Vec2) {
        match self {
            Element::Player(p) => p.translate(delta),
            Element::Ball(b) => b.translate(delta),
            Element::Arrow(l) | Element::Line(l) => l.translate(delta),
            Element::Perpendicular(p) => p.line.translate(delta),
            Element::Rect(a) | Element::Zone(a) => a.translate(delta),
            Element::Unknown(_) => {}
        }
    }

    /// Bounding box in field coordinates; unknown elements have none.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Element::Player(p) => Some(p.bounds()),
            Element::Ball(b) => Some(b.bounds()),
            Element::Arrow(l) | Element::Line(l) => Some(l.bounds()),
            Element::Perpendicular(p) => Some(p.bounds()),
            Element::Rect(a) | Element::Zone(a) => Some(a.as_rect()),
            Element::Unknown(_) => None,
        }
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        match self {
            Element::Player(p) => p.hit_test(point, tolerance),
            Element::Ball(b) => b.hit_test(point, tolerance),
            Element::Arrow(l) | Element::Line(l) => l.hit_test(point, tolerance),
            Element::Perpendicular(p) => p.hit_test(point, tolerance),
            Element::Rect(a) => a.hit_test_outline(point, tolerance, RECT_STROKE_WIDTH),
            Element::Zone(a) => a.hit_test_fill(point, tolerance),
            Element::Unknown(_) => false,
        }
    }

    /// Endpoints that other lines may snap to.
    pub fn snap_points(&self) -> Vec<Point> {
        match self.as_line() {
            Some(l) => vec![l.start, l.end],
            None => Vec::new(),
        }
    }

    /// Give the element a fresh identifier (used when duplicating plays).
    pub fn regenerate_id(&mut self) {
        let new_id = Uuid::new_v4();
        match self {
            Element::Player(p) => p.id = new_id,
            Element::Ball(b) => b.id = new_id,
            Element::Arrow(l) | Element::Line(l) => l.id = new_id,
            Element::Perpendicular(p) => p.line.id = new_id,
            Element::Rect(a) | Element::Zone(a) => a.id = new_id,
            Element::Unknown(u) => u.id = new_id,
        }
    }

    /// Wire form of the element.
    pub fn to_value(&self) -> Value {
        fn line_value(kind: ElementKind, l: &Line) -> Value {
            json!({
                "type": kind.tag(),
                "id": l.id.to_string(),
                "x1": l.start.x,
                "y1": l.start.y,
                "x2": l.end.x,
                "y2": l.end.y,
                "color": l.color.to_hex(),
                "style": l.stroke_style.as_str(),
                "thickness": l.thickness,
            })
        }
        fn area_value(kind: ElementKind, a: &Area) -> Value {
            json!({
                "type": kind.tag(),
                "id": a.id.to_string(),
                "x": a.position.x,
                "y": a.position.y,
                "w": a.width,
                "h": a.height,
                "color": a.color.to_hex(),
            })
        }

        match self {
            Element::Player(p) => json!({
                "type": ElementKind::Player.tag(),
                "id": p.id.to_string(),
                "x": p.position.x,
                "y": p.position.y,
                "color": p.color.to_hex(),
                "label": p.label,
                "radius": p.radius,
            }),
            Element::Ball(b) => json!({
                "type": ElementKind::Ball.tag(),
                "id": b.id.to_string(),
                "x": b.position.x,
                "y": b.position.y,
                "color": b.color.to_hex(),
            }),
            Element::Arrow(l) => line_value(ElementKind::Arrow, l),
            Element::Line(l) => line_value(ElementKind::Line, l),
            Element::Perpendicular(p) => {
                let mut value = line_value(ElementKind::Perpendicular, &p.line);
                value["tick"] = json!(p.tick);
                value
            }
            Element::Rect(a) => area_value(ElementKind::Rect, a),
            Element::Zone(a) => area_value(ElementKind::Zone, a),
            Element::Unknown(u) => u.raw.clone(),
        }
    }
}

impl Serialize for Element {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Element {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(normalize_value(&value))
    }
}

/// A partial update applied from the inspector to the selected element.
/// Fields that do not apply to the element's kind are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ElementPatch {
    pub color: Option<Rgba>,
    pub label: Option<String>,
    pub radius: Option<f64>,
    pub stroke_style: Option<StrokeStyle>,
    pub thickness: Option<f64>,
    pub tick: Option<f64>,
}

impl ElementPatch {
    /// Apply the patch and re-normalize, so invalid numbers fall back to defaults.
    pub fn apply(&self, element: &Element) -> Element {
        let mut updated = element.clone();
        match &mut updated {
            Element::Player(p) => {
                if let Some(color) = self.color {
                    p.color = color;
                }
                if let Some(label) = &self.label {
                    p.label = label.clone();
                }
                if let Some(radius) = self.radius {
                    p.radius = radius;
                }
            }
            Element::Ball(b) => {
                if let Some(color) = self.color {
                    b.color = color;
                }
            }
            Element::Arrow(l) | Element::Line(l) => self.apply_line(l),
            Element::Perpendicular(p) => {
                self.apply_line(&mut p.line);
                if let Some(tick) = self.tick {
                    p.tick = tick;
                }
            }
            Element::Rect(a) | Element::Zone(a) => {
                if let Some(color) = self.color {
                    a.color = color;
                }
            }
            Element::Unknown(_) => {}
        }
        updated.normalize()
    }

    fn apply_line(&self, line: &mut Line) {
        if let Some(color) = self.color {
            line.color = color;
        }
        if let Some(style) = self.stroke_style {
            line.stroke_style = style;
        }
        if let Some(thickness) = self.thickness {
            line.thickness = thickness;
        }
    }
}

//! Best-effort repair of persisted or imported elements.
//!
//! Stored documents drift: fields go missing, numbers arrive as strings,
//! colors get mangled. Nothing here rejects input. Every missing or invalid
//! field is replaced by its kind-specific default, and elements with an
//! unrecognized `type` are carried through untouched.

use super::{Area, Ball, Element, ElementId, ElementKind, Line, Perpendicular, Player, Rgba, StrokeStyle, UnknownElement};
use kurbo::Point;
use serde_json::Value;
use uuid::Uuid;

/// Read a finite number, accepting numeric strings.
fn number(value: &Value, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|key| {
        let field = value.get(*key)?;
        let n = match field {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }?;
        n.is_finite().then_some(n)
    })
}

fn coordinate(value: &Value, keys: &[&str]) -> f64 {
    number(value, keys).unwrap_or(0.0)
}

/// A strictly positive size, or the default.
fn positive(value: &Value, keys: &[&str], default: f64) -> f64 {
    number(value, keys).filter(|n| *n > 0.0).unwrap_or(default)
}

fn color(value: &Value, default: Rgba) -> Rgba {
    value
        .get("color")
        .and_then(Value::as_str)
        .and_then(Rgba::parse_hex)
        .unwrap_or(default)
}

fn element_id(value: &Value) -> ElementId {
    value
        .get("id")
        .and_then(Value::as_str)
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(Uuid::new_v4)
}

fn stroke_style(value: &Value) -> StrokeStyle {
    if let Some(style) = value.get("style").and_then(Value::as_str).and_then(StrokeStyle::parse) {
        return style;
    }
    match value.get("dashed").and_then(Value::as_bool) {
        Some(true) => StrokeStyle::Dashed,
        _ => StrokeStyle::Solid,
    }
}

fn line(value: &Value) -> Line {
    Line {
        id: element_id(value),
        start: Point::new(coordinate(value, &["x1"]), coordinate(value, &["y1"])),
        end: Point::new(coordinate(value, &["x2"]), coordinate(value, &["y2"])),
        color: color(value, Line::DEFAULT_COLOR),
        stroke_style: stroke_style(value),
        thickness: positive(value, &["thickness", "strokeWidth"], Line::DEFAULT_THICKNESS),
    }
}

fn area(value: &Value, default_color: Rgba) -> Area {
    Area {
        id: element_id(value),
        position: Point::new(coordinate(value, &["x"]), coordinate(value, &["y"])),
        width: coordinate(value, &["w", "width"]),
        height: coordinate(value, &["h", "height"]),
        color: color(value, default_color),
    }
}

/// Turn any JSON value into an element, filling defaults where needed.
///
/// Values without a recognized `type` tag become [`Element::Unknown`] and
/// keep their raw JSON.
pub fn normalize_value(value: &Value) -> Element {
    let kind = value
        .get("type")
        .and_then(Value::as_str)
        .and_then(ElementKind::from_tag);

    let Some(kind) = kind else {
        log::warn!("Keeping element with unrecognized type: {}", value.get("type").unwrap_or(&Value::Null));
        return Element::Unknown(UnknownElement {
            id: element_id(value),
            raw: value.clone(),
        });
    };

    let element = match kind {
        ElementKind::Player => Element::Player(Player {
            id: element_id(value),
            position: Point::new(coordinate(value, &["x"]), coordinate(value, &["y"])),
            color: color(value, Player::DEFAULT_COLOR),
            label: value
                .get("label")
                .or_else(|| value.get("text"))
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            radius: positive(value, &["radius", "r"], Player::DEFAULT_RADIUS),
        }),
        ElementKind::Ball => Element::Ball(Ball {
            id: element_id(value),
            position: Point::new(coordinate(value, &["x"]), coordinate(value, &["y"])),
            color: color(value, Ball::DEFAULT_COLOR),
        }),
        ElementKind::Arrow => Element::Arrow(line(value)),
        ElementKind::Line => Element::Line(line(value)),
        ElementKind::Perpendicular => Element::Perpendicular(Perpendicular {
            line: line(value),
            tick: positive(value, &["tick"], Perpendicular::DEFAULT_TICK),
        }),
        ElementKind::Rect => Element::Rect(area(value, Area::DEFAULT_RECT_COLOR)),
        ElementKind::Zone => Element::Zone(area(value, Area::DEFAULT_ZONE_COLOR)),
    };
    element.normalize()
}

fn finite_or_zero(n: f64) -> f64 {
    if n.is_finite() { n } else { 0.0 }
}

fn finite_point(p: Point) -> Point {
    Point::new(finite_or_zero(p.x), finite_or_zero(p.y))
}

fn positive_or(n: f64, default: f64) -> f64 {
    if n.is_finite() && n > 0.0 { n } else { default }
}

fn normalize_line(line: &mut Line) {
    line.start = finite_point(line.start);
    line.end = finite_point(line.end);
    line.thickness = positive_or(line.thickness, Line::DEFAULT_THICKNESS);
}

fn normalize_area(area: &mut Area) {
    area.position = finite_point(area.position);
    area.width = finite_or_zero(area.width);
    area.height = finite_or_zero(area.height);
    if area.width < 0.0 {
        area.position.x += area.width;
        area.width = -area.width;
    }
    if area.height < 0.0 {
        area.position.y += area.height;
        area.height = -area.height;
    }
}

impl Element {
    /// Repair a typed element in place of a JSON round trip. Idempotent.
    pub fn normalize(mut self) -> Self {
        match &mut self {
            Element::Player(p) => {
                p.position = finite_point(p.position);
                p.radius = positive_or(p.radius, Player::DEFAULT_RADIUS);
            }
            Element::Ball(b) => b.position = finite_point(b.position),
            Element::Arrow(l) | Element::Line(l) => normalize_line(l),
            Element::Perpendicular(p) => {
                normalize_line(&mut p.line);
                p.tick = positive_or(p.tick, Perpendicular::DEFAULT_TICK);
            }
            Element::Rect(a) | Element::Zone(a) => normalize_area(a),
            Element::Unknown(_) => {}
        }
        self
    }

    /// Borrowing variant of [`Element::normalize`].
    pub fn normalized(&self) -> Self {
        self.clone().normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_fields_get_defaults() {
        let e = normalize_value(&json!({"type": "player", "x": 10, "y": 20}));
        let Element::Player(p) = e else { panic!("expected player") };
        assert_eq!(p.position, Point::new(10.0, 20.0));
        assert!((p.radius - Player::DEFAULT_RADIUS).abs() < f64::EPSILON);
        assert_eq!(p.color, Player::DEFAULT_COLOR);
        assert_eq!(p.label, "");
    }

    #[test]
    fn test_line_defaults() {
        let e = normalize_value(&json!({"type": "perp", "x1": 0, "y1": 0, "x2": 10, "y2": 0}));
        let Element::Perpendicular(p) = e else { panic!("expected perpendicular") };
        assert!((p.line.thickness - 3.0).abs() < f64::EPSILON);
        assert!((p.tick - 12.0).abs() < f64::EPSILON);
        assert_eq!(p.line.stroke_style, StrokeStyle::Solid);
    }

    #[test]
    fn test_invalid_values_are_replaced() {
        let e = normalize_value(&json!({
            "type": "arrow",
            "x1": "12.5", "y1": null, "x2": "abc", "y2": 4,
            "color": "not-a-color",
            "style": "wavy",
            "thickness": -2
        }));
        let Element::Arrow(l) = e else { panic!("expected arrow") };
        assert_eq!(l.start, Point::new(12.5, 0.0));
        assert_eq!(l.end, Point::new(0.0, 4.0));
        assert_eq!(l.color, Line::DEFAULT_COLOR);
        assert_eq!(l.stroke_style, StrokeStyle::Solid);
        assert!((l.thickness - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_legacy_aliases() {
        let e = normalize_value(&json!({"type": "player", "r": 18, "text": "WR", "x": 1, "y": 1}));
        let Element::Player(p) = e else { panic!("expected player") };
        assert!((p.radius - 18.0).abs() < f64::EPSILON);
        assert_eq!(p.label, "WR");

        let e = normalize_value(&json!({"type": "line", "dashed": true}));
        assert_eq!(e.as_line().unwrap().stroke_style, StrokeStyle::Dashed);
    }

    #[test]
    fn test_negative_area_is_flipped() {
        let e = normalize_value(&json!({"type": "zone", "x": 100, "y": 100, "w": -40, "h": -10}));
        let Element::Zone(a) = e else { panic!("expected zone") };
        assert_eq!(a.position, Point::new(60.0, 90.0));
        assert!((a.width - 40.0).abs() < f64::EPSILON);
        assert!((a.height - 10.0).abs() < f64::EPSILON);
        assert_eq!(a.color, Area::DEFAULT_ZONE_COLOR);
    }

    #[test]
    fn test_unknown_type_passes_through() {
        let raw = json!({"type": "triangle", "id": "abc", "points": [1, 2, 3]});
        let e = normalize_value(&raw);
        assert!(e.kind().is_none());
        assert_eq!(e.to_value(), raw);

        let untyped = json!({"x": 1});
        assert!(normalize_value(&untyped).kind().is_none());
    }

    #[test]
    fn test_id_is_kept_when_valid() {
        let id = Uuid::new_v4();
        let e = normalize_value(&json!({"type": "ball", "id": id.to_string()}));
        assert_eq!(e.id(), id);
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let inputs = [
            json!({"type": "player", "x": "5", "radius": 0}),
            json!({"type": "ball"}),
            json!({"type": "arrow", "x1": 1, "y1": 2, "x2": 3, "y2": 4, "style": "dashed", "thickness": 5}),
            json!({"type": "line", "thickness": "NaN"}),
            json!({"type": "perp", "tick": -1, "color": "#abc"}),
            json!({"type": "rect", "w": -5, "h": 7}),
            json!({"type": "zone", "x": 3, "y": 4, "w": 10, "h": 10, "color": "#12345678"}),
            json!({"type": "mystery", "foo": "bar"}),
            json!(42),
        ];
        for input in inputs {
            let once = normalize_value(&input);
            assert_eq!(once.normalized(), once);
            assert_eq!(normalize_value(&once.to_value()), once);
        }
    }

    #[test]
    fn test_typed_normalize_repairs_non_finite() {
        let mut player = Player::new(Point::new(f64::NAN, 3.0));
        player.radius = f64::INFINITY;
        let Element::Player(p) = Element::Player(player).normalize() else {
            panic!("expected player")
        };
        assert_eq!(p.position, Point::new(0.0, 3.0));
        assert!((p.radius - Player::DEFAULT_RADIUS).abs() < f64::EPSILON);
    }
}

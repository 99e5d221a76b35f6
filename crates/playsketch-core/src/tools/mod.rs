//! Tool system for the play designer.

use crate::elements::{Area, Ball, Element, ElementKind, Line, Perpendicular, Player, Rgba, StrokeStyle};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Select,
    Player,
    Ball,
    Arrow,
    Line,
    #[serde(alias = "perp")]
    Perpendicular,
    Rect,
    Zone,
}

impl ToolKind {
    pub const ALL: [ToolKind; 8] = [
        ToolKind::Select,
        ToolKind::Player,
        ToolKind::Ball,
        ToolKind::Arrow,
        ToolKind::Line,
        ToolKind::Perpendicular,
        ToolKind::Rect,
        ToolKind::Zone,
    ];

    /// The element kind this tool creates.
    pub fn element_kind(self) -> Option<ElementKind> {
        match self {
            ToolKind::Select => None,
            ToolKind::Player => Some(ElementKind::Player),
            ToolKind::Ball => Some(ElementKind::Ball),
            ToolKind::Arrow => Some(ElementKind::Arrow),
            ToolKind::Line => Some(ElementKind::Line),
            ToolKind::Perpendicular => Some(ElementKind::Perpendicular),
            ToolKind::Rect => Some(ElementKind::Rect),
            ToolKind::Zone => Some(ElementKind::Zone),
        }
    }

    /// Tools that create elements by press-drag-release.
    pub fn is_drawing(self) -> bool {
        self.is_line() || matches!(self, ToolKind::Rect | ToolKind::Zone)
    }

    /// Arrow, Line and Perpendicular.
    pub fn is_line(self) -> bool {
        self.element_kind().is_some_and(ElementKind::is_line_like)
    }

    /// Player and Ball are placed by a single click.
    pub fn is_placement(self) -> bool {
        matches!(self, ToolKind::Player | ToolKind::Ball)
    }

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Select => "select",
            ToolKind::Player => "player",
            ToolKind::Ball => "ball",
            ToolKind::Arrow => "arrow",
            ToolKind::Line => "line",
            ToolKind::Perpendicular => "perpendicular",
            ToolKind::Rect => "rect",
            ToolKind::Zone => "zone",
        }
    }
}

/// Style applied to newly created elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ToolStyle {
    pub player_color: Rgba,
    pub player_label: String,
    pub player_radius: f64,
    pub ball_color: Rgba,
    pub line_color: Rgba,
    pub stroke_style: StrokeStyle,
    pub thickness: f64,
    pub tick: f64,
    pub rect_color: Rgba,
    pub zone_color: Rgba,
}

impl Default for ToolStyle {
    fn default() -> Self {
        Self {
            player_color: Player::DEFAULT_COLOR,
            player_label: String::new(),
            player_radius: Player::DEFAULT_RADIUS,
            ball_color: Ball::DEFAULT_COLOR,
            line_color: Line::DEFAULT_COLOR,
            stroke_style: StrokeStyle::Solid,
            thickness: Line::DEFAULT_THICKNESS,
            tick: Perpendicular::DEFAULT_TICK,
            rect_color: Area::DEFAULT_RECT_COLOR,
            zone_color: Area::DEFAULT_ZONE_COLOR,
        }
    }
}

/// An element being built by a press-drag gesture, not yet committed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Draft {
    /// Arrow, Line or Perpendicular; `end` follows the pointer.
    Line {
        kind: ElementKind,
        start: Point,
        end: Point,
    },
    /// Rect or Zone spanned between the press point and the pointer.
    Area {
        kind: ElementKind,
        anchor: Point,
        current: Point,
    },
}

impl Draft {
    pub fn kind(&self) -> ElementKind {
        match self {
            Draft::Line { kind, .. } | Draft::Area { kind, .. } => *kind,
        }
    }

    /// Length of a line draft; zero for area drafts.
    pub fn length(&self) -> f64 {
        match self {
            Draft::Line { start, end, .. } => start.distance(*end),
            Draft::Area { .. } => 0.0,
        }
    }

    /// Normalized rectangle of an area draft.
    pub fn rect(&self) -> Option<Rect> {
        match self {
            Draft::Area { anchor, current, .. } => Some(Rect::from_points(*anchor, *current)),
            Draft::Line { .. } => None,
        }
    }

    /// True when the draft is too small to be intentional.
    pub fn is_degenerate(&self, min_line_length: f64, min_area_size: f64) -> bool {
        match self {
            Draft::Line { .. } => self.length() < min_line_length,
            Draft::Area { anchor, current, .. } => {
                (current.x - anchor.x).abs() < min_area_size || (current.y - anchor.y).abs() < min_area_size
            }
        }
    }
}

/// Manages the current tool and the style of new elements.
#[derive(Debug, Clone, Default)]
pub struct ToolManager {
    /// Currently selected tool.
    pub current_tool: ToolKind,
    /// Current style to apply to new elements.
    pub current_style: ToolStyle,
}

impl ToolManager {
    /// Create a new tool manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the current tool.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.current_tool = tool;
    }

    /// Element placed by a single click with the Player or Ball tool.
    /// Build the element placed by a single click with the current tool.
    /// The element is normalized, so an out-of-range style never reaches the play.
    pub fn place(&self, point: Point) -> Option<Element> {
        let style = &self.current_style;
        let element = match self.current_tool {
            ToolKind::Player => {
                let mut player = Player::new(point);
                player.color = style.player_color;
                player.label = style.player_label.clone();
                player.radius = style.player_radius;
                Element::Player(player)
            }
            ToolKind::Ball => {
                let mut ball = Ball::new(point);
                ball.color = style.ball_color;
                Element::Ball(ball)
            }
            _ => return None,
        };
        Some(element.normalize())
    }

    /// Start a draft for the current drawing tool at `start`.
    pub fn begin_draft(&self, start: Point) -> Option<Draft> {
        let kind = self.current_tool.element_kind()?;
        match self.current_tool {
            ToolKind::Arrow | ToolKind::Line | ToolKind::Perpendicular => Some(Draft::Line {
                kind,
                start,
                end: start,
            }),
            ToolKind::Rect | ToolKind::Zone => Some(Draft::Area {
                kind,
                anchor: start,
                current: start,
            }),
            _ => None,
        }
    }

    /// Build the element a draft describes, styled with the current style.
    ///
    /// Each call issues a fresh identifier.
    pub fn create_element(&self, draft: &Draft) -> Element {
        let style = &self.current_style;
        let element = match *draft {
            Draft::Line { kind, start, end } => {
                let mut line = Line::new(start, end);
                line.color = style.line_color;
                line.stroke_style = style.stroke_style;
                line.thickness = style.thickness;
                match kind {
                    ElementKind::Arrow => Element::Arrow(line),
                    ElementKind::Perpendicular => Element::Perpendicular(Perpendicular {
                        line,
                        tick: style.tick,
                    }),
                    _ => Element::Line(line),
                }
            }
            Draft::Area { kind, anchor, current } => {
                let mut area = Area::from_corners(anchor, current);
                if kind == ElementKind::Zone {
                    area.color = style.zone_color;
                    Element::Zone(area)
                } else {
                    area.color = style.rect_color;
                    Element::Rect(area)
                }
            }
        };
        element.normalize()
    }
}

//! Standalone SVG snapshot of a single play.

use kurbo::{Point, Vec2};
use playsketch_core::Play;
use playsketch_core::elements::{Area, Ball, Element, Line, Perpendicular, Player, RECT_STROKE_WIDTH, Rgba, StrokeStyle};
use playsketch_core::field::{MARGIN_X, row_count, row_y};
use std::fmt::Write;

/// Length of the arrowhead sides.
const ARROW_HEAD_SIZE: f64 = 15.0;
/// Zones are filled with this fraction of their color's opacity.
const ZONE_FILL_OPACITY: f64 = 0.3;
/// Every n-th yard line is drawn heavier.
const MAJOR_LINE_EVERY: u32 = 5;

/// How yard-line rows are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YardLineStyle {
    /// No yard lines.
    None,
    /// A full-width line per row.
    #[default]
    Lines,
    /// Short hash marks at the sidelines and the two hash positions.
    Hashes,
}

impl YardLineStyle {
    /// Cycle to the next style.
    pub fn next(self) -> Self {
        match self {
            YardLineStyle::None => YardLineStyle::Lines,
            YardLineStyle::Lines => YardLineStyle::Hashes,
            YardLineStyle::Hashes => YardLineStyle::None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            YardLineStyle::None => "None",
            YardLineStyle::Lines => "Lines",
            YardLineStyle::Hashes => "Hashes",
        }
    }
}

/// Appearance of a rendered play.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgOptions {
    pub background: Rgba,
    pub yard_line_color: Rgba,
    pub yard_lines: YardLineStyle,
    pub los_color: Rgba,
    /// Output pixels per field pixel. The viewBox always spans the field.
    pub scale: f64,
    /// Draw the play name in the top margin.
    pub show_title: bool,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            background: Rgba::white(),
            yard_line_color: Rgba::opaque(0xd1, 0xd5, 0xdb),
            yard_lines: YardLineStyle::default(),
            los_color: Rgba::opaque(0x1d, 0x4e, 0xd8),
            scale: 1.0,
            show_title: false,
        }
    }
}

/// Render `play` as a standalone SVG document.
pub fn render_play_svg(play: &Play, options: &SvgOptions) -> String {
    let size = play.size();
    let scale = if options.scale.is_finite() && options.scale > 0.0 { options.scale } else { 1.0 };
    let mut out = String::new();

    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        num(size.w * scale),
        num(size.h * scale),
        num(size.w),
        num(size.h)
    );
    let _ = writeln!(out, "<title>{}</title>", escape_xml(&play.name));
    let _ = writeln!(
        out,
        r#"<rect x="0" y="0" width="{}" height="{}"{}/>"#,
        num(size.w),
        num(size.h),
        fill(options.background)
    );

    write_yard_lines(&mut out, play, options);

    if let Some(los) = play.los() {
        let y = row_y(size, play.field_length_yards(), los);
        let _ = writeln!(
            out,
            r#"<line class="los" x1="{}" y1="{y}" x2="{}" y2="{y}"{} stroke-width="3"/>"#,
            num(MARGIN_X),
            num(size.w - MARGIN_X),
            stroke(options.los_color),
            y = num(y)
        );
    }

    if options.show_title {
        let _ = writeln!(
            out,
            r#"<text x="{}" y="{}" font-family="sans-serif" font-size="18" font-weight="bold" text-anchor="middle" dominant-baseline="central">{}</text>"#,
            num(size.w / 2.0),
            num(MARGIN_X / 2.0),
            escape_xml(&play.name)
        );
    }

    for element in play.elements() {
        write_element(&mut out, element);
    }

    out.push_str("</svg>\n");
    out
}

fn write_yard_lines(out: &mut String, play: &Play, options: &SvgOptions) {
    let size = play.size();
    let divisions = play.field_length_yards();
    let (left, right) = (MARGIN_X, size.w - MARGIN_X);
    let paint = stroke(options.yard_line_color);

    for row in 0..row_count(divisions) {
        let y = num(row_y(size, divisions, row));
        let width = if row % MAJOR_LINE_EVERY == 0 { 2 } else { 1 };
        match options.yard_lines {
            YardLineStyle::None => return,
            YardLineStyle::Lines => {
                let _ = writeln!(
                    out,
                    r#"<line class="yard" x1="{}" y1="{y}" x2="{}" y2="{y}"{paint} stroke-width="{width}"/>"#,
                    num(left),
                    num(right)
                );
            }
            YardLineStyle::Hashes => {
                let third = (right - left) / 3.0;
                for x in [left, left + third, right - third, right] {
                    let _ = writeln!(
                        out,
                        r#"<line class="yard" x1="{}" y1="{y}" x2="{}" y2="{y}"{paint} stroke-width="{width}"/>"#,
                        num(x - 6.0),
                        num(x + 6.0)
                    );
                }
            }
        }
    }
}

fn write_element(out: &mut String, element: &Element) {
    match element {
        Element::Player(player) => write_player(out, player),
        Element::Ball(ball) => write_ball(out, ball),
        Element::Arrow(line) => {
            write_segment(out, "arrow", line);
            write_arrow_head(out, line);
        }
        Element::Line(line) => write_segment(out, "line", line),
        Element::Perpendicular(perp) => write_perpendicular(out, perp),
        Element::Rect(area) => write_area(out, "rect", area, false),
        Element::Zone(area) => write_area(out, "zone", area, true),
        Element::Unknown(_) => {
            log::debug!("Skipping unrenderable element {}", element.id());
        }
    }
}

fn write_player(out: &mut String, player: &Player) {
    let _ = writeln!(
        out,
        r#"<circle class="player" cx="{}" cy="{}" r="{}"{}/>"#,
        num(player.position.x),
        num(player.position.y),
        num(player.radius),
        fill(player.color)
    );
    if !player.label.is_empty() {
        let _ = writeln!(
            out,
            r##"<text x="{}" y="{}" font-family="sans-serif" font-size="{}" font-weight="bold" fill="#ffffff" text-anchor="middle" dominant-baseline="central">{}</text>"##,
            num(player.position.x),
            num(player.position.y),
            num(player.radius * 0.8),
            escape_xml(&player.label)
        );
    }
}

fn write_ball(out: &mut String, ball: &Ball) {
    let _ = writeln!(
        out,
        r#"<ellipse class="ball" cx="{}" cy="{}" rx="{}" ry="{}"{}/>"#,
        num(ball.position.x),
        num(ball.position.y),
        num(Ball::RADIUS_X),
        num(Ball::RADIUS_Y),
        fill(ball.color)
    );
}

fn write_segment(out: &mut String, class: &str, line: &Line) {
    let _ = writeln!(
        out,
        r#"<line class="{class}" x1="{}" y1="{}" x2="{}" y2="{}"{} stroke-width="{}" stroke-linecap="round"{}/>"#,
        num(line.start.x),
        num(line.start.y),
        num(line.end.x),
        num(line.end.y),
        stroke(line.color),
        num(line.thickness),
        dash(line.stroke_style, line.thickness)
    );
}

/// Filled triangle at the end point, pointing along the line.
fn write_arrow_head(out: &mut String, line: &Line) {
    let delta = line.end - line.start;
    let len = delta.hypot();
    if len < f64::EPSILON {
        return;
    }
    let head = ARROW_HEAD_SIZE.min(len);
    let dir = delta / len;
    let perp = Vec2::new(-dir.y, dir.x);
    let back = line.end - dir * head;
    let left: Point = back + perp * head * 0.5;
    let right: Point = back - perp * head * 0.5;
    let _ = writeln!(
        out,
        r#"<polygon class="arrow-head" points="{},{} {},{} {},{}"{}/>"#,
        num(line.end.x),
        num(line.end.y),
        num(left.x),
        num(left.y),
        num(right.x),
        num(right.y),
        fill(line.color)
    );
}

fn write_perpendicular(out: &mut String, perp: &Perpendicular) {
    write_segment(out, "perp", &perp.line);
    if let Some(tick) = perp.tick_segment() {
        let _ = writeln!(
            out,
            r#"<line class="perp-tick" x1="{}" y1="{}" x2="{}" y2="{}"{} stroke-width="{}" stroke-linecap="round"/>"#,
            num(tick.p0.x),
            num(tick.p0.y),
            num(tick.p1.x),
            num(tick.p1.y),
            stroke(perp.line.color),
            num(perp.line.thickness)
        );
    }
}

fn write_area(out: &mut String, class: &str, area: &Area, filled: bool) {
    let paint = if filled {
        format!(
            r#" fill="{}" fill-opacity="{}"{}"#,
            rgb(area.color),
            num(area.color.opacity() * ZONE_FILL_OPACITY),
            stroke(area.color)
        )
    } else {
        format!(r#" fill="none"{}"#, stroke(area.color))
    };
    let _ = writeln!(
        out,
        r#"<rect class="{class}" x="{}" y="{}" width="{}" height="{}"{paint} stroke-width="{}"/>"#,
        num(area.position.x),
        num(area.position.y),
        num(area.width),
        num(area.height),
        num(RECT_STROKE_WIDTH)
    );
}

/// `#rrggbb`, the alpha channel goes into a separate opacity attribute.
fn rgb(color: Rgba) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
}

fn fill(color: Rgba) -> String {
    if color.a == 255 {
        format!(r#" fill="{}""#, rgb(color))
    } else {
        format!(r#" fill="{}" fill-opacity="{}""#, rgb(color), num(color.opacity()))
    }
}

fn stroke(color: Rgba) -> String {
    if color.a == 255 {
        format!(r#" stroke="{}""#, rgb(color))
    } else {
        format!(r#" stroke="{}" stroke-opacity="{}""#, rgb(color), num(color.opacity()))
    }
}

fn dash(style: StrokeStyle, thickness: f64) -> String {
    match style {
        StrokeStyle::Solid => String::new(),
        StrokeStyle::Dashed => format!(r#" stroke-dasharray="{} {}""#, num(thickness * 3.0), num(thickness * 2.0)),
    }
}

/// Coordinates with at most two decimals and no trailing zeros.
fn num(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    // avoid "-0"
    if rounded == 0.0 { "0".to_string() } else { rounded.to_string() }
}

/// Escape text for use in XML content and attribute values.
pub fn escape_xml(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

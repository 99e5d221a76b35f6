//! Field layout: yard dimensions to pixel canvas size.
//!
//! Every field uses the same pixel-per-yard scale. The scale comes from the
//! reference layout, a 600×800 canvas showing a 30-yard-wide field split into
//! 20 rows with 40px margins on every side.

use kurbo::{Rect, Size};
use serde::{Deserialize, Serialize};

/// Reference canvas width in pixels.
pub const REFERENCE_WIDTH: f64 = 600.0;
/// Reference canvas height in pixels.
pub const REFERENCE_HEIGHT: f64 = 800.0;
/// Horizontal margin between canvas edge and playing area.
pub const MARGIN_X: f64 = 40.0;
/// Vertical margin between canvas edge and the first/last yard line.
pub const MARGIN_Y: f64 = 40.0;

/// Field width (yards) of a new play.
pub const DEFAULT_WIDTH_YARDS: u32 = 30;
/// Field length (yards, one row division per yard) of a new play.
pub const DEFAULT_LENGTH_YARDS: u32 = 20;

/// Pixels per yard across the field.
pub const UNIT_X: f64 = (REFERENCE_WIDTH - 2.0 * MARGIN_X) / DEFAULT_WIDTH_YARDS as f64;
/// Pixels per yard down the field (distance between yard-line rows).
pub const UNIT_Y: f64 = (REFERENCE_HEIGHT - 2.0 * MARGIN_Y) / DEFAULT_LENGTH_YARDS as f64;

/// Pixel size of a play's canvas. Always derived from the yard dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldSize {
    pub w: f64,
    pub h: f64,
}

impl FieldSize {
    pub fn as_size(&self) -> Size {
        Size::new(self.w, self.h)
    }

    /// Canvas rectangle, origin at zero.
    pub fn canvas_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.w, self.h)
    }

    /// The area inside the margins, between the first and last yard line.
    pub fn playing_area(&self) -> Rect {
        Rect::new(MARGIN_X, MARGIN_Y, self.w - MARGIN_X, self.h - MARGIN_Y)
    }
}

impl Default for FieldSize {
    fn default() -> Self {
        compute_field_size(f64::from(DEFAULT_WIDTH_YARDS), f64::from(DEFAULT_LENGTH_YARDS))
    }
}

/// Coerce an arbitrary number to a whole yard count of at least 1.
/// Non-finite input becomes 1.
pub fn coerce_yards(value: f64) -> u32 {
    if !value.is_finite() {
        return 1;
    }
    // `as` saturates at u32::MAX
    value.trunc().max(1.0) as u32
}

/// Canvas pixel size for a field of the given yard dimensions.
pub fn compute_field_size(width_yards: f64, length_yards: f64) -> FieldSize {
    let width = f64::from(coerce_yards(width_yards));
    let length = f64::from(coerce_yards(length_yards));
    FieldSize {
        w: (2.0 * MARGIN_X + width * UNIT_X).round(),
        h: (2.0 * MARGIN_Y + length * UNIT_Y).round(),
    }
}

/// Vertical distance between adjacent yard-line rows.
pub fn row_step(size: FieldSize, divisions: u32) -> f64 {
    (size.h - 2.0 * MARGIN_Y) / f64::from(divisions.max(1))
}

/// Y coordinate of yard-line row `row` (0 at the top, `divisions` at the bottom).
pub fn row_y(size: FieldSize, divisions: u32, row: u32) -> f64 {
    MARGIN_Y + f64::from(row.min(divisions.max(1))) * row_step(size, divisions)
}

/// Number of yard-line rows drawn for `divisions` divisions.
pub fn row_count(divisions: u32) -> u32 {
    divisions.max(1) + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_layout() {
        let size = compute_field_size(30.0, 20.0);
        assert!((size.w - 600.0).abs() < f64::EPSILON);
        assert!((size.h - 800.0).abs() < f64::EPSILON);
        assert_eq!(FieldSize::default(), size);
    }

    #[test]
    fn test_unit_sizes() {
        assert!((UNIT_Y - 36.0).abs() < f64::EPSILON);
        assert!((UNIT_X - 520.0 / 30.0).abs() < 1e-12);
    }

    #[test]
    fn test_field_size_is_deterministic() {
        for (w, l) in [(1.0, 1.0), (30.0, 20.0), (53.0, 100.0), (12.7, 9.2)] {
            assert_eq!(compute_field_size(w, l), compute_field_size(w, l));
        }
    }

    #[test]
    fn test_invalid_yards_clamp_to_one() {
        let one = compute_field_size(1.0, 1.0);
        assert_eq!(compute_field_size(0.0, -3.0), one);
        assert_eq!(compute_field_size(f64::NAN, f64::INFINITY), one);
        assert_eq!(compute_field_size(1.9, 1.2), one);
    }

    #[test]
    fn test_coerce_yards() {
        assert_eq!(coerce_yards(20.9), 20);
        assert_eq!(coerce_yards(0.4), 1);
        assert_eq!(coerce_yards(-7.0), 1);
        assert_eq!(coerce_yards(f64::NAN), 1);
    }

    #[test]
    fn test_rows() {
        let size = FieldSize::default();
        assert!((row_step(size, 20) - 36.0).abs() < f64::EPSILON);
        assert!((row_y(size, 20, 0) - 40.0).abs() < f64::EPSILON);
        assert!((row_y(size, 20, 20) - 760.0).abs() < f64::EPSILON);
        assert_eq!(row_count(20), 21);
    }

    #[test]
    fn test_playing_area() {
        let area = FieldSize::default().playing_area();
        assert!((area.width() - 520.0).abs() < f64::EPSILON);
        assert!((area.height() - 720.0).abs() < f64::EPSILON);
    }
}

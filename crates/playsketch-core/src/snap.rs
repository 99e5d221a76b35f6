//! Snap functionality for attaching new geometry to existing geometry and
//! placing players on yard lines.

use crate::elements::Element;
use crate::field::{FieldSize, MARGIN_Y, row_step};
use kurbo::Point;

/// Distance threshold for endpoint snapping (in field pixels).
pub const SNAP_RADIUS: f64 = 18.0;

/// Type of snap target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapTargetKind {
    /// Center of a player (only while players are locked).
    PlayerCenter,
    /// Start or end of an arrow, line or blocking line.
    Endpoint,
}

/// A point that can be snapped to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapTarget {
    /// The snap point location.
    pub point: Point,
    /// Type of snap target for visual feedback.
    pub kind: SnapTargetKind,
}

/// Result of a snap operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResult {
    /// The snapped point (or the input point if nothing was in range).
    pub point: Point,
    /// The target that was snapped to.
    pub target: Option<SnapTarget>,
}

impl SnapResult {
    /// Create a result with no snapping.
    pub fn none(point: Point) -> Self {
        Self { point, target: None }
    }

    /// Check if any snapping occurred.
    pub fn is_snapped(&self) -> bool {
        self.target.is_some()
    }
}

/// Collect snap targets in element order, first endpoint before second.
pub fn snap_targets(elements: &[Element], players_locked: bool) -> Vec<SnapTarget> {
    let mut targets = Vec::new();
    for element in elements {
        match element {
            Element::Player(p) if players_locked => targets.push(SnapTarget {
                point: p.position,
                kind: SnapTargetKind::PlayerCenter,
            }),
            _ => targets.extend(element.snap_points().into_iter().map(|point| SnapTarget {
                point,
                kind: SnapTargetKind::Endpoint,
            })),
        }
    }
    targets
}

/// Find the nearest target strictly closer than `radius`.
///
/// Ties keep the first target seen. A target located exactly at `exclude`
/// is skipped, which stops a line's free end from snapping back onto its
/// own start.
pub fn nearest_target(
    point: Point,
    targets: &[SnapTarget],
    exclude: Option<Point>,
    radius: f64,
) -> Option<SnapTarget> {
    let mut best_target: Option<SnapTarget> = None;
    let mut best_dist = radius;

    for target in targets {
        if exclude == Some(target.point) {
            continue;
        }
        let dist = point.distance(target.point);
        if dist < best_dist {
            best_dist = dist;
            best_target = Some(*target);
        }
    }

    best_target
}

/// Find the snap point for `point` among the elements of a play.
pub fn find_snap_point(
    point: Point,
    elements: &[Element],
    players_locked: bool,
    exclude: Option<Point>,
    radius: f64,
) -> Option<SnapTarget> {
    nearest_target(point, &snap_targets(elements, players_locked), exclude, radius)
}

/// Snap `point` to the nearest target, falling back to the point itself.
pub fn snap_point(
    point: Point,
    elements: &[Element],
    players_locked: bool,
    exclude: Option<Point>,
    radius: f64,
) -> SnapResult {
    match find_snap_point(point, elements, players_locked, exclude, radius) {
        Some(target) => SnapResult {
            point: target.point,
            target: Some(target),
        },
        None => SnapResult::none(point),
    }
}

/// Index of the yard-line row nearest to `y`, clamped to `0..=divisions`.
pub fn snap_to_yard_row(y: f64, size: FieldSize, divisions: u32) -> u32 {
    let divisions = divisions.max(1);
    let step = row_step(size, divisions);
    if !y.is_finite() || step <= 0.0 {
        return 0;
    }
    let row = ((y - MARGIN_Y) / step).round();
    row.clamp(0.0, f64::from(divisions)) as u32
}

/// Snap a y coordinate onto the nearest of the `divisions + 1` yard lines.
pub fn snap_to_yard_line(y: f64, size: FieldSize, divisions: u32) -> f64 {
    let divisions = divisions.max(1);
    let row = snap_to_yard_row(y, size, divisions);
    MARGIN_Y + f64::from(row) * row_step(size, divisions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{Line, Player};

    fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Element {
        Element::Line(Line::new(Point::new(x1, y1), Point::new(x2, y2)))
    }

    #[test]
    fn test_snap_radius_boundary() {
        let elements = vec![line(100.0, 100.0, 300.0, 300.0)];
        let hit = find_snap_point(Point::new(100.0, 117.0), &elements, false, None, SNAP_RADIUS);
        assert_eq!(hit.map(|t| t.point), Some(Point::new(100.0, 100.0)));

        let miss = find_snap_point(Point::new(100.0, 119.0), &elements, false, None, SNAP_RADIUS);
        assert!(miss.is_none());

        let exactly = find_snap_point(Point::new(100.0, 118.0), &elements, false, None, SNAP_RADIUS);
        assert!(exactly.is_none());
    }

    #[test]
    fn test_nearest_wins() {
        let elements = vec![line(0.0, 0.0, 100.0, 0.0), line(10.0, 0.0, 200.0, 0.0)];
        let hit = find_snap_point(Point::new(8.0, 0.0), &elements, false, None, SNAP_RADIUS);
        assert_eq!(hit.map(|t| t.point), Some(Point::new(10.0, 0.0)));
    }

    #[test]
    fn test_tie_keeps_first_seen() {
        let elements = vec![line(0.0, 0.0, 20.0, 0.0)];
        // Equidistant from both endpoints of the same line.
        let hit = find_snap_point(Point::new(10.0, 0.0), &elements, false, None, SNAP_RADIUS);
        assert_eq!(hit.map(|t| t.point), Some(Point::new(0.0, 0.0)));
    }

    #[test]
    fn test_exclude_point() {
        let elements = vec![line(0.0, 0.0, 10.0, 0.0)];
        let hit = find_snap_point(Point::new(1.0, 0.0), &elements, false, Some(Point::ZERO), SNAP_RADIUS);
        assert_eq!(hit.map(|t| t.point), Some(Point::new(10.0, 0.0)));
    }

    #[test]
    fn test_players_only_when_locked() {
        let elements = vec![Element::Player(Player::new(Point::new(50.0, 50.0)))];
        let unlocked = find_snap_point(Point::new(55.0, 50.0), &elements, false, None, SNAP_RADIUS);
        assert!(unlocked.is_none());

        let locked = find_snap_point(Point::new(55.0, 50.0), &elements, true, None, SNAP_RADIUS);
        let target = locked.unwrap();
        assert_eq!(target.point, Point::new(50.0, 50.0));
        assert_eq!(target.kind, SnapTargetKind::PlayerCenter);
    }

    #[test]
    fn test_target_order() {
        let elements = vec![
            line(1.0, 1.0, 2.0, 2.0),
            Element::Player(Player::new(Point::new(5.0, 5.0))),
            line(3.0, 3.0, 4.0, 4.0),
        ];
        let points: Vec<Point> = snap_targets(&elements, true).iter().map(|t| t.point).collect();
        assert_eq!(
            points,
            vec![
                Point::new(1.0, 1.0),
                Point::new(2.0, 2.0),
                Point::new(5.0, 5.0),
                Point::new(3.0, 3.0),
                Point::new(4.0, 4.0),
            ]
        );
    }

    #[test]
    fn test_snap_point_falls_back() {
        let result = snap_point(Point::new(400.0, 400.0), &[], false, None, SNAP_RADIUS);
        assert!(!result.is_snapped());
        assert_eq!(result.point, Point::new(400.0, 400.0));
    }

    #[test]
    fn test_snap_to_yard_line() {
        let size = FieldSize::default();
        // rows at 40, 76, 112, 148, ...
        assert!((snap_to_yard_line(150.0, size, 20) - 148.0).abs() < f64::EPSILON);
        assert!((snap_to_yard_line(93.0, size, 20) - 76.0).abs() < f64::EPSILON);
        assert!((snap_to_yard_line(95.0, size, 20) - 112.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_snap_to_yard_line_clamps() {
        let size = FieldSize::default();
        assert!((snap_to_yard_line(-500.0, size, 20) - 40.0).abs() < f64::EPSILON);
        assert!((snap_to_yard_line(5000.0, size, 20) - 760.0).abs() < f64::EPSILON);
        assert_eq!(snap_to_yard_row(5000.0, size, 20), 20);
        assert_eq!(snap_to_yard_row(f64::NAN, size, 20), 0);
    }
}

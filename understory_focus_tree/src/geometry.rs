// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pure geometry over axis-aligned boxes: lane overlap, directional
//! eligibility, and the directional distance used to rank candidates.

use kurbo::{Point, Rect};

use crate::direction::{Axis, Direction};

/// Weights combining the terms of [`directional_distance`].
///
/// Lower cost wins. The defaults make a candidate that shares the origin's
/// lane (its projection on the orthogonal axis overlaps the origin's) beat an
/// out-of-lane candidate at a similar travel distance, and use center
/// alignment as a mild secondary preference.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DistanceWeights {
    /// Weight of the gap between facing edges along the travel axis.
    pub along: f64,
    /// Weight of the gap between the boxes on the orthogonal axis
    /// (zero when they overlap on that axis).
    pub orthogonal_gap: f64,
    /// Weight of the distance between box centers on the orthogonal axis.
    pub orthogonal_offset: f64,
}

impl Default for DistanceWeights {
    fn default() -> Self {
        Self {
            along: 1.0,
            orthogonal_gap: 4.0,
            orthogonal_offset: 0.5,
        }
    }
}

fn span(rect: &Rect, axis: Axis) -> (f64, f64) {
    match axis {
        Axis::Horizontal => (rect.x0, rect.x1),
        Axis::Vertical => (rect.y0, rect.y1),
    }
}

fn coord(point: Point, axis: Axis) -> f64 {
    match axis {
        Axis::Horizontal => point.x,
        Axis::Vertical => point.y,
    }
}

/// Length of the intersection of the two boxes' projections onto `axis`.
///
/// Negative values are the size of the gap between disjoint projections.
pub fn overlap_on_axis(a: &Rect, b: &Rect, axis: Axis) -> f64 {
    let (a0, a1) = span(a, axis);
    let (b0, b1) = span(b, axis);
    a1.min(b1) - a0.max(b0)
}

/// Returns true if the boxes' projections onto `axis` intersect by more than zero.
///
/// Touching edges do not count as overlap.
pub fn boxes_overlap_on_axis(a: &Rect, b: &Rect, axis: Axis) -> bool {
    overlap_on_axis(a, b, axis) > 0.0
}

/// Signed gap from the origin's leading edge to the candidate's trailing edge
/// along the travel axis. Negative when the boxes overlap on that axis.
fn edge_gap(origin: &Rect, candidate: &Rect, direction: Direction) -> f64 {
    match direction {
        Direction::Right => candidate.x0 - origin.x1,
        Direction::Left => origin.x0 - candidate.x1,
        Direction::Down => candidate.y0 - origin.y1,
        Direction::Up => origin.y0 - candidate.y1,
    }
}

/// How far the candidate's center lies beyond the origin's center in `direction`.
fn center_advance(origin: &Rect, candidate: &Rect, direction: Direction) -> f64 {
    let axis = direction.axis();
    let delta = coord(candidate.center(), axis) - coord(origin.center(), axis);
    if direction.is_increasing() {
        delta
    } else {
        -delta
    }
}

/// Returns true if `candidate` lies on the `direction` side of `origin`.
///
/// A candidate qualifies when its near edge is at or past the origin's far edge
/// along the travel axis, or, when the two overlap on that axis, when its
/// center is still strictly further along than the origin's center.
/// A box identical to the origin never qualifies.
pub fn is_in_direction(origin: &Rect, candidate: &Rect, direction: Direction) -> bool {
    if origin == candidate {
        return false;
    }
    edge_gap(origin, candidate, direction) >= 0.0
        || center_advance(origin, candidate, direction) > 0.0
}

/// Cost of moving focus from `origin` to `candidate` in `direction`.
///
/// Returns `None` when the candidate is not on the correct side of the origin
/// (see [`is_in_direction`]) or when the cost is not finite. Lower is better.
pub fn directional_distance(
    origin: &Rect,
    candidate: &Rect,
    direction: Direction,
    weights: &DistanceWeights,
) -> Option<f64> {
    if !is_in_direction(origin, candidate, direction) {
        return None;
    }
    let orthogonal = direction.axis().orthogonal();
    let along = edge_gap(origin, candidate, direction).max(0.0);
    let lane_gap = (-overlap_on_axis(origin, candidate, orthogonal)).max(0.0);
    let offset = (coord(candidate.center(), orthogonal) - coord(origin.center(), orthogonal)).abs();

    let cost = weights.along * along
        + weights.orthogonal_gap * lane_gap
        + weights.orthogonal_offset * offset;
    cost.is_finite().then_some(cost)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x0: f64, y0: f64, x1: f64, y1: f64) -> Rect {
        Rect::new(x0, y0, x1, y1)
    }

    #[test]
    fn overlap_excludes_touching_edges() {
        let a = r(0.0, 0.0, 10.0, 10.0);
        assert!(boxes_overlap_on_axis(&a, &r(5.0, 20.0, 15.0, 30.0), Axis::Horizontal));
        assert!(!boxes_overlap_on_axis(&a, &r(10.0, 0.0, 20.0, 10.0), Axis::Horizontal));
        assert!(boxes_overlap_on_axis(&a, &r(10.0, 0.0, 20.0, 10.0), Axis::Vertical));
        assert_eq!(overlap_on_axis(&a, &r(15.0, 0.0, 20.0, 10.0), Axis::Horizontal), -5.0);
    }

    #[test]
    fn side_test_per_direction() {
        let o = r(0.0, 0.0, 10.0, 10.0);
        let right = r(20.0, 0.0, 30.0, 10.0);
        let below = r(0.0, 20.0, 10.0, 30.0);
        assert!(is_in_direction(&o, &right, Direction::Right));
        assert!(!is_in_direction(&o, &right, Direction::Left));
        assert!(is_in_direction(&right, &o, Direction::Left));
        assert!(is_in_direction(&o, &below, Direction::Down));
        assert!(!is_in_direction(&o, &below, Direction::Up));
        assert!(!is_in_direction(&o, &o, Direction::Right));
    }

    #[test]
    fn overlapping_candidate_needs_center_further_along() {
        let o = r(0.0, 0.0, 10.0, 10.0);
        // Overlaps horizontally, center at x=11.
        let ahead = r(6.0, 0.0, 16.0, 10.0);
        // Overlaps horizontally, center at x=4.
        let behind = r(-2.0, 0.0, 10.0, 10.0);
        assert!(is_in_direction(&o, &ahead, Direction::Right));
        assert!(!is_in_direction(&o, &behind, Direction::Right));
    }

    #[test]
    fn in_lane_beats_out_of_lane() {
        let w = DistanceWeights::default();
        let o = r(0.0, 0.0, 10.0, 10.0);
        let far_in_lane = r(40.0, 0.0, 50.0, 10.0);
        let near_off_lane = r(15.0, 30.0, 25.0, 40.0);
        let a = directional_distance(&o, &far_in_lane, Direction::Right, &w).unwrap();
        let b = directional_distance(&o, &near_off_lane, Direction::Right, &w).unwrap();
        assert!(a < b, "in-lane {a} should beat off-lane {b}");
    }

    #[test]
    fn better_alignment_wins_at_equal_travel() {
        let w = DistanceWeights::default();
        let o = r(0.0, 0.0, 10.0, 10.0);
        let aligned = r(20.0, 0.0, 30.0, 10.0);
        let shifted = r(20.0, 5.0, 30.0, 15.0);
        let a = directional_distance(&o, &aligned, Direction::Right, &w).unwrap();
        let b = directional_distance(&o, &shifted, Direction::Right, &w).unwrap();
        assert_eq!(a, 10.0);
        assert!(a < b, "aligned {a} should beat shifted {b}");
    }

    #[test]
    fn ineligible_has_no_distance() {
        let w = DistanceWeights::default();
        let o = r(20.0, 0.0, 30.0, 10.0);
        let left = r(0.0, 0.0, 10.0, 10.0);
        assert_eq!(directional_distance(&o, &left, Direction::Right, &w), None);
        assert_eq!(directional_distance(&o, &left, Direction::Left, &w), Some(10.0));
    }
}

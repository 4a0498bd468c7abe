//! Nearest-point solver for a single directed segment
//!
//! A segment is one consecutive pair of link positions. Its direction
//! matters: the solver reports whether the path is moving toward or away
//! from the target at the point of closest approach, and clamps to the
//! matching endpoint when the perpendicular foot falls outside the segment.

use crate::geodesy::Sphere;
use geo::Point;

/// Whether the path is moving toward or away from the target at the point
/// of closest approach
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Approaching,
    Receding,
}

/// A directed great-circle segment between two link positions
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    pub start: Point<f64>,
    pub end: Point<f64>,
}

/// Outcome of solving one segment against a target
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SegmentResult {
    /// Distance from the target to the nearest point, in meters
    pub distance_m: f64,
    /// Nearest point on the segment
    pub nearest: Point<f64>,
    /// Travel direction relative to the target at closest approach
    pub direction: Direction,
    /// Whether the perpendicular foot lies within the segment
    pub within_segment: bool,
}

impl Segment {
    /// Create a new directed segment
    pub fn new(start: Point<f64>, end: Point<f64>) -> Self {
        Self { start, end }
    }

    /// Check whether both endpoints coincide
    ///
    /// Bearings through a degenerate segment are undefined, so the solver
    /// short-circuits instead of evaluating them.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    /// Find the nearest point on this segment to `target`
    ///
    /// The perpendicular foot H of the target onto the great circle through
    /// the segment is resolved by walking the along-track distance both
    /// forward and backward from the start (the along-track formula alone
    /// does not say on which side of the start the foot lies) and keeping
    /// the candidate closer to the target. The foot is inside the segment
    /// iff its fractional along-track position `t` satisfies `0 <= t <= 1`;
    /// otherwise the result clamps to the endpoint on the overshoot side.
    pub fn nearest_point(&self, sphere: &Sphere, target: Point<f64>) -> SegmentResult {
        if self.is_degenerate() {
            // The whole segment is a single point
            return SegmentResult {
                distance_m: sphere.distance(self.start, target),
                nearest: self.start,
                direction: Direction::Approaching,
                within_segment: true,
            };
        }

        let cross_track = sphere
            .cross_track_distance(self.start, self.end, target)
            .abs();
        let along_track = sphere.along_track_distance(self.start, self.end, target);
        let bearing = sphere.bearing(self.start, self.end);

        let forward = sphere.destination(self.start, bearing, along_track);
        let backward = sphere.destination(self.start, bearing, -along_track);

        let (foot, signed_along, direction) =
            if sphere.distance(forward, target) <= sphere.distance(backward, target) {
                (forward, along_track, Direction::Approaching)
            } else {
                (backward, -along_track, Direction::Receding)
            };

        let t = signed_along / sphere.distance(self.start, self.end);
        if (0.0..=1.0).contains(&t) {
            SegmentResult {
                distance_m: cross_track,
                nearest: foot,
                direction,
                within_segment: true,
            }
        } else {
            // Overshoot past the end while approaching, or behind the start
            // while receding
            let endpoint = match direction {
                Direction::Approaching => self.end,
                Direction::Receding => self.start,
            };
            SegmentResult {
                distance_m: sphere.distance(endpoint, target),
                nearest: endpoint,
                direction,
                within_segment: false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meridian_segment() -> Segment {
        Segment::new(Point::new(0.0, 0.0), Point::new(0.0, 1.0))
    }

    #[test]
    fn test_target_on_arc() {
        let sphere = Sphere::default();
        let result = meridian_segment().nearest_point(&sphere, Point::new(0.0, 0.5));

        assert!(result.within_segment);
        assert!(result.distance_m.abs() < 1e-6);
        assert!((result.nearest.x() - 0.0).abs() < 1e-6);
        assert!((result.nearest.y() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_perpendicular_foot_within_segment() {
        let sphere = Sphere::default();
        let segment = Segment::new(Point::new(0.0, 0.0), Point::new(1.0, 0.0));
        let result = segment.nearest_point(&sphere, Point::new(0.5, 0.1));

        assert!(result.within_segment);
        let expected = sphere.radius_m() * 0.1_f64.to_radians();
        assert!((result.distance_m - expected).abs() < 1e-3);
        assert!((result.nearest.x() - 0.5).abs() < 1e-6);
        assert!(result.nearest.y().abs() < 1e-6);
    }

    #[test]
    fn test_overshoot_clamps_to_end() {
        // Target north of the segment: the foot lies past the end point
        let sphere = Sphere::default();
        let result = meridian_segment().nearest_point(&sphere, Point::new(0.0, 2.0));

        assert!(!result.within_segment);
        assert_eq!(result.direction, Direction::Approaching);
        assert_eq!(result.nearest, Point::new(0.0, 1.0));
        let expected = sphere.distance(Point::new(0.0, 1.0), Point::new(0.0, 2.0));
        assert!((result.distance_m - expected).abs() < 1e-6);
    }

    #[test]
    fn test_foot_behind_start_clamps_to_start() {
        let sphere = Sphere::default();
        let result = meridian_segment().nearest_point(&sphere, Point::new(0.0, -1.0));

        assert!(!result.within_segment);
        assert_eq!(result.direction, Direction::Receding);
        assert_eq!(result.nearest, Point::new(0.0, 0.0));
        let expected = sphere.distance(Point::new(0.0, 0.0), Point::new(0.0, -1.0));
        assert!((result.distance_m - expected).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_segment_short_circuits() {
        let sphere = Sphere::default();
        let point = Point::new(10.0, 10.0);
        let segment = Segment::new(point, point);
        let result = segment.nearest_point(&sphere, Point::new(10.0, 11.0));

        assert!(result.within_segment);
        assert_eq!(result.nearest, point);
        let expected = sphere.distance(point, Point::new(10.0, 11.0));
        assert!((result.distance_m - expected).abs() < 1e-6);
    }

    #[test]
    fn test_direction_reflects_travel() {
        // Same geometry, opposite travel directions
        let sphere = Sphere::default();
        let target = Point::new(0.0, 2.0);

        let northbound = meridian_segment().nearest_point(&sphere, target);
        assert_eq!(northbound.direction, Direction::Approaching);

        let southbound = Segment::new(Point::new(0.0, 1.0), Point::new(0.0, 0.0))
            .nearest_point(&sphere, target);
        assert_eq!(southbound.direction, Direction::Receding);
        assert_eq!(southbound.nearest, Point::new(0.0, 1.0));
    }

    #[test]
    fn test_distance_is_non_negative() {
        let sphere = Sphere::default();
        let segment = Segment::new(Point::new(16.0, 48.0), Point::new(17.0, 48.5));
        for (lon, lat) in [(16.5, 48.2), (15.0, 47.0), (18.0, 49.0), (16.0, 48.0)] {
            let result = segment.nearest_point(&sphere, Point::new(lon, lat));
            assert!(result.distance_m >= 0.0);
        }
    }
}

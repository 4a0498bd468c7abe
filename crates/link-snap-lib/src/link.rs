//! Link storage and per-link polyline reduction
//!
//! A link is an identified polyline of at least two positions. The reducer
//! runs the segment solver over every consecutive pair and keeps the
//! minimum-distance result, preferring the earliest segment on ties.

use crate::geodesy::Sphere;
use crate::segment::{Direction, Segment};
use crate::{MatchError, Result};
use geo::{Coord, Point, Rect};

/// An identified polyline of at least two positions
///
/// Validated at construction and never mutated afterwards. The bounding box
/// in degrees is precomputed for downstream consumers (e.g. rendering or
/// prefiltering); the reduction itself does not need it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Link {
    id: String,
    positions: Vec<Point<f64>>,
    bounding_box: Rect<f64>,
}

/// Nearest-point answer for one link
///
/// Carries the winning segment's fields plus the link identity and its full
/// geometry, retained for downstream rendering.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinkResult {
    /// Identifier of the link
    pub link_id: String,
    /// Distance from the target to the nearest point, in meters
    pub distance_m: f64,
    /// Nearest point on the link
    pub nearest: Point<f64>,
    /// Travel direction relative to the target at closest approach
    pub direction: Direction,
    /// Whether the perpendicular foot lies within the winning segment
    pub within_segment: bool,
    /// Index of the winning segment within the link
    pub segment_index: usize,
    /// Full link geometry
    pub positions: Vec<Point<f64>>,
}

impl Link {
    /// Create a new link from an identifier and its positions
    ///
    /// # Errors
    /// Returns [`MatchError::InvalidLink`] when fewer than 2 positions are
    /// given, since no segment can be formed.
    pub fn new(id: impl Into<String>, positions: Vec<Point<f64>>) -> Result<Self> {
        let id = id.into();
        if positions.len() < 2 {
            return Err(MatchError::InvalidLink {
                id,
                point_count: positions.len(),
            });
        }

        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for position in &positions {
            min_x = min_x.min(position.x());
            min_y = min_y.min(position.y());
            max_x = max_x.max(position.x());
            max_y = max_y.max(position.y());
        }
        let bounding_box = Rect::new(
            Coord { x: min_x, y: min_y },
            Coord { x: max_x, y: max_y },
        );

        Ok(Self {
            id,
            positions,
            bounding_box,
        })
    }

    /// Get the link identifier
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the link positions (always at least 2)
    #[inline]
    pub fn positions(&self) -> &[Point<f64>] {
        &self.positions
    }

    /// Get the number of consecutive segments
    #[inline]
    pub fn segment_count(&self) -> usize {
        self.positions.len() - 1
    }

    /// Get the bounding box in degrees (x = longitude, y = latitude)
    #[inline]
    pub fn bounding_box(&self) -> Rect<f64> {
        self.bounding_box
    }

    /// Iterate over the link's directed segments in order
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.positions
            .windows(2)
            .map(|pair| Segment::new(pair[0], pair[1]))
    }

    /// Total length of the link in meters
    pub fn length_m(&self, sphere: &Sphere) -> f64 {
        self.positions
            .windows(2)
            .map(|pair| sphere.distance(pair[0], pair[1]))
            .sum()
    }

    /// Find the nearest point on this link to `target`
    ///
    /// Solves every segment and keeps the minimum-distance result. Ties go
    /// to the lowest segment index, so the selection is stable.
    pub fn nearest_point(&self, sphere: &Sphere, target: Point<f64>) -> LinkResult {
        #[cfg(feature = "profiling")]
        profiling::scope!("link::nearest_point");

        // The >= 2 positions invariant guarantees a first segment
        let mut best_index = 0;
        let mut best = Segment::new(self.positions[0], self.positions[1])
            .nearest_point(sphere, target);

        for (index, segment) in self.segments().enumerate().skip(1) {
            let result = segment.nearest_point(sphere, target);
            if result.distance_m < best.distance_m {
                best_index = index;
                best = result;
            }
        }

        LinkResult {
            link_id: self.id.clone(),
            distance_m: best.distance_m,
            nearest: best.nearest,
            direction: best.direction,
            within_segment: best.within_segment,
            segment_index: best_index,
            positions: self.positions.clone(),
        }
    }
}

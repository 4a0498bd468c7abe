//! Spherical geodesy primitives
//!
//! Closed-form great-circle formulas over (longitude, latitude) positions in
//! decimal degrees, following the classic aviation formulary. Positions are
//! `geo::Point<f64>` with x = longitude and y = latitude; distances are in
//! meters on a sphere whose radius is part of the [`Sphere`] value rather
//! than a constant baked into each formula.

use geo::Point;

/// Mean Earth radius in meters
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// The sphere all geodesic formulas operate on
///
/// Carrying the radius as data keeps it out of the formulas, so unit tests
/// can verify them against a unit sphere or any other radius.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sphere {
    radius_m: f64,
}

impl Default for Sphere {
    fn default() -> Self {
        Self {
            radius_m: EARTH_RADIUS_M,
        }
    }
}

impl Sphere {
    /// Create a sphere with the given radius in meters
    pub fn new(radius_m: f64) -> Self {
        Self { radius_m }
    }

    /// Get the radius in meters
    #[inline]
    pub fn radius_m(&self) -> f64 {
        self.radius_m
    }

    /// Great-circle distance between two positions in meters
    ///
    /// Uses the Haversine formula, which is numerically stable for both
    /// nearby and antipodal positions. Returns 0 for coincident positions.
    #[inline]
    pub fn distance(&self, a: Point<f64>, b: Point<f64>) -> f64 {
        let lat1 = a.y().to_radians();
        let lat2 = b.y().to_radians();
        let delta_lat = (b.y() - a.y()).to_radians();
        let delta_lon = (b.x() - a.x()).to_radians();

        let h = (delta_lat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
        let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

        self.radius_m * c
    }

    /// Initial bearing of the great-circle path from `a` to `b`
    ///
    /// Degrees clockwise from north, in `[0, 360)`. Undefined when the
    /// positions coincide; callers must guard degenerate segments.
    #[inline]
    pub fn bearing(&self, a: Point<f64>, b: Point<f64>) -> f64 {
        let lat1 = a.y().to_radians();
        let lat2 = b.y().to_radians();
        let delta_lon = (b.x() - a.x()).to_radians();

        let y = delta_lon.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lon.cos();

        (y.atan2(x).to_degrees() + 360.0) % 360.0
    }

    /// Signed perpendicular distance from `p` to the great circle through
    /// `a` and `b`, in meters
    ///
    /// The sign indicates which side of the path `p` lies on (negative to
    /// the left of travel). Consumers that only care about separation take
    /// the absolute value.
    #[inline]
    pub fn cross_track_distance(&self, a: Point<f64>, b: Point<f64>, p: Point<f64>) -> f64 {
        let delta13 = self.distance(a, p) / self.radius_m;
        let theta13 = self.bearing(a, p).to_radians();
        let theta12 = self.bearing(a, b).to_radians();

        (delta13.sin() * (theta13 - theta12).sin()).asin() * self.radius_m
    }

    /// Distance from `a` to the foot of the perpendicular dropped from `p`
    /// onto the great circle through `a` and `b`, in meters
    ///
    /// Always non-negative: the spherical Pythagorean relation
    /// `cos(d13) = cos(dat)*cos(dxt)` does not say on which side of `a` the
    /// foot lies. Callers disambiguate via [`Sphere::destination`].
    #[inline]
    pub fn along_track_distance(&self, a: Point<f64>, b: Point<f64>, p: Point<f64>) -> f64 {
        let delta13 = self.distance(a, p) / self.radius_m;
        let delta_xt = self.cross_track_distance(a, b, p) / self.radius_m;

        // The ratio can drift past 1.0 when p sits on the path itself
        let ratio = (delta13.cos() / delta_xt.cos()).clamp(-1.0, 1.0);
        ratio.acos() * self.radius_m
    }

    /// Destination position reached from `a` along `bearing_deg` after
    /// `range_m` meters (the direct geodetic problem)
    ///
    /// A negative range walks the reciprocal bearing, which the segment
    /// solver uses to resolve the foot of the perpendicular behind the
    /// segment start. The returned longitude is normalized to `[-180, 180)`.
    pub fn destination(&self, a: Point<f64>, bearing_deg: f64, range_m: f64) -> Point<f64> {
        let lat1 = a.y().to_radians();
        let lon1 = a.x().to_radians();
        let theta = bearing_deg.to_radians();
        let delta = range_m / self.radius_m;

        let lat2 = (lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * theta.cos()).asin();
        let lon2 = lon1
            + (theta.sin() * delta.sin() * lat1.cos())
                .atan2(delta.cos() - lat1.sin() * lat2.sin());

        let lon_deg = (lon2.to_degrees() + 540.0) % 360.0 - 180.0;
        Point::new(lon_deg, lat2.to_degrees())
    }
}

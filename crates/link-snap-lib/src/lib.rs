//! Link Snap Library - Nearest-Point Map Matching over Link Polylines
//!
//! This library snaps a raw GPS fix to the nearest point of a link network
//! (a set of identified road/path polylines). The engine is built from
//! closed-form spherical geodesics and a layered reduction: per segment, per
//! link, then across the whole network.
//!
//! # Architecture
//!
//! - **[`Sphere`]**: geodesic primitives over a configurable-radius sphere
//! - **[`Segment`]**: nearest-point solver for one directed segment
//! - **[`Link`]**: validated polyline, reduced over its segments
//! - **[`LinkNetwork`]**: GeoJSON ingest, parallel ranking, final answer
//!
//! # Performance Characteristics
//!
//! - **Per link**: O(N) over its segments, constant memory
//! - **Ranking**: embarrassingly parallel per link (rayon fan-out), merged by
//!   a stable minimum-reduction

mod geodesy;
mod link;
mod network;
mod segment;

// Public API exports
pub use geodesy::{EARTH_RADIUS_M, Sphere};
pub use link::{Link, LinkResult};
pub use network::{Config, LinkNetwork, NetworkInfo};
pub use segment::{Direction, Segment, SegmentResult};

/// Error types for the matching engine
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    #[error("Invalid link {id:?}: {point_count} point(s), need at least 2")]
    InvalidLink { id: String, point_count: usize },

    #[error("No links available to rank")]
    EmptyLinkSet,

    #[error("GeoJSON parsing error: {0}")]
    GeoJsonParse(#[from] geojson::Error),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_exports() {
        // Verify that all public types are accessible
        let _: fn(Config) -> LinkNetwork = LinkNetwork::new;
        let _: fn() -> Config = Config::default;
        let _: fn() -> Sphere = Sphere::default;
    }
}

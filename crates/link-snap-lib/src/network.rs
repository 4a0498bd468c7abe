//! LinkNetwork - top-level manager for links, ingest, and ranking
//!
//! This module provides the high-level API for loading a link network from
//! GeoJSON, evaluating every link against a target fix, and selecting the
//! globally nearest result.

use crate::geodesy::Sphere;
use crate::link::{Link, LinkResult};
use crate::{MatchError, Result};

use geo::{Coord, Point, Rect};
use geojson::{FeatureCollection, GeoJson, Value};
use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the link network
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Sphere the geodesic formulas operate on. Defaults to the mean Earth
    /// radius; tests may substitute other radii.
    pub sphere: Sphere,
}

/// Information about the link network
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NetworkInfo {
    /// Number of links loaded
    pub link_count: usize,
    /// Total number of link positions
    pub total_points: usize,
    /// Total length of all links in meters
    pub total_length_meters: f64,
}

/// Cached statistics for the network
///
/// Updated incrementally as links are added, so the info accessors stay O(1).
#[derive(Debug, Clone, Default)]
struct CachedStats {
    total_points: usize,
    total_length: f64,
    bounding_box: Option<Rect<f64>>,
}

/// Top-level manager for all links and queries
#[derive(Debug, Clone)]
pub struct LinkNetwork {
    /// All loaded links, in input order
    links: Vec<Link>,
    /// Configuration settings
    config: Config,
    /// Cached statistics (incrementally updated)
    cached_stats: CachedStats,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl LinkNetwork {
    /// Create an empty network with the given configuration
    pub fn new(config: Config) -> Self {
        Self {
            links: Vec::new(),
            config,
            cached_stats: CachedStats::default(),
        }
    }

    /// Add a validated link to the network
    pub fn add_link(&mut self, link: Link) {
        self.update_stats_for_added_link(&link);
        self.links.push(link);
    }

    /// Build a network from a GeoJSON string
    ///
    /// Expects a `FeatureCollection` of `LineString` features, each carrying
    /// a string `id` property. Features that cannot form a valid link
    /// (missing id, non-LineString geometry, fewer than 2 positions) are
    /// skipped with a warning rather than aborting the whole ingest.
    ///
    /// # Errors
    /// [`MatchError::GeoJsonParse`] when the input is not valid GeoJSON, and
    /// [`MatchError::InvalidGeometry`] when the root object is not a
    /// `FeatureCollection`.
    pub fn from_geojson(input: &str, config: Config) -> Result<Self> {
        #[cfg(feature = "profiling")]
        profiling::scope!("network::from_geojson");

        let collection: FeatureCollection = match input.parse::<GeoJson>()? {
            GeoJson::FeatureCollection(collection) => collection,
            GeoJson::Feature(_) => {
                return Err(MatchError::InvalidGeometry(
                    "expected a FeatureCollection, got a bare Feature".to_string(),
                ));
            }
            GeoJson::Geometry(_) => {
                return Err(MatchError::InvalidGeometry(
                    "expected a FeatureCollection, got a bare Geometry".to_string(),
                ));
            }
        };

        let mut network = Self::new(config);
        for feature in collection.features {
            let Some(id) = feature.property("id").and_then(|v| v.as_str()) else {
                tracing::warn!("skipping feature without a string \"id\" property");
                continue;
            };
            let id = id.to_string();

            let Some(Value::LineString(coords)) = feature.geometry.as_ref().map(|g| &g.value)
            else {
                tracing::warn!(link_id = %id, "skipping feature without LineString geometry");
                continue;
            };

            let mut positions = Vec::with_capacity(coords.len());
            for coord in coords {
                if coord.len() < 2 {
                    break;
                }
                positions.push(Point::new(coord[0], coord[1]));
            }
            if positions.len() != coords.len() {
                tracing::warn!(link_id = %id, "skipping feature with malformed coordinates");
                continue;
            }

            match Link::new(id, positions) {
                Ok(link) => network.add_link(link),
                Err(e) => tracing::warn!("skipping link: {e}"),
            }
        }

        Ok(network)
    }

    /// Load a network from a GeoJSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P, config: Config) -> Result<Self> {
        let input = std::fs::read_to_string(path)?;
        Self::from_geojson(&input, config)
    }

    /// Rank every link by its distance to `target`, ascending
    ///
    /// Links are evaluated independently in parallel (they share no mutable
    /// state), then merged with a stable sort: equal distances keep input
    /// order.
    ///
    /// # Errors
    /// [`MatchError::EmptyLinkSet`] when no links are loaded.
    pub fn rank(&self, target: Point<f64>) -> Result<Vec<LinkResult>> {
        #[cfg(feature = "profiling")]
        profiling::scope!("network::rank");

        if self.links.is_empty() {
            return Err(MatchError::EmptyLinkSet);
        }

        // Parallel fan-out; collect preserves input order for the stable sort
        let mut results: Vec<LinkResult> = self
            .links
            .par_iter()
            .map(|link| link.nearest_point(&self.config.sphere, target))
            .collect();

        results.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));
        Ok(results)
    }

    /// Find the globally nearest link result for `target`
    ///
    /// # Errors
    /// [`MatchError::EmptyLinkSet`] when no links are loaded.
    pub fn nearest(&self, target: Point<f64>) -> Result<LinkResult> {
        let mut ranking = self.rank(target)?;
        Ok(ranking.remove(0))
    }

    /// Get total number of links
    #[inline]
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Check if the network is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Get a reference to a specific link by input order
    #[inline]
    pub fn get_link(&self, index: usize) -> Option<&Link> {
        self.links.get(index)
    }

    /// Get all links in input order
    #[inline]
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get network information
    ///
    /// This is O(1) as all values are cached.
    #[inline]
    pub fn info(&self) -> NetworkInfo {
        NetworkInfo {
            link_count: self.links.len(),
            total_points: self.cached_stats.total_points,
            total_length_meters: self.cached_stats.total_length,
        }
    }

    /// Get the combined bounding box of all links in degrees
    ///
    /// Returns `None` if there are no links loaded.
    #[inline]
    pub fn bounding_box(&self) -> Option<Rect<f64>> {
        self.cached_stats.bounding_box
    }

    /// Update cached statistics when a link is added
    fn update_stats_for_added_link(&mut self, link: &Link) {
        self.cached_stats.total_points += link.positions().len();
        self.cached_stats.total_length += link.length_m(&self.config.sphere);

        let link_bbox = link.bounding_box();
        match &mut self.cached_stats.bounding_box {
            Some(bbox) => {
                *bbox = Rect::new(
                    Coord {
                        x: bbox.min().x.min(link_bbox.min().x),
                        y: bbox.min().y.min(link_bbox.min().y),
                    },
                    Coord {
                        x: bbox.max().x.max(link_bbox.max().x),
                        y: bbox.max().y.max(link_bbox.max().y),
                    },
                );
            }
            None => {
                self.cached_stats.bounding_box = Some(link_bbox);
            }
        }
    }
}

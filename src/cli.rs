//! Command-line interface for snapping a fix to a link network

use crate::report;
use clap::Parser;
use geo::Point;
use link_snap_lib::{Config, LinkNetwork, Sphere};
use std::path::PathBuf;

/// Link Snap - find the nearest point on a link network to a GPS fix
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    /// GeoJSON file with the link network (a FeatureCollection of
    /// LineString features carrying an "id" property)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Target fix as "lon,lat" in decimal degrees
    #[arg(short, long, value_parser = parse_target)]
    pub target: Point<f64>,

    /// Sphere radius in meters (defaults to the mean Earth radius)
    #[arg(long)]
    pub radius_m: Option<f64>,
}

/// Parse a "lon,lat" pair in decimal degrees
fn parse_target(raw: &str) -> Result<Point<f64>, String> {
    let (lon, lat) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected \"lon,lat\", got {raw:?}"))?;
    let lon: f64 = lon
        .trim()
        .parse()
        .map_err(|e| format!("bad longitude: {e}"))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|e| format!("bad latitude: {e}"))?;
    Ok(Point::new(lon, lat))
}

/// Load the network, snap the target, and print the final record
pub fn run(args: &Cli) -> link_snap_lib::Result<()> {
    let mut config = Config::default();
    if let Some(radius_m) = args.radius_m {
        config.sphere = Sphere::new(radius_m);
    }

    let network = LinkNetwork::load_from_file(&args.input, config)?;
    tracing::info!(
        links = network.link_count(),
        points = network.info().total_points,
        "loaded link network"
    );

    let result = network.nearest(args.target)?;
    tracing::debug!(
        link_id = %result.link_id,
        segment_index = result.segment_index,
        within_segment = result.within_segment,
        "matched"
    );

    print!("{}", report::render(&result));
    Ok(())
}

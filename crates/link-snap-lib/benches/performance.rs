//! Performance benchmarks for link-snap-lib
//!
//! Run with: cargo bench --package link-snap-lib

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use geo::Point;
use link_snap_lib::{Config, Link, LinkNetwork};

/// Generate a realistic wiggly link with the specified number of points.
fn generate_link(id: String, num_points: usize, base_lat: f64, base_lon: f64) -> Link {
    let positions: Vec<Point<f64>> = (0..num_points)
        .map(|i| {
            let t = i as f64 / num_points as f64;
            let lat = base_lat + t * 0.1 + (t * 50.0).sin() * 0.001;
            let lon = base_lon + t * 0.1 + (t * 30.0).cos() * 0.001;
            Point::new(lon, lat)
        })
        .collect();
    Link::new(id, positions).unwrap()
}

/// Generate a network of links spread across an area
fn generate_network(num_links: usize, points_per_link: usize) -> LinkNetwork {
    let mut network = LinkNetwork::new(Config::default());
    for i in 0..num_links {
        let lat_offset = (i % 10) as f64 * 0.1;
        let lon_offset = (i / 10) as f64 * 0.1;
        network.add_link(generate_link(
            format!("link-{i}"),
            points_per_link,
            51.5 + lat_offset,
            -0.1 + lon_offset,
        ));
    }
    network
}

// ============================================================================
// Core Benchmarks - Key performance indicators
// ============================================================================

fn bench_single_link_reduction(c: &mut Criterion) {
    let mut group = c.benchmark_group("reduction");

    // One long link with 50k points - representative polyline workload
    let mut network = LinkNetwork::new(Config::default());
    network.add_link(generate_link("long".to_string(), 50_000, 51.5, -0.1));
    let target = Point::new(-0.05, 51.55);

    group.throughput(Throughput::Elements(50_000));
    group.bench_function("single_link_50k", |b| {
        b.iter(|| network.nearest(target).unwrap());
    });

    group.finish();
}

fn bench_many_links(c: &mut Criterion) {
    let mut group = c.benchmark_group("ranking");
    group.sample_size(20);

    // 1000 links with 100 points each
    let network = generate_network(1_000, 100);
    let target = Point::new(0.3, 51.9);
    let total_points = 1_000 * 100;

    group.throughput(Throughput::Elements(total_points as u64));
    group.bench_function("1000_links_100_each", |b| {
        b.iter(|| network.nearest(target).unwrap());
    });

    group.bench_function("rank_1000_links", |b| {
        b.iter(|| network.rank(target).unwrap());
    });

    group.finish();
}

fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("construction");
    group.sample_size(20);

    let total_points = 200 * 100;
    group.throughput(Throughput::Elements(total_points as u64));
    group.bench_function("build_200x100", |b| {
        b.iter(|| generate_network(200, 100));
    });

    group.finish();
}

// ============================================================================
// Criterion Configuration
// ============================================================================

criterion_group!(
    benches,
    bench_single_link_reduction,
    bench_many_links,
    bench_construction,
);

criterion_main!(benches);

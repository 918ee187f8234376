// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Index build and per-pointer-move query costs.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use kurbo::Point;
use understory_snap::{
    Boundary, CandidateSelector, Feature, GeometryId, MapView, SnapCalculator, SnapIndex,
};
use understory_snap_index::{Aabb2D, FlatIndex, Index};

struct UnitMap;

impl MapView for UnitMap {
    fn zoom(&self) -> f64 {
        1.0
    }

    fn coordinate_to_screen(&self, c: Point, zoom: f64) -> Point {
        Point::new(c.x * zoom, -c.y * zoom)
    }

    fn screen_to_coordinate(&self, p: Point, zoom: f64) -> Point {
        Point::new(p.x / zoom, -p.y / zoom)
    }
}

/// Short zig-zag polylines laid out on a square grid.
fn polylines(n: usize) -> Vec<Feature> {
    let side = (n as f64).sqrt().ceil() as usize;
    (0..n)
        .map(|i| {
            let x = (i % side) as f64 * 30.0;
            let y = (i / side) as f64 * 30.0;
            Feature::new(
                i as u64,
                0,
                Boundary::line([(x, y), (x + 8.0, y + 5.0), (x + 16.0, y), (x + 24.0, y + 5.0)]),
            )
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for n in [1_000, 10_000, 100_000] {
        let features = polylines(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &features, |b, features| {
            b.iter(|| SnapIndex::from_sources(black_box(features)));
        });
    }
    group.finish();
}

fn bench_pointer_move(c: &mut Criterion) {
    let mut group = c.benchmark_group("pointer_move");
    for n in [1_000, 10_000, 100_000] {
        let features = polylines(n);
        let (index, _) = SnapIndex::from_sources(&features);
        let map = UnitMap;
        let selector = CandidateSelector::new(&index, &map, 10.0);
        let cursor = Point::new(151.0, 93.0);
        group.bench_with_input(BenchmarkId::from_parameter(n), &cursor, |b, &cursor| {
            b.iter(|| {
                let extent = selector.extent(black_box(cursor), None);
                let candidates = selector.select_in(&extent);
                let calculator = SnapCalculator::new(extent.map_tolerance());
                calculator.nearest(cursor, candidates)
            });
        });
    }
    group.finish();
}

fn bench_backends(c: &mut Criterion) {
    let features = polylines(10_000);
    let (index, _) = SnapIndex::from_sources(&features);
    let entries: Vec<(Aabb2D<f64>, GeometryId)> = index
        .geometries()
        .iter()
        .map(|g| (g.bounds(), g.id()))
        .collect();
    let rtree: Index<f64, GeometryId> = Index::from_entries(entries.iter().copied());
    let flat: FlatIndex<f64, GeometryId> = FlatIndex::from_entries(entries.iter().copied());
    let window = Aabb2D::new(141.0, 83.0, 161.0, 103.0);

    let mut group = c.benchmark_group("query_rect_10k");
    group.bench_function("rtree", |b| {
        b.iter(|| rtree.query_rect(black_box(window)).count());
    });
    group.bench_function("flatvec", |b| {
        b.iter(|| flat.query_rect(black_box(window)).count());
    });
    group.finish();
}

criterion_group!(benches, bench_build, bench_pointer_move, bench_backends);
criterion_main!(benches);

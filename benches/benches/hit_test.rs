// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use trellis_grid::{GridTracks, HitTest, Region, RegionIndex, RegionTarget, SpatialHitTester};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// `n`×`n` panels, each holding one container with `per` instances stacked vertically.
fn populate(index: &mut RegionIndex, n: usize, per: usize, cell: f64) {
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            let id = format!("{x}-{y}");
            index.insert(Region::new(
                Rect::new(x0, y0, x0 + cell, y0 + cell),
                RegionTarget::Panel(format!("p{id}").into()),
            ));
            index.insert(
                Region::new(
                    Rect::new(x0 + 4.0, y0 + 4.0, x0 + cell - 4.0, y0 + cell - 4.0),
                    RegionTarget::Container(format!("c{id}").into()),
                )
                .with_z(1),
            );
            let row = (cell - 8.0) / per as f64;
            for i in 0..per {
                let iy = y0 + 4.0 + i as f64 * row;
                index.insert(
                    Region::new(
                        Rect::new(x0 + 6.0, iy, x0 + cell - 6.0, iy + row),
                        RegionTarget::Instance(format!("i{id}-{i}").into()),
                    )
                    .with_z(2),
                );
            }
        }
    }
}

fn random_points(count: usize, extent: f64) -> Vec<Point> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..count)
        .map(|_| Point::new(rng.next_f64() * extent, rng.next_f64() * extent))
        .collect()
}

fn bench_stack_at(c: &mut Criterion) {
    let mut group = c.benchmark_group("stack_at");
    for &n in &[4usize, 8, 16] {
        let mut index = RegionIndex::new();
        populate(&mut index, n, 6, 100.0);
        let points = random_points(256, n as f64 * 100.0);
        group.throughput(Throughput::Elements(points.len() as u64));
        group.bench_function(format!("regions_{}", index.len()), |b| {
            b.iter(|| {
                let mut hits = 0;
                for &pt in &points {
                    hits += index.stack_at(pt).len();
                }
                black_box(hits);
            });
        });
    }
    group.finish();
}

fn bench_probe(c: &mut Criterion) {
    let mut group = c.benchmark_group("probe");
    let n = 8;
    let extent = n as f64 * 100.0;
    let mut hit = SpatialHitTester::with_grid(
        Rect::new(0.0, 0.0, extent, extent),
        GridTracks::uniform(n, n),
    );
    populate(hit.regions_mut(), n, 6, 100.0);
    let points = random_points(256, extent);
    group.throughput(Throughput::Elements(points.len() as u64));
    group.bench_function("single_scan", |b| {
        b.iter(|| {
            for &pt in &points {
                black_box(hit.probe(pt));
            }
        });
    });
    group.bench_function("per_role_queries", |b| {
        b.iter(|| {
            for &pt in &points {
                black_box((
                    hit.cell_from_point(pt),
                    hit.hovered_panel(pt),
                    hit.hovered_container(pt),
                    hit.hovered_instance(pt),
                ));
            }
        });
    });
    group.finish();
}

fn bench_cell_at(c: &mut Criterion) {
    let mut group = c.benchmark_group("cell_at");
    let bounds = Rect::new(0.0, 0.0, 1600.0, 900.0);
    for &tracks in &[4usize, 16, 64] {
        let sizes: Vec<f64> = (1..=tracks).map(|i| (i % 3 + 1) as f64).collect();
        let grid = GridTracks::new(&sizes, &sizes);
        let points = random_points(1024, 1600.0);
        group.throughput(Throughput::Elements(points.len() as u64));
        group.bench_function(format!("tracks_{tracks}"), |b| {
            b.iter(|| {
                for &pt in &points {
                    black_box(grid.cell_at(bounds, pt));
                }
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_stack_at, bench_probe, bench_cell_at);
criterion_main!(benches);

// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use trellis_drag::{DragPayload, DragSession};
use trellis_grid::{GridTracks, Region, RegionTarget, SpatialHitTester};
use trellis_layout::{Cell, Container, Layout, Panel};

/// One row of `panels` panels, each with a container of `items` instances.
fn board(panels: usize, items: usize) -> (Layout, SpatialHitTester) {
    let mut ps = Vec::with_capacity(panels);
    let mut cs = Vec::with_capacity(panels);
    let width = panels as f64 * 100.0;
    let mut hit = SpatialHitTester::with_grid(
        Rect::new(0.0, 0.0, width, 400.0),
        GridTracks::uniform(1, panels),
    );
    for p in 0..panels {
        let x0 = p as f64 * 100.0;
        let items: Vec<String> = (0..items).map(|i| format!("i{p}-{i}")).collect();
        ps.push(
            Panel::new(format!("p{p}"), Cell::new(0, p as u32)).with_containers([format!("c{p}")]),
        );
        cs.push(Container::new(format!("c{p}"), format!("Column {p}")).with_items(items));
        hit.regions_mut().insert(
            Region::new(
                Rect::new(x0 + 5.0, 0.0, x0 + 95.0, 400.0),
                RegionTarget::Container(format!("c{p}").into()),
            )
            .with_z(1),
        );
    }
    (Layout::new(ps, cs), hit)
}

fn bench_instance_drag(c: &mut Criterion) {
    let mut group = c.benchmark_group("drag_pass");
    for &(panels, items) in &[(4usize, 16usize), (12, 64)] {
        let (layout, hit) = board(panels, items);
        let path: Vec<Point> = (0..64)
            .map(|i| Point::new(i as f64 * panels as f64 * 100.0 / 64.0, 200.0))
            .collect();
        group.bench_function(format!("sweep_p{panels}_i{items}"), |b| {
            b.iter_batched(
                || {
                    let mut s = DragSession::default();
                    s.start(
                        DragPayload::instance("i0-0", Some("c0".into())),
                        Point::new(50.0, 10.0),
                        &layout,
                        &hit,
                    );
                    s
                },
                |mut s| {
                    for &pt in &path {
                        s.move_to(pt);
                        s.run_frame(&hit);
                    }
                    black_box(s.hot().clone());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_instance_drag);
criterion_main!(benches);

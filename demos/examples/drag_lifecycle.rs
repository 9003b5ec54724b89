// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag lifecycle.
//!
//! Start an instance drag, stream pointer moves through the frame coalescer, watch the
//! live preview, then drop and print the committed mutations in their wire form.
//!
//! Run:
//! - `RUST_LOG=trellis_drag=debug cargo run -p trellis_demos --example drag_lifecycle`

use kurbo::{Point, Rect};
use trellis_drag::{
    CommitRouter, DragPayload, DragSession, LayoutStore, MemoryRemote, MemoryStore,
    RemoteChannel, Schedule, SequentialIds,
};
use trellis_grid::{GridTracks, Region, RegionTarget, SpatialHitTester};
use trellis_layout::{Cell, Container, Layout, Panel};

fn main() -> Result<(), serde_json::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let layout = Layout::new(
        vec![
            Panel::new("backlog", Cell::new(0, 0)).with_containers(["todo"]),
            Panel::new("board", Cell::new(0, 1)).with_containers(["doing"]),
        ],
        vec![
            Container::new("todo", "To do").with_items(["write", "review", "ship"]),
            Container::new("doing", "Doing").with_items(["plan"]),
        ],
    );
    let mut store = MemoryStore::new(layout, Vec::new());
    let mut remote = MemoryRemote::new();
    remote.connect("demo-session");
    let mut router = CommitRouter::new(SequentialIds::default());

    let mut hit = SpatialHitTester::with_grid(
        Rect::new(0.0, 0.0, 400.0, 300.0),
        GridTracks::uniform(1, 2),
    );
    let regions = hit.regions_mut();
    regions.insert(Region::new(
        Rect::new(0.0, 0.0, 200.0, 300.0),
        RegionTarget::Panel("backlog".into()),
    ));
    regions.insert(Region::new(
        Rect::new(200.0, 0.0, 400.0, 300.0),
        RegionTarget::Panel("board".into()),
    ));
    regions.insert(
        Region::new(
            Rect::new(210.0, 20.0, 390.0, 280.0),
            RegionTarget::Container("doing".into()),
        )
        .with_z(1),
    );
    regions.insert(
        Region::new(
            Rect::new(220.0, 30.0, 380.0, 60.0),
            RegionTarget::Instance("plan".into()),
        )
        .with_z(2),
    );

    let mut session = DragSession::default();
    session.set_observer(|| println!("  (observer: repaint)"));
    session.start(
        DragPayload::instance("review", Some("todo".into())),
        Point::new(50.0, 60.0),
        store.layout(),
        &hit,
    );

    // A burst of moves within one frame collapses into a single pass.
    let mut frames = 0;
    for x in [120.0, 180.0, 240.0, 300.0] {
        if session.move_to(Point::new(x, 45.0)) == Some(Schedule::Requested) {
            frames += 1;
        }
    }
    session.run_frame(&hit);
    println!("frames requested for 4 moves: {frames}");
    println!("hot target: {:?}", session.hot());

    let preview = session.live_layout(store.layout());
    for c in &preview.containers {
        println!("preview {}: {:?}", c.label, c.items);
    }

    let commit = session.drop_at(
        Point::new(300.0, 45.0),
        None,
        None,
        &hit,
        &mut router,
        &mut store,
        &mut remote,
    );
    match commit {
        Some(commit) => {
            println!("committed {:?}", commit.rule);
            for m in &commit.mutations {
                println!("  {}", serde_json::to_string(m)?);
            }
        }
        None => println!("nothing committed"),
    }
    for c in &store.layout().containers {
        println!("store {}: {:?}", c.label, c.items);
    }
    println!("published to remote: {}", remote.sent().len());
    Ok(())
}

// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drops from outside the window.
//!
//! Encode an instance as platform drag data the way a source window would, drop it on a
//! second window, then drop a desktop file and some text.
//!
//! Run:
//! - `cargo run -p trellis_demos --example native_drops`

use kurbo::{Point, Rect};
use trellis_drag::native::TEXT_PLAIN;
use trellis_drag::{
    CommitRouter, DragConfig, DragPayload, DragSession, LayoutStore, MemoryStore, NativeDrop,
    NativeFile, NoRemote, SequentialIds, encode_native,
};
use trellis_grid::{GridTracks, Region, RegionTarget, SpatialHitTester};
use trellis_layout::{Cell, Container, Layout, Panel};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("trellis_drag=debug"))
        .init();

    // What the source window writes when one of its instances is dragged out.
    let outgoing = encode_native(
        &DragPayload::instance("note-42", Some("inbox".into())),
        Some("Meeting notes"),
        &DragConfig::default(),
    );
    for mime in outgoing.types() {
        println!("{mime}: {}", outgoing.get(mime).unwrap_or_default());
    }

    // The receiving window.
    let mut store = MemoryStore::new(
        Layout::new(
            vec![Panel::new("desk", Cell::ORIGIN).with_containers(["tray"])],
            vec![Container::new("tray", "Tray")],
        ),
        Vec::new(),
    );
    let mut hit = SpatialHitTester::with_grid(
        Rect::new(0.0, 0.0, 300.0, 200.0),
        GridTracks::uniform(1, 1),
    );
    hit.regions_mut().insert(Region::new(
        Rect::new(0.0, 0.0, 300.0, 200.0),
        RegionTarget::Panel("desk".into()),
    ));
    let mut router = CommitRouter::new(SequentialIds::new("local-"));
    let mut session = DragSession::default();
    let at = Point::new(150.0, 100.0);

    let drops = [
        outgoing,
        NativeDrop::new().with_file(NativeFile {
            name: "diagram.png".into(),
            mime: Some("image/png".into()),
        }),
        NativeDrop::new().with_data(TEXT_PLAIN, "Remember to water the plants"),
        NativeDrop::new(),
    ];
    for native in &drops {
        let commit = session.drop_at(
            at,
            None,
            Some(native),
            &hit,
            &mut router,
            &mut store,
            &mut NoRemote,
        );
        println!("-> {:?}", commit.map(|c| c.rule));
    }

    for instance in store.instances() {
        println!(
            "{} {:?} linked_from={:?} data={}",
            instance.id, instance.label, instance.linked_from, instance.data
        );
    }
    println!("tray: {:?}", store.layout().container(&"tray".into()).map(|c| &c.items));
}

// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Drag: drag-and-drop for a panel grid editor.
//!
//! Panels sit in grid cells (several may stack in one cell, one shown at a time),
//! containers sit in panels, and instances sit in containers. All three can be dragged,
//! and external content (files, text, links, items from another editor window) can be
//! dropped in to create new instances.
//!
//! - [`DragSession`] is the per-window state machine. It keeps a [`DraftOverlay`] for
//!   live previews so the authoritative layout is never touched mid-drag, and coalesces
//!   pointer moves into one pass per frame.
//! - [`CommitRouter`] turns a drop into [`Mutation`]s, following the rules documented
//!   in [`commit`].
//! - [`LayoutStore`] and [`RemoteChannel`] are the seams to the host's authoritative
//!   state and to a remote peer. [`MemoryStore`] and [`MemoryRemote`] are in-memory
//!   implementations.
//! - [`native`] reads and writes platform drag data.
//!
//! Hit testing comes from [`trellis_grid`]; the data model from [`trellis_layout`].
//!
//! # Example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use trellis_drag::{
//!     CommitRouter, DragPayload, DragSession, LayoutStore, MemoryRemote, MemoryStore,
//!     Schedule, SequentialIds,
//! };
//! use trellis_grid::{GridTracks, Region, RegionTarget, SpatialHitTester};
//! use trellis_layout::{Cell, Container, Layout, Panel};
//!
//! let layout = Layout::new(
//!     vec![
//!         Panel::new("left", Cell::new(0, 0)).with_containers(["todo"]),
//!         Panel::new("right", Cell::new(0, 1)).with_containers(["done"]),
//!     ],
//!     vec![
//!         Container::new("todo", "To do").with_items(["task"]),
//!         Container::new("done", "Done"),
//!     ],
//! );
//! let mut store = MemoryStore::new(layout, Vec::new());
//! let mut remote = MemoryRemote::new();
//! let mut router = CommitRouter::new(SequentialIds::default());
//!
//! let mut hit = SpatialHitTester::with_grid(
//!     Rect::new(0.0, 0.0, 200.0, 100.0),
//!     GridTracks::uniform(1, 2),
//! );
//! hit.regions_mut().insert(Region::new(
//!     Rect::new(100.0, 0.0, 200.0, 100.0),
//!     RegionTarget::Container("done".into()),
//! ));
//!
//! let mut session = DragSession::default();
//! session.start(
//!     DragPayload::instance("task", Some("todo".into())),
//!     Point::new(20.0, 20.0),
//!     store.layout(),
//!     &hit,
//! );
//!
//! // The host schedules one frame per burst of moves.
//! assert_eq!(session.move_to(Point::new(150.0, 50.0)), Some(Schedule::Requested));
//! session.run_frame(&hit);
//! let preview = session.live_layout(store.layout());
//! assert_eq!(preview.container(&"done".into()).unwrap().items.len(), 1);
//!
//! let commit = session.drop_at(
//!     Point::new(150.0, 50.0),
//!     None,
//!     None,
//!     &hit,
//!     &mut router,
//!     &mut store,
//!     &mut remote,
//! );
//! assert!(commit.is_some());
//! assert!(store.layout().container(&"todo".into()).unwrap().items.is_empty());
//! assert!(!session.is_dragging());
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` in dependencies.
//! - `libm`: floating point support for `no_std` builds.
//! - `uuid`: [`UuidIds`](store::UuidIds), random instance ids.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod coalesce;
pub mod commit;
pub mod config;
pub mod hot;
pub mod native;
pub mod payload;
pub mod session;
pub mod store;

pub use coalesce::{MoveCoalescer, Schedule};
pub use commit::{Commit, CommitRouter, CommitRule, DropSource};
pub use config::DragConfig;
pub use hot::{DropZone, HotRole, HotTarget};
pub use native::{
    CrossWindowPayload, NativeDrop, NativeDropKind, NativeFile, NativePayloadError, classify,
    decode_cross_window, encode_native,
};
pub use payload::{DragContext, DragKind, DragPayload, DragSubject};
pub use session::DragSession;
pub use store::{
    Emit, IdSource, LayoutStore, MemoryRemote, MemoryStore, Mutation, NoRemote, RemoteChannel,
    SequentialIds,
};
#[cfg(feature = "uuid")]
pub use store::UuidIds;

pub use trellis_layout::DraftOverlay;

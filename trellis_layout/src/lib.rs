// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Layout: the panel/container/instance model edited by drag-and-drop.
//!
//! - [`Panel`]s sit in grid [`Cell`]s. Several panels may share a cell (a *stack*); at most
//!   one of them is [`Visibility::Visible`].
//! - [`Container`]s are ordered lists of instance ids, each listed by exactly one panel.
//! - [`Instance`]s are leaf items with an arbitrary JSON payload.
//! - [`Layout`] bundles panels and containers, the part of the state a drag rearranges.
//! - [`DraftOverlay`] is a copy-on-write working copy of a [`Layout`] for live previews.
//!
//! Moves always remove an id from every list before inserting it once, so a layout never
//! lists an id twice. [`Layout::check_unique`] verifies that.
//!
//! # Example
//!
//! ```rust
//! use trellis_layout::{Cell, Container, Layout, Panel};
//!
//! let mut layout = Layout::new(
//!     vec![
//!         Panel::new("left", Cell::new(0, 0)).with_containers(["todo"]),
//!         Panel::new("right", Cell::new(0, 1)).with_containers(["done"]),
//!     ],
//!     vec![
//!         Container::new("todo", "To do").with_items(["a", "b"]),
//!         Container::new("done", "Done"),
//!     ],
//! );
//!
//! layout.move_instance(&"a".into(), &"done".into(), None);
//! assert_eq!(layout.container_of_instance(&"a".into()).map(|c| c.as_str()), Some("done"));
//! assert!(layout.check_unique());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod draft;
pub mod ids;
pub mod model;

pub use draft::DraftOverlay;
pub use ids::{ContainerId, InstanceId, PanelId};
pub use model::{Cell, Container, Instance, Layout, Panel, PanelStyle, Visibility};

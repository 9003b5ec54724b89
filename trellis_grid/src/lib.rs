// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Grid: hit testing for drag-and-drop over a panel grid.
//!
//! Two questions get asked on every pointer pass of a drag:
//!
//! - *Which grid cell is under the pointer?* [`GridTracks`] answers from proportional row
//!   and column sizes and the grid's bounds, so it never depends on rendered pixel sizes.
//! - *Which panel, container, and instance are under the pointer?* [`RegionIndex`] holds
//!   rectangles registered by the hosting UI and answers topmost-first: the highest
//!   z-index wins, and regions further down the stack are ignored even when they match.
//!
//! [`SpatialHitTester`] bundles both behind the [`HitTest`] trait, which is what the drag
//! layer consumes.
//!
//! ## Not a layout engine
//!
//! Nothing here measures or arranges. The UI computes rectangles however it likes and
//! registers them; hidden stack members clear [`RegionFlags::VISIBLE`] and drop out of
//! queries.
//!
//! # Example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use trellis_grid::{GridTracks, HitTest, Region, RegionTarget, SpatialHitTester};
//! use trellis_layout::Cell;
//!
//! // A 2×2 grid where the first column is twice as wide.
//! let mut hit = SpatialHitTester::with_grid(
//!     Rect::new(0.0, 0.0, 300.0, 200.0),
//!     GridTracks::new(&[1.0, 1.0], &[2.0, 1.0]),
//! );
//! hit.regions_mut().insert(Region::new(
//!     Rect::new(0.0, 0.0, 200.0, 100.0),
//!     RegionTarget::Panel("notes".into()),
//! ));
//!
//! let pt = Point::new(150.0, 50.0);
//! assert_eq!(hit.cell_from_point(pt), Some(Cell::new(0, 0)));
//! assert_eq!(hit.hovered_panel(pt).unwrap().as_str(), "notes");
//! assert_eq!(hit.hovered_container(pt), None);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod hit;
pub mod index;
pub mod tracks;
pub mod types;

pub use hit::{HitTest, Probe, SpatialHitTester};
pub use index::RegionIndex;
pub use tracks::GridTracks;
pub use types::{Region, RegionFlags, RegionKey, RegionRole, RegionTarget};

// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Speculative working copies of a [`Layout`] used for live drag previews.
//!
//! ## Usage
//!
//! 1) Call [`DraftOverlay::begin`] when a drag starts. Both collections are deep-cloned
//!    into a start snapshot and a working draft.
//! 2) Call [`DraftOverlay::preview_move_instance`] / [`DraftOverlay::preview_move_container`]
//!    as the pointer moves. Only the draft changes.
//! 3) Render from [`DraftOverlay::draft`] while the drag lasts, then drop the overlay.
//!
//! ```
//! use trellis_layout::{Cell, Container, DraftOverlay, Panel};
//!
//! let panels = vec![Panel::new("p", Cell::ORIGIN).with_containers(["c1", "c2"])];
//! let containers = vec![
//!     Container::new("c1", "Inbox").with_items(["a", "b"]),
//!     Container::new("c2", "Done"),
//! ];
//!
//! let mut overlay = DraftOverlay::begin(&panels, &containers);
//! overlay.preview_move_instance(&"a".into(), &"c2".into(), None);
//!
//! assert_eq!(overlay.draft().container(&"c2".into()).unwrap().items.len(), 1);
//! // The authoritative collections are untouched.
//! assert_eq!(containers[0].items.len(), 2);
//! ```

use alloc::vec::Vec;

use crate::ids::{ContainerId, InstanceId, PanelId};
use crate::model::{Container, Layout, Panel};

/// Start snapshot plus live working copy for one drag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DraftOverlay {
    start: Layout,
    draft: Layout,
}

impl DraftOverlay {
    /// Deep-clone `panels` and `containers` into a fresh overlay.
    ///
    /// Every nested list and style map is owned by the overlay, so no preview can reach
    /// the caller's collections.
    pub fn begin(panels: &[Panel], containers: &[Container]) -> Self {
        let start = Layout::new(panels.to_vec(), containers.to_vec());
        let draft = start.clone();
        Self { start, draft }
    }

    /// Begin from a whole layout.
    pub fn from_layout(layout: &Layout) -> Self {
        Self::begin(&layout.panels, &layout.containers)
    }

    /// Immutable snapshot taken at [`DraftOverlay::begin`].
    pub fn start(&self) -> &Layout {
        &self.start
    }

    /// Live working copy.
    pub fn draft(&self) -> &Layout {
        &self.draft
    }

    /// Remove `instance` from every draft container, then insert it into `to` at `index`.
    ///
    /// Idempotent for repeated identical calls. Returns `false` (and changes nothing) if
    /// `to` is not in the draft.
    pub fn preview_move_instance(
        &mut self,
        instance: &InstanceId,
        to: &ContainerId,
        index: Option<usize>,
    ) -> bool {
        let moved = self.draft.move_instance(instance, to, index);
        tracing::trace!(%instance, container = %to, ?index, moved, "preview instance move");
        moved
    }

    /// Remove `container` from every draft panel, then insert it into `to` at `index`.
    pub fn preview_move_container(
        &mut self,
        container: &ContainerId,
        to: &PanelId,
        index: Option<usize>,
    ) -> bool {
        let moved = self.draft.move_container(container, to, index);
        tracing::trace!(%container, panel = %to, ?index, moved, "preview container move");
        moved
    }

    /// Throw away all previews and return to the start snapshot.
    pub fn reset(&mut self) {
        self.draft.clone_from(&self.start);
    }

    /// True if the draft still equals the start snapshot.
    pub fn is_pristine(&self) -> bool {
        self.start == self.draft
    }

    /// Draft panels that differ from their start snapshot.
    pub fn changed_panels(&self) -> Vec<&Panel> {
        self.draft
            .panels
            .iter()
            .filter(|p| self.start.panel(&p.id) != Some(*p))
            .collect()
    }

    /// Draft containers that differ from their start snapshot.
    pub fn changed_containers(&self) -> Vec<&Container> {
        self.draft
            .containers
            .iter()
            .filter(|c| self.start.container(&c.id) != Some(*c))
            .collect()
    }
}

// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout records: panels in grid cells, containers in panels, instances in containers.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::ids::{ContainerId, InstanceId, PanelId};

/// A grid cell address.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    /// Zero-based row.
    pub row: u32,
    /// Zero-based column.
    pub col: u32,
}

impl Cell {
    /// The top-left cell.
    pub const ORIGIN: Self = Self::new(0, 0);

    /// Create a cell address.
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

/// Formats as `r{row}c{col}`, the key hosts use to name cell drop zones.
impl core::fmt::Display for Cell {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "r{}c{}", self.row, self.col)
    }
}

/// Whether a panel is the shown member of its cell's stack.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Rendered in its cell.
    #[default]
    Visible,
    /// Present in the stack but not rendered.
    Hidden,
}

/// Presentation state of a panel.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelStyle {
    /// Stack visibility.
    pub visibility: Visibility,
    /// Opaque style properties owned by the hosting UI; carried through untouched.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
}

/// A positioned occupant of a grid cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Panel {
    /// Unique id.
    pub id: PanelId,
    /// Grid position. Several panels may share a cell.
    pub cell: Cell,
    /// Ordered container ids.
    pub containers: Vec<ContainerId>,
    /// Visibility and opaque style.
    #[serde(default)]
    pub style: PanelStyle,
}

impl Panel {
    /// Create a visible panel with no containers.
    pub fn new(id: impl Into<PanelId>, cell: Cell) -> Self {
        Self {
            id: id.into(),
            cell,
            containers: Vec::new(),
            style: PanelStyle::default(),
        }
    }

    /// Builder-style helper that sets the container list.
    pub fn with_containers<I, C>(mut self, containers: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<ContainerId>,
    {
        self.containers = containers.into_iter().map(Into::into).collect();
        self
    }

    /// Builder-style helper that sets the visibility.
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.style.visibility = visibility;
        self
    }

    /// True if this panel is the shown member of its stack.
    pub fn is_visible(&self) -> bool {
        self.style.visibility == Visibility::Visible
    }
}

/// An ordered collection of instances owned by one panel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    /// Unique id.
    pub id: ContainerId,
    /// Display label.
    pub label: String,
    /// Ordered instance ids.
    pub items: Vec<InstanceId>,
}

impl Container {
    /// Create an empty container.
    pub fn new(id: impl Into<ContainerId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            items: Vec::new(),
        }
    }

    /// Builder-style helper that sets the item list.
    pub fn with_items<I, T>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<InstanceId>,
    {
        self.items = items.into_iter().map(Into::into).collect();
        self
    }

    /// Position of `id` in this container.
    pub fn position(&self, id: &InstanceId) -> Option<usize> {
        self.items.iter().position(|i| i == id)
    }
}

/// A leaf content item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    /// Unique id.
    pub id: InstanceId,
    /// Display label.
    pub label: String,
    /// Arbitrary payload owned by the content editor.
    #[serde(default)]
    pub data: serde_json::Value,
    /// Instance this one was cloned from (for example by a cross-window drop).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_from: Option<InstanceId>,
}

impl Instance {
    /// Create an instance with a null payload.
    pub fn new(id: impl Into<InstanceId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            data: serde_json::Value::Null,
            linked_from: None,
        }
    }
}

/// Panels and containers: the part of the editor state a drag can rearrange.
///
/// Panel order is significant: it decides which stack member is revealed when the
/// visible one leaves its cell.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    /// All panels in their original order.
    pub panels: Vec<Panel>,
    /// All containers.
    pub containers: Vec<Container>,
}

impl Layout {
    /// Create a layout from its two collections.
    pub fn new(panels: Vec<Panel>, containers: Vec<Container>) -> Self {
        Self { panels, containers }
    }

    /// Look up a panel.
    pub fn panel(&self, id: &PanelId) -> Option<&Panel> {
        self.panels.iter().find(|p| &p.id == id)
    }

    /// Look up a panel mutably.
    pub fn panel_mut(&mut self, id: &PanelId) -> Option<&mut Panel> {
        self.panels.iter_mut().find(|p| &p.id == id)
    }

    /// Look up a container.
    pub fn container(&self, id: &ContainerId) -> Option<&Container> {
        self.containers.iter().find(|c| &c.id == id)
    }

    /// Look up a container mutably.
    pub fn container_mut(&mut self, id: &ContainerId) -> Option<&mut Container> {
        self.containers.iter_mut().find(|c| &c.id == id)
    }

    /// Panels occupying `cell`, in original order.
    pub fn panels_at(&self, cell: Cell) -> impl Iterator<Item = &Panel> + '_ {
        self.panels.iter().filter(move |p| p.cell == cell)
    }

    /// The shown member of the stack at `cell`, if any.
    pub fn visible_at(&self, cell: Cell) -> Option<&Panel> {
        self.panels_at(cell).find(|p| p.is_visible())
    }

    /// The panel listing `container`.
    pub fn panel_of_container(&self, container: &ContainerId) -> Option<&PanelId> {
        self.panels
            .iter()
            .find(|p| p.containers.contains(container))
            .map(|p| &p.id)
    }

    /// The container listing `instance`.
    pub fn container_of_instance(&self, instance: &InstanceId) -> Option<&ContainerId> {
        self.containers
            .iter()
            .find(|c| c.items.contains(instance))
            .map(|c| &c.id)
    }

    /// Move `instance` into `to` at `index` (appended when `None`, clamped otherwise).
    ///
    /// The id is removed from every container first, so it ends up listed exactly once.
    /// Returns `false` and leaves the layout untouched if `to` does not exist.
    pub fn move_instance(
        &mut self,
        instance: &InstanceId,
        to: &ContainerId,
        index: Option<usize>,
    ) -> bool {
        if self.container(to).is_none() {
            return false;
        }
        for c in &mut self.containers {
            c.items.retain(|i| i != instance);
        }
        if let Some(target) = self.container_mut(to) {
            insert_clamped(&mut target.items, instance.clone(), index);
        }
        true
    }

    /// Move `container` into panel `to` at `index`; same contract as [`Self::move_instance`].
    pub fn move_container(
        &mut self,
        container: &ContainerId,
        to: &PanelId,
        index: Option<usize>,
    ) -> bool {
        if self.panel(to).is_none() {
            return false;
        }
        for p in &mut self.panels {
            p.containers.retain(|c| c != container);
        }
        if let Some(target) = self.panel_mut(to) {
            insert_clamped(&mut target.containers, container.clone(), index);
        }
        true
    }

    /// True if no container id is listed twice across panels and no instance id is
    /// listed twice across containers.
    pub fn check_unique(&self) -> bool {
        let mut seen_containers = alloc::collections::BTreeSet::new();
        for id in self.panels.iter().flat_map(|p| &p.containers) {
            if !seen_containers.insert(id) {
                return false;
            }
        }
        let mut seen_items = alloc::collections::BTreeSet::new();
        for id in self.containers.iter().flat_map(|c| &c.items) {
            if !seen_items.insert(id) {
                return false;
            }
        }
        true
    }
}

fn insert_clamped<T>(list: &mut Vec<T>, value: T, index: Option<usize>) {
    match index {
        Some(i) => list.insert(i.min(list.len()), value),
        None => list.push(value),
    }
}

// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover feedback and explicit drop-zone context.

use trellis_grid::Probe;
use trellis_layout::{Cell, ContainerId, InstanceId, PanelId};

/// The most specific kind of thing under the pointer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HotRole {
    /// Nothing.
    #[default]
    None,
    /// Bare grid cell.
    Cell,
    /// A panel.
    Panel,
    /// A container.
    Container,
    /// An instance.
    Instance,
}

/// Drop-zone context supplied by the hosting UI.
///
/// Drop zones know what they represent without geometry, so their answers take priority
/// over hit testing. Every field is optional; missing ones fall back to hit testing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DropZone {
    /// Grid cell.
    pub cell: Option<Cell>,
    /// Panel.
    pub panel: Option<PanelId>,
    /// Container.
    pub container: Option<ContainerId>,
    /// Instance the pointer is over.
    pub over_instance: Option<InstanceId>,
}

impl DropZone {
    /// A zone for a grid cell.
    pub fn cell(cell: Cell) -> Self {
        Self {
            cell: Some(cell),
            ..Self::default()
        }
    }

    /// A zone for a panel.
    pub fn panel(panel: impl Into<PanelId>) -> Self {
        Self {
            panel: Some(panel.into()),
            ..Self::default()
        }
    }

    /// A zone for a container.
    pub fn container(container: impl Into<ContainerId>) -> Self {
        Self {
            container: Some(container.into()),
            ..Self::default()
        }
    }

    /// Also mark the instance under the pointer.
    pub fn over(mut self, instance: impl Into<InstanceId>) -> Self {
        self.over_instance = Some(instance.into());
        self
    }

    /// Fill every missing field from a hit-test probe.
    pub fn or_probe(&self, probe: Probe) -> HotTarget {
        HotTarget::new(
            self.cell.or(probe.cell),
            self.panel.clone().or(probe.panel),
            self.container.clone().or(probe.container),
            self.over_instance.clone().or(probe.instance),
        )
    }
}

/// What the pointer is over, for hover highlighting.
///
/// Advisory only: commits resolve their own target at drop time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HotTarget {
    role: HotRole,
    /// Grid cell.
    pub cell: Option<Cell>,
    /// Panel.
    pub panel: Option<PanelId>,
    /// Container.
    pub container: Option<ContainerId>,
    /// Instance.
    pub over_instance: Option<InstanceId>,
}

impl HotTarget {
    fn new(
        cell: Option<Cell>,
        panel: Option<PanelId>,
        container: Option<ContainerId>,
        over_instance: Option<InstanceId>,
    ) -> Self {
        let mut hot = Self {
            role: HotRole::None,
            cell,
            panel,
            container,
            over_instance,
        };
        hot.refresh_role();
        hot
    }

    /// Target built purely from hit testing.
    pub fn from_probe(probe: Probe) -> Self {
        Self::new(probe.cell, probe.panel, probe.container, probe.instance)
    }

    /// Most specific role present.
    pub fn role(&self) -> HotRole {
        self.role
    }

    /// True when nothing is under the pointer.
    pub fn is_empty(&self) -> bool {
        self.role == HotRole::None
    }

    /// Overwrite the fields `zone` knows about and keep the rest.
    pub fn merge(&mut self, zone: &DropZone) {
        if zone.cell.is_some() {
            self.cell = zone.cell;
        }
        if let Some(panel) = &zone.panel {
            self.panel = Some(panel.clone());
        }
        if let Some(container) = &zone.container {
            self.container = Some(container.clone());
        }
        if let Some(instance) = &zone.over_instance {
            self.over_instance = Some(instance.clone());
        }
        self.refresh_role();
    }

    fn refresh_role(&mut self) {
        self.role = if self.over_instance.is_some() {
            HotRole::Instance
        } else if self.container.is_some() {
            HotRole::Container
        } else if self.panel.is_some() {
            HotRole::Panel
        } else if self.cell.is_some() {
            HotRole::Cell
        } else {
            HotRole::None
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_is_most_specific() {
        let hot = HotTarget::from_probe(Probe {
            cell: Some(Cell::ORIGIN),
            panel: Some("p".into()),
            container: Some("c".into()),
            instance: None,
        });
        assert_eq!(hot.role(), HotRole::Container);
        assert!(HotTarget::default().is_empty());
    }

    #[test]
    fn merge_keeps_unknown_fields() {
        let mut hot = HotTarget::from_probe(Probe {
            cell: Some(Cell::new(1, 1)),
            panel: Some("p".into()),
            ..Probe::default()
        });
        hot.merge(&DropZone::container("c").over("i"));
        assert_eq!(hot.cell, Some(Cell::new(1, 1)));
        assert_eq!(hot.panel, Some(PanelId::new("p")));
        assert_eq!(hot.container, Some(ContainerId::new("c")));
        assert_eq!(hot.role(), HotRole::Instance);
    }

    #[test]
    fn zone_wins_over_probe() {
        let probe = Probe {
            cell: Some(Cell::ORIGIN),
            panel: Some("under".into()),
            container: Some("hit".into()),
            instance: None,
        };
        let resolved = DropZone::container("explicit").or_probe(probe);
        assert_eq!(resolved.container, Some(ContainerId::new("explicit")));
        assert_eq!(resolved.panel, Some(PanelId::new("under")));
        assert_eq!(resolved.cell, Some(Cell::ORIGIN));
    }
}

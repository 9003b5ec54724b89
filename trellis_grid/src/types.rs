// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the region index: keys, flags, roles, and registered regions.

use kurbo::Rect;
use trellis_layout::{ContainerId, InstanceId, PanelId};

/// Handle to a registered region.
///
/// A slot index plus a generation counter. Removing a region frees its slot; reusing the
/// slot bumps the generation, so a stale key never aliases a newer region.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct RegionKey(pub(crate) u32, pub(crate) u32);

impl RegionKey {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Region flags controlling participation in hit testing.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct RegionFlags: u8 {
        /// Region is on screen. Hidden stack members clear this.
        const VISIBLE  = 0b0000_0001;
        /// Region accepts drops (participates in hit testing).
        const DROPPABLE = 0b0000_0010;
    }
}

impl Default for RegionFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::DROPPABLE
    }
}

/// Which layout level a region identifies.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RegionRole {
    /// A panel occupying a grid cell.
    Panel,
    /// A container inside a panel.
    Container,
    /// An instance inside a container.
    Instance,
}

/// The layout item a region stands for.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RegionTarget {
    /// A panel.
    Panel(PanelId),
    /// A container.
    Container(ContainerId),
    /// An instance.
    Instance(InstanceId),
}

impl RegionTarget {
    /// Layout level of this target.
    pub fn role(&self) -> RegionRole {
        match self {
            Self::Panel(_) => RegionRole::Panel,
            Self::Container(_) => RegionRole::Container,
            Self::Instance(_) => RegionRole::Instance,
        }
    }
}

/// A rectangle registered by the hosting UI.
#[derive(Clone, Debug, PartialEq)]
pub struct Region {
    /// World-space bounds. Containment is half-open: `x0 <= x < x1`, `y0 <= y < y1`.
    pub bounds: Rect,
    /// Stacking order. Higher is on top.
    pub z_index: i32,
    /// Visibility and drop participation.
    pub flags: RegionFlags,
    /// What the region identifies.
    pub target: RegionTarget,
}

impl Region {
    /// A visible, droppable region at z-index `0`.
    pub fn new(bounds: Rect, target: RegionTarget) -> Self {
        Self {
            bounds,
            z_index: 0,
            flags: RegionFlags::default(),
            target,
        }
    }

    /// Builder-style helper that sets the z-index.
    pub fn with_z(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Builder-style helper that sets the flags.
    pub fn with_flags(mut self, flags: RegionFlags) -> Self {
        self.flags = flags;
        self
    }

    /// True if the region takes part in hit testing.
    pub fn is_hittable(&self) -> bool {
        self.flags
            .contains(RegionFlags::VISIBLE | RegionFlags::DROPPABLE)
    }
}

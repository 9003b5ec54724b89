// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point queries combining grid cells and registered regions.

use kurbo::{Point, Rect};
use trellis_layout::{Cell, ContainerId, InstanceId, PanelId};

use crate::index::RegionIndex;
use crate::tracks::GridTracks;
use crate::types::{RegionRole, RegionTarget};

/// Everything a point query can tell about what is under the pointer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Probe {
    /// Grid cell, if the grid is laid out.
    pub cell: Option<Cell>,
    /// Topmost panel.
    pub panel: Option<PanelId>,
    /// Topmost container.
    pub container: Option<ContainerId>,
    /// Topmost instance.
    pub instance: Option<InstanceId>,
}

/// Source of hit-test answers for a drag surface.
///
/// [`SpatialHitTester`] is the stock implementation. Hosts that already own a scene
/// graph can implement this directly.
pub trait HitTest {
    /// The grid cell under `pt`, or `None` without usable grid geometry.
    fn cell_from_point(&self, pt: Point) -> Option<Cell>;

    /// The topmost panel under `pt`.
    fn hovered_panel(&self, pt: Point) -> Option<PanelId>;

    /// The topmost container under `pt`.
    fn hovered_container(&self, pt: Point) -> Option<ContainerId>;

    /// The topmost instance under `pt`.
    fn hovered_instance(&self, pt: Point) -> Option<InstanceId>;

    /// All four answers at once.
    fn probe(&self, pt: Point) -> Probe {
        Probe {
            cell: self.cell_from_point(pt),
            panel: self.hovered_panel(pt),
            container: self.hovered_container(pt),
            instance: self.hovered_instance(pt),
        }
    }
}

/// Grid geometry plus a region index.
///
/// The grid bounds are `None` until the hosting UI has laid the grid out; cell queries
/// return `None` until then.
#[derive(Clone, Debug, Default)]
pub struct SpatialHitTester {
    bounds: Option<Rect>,
    tracks: GridTracks,
    regions: RegionIndex,
}

impl SpatialHitTester {
    /// An empty tester with no grid geometry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A tester for a grid laid out in `bounds`.
    pub fn with_grid(bounds: Rect, tracks: GridTracks) -> Self {
        Self {
            bounds: Some(bounds),
            tracks,
            regions: RegionIndex::new(),
        }
    }

    /// Set or forget the grid's world-space bounds.
    pub fn set_grid_bounds(&mut self, bounds: Option<Rect>) {
        self.bounds = bounds;
    }

    /// Replace the grid tracks.
    pub fn set_tracks(&mut self, tracks: GridTracks) {
        self.tracks = tracks;
    }

    /// Current grid bounds.
    pub fn grid_bounds(&self) -> Option<Rect> {
        self.bounds
    }

    /// Current grid tracks.
    pub fn tracks(&self) -> &GridTracks {
        &self.tracks
    }

    /// Registered regions.
    pub fn regions(&self) -> &RegionIndex {
        &self.regions
    }

    /// Registered regions, for registration and updates.
    pub fn regions_mut(&mut self) -> &mut RegionIndex {
        &mut self.regions
    }
}

impl HitTest for SpatialHitTester {
    fn cell_from_point(&self, pt: Point) -> Option<Cell> {
        self.tracks.cell_at(self.bounds?, pt)
    }

    fn hovered_panel(&self, pt: Point) -> Option<PanelId> {
        match self.regions.first_at(pt, RegionRole::Panel)? {
            RegionTarget::Panel(id) => Some(id.clone()),
            _ => None,
        }
    }

    fn hovered_container(&self, pt: Point) -> Option<ContainerId> {
        match self.regions.first_at(pt, RegionRole::Container)? {
            RegionTarget::Container(id) => Some(id.clone()),
            _ => None,
        }
    }

    fn hovered_instance(&self, pt: Point) -> Option<InstanceId> {
        match self.regions.first_at(pt, RegionRole::Instance)? {
            RegionTarget::Instance(id) => Some(id.clone()),
            _ => None,
        }
    }

    fn probe(&self, pt: Point) -> Probe {
        // One sorted scan instead of three.
        let mut probe = Probe {
            cell: self.cell_from_point(pt),
            ..Probe::default()
        };
        for (_, region) in self.regions.stack_at(pt) {
            match &region.target {
                RegionTarget::Panel(id) if probe.panel.is_none() => probe.panel = Some(id.clone()),
                RegionTarget::Container(id) if probe.container.is_none() => {
                    probe.container = Some(id.clone());
                }
                RegionTarget::Instance(id) if probe.instance.is_none() => {
                    probe.instance = Some(id.clone());
                }
                _ => {}
            }
        }
        tracing::trace!(x = pt.x, y = pt.y, ?probe, "probe");
        probe
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Region, RegionFlags};

    /// Two columns; the left panel holds a container with one instance.
    fn surface() -> SpatialHitTester {
        let mut hit = SpatialHitTester::with_grid(
            Rect::new(0.0, 0.0, 200.0, 100.0),
            GridTracks::uniform(1, 2),
        );
        let r = hit.regions_mut();
        r.insert(Region::new(
            Rect::new(0.0, 0.0, 100.0, 100.0),
            RegionTarget::Panel("left".into()),
        ));
        r.insert(Region::new(
            Rect::new(100.0, 0.0, 200.0, 100.0),
            RegionTarget::Panel("right".into()),
        ));
        r.insert(
            Region::new(
                Rect::new(10.0, 10.0, 90.0, 90.0),
                RegionTarget::Container("box".into()),
            )
            .with_z(1),
        );
        r.insert(
            Region::new(
                Rect::new(20.0, 20.0, 80.0, 40.0),
                RegionTarget::Instance("item".into()),
            )
            .with_z(2),
        );
        hit
    }

    #[test]
    fn nested_regions_all_answer() {
        let hit = surface();
        let probe = hit.probe(Point::new(30.0, 30.0));
        assert_eq!(probe.cell, Some(Cell::new(0, 0)));
        assert_eq!(probe.panel, Some(PanelId::new("left")));
        assert_eq!(probe.container, Some(ContainerId::new("box")));
        assert_eq!(probe.instance, Some(InstanceId::new("item")));
    }

    #[test]
    fn fast_probe_matches_individual_queries() {
        let hit = surface();
        for pt in [
            Point::new(30.0, 30.0),
            Point::new(50.0, 60.0),
            Point::new(150.0, 50.0),
            Point::new(500.0, 500.0),
        ] {
            let expected = Probe {
                cell: hit.cell_from_point(pt),
                panel: hit.hovered_panel(pt),
                container: hit.hovered_container(pt),
                instance: hit.hovered_instance(pt),
            };
            assert_eq!(hit.probe(pt), expected);
        }
    }

    #[test]
    fn empty_space_inside_container() {
        let hit = surface();
        assert_eq!(hit.hovered_instance(Point::new(50.0, 60.0)), None);
        assert_eq!(
            hit.hovered_container(Point::new(50.0, 60.0)),
            Some(ContainerId::new("box"))
        );
    }

    #[test]
    fn missing_grid_bounds_give_no_cell() {
        let mut hit = surface();
        hit.set_grid_bounds(None);
        assert_eq!(hit.cell_from_point(Point::new(10.0, 10.0)), None);
        assert_eq!(hit.hovered_panel(Point::new(10.0, 10.0)), Some(PanelId::new("left")));
    }

    #[test]
    fn hidden_stack_member_is_not_hovered() {
        let mut hit = SpatialHitTester::new();
        let r = hit.regions_mut();
        r.insert(Region::new(
            Rect::new(0.0, 0.0, 10.0, 10.0),
            RegionTarget::Panel("shown".into()),
        ));
        r.insert(
            Region::new(
                Rect::new(0.0, 0.0, 10.0, 10.0),
                RegionTarget::Panel("hidden".into()),
            )
            .with_flags(RegionFlags::DROPPABLE),
        );
        assert_eq!(hit.hovered_panel(Point::new(5.0, 5.0)), Some(PanelId::new("shown")));
    }
}

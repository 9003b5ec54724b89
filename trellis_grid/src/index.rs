// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Z-ordered region list with generational keys.

use alloc::vec::Vec;

use kurbo::{Point, Rect};

use crate::types::{Region, RegionFlags, RegionKey, RegionRole, RegionTarget};

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    /// Insertion order of the current occupant; breaks z-index ties.
    seq: u64,
    region: Option<Region>,
}

/// Regions registered by the hosting UI, queried topmost-first.
///
/// Queries are linear scans. Drag surfaces hold at most a few hundred regions, and the
/// scan runs once per coalesced pointer pass.
#[derive(Clone, Default)]
pub struct RegionIndex {
    slots: Vec<Slot>,
    free_list: Vec<usize>,
    next_seq: u64,
}

impl core::fmt::Debug for RegionIndex {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RegionIndex")
            .field("total_slots", &self.slots.len())
            .field("alive", &self.len())
            .finish_non_exhaustive()
    }
}

impl RegionIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live regions.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.region.is_some()).count()
    }

    /// True if no region is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Register a region. Returns a stable handle.
    pub fn insert(&mut self, region: Region) -> RegionKey {
        let seq = self.next_seq;
        self.next_seq += 1;
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let slot = &mut self.slots[idx];
            slot.generation = slot.generation.saturating_add(1);
            slot.seq = seq;
            slot.region = Some(region);
            (idx, slot.generation)
        } else {
            self.slots.push(Slot {
                generation: 1,
                seq,
                region: Some(region),
            });
            (self.slots.len() - 1, 1)
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "RegionKey uses 32-bit slot indices."
        )]
        let idx = idx as u32;
        RegionKey::new(idx, generation)
    }

    /// Unregister a region, returning it if `key` was live.
    pub fn remove(&mut self, key: RegionKey) -> Option<Region> {
        let slot = self.slot_mut(key)?;
        let region = slot.region.take();
        self.free_list.push(key.idx());
        region
    }

    /// Drop every region. Outstanding keys become stale.
    pub fn clear(&mut self) {
        for (i, slot) in self.slots.iter_mut().enumerate() {
            if slot.region.take().is_some() {
                self.free_list.push(i);
            }
        }
    }

    /// True if `key` refers to a live region.
    pub fn is_alive(&self, key: RegionKey) -> bool {
        self.get(key).is_some()
    }

    /// Borrow a live region.
    pub fn get(&self, key: RegionKey) -> Option<&Region> {
        let slot = self.slots.get(key.idx())?;
        if slot.generation != key.1 {
            return None;
        }
        slot.region.as_ref()
    }

    /// Update a region's bounds.
    pub fn set_bounds(&mut self, key: RegionKey, bounds: Rect) {
        if let Some(r) = self.region_mut(key) {
            r.bounds = bounds;
        }
    }

    /// Update a region's z-index.
    pub fn set_z_index(&mut self, key: RegionKey, z_index: i32) {
        if let Some(r) = self.region_mut(key) {
            r.z_index = z_index;
        }
    }

    /// Update a region's flags.
    pub fn set_flags(&mut self, key: RegionKey, flags: RegionFlags) {
        if let Some(r) = self.region_mut(key) {
            r.flags = flags;
        }
    }

    /// Hittable regions containing `pt`, topmost first.
    ///
    /// Higher z-index wins; equal z-indices resolve to the most recently inserted
    /// region, independent of which slots were reused.
    pub fn stack_at(&self, pt: Point) -> Vec<(RegionKey, &Region)> {
        let mut hits: Vec<(RegionKey, u64, &Region)> = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| {
                let region = slot.region.as_ref()?;
                if !region.is_hittable() || !region.bounds.contains(pt) {
                    return None;
                }
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "RegionKey uses 32-bit slot indices."
                )]
                let idx = i as u32;
                Some((RegionKey::new(idx, slot.generation), slot.seq, region))
            })
            .collect();
        hits.sort_by(|(_, sa, a), (_, sb, b)| b.z_index.cmp(&a.z_index).then(sb.cmp(sa)));
        hits.into_iter().map(|(key, _, region)| (key, region)).collect()
    }

    /// The topmost hittable region under `pt` with the given role.
    ///
    /// Only the first match counts; lower regions with the same role are ignored.
    pub fn first_at(&self, pt: Point, role: RegionRole) -> Option<&RegionTarget> {
        self.stack_at(pt)
            .into_iter()
            .map(|(_, r)| &r.target)
            .find(|t| t.role() == role)
    }

    fn slot_mut(&mut self, key: RegionKey) -> Option<&mut Slot> {
        let slot = self.slots.get_mut(key.idx())?;
        if slot.generation != key.1 || slot.region.is_none() {
            return None;
        }
        Some(slot)
    }

    fn region_mut(&mut self, key: RegionKey) -> Option<&mut Region> {
        self.slot_mut(key)?.region.as_mut()
    }
}

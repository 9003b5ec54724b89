// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-window drag state machine.
//!
//! A session is either idle or dragging. While dragging it owns the payload, a
//! [`DraftOverlay`] for live previews, and the current [`HotTarget`]:
//!
//! - [`DragSession::start`] snapshots the layout and enters dragging.
//! - [`DragSession::move_to`] records the pointer; the first move after a pass returns
//!   [`Schedule::Requested`] and the host calls [`DragSession::run_frame`] on its next
//!   frame. Later moves overwrite the pending point.
//! - [`DragSession::drop_at`] resolves the target, routes the commit, and clears.
//! - [`DragSession::clear`], [`DragSession::cancel`], and [`DragSession::leave_surface`]
//!   return to idle without committing.
//!
//! The observer registered with [`DragSession::set_observer`] runs after every change.

use alloc::boxed::Box;

use kurbo::Point;
use trellis_grid::HitTest;
use trellis_layout::{DraftOverlay, Layout};

use crate::coalesce::{MoveCoalescer, Schedule};
use crate::commit::{Commit, CommitRouter, DropSource};
use crate::config::DragConfig;
use crate::hot::{DropZone, HotTarget};
use crate::native::{NativeDrop, NativeDropKind, classify};
use crate::payload::{DragPayload, DragSubject};
use crate::store::{IdSource, LayoutStore, RemoteChannel};

#[derive(Clone, Debug)]
struct ActiveDrag {
    payload: DragPayload,
    overlay: DraftOverlay,
}

/// Drag state for one window.
pub struct DragSession {
    config: DragConfig,
    active: Option<ActiveDrag>,
    hot: HotTarget,
    pending: MoveCoalescer<Point>,
    observer: Option<Box<dyn FnMut()>>,
}

impl core::fmt::Debug for DragSession {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DragSession")
            .field("config", &self.config)
            .field("active", &self.active)
            .field("hot", &self.hot)
            .field("pending", &self.pending)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl Default for DragSession {
    fn default() -> Self {
        Self::new(DragConfig::default())
    }
}

impl DragSession {
    /// An idle session.
    pub fn new(config: DragConfig) -> Self {
        Self {
            config,
            active: None,
            hot: HotTarget::default(),
            pending: MoveCoalescer::new(),
            observer: None,
        }
    }

    /// Session configuration.
    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    /// Register the change callback, replacing any previous one.
    pub fn set_observer(&mut self, observer: impl FnMut() + 'static) {
        self.observer = Some(Box::new(observer));
    }

    /// True between a successful [`Self::start`] and the next drop or clear.
    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// Payload of the current drag.
    pub fn payload(&self) -> Option<&DragPayload> {
        self.active.as_ref().map(|a| &a.payload)
    }

    /// What the pointer was over at the last pass.
    pub fn hot(&self) -> &HotTarget {
        &self.hot
    }

    /// Preview overlay of the current drag.
    pub fn overlay(&self) -> Option<&DraftOverlay> {
        self.active.as_ref().map(|a| &a.overlay)
    }

    /// The layout to render: the draft while dragging, `authoritative` otherwise.
    pub fn live_layout<'a>(&'a self, authoritative: &'a Layout) -> &'a Layout {
        match &self.active {
            Some(active) => active.overlay.draft(),
            None => authoritative,
        }
    }

    /// True if a frame pass is scheduled.
    pub fn has_pending_frame(&self) -> bool {
        self.pending.is_pending()
    }

    /// Begin dragging `payload` from `pt`.
    ///
    /// Does nothing and returns `false` if a drag is already active.
    pub fn start(
        &mut self,
        payload: DragPayload,
        pt: Point,
        layout: &Layout,
        hit: &(impl HitTest + ?Sized),
    ) -> bool {
        if self.active.is_some() {
            tracing::debug!(kind = ?payload.kind(), "drag already active; start ignored");
            return false;
        }
        tracing::debug!(
            kind = ?payload.kind(),
            id = payload.id(),
            x = pt.x,
            y = pt.y,
            "drag started"
        );
        self.active = Some(ActiveDrag {
            payload,
            overlay: DraftOverlay::from_layout(layout),
        });
        self.hot = HotTarget::from_probe(hit.probe(pt));
        self.notify();
        true
    }

    /// Record a pointer move. Returns `None` when idle.
    pub fn move_to(&mut self, pt: Point) -> Option<Schedule> {
        if self.active.is_none() {
            return None;
        }
        Some(self.pending.push(pt))
    }

    /// Run the scheduled pass: hit-test the latest point and update previews.
    ///
    /// Returns `false` when nothing was pending or the session is idle.
    pub fn run_frame(&mut self, hit: &(impl HitTest + ?Sized)) -> bool {
        let coalesced = self.pending.coalesced_count();
        let Some(pt) = self.pending.take() else {
            return false;
        };
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        self.hot = HotTarget::from_probe(hit.probe(pt));
        tracing::trace!(x = pt.x, y = pt.y, coalesced, role = ?self.hot.role(), "frame pass");
        match &active.payload.subject {
            DragSubject::Instance { id } => {
                if let Some(container) = &self.hot.container {
                    let draft = active.overlay.draft();
                    let index = self
                        .hot
                        .over_instance
                        .as_ref()
                        .and_then(|over| draft.container(container)?.position(over));
                    active.overlay.preview_move_instance(id, container, index);
                }
            }
            DragSubject::Container { id } => {
                if let Some(panel) = &self.hot.panel {
                    active.overlay.preview_move_container(id, panel, None);
                }
            }
            _ => {}
        }
        self.notify();
        true
    }

    /// Merge explicit drop-zone context into the hot target.
    ///
    /// Ignored when idle. The hot target is feedback only; drops resolve their own.
    pub fn over(&mut self, zone: &DropZone) {
        if self.active.is_none() {
            return;
        }
        self.hot.merge(zone);
        self.notify();
    }

    /// Complete a drop at `pt`.
    ///
    /// The session's own payload takes priority. When idle, `native` is classified and
    /// external or cross-window content is committed instead. Explicit `zone` context
    /// wins over hit testing field by field. The session is cleared afterwards whether
    /// or not anything was committed.
    pub fn drop_at<I, S, R>(
        &mut self,
        pt: Point,
        zone: Option<&DropZone>,
        native: Option<&NativeDrop>,
        hit: &(impl HitTest + ?Sized),
        router: &mut CommitRouter<I>,
        store: &mut S,
        remote: &mut R,
    ) -> Option<Commit>
    where
        I: IdSource,
        S: LayoutStore + ?Sized,
        R: RemoteChannel + ?Sized,
    {
        let probe = hit.probe(pt);
        let target = match zone {
            Some(zone) => zone.or_probe(probe),
            None => HotTarget::from_probe(probe),
        };
        let adapted = match (&self.active, native) {
            (Some(_), _) | (None, None) => None,
            (None, Some(native)) => Some(classify(native, &self.config)),
        };
        let source = match (&self.active, &adapted) {
            (Some(active), _) => Some(DropSource::Drag(&active.payload)),
            (None, Some(NativeDropKind::External(payload))) => Some(DropSource::Drag(payload)),
            (None, Some(NativeDropKind::CrossWindow(payload))) => {
                Some(DropSource::CrossWindow(payload))
            }
            (None, Some(NativeDropKind::Unrecognized) | None) => None,
        };
        let commit = match source {
            Some(source) => router.route(source, &target, store.layout(), &self.config),
            None => {
                tracing::debug!("drop with nothing to commit");
                None
            }
        };
        if let Some(commit) = &commit {
            commit.clone().apply(store, remote);
        }
        self.clear();
        commit
    }

    /// Return to idle, discarding the payload, previews, hot target, and pending pass.
    ///
    /// Always notifies the observer, and is safe to call repeatedly.
    pub fn clear(&mut self) {
        if self.active.take().is_some() {
            tracing::debug!("drag cleared");
        }
        self.hot = HotTarget::default();
        self.pending.cancel();
        self.notify();
    }

    /// Abort the drag (for example on Escape).
    pub fn cancel(&mut self) {
        if self.is_dragging() {
            tracing::debug!("drag cancelled");
        }
        self.clear();
    }

    /// The pointer left the interactive surface.
    pub fn leave_surface(&mut self) {
        if self.is_dragging() {
            tracing::debug!("pointer left surface");
        }
        self.clear();
    }

    fn notify(&mut self) {
        if let Some(observer) = &mut self.observer {
            observer();
        }
    }
}

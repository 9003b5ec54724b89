// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Turning a drop into authoritative mutations.
//!
//! The payload decides which rule applies, so at most one fires per drop:
//!
//! 1. **Panel** dropped on a different cell: moves there and becomes the shown member of
//!    that cell's stack. The first remaining panel (in layout order) at the source cell
//!    is revealed.
//! 2. **Container** dropped on a panel other than its owner: unlisted everywhere, then
//!    appended to the target panel.
//! 3. **Instance** dropped on a container: unlisted everywhere, then inserted before the
//!    hovered sibling (its index in the authoritative list at drop time), or appended.
//! 4. **External** content dropped on a container: a new instance is created with a
//!    derived label and appended.
//! 5. **Cross-window** item with a label: same as 4, linked to its source instance.
//!
//! A rule whose target is missing, or whose result equals the current state, produces
//! no commit.

use alloc::vec::Vec;

use trellis_layout::{ContainerId, Instance, InstanceId, Layout, PanelId, Visibility};

use crate::config::DragConfig;
use crate::hot::HotTarget;
use crate::native::CrossWindowPayload;
use crate::payload::{DragContext, DragPayload, DragSubject};
use crate::store::{Emit, IdSource, LayoutStore, Mutation, RemoteChannel, SequentialIds};

/// What was dropped.
#[derive(Clone, Copy, Debug)]
pub enum DropSource<'a> {
    /// A drag that started in this window, or external content adapted from a platform drop.
    Drag(&'a DragPayload),
    /// An item dragged from another editor window.
    CrossWindow(&'a CrossWindowPayload),
}

/// Which rule produced a commit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommitRule {
    /// Panel moved to another cell.
    MovePanel,
    /// Container moved to another panel.
    MoveContainer,
    /// Instance moved into a container.
    MoveInstance,
    /// New instance from external content.
    ExternalDrop,
    /// New instance from another editor window.
    CrossWindowDrop,
}

/// Mutations produced by one drop.
#[derive(Clone, Debug, PartialEq)]
pub struct Commit {
    /// Rule that fired.
    pub rule: CommitRule,
    /// Changes, in dispatch order.
    pub mutations: Vec<Mutation>,
}

impl Commit {
    /// Publish every mutation to `remote`, then dispatch it to `store`.
    ///
    /// Dispatches use [`Emit::Local`]: the mutation has already been published, and a
    /// store that forwards [`Emit::Broadcast`] changes must not send it again.
    pub fn apply<S, R>(self, store: &mut S, remote: &mut R)
    where
        S: LayoutStore + ?Sized,
        R: RemoteChannel + ?Sized,
    {
        for mutation in self.mutations {
            remote.publish(&mutation);
            store.dispatch(mutation, Emit::Local);
        }
    }
}

/// Applies the commit rules.
#[derive(Clone, Debug, Default)]
pub struct CommitRouter<I = SequentialIds> {
    ids: I,
}

impl<I: IdSource> CommitRouter<I> {
    /// A router drawing new instance ids from `ids`.
    pub fn new(ids: I) -> Self {
        Self { ids }
    }

    /// Decide what a drop of `source` on `target` does to `layout`.
    pub fn route(
        &mut self,
        source: DropSource<'_>,
        target: &HotTarget,
        layout: &Layout,
        config: &DragConfig,
    ) -> Option<Commit> {
        let (rule, mutations) = match source {
            DropSource::Drag(payload) => match &payload.subject {
                DragSubject::Panel { id } => {
                    (CommitRule::MovePanel, move_panel(id, target, layout)?)
                }
                DragSubject::Container { id } => (
                    CommitRule::MoveContainer,
                    move_container(id, &payload.context, target, layout)?,
                ),
                DragSubject::Instance { id } => {
                    (CommitRule::MoveInstance, move_instance(id, target, layout)?)
                }
                DragSubject::File { .. }
                | DragSubject::Text { .. }
                | DragSubject::Url { .. }
                | DragSubject::External { .. } => {
                    let to = resolve_container(target, layout)?;
                    let label = payload.derive_label(config)?;
                    let mut instance = Instance::new(self.ids.next_instance_id(), label);
                    instance.data = payload.instance_data();
                    (CommitRule::ExternalDrop, create_instance(instance, to, layout)?)
                }
            },
            DropSource::CrossWindow(payload) => {
                let Some(label) = payload.label() else {
                    tracing::debug!(id = %payload.id, "cross-window drop without label");
                    return None;
                };
                let to = resolve_container(target, layout)?;
                let mut instance = Instance::new(self.ids.next_instance_id(), label);
                instance.linked_from = payload.source_instance();
                (CommitRule::CrossWindowDrop, create_instance(instance, to, layout)?)
            }
        };
        if mutations.is_empty() {
            tracing::debug!(?rule, "drop changed nothing");
            return None;
        }
        tracing::debug!(?rule, mutations = mutations.len(), "drop committed");
        Some(Commit { rule, mutations })
    }
}

fn move_panel(id: &PanelId, target: &HotTarget, layout: &Layout) -> Option<Vec<Mutation>> {
    let to = target.cell?;
    let from = layout.panel(id)?.cell;
    if from == to {
        return None;
    }
    let mut out = Vec::new();
    let mut revealed = false;
    for panel in &layout.panels {
        let (cell, visibility) = if &panel.id == id {
            (to, Visibility::Visible)
        } else if panel.cell == from {
            let v = if revealed { Visibility::Hidden } else { Visibility::Visible };
            revealed = true;
            (from, v)
        } else if panel.cell == to {
            (to, Visibility::Hidden)
        } else {
            continue;
        };
        if panel.cell != cell || panel.style.visibility != visibility {
            let mut updated = panel.clone();
            updated.cell = cell;
            updated.style.visibility = visibility;
            out.push(Mutation::UpdatePanel { panel: updated });
        }
    }
    Some(out)
}

fn move_container(
    id: &ContainerId,
    context: &DragContext,
    target: &HotTarget,
    layout: &Layout,
) -> Option<Vec<Mutation>> {
    let to = target.panel.as_ref()?;
    layout.panel(to)?;
    let from = context
        .panel
        .as_ref()
        .or_else(|| layout.panel_of_container(id));
    if from == Some(to) {
        return None;
    }
    let mut out = Vec::new();
    for panel in &layout.panels {
        let mut containers = panel.containers.clone();
        containers.retain(|c| c != id);
        if &panel.id == to {
            containers.push(id.clone());
        }
        if containers != panel.containers {
            let mut updated = panel.clone();
            updated.containers = containers;
            out.push(Mutation::UpdatePanel { panel: updated });
        }
    }
    Some(out)
}

fn move_instance(id: &InstanceId, target: &HotTarget, layout: &Layout) -> Option<Vec<Mutation>> {
    let to = target.container.as_ref()?;
    let dest = layout.container(to)?;
    let index = target
        .over_instance
        .as_ref()
        .and_then(|over| dest.position(over));
    let mut out = Vec::new();
    for container in &layout.containers {
        let mut items = container.items.clone();
        items.retain(|i| i != id);
        if &container.id == to {
            match index {
                Some(i) => items.insert(i.min(items.len()), id.clone()),
                None => items.push(id.clone()),
            }
        }
        if items != container.items {
            let mut updated = container.clone();
            updated.items = items;
            out.push(Mutation::UpdateContainer { container: updated });
        }
    }
    Some(out)
}

fn create_instance(instance: Instance, to: &ContainerId, layout: &Layout) -> Option<Vec<Mutation>> {
    let mut container = layout.container(to)?.clone();
    container.items.push(instance.id.clone());
    Some(alloc::vec![
        Mutation::CreateInstance { instance },
        Mutation::UpdateContainer { container },
    ])
}

/// Explicit container, else the first container of the target panel, else the first
/// container of the shown panel in the target cell.
fn resolve_container<'a>(target: &'a HotTarget, layout: &'a Layout) -> Option<&'a ContainerId> {
    if let Some(c) = &target.container {
        return Some(c);
    }
    let panel = match &target.panel {
        Some(p) => layout.panel(p)?,
        None => layout.visible_at(target.cell?)?,
    };
    panel.containers.first()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hot::DropZone;
    use crate::native::{CrossWindowMeta, CrossWindowOrigin};
    use crate::payload::DragKind;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;
    use trellis_grid::Probe;
    use trellis_layout::{Cell, Container, Panel};

    fn layout() -> Layout {
        Layout::new(
            vec![
                Panel::new("p1", Cell::new(0, 0)).with_containers(["c1"]),
                Panel::new("p2", Cell::new(0, 0))
                    .with_containers(["c2"])
                    .with_visibility(Visibility::Hidden),
                Panel::new("p3", Cell::new(0, 1)).with_containers(["c3"]),
            ],
            vec![
                Container::new("c1", "One").with_items(["a", "b"]),
                Container::new("c2", "Two").with_items(["x", "y"]),
                Container::new("c3", "Three"),
            ],
        )
    }

    fn target(zone: DropZone) -> HotTarget {
        zone.or_probe(Probe::default())
    }

    fn route(payload: &DragPayload, zone: DropZone) -> Option<Commit> {
        CommitRouter::new(SequentialIds::new("n"))
            .route(
                DropSource::Drag(payload),
                &target(zone),
                &layout(),
                &DragConfig::default(),
            )
    }

    fn apply(layout: &mut Layout, commit: &Commit) {
        for m in &commit.mutations {
            match m {
                Mutation::UpdatePanel { panel } => {
                    *layout.panel_mut(&panel.id).unwrap() = panel.clone();
                }
                Mutation::UpdateContainer { container } => {
                    *layout.container_mut(&container.id).unwrap() = container.clone();
                }
                _ => {}
            }
        }
    }

    #[test]
    fn panel_move_reveals_next_in_stack() {
        let commit = route(&DragPayload::panel("p1"), DropZone::cell(Cell::new(0, 1))).unwrap();
        assert_eq!(commit.rule, CommitRule::MovePanel);
        let mut l = layout();
        apply(&mut l, &commit);
        assert_eq!(l.visible_at(Cell::new(0, 1)).unwrap().id.as_str(), "p1");
        assert!(!l.panel(&"p3".into()).unwrap().is_visible());
        assert_eq!(l.visible_at(Cell::new(0, 0)).unwrap().id.as_str(), "p2");
        for cell in [Cell::new(0, 0), Cell::new(0, 1)] {
            assert_eq!(l.panels_at(cell).filter(|p| p.is_visible()).count(), 1);
        }
    }

    #[test]
    fn panel_on_own_cell_is_noop() {
        assert_eq!(
            route(&DragPayload::panel("p1"), DropZone::cell(Cell::new(0, 0))),
            None
        );
    }

    #[test]
    fn container_reparent() {
        let payload = DragPayload::container("c1", Some("p1".into()));
        let commit = route(&payload, DropZone::panel("p3")).unwrap();
        let mut l = layout();
        apply(&mut l, &commit);
        assert!(l.panel(&"p1".into()).unwrap().containers.is_empty());
        assert_eq!(
            l.panel(&"p3".into()).unwrap().containers,
            vec![ContainerId::new("c3"), ContainerId::new("c1")]
        );
        assert!(l.check_unique());
    }

    #[test]
    fn container_on_own_panel_is_noop() {
        assert_eq!(route(&DragPayload::container("c1", None), DropZone::panel("p1")), None);
    }

    #[test]
    fn container_needs_existing_panel() {
        assert_eq!(route(&DragPayload::container("c1", None), DropZone::panel("nope")), None);
    }

    #[test]
    fn instance_lands_before_hovered_sibling() {
        let commit = route(
            &DragPayload::instance("a", Some("c1".into())),
            DropZone::container("c2").over("y"),
        )
        .unwrap();
        let mut l = layout();
        apply(&mut l, &commit);
        assert_eq!(
            l.container(&"c2".into()).unwrap().items,
            vec![InstanceId::new("x"), InstanceId::new("a"), InstanceId::new("y")]
        );
        assert_eq!(l.container(&"c1".into()).unwrap().items, vec![InstanceId::new("b")]);
    }

    #[test]
    fn instance_on_empty_space_appends() {
        let commit = route(&DragPayload::instance("a", None), DropZone::container("c3")).unwrap();
        let mut l = layout();
        apply(&mut l, &commit);
        assert_eq!(l.container(&"c3".into()).unwrap().items, vec![InstanceId::new("a")]);
    }

    #[test]
    fn instance_on_itself_is_noop() {
        assert_eq!(
            route(&DragPayload::instance("a", None), DropZone::container("c1").over("a")),
            None
        );
    }

    #[test]
    fn instance_into_unknown_container_is_noop() {
        assert_eq!(route(&DragPayload::instance("a", None), DropZone::container("zz")), None);
    }

    #[test]
    fn file_drop_creates_labelled_instance() {
        let commit = route(&DragPayload::file(None, None), DropZone::container("c3")).unwrap();
        assert_eq!(commit.rule, CommitRule::ExternalDrop);
        let Mutation::CreateInstance { instance } = &commit.mutations[0] else {
            panic!("expected create");
        };
        assert_eq!(instance.label, "File");
        assert_eq!(instance.id.as_str(), "n1");
        let Mutation::UpdateContainer { container } = &commit.mutations[1] else {
            panic!("expected container update");
        };
        assert_eq!(container.items, vec![InstanceId::new("n1")]);
    }

    #[test]
    fn external_drop_on_panel_uses_first_container() {
        let commit = route(&DragPayload::text("hello"), DropZone::panel("p1")).unwrap();
        let Mutation::UpdateContainer { container } = &commit.mutations[1] else {
            panic!("expected container update");
        };
        assert_eq!(container.id.as_str(), "c1");
        assert_eq!(container.items.len(), 3);
    }

    #[test]
    fn external_drop_on_cell_uses_shown_panel() {
        let commit =
            route(&DragPayload::url("https://x.test"), DropZone::cell(Cell::ORIGIN)).unwrap();
        let Mutation::UpdateContainer { container } = &commit.mutations[1] else {
            panic!("expected container update");
        };
        assert_eq!(container.id.as_str(), "c1");
    }

    #[test]
    fn cross_window_links_source() {
        let payload = CrossWindowPayload {
            v: 1,
            kind: DragKind::Instance,
            id: "remote-7".into(),
            from: CrossWindowOrigin::default(),
            meta: CrossWindowMeta {
                label: Some("Notes".into()),
            },
        };
        let commit = CommitRouter::new(SequentialIds::new("n"))
            .route(
                DropSource::CrossWindow(&payload),
                &target(DropZone::container("c3")),
                &layout(),
                &DragConfig::default(),
            )
            .unwrap();
        assert_eq!(commit.rule, CommitRule::CrossWindowDrop);
        let Mutation::CreateInstance { instance } = &commit.mutations[0] else {
            panic!("expected create");
        };
        assert_eq!(instance.label, "Notes");
        assert_eq!(instance.linked_from, Some(InstanceId::new("remote-7")));
    }

    #[test]
    fn cross_window_without_label_is_ignored() {
        let payload = CrossWindowPayload {
            v: 1,
            kind: DragKind::Instance,
            id: "remote-7".into(),
            from: CrossWindowOrigin::default(),
            meta: CrossWindowMeta::default(),
        };
        let commit = CommitRouter::new(SequentialIds::default()).route(
            DropSource::CrossWindow(&payload),
            &target(DropZone::container("c3")),
            &layout(),
            &DragConfig::default(),
        );
        assert_eq!(commit, None);
    }

    /// Store that forwards `Emit::Broadcast` dispatches onto the same wire as the remote.
    struct ForwardingStore {
        layout: Layout,
        wire: Rc<RefCell<Vec<Mutation>>>,
    }

    impl LayoutStore for ForwardingStore {
        fn layout(&self) -> &Layout {
            &self.layout
        }

        fn instance(&self, _id: &InstanceId) -> Option<&Instance> {
            None
        }

        fn dispatch(&mut self, mutation: Mutation, emit: Emit) {
            if emit == Emit::Broadcast {
                self.wire.borrow_mut().push(mutation);
            }
        }
    }

    struct Wire(Rc<RefCell<Vec<Mutation>>>);

    impl RemoteChannel for Wire {
        fn connect(&mut self, _token: &str) {}

        fn is_connected(&self) -> bool {
            true
        }

        fn publish(&mut self, mutation: &Mutation) {
            self.0.borrow_mut().push(mutation.clone());
        }
    }

    #[test]
    fn apply_reaches_peer_once() {
        let commit = route(
            &DragPayload::instance("a", Some("c1".into())),
            DropZone::container("c3"),
        )
        .unwrap();
        assert_eq!(commit.mutations.len(), 2);
        let wire = Rc::new(RefCell::new(Vec::new()));
        let mut store = ForwardingStore {
            layout: layout(),
            wire: Rc::clone(&wire),
        };
        let mut remote = Wire(Rc::clone(&wire));
        let expected = commit.mutations.clone();
        commit.apply(&mut store, &mut remote);
        assert_eq!(*wire.borrow(), expected);
    }
}

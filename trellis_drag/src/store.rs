// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Seams to the authoritative store, the remote peer, and id generation.
//!
//! The drag layer never mutates state itself. Commits become [`Mutation`]s that go to a
//! [`LayoutStore`] and, in equal form, to a [`RemoteChannel`]. In-memory implementations
//! are provided for tests and single-window hosts.

use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};
use trellis_layout::{Container, Instance, InstanceId, Layout, Panel};

/// A typed change to the authoritative state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Mutation {
    /// Replace (or insert) a panel record.
    UpdatePanel {
        /// New record.
        panel: Panel,
    },
    /// Replace (or insert) a container record.
    UpdateContainer {
        /// New record.
        container: Container,
    },
    /// Create an instance record.
    CreateInstance {
        /// New record.
        instance: Instance,
    },
    /// Delete an instance and unlist it everywhere.
    DeleteInstance {
        /// Id to delete.
        id: InstanceId,
    },
}

/// Whether the store itself must forward a dispatched change to the remote peer.
///
/// [`Commit::apply`](crate::Commit::apply) publishes through its [`RemoteChannel`] and
/// then dispatches with [`Emit::Local`], so each committed mutation reaches the peer once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Emit {
    /// Apply locally only: the change came from the peer, or was already published.
    #[default]
    Local,
    /// Apply locally and have the store publish it.
    Broadcast,
}

/// The single source of truth for panels, containers, and instances.
pub trait LayoutStore {
    /// Current authoritative layout.
    fn layout(&self) -> &Layout;

    /// Look up an instance record.
    fn instance(&self, id: &InstanceId) -> Option<&Instance>;

    /// Apply a mutation.
    fn dispatch(&mut self, mutation: Mutation, emit: Emit);
}

/// Connection to a remote peer that receives every committed mutation.
pub trait RemoteChannel {
    /// Establish (or re-establish) the connection.
    fn connect(&mut self, token: &str);

    /// True while connected.
    fn is_connected(&self) -> bool;

    /// Forward a mutation.
    fn publish(&mut self, mutation: &Mutation);
}

/// A channel that goes nowhere, for hosts without a remote peer.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoRemote;

impl RemoteChannel for NoRemote {
    fn connect(&mut self, _token: &str) {}

    fn is_connected(&self) -> bool {
        false
    }

    fn publish(&mut self, _mutation: &Mutation) {}
}

/// In-memory [`LayoutStore`] that also records what it was sent.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    layout: Layout,
    instances: Vec<Instance>,
    log: Vec<(Mutation, Emit)>,
}

impl MemoryStore {
    /// A store seeded with `layout` and `instances`.
    pub fn new(layout: Layout, instances: Vec<Instance>) -> Self {
        Self {
            layout,
            instances,
            log: Vec::new(),
        }
    }

    /// Every instance record.
    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    /// Every dispatched mutation in order.
    pub fn log(&self) -> &[(Mutation, Emit)] {
        &self.log
    }
}

impl LayoutStore for MemoryStore {
    fn layout(&self) -> &Layout {
        &self.layout
    }

    fn instance(&self, id: &InstanceId) -> Option<&Instance> {
        self.instances.iter().find(|i| &i.id == id)
    }

    fn dispatch(&mut self, mutation: Mutation, emit: Emit) {
        tracing::trace!(?mutation, ?emit, "dispatch");
        match &mutation {
            Mutation::UpdatePanel { panel } => {
                upsert(&mut self.layout.panels, panel.clone(), |p| p.id == panel.id);
            }
            Mutation::UpdateContainer { container } => {
                upsert(&mut self.layout.containers, container.clone(), |c| {
                    c.id == container.id
                });
            }
            Mutation::CreateInstance { instance } => {
                upsert(&mut self.instances, instance.clone(), |i| i.id == instance.id);
            }
            Mutation::DeleteInstance { id } => {
                self.instances.retain(|i| &i.id != id);
                for c in &mut self.layout.containers {
                    c.items.retain(|i| i != id);
                }
            }
        }
        self.log.push((mutation, emit));
    }
}

fn upsert<T>(list: &mut Vec<T>, value: T, same: impl Fn(&T) -> bool) {
    match list.iter_mut().find(|v| same(v)) {
        Some(slot) => *slot = value,
        None => list.push(value),
    }
}

/// In-memory [`RemoteChannel`].
///
/// Mutations published while disconnected are buffered and delivered, in order, on the
/// next [`RemoteChannel::connect`].
#[derive(Clone, Debug, Default)]
pub struct MemoryRemote {
    token: Option<String>,
    outbox: Vec<Mutation>,
    sent: Vec<Mutation>,
}

impl MemoryRemote {
    /// A disconnected channel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the connection; later publishes are buffered.
    pub fn disconnect(&mut self) {
        self.token = None;
    }

    /// Token of the current connection.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Mutations delivered so far.
    pub fn sent(&self) -> &[Mutation] {
        &self.sent
    }

    /// Mutations waiting for a connection.
    pub fn pending(&self) -> &[Mutation] {
        &self.outbox
    }
}

impl RemoteChannel for MemoryRemote {
    fn connect(&mut self, token: &str) {
        self.token = Some(token.into());
        if !self.outbox.is_empty() {
            tracing::debug!(count = self.outbox.len(), "flushing buffered mutations");
            self.sent.append(&mut self.outbox);
        }
    }

    fn is_connected(&self) -> bool {
        self.token.is_some()
    }

    fn publish(&mut self, mutation: &Mutation) {
        if self.is_connected() {
            self.sent.push(mutation.clone());
        } else {
            self.outbox.push(mutation.clone());
        }
    }
}

/// Source of fresh instance ids.
pub trait IdSource {
    /// A new id not handed out before.
    fn next_instance_id(&mut self) -> InstanceId;
}

/// Ids of the form `{prefix}{n}`, counting from 1.
#[derive(Clone, Debug)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    /// Counter with the given prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("instance-")
    }
}

impl IdSource for SequentialIds {
    fn next_instance_id(&mut self) -> InstanceId {
        let id = alloc::format!("{}{}", self.prefix, self.next);
        self.next += 1;
        InstanceId::new(id)
    }
}

/// Random v4 UUIDs.
#[cfg(feature = "uuid")]
#[derive(Clone, Copy, Debug, Default)]
pub struct UuidIds;

#[cfg(feature = "uuid")]
impl IdSource for UuidIds {
    fn next_instance_id(&mut self) -> InstanceId {
        use alloc::string::ToString;
        InstanceId::new(uuid::Uuid::new_v4().to_string())
    }
}

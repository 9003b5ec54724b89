// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! What is being dragged.

use alloc::string::String;

use serde::{Deserialize, Serialize};
use trellis_layout::{ContainerId, InstanceId, PanelId};

use crate::config::DragConfig;

/// Coarse kind of a drag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragKind {
    /// A whole panel, moved between grid cells.
    Panel,
    /// A container, moved between panels.
    Container,
    /// An instance, moved between or within containers.
    Instance,
    /// A file from the desktop.
    File,
    /// Plain text.
    Text,
    /// A URL.
    Url,
    /// Anything else originating outside the editor.
    External,
}

impl DragKind {
    /// True for kinds that create a new instance on drop instead of moving one.
    pub fn is_external(self) -> bool {
        matches!(self, Self::File | Self::Text | Self::Url | Self::External)
    }
}

/// The dragged thing itself.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DragSubject {
    /// An existing panel.
    Panel {
        /// Panel id.
        id: PanelId,
    },
    /// An existing container.
    Container {
        /// Container id.
        id: ContainerId,
    },
    /// An existing instance.
    Instance {
        /// Instance id.
        id: InstanceId,
    },
    /// A dropped file.
    File {
        /// File name, when the platform reports one.
        name: Option<String>,
        /// MIME type, when the platform reports one.
        mime: Option<String>,
    },
    /// Dropped text.
    Text {
        /// Full text.
        text: String,
    },
    /// A dropped link.
    Url {
        /// The URL.
        url: String,
    },
    /// Other external content.
    External {
        /// Suggested label.
        label: Option<String>,
        /// Opaque data handed to the new instance.
        #[serde(default)]
        data: serde_json::Value,
    },
}

/// Where a dragged item came from.
///
/// Needed to remove the item from its origin on commit. Absent fields are recovered from
/// the layout at drop time.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragContext {
    /// Source panel (containers).
    pub panel: Option<PanelId>,
    /// Source container (instances).
    pub container: Option<ContainerId>,
}

/// Descriptor of an in-flight drag.
///
/// Exists exactly while a session is dragging.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DragPayload {
    /// The dragged thing.
    pub subject: DragSubject,
    /// Provenance.
    #[serde(default)]
    pub context: DragContext,
}

impl DragPayload {
    /// A panel drag.
    pub fn panel(id: impl Into<PanelId>) -> Self {
        Self::new(DragSubject::Panel { id: id.into() })
    }

    /// A container drag out of `from`.
    pub fn container(id: impl Into<ContainerId>, from: Option<PanelId>) -> Self {
        Self {
            subject: DragSubject::Container { id: id.into() },
            context: DragContext {
                panel: from,
                container: None,
            },
        }
    }

    /// An instance drag out of `from`.
    pub fn instance(id: impl Into<InstanceId>, from: Option<ContainerId>) -> Self {
        Self {
            subject: DragSubject::Instance { id: id.into() },
            context: DragContext {
                panel: None,
                container: from,
            },
        }
    }

    /// A file drag.
    pub fn file(name: Option<String>, mime: Option<String>) -> Self {
        Self::new(DragSubject::File { name, mime })
    }

    /// A text drag.
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(DragSubject::Text { text: text.into() })
    }

    /// A URL drag.
    pub fn url(url: impl Into<String>) -> Self {
        Self::new(DragSubject::Url { url: url.into() })
    }

    fn new(subject: DragSubject) -> Self {
        Self {
            subject,
            context: DragContext::default(),
        }
    }

    /// Coarse kind.
    pub fn kind(&self) -> DragKind {
        match self.subject {
            DragSubject::Panel { .. } => DragKind::Panel,
            DragSubject::Container { .. } => DragKind::Container,
            DragSubject::Instance { .. } => DragKind::Instance,
            DragSubject::File { .. } => DragKind::File,
            DragSubject::Text { .. } => DragKind::Text,
            DragSubject::Url { .. } => DragKind::Url,
            DragSubject::External { .. } => DragKind::External,
        }
    }

    /// Id of the dragged item, for internal kinds.
    pub fn id(&self) -> Option<&str> {
        match &self.subject {
            DragSubject::Panel { id } => Some(id.as_str()),
            DragSubject::Container { id } => Some(id.as_str()),
            DragSubject::Instance { id } => Some(id.as_str()),
            _ => None,
        }
    }

    /// Label for the instance an external drop creates, or `None` for internal kinds.
    ///
    /// Files use their name, text its leading characters, URLs themselves. Anything
    /// empty falls back to the configured labels.
    pub fn derive_label(&self, config: &DragConfig) -> Option<String> {
        let label = match &self.subject {
            DragSubject::Panel { .. }
            | DragSubject::Container { .. }
            | DragSubject::Instance { .. } => return None,
            DragSubject::File { name, .. } => {
                return Some(
                    non_empty(name.as_deref())
                        .unwrap_or(&config.file_fallback_label)
                        .into(),
                );
            }
            DragSubject::Text { text } => {
                let snippet: String = text.trim().chars().take(config.text_label_chars).collect();
                non_empty(Some(snippet.as_str())).map(String::from)
            }
            DragSubject::Url { url } => non_empty(Some(url.as_str())).map(String::from),
            DragSubject::External { label, .. } => non_empty(label.as_deref()).map(String::from),
        };
        Some(label.unwrap_or_else(|| config.fallback_label.clone()))
    }

    /// Data stored on the instance an external drop creates.
    pub fn instance_data(&self) -> serde_json::Value {
        match &self.subject {
            DragSubject::File { name, mime } => serde_json::json!({ "name": name, "mime": mime }),
            DragSubject::Text { text } => serde_json::json!({ "text": text }),
            DragSubject::Url { url } => serde_json::json!({ "url": url }),
            DragSubject::External { data, .. } => data.clone(),
            _ => serde_json::Value::Null,
        }
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

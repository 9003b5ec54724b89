// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tunables for a drag session.

use alloc::string::String;

use serde::{Deserialize, Serialize};

/// MIME type under which same-application drag payloads are written.
pub const NATIVE_MIME: &str = "application/x-trellis-item+json";

/// Version tag of the native payload format understood by this crate.
pub const NATIVE_VERSION: u32 = 1;

/// Session configuration.
///
/// Deserializes with defaults for missing fields, so hosts can embed it in their own
/// settings files.
///
/// ```
/// use trellis_drag::DragConfig;
///
/// let config: DragConfig = serde_json::from_str(r#"{ "text_label_chars": 40 }"#).unwrap();
/// assert_eq!(config.text_label_chars, 40);
/// assert_eq!(config.fallback_label, "Untitled");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// Private MIME type for cross-window payloads.
    pub native_mime: String,
    /// Accepted cross-window payload version.
    pub native_version: u32,
    /// Number of characters of dropped text kept as the new instance's label.
    pub text_label_chars: usize,
    /// Label for dropped files without a name.
    pub file_fallback_label: String,
    /// Label when nothing better can be derived.
    pub fallback_label: String,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            native_mime: NATIVE_MIME.into(),
            native_version: NATIVE_VERSION,
            text_label_chars: 80,
            file_fallback_label: "File".into(),
            fallback_label: "Untitled".into(),
        }
    }
}

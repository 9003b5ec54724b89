// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Platform drag-and-drop data: reading drops that did not start in this window, and
//! writing the data other windows read from ours.
//!
//! Incoming drops are classified in a fixed order:
//!
//! 1. a payload under the private MIME type (another editor window),
//! 2. dropped files,
//! 3. the first entry of a `text/uri-list`,
//! 4. `text/plain`: a URL when the trimmed text is a single absolute URI (`scheme://…`
//!    for any scheme, or a `mailto:`, `tel:`, `urn:` or `data:` URI), text otherwise.
//!
//! A malformed private payload is logged and classification continues with the next
//! source, so a broken sender never blocks an otherwise valid drop.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use trellis_layout::{ContainerId, InstanceId, PanelId};

use crate::config::DragConfig;
use crate::payload::{DragKind, DragPayload, DragSubject};

/// Plain text.
pub const TEXT_PLAIN: &str = "text/plain";
/// HTML fragment.
pub const TEXT_HTML: &str = "text/html";
/// Newline-separated URIs with `#` comments.
pub const URI_LIST: &str = "text/uri-list";

/// A file carried by a platform drop.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NativeFile {
    /// File name; may be empty.
    pub name: String,
    /// Reported MIME type.
    pub mime: Option<String>,
}

/// Data carried by a platform drag: typed string entries plus files.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NativeDrop {
    entries: Vec<(String, String)>,
    files: Vec<NativeFile>,
}

impl NativeDrop {
    /// An empty carrier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the entry for `mime`.
    pub fn with_data(mut self, mime: impl Into<String>, data: impl Into<String>) -> Self {
        self.set_data(mime, data);
        self
    }

    /// Add a file.
    pub fn with_file(mut self, file: NativeFile) -> Self {
        self.files.push(file);
        self
    }

    /// Add or replace the entry for `mime`.
    pub fn set_data(&mut self, mime: impl Into<String>, data: impl Into<String>) {
        let mime = mime.into();
        let data = data.into();
        match self.entries.iter_mut().find(|(m, _)| *m == mime) {
            Some(entry) => entry.1 = data,
            None => self.entries.push((mime, data)),
        }
    }

    /// Entry for `mime`.
    pub fn get(&self, mime: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(m, _)| m == mime)
            .map(|(_, d)| d.as_str())
    }

    /// MIME types present, in insertion order.
    pub fn types(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(m, _)| m.as_str())
    }

    /// Dropped files.
    pub fn files(&self) -> &[NativeFile] {
        &self.files
    }

    /// True if the carrier holds nothing.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.files.is_empty()
    }
}

/// Where a cross-window item lived in its source window.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossWindowOrigin {
    /// Source container.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_id: Option<ContainerId>,
    /// Source panel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub panel_id: Option<PanelId>,
}

/// Display hints.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossWindowMeta {
    /// Label for the receiving side.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Payload written under the private MIME type by another editor window.
///
/// ```json
/// {
///   "v": 1,
///   "type": "instance",
///   "id": "i7",
///   "from": { "containerId": "c2" },
///   "meta": { "label": "Notes" }
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossWindowPayload {
    /// Format version.
    pub v: u32,
    /// Kind of the source item.
    #[serde(rename = "type")]
    pub kind: DragKind,
    /// Id in the source window.
    pub id: String,
    /// Provenance in the source window.
    #[serde(default)]
    pub from: CrossWindowOrigin,
    /// Display hints.
    #[serde(default)]
    pub meta: CrossWindowMeta,
}

impl CrossWindowPayload {
    /// Non-blank label, if the sender provided one.
    pub fn label(&self) -> Option<&str> {
        self.meta
            .label
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
    }

    /// Source instance id, when the item is an instance.
    pub fn source_instance(&self) -> Option<InstanceId> {
        (self.kind == DragKind::Instance).then(|| InstanceId::new(self.id.as_str()))
    }
}

/// Why a private payload was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum NativePayloadError {
    /// Not valid JSON or missing required fields.
    #[error("malformed cross-window payload: {0}")]
    Malformed(String),
    /// Written by an incompatible sender.
    #[error("unsupported cross-window payload version {found} (expected {expected})")]
    UnsupportedVersion {
        /// Version in the payload.
        found: u32,
        /// Version this build reads.
        expected: u32,
    },
}

/// Parse and version-check a private payload.
pub fn decode_cross_window(
    raw: &str,
    config: &DragConfig,
) -> Result<CrossWindowPayload, NativePayloadError> {
    let payload: CrossWindowPayload =
        serde_json::from_str(raw).map_err(|e| NativePayloadError::Malformed(format!("{e}")))?;
    if payload.v != config.native_version {
        return Err(NativePayloadError::UnsupportedVersion {
            found: payload.v,
            expected: config.native_version,
        });
    }
    Ok(payload)
}

/// Result of classifying a platform drop.
#[derive(Clone, Debug, PartialEq)]
pub enum NativeDropKind {
    /// Item dragged from another editor window.
    CrossWindow(CrossWindowPayload),
    /// External content that becomes a new instance.
    External(DragPayload),
    /// Nothing usable.
    Unrecognized,
}

/// Classify a platform drop. See the module docs for the order.
pub fn classify(drop: &NativeDrop, config: &DragConfig) -> NativeDropKind {
    if let Some(raw) = drop.get(&config.native_mime) {
        match decode_cross_window(raw, config) {
            Ok(payload) => return NativeDropKind::CrossWindow(payload),
            Err(err) => tracing::debug!(%err, "ignoring private drag payload"),
        }
    }
    if let Some(file) = drop.files().first() {
        let name = (!file.name.trim().is_empty()).then(|| file.name.clone());
        return NativeDropKind::External(DragPayload::file(name, file.mime.clone()));
    }
    if let Some(uri) = drop.get(URI_LIST).and_then(first_uri) {
        return NativeDropKind::External(DragPayload::url(uri));
    }
    if let Some(text) = drop.get(TEXT_PLAIN).filter(|t| !t.trim().is_empty()) {
        let trimmed = text.trim();
        if looks_like_url(trimmed) {
            return NativeDropKind::External(DragPayload::url(trimmed));
        }
        return NativeDropKind::External(DragPayload::text(text));
    }
    NativeDropKind::Unrecognized
}

fn first_uri(list: &str) -> Option<&str> {
    list.lines()
        .map(str::trim)
        .find(|l| !l.is_empty() && !l.starts_with('#'))
}

/// Schemes recognized without a `//` authority part.
const OPAQUE_SCHEMES: [&str; 4] = ["mailto", "tel", "urn", "data"];

/// An absolute URI with no whitespace: `scheme://…`, or one of [`OPAQUE_SCHEMES`].
fn looks_like_url(s: &str) -> bool {
    if s.contains(char::is_whitespace) {
        return false;
    }
    let Some((scheme, rest)) = s.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    let valid_scheme = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if !valid_scheme {
        return false;
    }
    match rest.strip_prefix("//") {
        Some(after) => !after.is_empty(),
        None => {
            !rest.is_empty() && OPAQUE_SCHEMES.iter().any(|o| o.eq_ignore_ascii_case(scheme))
        }
    }
}

/// Write `payload` as platform drag data.
///
/// Internal kinds get the private payload plus `text/plain` and `text/html` fallbacks
/// for other applications. External kinds get their text representation only.
pub fn encode_native(
    payload: &DragPayload,
    label: Option<&str>,
    config: &DragConfig,
) -> NativeDrop {
    let mut out = NativeDrop::new();
    match &payload.subject {
        DragSubject::Text { text } => out.set_data(TEXT_PLAIN, text.as_str()),
        DragSubject::Url { url } => {
            out.set_data(URI_LIST, url.as_str());
            out.set_data(TEXT_PLAIN, url.as_str());
        }
        DragSubject::File { .. } | DragSubject::External { .. } => {
            if let Some(label) = payload.derive_label(config) {
                out.set_data(TEXT_PLAIN, label);
            }
        }
        DragSubject::Panel { .. }
        | DragSubject::Container { .. }
        | DragSubject::Instance { .. } => {
            let Some(id) = payload.id() else {
                return out;
            };
            let wire = CrossWindowPayload {
                v: config.native_version,
                kind: payload.kind(),
                id: id.into(),
                from: CrossWindowOrigin {
                    container_id: payload.context.container.clone(),
                    panel_id: payload.context.panel.clone(),
                },
                meta: CrossWindowMeta {
                    label: label.map(String::from),
                },
            };
            match serde_json::to_string(&wire) {
                Ok(json) => out.set_data(config.native_mime.as_str(), json),
                Err(err) => tracing::warn!(%err, "failed to encode drag payload"),
            }
            let text = label.unwrap_or(id);
            out.set_data(TEXT_PLAIN, text);
            out.set_data(
                TEXT_HTML,
                format!(
                    "<span data-trellis-id=\"{}\">{}</span>",
                    escape_html(id),
                    escape_html(text)
                ),
            );
        }
    }
    out
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> DragConfig {
        DragConfig::default()
    }

    #[test]
    fn private_payload_wins() {
        let drop = NativeDrop::new()
            .with_data(TEXT_PLAIN, "ignored")
            .with_data(
                config().native_mime,
                concat!(
                    r#"{"v":1,"type":"instance","id":"i7","#,
                    r#""from":{"containerId":"c2"},"meta":{"label":"Notes"}}"#,
                ),
            );
        let NativeDropKind::CrossWindow(p) = classify(&drop, &config()) else {
            panic!("expected cross-window payload");
        };
        assert_eq!(p.label(), Some("Notes"));
        assert_eq!(p.from.container_id, Some(ContainerId::new("c2")));
        assert_eq!(p.source_instance(), Some(InstanceId::new("i7")));
    }

    #[test]
    fn malformed_payload_degrades_to_text() {
        let drop = NativeDrop::new()
            .with_data(config().native_mime, "{not json")
            .with_data(TEXT_PLAIN, "hello");
        assert_eq!(
            classify(&drop, &config()),
            NativeDropKind::External(DragPayload::text("hello"))
        );
    }

    #[test]
    fn wrong_version_is_rejected() {
        let err = decode_cross_window(r#"{"v":9,"type":"panel","id":"p"}"#, &config()).unwrap_err();
        assert_eq!(
            err,
            NativePayloadError::UnsupportedVersion {
                found: 9,
                expected: 1
            }
        );
    }

    #[test]
    fn files_before_text() {
        let drop = NativeDrop::new()
            .with_data(TEXT_PLAIN, "caption")
            .with_file(NativeFile {
                name: String::new(),
                mime: Some("image/png".into()),
            });
        let NativeDropKind::External(p) = classify(&drop, &config()) else {
            panic!("expected external payload");
        };
        assert_eq!(p.kind(), DragKind::File);
        assert_eq!(p.derive_label(&config()).as_deref(), Some("File"));
    }

    #[test]
    fn uri_list_skips_comments() {
        let drop =
            NativeDrop::new().with_data(URI_LIST, "# comment\r\n\r\nhttps://example.org/a\r\n");
        assert_eq!(
            classify(&drop, &config()),
            NativeDropKind::External(DragPayload::url("https://example.org/a"))
        );
    }

    #[test]
    fn plain_text_url_is_a_url() {
        let drop = NativeDrop::new().with_data(TEXT_PLAIN, " https://example.org ");
        assert_eq!(
            classify(&drop, &config()),
            NativeDropKind::External(DragPayload::url("https://example.org"))
        );
    }

    #[test]
    fn plain_text_accepts_other_schemes() {
        for url in ["file:///tmp/a.txt", "ftp://host/x", "mailto:a@b.c", "urn:isbn:0451450523"] {
            let drop = NativeDrop::new().with_data(TEXT_PLAIN, url);
            assert_eq!(
                classify(&drop, &config()),
                NativeDropKind::External(DragPayload::url(url)),
                "{url}"
            );
        }
    }

    #[test]
    fn plain_text_with_colon_stays_text() {
        for text in ["note: hi", "ratio:3", "C:\\temp", "https://a.test and more", "http://"] {
            let drop = NativeDrop::new().with_data(TEXT_PLAIN, text);
            assert_eq!(
                classify(&drop, &config()),
                NativeDropKind::External(DragPayload::text(text)),
                "{text}"
            );
        }
    }

    #[test]
    fn empty_drop_is_unrecognized() {
        assert_eq!(classify(&NativeDrop::new(), &config()), NativeDropKind::Unrecognized);
        assert_eq!(
            classify(&NativeDrop::new().with_data(TEXT_PLAIN, "  "), &config()),
            NativeDropKind::Unrecognized
        );
    }

    #[test]
    fn encoded_instance_is_readable_by_another_window() {
        let payload = DragPayload::instance("i1", Some("c1".into()));
        let drop = encode_native(&payload, Some("<Tom & Jerry>"), &config());
        assert_eq!(drop.get(TEXT_PLAIN), Some("<Tom & Jerry>"));
        assert_eq!(
            drop.get(TEXT_HTML),
            Some("<span data-trellis-id=\"i1\">&lt;Tom &amp; Jerry&gt;</span>")
        );
        let NativeDropKind::CrossWindow(p) = classify(&drop, &config()) else {
            panic!("expected cross-window payload");
        };
        assert_eq!(p.kind, DragKind::Instance);
        assert_eq!(p.id, "i1");
        assert_eq!(p.from.container_id, Some(ContainerId::new("c1")));
    }

    #[test]
    fn encoded_url_has_uri_list() {
        let drop = encode_native(&DragPayload::url("https://x.test"), None, &config());
        assert_eq!(drop.get(URI_LIST), Some("https://x.test"));
        assert_eq!(drop.types().count(), 2);
    }
}

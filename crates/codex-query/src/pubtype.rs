//! Publication types.
//!
//! Maps the codex `type` vocabulary onto RM API resource types. Several codex
//! names can land on the same resource type.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// RM API resource type for anything the table does not know
pub const UNKNOWN_RESOURCE_TYPE: &str = "unknown";

const PUB_TYPES: &[(&str, &str)] = &[
    ("audio", "audiobook"),
    ("audiobooks", "audiobook"),
    ("books", "book"),
    ("ebooks", "book"),
    ("bookseries", "bookseries"),
    ("databases", "database"),
    ("journals", "journal"),
    ("periodicals", "journal"),
    ("newsletters", "newsletter"),
    ("newspapers", "newspaper"),
    ("proceedings", "proceedings"),
    ("reports", "report"),
    ("streamingaudio", "streamingaudio"),
    ("video", "streamingvideo"),
    ("streamingvideo", "streamingvideo"),
    ("theses", "thesisdissertation"),
    ("websites", "website"),
    ("unspecified", "unspecified"),
];

static PUB_TYPE_TABLE: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| PUB_TYPES.iter().copied().collect());

/// RM API resource type for a codex type, `None` when unmapped
pub fn resource_type(codex_type: &str) -> Option<&'static str> {
    PUB_TYPE_TABLE
        .get(codex_type.trim().to_ascii_lowercase().as_str())
        .copied()
}

/// Every codex type the table accepts, in table order
pub fn codex_types() -> impl Iterator<Item = &'static str> {
    PUB_TYPES.iter().map(|(codex, _)| *codex)
}

//! Field vocabularies.
//!
//! CQL index names, sort keys and closed value sets are data. Lookups are
//! case-insensitive; every table is keyed by the lower-cased spelling.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;

/// RM API search field names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    /// Title search, also the server-choice default
    Title,
    /// ISSN/ISBN search
    Identifier,
    /// Publisher search
    Publisher,
}

impl SearchField {
    /// Name of the field in the RM API `searchfield` parameter
    pub fn rm_api_name(&self) -> &'static str {
        match self {
            Self::Title => "titlename",
            Self::Identifier => "isxn",
            Self::Publisher => "publisher",
        }
    }
}

/// What a CQL index means to the translator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexRole {
    /// `cql.serverChoice`, searched as a title
    ServerChoice,
    /// `cql.allRecords`, never supported
    AllRecords,
    /// Publication type filter
    Type,
    /// Source restriction, validated then dropped
    Source,
    /// Holdings selection filter
    Selected,
    /// A search field
    Search(SearchField),
}

const INDEXES: &[(&str, IndexRole)] = &[
    ("cql.serverchoice", IndexRole::ServerChoice),
    ("cql.allrecords", IndexRole::AllRecords),
    ("type", IndexRole::Type),
    ("codex.type", IndexRole::Type),
    ("source", IndexRole::Source),
    ("codex.source", IndexRole::Source),
    ("ext.selected", IndexRole::Selected),
    ("title", IndexRole::Search(SearchField::Title)),
    ("codex.title", IndexRole::Search(SearchField::Title)),
    ("identifier", IndexRole::Search(SearchField::Identifier)),
    ("codex.identifier", IndexRole::Search(SearchField::Identifier)),
    ("publisher", IndexRole::Search(SearchField::Publisher)),
    ("codex.publisher", IndexRole::Search(SearchField::Publisher)),
];

/// Sort keys and the RM API `orderby` value they become
const SORT_KEYS: &[(&str, &str)] = &[("title", "relevance"), ("codex.title", "relevance")];

/// Accepted `source` values
const SOURCES: &[&str] = &["all", "kb"];

/// `ext.selected` values and the RM API `selection` value they become
const SELECTIONS: &[(&str, &str)] = &[
    ("all", "all"),
    ("true", "selected"),
    ("false", "notselected"),
];

/// `orderby` value when the query has no `sortby`
pub const DEFAULT_ORDER_BY: &str = "titlename";

static INDEX_TABLE: Lazy<HashMap<&'static str, IndexRole>> =
    Lazy::new(|| INDEXES.iter().copied().collect());

static SORT_TABLE: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| SORT_KEYS.iter().copied().collect());

static SELECTION_TABLE: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| SELECTIONS.iter().copied().collect());

/// Role of a CQL index, `None` when unsupported
pub fn index_role(index: &str) -> Option<IndexRole> {
    INDEX_TABLE.get(index.to_ascii_lowercase().as_str()).copied()
}

/// `orderby` value for a sort key, `None` when unsupported
pub fn order_by(sort_key: &str) -> Option<&'static str> {
    SORT_TABLE.get(sort_key.to_ascii_lowercase().as_str()).copied()
}

/// Whether `source` accepts the value
pub fn is_valid_source(value: &str) -> bool {
    SOURCES.iter().any(|s| s.eq_ignore_ascii_case(value))
}

/// RM API `selection` value for an `ext.selected` value
pub fn selection(value: &str) -> Option<&'static str> {
    SELECTION_TABLE
        .get(value.to_ascii_lowercase().as_str())
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("title", IndexRole::Search(SearchField::Title) ; "title")]
    #[test_case("CODEX.Title", IndexRole::Search(SearchField::Title) ; "codex title mixed case")]
    #[test_case("identifier", IndexRole::Search(SearchField::Identifier) ; "identifier")]
    #[test_case("codex.publisher", IndexRole::Search(SearchField::Publisher) ; "codex publisher")]
    #[test_case("cql.serverChoice", IndexRole::ServerChoice ; "server choice")]
    #[test_case("cql.allRecords", IndexRole::AllRecords ; "all records")]
    #[test_case("codex.type", IndexRole::Type ; "type")]
    #[test_case("Source", IndexRole::Source ; "source")]
    #[test_case("ext.selected", IndexRole::Selected ; "selected")]
    fn test_index_role(index: &str, expected: IndexRole) {
        assert_eq!(index_role(index), Some(expected));
    }

    #[test]
    fn test_unknown_index() {
        assert_eq!(index_role("author"), None);
        assert_eq!(index_role("ext.availability"), None);
    }

    #[test]
    fn test_rm_api_names() {
        assert_eq!(SearchField::Title.rm_api_name(), "titlename");
        assert_eq!(SearchField::Identifier.rm_api_name(), "isxn");
        assert_eq!(SearchField::Publisher.rm_api_name(), "publisher");
    }

    #[test]
    fn test_sort_keys() {
        assert_eq!(order_by("Title"), Some("relevance"));
        assert_eq!(order_by("codex.title"), Some("relevance"));
        assert_eq!(order_by("publisher"), None);
    }

    #[test]
    fn test_sources() {
        assert!(is_valid_source("ALL"));
        assert!(is_valid_source("kb"));
        assert!(!is_valid_source("local"));
    }

    #[test]
    fn test_selection() {
        assert_eq!(selection("TRUE"), Some("selected"));
        assert_eq!(selection("false"), Some("notselected"));
        assert_eq!(selection("All"), Some("all"));
        assert_eq!(selection("bogus"), None);
    }
}

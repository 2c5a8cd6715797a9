//! Translation context.
//!
//! The intermediate representation between a validated CQL tree and the RM
//! API query string. Each constraint lives in a [`Slot`] that accepts one
//! write; a second write is a [`TranslationError::MultipleConstraint`].

use crate::error::{TranslationError, TranslationResult};
use crate::fields::SearchField;
use serde::Serialize;

/// A value that may be written once
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slot<T> {
    #[serde(skip)]
    constraint: &'static str,
    value: Option<T>,
}

impl<T> Slot<T> {
    /// Empty slot. `constraint` names the failure reported on a second write.
    pub const fn new(constraint: &'static str) -> Self {
        Self {
            constraint,
            value: None,
        }
    }

    /// Store the value, failing if one is already present
    pub fn set(&mut self, value: T) -> TranslationResult<()> {
        if self.value.is_some() {
            return Err(TranslationError::MultipleConstraint {
                constraint: self.constraint.to_string(),
            });
        }
        self.value = Some(value);
        Ok(())
    }

    /// Current value
    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Whether a value has been written
    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }
}

/// Search field and the value to search for
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Search {
    /// Field to search
    pub field: SearchField,
    /// Search value as written in the query
    pub value: String,
}

/// Publication type filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeFilter {
    /// CQL index that carried the filter
    pub index: String,
    /// RM API resource type
    pub resource_type: String,
}

/// Constraints gathered from one CQL query.
///
/// Built fresh for every translation and consumed by a renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationContext {
    search: Slot<Search>,
    filter: Slot<TypeFilter>,
    sort: Slot<String>,
    selection: Slot<String>,
}

impl Default for TranslationContext {
    fn default() -> Self {
        Self {
            search: Slot::new("Search on multiple fields"),
            filter: Slot::new("Filtering on multiple types"),
            sort: Slot::new("Sorting on multiple keys"),
            selection: Slot::new("Filtering on multiple selections"),
        }
    }
}

impl TranslationContext {
    /// Empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the search field and value
    pub fn set_search(&mut self, field: SearchField, value: impl Into<String>) -> TranslationResult<()> {
        self.search.set(Search {
            field,
            value: value.into(),
        })
    }

    /// Record the publication type filter
    pub fn set_filter(
        &mut self,
        index: impl Into<String>,
        resource_type: impl Into<String>,
    ) -> TranslationResult<()> {
        self.filter.set(TypeFilter {
            index: index.into(),
            resource_type: resource_type.into(),
        })
    }

    /// Record the RM API `orderby` value
    pub fn set_sort(&mut self, order_by: impl Into<String>) -> TranslationResult<()> {
        self.sort.set(order_by.into())
    }

    /// Record the raw `ext.selected` value
    pub fn set_selection(&mut self, value: impl Into<String>) -> TranslationResult<()> {
        self.selection.set(value.into())
    }

    /// Search field and value, if any
    pub fn search(&self) -> Option<&Search> {
        self.search.get()
    }

    /// Type filter, if any
    pub fn filter(&self) -> Option<&TypeFilter> {
        self.filter.get()
    }

    /// `orderby` value, if a sort was requested
    pub fn sort(&self) -> Option<&str> {
        self.sort.get().map(String::as_str)
    }

    /// Raw selection value, if any
    pub fn selection(&self) -> Option<&str> {
        self.selection.get().map(String::as_str)
    }
}

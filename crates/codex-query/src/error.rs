//! Error types for query translation.
//!
//! Every failure is terminal: a rejected query yields no downstream queries.

use serde::Serialize;
use thiserror::Error;

/// Errors from the CQL grammar parser
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// Nothing to parse
    #[error("query is empty")]
    Empty,

    /// The query is not valid CQL
    #[error("{errors}")]
    Syntax {
        /// Formatted diagnostics, one per line
        errors: String,
    },
}

/// Coarse classification of [`TranslationError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Query does not parse
    Syntax,
    /// Comparison other than `=`
    UnsupportedOperator,
    /// Index or sort key outside the allow-list
    UnsupportedField,
    /// Value outside a field's closed set
    UnsupportedValue,
    /// Second search field, type filter, selection or sort key
    MultipleConstraint,
    /// OR, NOT or PROX
    UnsupportedFeature,
    /// Nothing to ask the RM API for
    EmptyQuery,
}

/// Errors from translating a CQL query into RM API queries
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TranslationError {
    /// The query string is not valid CQL
    #[error("Unsupported Query Format : Search query is in an unsupported format. {0}")]
    Syntax(#[from] ParseError),

    /// A comparison operator other than exact match
    #[error("Unsupported Query Format : Search with {operator} operator is not supported.")]
    UnsupportedOperator {
        /// The operator as written in the query
        operator: String,
    },

    /// An index or sort key the RM API cannot serve
    #[error("Unsupported Query Format : {usage} {field} is not supported.")]
    UnsupportedField {
        /// How the field was used ("Search field", "Sorting on")
        usage: &'static str,
        /// The field as written in the query
        field: String,
    },

    /// A value outside the field's closed enumeration
    #[error("Unsupported Query Format : {field} value {value} is not supported.")]
    UnsupportedValue {
        /// Field the value was given for
        field: String,
        /// The value as written in the query
        value: String,
    },

    /// A constraint that may only appear once appeared again
    #[error("Unsupported Query Format : {constraint} is not supported.")]
    MultipleConstraint {
        /// Which constraint was repeated
        constraint: String,
    },

    /// A boolean composition other than AND
    #[error("Unsupported Query Format : Boolean operator {feature} is not supported.")]
    UnsupportedFeature {
        /// The boolean operator as written in the query
        feature: String,
    },

    /// Nothing usable to send downstream
    #[error("Unsupported Query Format : {reason}")]
    EmptyQuery {
        /// Why the query is empty
        reason: String,
    },
}

impl TranslationError {
    /// Classification for callers that map errors to diagnostics
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Syntax(_) => ErrorKind::Syntax,
            Self::UnsupportedOperator { .. } => ErrorKind::UnsupportedOperator,
            Self::UnsupportedField { .. } => ErrorKind::UnsupportedField,
            Self::UnsupportedValue { .. } => ErrorKind::UnsupportedValue,
            Self::MultipleConstraint { .. } => ErrorKind::MultipleConstraint,
            Self::UnsupportedFeature { .. } => ErrorKind::UnsupportedFeature,
            Self::EmptyQuery { .. } => ErrorKind::EmptyQuery,
        }
    }

    pub(crate) fn empty(reason: impl Into<String>) -> Self {
        Self::EmptyQuery {
            reason: reason.into(),
        }
    }
}

/// Result type for translation operations
pub type TranslationResult<T> = Result<T, TranslationError>;

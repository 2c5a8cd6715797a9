//! # Codex Query
//!
//! Translates CQL queries into RM API titles query strings.
//!
//! ## Pipeline
//!
//! ```text
//! CQL string -> syntax::parse -> CqlNode -> Validator -> TranslationContext
//!            -> PagePlan + QueryRenderer -> one or two RM API query strings
//! ```
//!
//! Only a subset of CQL is supported: exact-match terms joined by `and`, one
//! search field, one publication type filter, one selection and a single
//! `title` sort key. Everything else is rejected with a [`TranslationError`].
//!
//! ## Example
//!
//! ```rust
//! let translation = codex_query::translate("title=dinosaurs and type=books", 15, 10)?;
//!
//! assert_eq!(translation.queries.len(), 2);
//! assert_eq!(translation.instance_index, 5);
//! assert_eq!(
//!     translation.queries[0],
//!     "search=dinosaurs&searchfield=titlename&resourcetype=book&orderby=titlename&count=10&offset=2"
//! );
//! # Ok::<(), codex_query::TranslationError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod fields;
pub mod identifier;
pub mod ir;
pub mod pubtype;
pub mod render;
pub mod syntax;
pub mod transform;

pub use error::{ErrorKind, ParseError, TranslationError, TranslationResult};
pub use identifier::IdentifierType;
pub use ir::TranslationContext;
pub use render::{PagePlan, QueryRenderer, RmApiRenderer};
pub use syntax::{parse, CqlNode};
pub use transform::{QueryTransform, Validator};

use codex_config::TranslateConfig;
use crate::fields::SearchField;
use serde::Serialize;
use tracing::debug;

/// Downstream queries for one caller request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Translation {
    /// RM API query strings in page order, one or two entries
    pub queries: Vec<String>,
    /// Index into the merged downstream results where the caller's window starts
    pub instance_index: usize,
    /// The page plan the queries were built from
    pub plan: PagePlan,
    /// Kind of number searched for, on `identifier` searches only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier_type: Option<IdentifierType>,
}

/// Configured translation pipeline.
///
/// Holds no per-request state; every call builds its own context.
pub struct Translator {
    transform: Box<dyn QueryTransform>,
    renderer: Box<dyn QueryRenderer>,
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(Validator::default())
    }
}

impl Translator {
    /// Translator with the RM API renderer
    pub fn new(transform: impl QueryTransform + 'static) -> Self {
        Self {
            transform: Box::new(transform),
            renderer: Box::new(RmApiRenderer),
        }
    }

    /// Translator using the `[translate]` config section
    pub fn from_config(config: &TranslateConfig) -> Self {
        Self::new(Validator::new(config.unknown_pub_type))
    }

    /// Replace the renderer
    pub fn with_renderer(mut self, renderer: impl QueryRenderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    /// Translate `query` for the caller window `offset`/`limit`
    pub fn translate(&self, query: &str, offset: u32, limit: u32) -> TranslationResult<Translation> {
        let plan = PagePlan::new(offset, limit)?;

        let tree = syntax::parse(query)?;
        debug!(transform = self.transform.name(), tree = %tree, "parsed query");

        let ctx = self.transform.transform(&tree)?;

        let identifier_type = ctx
            .search()
            .filter(|search| search.field == SearchField::Identifier)
            .map(|search| IdentifierType::detect(&search.value));
        if let Some(kind) = identifier_type {
            debug!(identifier_type = %kind, "classified identifier search");
        }

        let queries = plan
            .pages()
            .into_iter()
            .map(|page| self.renderer.render(&ctx, limit, page))
            .collect::<TranslationResult<Vec<_>>>()?;

        debug!(
            renderer = self.renderer.name(),
            first_page = plan.first_page,
            second_page = plan.needs_second_page,
            instance_index = plan.instance_index,
            "planned downstream pages"
        );

        Ok(Translation {
            queries,
            instance_index: plan.instance_index as usize,
            plan,
            identifier_type,
        })
    }
}

/// Translate with default options
pub fn translate(query: &str, offset: u32, limit: u32) -> TranslationResult<Translation> {
    Translator::default().translate(query, offset, limit)
}

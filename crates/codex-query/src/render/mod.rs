//! Target renderers for a [`TranslationContext`].
//!
//! Renderers turn the collected constraints into one downstream query string
//! per page. [`PagePlan`] decides which pages are needed.

mod paging;
mod rmapi;

pub use paging::PagePlan;
pub use rmapi::{form_encode, RmApiRenderer};

use crate::error::TranslationResult;
use crate::ir::TranslationContext;

/// Trait for rendering a translation context to a downstream query string.
pub trait QueryRenderer: Send + Sync {
    /// Unique name for this renderer
    fn name(&self) -> &str;

    /// Render the query for one page of `limit` records
    fn render(&self, ctx: &TranslationContext, limit: u32, page: u64) -> TranslationResult<String>;
}

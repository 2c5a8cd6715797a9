//! Query transforms.
//!
//! Transforms turn a parsed [`CqlNode`] tree into a [`TranslationContext`],
//! rejecting anything the RM API cannot express.

mod validate;

pub use validate::Validator;

use crate::error::TranslationResult;
use crate::ir::TranslationContext;
use crate::syntax::CqlNode;

/// Trait for turning a CQL tree into a translation context
pub trait QueryTransform: Send + Sync {
    /// Unique name for this transform
    fn name(&self) -> &'static str;

    /// Walk the tree and collect its constraints
    fn transform(&self, node: &CqlNode) -> TranslationResult<TranslationContext>;
}

//! Validation transform.
//!
//! Walks the CQL tree and fills a [`TranslationContext`]. Only exact-match
//! terms joined by `and` over a closed set of fields get through.

use crate::error::{TranslationError, TranslationResult};
use crate::fields::{self, IndexRole, SearchField};
use crate::ir::TranslationContext;
use crate::pubtype::{self, UNKNOWN_RESOURCE_TYPE};
use crate::syntax::{CqlNode, SortKey, TermNode};
use crate::transform::QueryTransform;
use codex_config::UnknownPubTypePolicy;
use tracing::{debug, warn};

/// The only comparison the RM API supports
const EXACT_MATCH: &str = "=";

/// Validation transform that checks the tree against the supported subset.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    /// Handling of `type=` values missing from the publication type table
    pub unknown_pub_type: UnknownPubTypePolicy,
}

impl Validator {
    /// Validator with the given unknown publication type policy
    pub fn new(unknown_pub_type: UnknownPubTypePolicy) -> Self {
        Self { unknown_pub_type }
    }

    fn walk(&self, node: &CqlNode, ctx: &mut TranslationContext) -> TranslationResult<()> {
        match node {
            CqlNode::Term(term) => self.visit_term(term, ctx),
            CqlNode::And { left, right, .. } => {
                self.walk(left, ctx)?;
                self.walk(right, ctx)
            }
            CqlNode::OtherBoolean { op, .. } => Err(TranslationError::UnsupportedFeature {
                feature: op.as_str().to_ascii_uppercase(),
            }),
            CqlNode::Sort { keys, subtree } => {
                self.visit_sort(keys, ctx)?;
                self.walk(subtree, ctx)
            }
        }
    }

    fn visit_term(&self, term: &TermNode, ctx: &mut TranslationContext) -> TranslationResult<()> {
        if term.relation.base != EXACT_MATCH {
            return Err(TranslationError::UnsupportedOperator {
                operator: term.relation.base.clone(),
            });
        }

        let role = fields::index_role(&term.index).ok_or_else(|| unsupported_field(&term.index))?;

        match role {
            IndexRole::ServerChoice => self.set_search(SearchField::Title, term, ctx),
            IndexRole::Search(field) => self.set_search(field, term, ctx),
            IndexRole::AllRecords => Err(unsupported_field(&term.index)),
            IndexRole::Type => {
                let resource_type = self.resource_type(term)?;
                debug!(index = %term.index, resource_type, "type filter accepted");
                ctx.set_filter(term.index.clone(), resource_type)
            }
            IndexRole::Source => {
                if !fields::is_valid_source(&term.term) {
                    return Err(TranslationError::UnsupportedValue {
                        field: term.index.clone(),
                        value: term.term.clone(),
                    });
                }
                debug!(source = %term.term, "source accepted");
                Ok(())
            }
            IndexRole::Selected => {
                debug!(selection = %term.term, "selection accepted");
                ctx.set_selection(term.term.clone())
            }
        }
    }

    fn set_search(
        &self,
        field: SearchField,
        term: &TermNode,
        ctx: &mut TranslationContext,
    ) -> TranslationResult<()> {
        debug!(field = field.rm_api_name(), value = %term.term, "search accepted");
        ctx.set_search(field, term.term.clone())
    }

    fn resource_type(&self, term: &TermNode) -> TranslationResult<&'static str> {
        if let Some(resource_type) = pubtype::resource_type(&term.term) {
            return Ok(resource_type);
        }

        match self.unknown_pub_type {
            UnknownPubTypePolicy::Reject => Err(TranslationError::UnsupportedValue {
                field: term.index.clone(),
                value: term.term.clone(),
            }),
            UnknownPubTypePolicy::MapToUnknown => {
                warn!(value = %term.term, "unknown publication type, filtering on {}", UNKNOWN_RESOURCE_TYPE);
                Ok(UNKNOWN_RESOURCE_TYPE)
            }
        }
    }

    fn visit_sort(&self, keys: &[SortKey], ctx: &mut TranslationContext) -> TranslationResult<()> {
        let key = match keys {
            [key] => key,
            _ => {
                return Err(TranslationError::MultipleConstraint {
                    constraint: "Sorting on multiple keys".to_string(),
                })
            }
        };

        let order_by = fields::order_by(&key.index).ok_or_else(|| TranslationError::UnsupportedField {
            usage: "Sorting on",
            field: key.index.clone(),
        })?;

        debug!(key = %key.index, order_by, "sort accepted");
        ctx.set_sort(order_by)
    }
}

/// First `cql.allRecords` term anywhere in the tree
fn find_all_records(node: &CqlNode) -> Option<&TermNode> {
    match node {
        CqlNode::Term(term) => {
            (fields::index_role(&term.index) == Some(IndexRole::AllRecords)).then_some(term)
        }
        CqlNode::And { left, right, .. } | CqlNode::OtherBoolean { left, right, .. } => {
            find_all_records(left).or_else(|| find_all_records(right))
        }
        CqlNode::Sort { subtree, .. } => find_all_records(subtree),
    }
}

fn unsupported_field(index: &str) -> TranslationError {
    TranslationError::UnsupportedField {
        usage: "Search field",
        field: index.to_string(),
    }
}

impl QueryTransform for Validator {
    fn name(&self) -> &'static str {
        "validate"
    }

    fn transform(&self, node: &CqlNode) -> TranslationResult<TranslationContext> {
        // cql.allRecords is reported whatever else the query gets wrong
        if let Some(term) = find_all_records(node) {
            return Err(unsupported_field(&term.index));
        }

        let mut ctx = TranslationContext::new();
        self.walk(node, &mut ctx)?;
        Ok(ctx)
    }
}

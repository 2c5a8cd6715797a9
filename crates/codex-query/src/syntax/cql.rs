//! CQL grammar using chumsky.
//!
//! ```text
//! sortedQuery  ::= cqlQuery [ "sortby" sortKey+ ]
//! cqlQuery     ::= searchClause ( booleanGroup searchClause )*
//! searchClause ::= "(" cqlQuery ")" | index relation searchTerm | searchTerm
//! ```
//!
//! Booleans associate to the left and share one precedence level.

use crate::syntax::common::{
    comparison_symbol, keyword, modifier_list, quoted_string, search_term, word, Extra,
};
use crate::syntax::{BooleanOp, CqlNode, Modifier, Relation, SortKey, TermNode};
use chumsky::prelude::*;

/// Named relations, matched case-insensitively
const NAMED_RELATIONS: &[&str] = &["adj", "all", "any", "within", "encloses", "exact"];

/// Words that must be quoted to be searched for
const RESERVED_WORDS: &[&str] = &["and", "or", "not", "prox", "sortby"];

// ============================================================================
// Main parser
// ============================================================================

/// Full query with optional `sortby` clause
pub(crate) fn sorted_query_parser<'src>() -> impl Parser<'src, &'src str, CqlNode, Extra<'src>> {
    let sort_clause = keyword("sortby").ignore_then(
        sort_key_parser()
            .repeated()
            .at_least(1)
            .collect::<Vec<_>>(),
    );

    cql_query_parser()
        .then(sort_clause.or_not())
        .then_ignore(end())
        .map(|(query, keys)| match keys {
            Some(keys) => CqlNode::Sort {
                keys,
                subtree: Box::new(query),
            },
            None => query,
        })
}

/// Boolean combination of search clauses
fn cql_query_parser<'src>() -> impl Parser<'src, &'src str, CqlNode, Extra<'src>> + Clone {
    recursive(|query| {
        let nested = query
            .delimited_by(just('(').padded(), just(')').padded())
            .labelled("parenthesized query");

        let indexed = word()
            .padded()
            .then(relation_parser())
            .then(search_term().padded())
            .map(|((index, relation), term)| {
                CqlNode::Term(TermNode {
                    index,
                    relation,
                    term,
                })
            })
            .labelled("search clause like title=dinosaurs");

        let unreserved = word().try_map(|w: String, span| {
            if RESERVED_WORDS.iter().any(|r| r.eq_ignore_ascii_case(&w)) {
                Err(Rich::custom(
                    span,
                    format!("'{}' is a reserved word, quote it to search for it", w),
                ))
            } else {
                Ok(w)
            }
        });

        let bare = quoted_string()
            .or(unreserved)
            .padded()
            .map(|term| CqlNode::Term(TermNode::server_choice(term)));

        let clause = choice((nested, indexed, bare));

        clause
            .clone()
            .then(
                boolean_group_parser()
                    .then(clause)
                    .repeated()
                    .collect::<Vec<_>>(),
            )
            .map(|(first, rest)| {
                rest.into_iter()
                    .fold(first, |left, ((op, modifiers), right)| {
                        CqlNode::boolean(op, modifiers, left, right)
                    })
            })
    })
}

// ============================================================================
// Clause parts
// ============================================================================

/// `=`, `<>`, `any`, ... with optional modifiers
fn relation_parser<'src>() -> impl Parser<'src, &'src str, Relation, Extra<'src>> + Clone {
    let named = word().try_map(|w: String, span| {
        if NAMED_RELATIONS.iter().any(|r| r.eq_ignore_ascii_case(&w)) {
            Ok(w)
        } else {
            Err(Rich::custom(span, format!("'{}' is not a relation", w)))
        }
    });

    comparison_symbol()
        .or(named)
        .padded()
        .then(modifier_list())
        .map(|(base, modifiers)| Relation { base, modifiers })
        .labelled("relation like = or any")
}

/// `and`, `or`, `not`, `prox` with optional modifiers
fn boolean_group_parser<'src>(
) -> impl Parser<'src, &'src str, (BooleanOp, Vec<Modifier>), Extra<'src>> + Clone {
    word()
        .try_map(|w: String, span| {
            BooleanOp::from_keyword(&w).ok_or_else(|| {
                Rich::custom(span, format!("expected boolean operator, found '{}'", w))
            })
        })
        .padded()
        .then(modifier_list())
        .labelled("boolean operator")
}

/// `index` or `index/modifiers` after `sortby`
fn sort_key_parser<'src>() -> impl Parser<'src, &'src str, SortKey, Extra<'src>> + Clone {
    word()
        .padded()
        .then(modifier_list())
        .map(|(index, modifiers)| SortKey { index, modifiers })
        .labelled("sort key like title/sort.ascending")
}

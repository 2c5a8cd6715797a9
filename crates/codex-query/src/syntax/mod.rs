//! CQL syntax.
//!
//! Parses a CQL query string into a [`CqlNode`] tree. The grammar accepts
//! full CQL boolean, relation and sort syntax so that constructs outside the
//! supported subset can be rejected by name during validation rather than
//! surfacing as syntax errors.

mod common;
mod cql;

use crate::error::ParseError;
use chumsky::Parser;
use serde::Serialize;
use std::fmt;

/// Index used for a search term written without one
pub const SERVER_CHOICE_INDEX: &str = "cql.serverChoice";

/// Parse tree node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CqlNode {
    /// `index relation term`
    Term(TermNode),
    /// `left and right`
    And {
        /// Left operand
        left: Box<CqlNode>,
        /// Right operand
        right: Box<CqlNode>,
        /// Modifiers on the `and` keyword
        modifiers: Vec<Modifier>,
    },
    /// `left or|not|prox right`
    OtherBoolean {
        /// The operator, never [`BooleanOp::And`]
        op: BooleanOp,
        /// Left operand
        left: Box<CqlNode>,
        /// Right operand
        right: Box<CqlNode>,
        /// Modifiers on the operator keyword
        modifiers: Vec<Modifier>,
    },
    /// `subtree sortby key...`
    Sort {
        /// Sort keys in the order written
        keys: Vec<SortKey>,
        /// The query being sorted
        subtree: Box<CqlNode>,
    },
}

/// A search clause
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermNode {
    /// Index (search field) as written
    pub index: String,
    /// Comparison
    pub relation: Relation,
    /// Search term with quotes removed
    pub term: String,
}

/// Relation between index and term, e.g. `=`, `<>`, `any/stem`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relation {
    /// Comparator symbol or name
    pub base: String,
    /// Relation modifiers
    pub modifiers: Vec<Modifier>,
}

/// `/name`, or `/name=value`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Modifier {
    /// Modifier name
    pub name: String,
    /// Comparison symbol, when a value is attached
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<String>,
    /// Modifier value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// One `sortby` key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortKey {
    /// Index to sort on
    pub index: String,
    /// Sort modifiers such as `/sort.descending`
    pub modifiers: Vec<Modifier>,
}

/// CQL boolean operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BooleanOp {
    /// Conjunction
    And,
    /// Disjunction
    Or,
    /// Negated conjunction
    Not,
    /// Proximity
    Prox,
}

impl BooleanOp {
    /// Recognise a boolean keyword (case-insensitive)
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word.to_ascii_lowercase().as_str() {
            "and" => Some(Self::And),
            "or" => Some(Self::Or),
            "not" => Some(Self::Not),
            "prox" => Some(Self::Prox),
            _ => None,
        }
    }

    /// Keyword spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
            Self::Not => "not",
            Self::Prox => "prox",
        }
    }
}

impl fmt::Display for BooleanOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TermNode {
    /// Term with no index: `cql.serverChoice = term`
    pub fn server_choice(term: String) -> Self {
        Self {
            index: SERVER_CHOICE_INDEX.to_string(),
            relation: Relation {
                base: "=".to_string(),
                modifiers: Vec::new(),
            },
            term,
        }
    }
}

impl CqlNode {
    /// Combine two operands, routing `and` to [`CqlNode::And`]
    pub fn boolean(op: BooleanOp, modifiers: Vec<Modifier>, left: CqlNode, right: CqlNode) -> Self {
        let left = Box::new(left);
        let right = Box::new(right);
        match op {
            BooleanOp::And => Self::And {
                left,
                right,
                modifiers,
            },
            op => Self::OtherBoolean {
                op,
                left,
                right,
                modifiers,
            },
        }
    }
}

/// Parse a CQL query string
pub fn parse(input: &str) -> Result<CqlNode, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError::Empty);
    }

    cql::sorted_query_parser()
        .parse(input)
        .into_result()
        .map_err(|errs| ParseError::Syntax {
            errors: common::format_errors(&errs, input),
        })
}

// ============================================================================
// Rendering back to CQL
// ============================================================================

fn write_modifiers(f: &mut fmt::Formatter<'_>, modifiers: &[Modifier]) -> fmt::Result {
    for modifier in modifiers {
        write!(f, "/{}", modifier.name)?;
        if let (Some(comparison), Some(value)) = (&modifier.comparison, &modifier.value) {
            write!(f, "{}{}", comparison, value)?;
        }
    }
    Ok(())
}

fn write_term(f: &mut fmt::Formatter<'_>, term: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in term.chars() {
        if c == '"' || c == '\\' {
            write!(f, "\\{}", c)?;
        } else {
            write!(f, "{}", c)?;
        }
    }
    f.write_str("\"")
}

impl fmt::Display for CqlNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Term(term) => {
                write!(f, "{} {}", term.index, term.relation.base)?;
                write_modifiers(f, &term.relation.modifiers)?;
                f.write_str(" ")?;
                write_term(f, &term.term)
            }
            Self::And {
                left,
                right,
                modifiers,
            } => {
                write!(f, "({}) and", left)?;
                write_modifiers(f, modifiers)?;
                write!(f, " ({})", right)
            }
            Self::OtherBoolean {
                op,
                left,
                right,
                modifiers,
            } => {
                write!(f, "({}) {}", left, op)?;
                write_modifiers(f, modifiers)?;
                write!(f, " ({})", right)
            }
            Self::Sort { keys, subtree } => {
                write!(f, "{} sortby", subtree)?;
                for key in keys {
                    write!(f, " {}", key.index)?;
                    write_modifiers(f, &key.modifiers)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term(node: &CqlNode) -> &TermNode {
        match node {
            CqlNode::Term(term) => term,
            other => panic!("expected term, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_indexed_term() {
        let node = parse("title=dinosaurs").unwrap();
        let t = term(&node);

        assert_eq!(t.index, "title");
        assert_eq!(t.relation.base, "=");
        assert_eq!(t.term, "dinosaurs");
    }

    #[test]
    fn test_parse_bare_term_is_server_choice() {
        let node = parse("  dinosaurs ").unwrap();
        let t = term(&node);

        assert_eq!(t.index, SERVER_CHOICE_INDEX);
        assert_eq!(t.relation.base, "=");
        assert_eq!(t.term, "dinosaurs");
    }

    #[test]
    fn test_parse_quoted_term_with_escapes() {
        let node = parse(r#"title = "the \"best\" of a\b""#).unwrap();
        assert_eq!(term(&node).term, r#"the "best" of a\b"#);
    }

    #[test]
    fn test_parse_relation_symbols() {
        for (query, base) in [
            ("title<>x", "<>"),
            ("title==x", "=="),
            ("title >= x", ">="),
            ("title<x", "<"),
            ("title any x", "any"),
            ("title ADJ x", "ADJ"),
        ] {
            let node = parse(query).unwrap();
            assert_eq!(term(&node).relation.base, base, "query: {}", query);
        }
    }

    #[test]
    fn test_parse_relation_modifiers() {
        let node = parse("title =/ignoreCase/locale=en x").unwrap();
        let modifiers = &term(&node).relation.modifiers;

        assert_eq!(modifiers.len(), 2);
        assert_eq!(modifiers[0].name, "ignoreCase");
        assert_eq!(modifiers[1].value.as_deref(), Some("en"));
    }

    #[test]
    fn test_parse_and_is_left_associative() {
        let node = parse("a and b AND c").unwrap();

        match node {
            CqlNode::And { left, right, .. } => {
                assert!(matches!(*left, CqlNode::And { .. }));
                assert_eq!(term(&right).term, "c");
            }
            other => panic!("expected and, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_other_booleans() {
        for (query, expected) in [
            ("a or b", BooleanOp::Or),
            ("a not b", BooleanOp::Not),
            ("a prox/unit=word b", BooleanOp::Prox),
        ] {
            match parse(query).unwrap() {
                CqlNode::OtherBoolean { op, .. } => assert_eq!(op, expected),
                other => panic!("expected {:?}, got {:?}", expected, other),
            }
        }
    }

    #[test]
    fn test_parse_parentheses() {
        let node = parse("(title=a and type=books) and publisher=b").unwrap();

        match node {
            CqlNode::And { left, right, .. } => {
                assert!(matches!(*left, CqlNode::And { .. }));
                assert_eq!(term(&right).index, "publisher");
            }
            other => panic!("expected and, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_sortby() {
        let node = parse("title=a sortby title/sort.descending publisher").unwrap();

        match node {
            CqlNode::Sort { keys, subtree } => {
                assert_eq!(keys.len(), 2);
                assert_eq!(keys[0].index, "title");
                assert_eq!(keys[0].modifiers[0].name, "sort.descending");
                assert_eq!(keys[1].index, "publisher");
                assert_eq!(term(&subtree).term, "a");
            }
            other => panic!("expected sort, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_empty_fails() {
        assert_eq!(parse("   "), Err(ParseError::Empty));
    }

    #[test]
    fn test_parse_syntax_errors() {
        for query in ["title=", "(title=a", "title=a and", "a b", "title=a sortby", "\"unterminated"] {
            let result = parse(query);
            assert!(
                matches!(result, Err(ParseError::Syntax { .. })),
                "query {:?} gave {:?}",
                query,
                result
            );
        }
    }

    #[test]
    fn test_display_round_trips() {
        let node = parse(r#"title="a \"b\"" and type=books sortby title"#).unwrap();
        let reparsed = parse(&node.to_string()).unwrap();
        assert_eq!(node, reparsed);
    }
}

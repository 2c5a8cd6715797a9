//! Shared parser primitives for the CQL grammar.

use crate::syntax::Modifier;
use chumsky::extra;
use chumsky::prelude::*;

/// Extra type for parsers - uses Rich errors for better messages
pub type Extra<'src> = extra::Err<Rich<'src, char>>;

/// Characters that end an unquoted word
const WORD_BREAKS: &str = "()=<>\"/";

// ============================================================================
// Primitive parsers
// ============================================================================

/// Unquoted word: index names, bare terms, keywords
pub fn word<'src>() -> impl Parser<'src, &'src str, String, Extra<'src>> + Clone {
    any()
        .filter(|c: &char| !c.is_whitespace() && !WORD_BREAKS.contains(*c))
        .repeated()
        .at_least(1)
        .to_slice()
        .map(|s: &str| s.to_string())
        .labelled("word")
}

/// Double-quoted string. `\"` and `\\` are unescaped, other escapes are kept.
pub fn quoted_string<'src>() -> impl Parser<'src, &'src str, String, Extra<'src>> + Clone {
    let escaped = just('\\').ignore_then(any()).map(|c: char| match c {
        '"' | '\\' => c.to_string(),
        other => format!("\\{}", other),
    });
    let plain = none_of("\\\"").map(|c: char| c.to_string());

    plain
        .or(escaped)
        .repeated()
        .collect::<Vec<String>>()
        .map(|parts| parts.concat())
        .delimited_by(just('"'), just('"'))
        .labelled("quoted string")
}

/// Search term: quoted string or word
pub fn search_term<'src>() -> impl Parser<'src, &'src str, String, Extra<'src>> + Clone {
    quoted_string().or(word()).labelled("search term")
}

/// Comparison symbols, longest first
pub fn comparison_symbol<'src>() -> impl Parser<'src, &'src str, String, Extra<'src>> + Clone {
    choice((
        just("=="),
        just("<>"),
        just("<="),
        just(">="),
        just("="),
        just("<"),
        just(">"),
    ))
    .to_slice()
    .map(|s: &str| s.to_string())
    .labelled("comparison symbol")
}

/// Case-insensitive keyword
pub fn keyword<'src>(keyword: &'static str) -> impl Parser<'src, &'src str, (), Extra<'src>> + Clone {
    word()
        .try_map(move |w: String, span| {
            if w.eq_ignore_ascii_case(keyword) {
                Ok(())
            } else {
                Err(Rich::custom(
                    span,
                    format!("expected keyword '{}'", keyword),
                ))
            }
        })
        .padded()
}

/// Modifier list: `/name` or `/name=value`, repeated. Consumes trailing
/// whitespace even when empty.
pub fn modifier_list<'src>() -> impl Parser<'src, &'src str, Vec<Modifier>, Extra<'src>> + Clone {
    just('/')
        .padded()
        .ignore_then(word())
        .then(comparison_symbol().padded().then(search_term()).or_not())
        .map(|(name, value)| {
            let (comparison, value) = value.unzip();
            Modifier {
                name,
                comparison,
                value,
            }
        })
        .labelled("modifier like /sort.descending")
        .repeated()
        .collect::<Vec<_>>()
        .padded()
}

// ============================================================================
// Error formatting
// ============================================================================

/// Format chumsky errors for human consumption.
///
/// Lines and columns are 1-based; columns count characters, not bytes.
pub fn format_errors(errs: &[Rich<'_, char>], input: &str) -> String {
    errs.iter()
        .map(|e| {
            let before = &input[..e.span().start.min(input.len())];
            let line = before.matches('\n').count() + 1;
            let line_start = before.rfind('\n').map_or(0, |i| i + 1);
            let col = before[line_start..].chars().count() + 1;

            format!("Line {}, column {}: {}", line, col, e.reason())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

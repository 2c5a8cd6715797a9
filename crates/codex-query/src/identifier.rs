//! RM API identifier types.
//!
//! Title records returned by the RM API carry identifiers tagged with a
//! numeric type code. Codes outside the table decode to [`IdentifierType::Unknown`].
//! An `identifier=` search value is classified by its shape so callers know
//! which kind of number they searched for.

use serde::Serialize;
use std::fmt;

/// Identifier type of an RM API title identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IdentifierType {
    /// Unrecognised code
    Unknown,
    /// International Standard Serial Number
    Issn,
    /// International Standard Book Number
    Isbn,
    /// Zeitschriftendatenbank id
    Zdbid,
}

impl IdentifierType {
    /// Decode an RM API type code
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Issn,
            1 => Self::Isbn,
            6 => Self::Zdbid,
            _ => Self::Unknown,
        }
    }

    /// RM API type code, `-1` for unknown
    pub fn code(&self) -> i32 {
        match self {
            Self::Unknown => -1,
            Self::Issn => 0,
            Self::Isbn => 1,
            Self::Zdbid => 6,
        }
    }

    /// Display name, empty for unknown
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Unknown => "",
            Self::Issn => "ISSN",
            Self::Isbn => "ISBN",
            Self::Zdbid => "ZDBID",
        }
    }

    /// Classify a search value by shape.
    ///
    /// Hyphens and spaces are ignored. Eight characters make an ISSN, ten or
    /// thirteen an ISBN; only the last may be an `X` check digit, and only
    /// for ISSN and ISBN-10.
    pub fn detect(value: &str) -> Self {
        let chars: Vec<char> = value
            .chars()
            .filter(|c| *c != '-' && !c.is_whitespace())
            .collect();
        let Some((last, body)) = chars.split_last() else {
            return Self::Unknown;
        };
        if !body.iter().all(char::is_ascii_digit) {
            return Self::Unknown;
        }
        let check_x = last.eq_ignore_ascii_case(&'x');
        if !last.is_ascii_digit() && !check_x {
            return Self::Unknown;
        }

        match chars.len() {
            8 => Self::Issn,
            10 => Self::Isbn,
            13 if !check_x => Self::Isbn,
            _ => Self::Unknown,
        }
    }

    /// Look up by display name (case-insensitive)
    pub fn from_display_name(name: &str) -> Option<Self> {
        [Self::Issn, Self::Isbn, Self::Zdbid]
            .into_iter()
            .find(|t| t.display_name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for IdentifierType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0, IdentifierType::Issn, "ISSN" ; "issn")]
    #[test_case(1, IdentifierType::Isbn, "ISBN" ; "isbn")]
    #[test_case(6, IdentifierType::Zdbid, "ZDBID" ; "zdbid")]
    #[test_case(2, IdentifierType::Unknown, "" ; "unassigned code")]
    #[test_case(-7, IdentifierType::Unknown, "" ; "negative code")]
    fn test_from_code(code: i32, expected: IdentifierType, name: &str) {
        let decoded = IdentifierType::from_code(code);
        assert_eq!(decoded, expected);
        assert_eq!(decoded.display_name(), name);
    }

    #[test]
    fn test_code_round_trip() {
        for t in [IdentifierType::Issn, IdentifierType::Isbn, IdentifierType::Zdbid] {
            assert_eq!(IdentifierType::from_code(t.code()), t);
        }
        assert_eq!(IdentifierType::Unknown.code(), -1);
    }

    #[test_case("0317-8471", IdentifierType::Issn ; "issn")]
    #[test_case("2049-363x", IdentifierType::Issn ; "issn lower check digit")]
    #[test_case("0-19-852663-6", IdentifierType::Isbn ; "isbn 10")]
    #[test_case("080442957X", IdentifierType::Isbn ; "isbn 10 check digit")]
    #[test_case("978 0 19 852663 6", IdentifierType::Isbn ; "isbn 13 spaced")]
    #[test_case("978019852663X", IdentifierType::Unknown ; "isbn 13 never has x")]
    #[test_case("12X4-5678", IdentifierType::Unknown ; "x inside")]
    #[test_case("dinosaurs", IdentifierType::Unknown ; "words")]
    #[test_case("", IdentifierType::Unknown ; "empty")]
    fn test_detect(value: &str, expected: IdentifierType) {
        assert_eq!(IdentifierType::detect(value), expected);
    }

    #[test]
    fn test_serializes_as_display_name() {
        assert_eq!(serde_json::to_string(&IdentifierType::Issn).unwrap(), "\"ISSN\"");
    }

    #[test]
    fn test_from_display_name() {
        assert_eq!(IdentifierType::from_display_name("isbn"), Some(IdentifierType::Isbn));
        assert_eq!(IdentifierType::from_display_name(""), None);
    }
}

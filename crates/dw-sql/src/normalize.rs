//! Deterministic reformatting of raw statement text
//!
//! Both the tree path and the reference path consume text produced here, so
//! every rule must be stable: the same input always yields byte-identical
//! output. The reference patterns rely on single spaces between tokens and on
//! bracket/comma punctuation being free-standing.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Case applied to recognised keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordCase {
    /// `select` -> `SELECT`
    #[default]
    Upper,
    /// `SELECT` -> `select`
    Lower,
}

impl std::fmt::Display for KeywordCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeywordCase::Upper => write!(f, "upper"),
            KeywordCase::Lower => write!(f, "lower"),
        }
    }
}

/// Options shared by every normalization call of a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Case applied to keywords outside of quoted text
    pub keyword_case: KeywordCase,
}

impl NormalizeOptions {
    /// Options with the given keyword case
    pub fn with_case(keyword_case: KeywordCase) -> Self {
        Self { keyword_case }
    }
}

/// Keywords recognised by the normalizer, upper case and sorted for binary search.
const KEYWORDS: &[&str] = &[
    "ALL", "ALTER", "AND", "AS", "ASC", "BEGIN", "BETWEEN", "BY", "CALL", "CASE", "CAST",
    "COMMIT", "CREATE", "CROSS", "DECLARE", "DEFAULT", "DELETE", "DESC", "DISTINCT", "DROP",
    "ELSE", "END", "EXCEPT", "EXECUTE", "EXISTS", "EXTERNAL", "FALSE", "FOR", "FROM", "FULL",
    "FUNCTION", "GLOBAL", "GRANT", "GROUP", "HAVING", "IF", "ILIKE", "IN", "INNER", "INSERT",
    "INTERSECT", "INTO", "IS", "JOIN", "LANGUAGE", "LEFT", "LIKE", "LIMIT", "LOCAL",
    "LOCATION", "LOOP", "MATERIALIZED", "MERGE", "NOT", "NULL", "OFFSET", "ON", "OR", "ORDER",
    "OUTER", "OVER", "PARTITION", "PROCEDURE", "RAISE", "REFRESH", "REPLACE", "RETURN",
    "RETURNS", "RIGHT", "ROLLBACK", "SCHEMA", "SELECT", "SET", "TABLE", "TEMP", "TEMPORARY",
    "THEN", "TRUE", "TRUNCATE", "UNION", "UPDATE", "USING", "VALUES", "VIEW", "WHEN", "WHERE",
    "WITH",
];

/// Whether a bare word is one of the recognised keywords (case-insensitive)
pub fn is_keyword(word: &str) -> bool {
    KEYWORDS
        .binary_search(&word.to_ascii_uppercase().as_str())
        .is_ok()
}

fn punctuation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([(,)])").expect("valid regex"))
}

fn dotted_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([A-Za-z0-9_]+)\s*\.\s*([A-Za-z0-9_]+)").expect("valid regex"))
}

/// Normalize raw statement text.
///
/// Applied in order: comment removal and keyword casing (outside quotes),
/// spacing around `(`, `,` and `)`, de-spacing of dotted identifiers,
/// canonical spacing of `=`, `||` and `::`, whitespace collapsing and trimming.
pub fn normalize(sql: &str, options: &NormalizeOptions) -> String {
    let text = strip_comments_and_case(sql, options.keyword_case);
    let text = punctuation_re().replace_all(&text, " ${1} ").into_owned();
    let text = join_dotted(&text);
    let text = respace_operators(&text);
    collapse_whitespace(&text)
}

/// Collapse whitespace runs to a single space and trim both ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Fuse `a . b` into `a.b` until no spaced dot remains between word characters.
///
/// One regex pass cannot fuse `a . b . c` completely because matches do not
/// overlap, hence the loop.
fn join_dotted(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let next = dotted_re().replace_all(&current, "${1}.${2}").into_owned();
        if next == current {
            return current;
        }
        current = next;
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Copy a quoted literal starting at `chars[start]` into `out`, returning the
/// index just past the closing quote (or the end of input).
fn copy_quoted(chars: &[char], start: usize, out: &mut String) -> usize {
    let quote = chars[start];
    out.push(quote);
    let mut i = start + 1;
    while i < chars.len() {
        out.push(chars[i]);
        if chars[i] == quote {
            return i + 1;
        }
        i += 1;
    }
    i
}

/// Remove `--` and `/* */` comments and apply keyword casing, leaving quoted
/// literals and quoted identifiers untouched.
fn strip_comments_and_case(sql: &str, case: KeywordCase) -> String {
    let chars: Vec<char> = sql.chars().collect();
    let mut out = String::with_capacity(sql.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();

        match c {
            '-' if next == Some('-') => {
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
            }
            '/' if next == Some('*') => {
                i += 2;
                while i < chars.len() && !(chars[i] == '*' && chars.get(i + 1) == Some(&'/')) {
                    i += 1;
                }
                i = (i + 2).min(chars.len());
                out.push(' ');
            }
            '\'' | '"' => {
                i = copy_quoted(&chars, i, &mut out);
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let start = i;
                while i < chars.len() && is_word_char(chars[i]) {
                    i += 1;
                }
                let word: String = chars[start..i].iter().collect();
                let qualified = (start > 0 && chars[start - 1] == '.')
                    || chars.get(i).copied() == Some('.');
                if !qualified && is_keyword(&word) {
                    match case {
                        KeywordCase::Upper => out.push_str(&word.to_ascii_uppercase()),
                        KeywordCase::Lower => out.push_str(&word.to_ascii_lowercase()),
                    }
                } else {
                    out.push_str(&word);
                }
            }
            c if c.is_ascii_digit() => {
                while i < chars.len() && is_word_char(chars[i]) {
                    out.push(chars[i]);
                    i += 1;
                }
            }
            _ => {
                out.push(c);
                i += 1;
            }
        }
    }

    out
}

fn trim_trailing_whitespace(out: &mut String) {
    while out.ends_with(char::is_whitespace) {
        out.pop();
    }
}

fn skip_whitespace(chars: &[char], mut i: usize) -> usize {
    while i < chars.len() && chars[i].is_whitespace() {
        i += 1;
    }
    i
}

/// Canonical spacing: ` = `, ` || `, and `::` with no surrounding space.
/// Compound comparison operators (`<=`, `>=`, `!=`, `==`, `=>`, `:=`) keep
/// their `=` attached.
fn respace_operators(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();

        match c {
            '\'' | '"' => {
                i = copy_quoted(&chars, i, &mut out);
            }
            '|' if next == Some('|') => {
                trim_trailing_whitespace(&mut out);
                out.push_str(" || ");
                i = skip_whitespace(&chars, i + 2);
            }
            ':' if next == Some(':') => {
                trim_trailing_whitespace(&mut out);
                out.push_str("::");
                i = skip_whitespace(&chars, i + 2);
            }
            '=' => {
                let prev = i.checked_sub(1).map(|p| chars[p]);
                let compound = matches!(prev, Some('<' | '>' | '!' | '=' | ':'))
                    || matches!(next, Some('=' | '>'));
                if compound {
                    out.push('=');
                    i += 1;
                } else {
                    trim_trailing_whitespace(&mut out);
                    out.push_str(" = ");
                    i = skip_whitespace(&chars, i + 1);
                }
            }
            _ => {
                out.push(c);
                i += 1;
            }
        }
    }

    out
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;

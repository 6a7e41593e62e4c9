//! Index suffix rewriting for field references in query text.
//!
//! User queries refer to attributes by name (`name:Chunky`). The index stores
//! each attribute under a suffixed name, so references are first given the
//! default text suffix (`name_t:Chunky`) and then rewritten to the configured
//! type (`name_s:Chunky`).

use std::sync::LazyLock;

use regex::Regex;

use crate::types::IndexSchema;

/// Suffix of tokenized text fields, assumed for unconfigured attributes.
pub const TEXT_SUFFIX: &str = "_t";

static FIELD_COLON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" *: *").expect("field colon pattern is valid"));

static ORDER_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*,\s*").expect("order separator pattern is valid"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

static SCORE_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bscore_t\b").expect("score field pattern is valid"));

/// Gives every `field:` reference the text suffix (`field_t:`).
///
/// Spaces around the colon are dropped.
pub fn add_text_suffix(query: &str) -> String {
    FIELD_COLON
        .replace_all(query, format!("{}:", TEXT_SUFFIX).as_str())
        .into_owned()
}

/// Rewrites text-suffixed references to configured fields to their real type.
///
/// With `include_colon`, only `name_t:` fragments are rewritten, as found in
/// query clauses. Without it, bare `name_t` tokens are rewritten, as found in
/// sort clauses and field lists. Configured aliases take the place of the
/// attribute name.
pub fn replace_types(text: &str, schema: &IndexSchema, include_colon: bool) -> String {
    let suffix = if include_colon { ":" } else { "" };
    let mut rewritten = text.to_string();
    for (name, field_type) in schema.indexed_fields() {
        let from = format!("{}{}{}", name, TEXT_SUFFIX, suffix);
        let to = format!("{}_{}{}", name, field_type.code(), suffix);
        rewritten = replace_token(&rewritten, &from, &to, !include_colon);
    }
    rewritten
}

/// Turns a sort option (`"name asc, score desc"`) into a sort clause with
/// index field names (`"name_s asc,score desc"`).
pub fn order_clause(order: &str, schema: &IndexSchema) -> String {
    let clause = ORDER_SEPARATOR
        .split(order.trim())
        .map(|criterion| {
            let suffixed = WHITESPACE.replace_all(criterion, format!("{} ", TEXT_SUFFIX).as_str());
            SCORE_FIELD.replace_all(&suffixed, "score").into_owned()
        })
        .collect::<Vec<_>>()
        .join(",");
    replace_types(&clause, schema, false)
}

/// Returns the index name of a field referenced without a colon.
pub fn field_name(name: &str, schema: &IndexSchema) -> String {
    replace_types(&format!("{}{}", name, TEXT_SUFFIX), schema, false)
}

/// Strips the type suffix from an index field name (`title_t` -> `title`).
pub fn strip_suffix(field: &str) -> &str {
    match field.rfind('_') {
        Some(pos) if pos > 0 => &field[..pos],
        _ => field,
    }
}

/// Replaces `from` wherever it starts on a word boundary, and, when
/// `trailing_boundary` is set, also ends on one.
fn replace_token(text: &str, from: &str, to: &str, trailing_boundary: bool) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    let mut preceding: Option<char> = None;

    while let Some(pos) = rest.find(from) {
        let before = rest[..pos].chars().next_back().or(preceding);
        let after = rest[pos + from.len()..].chars().next();
        let starts_clean = !before.is_some_and(is_word_char);
        let ends_clean = !trailing_boundary || !after.is_some_and(is_word_char);

        if starts_clean && ends_clean {
            out.push_str(&rest[..pos]);
            out.push_str(to);
            preceding = from.chars().next_back();
            rest = &rest[pos + from.len()..];
        } else {
            let skip = pos + rest[pos..].chars().next().map_or(1, char::len_utf8);
            out.push_str(&rest[..skip]);
            preceding = rest[..skip].chars().next_back();
            rest = &rest[skip..];
        }
    }
    out.push_str(rest);
    out
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

//! Name and namespace canonicalization
//!
//! Smooths over per-ecosystem naming conventions so that `get_user_name`,
//! `getUserName` and `GetUserName` produce the same comparison key:
//!
//! 1. Drop generic argument lists (`List<T>`, `Optional[str]`).
//! 2. Split on every non-alphanumeric separator (`_`, `.`, `-`, `::`, `/`).
//! 3. Split each chunk on case transitions (`HTTPServer` -> `HTTP`, `Server`).
//! 4. Lowercase every token.
//!
//! Everything here is pure. Results depend only on the input string.

use once_cell::sync::Lazy;
use regex::Regex;

/// Token joiner for normalized names
pub const TOKEN_SEPARATOR: &str = "_";

/// Path segments that mark a root rather than a real module
const ROOT_SEGMENTS: &[&str] = &["crate", "<root>", "__init__"];

/// Delimiters between module segments inside one namespace entry
const PATH_DELIMITERS: &[char] = &['.', '/', ':'];

static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\p{L}\p{N}]+").unwrap());

// Word start after any character: "getUser" -> "get_User", "HTTPServer" -> "HTTP_Server"
static WORD_BOUNDARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(.)(\p{Lu}\p{Ll}+)").unwrap());

// Lower/digit followed by upper: "getHTTP" -> "get_HTTP"
static CASE_BOUNDARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"([\p{Ll}\p{N}])(\p{Lu})").unwrap());

/// Normalize an identifier into a single comparison key
pub fn normalize(name: &str) -> String {
    tokenize(name).join(TOKEN_SEPARATOR)
}

/// Normalize a namespace path into a flat token path
pub fn normalize_namespace<S: AsRef<str>>(segments: &[S]) -> Vec<String> {
    segments
        .iter()
        .map(|s| s.as_ref().trim())
        .filter(|s| !s.is_empty() && !ROOT_SEGMENTS.contains(s))
        .flat_map(tokenize)
        .collect()
}

/// Normalize a namespace into one key per module segment.
///
/// Segments are split on path delimiters only, never on word boundaries:
/// `["llm_agent", "flows"]` stays two segments, `llm_agent` and `flows`.
pub fn module_segments<S: AsRef<str>>(segments: &[S]) -> Vec<String> {
    segments
        .iter()
        .flat_map(|s| s.as_ref().split(PATH_DELIMITERS))
        .map(str::trim)
        .filter(|s| !s.is_empty() && !ROOT_SEGMENTS.contains(s))
        .map(normalize)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Split an identifier into lowercase tokens
pub fn tokenize(identifier: &str) -> Vec<String> {
    let stripped = strip_generics(identifier);
    SEPARATORS
        .split(&stripped)
        .filter(|chunk| !chunk.is_empty())
        .flat_map(split_case)
        .collect()
}

/// Split a separator-free chunk on case transitions and lowercase the parts
fn split_case(chunk: &str) -> Vec<String> {
    let marked = WORD_BOUNDARY.replace_all(chunk, "${1}_${2}");
    let marked = CASE_BOUNDARY.replace_all(&marked, "${1}_${2}");
    marked
        .split('_')
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
        .collect()
}

/// Remove bracketed generic arguments, including nested ones
fn strip_generics(identifier: &str) -> String {
    let mut out = String::with_capacity(identifier.len());
    let mut depth = 0usize;

    for c in identifier.chars() {
        match c {
            '<' | '[' => depth += 1,
            '>' | ']' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }

    out
}

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::vss::VssNode;

static SEPARATED_LOWER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-_.\s]([a-z])").unwrap());
static NON_ALPHANUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9]+").unwrap());

/// lowerCamelCase form of a node name. A leading uppercase run is lowered up
/// to the last capital before the first lowercase character, so acronym
/// prefixes collapse cleanly ("ABSPosition" -> "absPosition"). Indexing is
/// by character, since node names are arbitrary YAML keys.
pub fn to_lower_camel_case(name: &str) -> String {
    let head_chars = match name.chars().position(|c| !c.is_ascii_uppercase()) {
        Some(i) => std::cmp::max(1, i.saturating_sub(1)),
        None => name.chars().count(),
    };
    let head_end = name
        .char_indices()
        .nth(head_chars)
        .map_or(name.len(), |(i, _)| i);
    let head = name[..head_end].to_lowercase();
    let tail = SEPARATED_LOWER.replace_all(&name[head_end..], |caps: &Captures| {
        caps[1].to_uppercase()
    });
    format!("{head}{tail}")
}

/// Sanitize a word into a GraphQL-safe identifier: non-alphanumeric runs
/// collapse to `_`, and a leading digit gets a `_` prefix.
pub fn str_as_variable(word: &str) -> String {
    let sanitized = NON_ALPHANUMERIC.replace_all(word, "_");
    if word.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{sanitized}")
    } else {
        sanitized.into_owned()
    }
}

pub fn str_as_uppercase_variable(word: &str) -> String {
    str_as_variable(word).to_uppercase()
}

pub fn type_name(node: &VssNode) -> String {
    node.qualified_name("_")
}

pub fn input_name(node: &VssNode) -> String {
    node.qualified_name("_") + "_Input"
}

pub fn enum_name(node: &VssNode) -> String {
    node.qualified_name("_") + "_Enum"
}

pub fn mutation_name(node: &VssNode) -> String {
    format!("set{}", node.qualified_name(""))
}

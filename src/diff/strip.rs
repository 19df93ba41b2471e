// src/diff/strip.rs

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

static NAMED_ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&\w+;").expect("entity pattern is valid"));

/// `&name;` -> replacement text. Legacy forms without the semicolon are left
/// out, so only complete references are resolved.
static ENTITY_TABLE: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    entities::ENTITIES
        .iter()
        .filter(|e| e.entity.ends_with(';'))
        .map(|e| (e.entity, e.characters))
        .collect()
});

/// Replace every tag with a single space and resolve named character
/// references such as `&amp;`.
///
/// Unknown entity names are kept verbatim.
pub fn strip_markup(text: &str) -> String {
    let without_tags = TAG.replace_all(text, " ");
    NAMED_ENTITY
        .replace_all(&without_tags, |caps: &Captures| resolve_entity(&caps[0]))
        .into_owned()
}

fn resolve_entity(entity: &str) -> String {
    ENTITY_TABLE
        .get(entity)
        .map_or_else(|| entity.to_string(), |chars| chars.to_string())
}

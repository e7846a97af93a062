//! Identifier naming rules
//!
//! Struct and enum names are PascalCase, field names in GraphQL documents are
//! the struct field name with a lowercased first letter, argument names are
//! lowerCamel with `id` spelled `ID`.

use crate::request::{Column, Parameter};
use once_cell::sync::Lazy;
use regex::Regex;
use sqlc_graphql_config::ResolvedOptions;

static NON_IDENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z0-9_]+").unwrap());
static CAMEL_BOUNDARY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Z][A-Z]+").unwrap());

/// Uppercase the first character (`authors` -> `Authors`)
pub fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lowercase the first character (`HasNext` -> `hasNext`)
pub fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// PascalCase struct/enum name, honoring exact-name renames
pub fn struct_name(name: &str, options: &ResolvedOptions) -> String {
    if let Some(rename) = options.rename_for(name) {
        return rename.to_string();
    }

    let sanitized: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    let out: String = sanitized.split('_').map(upper_first).collect();

    if out.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{out}")
    } else {
        out
    }
}

/// lowerCamel argument name (`author_id` -> `authorID`)
pub fn arg_name(name: &str) -> String {
    name.split('_')
        .enumerate()
        .map(|(i, part)| match (i, part) {
            (0, part) => part.to_lowercase(),
            (_, "id") => "ID".to_string(),
            (_, part) => upper_first(part),
        })
        .collect()
}

/// snake_case of a camel or Pascal name; names with `_` are only lowercased
pub fn to_snake_case(s: &str) -> String {
    if s.contains('_') {
        return s.to_lowercase();
    }
    CAMEL_BOUNDARY_RE
        .replace_all(s, |caps: &regex::Captures<'_>| {
            let m = &caps[0];
            let split = m.chars().next().map_or(0, char::len_utf8);
            format!("{}_{}", &m[..split], &m[split..])
        })
        .to_lowercase()
}

/// Identifier-safe enum value (`in-progress` -> `in_progress`)
pub fn enum_replace(value: &str) -> String {
    let id = value.replace(['-', ':', '/'], "_");
    NON_IDENT_RE.replace_all(&id, "").into_owned()
}

/// Result column name, or `column_<n>` for unnamed expressions
pub fn column_name(column: &Column, pos: usize) -> String {
    if column.name.is_empty() {
        format!("column_{}", pos + 1)
    } else {
        column.name.clone()
    }
}

/// Scalar argument name for a parameter
pub fn param_name(param: &Parameter) -> String {
    if param.column.name.is_empty() {
        format!("dollar_{}", param.number)
    } else {
        arg_name(&param.column.name)
    }
}

//! Option documents as they arrive from sqlc
//!
//! `Options` is the per-plugin block, `GlobalOptions` the lower-precedence
//! block shared by every plugin invocation. Both are plain data; merging and
//! validation live in [`crate::resolver`].

use crate::directives::DirectiveRule;
use crate::overrides::Override;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default for `query_parameter_limit` when the document omits it
pub const DEFAULT_QUERY_PARAMETER_LIMIT: i32 = 1;

/// Per-invocation generator options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Go package the generated models live in
    pub package: String,

    /// Output directory; its last component doubles as the package name
    pub out: String,

    /// Type overrides, consulted before dialect mapping
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub overrides: Vec<Override>,

    /// Exact-name replacements applied when naming structs and enums
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub rename: HashMap<String, String>,

    /// Keep table names as-is instead of singularizing them
    pub emit_exact_table_names: bool,

    /// Table names that are never singularized
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub inflection_exclude_table_names: Vec<String>,

    /// Parameter count up to which an Input struct is inlined
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_parameter_limit: Option<i32>,

    /// Leave the sqlc version out of rendered documents
    pub omit_sqlc_version: bool,

    /// Drop enums and structs no emitted query reaches
    pub omit_unused_structs: bool,

    /// Schema whose entities are named without a prefix
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_schema: Option<String>,

    /// Also plan the shared `common.graphql` document
    pub gen_common_parts: bool,

    /// Fields to hide, as `TypeName.fieldName`
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,

    /// Directive decorations keyed by type and field
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub directives: Vec<DirectiveRule>,
}

/// Options shared across every plugin invocation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalOptions {
    /// Overrides placed ahead of the local ones
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub overrides: Vec<Override>,

    /// Renames used where the local map has no entry
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub rename: HashMap<String, String>,
}

impl Options {
    /// Package name, falling back to the last component of `out`
    pub fn effective_package(&self) -> Option<String> {
        if !self.package.is_empty() {
            return Some(self.package.clone());
        }
        std::path::Path::new(&self.out)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .filter(|name| !name.is_empty())
    }

    /// Configured parameter limit or the default of one
    pub fn query_parameter_limit(&self) -> i32 {
        self.query_parameter_limit
            .unwrap_or(DEFAULT_QUERY_PARAMETER_LIMIT)
    }
}

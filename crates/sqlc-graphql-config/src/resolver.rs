//! Option resolution and merging
//!
//! Merges the per-invocation options with the global options sqlc passes to
//! every plugin:
//! 1. Global overrides come first, then local overrides (order is precedence)
//! 2. Local renames win; global renames fill names the local map lacks
//!
//! The merged result is validated and compiled into [`ResolvedOptions`],
//! the only form the generator consumes.

use crate::directives::DirectiveRules;
use crate::error::{ConfigError, ConfigResult};
use crate::exclude::ExcludeRules;
use crate::loader::from_json_bytes;
use crate::options::{GlobalOptions, Options};
use crate::overrides::OverrideSet;
use std::collections::HashMap;
use tracing::debug;

/// Fully merged, validated options for one generation request
#[derive(Debug, Clone)]
pub struct ResolvedOptions {
    /// Package the generated models live in
    pub package: String,
    /// Global overrides followed by local ones
    pub overrides: OverrideSet,
    /// Exact-name replacements, local entries winning
    pub rename: HashMap<String, String>,
    /// Keep table names as they are instead of singularizing
    pub emit_exact_table_names: bool,
    /// Tables never singularized
    pub inflection_exclude_table_names: Vec<String>,
    /// Non-negative by construction
    pub query_parameter_limit: usize,
    /// Leave the sqlc version out of document headers
    pub omit_sqlc_version: bool,
    /// Drop enums and structs no query reaches
    pub omit_unused_structs: bool,
    /// Overrides the catalog's default schema
    pub default_schema: Option<String>,
    /// Plan a `common.graphql` document
    pub gen_common_parts: bool,
    /// Fields left out of every document
    pub exclude: ExcludeRules,
    /// Directive rules for types and fields
    pub directives: DirectiveRules,
}

impl Default for ResolvedOptions {
    fn default() -> Self {
        Self {
            package: String::new(),
            overrides: OverrideSet::default(),
            rename: HashMap::new(),
            emit_exact_table_names: false,
            inflection_exclude_table_names: Vec::new(),
            query_parameter_limit: 1,
            omit_sqlc_version: false,
            omit_unused_structs: false,
            default_schema: None,
            gen_common_parts: false,
            exclude: ExcludeRules::default(),
            directives: DirectiveRules::default(),
        }
    }
}

impl ResolvedOptions {
    /// Rename for an exact name, if configured
    pub fn rename_for(&self, name: &str) -> Option<&str> {
        self.rename
            .get(name)
            .map(String::as_str)
            .filter(|r| !r.is_empty())
    }
}

/// Merges local and global options
#[derive(Debug, Clone, Default)]
pub struct OptionsResolver {
    local: Options,
    global: Option<GlobalOptions>,
}

impl OptionsResolver {
    /// Resolver for a local options block with no global block
    pub fn new(local: Options) -> Self {
        Self {
            local,
            global: None,
        }
    }

    /// Layer global options underneath the local ones
    pub fn with_global(mut self, global: GlobalOptions) -> Self {
        self.global = Some(global);
        self
    }

    /// Build a resolver from the raw JSON blocks of a generate request
    pub fn from_request_bytes(plugin_options: &[u8], global_options: &[u8]) -> ConfigResult<Self> {
        let local: Options = from_json_bytes(plugin_options)?;
        let global: GlobalOptions = from_json_bytes(global_options)?;
        Ok(Self::new(local).with_global(global))
    }

    /// Merge, validate and compile
    pub fn resolve(self) -> ConfigResult<ResolvedOptions> {
        let Self { local, global } = self;
        let global = global.unwrap_or_default();

        let package = local
            .effective_package()
            .ok_or(ConfigError::MissingPackage)?;

        let limit = local.query_parameter_limit();
        let query_parameter_limit =
            usize::try_from(limit).map_err(|_| ConfigError::NegativeParameterLimit(limit))?;

        let exclude = ExcludeRules::parse(&local.exclude)?;
        let overrides = OverrideSet::compile(global.overrides.iter().chain(&local.overrides))?;

        let mut rename = local.rename;
        for (name, replacement) in global.rename {
            rename.entry(name).or_insert(replacement);
        }

        debug!(
            package = %package,
            overrides = overrides.len(),
            renames = rename.len(),
            "resolved generator options"
        );

        Ok(ResolvedOptions {
            package,
            overrides,
            rename,
            emit_exact_table_names: local.emit_exact_table_names,
            inflection_exclude_table_names: local.inflection_exclude_table_names,
            query_parameter_limit,
            omit_sqlc_version: local.omit_sqlc_version,
            omit_unused_structs: local.omit_unused_structs,
            default_schema: local.default_schema.filter(|s| !s.is_empty()),
            gen_common_parts: local.gen_common_parts,
            exclude,
            directives: DirectiveRules::new(local.directives),
        })
    }
}

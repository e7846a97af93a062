//! Type overrides
//!
//! An override replaces the GraphQL type the dialect mapping would pick. It
//! targets either a native database type (`db_type`, optionally
//! `schema.type`) or a column (`[[catalog.]schema.]table.column`, glob
//! segments allowed). Column rules are more specific and always win over
//! db-type rules; declaration order breaks ties within each group.

use crate::error::{ConfigError, ConfigResult};
use globset::{Glob, GlobMatcher};
use serde::{Deserialize, Serialize};

/// Override entry as written in the options document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Override {
    /// Native type to match, e.g. `text` or `public.status`
    #[serde(alias = "dbType", skip_serializing_if = "String::is_empty")]
    pub db_type: String,

    /// Column to match, e.g. `authors.name`
    #[serde(skip_serializing_if = "String::is_empty")]
    pub column: String,

    /// Replacement GraphQL type name
    #[serde(alias = "gqlType")]
    pub gql_type: String,

    /// Only match columns with this nullability (db-type rules)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,

    /// Only match columns with this signedness (db-type rules)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unsigned: Option<bool>,
}

/// Owning table of a column being probed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableRef<'a> {
    /// Catalog, usually empty
    pub catalog: &'a str,
    /// Schema, empty when unqualified
    pub schema: &'a str,
    /// Table name
    pub name: &'a str,
}

/// Everything an override needs to know about a column
#[derive(Debug, Clone, Copy)]
pub struct ColumnProbe<'a> {
    /// Original (pre-rename) column name
    pub column_name: &'a str,
    /// Table the column belongs to, if known
    pub table: Option<TableRef<'a>>,
    /// Schema of the native type, empty when unqualified
    pub type_schema: &'a str,
    /// Native type name
    pub type_name: &'a str,
    /// Column may hold NULL
    pub nullable: bool,
    /// MySQL `unsigned` column
    pub unsigned: bool,
    /// Schema assumed when a table or override leaves it out
    pub default_schema: &'a str,
}

/// What a compiled override matches on
#[derive(Debug, Clone)]
pub enum OverrideTarget {
    /// Native type, optionally schema-qualified
    DbType {
        /// Required type schema; `None` matches unqualified types
        schema: Option<String>,
        /// Type name
        name: String,
    },
    /// Column pattern such as `authors.name`
    Column(ColumnPattern),
}

/// Glob matchers for each segment of a column spec
#[derive(Debug, Clone)]
pub struct ColumnPattern {
    spec: String,
    catalog: Option<GlobMatcher>,
    schema: Option<GlobMatcher>,
    table: GlobMatcher,
    column: GlobMatcher,
}

/// An override ready for matching
#[derive(Debug, Clone)]
pub struct CompiledOverride {
    /// Replacement GraphQL type name
    pub gql_type: String,
    /// What the override matches on
    pub target: OverrideTarget,
    nullable: Option<bool>,
    unsigned: Option<bool>,
}

fn glob(pattern: &str) -> ConfigResult<GlobMatcher> {
    Glob::new(pattern)
        .map(|g| g.compile_matcher())
        .map_err(|source| ConfigError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })
}

impl ColumnPattern {
    fn parse(spec: &str) -> ConfigResult<Self> {
        let parts: Vec<&str> = spec.split('.').collect();
        let (catalog, schema, table, column) = match parts.as_slice() {
            [table, column] => (None, None, *table, *column),
            [schema, table, column] => (None, Some(*schema), *table, *column),
            [catalog, schema, table, column] => (Some(*catalog), Some(*schema), *table, *column),
            _ => {
                return Err(ConfigError::InvalidOverride {
                    target: spec.to_string(),
                    reason: "column must look like 'table.column' or 'schema.table.column'"
                        .to_string(),
                })
            }
        };
        if table.is_empty() || column.is_empty() {
            return Err(ConfigError::InvalidOverride {
                target: spec.to_string(),
                reason: "table and column segments must not be empty".to_string(),
            });
        }

        Ok(Self {
            spec: spec.to_string(),
            catalog: catalog.map(glob).transpose()?,
            schema: schema.map(glob).transpose()?,
            table: glob(table)?,
            column: glob(column)?,
        })
    }

    /// The spec this pattern was compiled from
    pub fn spec(&self) -> &str {
        &self.spec
    }

    fn matches(&self, probe: &ColumnProbe<'_>) -> bool {
        let Some(table) = probe.table else {
            return false;
        };
        if !self.column.is_match(probe.column_name) {
            return false;
        }
        let schema = if table.schema.is_empty() {
            probe.default_schema
        } else {
            table.schema
        };
        if let Some(catalog) = &self.catalog {
            if !catalog.is_match(table.catalog) {
                return false;
            }
        }
        let schema_matches = match &self.schema {
            Some(pattern) => pattern.is_match(schema),
            None => schema == probe.default_schema,
        };
        schema_matches && self.table.is_match(table.name)
    }
}

impl CompiledOverride {
    /// Validate and compile an override entry
    pub fn compile(entry: &Override) -> ConfigResult<Self> {
        let target_spec = match (entry.db_type.is_empty(), entry.column.is_empty()) {
            (true, true) => "<empty>".to_string(),
            (false, _) => entry.db_type.clone(),
            (true, false) => entry.column.clone(),
        };
        if entry.gql_type.trim().is_empty() {
            return Err(ConfigError::InvalidOverride {
                target: target_spec,
                reason: "gql_type must be set".to_string(),
            });
        }

        let target = match (entry.db_type.is_empty(), entry.column.is_empty()) {
            (false, true) => {
                let parts: Vec<&str> = entry.db_type.split('.').collect();
                match parts.as_slice() {
                    [name] => OverrideTarget::DbType {
                        schema: None,
                        name: name.to_string(),
                    },
                    [schema, name] => OverrideTarget::DbType {
                        schema: Some(schema.to_string()),
                        name: name.to_string(),
                    },
                    _ => {
                        return Err(ConfigError::InvalidOverride {
                            target: target_spec,
                            reason: "db_type must look like 'type' or 'schema.type'".to_string(),
                        })
                    }
                }
            }
            (true, false) => OverrideTarget::Column(ColumnPattern::parse(&entry.column)?),
            (false, false) => {
                return Err(ConfigError::InvalidOverride {
                    target: target_spec,
                    reason: "only one of db_type and column may be set".to_string(),
                })
            }
            (true, true) => {
                return Err(ConfigError::InvalidOverride {
                    target: target_spec,
                    reason: "one of db_type or column must be set".to_string(),
                })
            }
        };

        Ok(Self {
            gql_type: entry.gql_type.trim().to_string(),
            target,
            nullable: entry.nullable,
            unsigned: entry.unsigned,
        })
    }

    /// True for `column` overrides
    pub fn is_column_scoped(&self) -> bool {
        matches!(self.target, OverrideTarget::Column(_))
    }

    /// Does this override apply to the probed column?
    pub fn matches(&self, probe: &ColumnProbe<'_>) -> bool {
        match &self.target {
            OverrideTarget::Column(pattern) => pattern.matches(probe),
            OverrideTarget::DbType { schema, name } => {
                let schema = schema.as_deref().unwrap_or("");
                name == probe.type_name
                    && schema == probe.type_schema
                    && self.nullable.map_or(true, |n| n == probe.nullable)
                    && self.unsigned.map_or(true, |u| u == probe.unsigned)
            }
        }
    }
}

/// Ordered override list with column-first precedence
#[derive(Debug, Clone, Default)]
pub struct OverrideSet {
    rules: Vec<CompiledOverride>,
}

impl OverrideSet {
    /// Compile entries in declaration order
    pub fn compile<'a>(entries: impl IntoIterator<Item = &'a Override>) -> ConfigResult<Self> {
        let rules = entries
            .into_iter()
            .map(CompiledOverride::compile)
            .collect::<ConfigResult<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// First matching column rule, else first matching db-type rule
    pub fn find(&self, probe: &ColumnProbe<'_>) -> Option<&CompiledOverride> {
        self.rules
            .iter()
            .filter(|rule| rule.is_column_scoped())
            .find(|rule| rule.matches(probe))
            .or_else(|| {
                self.rules
                    .iter()
                    .filter(|rule| !rule.is_column_scoped())
                    .find(|rule| rule.matches(probe))
            })
    }

    /// Number of compiled overrides
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// No overrides configured
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

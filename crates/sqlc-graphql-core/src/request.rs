//! Generate request model
//!
//! Mirrors what sqlc hands a codegen plugin: engine settings, the catalog
//! (schemas, tables, enums, composite types) and the analyzed queries with
//! their result columns and parameters. All of it arrives pre-parsed; this
//! crate never looks at SQL text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Schemas that never produce enums or structs
pub const SYSTEM_SCHEMAS: [&str; 2] = ["pg_catalog", "information_schema"];

/// Database engine the catalog came from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    #[default]
    Postgresql,
    Mysql,
    Sqlite,
    /// Anything else: every column maps to `Unknown`
    #[serde(other)]
    Unsupported,
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Postgresql => "postgresql",
            Self::Mysql => "mysql",
            Self::Sqlite => "sqlite",
            Self::Unsupported => "unsupported",
        };
        f.write_str(name)
    }
}

/// Possibly qualified name of a table or type
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Identifier {
    pub catalog: String,
    pub schema: String,
    pub name: String,
}

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_schema(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// `schema.name`, or just `name` when unqualified
    pub fn data_type(&self) -> String {
        if self.schema.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.schema, self.name)
        }
    }

    /// Same table, resolving an empty schema on `self` to `default_schema`
    pub fn same_table(&self, other: &Identifier, default_schema: &str) -> bool {
        let schema = if self.schema.is_empty() {
            default_schema
        } else {
            &self.schema
        };
        self.catalog == other.catalog && schema == other.schema && self.name == other.name
    }
}

/// A table column, query result column or parameter column
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Column {
    pub name: String,
    /// Name before sqlc applied aliases
    pub original_name: String,
    pub not_null: bool,
    pub unsigned: bool,
    pub is_array: bool,
    pub array_dims: i32,
    pub comment: String,
    pub length: i32,
    pub is_named_param: bool,
    pub is_func_call: bool,
    pub scope: String,
    pub table: Option<Identifier>,
    pub table_alias: String,
    #[serde(rename = "type")]
    pub type_name: Option<Identifier>,
    /// Bound via `sqlc.slice()`
    pub is_sqlc_slice: bool,
    /// Set when the column stands for a whole row (`sqlc.embed()`)
    pub embed_table: Option<Identifier>,
}

impl Column {
    /// Qualified native type, empty when the analyzer could not type it
    pub fn data_type(&self) -> String {
        self.type_name
            .as_ref()
            .map(Identifier::data_type)
            .unwrap_or_default()
    }

    /// Name used for override matching
    pub fn match_name(&self) -> &str {
        if self.original_name.is_empty() {
            &self.name
        } else {
            &self.original_name
        }
    }

    /// Arrays always map to their non-null host representation
    pub fn maps_not_null(&self) -> bool {
        self.not_null || self.is_array
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Table {
    pub rel: Identifier,
    pub columns: Vec<Column>,
    pub comment: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Enum {
    pub name: String,
    pub vals: Vec<String>,
    pub comment: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositeType {
    pub name: String,
    pub comment: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Schema {
    pub name: String,
    pub comment: String,
    pub tables: Vec<Table>,
    pub enums: Vec<Enum>,
    pub composite_types: Vec<CompositeType>,
}

impl Schema {
    pub fn is_system(&self) -> bool {
        SYSTEM_SCHEMAS.contains(&self.name.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub comment: String,
    pub default_schema: String,
    pub name: String,
    pub schemas: Vec<Schema>,
}

impl Catalog {
    /// Schemas that produce enums and structs
    pub fn user_schemas(&self) -> impl Iterator<Item = &Schema> {
        self.schemas.iter().filter(|s| !s.is_system())
    }
}

/// sqlc query command, e.g. `:one`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    #[serde(rename = ":exec")]
    Exec,
    #[serde(rename = ":one")]
    One,
    #[serde(rename = ":many")]
    Many,
    #[serde(rename = ":batchone")]
    BatchOne,
    #[serde(rename = ":batchmany")]
    BatchMany,
    #[serde(rename = ":execrows")]
    ExecRows,
    #[serde(rename = ":execlastid")]
    ExecLastId,
    #[serde(rename = ":execresult")]
    ExecResult,
}

impl Command {
    /// Commands whose result rows are exposed
    pub fn returns_rows(self) -> bool {
        matches!(
            self,
            Self::One | Self::Many | Self::BatchOne | Self::BatchMany
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exec => ":exec",
            Self::One => ":one",
            Self::Many => ":many",
            Self::BatchOne => ":batchone",
            Self::BatchMany => ":batchmany",
            Self::ExecRows => ":execrows",
            Self::ExecLastId => ":execlastid",
            Self::ExecResult => ":execresult",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameter {
    pub number: i32,
    pub column: Column,
}

/// An analyzed query from a `.sql` source file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Query {
    pub text: String,
    pub name: String,
    pub cmd: Option<Command>,
    pub columns: Vec<Column>,
    pub params: Vec<Parameter>,
    pub comments: Vec<String>,
    pub filename: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub engine: Engine,
}

/// One generation request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateRequest {
    pub settings: Settings,
    pub catalog: Catalog,
    pub queries: Vec<Query>,
    pub sqlc_version: String,
    /// JSON bytes of the plugin's own options block
    pub plugin_options: Vec<u8>,
    /// JSON bytes of the options shared by all plugins
    pub global_options: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_type_qualification() {
        assert_eq!(Identifier::new("text").data_type(), "text");
        assert_eq!(
            Identifier::with_schema("pg_catalog", "int4").data_type(),
            "pg_catalog.int4"
        );
    }

    #[test]
    fn test_same_table_defaults_schema() {
        let model = Identifier::with_schema("public", "authors");

        assert!(Identifier::new("authors").same_table(&model, "public"));
        assert!(!Identifier::new("authors").same_table(&model, "app"));
        assert!(!Identifier::with_schema("public", "books").same_table(&model, "public"));
    }

    #[test]
    fn test_command_round_trips_through_sqlc_names() {
        let cmd: Command = serde_json::from_str("\":batchmany\"").unwrap();
        assert_eq!(cmd, Command::BatchMany);
        assert_eq!(cmd.to_string(), ":batchmany");
        assert!(cmd.returns_rows());
        assert!(!Command::ExecLastId.returns_rows());
    }

    #[test]
    fn test_unknown_engine_deserializes() {
        let settings: Settings = serde_json::from_str(r#"{"engine": "clickhouse"}"#).unwrap();
        assert_eq!(settings.engine, Engine::Unsupported);
    }

    #[test]
    fn test_match_name_prefers_original() {
        let column = Column {
            name: "author_name".to_string(),
            original_name: "name".to_string(),
            ..Default::default()
        };
        assert_eq!(column.match_name(), "name");
    }
}

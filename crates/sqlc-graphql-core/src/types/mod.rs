//! Type resolution
//!
//! Resolution runs in two steps:
//! 1. [`TypeMapper::resolve`] maps a column to a [`TargetType`]: the host
//!    representation the models use, with an explicit nullable wrapper.
//!    Overrides are consulted first; otherwise the engine's dialect table
//!    decides. Unrecognized native types become [`HostType::Unknown`].
//! 2. [`TypeMapper::gql_type`] classifies that target into a GraphQL scalar
//!    (or enum / custom name) and decorates it with `!` and list markers.

mod mysql;
mod postgres;
mod sqlite;

use crate::naming::struct_name;
use crate::request::{Catalog, Column, Engine};
use serde::Serialize;
use sqlc_graphql_config::{ColumnProbe, ResolvedOptions, TableRef};
use std::fmt;
use tracing::debug;

/// Host-side representation of a column value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HostType {
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float32,
    Float64,
    Bool,
    Text,
    Time,
    Uuid,
    Bytes,
    Json,
    Jsonb,
    InetAddr,
    CidrPrefix,
    MacAddr,
    DateRange,
    DateMultirange,
    /// Catalog enum, by its resolved struct name
    Enum(String),
    /// Library type addressed by a dotted path, e.g. `pgtype.Uint32`
    Qualified(String),
    /// Replacement name from a matching override
    Override(String),
    /// No mapping rule applied
    Unknown,
}

/// A host type plus whether it sits in a nullable wrapper
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetType {
    pub host: HostType,
    pub nullable: bool,
}

impl TargetType {
    pub fn plain(host: HostType) -> Self {
        Self {
            host,
            nullable: false,
        }
    }

    /// `host` when `not_null`, otherwise its nullable wrapper
    pub fn pick(host: HostType, not_null: bool) -> Self {
        Self {
            host,
            nullable: !not_null,
        }
    }

    pub fn unknown() -> Self {
        Self::plain(HostType::Unknown)
    }

    pub fn is_unknown(&self) -> bool {
        self.host == HostType::Unknown
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nullable {
            write!(f, "Option<{:?}>", self.host)
        } else {
            write!(f, "{:?}", self.host)
        }
    }
}

/// GraphQL scalar kinds plus named (enum, struct, custom) types
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum GqlScalar {
    Int,
    Float,
    Boolean,
    String,
    Time,
    Uuid,
    Json,
    Named(String),
    Unknown,
}

impl GqlScalar {
    pub fn name(&self) -> &str {
        match self {
            Self::Int => "Int",
            Self::Float => "Float",
            Self::Boolean => "Boolean",
            Self::String => "String",
            Self::Time => "Time",
            Self::Uuid => "UUID",
            Self::Json => "JSON",
            Self::Named(name) => name,
            Self::Unknown => "Unknown",
        }
    }
}

impl From<GqlScalar> for String {
    fn from(value: GqlScalar) -> Self {
        value.name().to_string()
    }
}

/// Strip namespace qualifiers and the nullable-wrapper prefix
fn strip_host_decoration(path: &str) -> String {
    let last = path.rsplit('.').next().unwrap_or(path);
    last.strip_prefix("Null").unwrap_or(last).to_string()
}

/// Classify a host type into its GraphQL scalar kind
pub fn scalar_kind(host: &HostType) -> GqlScalar {
    match host {
        HostType::Int8
        | HostType::Int16
        | HostType::Int32
        | HostType::Int64
        | HostType::Uint8
        | HostType::Uint16
        | HostType::Uint32
        | HostType::Uint64 => GqlScalar::Int,
        HostType::Float32 | HostType::Float64 => GqlScalar::Float,
        HostType::Bool => GqlScalar::Boolean,
        HostType::Text
        | HostType::InetAddr
        | HostType::CidrPrefix
        | HostType::MacAddr
        | HostType::DateRange
        | HostType::DateMultirange => GqlScalar::String,
        HostType::Time => GqlScalar::Time,
        HostType::Uuid => GqlScalar::Uuid,
        HostType::Bytes | HostType::Json | HostType::Jsonb => GqlScalar::Json,
        HostType::Enum(name) | HostType::Override(name) => GqlScalar::Named(name.clone()),
        HostType::Qualified(path) => GqlScalar::Named(strip_host_decoration(path)),
        HostType::Unknown => GqlScalar::Unknown,
    }
}

/// A decorated GraphQL type reference (`UUID!`, `[Author!]!`, `String`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct GqlType {
    pub scalar: GqlScalar,
    pub non_null: bool,
    /// Wrapped in a non-null list
    pub list: bool,
}

impl GqlType {
    pub fn new(scalar: GqlScalar, non_null: bool) -> Self {
        Self {
            scalar,
            non_null,
            list: false,
        }
    }

    /// Non-null reference to a named type (`Author!`)
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(GqlScalar::Named(name.into()), true)
    }

    /// Non-null list of non-null named items (`[Author!]!`)
    pub fn list_of(name: impl Into<String>) -> Self {
        Self {
            list: true,
            ..Self::named(name)
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.scalar == GqlScalar::Unknown
    }

    /// Base type name with all markers stripped
    pub fn base_name(&self) -> &str {
        self.scalar.name()
    }
}

impl fmt::Display for GqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bang = if self.non_null { "!" } else { "" };
        if self.list {
            write!(f, "[{}{bang}]!", self.scalar.name())
        } else {
            write!(f, "{}{bang}", self.scalar.name())
        }
    }
}

impl From<GqlType> for String {
    fn from(value: GqlType) -> Self {
        value.to_string()
    }
}

/// Resolves columns to target and GraphQL types for one request
pub struct TypeMapper<'a> {
    engine: Engine,
    catalog: &'a Catalog,
    options: &'a ResolvedOptions,
    default_schema: &'a str,
}

impl<'a> TypeMapper<'a> {
    pub fn new(
        engine: Engine,
        catalog: &'a Catalog,
        options: &'a ResolvedOptions,
        default_schema: &'a str,
    ) -> Self {
        Self {
            engine,
            catalog,
            options,
            default_schema,
        }
    }

    pub fn default_schema(&self) -> &'a str {
        self.default_schema
    }

    fn probe<'c>(&'c self, column: &'c Column) -> ColumnProbe<'c> {
        let (type_schema, type_name) = column
            .type_name
            .as_ref()
            .map_or(("", ""), |t| (t.schema.as_str(), t.name.as_str()));
        ColumnProbe {
            column_name: column.match_name(),
            table: column.table.as_ref().map(|t| TableRef {
                catalog: &t.catalog,
                schema: &t.schema,
                name: &t.name,
            }),
            type_schema,
            type_name,
            nullable: !column.maps_not_null(),
            unsigned: column.unsigned,
            default_schema: self.default_schema,
        }
    }

    /// Target type of a column; the first matching override short-circuits
    pub fn resolve(&self, column: &Column) -> TargetType {
        if let Some(rule) = self.options.overrides.find(&self.probe(column)) {
            return TargetType::pick(
                HostType::Override(rule.gql_type.clone()),
                column.maps_not_null(),
            );
        }

        let target = match self.engine {
            Engine::Postgresql => postgres::map(self, column),
            Engine::Mysql => mysql::map(self, column),
            Engine::Sqlite => sqlite::map(column),
            Engine::Unsupported => TargetType::unknown(),
        };
        if target.is_unknown() {
            debug!(
                engine = %self.engine,
                data_type = %column.data_type(),
                column = %column.name,
                "unknown native type"
            );
        }
        target
    }

    /// Decorated GraphQL type of a column
    pub fn gql_type(&self, column: &Column) -> GqlType {
        let target = self.resolve(column);
        GqlType {
            scalar: scalar_kind(&target.host),
            non_null: column.not_null,
            list: column.is_sqlc_slice || column.is_array,
        }
    }

    /// Catalog enum named `name` in `schema`, as host type
    fn lookup_enum(&self, schema: &str, name: &str, not_null: bool) -> Option<TargetType> {
        self.catalog
            .user_schemas()
            .filter(|s| s.name == schema)
            .flat_map(|s| s.enums.iter().map(move |e| (s, e)))
            .find(|(_, e)| e.name == name)
            .map(|(s, e)| {
                let enum_name = if s.name == self.default_schema {
                    e.name.clone()
                } else {
                    format!("{}_{}", s.name, e.name)
                };
                TargetType::pick(
                    HostType::Enum(struct_name(&enum_name, self.options)),
                    not_null,
                )
            })
    }

    /// Catalog enum with this name in any user schema (MySQL has no schemas)
    fn lookup_enum_anywhere(&self, name: &str, not_null: bool) -> Option<TargetType> {
        self.catalog
            .user_schemas()
            .find_map(|s| self.lookup_enum(&s.name, name, not_null))
    }

    fn has_composite(&self, schema: &str, name: &str) -> bool {
        self.catalog
            .user_schemas()
            .filter(|s| s.name == schema)
            .any(|s| s.composite_types.iter().any(|c| c.name == name))
    }
}

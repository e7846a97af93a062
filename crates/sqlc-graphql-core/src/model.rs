//! Structured output model handed to the document renderer

use crate::naming::lower_first;
use crate::request::{Column, Command, Identifier};
use crate::types::GqlType;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumConstant {
    pub name: String,
    /// Raw database value
    pub value: String,
    pub type_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Enum {
    pub name: String,
    pub comment: String,
    pub directive: Option<String>,
    pub constants: Vec<EnumConstant>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    /// PascalCase name, possibly suffixed (`Name_2`)
    pub name: String,
    /// Column name, or the snake_case model name for embeds
    pub db_name: String,
    pub gql_type: GqlType,
    pub comment: String,
    pub column: Option<Column>,
    /// Fields of the related row this field stands for
    pub embed_fields: Vec<Field>,
    pub directive: Option<String>,
}

impl Field {
    /// Synthetic field without a backing column
    pub fn synthetic(name: &str, gql_type: GqlType) -> Self {
        Self {
            name: name.to_string(),
            db_name: String::new(),
            gql_type,
            comment: String::new(),
            column: None,
            embed_fields: Vec::new(),
            directive: None,
        }
    }

    /// Name as written in GraphQL documents (`HasNext` -> `hasNext`)
    pub fn graphql_name(&self) -> String {
        lower_first(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Struct {
    /// Owning table; `None` for synthesized structs
    pub table: Option<Identifier>,
    pub name: String,
    pub fields: Vec<Field>,
    pub comment: String,
    pub directive: Option<String>,
    /// Host model the renderer binds this type to
    pub model_path: String,
}

impl Struct {
    pub fn synthetic(name: impl Into<String>, model_path: String, fields: Vec<Field>) -> Self {
        Self {
            table: None,
            name: name.into(),
            fields,
            comment: String::new(),
            directive: None,
            model_path,
        }
    }

    /// Same field names and types in the same order
    pub fn same_shape(&self, other: &Struct) -> bool {
        self.fields.len() == other.fields.len()
            && self
                .fields
                .iter()
                .zip(&other.fields)
                .all(|(a, b)| a.name == b.name && a.gql_type == b.gql_type)
    }
}

/// How a query's argument or result is bound
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Binding {
    Scalar {
        name: String,
        db_name: String,
        gql_type: GqlType,
        column: Column,
        model_path: Option<String>,
    },
    Struct {
        name: String,
        #[serde(rename = "struct")]
        structure: Struct,
        /// Emitted as its own named type; inline otherwise
        emit: bool,
        model_path: String,
    },
}

impl Binding {
    pub fn gql_type(&self) -> GqlType {
        match self {
            Self::Scalar { gql_type, .. } => gql_type.clone(),
            Self::Struct { structure, .. } => GqlType::named(structure.name.as_str()),
        }
    }

    pub fn as_struct(&self) -> Option<&Struct> {
        match self {
            Self::Struct { structure, .. } => Some(structure),
            Self::Scalar { .. } => None,
        }
    }

    pub fn as_struct_mut(&mut self) -> Option<&mut Struct> {
        match self {
            Self::Struct { structure, .. } => Some(structure),
            Self::Scalar { .. } => None,
        }
    }

    pub fn emits(&self) -> bool {
        matches!(self, Self::Struct { emit: true, .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaginationMode {
    /// `limit`/`offset` with a `<X>Page` result
    Offset,
    /// `first`/`after` with `<X>Connection` and `<X>Edge`
    Cursor,
}

impl PaginationMode {
    /// Companion struct names for a paginated `original`, result type first
    pub fn companion_names(self, original: &str) -> Vec<String> {
        match self {
            Self::Offset => vec![format!("{original}Page")],
            Self::Cursor => vec![
                format!("{original}Connection"),
                format!("{original}Edge"),
            ],
        }
    }
}

/// An annotated query with its resolved bindings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Query {
    pub cmd: Command,
    /// Documentation lines with annotation lines removed
    pub comments: Vec<String>,
    pub method_name: String,
    pub source_name: String,
    /// Operation type the resolver extends (`Query`, `Mutation`, ...)
    pub extended_type: String,
    pub resolver_name: String,
    pub directive: Option<String>,
    pub pagination: Option<PaginationMode>,
    pub arg: Option<Binding>,
    pub ret: Option<Binding>,
}

impl Query {
    /// Struct the query returns, if any
    pub fn ret_struct(&self) -> Option<&Struct> {
        self.ret.as_ref().and_then(Binding::as_struct)
    }

    /// Result type of the GraphQL field: the pagination companion for
    /// paginated struct results, a list for multi-row commands
    pub fn graphql_return_type(&self) -> Option<GqlType> {
        let ret = self.ret.as_ref()?;
        if let (Some(mode), Some(original)) = (self.pagination, ret.as_struct()) {
            let names = mode.companion_names(&original.name);
            return names.into_iter().next().map(GqlType::named);
        }

        let gql_type = ret.gql_type();
        match self.cmd {
            Command::Many | Command::BatchMany if !gql_type.list => Some(GqlType {
                list: true,
                ..gql_type
            }),
            _ => Some(gql_type),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GqlScalar;

    fn author() -> Struct {
        Struct::synthetic(
            "Author",
            "db.Author".to_string(),
            vec![
                Field::synthetic("Id", GqlType::new(GqlScalar::Uuid, true)),
                Field::synthetic("Name", GqlType::new(GqlScalar::String, false)),
            ],
        )
    }

    fn query(cmd: Command, pagination: Option<PaginationMode>) -> Query {
        Query {
            cmd,
            comments: vec![],
            method_name: "ListAuthors".to_string(),
            source_name: "query.sql".to_string(),
            extended_type: "Query".to_string(),
            resolver_name: "authors".to_string(),
            directive: None,
            pagination,
            arg: None,
            ret: Some(Binding::Struct {
                name: "item".to_string(),
                structure: author(),
                emit: false,
                model_path: "db.Author".to_string(),
            }),
        }
    }

    #[test]
    fn test_same_shape_ignores_table_and_comments() {
        let mut other = author();
        other.comment = "different".to_string();
        other.table = Some(Identifier::new("authors"));
        assert!(author().same_shape(&other));

        other.fields[1].gql_type.non_null = true;
        assert!(!author().same_shape(&other));
    }

    #[test]
    fn test_graphql_return_type() {
        assert_eq!(
            query(Command::One, None).graphql_return_type().unwrap().to_string(),
            "Author!"
        );
        assert_eq!(
            query(Command::Many, None).graphql_return_type().unwrap().to_string(),
            "[Author!]!"
        );
        assert_eq!(
            query(Command::Many, Some(PaginationMode::Offset))
                .graphql_return_type()
                .unwrap()
                .to_string(),
            "AuthorPage!"
        );
        assert_eq!(
            query(Command::Many, Some(PaginationMode::Cursor))
                .graphql_return_type()
                .unwrap()
                .to_string(),
            "AuthorConnection!"
        );
    }

    #[test]
    fn test_graphql_field_names() {
        let field = Field::synthetic("HasNext", GqlType::new(GqlScalar::Boolean, true));
        assert_eq!(field.graphql_name(), "hasNext");
    }
}

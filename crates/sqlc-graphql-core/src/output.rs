//! Document planning
//!
//! The renderer receives one [`Document`] per output file:
//! - `schema.graphql` with every enum and struct,
//! - `common.graphql` (when enabled) naming every operation type extended,
//! - one `<source>.graphql` per query source file with that file's queries.
//!
//! Excluded fields are removed from structs in every document, including
//! query Input and Row structs. Query comments are narrowed to their public
//! `gql-comment:` bands.

use crate::annotations::public_comments;
use crate::model::{Binding, Enum, Query, Struct};
use serde::Serialize;
use sqlc_graphql_config::{ExcludeRules, ResolvedOptions};
use std::collections::{BTreeMap, BTreeSet};

pub const SCHEMA_DOCUMENT: &str = "schema.graphql";
pub const COMMON_DOCUMENT: &str = "common.graphql";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Schema,
    Common,
    Queries,
}

/// One planned output document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub name: String,
    pub kind: DocumentKind,
    pub model_package: String,
    /// `None` when the version header is omitted
    pub sqlc_version: Option<String>,
    pub enums: Vec<Enum>,
    pub structs: Vec<Struct>,
    pub queries: Vec<Query>,
    /// Sorted, unique operation types extended by `queries`
    pub extended_types: Vec<String>,
}

/// `queries/authors.sql` -> `queries/authors.graphql`
pub fn document_name(source: &str) -> String {
    if source.ends_with(".graphql") {
        return source.to_string();
    }
    format!("{}.graphql", source.strip_suffix(".sql").unwrap_or(source))
}

fn exclude_fields(structure: &mut Struct, exclude: &ExcludeRules) {
    let name = structure.name.clone();
    structure
        .fields
        .retain(|f| !exclude.is_excluded(&name, &f.graphql_name()));
}

fn exclude_binding_fields(binding: &mut Option<Binding>, exclude: &ExcludeRules) {
    if let Some(structure) = binding.as_mut().and_then(Binding::as_struct_mut) {
        exclude_fields(structure, exclude);
    }
}

fn extended_types(queries: &[Query]) -> Vec<String> {
    queries
        .iter()
        .map(|q| q.extended_type.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Plan the output documents for a finished model
pub fn plan_documents(
    options: &ResolvedOptions,
    sqlc_version: &str,
    enums: &[Enum],
    structs: &[Struct],
    queries: &[Query],
) -> Vec<Document> {
    let exclude = &options.exclude;
    let sqlc_version = (!options.omit_sqlc_version).then(|| sqlc_version.to_string());
    let document = |name: String, kind| Document {
        name,
        kind,
        model_package: options.package.clone(),
        sqlc_version: sqlc_version.clone(),
        enums: Vec::new(),
        structs: Vec::new(),
        queries: Vec::new(),
        extended_types: Vec::new(),
    };

    let mut schema = document(SCHEMA_DOCUMENT.to_string(), DocumentKind::Schema);
    schema.enums = enums.to_vec();
    schema.structs = structs
        .iter()
        .cloned()
        .map(|mut s| {
            exclude_fields(&mut s, exclude);
            s
        })
        .collect();
    let mut documents = vec![schema];

    if options.gen_common_parts {
        let mut common = document(COMMON_DOCUMENT.to_string(), DocumentKind::Common);
        common.extended_types = extended_types(queries);
        documents.push(common);
    }

    let mut by_source: BTreeMap<&str, Vec<Query>> = BTreeMap::new();
    for original in queries {
        let mut query = original.clone();
        query.comments = public_comments(&original.comments);
        exclude_binding_fields(&mut query.arg, exclude);
        exclude_binding_fields(&mut query.ret, exclude);
        by_source
            .entry(original.source_name.as_str())
            .or_default()
            .push(query);
    }
    for (source, queries) in by_source {
        let mut doc = document(document_name(source), DocumentKind::Queries);
        doc.extended_types = extended_types(&queries);
        doc.queries = queries;
        documents.push(doc);
    }

    documents
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Field;
    use crate::request::Command;
    use crate::types::{GqlScalar, GqlType};
    use sqlc_graphql_config::{Options, OptionsResolver};
    use test_case::test_case;

    #[test_case("query.sql" => "query.graphql")]
    #[test_case("queries/authors.sql" => "queries/authors.graphql")]
    #[test_case("already.graphql" => "already.graphql")]
    #[test_case("noext" => "noext.graphql")]
    fn test_document_name(source: &str) -> String {
        document_name(source)
    }

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

    fn query(method: &str, source: &str, operation: &str) -> Query {
        Query {
            cmd: Command::One,
            comments: vec![
                "private".to_string(),
                "gql-comment: Public docs".to_string(),
                "gql-end".to_string(),
            ],
            method_name: method.to_string(),
            source_name: source.to_string(),
            extended_type: operation.to_string(),
            resolver_name: method.to_string(),
            directive: None,
            pagination: None,
            arg: None,
            ret: Some(Binding::Struct {
                name: "item".to_string(),
                structure: author(),
                emit: false,
                model_path: "db.Author".to_string(),
            }),
        }
    }

    fn options(configure: impl FnOnce(&mut Options)) -> ResolvedOptions {
        let mut options = Options {
            package: "db".to_string(),
            ..Default::default()
        };
        configure(&mut options);
        OptionsResolver::new(options).resolve().unwrap()
    }

    #[test]
    fn test_documents_per_source() {
        let options = options(|o| o.gen_common_parts = true);
        let queries = vec![
            query("GetAuthor", "authors.sql", "Query"),
            query("CreateAuthor", "authors.sql", "Mutation"),
            query("GetBook", "books.sql", "Query"),
            query("GetAuthorAgain", "authors.sql", "Query"),
        ];
        let docs = plan_documents(&options, "v1.25.0", &[], &[author()], &queries);

        let names: Vec<_> = docs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["schema.graphql", "common.graphql", "authors.graphql", "books.graphql"]
        );
        assert_eq!(docs[1].extended_types, vec!["Mutation", "Query"]);
        assert_eq!(docs[2].extended_types, vec!["Mutation", "Query"]);
        assert_eq!(docs[2].queries.len(), 3);
        assert_eq!(docs[3].extended_types, vec!["Query"]);
        assert_eq!(docs[2].queries[0].comments, vec!["Public docs"]);
        assert_eq!(docs[0].sqlc_version.as_deref(), Some("v1.25.0"));
    }

    #[test]
    fn test_exclusion_applies_everywhere() {
        let options = options(|o| o.exclude = vec!["Author.name".to_string()]);
        let docs = plan_documents(
            &options,
            "v1",
            &[],
            &[author()],
            &[query("GetAuthor", "authors.sql", "Query")],
        );

        let schema_fields: Vec<_> = docs[0].structs[0]
            .fields
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(schema_fields, vec!["Id"]);
        let ret = docs[1].queries[0].ret_struct().unwrap();
        assert_eq!(ret.fields.len(), 1);
    }

    #[test]
    fn test_omit_sqlc_version_and_common() {
        let options = options(|o| o.omit_sqlc_version = true);
        let docs = plan_documents(&options, "v1", &[], &[], &[]);

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].kind, DocumentKind::Schema);
        assert_eq!(docs[0].sqlc_version, None);
    }
}

//! Pagination synthesis
//!
//! Paginated queries get two synthetic, always non-null parameters appended
//! after the real ones and companion result types built around the struct
//! they return:
//! - offset: `limit: Int!`, `offset: Int!` and `<X>Page`
//! - cursor: `first: Int!`, `after: String!` and `<X>Connection` / `<X>Edge`
//!
//! `PageInfo` is an external type and never synthesized.

use crate::error::{GenerateError, GenerateResult};
use crate::model::{Field, PaginationMode, Query, Struct};
use crate::request::{Column, Identifier};
use crate::structs::FieldSource;
use crate::types::{GqlScalar, GqlType};
use sqlc_graphql_config::DirectiveRules;
use tracing::debug;

const GO_FIELD: &str = "@goField";

fn synthetic_param(id: i32, name: &str, native: &str, scalar: GqlScalar) -> FieldSource {
    FieldSource {
        id,
        column: Column {
            name: name.to_string(),
            not_null: true,
            is_named_param: true,
            type_name: Some(Identifier::new(native)),
            ..Default::default()
        },
        gql_type: GqlType::new(scalar, true),
        embed: None,
    }
}

/// Synthetic parameters numbered from `next_number`
pub fn pagination_params(mode: PaginationMode, next_number: i32) -> Vec<FieldSource> {
    match mode {
        PaginationMode::Cursor => vec![
            synthetic_param(next_number, "first", "integer", GqlScalar::Int),
            synthetic_param(next_number + 1, "after", "text", GqlScalar::String),
        ],
        PaginationMode::Offset => vec![
            synthetic_param(next_number, "limit", "integer", GqlScalar::Int),
            synthetic_param(next_number + 1, "offset", "integer", GqlScalar::Int),
        ],
    }
}

/// Expose `First` as `limit` and `After` as `cursor` unless already aliased
pub fn add_default_directives(fields: &mut [Field]) {
    for field in fields {
        let alias = match field.name.as_str() {
            "First" => "limit",
            "After" => "cursor",
            _ => continue,
        };
        if field
            .directive
            .as_deref()
            .is_some_and(|d| d.contains(GO_FIELD))
        {
            continue;
        }
        let default = format!("{GO_FIELD}(name: \"{alias}\")");
        field.directive = Some(match field.directive.take() {
            Some(existing) => format!("{existing} {default}"),
            None => default,
        });
    }
}

/// Append `candidate` unless a struct with its name exists; a same-named
/// struct must have the same shape
fn push_struct(structs: &mut Vec<Struct>, candidate: Struct) -> GenerateResult<bool> {
    match structs.iter().find(|s| s.name == candidate.name) {
        Some(existing) if existing.same_shape(&candidate) => Ok(false),
        Some(_) => Err(GenerateError::DuplicateStruct {
            name: candidate.name,
        }),
        None => {
            structs.push(candidate);
            Ok(true)
        }
    }
}

fn decorated(
    name: String,
    model_path: String,
    fields: Vec<(&str, GqlType)>,
    directives: &DirectiveRules,
) -> Struct {
    let fields = fields
        .into_iter()
        .map(|(field_name, gql_type)| Field {
            directive: directives.directives_for(&name, field_name),
            ..Field::synthetic(field_name, gql_type)
        })
        .collect();
    Struct {
        directive: directives.directives_for(&name, ""),
        ..Struct::synthetic(name, model_path, fields)
    }
}

/// Companion structs for a paginated `original`, result type first
pub fn companion_structs(
    mode: PaginationMode,
    original: &Struct,
    directives: &DirectiveRules,
) -> Vec<Struct> {
    let name = &original.name;
    match mode {
        PaginationMode::Offset => vec![decorated(
            format!("{name}Page"),
            format!("{}Page", original.model_path),
            vec![
                ("Items", GqlType::list_of(name.as_str())),
                ("Total", GqlType::new(GqlScalar::Int, true)),
                ("HasNext", GqlType::new(GqlScalar::Boolean, true)),
            ],
            directives,
        )],
        PaginationMode::Cursor => {
            let edge = format!("{name}Edge");
            vec![
                decorated(
                    format!("{name}Connection"),
                    format!("{}Connection", original.model_path),
                    vec![
                        ("Edges", GqlType::list_of(edge.as_str())),
                        ("PageInfo", GqlType::named("PageInfo")),
                    ],
                    directives,
                ),
                decorated(
                    edge,
                    format!("{}Edge", original.model_path),
                    vec![
                        ("Node", GqlType::named(name.as_str())),
                        ("Cursor", GqlType::new(GqlScalar::String, true)),
                    ],
                    directives,
                ),
            ]
        }
    }
}

/// Feed synthesized Row structs and pagination companions back into the
/// struct catalog. Appending is idempotent by name.
pub fn add_ret_values_to_structs(
    structs: &mut Vec<Struct>,
    queries: &[Query],
    directives: &DirectiveRules,
) -> GenerateResult<()> {
    for query in queries {
        let Some(ret) = query.ret.as_ref() else {
            continue;
        };
        let Some(original) = ret.as_struct() else {
            continue;
        };
        if ret.emits() {
            push_struct(structs, original.clone())?;
        }
        if let Some(mode) = query.pagination {
            for companion in companion_structs(mode, original, directives) {
                let name = companion.name.clone();
                if push_struct(structs, companion)? {
                    debug!(query = %query.method_name, companion = %name, "synthesized pagination type");
                }
            }
        }
    }
    Ok(())
}

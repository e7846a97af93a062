//! Query assembly
//!
//! Each annotated query is bound to a GraphQL field. Arguments become a
//! scalar when there is a single parameter and inlining is enabled, else an
//! `<Resolver>Input` struct. Results become a scalar for one plain column,
//! the matching model struct when one exists, else a new `<Method>Row`
//! struct (or the annotated return type name).

use crate::annotations::{parse_annotations, GqlBinding};
use crate::context::GenContext;
use crate::error::GenerateResult;
use crate::model::{Binding, PaginationMode, Query, Struct};
use crate::naming::{column_name, param_name, upper_first};
use crate::pagination::{add_default_directives, pagination_params};
use crate::request::Query as SqlQuery;
use crate::structs::{columns_to_struct, find_embed, find_matching_struct, FieldSource};
use sqlc_graphql_config::join_directives;
use tracing::debug;

const ARG_STRUCT_NAME: &str = "request";
const RET_STRUCT_NAME: &str = "item";

fn build_arg(
    ctx: &GenContext<'_>,
    query: &SqlQuery,
    binding: &GqlBinding,
    pagination: Option<PaginationMode>,
) -> GenerateResult<Option<Binding>> {
    let limit = ctx.options.query_parameter_limit;

    if pagination.is_none() {
        match query.params.as_slice() {
            [] => return Ok(None),
            [param] if limit != 0 => {
                return Ok(Some(Binding::Scalar {
                    name: param_name(param),
                    db_name: param.column.name.clone(),
                    gql_type: ctx.gql_type(&param.column),
                    column: param.column.clone(),
                    model_path: None,
                }));
            }
            _ => {}
        }
    }

    let mut sources: Vec<FieldSource> = query
        .params
        .iter()
        .map(|p| FieldSource::new(ctx, p.number, p.column.clone()))
        .collect();
    if let Some(mode) = pagination {
        let next = query.params.iter().map(|p| p.number).max().unwrap_or(0) + 1;
        sources.extend(pagination_params(mode, next));
    }
    let count = sources.len();

    let name = format!("{}Input", upper_first(&binding.resolver));
    let mut input = columns_to_struct(ctx, &name, sources)?;
    if pagination.is_some() {
        add_default_directives(&mut input.fields);
    }
    input.directive = ctx.options.directives.directives_for(&name, "");
    input.model_path = ctx.model_path(&format!("{}Params", query.name));

    Ok(Some(Binding::Struct {
        name: ARG_STRUCT_NAME.to_string(),
        model_path: input.model_path.clone(),
        structure: input,
        emit: count > limit,
    }))
}

fn build_ret(
    ctx: &GenContext<'_>,
    query: &SqlQuery,
    binding: &GqlBinding,
    structs: &[Struct],
) -> GenerateResult<Option<Binding>> {
    match query.columns.as_slice() {
        [] => Ok(None),
        [column] if column.embed_table.is_none() => {
            let name = column_name(column, 0).replace('$', "_");
            Ok(Some(Binding::Scalar {
                db_name: name.clone(),
                name,
                gql_type: ctx.gql_type(column),
                column: column.clone(),
                model_path: Some(ctx.model_path(&query.name)),
            }))
        }
        columns => {
            if let Some(model) = find_matching_struct(ctx, structs, columns) {
                debug!(query = %query.name, model = %model.name, "reusing model struct");
                // The query's copy binds to the method's own result type
                let model_path = ctx.model_path(&query.name);
                return Ok(Some(Binding::Struct {
                    name: RET_STRUCT_NAME.to_string(),
                    model_path: model_path.clone(),
                    structure: Struct {
                        model_path,
                        ..model.clone()
                    },
                    emit: false,
                }));
            }

            let name = binding
                .return_type
                .clone()
                .unwrap_or_else(|| format!("{}Row", query.name));
            let sources = columns
                .iter()
                .enumerate()
                .map(|(i, column)| FieldSource {
                    embed: column
                        .embed_table
                        .as_ref()
                        .and_then(|table| find_embed(table, structs, ctx.default_schema)),
                    ..FieldSource::new(ctx, i as i32, column.clone())
                })
                .collect();
            let mut row = columns_to_struct(ctx, &name, sources)?;
            row.directive = ctx.options.directives.directives_for(&name, "");
            row.model_path = ctx.model_path(&format!("{}Row", query.name));

            Ok(Some(Binding::Struct {
                name: RET_STRUCT_NAME.to_string(),
                model_path: row.model_path.clone(),
                structure: row,
                emit: true,
            }))
        }
    }
}

/// Bind every annotated query, sorted by method name
pub fn build_queries(ctx: &GenContext<'_>, structs: &[Struct]) -> GenerateResult<Vec<Query>> {
    let mut queries = Vec::with_capacity(ctx.request.queries.len());

    for query in &ctx.request.queries {
        let Some(cmd) = query.cmd else {
            debug!(query = %query.name, "skipping query without command");
            continue;
        };
        if query.name.is_empty() {
            continue;
        }

        let annotations = parse_annotations(&query.comments, &query.name);
        let Some(binding) = annotations.binding else {
            debug!(query = %query.name, "skipping query without gql binding");
            continue;
        };

        let arg = build_arg(ctx, query, &binding, annotations.pagination)?;
        let ret = if cmd.returns_rows() {
            build_ret(ctx, query, &binding, structs)?
        } else {
            None
        };
        let directive = join_directives(
            binding.directive.clone(),
            ctx.options
                .directives
                .directives_for(&binding.operation, &binding.resolver),
        );

        queries.push(Query {
            cmd,
            comments: annotations.comments,
            method_name: query.name.clone(),
            source_name: query.filename.clone(),
            extended_type: binding.operation,
            resolver_name: binding.resolver,
            directive,
            pagination: annotations.pagination,
            arg,
            ret,
        });
    }

    queries.sort_by(|a, b| a.method_name.cmp(&b.method_name));
    Ok(queries)
}

use crate::context::GenContext;
use crate::enums::build_enums;
use crate::error::GenerateResult;
use crate::filter::filter_unused;
use crate::model::{Enum, Query, Struct};
use crate::output::{plan_documents, Document};
use crate::pagination::add_ret_values_to_structs;
use crate::queries::build_queries;
use crate::request::GenerateRequest;
use crate::structs::build_structs;
use crate::validate::validate;
use serde::Serialize;
use sqlc_graphql_config::{OptionsResolver, ResolvedOptions};
use tracing::info;

/// Everything one generation run produces
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateOutput {
    pub enums: Vec<Enum>,
    pub structs: Vec<Struct>,
    pub queries: Vec<Query>,
    pub documents: Vec<Document>,
}

/// Resolve the request's option documents and generate
pub fn generate(request: &GenerateRequest) -> GenerateResult<GenerateOutput> {
    let options =
        OptionsResolver::from_request_bytes(&request.plugin_options, &request.global_options)?
            .resolve()?;
    generate_with_options(request, &options)
}

/// Generate with already resolved options
pub fn generate_with_options(
    request: &GenerateRequest,
    options: &ResolvedOptions,
) -> GenerateResult<GenerateOutput> {
    let ctx = GenContext::new(request, options);

    let enums = build_enums(&ctx);
    let mut structs = build_structs(&ctx);
    let queries = build_queries(&ctx, &structs)?;

    add_ret_values_to_structs(&mut structs, &queries, &options.directives)?;
    structs.sort_by(|a, b| a.name.cmp(&b.name));

    let (enums, structs) = if options.omit_unused_structs {
        filter_unused(enums, structs, &queries)
    } else {
        (enums, structs)
    };

    validate(&enums, &structs)?;

    let documents = plan_documents(options, &request.sqlc_version, &enums, &structs, &queries);

    info!(
        engine = %request.settings.engine,
        enums = enums.len(),
        structs = structs.len(),
        queries = queries.len(),
        documents = documents.len(),
        "generated GraphQL model"
    );

    Ok(GenerateOutput {
        enums,
        structs,
        queries,
        documents,
    })
}

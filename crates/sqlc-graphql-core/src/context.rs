use crate::request::{Column, GenerateRequest};
use crate::types::{GqlType, TypeMapper};
use sqlc_graphql_config::ResolvedOptions;

/// State shared by every stage of one generation run
pub struct GenContext<'a> {
    pub request: &'a GenerateRequest,
    pub options: &'a ResolvedOptions,
    /// Configured default schema, else the catalog's
    pub default_schema: &'a str,
    pub types: TypeMapper<'a>,
}

impl<'a> GenContext<'a> {
    pub fn new(request: &'a GenerateRequest, options: &'a ResolvedOptions) -> Self {
        let default_schema = options
            .default_schema
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(&request.catalog.default_schema);
        Self {
            request,
            options,
            default_schema,
            types: TypeMapper::new(
                request.settings.engine,
                &request.catalog,
                options,
                default_schema,
            ),
        }
    }

    pub fn gql_type(&self, column: &Column) -> GqlType {
        self.types.gql_type(column)
    }

    /// `<package>.<name>`
    pub fn model_path(&self, name: &str) -> String {
        format!("{}.{name}", self.options.package)
    }

    /// Name prefix for entities in `schema`, empty for the default schema
    pub fn qualify(&self, schema: &str, name: &str) -> String {
        if schema == self.default_schema {
            name.to_string()
        } else {
            format!("{schema}_{name}")
        }
    }
}

//! Struct building
//!
//! Model structs come straight from catalog tables. Query-shaped structs
//! (`<Resolver>Input`, `<Method>Row`) are built from column lists by
//! [`columns_to_struct`], which:
//! 1. names fields after their columns, or after the model struct for embeds,
//! 2. suffixes repeated names (`Name`, `Name_2`), reusing the suffix for
//!    repeated references to one parameter and never renaming named params,
//! 3. lets `Unknown` fields adopt the type of a typed sibling with the same
//!    base name,
//! 4. rejects two fields with one name and different types.

use crate::context::GenContext;
use crate::error::{GenerateError, GenerateResult};
use crate::inflection::singular;
use crate::model::{Field, Struct};
use crate::naming::{column_name, struct_name, to_snake_case};
use crate::request::{Column, Identifier};
use crate::types::{GqlScalar, GqlType};
use std::collections::HashMap;
use tracing::warn;

/// Model structs, one per table outside the system schemas
pub fn build_structs(ctx: &GenContext<'_>) -> Vec<Struct> {
    let options = ctx.options;
    let mut structs: Vec<Struct> = ctx
        .request
        .catalog
        .user_schemas()
        .flat_map(|schema| schema.tables.iter().map(move |t| (schema, t)))
        .map(|(schema, table)| {
            let mut table_name = ctx.qualify(&schema.name, &table.rel.name);
            if !options.emit_exact_table_names {
                table_name = singular(&table_name, &options.inflection_exclude_table_names);
            }
            let name = struct_name(&table_name, options);
            let fields = table
                .columns
                .iter()
                .map(|column| {
                    let field_name = struct_name(&column.name, options);
                    Field {
                        directive: options.directives.directives_for(&name, &field_name),
                        db_name: column.name.clone(),
                        gql_type: ctx.gql_type(column),
                        comment: column.comment.clone(),
                        column: Some(column.clone()),
                        embed_fields: Vec::new(),
                        name: field_name,
                    }
                })
                .collect();

            Struct {
                table: Some(Identifier::with_schema(&schema.name, &table.rel.name)),
                model_path: ctx.model_path(&name),
                directive: options.directives.directives_for(&name, ""),
                comment: table.comment.clone(),
                fields,
                name,
            }
        })
        .collect();

    structs.sort_by(|a, b| a.name.cmp(&b.name));
    structs
}

/// Model struct a whole-row column expands to
#[derive(Debug, Clone)]
pub struct EmbedRef {
    pub model_name: String,
    pub fields: Vec<Field>,
}

/// Model struct owning the embedded table
pub fn find_embed(
    embed: &Identifier,
    structs: &[Struct],
    default_schema: &str,
) -> Option<EmbedRef> {
    let found = structs
        .iter()
        .find(|s| s.table.as_ref().is_some_and(|t| embed.same_table(t, default_schema)))
        .map(|s| EmbedRef {
            model_name: s.name.clone(),
            fields: s.fields.clone(),
        });
    if found.is_none() {
        warn!(table = %embed.data_type(), "embedded table has no model struct");
    }
    found
}

/// One column feeding [`columns_to_struct`]
#[derive(Debug, Clone)]
pub struct FieldSource {
    /// Parameter number, or result position
    pub id: i32,
    pub column: Column,
    pub gql_type: GqlType,
    pub embed: Option<EmbedRef>,
}

impl FieldSource {
    pub fn new(ctx: &GenContext<'_>, id: i32, column: Column) -> Self {
        Self {
            id,
            gql_type: ctx.gql_type(&column),
            column,
            embed: None,
        }
    }
}

/// Build a query-shaped struct named `name` from ordered columns
pub fn columns_to_struct(
    ctx: &GenContext<'_>,
    name: &str,
    sources: Vec<FieldSource>,
) -> GenerateResult<Struct> {
    let options = ctx.options;
    let mut fields: Vec<Field> = Vec::with_capacity(sources.len());
    let mut base_names: Vec<String> = Vec::with_capacity(sources.len());
    let mut seen: HashMap<String, Vec<usize>> = HashMap::new();
    let mut suffixes: HashMap<i32, usize> = HashMap::new();

    for (i, source) in sources.into_iter().enumerate() {
        let FieldSource {
            id,
            column,
            gql_type,
            embed,
        } = source;

        let mut col_name = column_name(&column, i);
        let mut db_name = col_name.clone();
        if let Some(embed) = &embed {
            col_name = embed.model_name.clone();
            db_name = to_snake_case(&col_name);
        }

        let base_name = struct_name(&col_name, options);
        let suffix = match suffixes.get(&id) {
            Some(&suffix) => suffix,
            None => match seen.get(&base_name).map_or(0, Vec::len) {
                n if n > 0 && !column.is_named_param => n + 1,
                _ => 0,
            },
        };
        suffixes.insert(id, suffix);

        let field_name = if suffix > 0 {
            format!("{base_name}_{suffix}")
        } else {
            base_name.clone()
        };

        let (gql_type, embed_fields) = match embed {
            Some(embed) => (
                GqlType::new(GqlScalar::Named(embed.model_name), false),
                embed.fields,
            ),
            None => (gql_type, Vec::new()),
        };

        fields.push(Field {
            directive: options.directives.directives_for(name, &field_name),
            name: field_name,
            db_name,
            gql_type,
            comment: column.comment.clone(),
            column: Some(column),
            embed_fields,
        });
        seen.entry(base_name.clone()).or_default().push(i);
        base_names.push(base_name);
    }

    reconcile_unknown_types(&mut fields, &base_names, &seen);
    check_incompatible_types(name, &fields)?;

    Ok(Struct::synthetic(name, String::new(), fields))
}

fn reconcile_unknown_types(
    fields: &mut [Field],
    base_names: &[String],
    seen: &HashMap<String, Vec<usize>>,
) {
    for i in 0..fields.len() {
        if !fields[i].gql_type.is_unknown() {
            continue;
        }
        let adopted = seen
            .get(&base_names[i])
            .into_iter()
            .flatten()
            .filter(|&&j| j != i)
            .map(|&j| &fields[j].gql_type)
            .find(|t| !t.is_unknown())
            .cloned();
        if let Some(gql_type) = adopted {
            fields[i].gql_type = gql_type;
        }
    }
}

fn check_incompatible_types(struct_name: &str, fields: &[Field]) -> GenerateResult<()> {
    let mut types: HashMap<&str, &GqlType> = HashMap::new();
    for field in fields {
        match types.get(field.name.as_str()) {
            Some(first) if *first != &field.gql_type => {
                return Err(GenerateError::IncompatibleFieldTypes {
                    struct_name: struct_name.to_string(),
                    field: field.name.clone(),
                    first: first.to_string(),
                    second: field.gql_type.to_string(),
                });
            }
            Some(_) => {}
            None => {
                types.insert(&field.name, &field.gql_type);
            }
        }
    }
    Ok(())
}

/// Model struct whose fields positionally match `columns` on name, type and
/// owning table
pub fn find_matching_struct<'s>(
    ctx: &GenContext<'_>,
    structs: &'s [Struct],
    columns: &[Column],
) -> Option<&'s Struct> {
    structs.iter().find(|s| {
        let Some(model_table) = s.table.as_ref() else {
            return false;
        };
        s.fields.len() == columns.len()
            && s.fields.iter().zip(columns).enumerate().all(|(i, (field, column))| {
                field.name == struct_name(&column_name(column, i), ctx.options)
                    && field.gql_type == ctx.gql_type(column)
                    && column
                        .table
                        .as_ref()
                        .is_some_and(|t| t.same_table(model_table, ctx.default_schema))
            })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{Catalog, GenerateRequest, Schema, Table};
    use sqlc_graphql_config::{DirectiveRule, DirectiveRules, ResolvedOptions};

    fn column(name: &str, type_name: &str, not_null: bool) -> Column {
        Column {
            name: name.to_string(),
            not_null,
            table: Some(Identifier::new("authors")),
            type_name: Some(Identifier::new(type_name)),
            ..Default::default()
        }
    }

    fn request() -> GenerateRequest {
        GenerateRequest {
            catalog: Catalog {
                default_schema: "public".to_string(),
                schemas: vec![
                    Schema {
                        name: "public".to_string(),
                        tables: vec![Table {
                            rel: Identifier::new("authors"),
                            columns: vec![column("id", "uuid", true), column("name", "text", false)],
                            comment: "People who write".to_string(),
                        }],
                        ..Default::default()
                    },
                    Schema {
                        name: "audit".to_string(),
                        tables: vec![Table {
                            rel: Identifier::new("events"),
                            columns: vec![column("id", "int8", true)],
                            ..Default::default()
                        }],
                        ..Default::default()
                    },
                ],
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn options() -> ResolvedOptions {
        ResolvedOptions {
            package: "db".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_build_structs() {
        let request = request();
        let options = options();
        let ctx = GenContext::new(&request, &options);
        let structs = build_structs(&ctx);

        let names: Vec<_> = structs.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["AuditEvent", "Author"]);

        let author = &structs[1];
        assert_eq!(author.model_path, "db.Author");
        assert_eq!(author.table, Some(Identifier::with_schema("public", "authors")));
        assert_eq!(author.fields[0].name, "Id");
        assert_eq!(author.fields[0].gql_type.to_string(), "UUID!");
        assert_eq!(author.fields[1].gql_type.to_string(), "String");
    }

    #[test]
    fn test_exact_table_names() {
        let request = request();
        let options = ResolvedOptions {
            emit_exact_table_names: true,
            ..options()
        };
        let ctx = GenContext::new(&request, &options);
        let names: Vec<_> = build_structs(&ctx).into_iter().map(|s| s.name).collect();

        assert_eq!(names, vec!["AuditEvents", "Authors"]);
    }

    #[test]
    fn test_field_directives() {
        let request = request();
        let options = ResolvedOptions {
            directives: DirectiveRules::new(vec![DirectiveRule {
                model: "author".to_string(),
                field: "name".to_string(),
                directive: "deprecated".to_string(),
            }]),
            ..options()
        };
        let ctx = GenContext::new(&request, &options);
        let structs = build_structs(&ctx);
        let author = structs.iter().find(|s| s.name == "Author").unwrap();

        assert_eq!(author.fields[0].directive, None);
        assert_eq!(author.fields[1].directive.as_deref(), Some("@deprecated"));
    }

    #[test]
    fn test_suffixes_for_repeated_names() {
        let request = request();
        let options = options();
        let ctx = GenContext::new(&request, &options);
        let sources = vec![
            FieldSource::new(&ctx, 1, column("name", "text", true)),
            FieldSource::new(&ctx, 2, column("name", "text", true)),
            FieldSource::new(&ctx, 3, column("name", "text", true)),
            // Second reference to parameter 2
            FieldSource::new(&ctx, 2, column("name", "text", true)),
        ];
        let s = columns_to_struct(&ctx, "SearchInput", sources).unwrap();
        let names: Vec<_> = s.fields.iter().map(|f| f.name.as_str()).collect();

        assert_eq!(names, vec!["Name", "Name_2", "Name_3", "Name_2"]);
    }

    #[test]
    fn test_named_params_keep_their_name() {
        let request = request();
        let options = options();
        let ctx = GenContext::new(&request, &options);
        let named = Column {
            is_named_param: true,
            ..column("name", "text", true)
        };
        let sources = vec![
            FieldSource::new(&ctx, 1, column("name", "text", true)),
            FieldSource::new(&ctx, 2, named),
        ];
        let s = columns_to_struct(&ctx, "SearchInput", sources).unwrap();

        assert_eq!(s.fields[1].name, "Name");
    }

    #[test]
    fn test_unknown_adopts_sibling_type() {
        let request = request();
        let options = options();
        let ctx = GenContext::new(&request, &options);
        let unknown = Column {
            is_named_param: true,
            ..column("name", "tsvector", true)
        };
        let typed = Column {
            is_named_param: true,
            ..column("name", "text", true)
        };
        let sources = vec![
            FieldSource::new(&ctx, 1, unknown),
            FieldSource::new(&ctx, 2, typed),
        ];
        let s = columns_to_struct(&ctx, "SearchInput", sources).unwrap();

        assert_eq!(s.fields[0].gql_type.to_string(), "String!");
        assert_eq!(s.fields[1].gql_type.to_string(), "String!");
    }

    #[test]
    fn test_incompatible_named_params() {
        let request = request();
        let options = options();
        let ctx = GenContext::new(&request, &options);
        let text = Column {
            is_named_param: true,
            ..column("value", "text", true)
        };
        let int = Column {
            is_named_param: true,
            ..column("value", "int4", true)
        };
        let sources = vec![
            FieldSource::new(&ctx, 1, text),
            FieldSource::new(&ctx, 2, int),
        ];
        let err = columns_to_struct(&ctx, "UpdateInput", sources).unwrap_err();

        match err {
            GenerateError::IncompatibleFieldTypes {
                struct_name,
                field,
                first,
                second,
            } => {
                assert_eq!(struct_name, "UpdateInput");
                assert_eq!(field, "Value");
                assert_eq!(first, "String!");
                assert_eq!(second, "Int!");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_embed_fields_are_copied() {
        let request = request();
        let options = options();
        let ctx = GenContext::new(&request, &options);
        let structs = build_structs(&ctx);
        let embed = find_embed(&Identifier::new("authors"), &structs, "public").unwrap();

        let mut source = FieldSource::new(&ctx, 0, Column::default());
        source.embed = Some(embed);
        let s = columns_to_struct(&ctx, "GetBookRow", vec![source]).unwrap();

        assert_eq!(s.fields[0].name, "Author");
        assert_eq!(s.fields[0].db_name, "author");
        assert_eq!(s.fields[0].gql_type.to_string(), "Author");
        assert_eq!(s.fields[0].embed_fields.len(), 2);
    }

    #[test]
    fn test_find_embed_miss() {
        let request = request();
        let options = options();
        let ctx = GenContext::new(&request, &options);
        let structs = build_structs(&ctx);

        assert!(find_embed(&Identifier::new("events"), &structs, "public").is_none());
        assert!(find_embed(&Identifier::with_schema("audit", "events"), &structs, "public").is_some());
    }

    #[test]
    fn test_find_matching_struct() {
        let request = request();
        let options = options();
        let ctx = GenContext::new(&request, &options);
        let structs = build_structs(&ctx);

        let same = vec![column("id", "uuid", true), column("name", "text", false)];
        assert_eq!(
            find_matching_struct(&ctx, &structs, &same).map(|s| s.name.as_str()),
            Some("Author")
        );

        let nullability_differs = vec![column("id", "uuid", true), column("name", "text", true)];
        assert!(find_matching_struct(&ctx, &structs, &nullability_differs).is_none());

        let fewer = vec![column("id", "uuid", true)];
        assert!(find_matching_struct(&ctx, &structs, &fewer).is_none());
    }
}

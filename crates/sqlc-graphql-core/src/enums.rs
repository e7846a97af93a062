use crate::context::GenContext;
use crate::model::{Enum, EnumConstant};
use crate::naming::{enum_replace, struct_name};
use std::collections::HashSet;

/// Enum types for every catalog enum outside the system schemas
pub fn build_enums(ctx: &GenContext<'_>) -> Vec<Enum> {
    let mut enums: Vec<Enum> = ctx
        .request
        .catalog
        .user_schemas()
        .flat_map(|schema| schema.enums.iter().map(move |e| (schema, e)))
        .map(|(schema, catalog_enum)| {
            let enum_name = ctx.qualify(&schema.name, &catalog_enum.name);
            let name = struct_name(&enum_name, ctx.options);

            let mut seen = HashSet::with_capacity(catalog_enum.vals.len());
            let constants = catalog_enum
                .vals
                .iter()
                .enumerate()
                .map(|(i, raw)| {
                    let mut value = enum_replace(raw);
                    if value.is_empty() || seen.contains(&value) {
                        value = format!("value_{i}");
                    }
                    let constant = EnumConstant {
                        name: struct_name(&format!("{enum_name}_{value}"), ctx.options),
                        value: raw.clone(),
                        type_name: name.clone(),
                    };
                    seen.insert(value);
                    constant
                })
                .collect();

            Enum {
                directive: ctx.options.directives.directives_for(&name, ""),
                name,
                comment: catalog_enum.comment.clone(),
                constants,
            }
        })
        .collect();

    enums.sort_by(|a, b| a.name.cmp(&b.name));
    enums
}

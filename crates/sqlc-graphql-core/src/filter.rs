use crate::model::{Binding, Enum, Query, Struct};
use std::collections::HashSet;

fn collect_binding(binding: &Binding, keep: &mut HashSet<String>) {
    keep.insert(binding.gql_type().base_name().to_string());
    let Some(structure) = binding.as_struct() else {
        return;
    };
    for field in &structure.fields {
        keep.insert(field.gql_type.base_name().to_string());
        for embedded in &field.embed_fields {
            keep.insert(embedded.gql_type.base_name().to_string());
        }
    }
}

/// Type names reachable from the emitted queries
pub fn reachable_types(queries: &[Query]) -> HashSet<String> {
    let mut keep = HashSet::new();
    for query in queries {
        if let Some(arg) = &query.arg {
            collect_binding(arg, &mut keep);
        }
        if let Some(ret) = &query.ret {
            collect_binding(ret, &mut keep);
        }
        if let (Some(mode), Some(original)) = (query.pagination, query.ret_struct()) {
            keep.extend(mode.companion_names(&original.name));
        }
    }
    keep
}

/// Drop enums and structs no emitted query reaches
pub fn filter_unused(
    enums: Vec<Enum>,
    structs: Vec<Struct>,
    queries: &[Query],
) -> (Vec<Enum>, Vec<Struct>) {
    let keep = reachable_types(queries);
    let enums = enums
        .into_iter()
        .filter(|e| keep.contains(&e.name) || keep.contains(&format!("Null{}", e.name)))
        .collect();
    let structs = structs
        .into_iter()
        .filter(|s| keep.contains(&s.name))
        .collect();
    (enums, structs)
}

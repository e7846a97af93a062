use crate::error::{GenerateError, GenerateResult};
use crate::model::{Enum, Struct};
use std::collections::HashSet;

/// Enum and struct names must not collide, including `Null<Enum>` wrappers
pub fn validate(enums: &[Enum], structs: &[Struct]) -> GenerateResult<()> {
    let enum_names: HashSet<String> = enums
        .iter()
        .flat_map(|e| [e.name.clone(), format!("Null{}", e.name)])
        .collect();

    match structs.iter().find(|s| enum_names.contains(&s.name)) {
        Some(conflict) => Err(GenerateError::NameConflict {
            name: conflict.name.clone(),
        }),
        None => Ok(()),
    }
}

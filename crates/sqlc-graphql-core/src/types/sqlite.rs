use super::{HostType, TargetType};
use crate::request::Column;

const TEXT_PREFIXES: [&str; 6] = [
    "character",
    "varchar",
    "varyingcharacter",
    "nchar",
    "nativecharacter",
    "nvarchar",
];

/// SQLite declared type to host type, case-insensitively
pub(super) fn map(column: &Column) -> TargetType {
    let data_type = column.data_type().to_lowercase();
    let not_null = column.maps_not_null();
    let pick = |host| TargetType::pick(host, not_null);

    match data_type.as_str() {
        "int" | "integer" | "tinyint" | "smallint" | "mediumint" | "bigint" | "unsignedbigint"
        | "int2" | "int8" => pick(HostType::Int64),
        "blob" => TargetType::plain(HostType::Bytes),
        "real" | "double" | "doubleprecision" | "float" => pick(HostType::Float64),
        "boolean" | "bool" => pick(HostType::Bool),
        "date" | "datetime" | "timestamp" => pick(HostType::Time),
        "any" => TargetType::unknown(),
        "text" | "clob" => pick(HostType::Text),
        "numeric" => pick(HostType::Float64),
        dt if TEXT_PREFIXES.iter().any(|p| dt.starts_with(p)) => pick(HostType::Text),
        dt if dt.starts_with("decimal") => pick(HostType::Float64),
        _ => TargetType::unknown(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Identifier;
    use test_case::test_case;

    fn resolve(name: &str, not_null: bool) -> TargetType {
        map(&Column {
            name: "c".to_string(),
            not_null,
            type_name: Some(Identifier::new(name)),
            ..Default::default()
        })
    }

    #[test_case("INTEGER" => TargetType::pick(HostType::Int64, true))]
    #[test_case("varchar(255)" => TargetType::pick(HostType::Text, true))]
    #[test_case("NVARCHAR(10)" => TargetType::pick(HostType::Text, true))]
    #[test_case("decimal(10,2)" => TargetType::pick(HostType::Float64, true))]
    #[test_case("datetime" => TargetType::pick(HostType::Time, true))]
    #[test_case("blob" => TargetType::plain(HostType::Bytes))]
    #[test_case("any" => TargetType::unknown())]
    #[test_case("geometry" => TargetType::unknown())]
    fn test_not_null(name: &str) -> TargetType {
        resolve(name, true)
    }

    #[test]
    fn test_nullable_wrapper() {
        assert_eq!(resolve("text", false), TargetType::pick(HostType::Text, false));
        assert_eq!(resolve("real", false), TargetType::pick(HostType::Float64, false));
    }
}

use super::{HostType, TargetType, TypeMapper};
use crate::request::Column;

fn signed_or_unsigned(unsigned: bool, signed: HostType, unsigned_host: HostType) -> HostType {
    if unsigned {
        unsigned_host
    } else {
        signed
    }
}

/// MySQL native type to host type
pub(super) fn map(mapper: &TypeMapper<'_>, column: &Column) -> TargetType {
    let data_type = column.data_type().to_lowercase();
    let not_null = column.maps_not_null();
    let pick = |host| TargetType::pick(host, not_null);

    match data_type.as_str() {
        "varchar" | "text" | "char" | "tinytext" | "mediumtext" | "longtext" => {
            pick(HostType::Text)
        }
        // tinyint(1) is the conventional boolean
        "tinyint" if column.length == 1 => pick(HostType::Bool),
        "tinyint" => pick(signed_or_unsigned(
            column.unsigned,
            HostType::Int8,
            HostType::Uint8,
        )),
        "year" => pick(HostType::Int16),
        "smallint" => pick(signed_or_unsigned(
            column.unsigned,
            HostType::Int16,
            HostType::Uint16,
        )),
        "int" | "integer" | "mediumint" => pick(signed_or_unsigned(
            column.unsigned,
            HostType::Int32,
            HostType::Uint32,
        )),
        "bigint" => pick(signed_or_unsigned(
            column.unsigned,
            HostType::Int64,
            HostType::Uint64,
        )),
        "blob" | "binary" | "varbinary" | "tinyblob" | "mediumblob" | "longblob" => {
            TargetType::plain(HostType::Bytes)
        }
        "double" | "double precision" | "real" | "float" => pick(HostType::Float64),
        "decimal" | "dec" | "fixed" => pick(HostType::Text),
        // Inline enum definitions carry no catalog name
        "enum" => pick(HostType::Text),
        "date" | "timestamp" | "datetime" | "time" => pick(HostType::Time),
        "boolean" | "bool" => pick(HostType::Bool),
        "json" => TargetType::plain(HostType::Json),
        "any" => TargetType::unknown(),
        _ => column
            .type_name
            .as_ref()
            .and_then(|t| mapper.lookup_enum_anywhere(&t.name, not_null))
            .unwrap_or_else(TargetType::unknown),
    }
}

use super::{HostType, TargetType, TypeMapper};
use crate::request::Column;

/// PostgreSQL native type to host type
pub(super) fn map(mapper: &TypeMapper<'_>, column: &Column) -> TargetType {
    let data_type = column.data_type();
    let not_null = column.maps_not_null();
    let pick = |host| TargetType::pick(host, not_null);

    match data_type.as_str() {
        "serial" | "serial4" | "pg_catalog.serial4" => pick(HostType::Int32),
        "bigserial" | "serial8" | "pg_catalog.serial8" => pick(HostType::Int64),
        "smallserial" | "serial2" | "pg_catalog.serial2" => pick(HostType::Int16),
        "integer" | "int" | "int4" | "pg_catalog.int4" => pick(HostType::Int32),
        "bigint" | "int8" | "pg_catalog.int8" => pick(HostType::Int64),
        "smallint" | "int2" | "pg_catalog.int2" => pick(HostType::Int16),
        "float" | "double precision" | "float8" | "pg_catalog.float8" => pick(HostType::Float64),
        "real" | "float4" | "pg_catalog.float4" => pick(HostType::Float32),
        // Decimals travel as strings
        "numeric" | "pg_catalog.numeric" | "money" => pick(HostType::Text),
        "boolean" | "bool" | "pg_catalog.bool" => pick(HostType::Bool),
        "json" => TargetType::plain(HostType::Json),
        "jsonb" => TargetType::plain(HostType::Jsonb),
        "bytea" | "blob" | "pg_catalog.bytea" => TargetType::plain(HostType::Bytes),
        "date" | "time" | "pg_catalog.time" | "timetz" | "pg_catalog.timetz" | "timestamp"
        | "pg_catalog.timestamp" | "timestamptz" | "pg_catalog.timestamptz" => {
            pick(HostType::Time)
        }
        "text" | "pg_catalog.varchar" | "pg_catalog.bpchar" | "string" | "citext" | "name" => {
            pick(HostType::Text)
        }
        "uuid" => pick(HostType::Uuid),
        "inet" => pick(HostType::InetAddr),
        "cidr" => pick(HostType::CidrPrefix),
        "macaddr" | "macaddr8" => TargetType::plain(HostType::MacAddr),
        "ltree" | "lquery" | "ltxtquery" => pick(HostType::Text),
        "interval" | "pg_catalog.interval" => pick(HostType::Int64),
        "daterange" => TargetType::plain(HostType::DateRange),
        "datemultirange" => TargetType::plain(HostType::DateMultirange),
        "xid" => TargetType::plain(HostType::Qualified("pgtype.Uint32".to_string())),
        "tsrange" | "tsmultirange" | "tstzrange" | "tstzmultirange" | "numrange"
        | "nummultirange" | "int4range" | "int4multirange" | "int8range" | "int8multirange"
        | "hstore" | "bit" | "varbit" | "pg_catalog.bit" | "pg_catalog.varbit" | "cid" | "oid"
        | "tid" | "box" | "circle" | "line" | "lseg" | "path" | "point" | "polygon" | "vector"
        | "void" | "any" => TargetType::unknown(),
        _ => catalog_type(mapper, column, not_null),
    }
}

/// Enum or composite type declared in the catalog
fn catalog_type(mapper: &TypeMapper<'_>, column: &Column, not_null: bool) -> TargetType {
    let Some(type_name) = column.type_name.as_ref() else {
        return TargetType::unknown();
    };
    let schema = if type_name.schema.is_empty() {
        mapper.default_schema()
    } else {
        type_name.schema.as_str()
    };

    if let Some(target) = mapper.lookup_enum(schema, &type_name.name, not_null) {
        return target;
    }
    if mapper.has_composite(schema, &type_name.name) {
        return TargetType::pick(HostType::Text, not_null);
    }
    TargetType::unknown()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{Catalog, CompositeType, Engine, Enum, Identifier, Schema};
    use sqlc_graphql_config::ResolvedOptions;
    use test_case::test_case;

    fn catalog() -> Catalog {
        Catalog {
            default_schema: "public".to_string(),
            schemas: vec![
                Schema {
                    name: "public".to_string(),
                    enums: vec![Enum {
                        name: "mood".to_string(),
                        vals: vec!["happy".to_string()],
                        ..Default::default()
                    }],
                    composite_types: vec![CompositeType {
                        name: "address".to_string(),
                        ..Default::default()
                    }],
                    ..Default::default()
                },
                Schema {
                    name: "billing".to_string(),
                    enums: vec![Enum {
                        name: "state".to_string(),
                        ..Default::default()
                    }],
                    ..Default::default()
                },
                Schema {
                    name: "pg_catalog".to_string(),
                    enums: vec![Enum {
                        name: "hidden".to_string(),
                        ..Default::default()
                    }],
                    ..Default::default()
                },
            ],
            ..Default::default()
        }
    }

    fn column(type_name: Identifier, not_null: bool) -> Column {
        Column {
            name: "c".to_string(),
            not_null,
            type_name: Some(type_name),
            ..Default::default()
        }
    }

    fn resolve(type_name: Identifier, not_null: bool) -> TargetType {
        let catalog = catalog();
        let options = ResolvedOptions::default();
        let mapper = TypeMapper::new(Engine::Postgresql, &catalog, &options, "public");
        map(&mapper, &column(type_name, not_null))
    }

    #[test_case("int4", true => TargetType::pick(HostType::Int32, true))]
    #[test_case("int8", false => TargetType::pick(HostType::Int64, false))]
    #[test_case("bigserial", true => TargetType::pick(HostType::Int64, true))]
    #[test_case("numeric", true => TargetType::pick(HostType::Text, true))]
    #[test_case("float4", true => TargetType::pick(HostType::Float32, true))]
    #[test_case("uuid", false => TargetType::pick(HostType::Uuid, false))]
    #[test_case("timestamptz", true => TargetType::pick(HostType::Time, true))]
    #[test_case("jsonb", false => TargetType::plain(HostType::Jsonb))]
    #[test_case("bytea", false => TargetType::plain(HostType::Bytes))]
    #[test_case("tsrange", true => TargetType::unknown())]
    #[test_case("geometry", true => TargetType::unknown())]
    fn test_unqualified(name: &str, not_null: bool) -> TargetType {
        resolve(Identifier::new(name), not_null)
    }

    #[test_case("int4" => TargetType::pick(HostType::Int32, true))]
    #[test_case("varchar" => TargetType::pick(HostType::Text, true))]
    #[test_case("bool" => TargetType::pick(HostType::Bool, true))]
    #[test_case("timestamp" => TargetType::pick(HostType::Time, true))]
    fn test_pg_catalog(name: &str) -> TargetType {
        resolve(Identifier::with_schema("pg_catalog", name), true)
    }

    #[test]
    fn test_arrays_map_as_not_null() {
        let catalog = catalog();
        let options = ResolvedOptions::default();
        let mapper = TypeMapper::new(Engine::Postgresql, &catalog, &options, "public");
        let tags = Column {
            is_array: true,
            ..column(Identifier::new("text"), false)
        };

        assert_eq!(map(&mapper, &tags), TargetType::pick(HostType::Text, true));
    }

    #[test]
    fn test_enums_by_schema() {
        assert_eq!(
            resolve(Identifier::new("mood"), false),
            TargetType::pick(HostType::Enum("Mood".to_string()), false)
        );
        assert_eq!(
            resolve(Identifier::with_schema("billing", "state"), true),
            TargetType::pick(HostType::Enum("BillingState".to_string()), true)
        );
        // Not in the default schema
        assert_eq!(resolve(Identifier::new("state"), true), TargetType::unknown());
        // System schemas are never searched
        assert_eq!(
            resolve(Identifier::with_schema("pg_catalog", "hidden"), true),
            TargetType::unknown()
        );
    }

    #[test]
    fn test_composite_types_map_to_text() {
        assert_eq!(
            resolve(Identifier::new("address"), false),
            TargetType::pick(HostType::Text, false)
        );
    }
}

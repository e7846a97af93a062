//! Option document loading across formats
//!
//! The same options expressed as JSON, YAML and TOML must resolve to the
//! same effective configuration.

use sqlc_graphql_config::{
    from_str, load_from_path, ColumnProbe, ConfigError, ConfigFormat, Options, OptionsResolver,
    TableRef,
};
use std::io::Write;

const JSON: &str = r#"{
  "package": "storage",
  "query_parameter_limit": 2,
  "omit_unused_structs": true,
  "default_schema": "app",
  "overrides": [
    {"db_type": "text", "gql_type": "MyText"},
    {"column": "authors.bio", "gql_type": "Markdown"}
  ],
  "rename": {"author": "Writer"},
  "exclude": ["Author.name"],
  "directives": [{"type": "Query", "field": "author", "directive": "authGuard"}]
}"#;

const YAML: &str = r#"
package: storage
query_parameter_limit: 2
omit_unused_structs: true
default_schema: app
overrides:
  - db_type: text
    gql_type: MyText
  - column: authors.bio
    gql_type: Markdown
rename:
  author: Writer
exclude:
  - Author.name
directives:
  - model: Query
    field: author
    directive: authGuard
"#;

const TOML: &str = r#"
package = "storage"
query_parameter_limit = 2
omit_unused_structs = true
default_schema = "app"
exclude = ["Author.name"]

[rename]
author = "Writer"

[[overrides]]
db_type = "text"
gql_type = "MyText"

[[overrides]]
column = "authors.bio"
gql_type = "Markdown"

[[directives]]
model = "Query"
field = "author"
directive = "authGuard"
"#;

fn assert_expected(options: Options) {
    let resolved = OptionsResolver::new(options)
        .resolve()
        .expect("options should resolve");

    assert_eq!(resolved.package, "storage");
    assert_eq!(resolved.query_parameter_limit, 2);
    assert!(resolved.omit_unused_structs);
    assert_eq!(resolved.default_schema.as_deref(), Some("app"));
    assert_eq!(resolved.rename_for("author"), Some("Writer"));
    assert!(resolved.exclude.is_excluded("Author", "name"));
    assert_eq!(
        resolved.directives.directives_for("Query", "author").as_deref(),
        Some("@authGuard")
    );

    let bio = ColumnProbe {
        column_name: "bio",
        table: Some(TableRef {
            catalog: "",
            schema: "",
            name: "authors",
        }),
        type_schema: "",
        type_name: "text",
        nullable: true,
        unsigned: false,
        default_schema: "app",
    };
    assert_eq!(resolved.overrides.find(&bio).unwrap().gql_type, "Markdown");

    let name = ColumnProbe {
        column_name: "name",
        ..bio
    };
    assert_eq!(resolved.overrides.find(&name).unwrap().gql_type, "MyText");
}

#[test]
fn test_json_document() {
    assert_expected(from_str(JSON, ConfigFormat::Json).unwrap());
}

#[test]
fn test_yaml_document() {
    assert_expected(from_str(YAML, ConfigFormat::Yaml).unwrap());
}

#[test]
fn test_toml_document() {
    assert_expected(from_str(TOML, ConfigFormat::Toml).unwrap());
}

#[test]
fn test_load_from_path_by_extension() {
    let dir = tempfile::TempDir::new().expect("Failed to create temp dir");

    for (file, content) in [("opts.json", JSON), ("opts.yaml", YAML), ("opts.toml", TOML)] {
        let path = dir.path().join(file);
        let mut f = std::fs::File::create(&path).expect("Failed to create file");
        f.write_all(content.as_bytes()).expect("Failed to write file");

        let options: Options = load_from_path(&path).expect("Failed to load options");
        assert_expected(options);
    }
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let result = load_from_path::<Options>(dir.path().join("absent.toml"));

    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let result = from_str::<Options>("this is not valid toml {[}", ConfigFormat::Toml);

    assert!(matches!(result, Err(ConfigError::Parse { format: "toml", .. })));
}

use sqlc_graphql_config::ConfigError;
use thiserror::Error;

/// Terminal failures of a generation request
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("struct name conflicts with enum name: {name}")]
    NameConflict { name: String },

    #[error("field {field} of {struct_name} has incompatible types: {first}, {second}")]
    IncompatibleFieldTypes {
        struct_name: String,
        field: String,
        first: String,
        second: String,
    },

    #[error("synthesized struct {name} conflicts with an existing struct of the same name")]
    DuplicateStruct { name: String },
}

pub type GenerateResult<T> = Result<T, GenerateError>;

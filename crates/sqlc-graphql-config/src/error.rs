//! Configuration errors
//!
//! Every variant is terminal: the generator reports it before any catalog
//! work starts.

use thiserror::Error;

/// Errors raised while loading, merging or validating options
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The option document could not be deserialized
    #[error("failed to parse {format} options: {message}")]
    Parse {
        /// Document format (json, yaml, toml)
        format: &'static str,
        /// Deserializer message
        message: String,
    },

    /// Neither `package` nor `out` was provided
    #[error("invalid options: missing package name")]
    MissingPackage,

    /// `query_parameter_limit` was below zero
    #[error("invalid options: query parameter limit must not be negative (got {0})")]
    NegativeParameterLimit(i32),

    /// An `exclude` entry is not of the form `Type.field`
    #[error("invalid exclude '{0}': expected the format 'GqlTypeName.fieldName'")]
    InvalidExclude(String),

    /// An override entry cannot be compiled into a matcher
    #[error("invalid override for {target}: {reason}")]
    InvalidOverride {
        /// The `db_type` or `column` spec (or `<empty>`)
        target: String,
        /// What is wrong with it
        reason: String,
    },

    /// A column pattern is not a valid glob
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The offending pattern segment
        pattern: String,
        /// Glob compilation error
        #[source]
        source: globset::Error,
    },

    /// The options file extension does not name a supported format
    #[error("unsupported options file format: {0}")]
    UnsupportedFormat(String),

    /// Reading an options file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

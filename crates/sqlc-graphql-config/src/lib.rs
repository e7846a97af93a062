//! # sqlc GraphQL generator configuration
//!
//! Loads the option documents sqlc passes to the plugin, merges the global
//! block underneath the local one and compiles the result into
//! [`ResolvedOptions`]: override matchers, exclusion rules and directive
//! rules ready for the generator.
//!
//! ## Quick Start
//!
//! ```rust
//! use sqlc_graphql_config::{Options, OptionsResolver};
//!
//! let options = Options {
//!     package: "storage".to_string(),
//!     exclude: vec!["Author.name".to_string()],
//!     ..Default::default()
//! };
//! let resolved = OptionsResolver::new(options).resolve()?;
//! assert!(resolved.exclude.is_excluded("Author", "name"));
//! # Ok::<(), sqlc_graphql_config::ConfigError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod directives;
mod error;
mod exclude;
mod loader;
mod options;
mod overrides;
mod resolver;

pub use directives::{join_directives, DirectiveRule, DirectiveRules};
pub use error::{ConfigError, ConfigResult};
pub use exclude::ExcludeRules;
pub use loader::{from_json_bytes, from_str, load_from_path, ConfigFormat};
pub use options::{GlobalOptions, Options, DEFAULT_QUERY_PARAMETER_LIMIT};
pub use overrides::{
    ColumnPattern, ColumnProbe, CompiledOverride, Override, OverrideSet, OverrideTarget, TableRef,
};
pub use resolver::{OptionsResolver, ResolvedOptions};

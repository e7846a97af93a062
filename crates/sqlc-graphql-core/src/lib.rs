//! # sqlc GraphQL generator core
//!
//! Turns an sqlc catalog and its analyzed queries into a structured GraphQL
//! model: enums, structs and query bindings, plus a plan of the documents a
//! renderer should write.
//!
//! ## Pipeline
//!
//! 1. Options are parsed from the request and resolved
//! 2. Catalog enums and tables become [`Enum`]s and model [`Struct`]s
//! 3. Annotated queries are bound (`gql: Query.author`), reusing model
//!    structs when a result matches one column for column
//! 4. Paginated queries get `<X>Page` or `<X>Connection` / `<X>Edge`
//! 5. Unused types are optionally pruned and names are validated
//!
//! ## Quick Start
//!
//! ```rust
//! use sqlc_graphql_core::{generate, GenerateRequest};
//!
//! let request = GenerateRequest {
//!     plugin_options: br#"{"package": "db"}"#.to_vec(),
//!     ..Default::default()
//! };
//! let output = generate(&request)?;
//! assert_eq!(output.documents[0].name, "schema.graphql");
//! # Ok::<(), sqlc_graphql_core::GenerateError>(())
//! ```

#![warn(clippy::all)]

pub mod annotations;
mod context;
mod enums;
mod error;
mod filter;
mod generate;
mod inflection;
pub mod model;
pub mod naming;
mod output;
mod pagination;
mod queries;
pub mod request;
mod structs;
pub mod types;
mod validate;

pub use error::{GenerateError, GenerateResult};
pub use generate::{generate, generate_with_options, GenerateOutput};
pub use inflection::singular;
pub use model::{Binding, Enum, EnumConstant, Field, PaginationMode, Query, Struct};
pub use output::{document_name, Document, DocumentKind, COMMON_DOCUMENT, SCHEMA_DOCUMENT};
pub use request::{Catalog, Column, Command, Engine, GenerateRequest, Identifier};
pub use types::{scalar_kind, GqlScalar, GqlType, HostType, TargetType, TypeMapper};

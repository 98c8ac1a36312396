//! Derive macro for the bindcheck configuration bindability library.
//!
//! This crate provides the `#[derive(ConfigHolder)]` macro that generates
//! `ConfigHolder` trait implementations: the struct's `#[config(...)]`
//! attributes are read at compile time and turned into a
//! `SchemaDescriptor`, so the engine never introspects live types.
//!
//! # Basic Usage
//!
//! ```ignore
//! use bindcheck::ConfigHolder;
//!
//! #[derive(ConfigHolder)]
//! #[config(prefix = "app")]
//! struct AppConfig {
//!     name: String,
//!     number: i64,
//!     flag: bool,
//! }
//! ```
//!
//! # Parameterized Prefixes
//!
//! A prefix may contain one `${name}` placeholder. Every placeholder name
//! must be declared in `params(...)`; fields whose name appears there are
//! excluded from validation, since their values feed the placeholder rather
//! than bind from a path. A params entry does not have to correspond to a
//! struct field.
//!
//! ```ignore
//! #[derive(ConfigHolder)]
//! #[config(prefix = "service.${env}", params("env"))]
//! struct ServiceConfig {
//!     env: String,
//!     endpoint: String,
//! }
//! ```
//!
//! # Field Options
//!
//! - `#[config(rename = "other")]` - bind from a different path segment
//! - `#[config(skip)]` - exclude the field from the descriptor
//!
//! # Type Mapping
//!
//! | Rust type | Declared tag |
//! |-----------|--------------|
//! | `String`, `&str` | `String` |
//! | `bool` | `Boolean` |
//! | integer and float primitives | `Numeric` |
//! | `Vec<T>` | `Sequence` of the mapped `T` |
//! | anything else | `Opaque` |
//!
//! Malformed prefixes (multiple placeholders, an unterminated `${`, a bad
//! placeholder name) and placeholder/params mismatches are compile errors,
//! mirroring the checks the engine performs on hand-built descriptors.

extern crate proc_macro;

mod codegen;
mod holder;
mod parse;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derive the `ConfigHolder` trait for a struct.
///
/// This macro generates an implementation of `bindcheck::ConfigHolder`
/// whose `descriptor()` reflects the struct's `#[config(...)]` attributes
/// and field types.
///
/// # Example
///
/// ```ignore
/// use bindcheck::ConfigHolder;
///
/// #[derive(ConfigHolder)]
/// #[config(prefix = "database")]
/// struct DatabaseConfig {
///     host: String,
///     port: i64,
///     replicas: Vec<String>,
///
///     #[config(rename = "tls-enabled")]
///     tls: bool,
///
///     #[config(skip)]
///     cached_pool: Option<u32>,
/// }
/// ```
#[proc_macro_derive(ConfigHolder, attributes(config))]
pub fn derive_config_holder(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match holder::derive_config_holder(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

//! Bindcheck: finds the config fields that would not bind, before you bind.
//!
//! Bindcheck checks declared configuration schemas against a key-value
//! store and reports, field by field, whether a bind would succeed. It
//! probes every field rather than stopping at the first problem, so one
//! run tells you everything that is wrong with an environment's config.
//!
//! # Core Concepts
//!
//! - **Schemas as Data**: A [`SchemaDescriptor`] declares a prefix, typed
//!   fields, and placeholder parameters; derive it or build it by hand
//! - **Complete Reports**: Every probed field lands in the report with
//!   exactly one [`Outcome`], success or failure
//! - **Placeholder Prefixes**: `app.${env}` prefixes are satisfiable if any
//!   concrete candidate path binds
//! - **Source-Agnostic**: Probing goes through the [`ConfigSource`] trait;
//!   [`MapSource`] ships as the in-memory reference store
//! - **Error Accumulation**: The report bridges into stillwater's
//!   `Validation` for callers that compose checks
//!
//! # Quick Start
//!
//! ```ignore
//! use bindcheck::prelude::*;
//!
//! #[derive(ConfigHolder)]
//! #[config(prefix = "app")]
//! struct AppConfig {
//!     name: String,
//!     number: i64,
//!     flag: bool,
//! }
//!
//! fn main() -> Result<(), SchemaError> {
//!     let source = MapSource::new()
//!         .with_value("app.name", "str_value")
//!         .with_value("app.number", 123i64)
//!         .with_value("app.flag", true);
//!
//!     let report = validate(&[AppConfig::descriptor()], &source)?;
//!     assert!(report.is_fully_bindable());
//!     Ok(())
//! }
//! ```
//!
//! When fields do not bind, the report says which and why:
//!
//! ```text
//! bindability report: 1 of 3 fields bindable
//!   conf::AppConfig.number at 'app.number': type mismatch: expected numeric, found string
//!   conf::AppConfig.flag at 'app.flag': no value found
//! ```
//!
//! # Import Patterns
//!
//! Most users import the prelude:
//!
//! ```ignore
//! use bindcheck::prelude::*;
//! ```
//!
//! Or import selectively:
//!
//! ```ignore
//! use bindcheck::{validate, MapSource, SchemaDescriptor};
//! use bindcheck::report::ValidationReport;
//! ```
//!
//! # Module Structure
//!
//! - [`prelude`]: Convenient re-exports for common usage
//! - [`engine`]: `ValidationEngine` and the `validate` entry point
//! - [`schema`]: `SchemaDescriptor`, `FieldDescriptor`, `TypeTag`,
//!   `ConfigHolder`
//! - [`template`]: Prefix template parsing and candidate segment matching
//! - [`source`]: `ConfigSource` trait and the in-memory `MapSource`
//! - [`report`]: Field outcomes, the aggregate report, the stillwater bridge
//! - [`value`]: `Value` enum for stored configuration values
//! - [`error`]: `SchemaError` and `TemplateError` for broken declarations
//!
//! # Stillwater Integration
//!
//! Bindcheck uses these stillwater types:
//!
//! | Type | Usage |
//! |------|-------|
//! | `Validation<T, E>` | Collapsed report for accumulating callers |
//! | `NonEmptyVec<T>` | Guaranteed non-empty failure lists |
//! | `Semigroup` | Combining failures across reports |
//!
//! These are re-exported from the prelude for convenience.

pub mod engine;
pub mod error;
pub mod prelude;
pub mod report;
pub mod schema;
pub mod source;
pub mod template;
pub mod value;

// Re-exports for convenience
pub use engine::{validate, ValidationEngine};
pub use error::{SchemaError, TemplateError};
pub use report::{
    BindValidation, CandidateFailure, FieldReport, Outcome, ValidationFailures, ValidationReport,
};
pub use schema::{ConfigHolder, FieldDescriptor, SchemaDescriptor, TypeTag};
pub use source::{ConfigSource, Lookup, MapSource};
pub use template::{is_final_segment, PrefixTemplate};
pub use value::Value;

// Re-export stillwater types that are commonly used
pub use stillwater::{NonEmptyVec, Semigroup, Validation};

// Re-export the derive macro when the feature is enabled. The macro and the
// trait share a name, serde-style; they live in different namespaces.
#[cfg(feature = "derive")]
pub use bindcheck_derive::ConfigHolder;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reexports() {
        // Ensure all re-exports are accessible
        let _: BindValidation<()> = Validation::Success(());
        let _ = MapSource::new();
    }
}

//! Convenient re-exports for common bindcheck usage.
//!
//! # Quick Start
//!
//! For most users, import the prelude:
//!
//! ```ignore
//! use bindcheck::prelude::*;
//!
//! #[derive(ConfigHolder)]
//! #[config(prefix = "service.${env}", params("env"))]
//! struct ServiceConfig {
//!     env: String,
//!     endpoint: String,
//!     retries: i64,
//! }
//!
//! fn main() -> Result<(), SchemaError> {
//!     let source = MapSource::new()
//!         .with_value("service.prod.endpoint", "https://example.com")
//!         .with_value("service.prod.retries", "3");
//!
//!     let report = validate(&[ServiceConfig::descriptor()], &source)?;
//!     for failure in report.failures() {
//!         eprintln!("{}", failure);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Import Patterns
//!
//! ## Selective Imports
//!
//! Import only what you need:
//!
//! ```ignore
//! use bindcheck::{validate, MapSource};
//! use bindcheck::report::ValidationReport;
//! ```
//!
//! ## Advanced: Direct Stillwater Access
//!
//! For callers composing with other validations:
//!
//! ```ignore
//! use bindcheck::prelude::*;
//! use stillwater::Validation;
//! ```

// ============================================================================
// Stillwater re-exports (core functional programming types)
// ============================================================================

/// Result type with error accumulation. Use `Validation::all()` to combine
/// multiple validations and collect ALL errors.
pub use stillwater::Validation;

/// Trait for combining values. `ValidationFailures` implements this for
/// failure accumulation.
pub use stillwater::Semigroup;

/// Guaranteed non-empty collection. Underlying type for `ValidationFailures`.
pub use stillwater::NonEmptyVec;

// ============================================================================
// Engine
// ============================================================================

/// The bindability engine. Stateless; borrows descriptors and source per
/// call.
pub use crate::engine::ValidationEngine;

/// Convenience entry point: validate descriptors with a default engine.
pub use crate::engine::validate;

// ============================================================================
// Schema types
// ============================================================================

/// The declared shape of one configuration holder.
pub use crate::schema::SchemaDescriptor;

/// One declared field: name plus declared type.
pub use crate::schema::FieldDescriptor;

/// Declared type tags, including `Sequence` with its element tag.
pub use crate::schema::TypeTag;

/// Trait for types that carry a configuration schema.
///
/// Usually generated with `#[derive(ConfigHolder)]`.
pub use crate::schema::ConfigHolder;

// ============================================================================
// Sources
// ============================================================================

/// Trait for configuration stores. Implement for custom backends.
pub use crate::source::ConfigSource;

/// Result of a single source lookup.
pub use crate::source::Lookup;

/// In-memory source over a flat path-to-value map.
pub use crate::source::MapSource;

/// Untyped stored configuration value.
pub use crate::value::Value;

// ============================================================================
// Reports and outcomes
// ============================================================================

/// The verdict for one declared field.
pub use crate::report::Outcome;

/// One rejected candidate path from a parameterized probe.
pub use crate::report::CandidateFailure;

/// The verdict for one field of one schema.
pub use crate::report::FieldReport;

/// The complete result of a validation run.
pub use crate::report::ValidationReport;

/// Non-empty collection of failing field reports. Implements `Semigroup`.
pub use crate::report::ValidationFailures;

/// Type alias: `Validation<T, ValidationFailures>`.
pub use crate::report::BindValidation;

// ============================================================================
// Error types
// ============================================================================

/// Broken schema declarations, rejected before any field is probed.
pub use crate::error::SchemaError;

/// Malformed prefix template details.
pub use crate::error::TemplateError;

// ============================================================================
// Derive macro
// ============================================================================

/// Derive macro for `ConfigHolder` (requires `derive` feature).
#[cfg(feature = "derive")]
pub use bindcheck_derive::ConfigHolder;

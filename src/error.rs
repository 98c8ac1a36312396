//! Precondition errors for malformed schema declarations.
//!
//! These are distinct from the per-field [`Outcome`](crate::report::Outcome)
//! taxonomy: a field outcome describes the runtime configuration store, while
//! a `SchemaError` describes a broken declaration. The engine refuses to
//! produce any field outcomes for a run containing a malformed descriptor.

use thiserror::Error;

/// A structurally invalid prefix template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// More than one `${...}` segment. Templates carry at most one
    /// placeholder; a second one has no parameter to bind to.
    #[error("more than one placeholder")]
    MultiplePlaceholders,

    /// A `${` with no closing `}`.
    #[error("unterminated `${{` placeholder")]
    Unterminated,

    /// A placeholder whose name is empty or contains characters outside
    /// `[A-Za-z0-9_]`.
    #[error("invalid placeholder name `{found}` (expected [A-Za-z0-9_]+)")]
    InvalidName { found: String },
}

/// A schema declaration that violates the descriptor invariants.
///
/// Returned by [`ValidationEngine::validate`](crate::engine::ValidationEngine::validate)
/// before any field is probed. A malformed descriptor means the schema
/// itself is broken, not that the runtime configuration is missing values,
/// so it fails the whole run fast instead of becoming a field outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// The prefix template failed to parse.
    #[error("schema {schema}: prefix template `{template}`: {cause}")]
    Template {
        schema: String,
        template: String,
        #[source]
        cause: TemplateError,
    },

    /// The template contains a placeholder but the descriptor declares no
    /// parameter fields, so nothing binds the placeholder.
    #[error("schema {schema}: template `{template}` has a placeholder but no parameter fields")]
    PlaceholderWithoutParams { schema: String, template: String },

    /// Parameter fields are declared but the template has no placeholder
    /// for them to bind.
    #[error(
        "schema {schema}: parameter fields {params:?} declared but template `{template}` has no placeholder"
    )]
    ParamsWithoutPlaceholder {
        schema: String,
        template: String,
        params: Vec<String>,
    },
}

impl SchemaError {
    /// The qualified name of the offending schema.
    pub fn schema(&self) -> &str {
        match self {
            SchemaError::Template { schema, .. } => schema,
            SchemaError::PlaceholderWithoutParams { schema, .. } => schema,
            SchemaError::ParamsWithoutPlaceholder { schema, .. } => schema,
        }
    }

    /// The raw template text of the offending schema.
    pub fn template(&self) -> &str {
        match self {
            SchemaError::Template { template, .. } => template,
            SchemaError::PlaceholderWithoutParams { template, .. } => template,
            SchemaError::ParamsWithoutPlaceholder { template, .. } => template,
        }
    }
}

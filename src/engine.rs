//! The bindability engine.
//!
//! Walks every declared field of every registered schema and probes the
//! configuration source for a value that would bind. The engine is a pure
//! reader: it borrows the source for one call and turns every probe into
//! exactly one [`Outcome`] in the returned report, mutating nothing.

use tracing::{debug, trace};

use crate::error::SchemaError;
use crate::report::{CandidateFailure, FieldReport, Outcome, ValidationReport};
use crate::schema::{FieldDescriptor, SchemaDescriptor, TypeTag};
use crate::source::{ConfigSource, Lookup};
use crate::template::{is_final_segment, PrefixTemplate};
use crate::value::Value;

/// Checks declared schemas against a configuration source.
///
/// The engine holds no state of its own; descriptors and the source are
/// borrowed per call, so one engine can serve concurrent checks against
/// different stores.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationEngine;

impl ValidationEngine {
    /// Create an engine.
    pub fn new() -> Self {
        Self
    }

    /// Probe every non-parameter field of every descriptor against the
    /// source.
    ///
    /// Malformed declarations fail the whole run with `Err` before any
    /// field is probed. Field-level problems never abort: each one becomes
    /// a failing [`FieldReport`] and the walk continues.
    pub fn validate(
        &self,
        descriptors: &[SchemaDescriptor],
        source: &dyn ConfigSource,
    ) -> Result<ValidationReport, SchemaError> {
        // Parse every template up front so a malformed declaration cannot
        // leave a partial report behind.
        let mut parsed = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            parsed.push((descriptor, descriptor.template()?));
        }

        let mut reports = Vec::new();
        for (descriptor, template) in &parsed {
            debug!(
                schema = descriptor.qualified_name(),
                prefix = descriptor.prefix(),
                fields = descriptor.fields().len(),
                "checking schema bindability"
            );
            for field in descriptor.fields() {
                if descriptor.is_parameter(field.name()) {
                    continue;
                }
                let report = if template.has_placeholder() {
                    check_parameterized(descriptor, template, field, source)
                } else {
                    check_single(descriptor, template, field, source)
                };
                reports.push(report);
            }
        }

        Ok(ValidationReport::new(reports))
    }
}

/// Validate descriptors against a source with a default engine.
pub fn validate(
    descriptors: &[SchemaDescriptor],
    source: &dyn ConfigSource,
) -> Result<ValidationReport, SchemaError> {
    ValidationEngine::new().validate(descriptors, source)
}

fn check_single(
    descriptor: &SchemaDescriptor,
    template: &PrefixTemplate,
    field: &FieldDescriptor,
    source: &dyn ConfigSource,
) -> FieldReport {
    let path = template.resolved_path(field.name());
    let outcome = probe(source, field.declared(), &path);
    trace!(path = %path, outcome = %outcome, "probed path");

    FieldReport {
        schema: descriptor.qualified_name().to_string(),
        field: field.name().to_string(),
        path,
        outcome,
    }
}

fn check_parameterized(
    descriptor: &SchemaDescriptor,
    template: &PrefixTemplate,
    field: &FieldDescriptor,
    source: &dyn ConfigSource,
) -> FieldReport {
    let mut attempts = Vec::new();
    let mut verdict = None;

    // First satisfied candidate wins and discards the attempt trail.
    for candidate in candidate_paths(source, template, field.name()) {
        match probe(source, field.declared(), &candidate) {
            Outcome::Success => {
                trace!(path = %candidate, "candidate satisfies field");
                verdict = Some(Outcome::Success);
                break;
            }
            failure => {
                trace!(path = %candidate, outcome = %failure, "candidate rejected");
                attempts.push(CandidateFailure {
                    path: candidate,
                    outcome: failure,
                });
            }
        }
    }

    let outcome = match verdict {
        Some(outcome) => outcome,
        None => Outcome::Unsatisfiable { attempts },
    };

    FieldReport {
        schema: descriptor.qualified_name().to_string(),
        field: field.name().to_string(),
        path: template.resolved_path(field.name()),
        outcome,
    }
}

/// Enumerate candidate paths for a placeholder field: every source key
/// under the literal prefix whose final dotted segment equals the field
/// name. Candidates are sorted, so verdicts and attempt lists never depend
/// on the source's enumeration order.
fn candidate_paths(
    source: &dyn ConfigSource,
    template: &PrefixTemplate,
    field: &str,
) -> Vec<String> {
    let mut candidates: Vec<String> = source
        .keys_with_prefix(template.literal_prefix())
        .into_iter()
        .filter(|key| is_final_segment(key, field))
        .collect();
    candidates.sort();
    candidates.dedup();
    candidates
}

/// Probe one concrete path: typed lookup first, raw fallback on a miss,
/// then structural reconciliation of whatever was found.
fn probe(source: &dyn ConfigSource, declared: &TypeTag, path: &str) -> Outcome {
    match source.get(declared, path) {
        // The source's typed lookup is the only authority on opaque
        // assignability.
        Lookup::Found(_) if *declared == TypeTag::Opaque => Outcome::Success,
        Lookup::Found(value) => reconcile(declared, &value),
        Lookup::NotFound => match source.get_raw(path) {
            Lookup::NotFound => Outcome::NotFound,
            Lookup::Found(raw) if *declared == TypeTag::Opaque => Outcome::TypeMismatch {
                expected: TypeTag::Opaque,
                actual: raw.type_name().to_string(),
            },
            Lookup::Found(raw) => reconcile(declared, &raw),
        },
    }
}

/// Structural check of a found value against the declared tag.
fn reconcile(declared: &TypeTag, value: &Value) -> Outcome {
    match declared {
        TypeTag::Sequence(element) => check_sequence(declared, element, value),
        _ if assignable(declared, value) => Outcome::Success,
        _ => Outcome::TypeMismatch {
            expected: declared.clone(),
            actual: value.type_name().to_string(),
        },
    }
}

/// Sequence check: array shape, then the first element against the element
/// tag. Elements past the first are not inspected, and empty sequences
/// pass.
fn check_sequence(declared: &TypeTag, element: &TypeTag, value: &Value) -> Outcome {
    let items = match value.as_array() {
        Some(items) => items,
        None => {
            return Outcome::TypeMismatch {
                expected: declared.clone(),
                actual: value.type_name().to_string(),
            }
        }
    };

    match items.first() {
        Some(first) if !assignable(element, first) => Outcome::ElementTypeMismatch {
            expected: element.clone(),
            actual: first.type_name().to_string(),
        },
        _ => Outcome::Success,
    }
}

/// Shape compatibility between a declared tag and a runtime value.
///
/// `Numeric` accepts integral and decimal values alike; strings never match
/// structurally, since coercion is the typed lookup's job. `Opaque` never
/// matches structurally either.
fn assignable(expected: &TypeTag, value: &Value) -> bool {
    matches!(
        (expected, value),
        (TypeTag::String, Value::String(_))
            | (TypeTag::Boolean, Value::Bool(_))
            | (TypeTag::Numeric, Value::Integer(_) | Value::Float(_))
            | (TypeTag::Sequence(_), Value::Array(_))
    )
}

//! Per-field verdicts and the aggregate bindability report.
//!
//! Every probed field yields exactly one [`FieldReport`], success or not.
//! The engine never stops at the first problem; the report carries the
//! complete picture, and [`ValidationReport::into_validation`] adapts it to
//! stillwater's `Validation` for callers that compose with other checks.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use stillwater::{NonEmptyVec, Semigroup, Validation};

use crate::schema::TypeTag;

/// The verdict for one declared field.
///
/// `Unsatisfiable` is the candidate-fold terminal for parameterized schemas:
/// its `attempts` hold the per-candidate verdicts, which are themselves only
/// ever `NotFound` or mismatches, never `Unsatisfiable`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// A value exists and its shape matches the declared type.
    Success,
    /// No value exists at the resolved path.
    NotFound,
    /// A value exists but its runtime shape does not match the declared
    /// type. `actual` names the found value's shape.
    TypeMismatch { expected: TypeTag, actual: String },
    /// A sequence value exists but its first element does not match the
    /// declared element type.
    ElementTypeMismatch { expected: TypeTag, actual: String },
    /// No candidate path under the literal prefix satisfies the field.
    /// Empty `attempts` means no candidate paths existed at all.
    Unsatisfiable { attempts: Vec<CandidateFailure> },
}

impl Outcome {
    /// Whether this outcome is a success.
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success => write!(f, "ok"),
            Outcome::NotFound => write!(f, "no value found"),
            Outcome::TypeMismatch { expected, actual } => {
                write!(f, "type mismatch: expected {}, found {}", expected, actual)
            }
            Outcome::ElementTypeMismatch { expected, actual } => {
                write!(
                    f,
                    "element type mismatch: expected {}, found {}",
                    expected, actual
                )
            }
            Outcome::Unsatisfiable { attempts } if attempts.is_empty() => {
                write!(f, "unsatisfiable: no candidate paths")
            }
            Outcome::Unsatisfiable { attempts } => {
                write!(f, "unsatisfiable: tried ")?;
                for (i, attempt) in attempts.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "'{}' ({})", attempt.path, attempt.outcome)?;
                }
                Ok(())
            }
        }
    }
}

/// One rejected candidate path from a parameterized probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateFailure {
    /// The concrete path that was probed.
    pub path: String,
    /// Why it was rejected.
    pub outcome: Outcome,
}

impl fmt::Display for CandidateFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}': {}", self.path, self.outcome)
    }
}

/// The verdict for one field of one schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldReport {
    /// Qualified name of the owning schema.
    pub schema: String,
    /// The field's name.
    pub field: String,
    /// The path that was probed. For parameterized schemas this is the
    /// template-shaped path, since the concrete paths vary per candidate.
    pub path: String,
    /// The verdict.
    pub outcome: Outcome,
}

impl FieldReport {
    /// Whether the field binds.
    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }

    /// Whether the field does not bind.
    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }
}

impl fmt::Display for FieldReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{} at '{}': {}",
            self.schema, self.field, self.path, self.outcome
        )
    }
}

/// The complete result of validating a set of schemas against a source.
///
/// Field reports appear in probe order: schemas in registration order,
/// fields in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    reports: Vec<FieldReport>,
}

impl ValidationReport {
    /// Wrap a list of field reports.
    pub fn new(reports: Vec<FieldReport>) -> Self {
        Self { reports }
    }

    /// All field reports, in probe order.
    pub fn reports(&self) -> &[FieldReport] {
        &self.reports
    }

    /// Total number of probed fields.
    pub fn len(&self) -> usize {
        self.reports.len()
    }

    /// Whether no fields were probed.
    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// Number of fields that bind.
    pub fn bindable_count(&self) -> usize {
        self.reports.iter().filter(|r| r.is_success()).count()
    }

    /// Whether every probed field binds.
    pub fn is_fully_bindable(&self) -> bool {
        self.reports.iter().all(|r| r.is_success())
    }

    /// Iterate over the failing reports.
    pub fn failures(&self) -> impl Iterator<Item = &FieldReport> {
        self.reports.iter().filter(|r| r.is_failure())
    }

    /// Group reports by schema for organized rendering.
    pub fn by_schema(&self) -> BTreeMap<String, Vec<&FieldReport>> {
        let mut groups: BTreeMap<String, Vec<&FieldReport>> = BTreeMap::new();
        for report in &self.reports {
            groups.entry(report.schema.clone()).or_default().push(report);
        }
        groups
    }

    /// Collapse into a `Validation`: `Success(())` when every field binds,
    /// otherwise `Failure` carrying the failing reports.
    pub fn into_validation(self) -> BindValidation<()> {
        let failures: Vec<FieldReport> = self
            .reports
            .into_iter()
            .filter(|r| r.is_failure())
            .collect();

        match ValidationFailures::from_vec(failures) {
            Some(failures) => Validation::Failure(failures),
            None => Validation::Success(()),
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "bindability report: {} of {} fields bindable",
            self.bindable_count(),
            self.len()
        )?;
        for report in self.failures() {
            writeln!(f, "  {}", report)?;
        }
        Ok(())
    }
}

/// A non-empty collection of failing field reports.
///
/// Uses `NonEmptyVec` from stillwater so a `Failure` verdict always has at
/// least one failing field behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationFailures(pub NonEmptyVec<FieldReport>);

impl ValidationFailures {
    /// Create from a single failing report.
    pub fn single(report: FieldReport) -> Self {
        Self(NonEmptyVec::singleton(report))
    }

    /// Create from a non-empty vec.
    pub fn from_nonempty(reports: NonEmptyVec<FieldReport>) -> Self {
        Self(reports)
    }

    /// Try to create from a vec, returning None if empty.
    pub fn from_vec(reports: Vec<FieldReport>) -> Option<Self> {
        NonEmptyVec::from_vec(reports).map(Self)
    }

    /// Get the first failure (always exists).
    pub fn first(&self) -> &FieldReport {
        self.0.head()
    }

    /// Number of failures.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if empty (always false, but required for API consistency).
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterate over failures.
    pub fn iter(&self) -> impl Iterator<Item = &FieldReport> {
        self.0.iter()
    }
}

impl Semigroup for ValidationFailures {
    fn combine(self, other: Self) -> Self {
        Self(self.0.combine(other.0))
    }
}

impl From<FieldReport> for ValidationFailures {
    fn from(report: FieldReport) -> Self {
        Self::single(report)
    }
}

impl IntoIterator for ValidationFailures {
    type Item = FieldReport;
    type IntoIter = std::vec::IntoIter<FieldReport>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

impl fmt::Display for ValidationFailures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Unbindable fields ({}):", self.len())?;
        for report in self.iter() {
            writeln!(f, "  {}", report)?;
        }
        Ok(())
    }
}

/// The standard validation result type for bindability checks.
pub type BindValidation<T> = Validation<T, ValidationFailures>;

//! Schema descriptors: the declared shape of a configuration holder.
//!
//! A descriptor is plain data describing one annotated type: its prefix
//! template and its typed fields, with any placeholder parameters called
//! out by name. Descriptors are supplied from outside the engine: generated by
//! `#[derive(ConfigHolder)]`, registered by hand with the builder methods
//! here, or deserialized from a data file. The engine never introspects
//! live types.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;
use crate::template::PrefixTemplate;

/// The declared type of a schema field.
///
/// The element type of a sequence lives inside the `Sequence` variant, so
/// "element type present iff the field is a sequence" holds by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    /// Any string-like value.
    String,
    /// A boolean value.
    Boolean,
    /// An integral or decimal value.
    Numeric,
    /// A sequence with the given element type.
    Sequence(Box<TypeTag>),
    /// An opaque type the engine cannot check structurally; assignability
    /// is deferred to the source's typed lookup.
    Opaque,
}

impl TypeTag {
    /// Shorthand for a sequence tag.
    pub fn sequence(element: TypeTag) -> Self {
        TypeTag::Sequence(Box::new(element))
    }

    /// The element tag, if this is a sequence.
    pub fn element(&self) -> Option<&TypeTag> {
        match self {
            TypeTag::Sequence(elem) => Some(elem),
            _ => None,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::String => write!(f, "string"),
            TypeTag::Boolean => write!(f, "boolean"),
            TypeTag::Numeric => write!(f, "numeric"),
            TypeTag::Sequence(elem) => write!(f, "sequence<{}>", elem),
            TypeTag::Opaque => write!(f, "opaque"),
        }
    }
}

/// One declared field of a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    name: String,
    declared: TypeTag,
}

impl FieldDescriptor {
    /// Create a field descriptor with an explicit tag.
    pub fn new(name: impl Into<String>, declared: TypeTag) -> Self {
        Self {
            name: name.into(),
            declared,
        }
    }

    /// A string-typed field.
    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, TypeTag::String)
    }

    /// A boolean-typed field.
    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, TypeTag::Boolean)
    }

    /// A numeric-typed field.
    pub fn numeric(name: impl Into<String>) -> Self {
        Self::new(name, TypeTag::Numeric)
    }

    /// A sequence-typed field with the given element tag.
    pub fn sequence(name: impl Into<String>, element: TypeTag) -> Self {
        Self::new(name, TypeTag::sequence(element))
    }

    /// An opaque-typed field.
    pub fn opaque(name: impl Into<String>) -> Self {
        Self::new(name, TypeTag::Opaque)
    }

    /// The field's name (the final path segment it binds from).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The field's declared type.
    pub fn declared(&self) -> &TypeTag {
        &self.declared
    }

    /// The declared element type, if this field is a sequence.
    pub fn element(&self) -> Option<&TypeTag> {
        self.declared.element()
    }
}

/// The declared shape of one configuration holder.
///
/// # Example
///
/// ```ignore
/// use bindcheck::{FieldDescriptor, SchemaDescriptor, TypeTag};
///
/// let descriptor = SchemaDescriptor::new("conf::AppConfig", "app.${env}")
///     .with_parameter("env")
///     .with_field(FieldDescriptor::string("name"))
///     .with_field(FieldDescriptor::numeric("number"))
///     .with_field(FieldDescriptor::boolean("flag"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDescriptor {
    qualified_name: String,
    prefix: String,
    parameter_fields: BTreeSet<String>,
    fields: Vec<FieldDescriptor>,
}

impl SchemaDescriptor {
    /// Create a descriptor with the given qualified type name and raw
    /// prefix template. The template is parsed (and its invariants checked)
    /// when the engine runs, so construction never fails.
    pub fn new(qualified_name: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            prefix: prefix.into(),
            parameter_fields: BTreeSet::new(),
            fields: Vec::new(),
        }
    }

    /// Append a field. Field order is preserved in the report.
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Declare a field name as placeholder-bound. Parameter fields are
    /// skipped by validation entirely.
    pub fn with_parameter(mut self, name: impl Into<String>) -> Self {
        self.parameter_fields.insert(name.into());
        self
    }

    /// The qualified name of the owning type, for diagnostics.
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    /// The raw prefix template text.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The declared fields, in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// The placeholder-bound field names.
    pub fn parameter_fields(&self) -> &BTreeSet<String> {
        &self.parameter_fields
    }

    /// Whether a field name is placeholder-bound.
    pub fn is_parameter(&self, name: &str) -> bool {
        self.parameter_fields.contains(name)
    }

    /// Parse the prefix template and check the descriptor invariants:
    /// at most one well-formed placeholder, and parameter fields declared
    /// iff the template has a placeholder.
    pub fn template(&self) -> Result<PrefixTemplate, SchemaError> {
        let template =
            PrefixTemplate::parse(&self.prefix).map_err(|cause| SchemaError::Template {
                schema: self.qualified_name.clone(),
                template: self.prefix.clone(),
                cause,
            })?;

        if template.has_placeholder() && self.parameter_fields.is_empty() {
            return Err(SchemaError::PlaceholderWithoutParams {
                schema: self.qualified_name.clone(),
                template: self.prefix.clone(),
            });
        }
        if !template.has_placeholder() && !self.parameter_fields.is_empty() {
            return Err(SchemaError::ParamsWithoutPlaceholder {
                schema: self.qualified_name.clone(),
                template: self.prefix.clone(),
                params: self.parameter_fields.iter().cloned().collect(),
            });
        }

        Ok(template)
    }
}

/// Trait for types that carry a configuration schema.
///
/// Implemented by hand or generated with `#[derive(ConfigHolder)]`, which
/// reads `#[config(...)]` attributes and builds the descriptor at compile
/// time.
pub trait ConfigHolder {
    /// The descriptor for this type's configuration schema.
    fn descriptor() -> SchemaDescriptor;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TemplateError;

    #[test]
    fn test_type_tag_display() {
        assert_eq!(TypeTag::String.to_string(), "string");
        assert_eq!(TypeTag::Boolean.to_string(), "boolean");
        assert_eq!(TypeTag::Numeric.to_string(), "numeric");
        assert_eq!(
            TypeTag::sequence(TypeTag::Numeric).to_string(),
            "sequence<numeric>"
        );
        assert_eq!(TypeTag::Opaque.to_string(), "opaque");
    }

    #[test]
    fn test_type_tag_element() {
        assert_eq!(
            TypeTag::sequence(TypeTag::String).element(),
            Some(&TypeTag::String)
        );
        assert_eq!(TypeTag::String.element(), None);
    }

    #[test]
    fn test_field_descriptor_constructors() {
        let f = FieldDescriptor::sequence("hosts", TypeTag::String);
        assert_eq!(f.name(), "hosts");
        assert_eq!(f.declared(), &TypeTag::sequence(TypeTag::String));
        assert_eq!(f.element(), Some(&TypeTag::String));

        let f = FieldDescriptor::numeric("number");
        assert_eq!(f.element(), None);
    }

    #[test]
    fn test_descriptor_builder() {
        let d = SchemaDescriptor::new("conf::AppConfig", "app")
            .with_field(FieldDescriptor::string("name"))
            .with_field(FieldDescriptor::boolean("flag"));

        assert_eq!(d.qualified_name(), "conf::AppConfig");
        assert_eq!(d.prefix(), "app");
        assert_eq!(d.fields().len(), 2);
        assert_eq!(d.fields()[0].name(), "name");
        assert!(!d.is_parameter("name"));
    }

    #[test]
    fn test_descriptor_template_plain() {
        let d = SchemaDescriptor::new("conf::AppConfig", "app");
        let t = d.template().unwrap();
        assert!(!t.has_placeholder());
    }

    #[test]
    fn test_descriptor_template_parameterized() {
        let d = SchemaDescriptor::new("conf::AppConfig", "app.${env}").with_parameter("env");
        let t = d.template().unwrap();
        assert_eq!(t.placeholder_name(), Some("env"));
        assert!(d.is_parameter("env"));
    }

    #[test]
    fn test_descriptor_placeholder_without_params() {
        let d = SchemaDescriptor::new("conf::AppConfig", "app.${env}");
        assert_eq!(
            d.template(),
            Err(SchemaError::PlaceholderWithoutParams {
                schema: "conf::AppConfig".to_string(),
                template: "app.${env}".to_string(),
            })
        );
    }

    #[test]
    fn test_descriptor_params_without_placeholder() {
        let d = SchemaDescriptor::new("conf::AppConfig", "app").with_parameter("env");
        assert_eq!(
            d.template(),
            Err(SchemaError::ParamsWithoutPlaceholder {
                schema: "conf::AppConfig".to_string(),
                template: "app".to_string(),
                params: vec!["env".to_string()],
            })
        );
    }

    #[test]
    fn test_descriptor_malformed_template() {
        let d = SchemaDescriptor::new("conf::AppConfig", "app.${env");
        assert_eq!(
            d.template(),
            Err(SchemaError::Template {
                schema: "conf::AppConfig".to_string(),
                template: "app.${env".to_string(),
                cause: TemplateError::Unterminated,
            })
        );
    }

    #[test]
    fn test_descriptor_serde_round_trip() {
        let d = SchemaDescriptor::new("conf::ServiceConfig", "service.${env}")
            .with_parameter("env")
            .with_field(FieldDescriptor::string("endpoint"))
            .with_field(FieldDescriptor::sequence("ports", TypeTag::Numeric));

        let json = serde_json::to_string(&d).unwrap();
        let back: SchemaDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d);
    }
}

//! Prefix templates: dotted path prefixes with an optional placeholder.
//!
//! A schema's prefix template is either a plain dotted prefix (`"app"`) or a
//! prefix containing exactly one unresolved segment (`"app.${env}"`). The
//! placeholder is never evaluated; candidate paths are discovered by scanning
//! the keys that exist under the literal prefix instead.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::TemplateError;

fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$\{([^}]*)\}").expect("placeholder pattern is valid"))
}

/// A parsed prefix template.
///
/// Parsing enforces the template invariants: at most one placeholder, no
/// unterminated `${`, and placeholder names restricted to `[A-Za-z0-9_]+`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixTemplate {
    raw: String,
    placeholder: Option<Placeholder>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Placeholder {
    name: String,
    /// Byte offset of the `${` in the raw text.
    start: usize,
}

impl PrefixTemplate {
    /// Parse a raw template string.
    pub fn parse(raw: &str) -> Result<Self, TemplateError> {
        let opens = raw.matches("${").count();
        let captures: Vec<_> = placeholder_re().captures_iter(raw).collect();

        if captures.len() < opens {
            return Err(TemplateError::Unterminated);
        }
        if captures.len() > 1 {
            return Err(TemplateError::MultiplePlaceholders);
        }

        let placeholder = match captures.first() {
            None => None,
            Some(cap) => {
                let name = &cap[1];
                let well_formed = !name.is_empty()
                    && name
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '_');
                if !well_formed {
                    return Err(TemplateError::InvalidName {
                        found: name.to_string(),
                    });
                }
                let whole = cap.get(0).expect("capture 0 always present");
                Some(Placeholder {
                    name: name.to_string(),
                    start: whole.start(),
                })
            }
        };

        Ok(Self {
            raw: raw.to_string(),
            placeholder,
        })
    }

    /// The raw template text.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Whether this template contains a placeholder.
    pub fn has_placeholder(&self) -> bool {
        self.placeholder.is_some()
    }

    /// The placeholder's name, if the template has one.
    pub fn placeholder_name(&self) -> Option<&str> {
        self.placeholder.as_ref().map(|p| p.name.as_str())
    }

    /// The literal text before the placeholder, trailing dot included
    /// (`"app.${env}"` → `"app."`). For a template without a placeholder
    /// this is the whole raw text.
    pub fn literal_prefix(&self) -> &str {
        match &self.placeholder {
            Some(p) => &self.raw[..p.start],
            None => &self.raw,
        }
    }

    /// Append a field name to the template's raw text.
    ///
    /// For a plain template this is the field's resolved configuration path
    /// (`"app"` + `name` → `"app.name"`); for a parameterized template it is
    /// the diagnostic display path with the placeholder intact
    /// (`"app.${env}"` + `name` → `"app.${env}.name"`). An empty template
    /// resolves to the bare field name rather than `".name"`.
    pub fn resolved_path(&self, field: &str) -> String {
        if self.raw.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", self.raw, field)
        }
    }
}

/// Whether `field` is the final dotted segment of `key`.
///
/// This is the candidate-path test: a key qualifies for a field when it ends
/// with `"." + field`, or equals the field outright (keys at the root). A
/// bare suffix match is not enough: `app.prod.username` must not qualify
/// for field `name`.
pub fn is_final_segment(key: &str, field: &str) -> bool {
    if key == field {
        return true;
    }
    key.len() > field.len()
        && key.ends_with(field)
        && key.as_bytes()[key.len() - field.len() - 1] == b'.'
}

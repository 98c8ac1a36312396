//! ConfigHolder derive implementation.
//!
//! This module contains the main derive macro implementation: it checks the
//! declaration invariants at compile time and hands the collected shape to
//! codegen.

use proc_macro2::TokenStream;
use syn::{Data, DeriveInput, Error, Fields, Result};

use crate::codegen::generate_holder_impl;
use crate::parse::{is_config_attr, parse_field_config, parse_struct_config, FieldConfig};

/// One field that will appear in the generated descriptor.
pub struct HolderField {
    /// Path segment name, after any rename.
    pub name: String,
    pub ty: syn::Type,
}

/// Derive the `ConfigHolder` trait for a struct.
pub fn derive_config_holder(input: DeriveInput) -> Result<TokenStream> {
    // Only support structs
    let data = match &input.data {
        Data::Struct(data) => data,
        Data::Enum(_) => {
            return Err(Error::new_spanned(
                &input,
                "ConfigHolder can only be derived for structs, not enums",
            ));
        }
        Data::Union(_) => {
            return Err(Error::new_spanned(
                &input,
                "ConfigHolder can only be derived for structs, not unions",
            ));
        }
    };

    let struct_config = parse_struct_config(&input.attrs)?;
    let prefix = struct_config
        .prefix
        .as_ref()
        .map(|lit| lit.value())
        .unwrap_or_default();
    let params: Vec<String> = struct_config.params.iter().map(|lit| lit.value()).collect();

    check_declaration(&input, &struct_config, &prefix, &params)?;

    let fields = match &data.fields {
        Fields::Named(named) => collect_fields(named)?,
        Fields::Unnamed(_) => {
            return Err(Error::new_spanned(
                &input,
                "ConfigHolder does not support tuple structs; use named fields",
            ));
        }
        Fields::Unit => Vec::new(),
    };

    Ok(generate_holder_impl(&input.ident, &prefix, &params, &fields))
}

/// Compile-time mirror of the engine's declaration checks: template shape
/// plus the placeholder-iff-params rule.
fn check_declaration(
    input: &DeriveInput,
    struct_config: &crate::parse::StructConfig,
    prefix: &str,
    params: &[String],
) -> Result<()> {
    let prefix_span = struct_config
        .prefix
        .as_ref()
        .map(|lit| lit.span())
        .unwrap_or_else(|| input.ident.span());

    let has_placeholder = match template_shape(prefix) {
        Ok(has) => has,
        Err(message) => {
            return Err(Error::new(
                prefix_span,
                format!("invalid config prefix '{}': {}", prefix, message),
            ));
        }
    };

    if has_placeholder && params.is_empty() {
        return Err(Error::new(
            prefix_span,
            format!(
                "prefix '{}' has a placeholder but no params(...) declaration",
                prefix
            ),
        ));
    }
    if !has_placeholder && !params.is_empty() {
        let span = struct_config
            .params
            .first()
            .map(|lit| lit.span())
            .unwrap_or(prefix_span);
        return Err(Error::new(
            span,
            format!("params(...) declared but prefix '{}' has no placeholder", prefix),
        ));
    }

    Ok(())
}

/// Check a prefix template's shape. Returns whether it has a placeholder.
///
/// Same rules as the runtime parser: at most one placeholder, no
/// unterminated `${`, names restricted to `[A-Za-z0-9_]+`.
fn template_shape(template: &str) -> std::result::Result<bool, String> {
    let opens = template.matches("${").count();

    let mut complete = 0usize;
    let mut first_name: Option<&str> = None;
    let mut rest = template;
    while let Some(start) = rest.find("${") {
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                complete += 1;
                if first_name.is_none() {
                    first_name = Some(&after[..end]);
                }
                rest = &after[end + 1..];
            }
            None => break,
        }
    }

    if complete < opens {
        return Err("unterminated ${ placeholder".to_string());
    }
    if complete > 1 {
        return Err("at most one ${...} placeholder is allowed".to_string());
    }

    match first_name {
        None => Ok(false),
        Some(name) => {
            let well_formed = !name.is_empty()
                && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
            if well_formed {
                Ok(true)
            } else {
                Err(format!("invalid placeholder name '{}'", name))
            }
        }
    }
}

/// Collect named struct fields, applying `rename` and `skip`.
fn collect_fields(fields: &syn::FieldsNamed) -> Result<Vec<HolderField>> {
    let mut result = Vec::new();

    for field in &fields.named {
        let ident = field
            .ident
            .clone()
            .ok_or_else(|| Error::new_spanned(field, "field must have a name"))?;

        let mut config = FieldConfig::default();
        for attr in field.attrs.iter().filter(|a| is_config_attr(a)) {
            let parsed = parse_field_config(attr)?;
            if let Some(rename) = parsed.rename {
                if config.rename.is_some() {
                    return Err(Error::new(rename.span(), "duplicate rename declaration"));
                }
                config.rename = Some(rename);
            }
            config.skip |= parsed.skip;
        }

        if config.skip {
            continue;
        }

        let name = config
            .rename
            .map(|lit| lit.value())
            .unwrap_or_else(|| ident.to_string());

        result.push(HolderField {
            name,
            ty: field.ty.clone(),
        });
    }

    Ok(result)
}

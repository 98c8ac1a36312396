//! Attribute parsing for the ConfigHolder derive macro.
//!
//! This module handles parsing of `#[config(...)]` attributes on structs
//! (`prefix`, `params`) and on fields (`rename`, `skip`).

use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    Attribute, Error, Ident, LitStr, Result, Token,
};

/// Struct-level configuration gathered from `#[config(...)]`.
///
/// Literal tokens are kept so later checks can point their errors at the
/// attribute text instead of the whole item.
#[derive(Debug, Clone, Default)]
pub struct StructConfig {
    pub prefix: Option<LitStr>,
    pub params: Vec<LitStr>,
}

/// Field-level configuration gathered from `#[config(...)]`.
#[derive(Debug, Clone, Default)]
pub struct FieldConfig {
    pub rename: Option<LitStr>,
    pub skip: bool,
}

/// Whether an attribute is `#[config(...)]`.
pub fn is_config_attr(attr: &Attribute) -> bool {
    attr.path().is_ident("config")
}

/// Parse the struct-level `#[config(...)]` attributes.
pub fn parse_struct_config(attrs: &[Attribute]) -> Result<StructConfig> {
    let mut config = StructConfig::default();

    for attr in attrs.iter().filter(|a| is_config_attr(a)) {
        let items = attr.parse_args_with(Punctuated::<ConfigItem, Token![,]>::parse_terminated)?;
        for item in items {
            match item {
                ConfigItem::Prefix(lit) => {
                    if config.prefix.is_some() {
                        return Err(Error::new(lit.span(), "duplicate prefix declaration"));
                    }
                    config.prefix = Some(lit);
                }
                ConfigItem::Params(lits) => {
                    config.params.extend(lits);
                }
                ConfigItem::Rename(lit) => {
                    return Err(Error::new(
                        lit.span(),
                        "rename is a field option, not a struct option",
                    ));
                }
                ConfigItem::Skip(ident) => {
                    return Err(Error::new(
                        ident.span(),
                        "skip is a field option, not a struct option",
                    ));
                }
            }
        }
    }

    Ok(config)
}

/// Parse one field-level `#[config(...)]` attribute.
pub fn parse_field_config(attr: &Attribute) -> Result<FieldConfig> {
    let mut config = FieldConfig::default();

    let items = attr.parse_args_with(Punctuated::<ConfigItem, Token![,]>::parse_terminated)?;
    for item in items {
        match item {
            ConfigItem::Rename(lit) => {
                if config.rename.is_some() {
                    return Err(Error::new(lit.span(), "duplicate rename declaration"));
                }
                config.rename = Some(lit);
            }
            ConfigItem::Skip(_) => {
                config.skip = true;
            }
            ConfigItem::Prefix(lit) => {
                return Err(Error::new(
                    lit.span(),
                    "prefix is a struct option, not a field option",
                ));
            }
            ConfigItem::Params(lits) => {
                let span = lits
                    .first()
                    .map(|lit| lit.span())
                    .unwrap_or_else(proc_macro2::Span::call_site);
                return Err(Error::new(
                    span,
                    "params is a struct option, not a field option",
                ));
            }
        }
    }

    Ok(config)
}

/// A single item within `#[config(...)]`.
enum ConfigItem {
    Prefix(LitStr),
    Params(Vec<LitStr>),
    Rename(LitStr),
    Skip(Ident),
}

impl Parse for ConfigItem {
    fn parse(input: ParseStream) -> Result<Self> {
        let name: Ident = input.parse()?;

        // `name = "value"` syntax (prefix, rename)
        if input.peek(Token![=]) {
            input.parse::<Token![=]>()?;
            let lit: LitStr = input.parse()?;

            return match name.to_string().as_str() {
                "prefix" => Ok(ConfigItem::Prefix(lit)),
                "rename" => Ok(ConfigItem::Rename(lit)),
                _ => Err(Error::new(
                    name.span(),
                    format!("unexpected = syntax for '{}'", name),
                )),
            };
        }

        // `name("a", "b")` syntax (params)
        if input.peek(syn::token::Paren) {
            let content;
            syn::parenthesized!(content in input);
            let lits = Punctuated::<LitStr, Token![,]>::parse_terminated(&content)?;

            return match name.to_string().as_str() {
                "params" => Ok(ConfigItem::Params(lits.into_iter().collect())),
                _ => Err(Error::new(
                    name.span(),
                    format!("'{}' does not take parenthesized arguments", name),
                )),
            };
        }

        // Bare options
        match name.to_string().as_str() {
            "skip" => Ok(ConfigItem::Skip(name)),
            "prefix" | "rename" => Err(Error::new(
                name.span(),
                format!("'{}' requires = \"...\" syntax", name),
            )),
            "params" => Err(Error::new(
                name.span(),
                "params requires a parenthesized list like params(\"env\")",
            )),

            // Suggestions for common typos
            "param" | "parameters" => Err(Error::new(
                name.span(),
                format!("unknown config option '{}'; did you mean 'params'?", name),
            )),
            "renamed" => Err(Error::new(
                name.span(),
                "unknown config option 'renamed'; did you mean 'rename'?",
            )),
            "ignore" | "exclude" => Err(Error::new(
                name.span(),
                format!("unknown config option '{}'; did you mean 'skip'?", name),
            )),

            _ => Err(Error::new(
                name.span(),
                format!("unknown config option '{}'", name),
            )),
        }
    }
}

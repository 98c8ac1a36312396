//! Code generation for the ConfigHolder derive macro.
//!
//! This module generates the `ConfigHolder` trait implementation: a
//! `descriptor()` built with the runtime builder methods, with field types
//! mapped onto declared type tags.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{GenericArgument, Ident, PathArguments, Type};

use crate::holder::HolderField;

/// Generate the complete `ConfigHolder` impl for a struct.
pub fn generate_holder_impl(
    struct_name: &Ident,
    prefix: &str,
    params: &[String],
    fields: &[HolderField],
) -> TokenStream {
    let param_calls = params.iter().map(|param| {
        quote! { .with_parameter(#param) }
    });
    let field_calls = fields.iter().map(|field| {
        let name = &field.name;
        let tag = type_tag_tokens(&field.ty);
        quote! { .with_field(::bindcheck::FieldDescriptor::new(#name, #tag)) }
    });

    quote! {
        impl ::bindcheck::ConfigHolder for #struct_name {
            fn descriptor() -> ::bindcheck::SchemaDescriptor {
                ::bindcheck::SchemaDescriptor::new(
                    ::std::concat!(::std::module_path!(), "::", ::std::stringify!(#struct_name)),
                    #prefix,
                )
                #(#param_calls)*
                #(#field_calls)*
            }
        }
    }
}

/// Map a field's Rust type onto a declared tag expression.
///
/// References classify by their target, so `&str` maps like `str`. Types
/// the mapping does not recognize become `Opaque`.
fn type_tag_tokens(ty: &Type) -> TokenStream {
    if let Type::Reference(reference) = ty {
        return type_tag_tokens(&reference.elem);
    }

    let path = match ty {
        Type::Path(type_path) if type_path.qself.is_none() => &type_path.path,
        _ => return quote! { ::bindcheck::TypeTag::Opaque },
    };
    let segment = match path.segments.last() {
        Some(segment) => segment,
        None => return quote! { ::bindcheck::TypeTag::Opaque },
    };

    match segment.ident.to_string().as_str() {
        "String" | "str" => quote! { ::bindcheck::TypeTag::String },
        "bool" => quote! { ::bindcheck::TypeTag::Boolean },
        "i8" | "i16" | "i32" | "i64" | "i128" | "isize" | "u8" | "u16" | "u32" | "u64"
        | "u128" | "usize" | "f32" | "f64" => quote! { ::bindcheck::TypeTag::Numeric },
        "Vec" => match sequence_element(segment) {
            Some(element) => {
                let inner = type_tag_tokens(element);
                quote! { ::bindcheck::TypeTag::Sequence(::std::boxed::Box::new(#inner)) }
            }
            None => quote! { ::bindcheck::TypeTag::Opaque },
        },
        _ => quote! { ::bindcheck::TypeTag::Opaque },
    }
}

/// The `T` in `Vec<T>`, if the segment carries one.
fn sequence_element(segment: &syn::PathSegment) -> Option<&Type> {
    match &segment.arguments {
        PathArguments::AngleBracketed(args) => args.args.iter().find_map(|arg| match arg {
            GenericArgument::Type(ty) => Some(ty),
            _ => None,
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn tag_string(ty: Type) -> String {
        type_tag_tokens(&ty).to_string()
    }

    #[test]
    fn test_scalar_type_mapping() {
        assert_eq!(
            tag_string(parse_quote!(String)),
            quote! { ::bindcheck::TypeTag::String }.to_string()
        );
        assert_eq!(
            tag_string(parse_quote!(&str)),
            quote! { ::bindcheck::TypeTag::String }.to_string()
        );
        assert_eq!(
            tag_string(parse_quote!(bool)),
            quote! { ::bindcheck::TypeTag::Boolean }.to_string()
        );
        assert_eq!(
            tag_string(parse_quote!(i64)),
            quote! { ::bindcheck::TypeTag::Numeric }.to_string()
        );
        assert_eq!(
            tag_string(parse_quote!(f32)),
            quote! { ::bindcheck::TypeTag::Numeric }.to_string()
        );
    }

    #[test]
    fn test_sequence_type_mapping() {
        assert_eq!(
            tag_string(parse_quote!(Vec<i64>)),
            quote! {
                ::bindcheck::TypeTag::Sequence(::std::boxed::Box::new(
                    ::bindcheck::TypeTag::Numeric
                ))
            }
            .to_string()
        );
        assert_eq!(
            tag_string(parse_quote!(Vec<Vec<String>>)),
            quote! {
                ::bindcheck::TypeTag::Sequence(::std::boxed::Box::new(
                    ::bindcheck::TypeTag::Sequence(::std::boxed::Box::new(
                        ::bindcheck::TypeTag::String
                    ))
                ))
            }
            .to_string()
        );
    }

    #[test]
    fn test_unknown_types_are_opaque() {
        assert_eq!(
            tag_string(parse_quote!(std::time::Duration)),
            quote! { ::bindcheck::TypeTag::Opaque }.to_string()
        );
        assert_eq!(
            tag_string(parse_quote!(Option<String>)),
            quote! { ::bindcheck::TypeTag::Opaque }.to_string()
        );
    }

    #[test]
    fn test_generated_impl_shape() {
        let fields = vec![
            HolderField {
                name: "name".to_string(),
                ty: parse_quote!(String),
            },
            HolderField {
                name: "number".to_string(),
                ty: parse_quote!(i64),
            },
        ];
        let generated = generate_holder_impl(
            &parse_quote!(AppConfig),
            "app",
            &[],
            &fields,
        )
        .to_string();

        assert!(generated.contains("impl :: bindcheck :: ConfigHolder for AppConfig"));
        assert!(generated.contains("descriptor"));
        assert!(generated.contains("with_field"));
    }
}

//! Implementation of the `#[derive(Prisms)]` macro.
//!
//! Every variant shape is reduced to the same form: a pattern binding the
//! variant's fields, a focus expression cloning them out, and a constructor
//! rebuilding the variant from the focus.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Fields, Generics, Ident, Variant, parse_macro_input};

/// Main implementation of the Prisms derive macro.
pub fn derive_prisms_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let name = &input.ident;
    let generics = &input.generics;

    let expanded = match &input.data {
        Data::Enum(data_enum) => {
            generate_enum_prisms(name, generics, &data_enum.variants.iter().collect::<Vec<_>>())
        }
        Data::Struct(_) => syn::Error::new_spanned(
            &input.ident,
            "Prisms can only be derived for enums, not structs. Use #[derive(Lenses)] for structs.",
        )
        .to_compile_error(),
        Data::Union(_) => {
            syn::Error::new_spanned(&input.ident, "Prisms cannot be derived for unions.")
                .to_compile_error()
        }
    };

    TokenStream::from(expanded)
}

fn generate_enum_prisms(name: &Ident, generics: &Generics, variants: &[&Variant]) -> TokenStream2 {
    let prism_methods: Vec<TokenStream2> = variants.iter().map(|variant| generate_variant_prism(variant)).collect();

    let (impl_generics, type_generics, where_clause) = generics.split_for_impl();

    quote! {
        impl #impl_generics #name #type_generics #where_clause {
            #(#prism_methods)*
        }
    }
}

/// The pieces of one variant's prism.
struct VariantShape {
    field_types: Vec<syn::Type>,
    focus_type: TokenStream2,
    pattern: TokenStream2,
    focus: TokenStream2,
    binding: TokenStream2,
    construct: TokenStream2,
}

fn variant_shape(variant: &Variant) -> VariantShape {
    let variant_name = &variant.ident;

    match &variant.fields {
        Fields::Unit => VariantShape {
            field_types: Vec::new(),
            focus_type: quote! { () },
            pattern: quote! { Self::#variant_name },
            focus: quote! { () },
            binding: quote! { () },
            construct: quote! { Self::#variant_name },
        },
        Fields::Unnamed(fields) if fields.unnamed.len() == 1 => {
            let field_type = &fields.unnamed[0].ty;
            VariantShape {
                field_types: vec![field_type.clone()],
                focus_type: quote! { #field_type },
                pattern: quote! { Self::#variant_name(value) },
                focus: quote! { ::core::clone::Clone::clone(value) },
                binding: quote! { value },
                construct: quote! { Self::#variant_name(value) },
            }
        }
        Fields::Unnamed(fields) => {
            let field_types: Vec<_> = fields.unnamed.iter().map(|field| &field.ty).collect();
            let vars: Vec<_> = (0..field_types.len())
                .map(|index| format_ident!("v{}", index))
                .collect();
            VariantShape {
                focus_type: quote! { (#(#field_types),*) },
                field_types: field_types.into_iter().cloned().collect(),
                pattern: quote! { Self::#variant_name(#(#vars),*) },
                focus: quote! { (#(::core::clone::Clone::clone(#vars)),*) },
                binding: quote! { (#(#vars),*) },
                construct: quote! { Self::#variant_name(#(#vars),*) },
            }
        }
        Fields::Named(fields) => {
            let field_names: Vec<_> = fields
                .named
                .iter()
                .filter_map(|field| field.ident.as_ref())
                .collect();
            let field_types: Vec<_> = fields.named.iter().map(|field| &field.ty).collect();
            VariantShape {
                focus_type: quote! { (#(#field_types),*) },
                field_types: field_types.into_iter().cloned().collect(),
                pattern: quote! { Self::#variant_name { #(#field_names),* } },
                focus: quote! { (#(::core::clone::Clone::clone(#field_names)),*) },
                binding: quote! { (#(#field_names),*) },
                construct: quote! { Self::#variant_name { #(#field_names),* } },
            }
        }
    }
}

fn generate_variant_prism(variant: &Variant) -> TokenStream2 {
    let variant_name = &variant.ident;
    let method_name = format_ident!("{}_prism", to_snake_case(&variant_name.to_string()));
    let doc = format!("Returns a prism focusing on the `{variant_name}` variant.");

    let VariantShape {
        field_types,
        focus_type,
        pattern,
        focus,
        binding,
        construct,
    } = variant_shape(variant);

    quote! {
        #[doc = #doc]
        #[inline]
        #[must_use]
        pub fn #method_name() -> impl ::focal::optics::Optic<Self, #focus_type> + Clone
        where
            #(#field_types: ::core::clone::Clone,)*
        {
            ::focal::optics::FunctionPrism::new(
                |source: &Self| -> ::core::option::Option<#focus_type> {
                    match source {
                        #pattern => ::core::option::Option::Some(#focus),
                        #[allow(unreachable_patterns)]
                        _ => ::core::option::Option::None,
                    }
                },
                |_source: Self, #binding: #focus_type| #construct,
            )
        }
    }
}

/// Converts a `CamelCase` or `PascalCase` string to `snake_case`.
fn to_snake_case(input: &str) -> String {
    let mut result = String::with_capacity(input.len() + 4);
    let chars: Vec<char> = input.chars().collect();

    for (index, &character) in chars.iter().enumerate() {
        if character.is_uppercase() {
            if index > 0 {
                let previous_char = chars[index - 1];
                let next_is_lowercase = chars.get(index + 1).is_some_and(|c| c.is_lowercase());

                // "keyPress" -> "key_press", "XMLParser" -> "xml_parser"
                if previous_char.is_lowercase() || (previous_char.is_uppercase() && next_is_lowercase)
                {
                    result.push('_');
                }
            }
            result.extend(character.to_lowercase());
        } else {
            result.push(character);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_snake_case_simple() {
        assert_eq!(to_snake_case("Human"), "human");
        assert_eq!(to_snake_case("Dawg"), "dawg");
    }

    #[test]
    fn test_to_snake_case_multi_word() {
        assert_eq!(to_snake_case("WarDog"), "war_dog");
        assert_eq!(to_snake_case("InitParams"), "init_params");
    }

    #[test]
    fn test_to_snake_case_acronyms() {
        assert_eq!(to_snake_case("HTTPRequest"), "http_request");
        assert_eq!(to_snake_case("JSONText"), "json_text");
    }
}

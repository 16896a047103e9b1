//! `#[derive(Lenses)]`: one `<field>_lens()` constructor per named field.
//!
//! Each generated lens clones the field out on `get` and moves the new value
//! in on `set`, so it composes with the owned-focus JSON and save-file optics.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Field, Fields, parse_macro_input};

pub fn derive_lenses_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let expanded = match lens_methods(&input) {
        Ok(methods) => {
            let name = &input.ident;
            let (impl_generics, type_generics, where_clause) = input.generics.split_for_impl();
            quote! {
                impl #impl_generics #name #type_generics #where_clause {
                    #(#methods)*
                }
            }
        }
        Err(error) => error.to_compile_error(),
    };

    TokenStream::from(expanded)
}

fn lens_methods(input: &DeriveInput) -> syn::Result<Vec<TokenStream2>> {
    let reject = |message: &str| Err(syn::Error::new_spanned(&input.ident, message));

    match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => Ok(named.named.iter().filter_map(field_lens).collect()),
            Fields::Unnamed(_) => reject("`Lenses` needs named fields; tuple structs have none"),
            Fields::Unit => reject("`Lenses` needs named fields; unit structs have none"),
        },
        Data::Enum(_) => reject("`Lenses` applies to structs; derive `Prisms` for enums"),
        Data::Union(_) => reject("`Lenses` applies to structs, not unions"),
    }
}

/// Builds `<field>_lens()` for one named field. `None` for unnamed fields.
fn field_lens(field: &Field) -> Option<TokenStream2> {
    let member = field.ident.as_ref()?;
    let focus = &field.ty;
    let method = format_ident!("{}_lens", member);
    let doc = format!("Lens onto `self.{member}`.");

    Some(quote! {
        #[doc = #doc]
        #[inline]
        #[must_use]
        pub fn #method() -> impl ::focal::optics::Lens<Self, #focus> + Clone
        where
            #focus: ::core::clone::Clone,
        {
            ::focal::optics::FunctionLens::new(
                |whole: &Self| ::core::clone::Clone::clone(&whole.#member),
                |mut whole: Self, part: #focus| {
                    whole.#member = part;
                    whole
                },
            )
        }
    })
}

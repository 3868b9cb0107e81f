//! `#[derive(Error)]` for error enums
//!
//! Every variant needs a `#[msg = "..."]` attribute, which becomes its [Display](std::fmt::Display)
//! output. Tuple variants with exactly one field are treated as wrappers around
//! another error: they get a `From` impl and are reported as the `source()` of the error.

use proc_macro::TokenStream;
use quote::quote;

#[proc_macro_derive(Error, attributes(msg))]
pub fn derive_error(input: TokenStream) -> TokenStream {
    let item: syn::ItemEnum = syn::parse(input).expect("Could not parse input as enum");

    let name = item.ident;
    let (impl_generics, type_generics, where_clause) = item.generics.split_for_impl();
    let mut variant_displays = vec![];
    let mut from_impls = vec![];
    let mut variant_sources = vec![];

    for variant in &item.variants {
        let ident = &variant.ident;

        let display_attribute = variant
            .attrs
            .iter()
            .flat_map(|attr| match &attr.meta {
                syn::Meta::NameValue(name_value) => Some(name_value),
                _ => None,
            })
            .flat_map(|attr| {
                let ident = attr.path.get_ident()?.to_string();

                Some((ident, &attr.value))
            })
            .find(|(name, _)| name == "msg")
            .map(|(_, value)| value);

        let Some(display_value) = display_attribute else {
            panic!("variant {ident} needs a #[msg = \"...\"] attribute");
        };

        match &variant.fields {
            syn::Fields::Unit => {
                variant_displays.push(
                    quote!(Self::#ident => ::std::fmt::Display::fmt(&(#display_value), f)),
                );
            },
            syn::Fields::Unnamed(unnamed_fields) => {
                if unnamed_fields.unnamed.len() != 1 {
                    panic!("variant {ident} needs exactly one field");
                }

                let field = &unnamed_fields.unnamed[0];
                let ty = &field.ty;

                from_impls.push(quote!(
                    #[automatically_derived]
                    impl #impl_generics From<#ty> for #name #type_generics #where_clause {
                        fn from(value: #ty) -> Self {
                            Self::#ident(value)
                        }
                    }
                ));
                variant_displays.push(
                    quote!(Self::#ident(_) => ::std::fmt::Display::fmt(&(#display_value), f)),
                );
                variant_sources.push(quote!(Self::#ident(ref value) => Some(value)));
            },
            syn::Fields::Named(_) => panic!("named fields are not allowed"),
        }
    }

    quote!(
        #[automatically_derived]
        impl #impl_generics ::std::fmt::Display for #name #type_generics #where_clause {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                match self {
                    #(
                        #variant_displays,
                    )*
                }
            }
        }

        #(
            #from_impls
        )*

        #[automatically_derived]
        impl #impl_generics ::std::error::Error for #name #type_generics #where_clause {
            #[allow(unreachable_patterns)]
            fn source(&self) -> Option<&(dyn ::std::error::Error + 'static)> {
                match self {
                    #(
                        #variant_sources,
                    )*
                    _ => None,
                }
            }
        }
    )
    .into()
}

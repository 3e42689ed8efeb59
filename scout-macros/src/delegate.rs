use proc_macro::TokenStream;
use proc_macro2::{Ident, Span};
use quote::quote;
use syn::{ItemImpl, Meta, Path, Token, parse_macro_input, punctuated::Punctuated};

use proc_macro_crate::{FoundCrate, crate_name};

fn resolve_scout_core_path() -> Path {
    // Works whether the consumer depends on scout-core directly or is
    // scout-core itself.
    let found = crate_name("scout-core").unwrap_or(FoundCrate::Itself);
    match found {
        FoundCrate::Itself => syn::parse_quote! { scout_core },
        FoundCrate::Name(name) => {
            let ident = Ident::new(&name, Span::call_site());
            syn::parse_quote! { #ident }
        }
    }
}

fn parse_inner_ident(args: Punctuated<Meta, Token![,]>) -> Ident {
    let mut inner: Option<Ident> = None;
    for meta in args {
        if let Meta::Path(p) = meta {
            if let Some(ident) = p.get_ident() {
                inner = Some(ident.clone());
            }
        }
    }
    inner.expect(
        "delegate macro requires the inner field ident as first arg, e.g. #[delegate_connector(inner)]",
    )
}

pub fn delegate_connector_impl(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr with Punctuated::<Meta, Token![,]>::parse_terminated);
    let input_impl = parse_macro_input!(item as ItemImpl);
    let inner_ident = parse_inner_ident(args);

    let scout_core = resolve_scout_core_path();
    let self_ty = *input_impl.self_ty.clone();

    let expanded = quote! {
        #input_impl

        impl #scout_core::connector::EngineConnector for #self_ty {
            fn name(&self) -> &'static str { self.#inner_ident.name() }
            fn vendor(&self) -> &'static str { self.#inner_ident.vendor() }
            #scout_core::scout_connector_accessors!(#inner_ident);
        }
    };

    expanded.into()
}

pub fn delegate_all_providers_impl(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr with Punctuated::<Meta, Token![,]>::parse_terminated);
    let input_impl = parse_macro_input!(item as ItemImpl);
    let inner_ident = parse_inner_ident(args);

    let scout_core = resolve_scout_core_path();
    let self_ty = *input_impl.self_ty.clone();

    let expanded = quote! {
        #input_impl
        #scout_core::scout_delegate_provider_impls!(#self_ty, #inner_ident);
    };

    expanded.into()
}

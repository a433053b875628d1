extern crate proc_macro;

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, punctuated::Punctuated};

#[derive(Debug, Default)]
struct DtoFlags {
    pub clone: bool,
    pub eq: bool,
    pub request: bool,
    pub response: bool,
}

impl DtoFlags {
    fn parse(flags: impl Iterator<Item = syn::Ident>) -> Self {
        let mut parsed = Self::default();
        for flag in flags {
            match flag.to_string().as_str() {
                "clone" => parsed.clone = true,
                "eq" => parsed.eq = true,
                "request" => parsed.request = true,
                "response" => parsed.response = true,
                other => panic!("Unknown flag: {}", other),
            }
        }
        parsed
    }
}

/// Marks a wire type shared between the two sides of a precept.
///
/// `#[dto(chat, request)]` derives `Deserialize` when the `chat-in` feature is
/// on (the side that receives requests) and `Serialize` when `chat-out` is on
/// (the side that sends them). `response` does the reverse. With both flags
/// the type is (de)serializable everywhere. `clone` and `eq` add the matching
/// derives unconditionally; `Debug` is always derived.
#[proc_macro_attribute]
pub fn dto(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = syn::parse_macro_input!(attr with Punctuated<syn::Ident, syn::Token![,]>::parse_separated_nonempty);
    let mut args = args.into_iter();

    let precept_name = args.next().expect("Expected precept name as first argument");
    let flags = DtoFlags::parse(args);

    let mut universal_derives: Vec<syn::Path> = vec![syn::parse_quote!(Debug)];
    let mut item: syn::Item = parse_macro_input!(item as syn::Item);
    let feature_in = format!("{}-in", precept_name);
    let feature_out = format!("{}-out", precept_name);

    let item_attrs = match &mut item {
        syn::Item::Struct(s) => &mut s.attrs,
        syn::Item::Enum(e) => &mut e.attrs,
        _ => panic!("dto macro only supports structs and enums"),
    };

    if flags.clone {
        universal_derives.push(syn::parse_quote!(Clone));
    }

    if flags.eq {
        universal_derives.push(syn::parse_quote!(PartialEq));
    }

    if flags.request && flags.response {
        universal_derives.push(syn::parse_quote!(::serde::Serialize));
        universal_derives.push(syn::parse_quote!(::serde::Deserialize));
    } else if flags.request {
        item_attrs.push(syn::parse_quote! {
            #[cfg_attr(feature = #feature_in, derive(::serde::Deserialize))]
        });
        item_attrs.push(syn::parse_quote! {
            #[cfg_attr(feature = #feature_out, derive(::serde::Serialize))]
        });
    } else if flags.response {
        item_attrs.push(syn::parse_quote! {
            #[cfg_attr(feature = #feature_in, derive(::serde::Serialize))]
        });
        item_attrs.push(syn::parse_quote! {
            #[cfg_attr(feature = #feature_out, derive(::serde::Deserialize))]
        });
    }

    // Derives must come before any `#[serde(...)]` helper attributes that
    // the item already carries.
    item_attrs.insert(
        0,
        syn::parse_quote! {
            #[derive(#(#universal_derives),*)]
        },
    );

    TokenStream::from(quote! { #item })
}

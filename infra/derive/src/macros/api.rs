use super::derived_traits;
use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::parse::Parser;
use syn::punctuated::Punctuated;
use syn::{Attribute, Expr, ItemFn, ItemStruct, Lit, LitStr, Meta, Token};

struct ModelArgs {
    rename_all: LitStr,
    deny_unknown_fields: bool,
}

/// Expands `#[api_model]`: common derives, optional `ToSchema` and the serde policy.
pub fn expand_api_model(args: TokenStream, input: ItemStruct) -> TokenStream {
    let args = match parse_model_args(args) {
        Ok(args) => args,
        Err(err) => return err.to_compile_error(),
    };

    let derives = derived_traits(&input.attrs);
    let mut missing = Vec::new();
    if !derives.contains("Debug") {
        missing.push(quote! { Debug });
    }
    if !derives.contains("Serialize") {
        missing.push(quote! { ::serde::Serialize });
    }
    if !derives.contains("Deserialize") {
        missing.push(quote! { ::serde::Deserialize });
    }
    let derive_attr = if missing.is_empty() {
        quote! {}
    } else {
        quote! { #[derive(#(#missing),*)] }
    };

    let schema_attr = if derives.contains("ToSchema") {
        quote! {}
    } else {
        quote! { #[cfg_attr(feature = "server", derive(::utoipa::ToSchema))] }
    };

    let (has_rename, has_deny) = serde_flags(&input.attrs);
    let rename_all = &args.rename_all;
    let rename_attr = if has_rename {
        quote! {}
    } else {
        quote! { #[serde(rename_all = #rename_all)] }
    };
    let deny_attr = if args.deny_unknown_fields && !has_deny {
        quote! { #[serde(deny_unknown_fields)] }
    } else {
        quote! {}
    };

    quote! {
        #derive_attr
        #schema_attr
        #rename_attr
        #deny_attr
        #input
    }
}

/// Expands `#[api_handler]`: forwards the arguments to `utoipa::path` under `server`.
pub fn expand_api_handler(args: TokenStream, input: ItemFn) -> TokenStream {
    let ItemFn { attrs, vis, sig, block } = input;

    quote! {
        #(#attrs)*
        #[allow(clippy::unused_async)]
        #[cfg_attr(feature = "server", ::utoipa::path(#args))]
        #vis #sig #block
    }
}

fn parse_model_args(args: TokenStream) -> syn::Result<ModelArgs> {
    let metas = Punctuated::<Meta, Token![,]>::parse_terminated.parse2(args)?;

    let mut parsed =
        ModelArgs { rename_all: LitStr::new("camelCase", Span::call_site()), deny_unknown_fields: true };

    for meta in metas {
        let pair = match meta {
            Meta::NameValue(pair) => pair,
            other => {
                return Err(syn::Error::new_spanned(other, "expected `name = value` arguments"));
            },
        };
        let Expr::Lit(expr) = &pair.value else {
            return Err(syn::Error::new_spanned(&pair.value, "expected a literal"));
        };

        match (&expr.lit, pair.path.get_ident().map(ToString::to_string).as_deref()) {
            (Lit::Str(value), Some("rename_all")) => parsed.rename_all = value.clone(),
            (Lit::Bool(value), Some("deny_unknown_fields")) => {
                parsed.deny_unknown_fields = value.value;
            },
            _ => {
                return Err(syn::Error::new_spanned(
                    &pair,
                    "supported arguments: rename_all = \"...\", deny_unknown_fields = bool",
                ));
            },
        }
    }

    Ok(parsed)
}

fn serde_flags(attrs: &[Attribute]) -> (bool, bool) {
    let mut rename = false;
    let mut deny = false;

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename_all") {
                rename = true;
                let _ = meta.value()?.parse::<LitStr>()?;
            } else if meta.path.is_ident("deny_unknown_fields") {
                deny = true;
            }
            Ok(())
        });
    }

    (rename, deny)
}

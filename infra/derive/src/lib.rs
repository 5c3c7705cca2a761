#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Attribute macros shared by every crate of the workspace. They remove the boilerplate
//! around error enums, request/response models, documented handlers and feature slices.
//!
//! The examples below are `ignore`d because a proc-macro crate cannot use its own macros.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, ItemStruct, parse_macro_input};

/// Turns an enum into the workspace error type.
///
/// # Generated Items
///
/// * `#[derive(Debug, thiserror::Error)]` when not already derived.
/// * `<Name>Ext` trait adding `.context(...)` to `Result<T, Name>` and to
///   `Result<T, Source>` for every variant that wraps a source error.
/// * `From<Source>` for variants with a `source` (or `#[source]`) field.
/// * `From<&'static str>` and `From<String>` when an `Internal` variant exists.
/// * A module-private `format_context` helper for the `#[error(...)]` strings.
///
/// # Requirements
///
/// Variants must use named fields. A variant with a source field must also carry
/// `context: Option<Cow<'static, str>>`.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[plint_derive::plint_error]
/// pub enum StoreError {
///     #[error("Query failed{}: {source}", format_context(.context))]
///     Query { source: surrealdb::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal store error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn load(db: &Db) -> Result<Vec<Row>, StoreError> {
///     db.select("waitlist").context("Loading waitlist rows")
/// }
/// ```
#[proc_macro_attribute]
pub fn plint_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand(input).into()
}

/// Declares a request or response model.
///
/// Adds `Debug`, `Serialize` and `Deserialize` when missing, derives `utoipa::ToSchema`
/// under the consuming crate's `server` feature and applies the serde policy:
/// `rename_all = "camelCase"` and `deny_unknown_fields` unless overridden.
///
/// ```rust,ignore
/// #[plint_derive::api_model(rename_all = "snake_case", deny_unknown_fields = false)]
/// pub struct WaitlistRequest {
///     pub email: Option<String>,
/// }
/// ```
#[proc_macro_attribute]
pub fn api_model(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::api::expand_api_model(attr.into(), input).into()
}

/// Registers an axum handler with `utoipa::path` when the `server` feature is enabled.
///
/// ```rust,ignore
/// #[plint_derive::api_handler(
///     post,
///     path = "/api/waitlist",
///     responses((status = CREATED, body = WaitlistCreated)),
///     tag = "Waitlist",
/// )]
/// pub async fn join(/* extractors */) -> impl IntoResponse { /* ... */ }
/// ```
#[proc_macro_attribute]
pub fn api_handler(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::api::expand_api_handler(args.into(), input).into()
}

/// Declares a feature slice handle.
///
/// The annotated struct becomes `<Name>Inner`; `<Name>` is a cheap-to-clone `Arc`
/// wrapper that derefs to it and implements `FeatureSlice` for the state registry.
///
/// ```rust,ignore
/// #[plint_derive::plint_slice]
/// pub struct Waitlist {
///     repository: WaitlistRepository,
/// }
///
/// let slice = Waitlist::new(WaitlistInner { repository });
/// ```
#[proc_macro_attribute]
pub fn plint_slice(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::slice::expand(input).into()
}

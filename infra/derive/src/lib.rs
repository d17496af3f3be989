#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the Artis workspace: error enums, the async
//! entry point of the shell and feature slice handles.
//!
//! Consumers reach these through re-exports (`artis_runtime::main`) or by
//! depending on the crate directly (`#[artis_derive::artis_error]`).

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, ItemStruct, parse_macro_input};

/// Attribute macro that turns an `async fn main` into a synchronous entry point
/// running on a runtime built from one of the `artis_runtime` profiles.
///
/// # Arguments
///
/// * `event_loop` - Single-threaded runtime, the shape of a UI event loop.
/// * `default` - Multi-threaded runtime with auto-detected worker count.
///
/// # Examples
///
/// ```rust,ignore
/// #[artis_runtime::main(event_loop)]
/// async fn main() -> anyhow::Result<()> {
/// # Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn main(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::runtime::expand_main(args.into(), input).into()
}

/// Defines a domain error enum wired into the workspace conventions.
///
/// # Features
///
/// * Injects `#[derive(Debug, thiserror::Error)]` unless already present.
/// * Generates a companion `<Name>Ext` trait adding `.context(...)` to results
///   holding this error or any wrapped source error.
/// * Implements `From<Source>` for every variant carrying a `source` field.
/// * Implements `From<&'static str>` and `From<String>` when an `Internal`
///   variant exists.
///
/// # Requirements
///
/// Variants use named fields. A variant with a source must also have a
/// `context: Option<Cow<'static, str>>` field.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[artis_derive::artis_error]
/// pub enum StoreError {
///     #[error("Bus error{}: {source}", format_context(.context))]
///     Bus { source: artis_event_bus::EventBusError, context: Option<Cow<'static, str>> },
///
///     #[error("Internal store error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
/// ```
#[proc_macro_attribute]
pub fn artis_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand(input).into()
}

/// Turns a struct into a shareable feature slice handle.
///
/// The annotated struct becomes `<Name>Inner`; `<Name>` wraps it in an `Arc`,
/// derefs to it and implements `artis_kernel::domain::registry::FeatureSlice`
/// so it can be handed to the module registry.
///
/// # Example
/// ```rust,ignore
/// #[artis_derive::artis_slice]
/// pub struct Auth {
///     pub name: String,
/// }
///
/// let slice = Auth::new(AuthInner { name: "auth".to_owned() });
/// ```
#[proc_macro_attribute]
pub fn artis_slice(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(item as ItemStruct);
    macros::slice::expand(input).into()
}

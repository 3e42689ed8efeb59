//! Attribute macros for middleware wrappers.
//!
//! Wrappers hold an inner `Arc<dyn EngineConnector>` and want to forward the
//! connector identity and per-capability provider impls to it. These
//! attributes generate that boilerplate by expanding to the declarative
//! macros exported by `scout-core`, so the capability list lives in one
//! place.

use proc_macro::TokenStream;

mod delegate;

/// Implement `EngineConnector` for the annotated type by delegating identity
/// to the named inner field and answering capability accessors with `self`.
///
/// ```ignore
/// #[scout_macros::delegate_connector(inner)]
/// impl MyWrapper {
///     pub fn new(inner: Arc<dyn EngineConnector>) -> Self { Self { inner } }
/// }
/// ```
#[proc_macro_attribute]
pub fn delegate_connector(attr: TokenStream, item: TokenStream) -> TokenStream {
    delegate::delegate_connector_impl(attr, item)
}

/// Implement every provider trait for the annotated type as a pass-through
/// to the named inner field, routed through the type's `CallHooks` impl.
#[proc_macro_attribute]
pub fn delegate_all_providers(attr: TokenStream, item: TokenStream) -> TokenStream {
    delegate::delegate_all_providers_impl(attr, item)
}

//! Derive macros wiring the dataset register's services to its context.
//!
//! - `#[derive(Context)]` lets every field of the root context be extracted
//! - `#[derive(FromContext)]` builds a repository or service from the context
//!
//! Generated code refers to `crate::FromRef`, so the consuming crate must
//! expose the trait at its root.

use proc_macro::TokenStream;
use syn::punctuated::Punctuated;
use syn::token::Comma;
use syn::{Data, DeriveInput, Field, Fields};

mod context;
mod from_context;

/// Derive macro for the root context.
///
/// Generates `impl FromRef<Self>` for the type of each field, so a shared
/// handle can be pulled out of the context by type. Field types must be
/// `Clone` and distinct.
///
/// # Example
///
/// ```ignore
/// #[derive(Context, Clone)]
/// pub struct Context {
///     pub store: Arc<dyn GraphStore>,
///     pub config: Arc<Config>,
/// }
///
/// // impl FromRef<Context> for Arc<dyn GraphStore> { ... }
/// // impl FromRef<Context> for Arc<Config> { ... }
/// ```
#[proc_macro_derive(Context)]
pub fn derive_context(input: TokenStream) -> TokenStream {
    context::derive_context_impl(input)
}

/// Derive macro for types resolved from the context.
///
/// Each field is resolved with `FromRef::from_ref(ctx)` against a type named
/// `Context` that must be in scope where the derive is used. Fields may be
/// context handles or other `FromContext` types.
///
/// ```ignore
/// #[derive(FromContext, Clone)]
/// pub struct CrawlerService {
///     registrations: RegistrationRepository,
///     fetcher: Arc<DatasetFetcher>,
/// }
/// ```
#[proc_macro_derive(FromContext)]
pub fn derive_from_context(input: TokenStream) -> TokenStream {
    from_context::derive_from_context_impl(input)
}

/// Returns the named fields of a struct, or a spanned error for `derive`.
fn named_fields<'a>(
    input: &'a DeriveInput,
    derive: &str,
) -> Result<&'a Punctuated<Field, Comma>, syn::Error> {
    match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => Ok(&fields.named),
            _ => Err(syn::Error::new_spanned(
                input,
                format!("{} needs a struct with named fields", derive),
            )),
        },
        _ => Err(syn::Error::new_spanned(
            input,
            format!("{} can only be derived for structs", derive),
        )),
    }
}

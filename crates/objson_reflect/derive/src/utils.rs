use proc_macro2::TokenStream;
use syn::Ident;
use syn::ext::IdentExt;

/// Returns an empty token stream.
#[inline(always)]
pub(crate) fn empty() -> TokenStream {
    TokenStream::new()
}

/// The attribute name of an identifier, without a raw `r#` prefix.
#[inline]
pub(crate) fn attribute_name(ident: &Ident) -> String {
    ident.unraw().to_string()
}

mod error_kind;

use error_kind::ErrorKindTarget;
use proc_macro::TokenStream;
use quote::quote;
use syn::parse_macro_input;

/// Implements `deriv_error::ErrorKind` for a struct, from the tags of its `#[error(...)]`
/// attribute:
///
/// - `message` (required): the headline of the report.
/// - `labels`: an array with one label per span of the error, in order.
/// - `help`: a hint shown under the report.
///
/// Each tag is an expression producing anything that implements [`ToString`]. Named fields are in
/// scope by reference, so a tag can mention them; tuple structs are rejected.
///
/// ```
/// use deriv_attrs::ErrorKind;
/// use deriv_error::ErrorKind;
///
/// #[derive(Debug, ErrorKind)]
/// #[error(
///     message = format!("unknown function `{}`", name),
///     labels = ["this function is not supported"],
/// )]
/// pub struct UnknownFunction {
///     name: String,
/// }
///
/// let err = UnknownFunction { name: "sec".to_string() };
/// assert_eq!(err.message(), "unknown function `sec`");
/// assert_eq!(err.labels(), vec!["this function is not supported".to_string()]);
/// assert_eq!(err.help(), None);
/// ```
#[proc_macro_derive(ErrorKind, attributes(error))]
pub fn error_kind(item: TokenStream) -> TokenStream {
    let target = parse_macro_input!(item as ErrorKindTarget);
    let name = &target.name;
    quote! {
        impl ErrorKind for #name {
            fn as_any(&self) -> &dyn std::any::Any {
                self
            }

            #target
        }
    }.into()
}

mod error_kind;

use error_kind::ErrorKindTarget;
use proc_macro::TokenStream;
use quote::quote;
use syn::parse_macro_input;

/// Derives the `ErrorKind` trait from `mathex-error` for the given struct.
///
/// The information of the error can be customized using the `error` attribute by adding the
/// corresponding tags to it:
///
/// ```
/// use mathex_attrs::ErrorKind;
/// use mathex_error::{Error, ErrorCategory};
///
/// #[derive(Debug, ErrorKind)]
/// #[error(
///     category = Syntax,
///     message = format!("unexpected `{}`", found),
///     labels = ["this token"],
///     help = "remove it",
/// )]
/// pub struct Unexpected {
///     pub found: char,
/// }
///
/// let err = Error::new(vec![0..1], Unexpected { found: ')' });
/// assert_eq!(err.category(), ErrorCategory::Syntax);
/// assert_eq!(err.message(), "unexpected `)`");
/// ```
///
/// The following tags are available:
///
/// | Tag         | Description                                                                  |
/// | ----------- | ---------------------------------------------------------------------------- |
/// | `category`  | The `ErrorCategory` variant of the error. Defaults to `Generic`.             |
/// | `message`   | The message displayed at the top of the error when it is displayed.          |
/// | `labels`    | The labels that point to each span of the error, in order.                   |
/// | `help`      | Optional help text for the error, describing what the user can do to fix it. |
///
/// `message`, `labels` and `help` accept expressions. For structs with named fields, the
/// expressions are evaluated with the members of the struct in scope, so they can be used in the
/// expression (tuple structs are not supported).
#[proc_macro_derive(ErrorKind, attributes(error))]
pub fn error_kind(item: TokenStream) -> TokenStream {
    let target = parse_macro_input!(item as ErrorKindTarget);
    let name = &target.name;
    quote! {
        impl mathex_error::ErrorKind for #name {
            fn as_any(&self) -> &dyn std::any::Any {
                self
            }
            #target
        }
    }.into()
}

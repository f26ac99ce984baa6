// Derive macros for datashape
// Generate request schemas and typed accessors at compile time

use proc_macro::TokenStream;

mod accessors;
mod request;

/// Implements `datashape_validation::Request` for a struct with named fields.
///
/// Struct attribute:
/// - `#[request(source = "profile")]`: message catalog source for localized errors
///
/// Field attributes:
/// - `#[required]`: field must not be empty after construction
/// - `#[required(key = "E-mail")]`: descriptive key used in the message
/// - `#[required(code = "email_missing")]`: fixed error code
/// - `#[required(code_with = method)]`: error code computed by `self.method()`
#[proc_macro_derive(Request, attributes(request, required))]
pub fn request_derive(input: TokenStream) -> TokenStream {
    request::request_derive_impl(input)
}

/// Implements `datashape_core::Accessors` for a struct with named fields.
///
/// Every field gets `get_<field>`; `bool` fields also get `is_<field>`.
/// `#[accessors(is)]` adds a truthiness `is_<field>` to any field and
/// `#[accessors(skip)]` leaves a field out.
#[proc_macro_derive(Accessors, attributes(accessors))]
pub fn accessors_derive(input: TokenStream) -> TokenStream {
    accessors::accessors_derive_impl(input)
}

//! `#[derive(Request)]`: field schema, emptiness checks and error code overrides.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    Attribute, Data, DeriveInput, Error, Fields, Ident, LitStr, Meta, ext::IdentExt,
    parse_macro_input,
};

/// Parsed `#[required(...)]` marker.
#[derive(Default)]
struct Required {
    key: Option<String>,
    code: Option<String>,
    code_with: Option<Ident>,
}

fn parse_required(attr: &Attribute) -> syn::Result<Required> {
    let mut required = Required::default();

    // Bare `#[required]`
    if !matches!(attr.meta, Meta::List(_)) {
        return Ok(required);
    }

    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("key") {
            let value: LitStr = meta.value()?.parse()?;
            required.key = Some(value.value());
            Ok(())
        } else if meta.path.is_ident("code") {
            let value: LitStr = meta.value()?.parse()?;
            required.code = Some(value.value());
            Ok(())
        } else if meta.path.is_ident("code_with") {
            required.code_with = Some(meta.value()?.parse()?);
            Ok(())
        } else {
            Err(meta.error("expected `key`, `code` or `code_with`"))
        }
    })?;

    if required.code.is_some() && required.code_with.is_some() {
        return Err(Error::new_spanned(
            attr,
            "`code` and `code_with` are mutually exclusive",
        ));
    }

    Ok(required)
}

fn parse_source(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut source = None;

    for attr in attrs.iter().filter(|a| a.path().is_ident("request")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("source") {
                let value: LitStr = meta.value()?.parse()?;
                source = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("expected `source`"))
            }
        })?;
    }

    Ok(source)
}

pub fn request_derive_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand(&input) {
        Ok(tokens) => TokenStream::from(tokens),
        Err(err) => TokenStream::from(err.to_compile_error()),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(Error::new_spanned(
                    name,
                    "Request can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(Error::new_spanned(
                name,
                "Request can only be derived for structs",
            ));
        }
    };

    let source = parse_source(&input.attrs)?;

    let mut descriptors = Vec::new();
    let mut missing_arms = Vec::new();
    let mut code_arms = Vec::new();

    for field in fields {
        let Some(ident) = &field.ident else {
            continue;
        };
        let field_name = ident.unraw().to_string();

        let mut required = None;
        for attr in field.attrs.iter().filter(|a| a.path().is_ident("required")) {
            if required.is_some() {
                return Err(Error::new_spanned(attr, "duplicate `#[required]` marker"));
            }
            required = Some(parse_required(attr)?);
        }

        let descriptor = match required {
            None => quote! { ::datashape_validation::FieldDescriptor::optional(#field_name) },
            Some(required) => {
                let mut descriptor =
                    quote! { ::datashape_validation::FieldDescriptor::required(#field_name) };
                if let Some(key) = &required.key {
                    descriptor = quote! { #descriptor.with_key(#key) };
                }
                if let Some(code) = &required.code {
                    descriptor = quote! { #descriptor.with_code(#code) };
                }
                missing_arms.push(quote! {
                    #field_name => ::datashape_validation::FieldPresence::is_missing(&self.#ident),
                });
                if let Some(method) = &required.code_with {
                    code_arms.push(quote! {
                        #field_name => ::std::option::Option::Some(
                            ::std::string::ToString::to_string(&self.#method())
                        ),
                    });
                }
                descriptor
            }
        };

        descriptors.push(descriptor);
    }

    let source_call = source.map(|source| quote! { .with_source(#source) });

    let code_fn = if code_arms.is_empty() {
        quote! {}
    } else {
        quote! {
            fn error_code_for(&self, field: &str) -> ::std::option::Option<::std::string::String> {
                match field {
                    #(#code_arms)*
                    _ => ::std::option::Option::None,
                }
            }
        }
    };

    Ok(quote! {
        impl #impl_generics ::datashape_validation::Request for #name #ty_generics #where_clause {
            fn schema() -> ::datashape_validation::RequestSchema {
                ::datashape_validation::RequestSchema::new()
                    #source_call
                    #(.field(#descriptors))*
            }

            fn is_missing(&self, field: &str) -> bool {
                match field {
                    #(#missing_arms)*
                    _ => false,
                }
            }

            #code_fn
        }
    })
}

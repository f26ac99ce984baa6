//! `#[derive(Accessors)]`: `get_<field>` / `is_<field>` accessors.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Error, Field, Fields, Type, ext::IdentExt, parse_macro_input};

#[derive(Default)]
struct FieldOptions {
    skip: bool,
    is: bool,
}

fn parse_options(field: &Field) -> syn::Result<FieldOptions> {
    let mut options = FieldOptions::default();

    for attr in field.attrs.iter().filter(|a| a.path().is_ident("accessors")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                options.skip = true;
                Ok(())
            } else if meta.path.is_ident("is") {
                options.is = true;
                Ok(())
            } else {
                Err(meta.error("expected `skip` or `is`"))
            }
        })?;
    }

    Ok(options)
}

fn is_bool(ty: &Type) -> bool {
    matches!(ty, Type::Path(path) if path.qself.is_none() && path.path.is_ident("bool"))
}

pub fn accessors_derive_impl(input: TokenStream) -> TokenStream {
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
                    "Accessors can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(Error::new_spanned(
                name,
                "Accessors can only be derived for structs",
            ));
        }
    };

    let mut methods = Vec::new();
    let mut arms = Vec::new();

    for field in fields {
        let Some(ident) = &field.ident else {
            continue;
        };
        let options = parse_options(field)?;
        if options.skip {
            continue;
        }

        let field_name = ident.unraw().to_string();
        let getter = format!("get_{}", field_name);
        let predicate = format!("is_{}", field_name);

        methods.push(getter.clone());
        arms.push(quote! {
            #getter => ::std::option::Option::Some(
                ::datashape_core::FieldValue::from(::std::clone::Clone::clone(&self.#ident))
            ),
        });

        if is_bool(&field.ty) {
            methods.push(predicate.clone());
            arms.push(quote! {
                #predicate => ::std::option::Option::Some(::datashape_core::FieldValue::Bool(self.#ident)),
            });
        } else if options.is {
            methods.push(predicate.clone());
            arms.push(quote! {
                #predicate => ::std::option::Option::Some(::datashape_core::FieldValue::Bool(
                    ::datashape_core::FieldValue::from(::std::clone::Clone::clone(&self.#ident)).is_truthy()
                )),
            });
        }
    }

    Ok(quote! {
        impl #impl_generics ::datashape_core::Accessors for #name #ty_generics #where_clause {
            fn responds_to(method: &str) -> bool {
                const METHODS: &[&str] = &[#(#methods),*];
                METHODS.contains(&method)
            }

            fn call(&self, method: &str) -> ::std::option::Option<::datashape_core::FieldValue> {
                match method {
                    #(#arms)*
                    _ => ::std::option::Option::None,
                }
            }
        }
    })
}

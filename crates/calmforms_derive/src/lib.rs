use proc_macro::TokenStream;
use proc_macro2::{Ident, Span, TokenStream as TokenStream2};
use proc_macro_crate::{FoundCrate, crate_name};
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Fields, LitStr, parse_macro_input};

/// Derives `calmforms::form::FormData<V>` for a struct with named fields.
///
/// Each field is read from the control registered under the field's name,
/// or under `#[form(id = "...")]` when given, and converted with `From<V>`.
#[proc_macro_derive(FormData, attributes(form))]
pub fn derive_form_data(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    if !input.generics.params.is_empty() {
        return syn::Error::new_spanned(
            input.ident,
            "FormData derive currently supports only non-generic structs",
        )
        .to_compile_error()
        .into();
    }

    let model_ident = input.ident;

    let named_fields = match input.data {
        Data::Struct(data) => match data.fields {
            Fields::Named(fields) => fields.named,
            _ => {
                return syn::Error::new(
                    Span::call_site(),
                    "FormData derive requires a struct with named fields",
                )
                .to_compile_error()
                .into();
            }
        },
        _ => {
            return syn::Error::new(
                Span::call_site(),
                "FormData derive is only supported on structs",
            )
            .to_compile_error()
            .into();
        }
    };

    let calmforms = calmforms_path();
    let mut bounds = Vec::new();
    let mut initializers = Vec::new();

    for field in named_fields {
        let Some(field_ident) = field.ident else {
            continue;
        };
        let control_id = match control_id_override(&field.attrs) {
            Ok(Some(id)) => id,
            Ok(None) => field_ident.to_string(),
            Err(error) => return error.to_compile_error().into(),
        };
        let field_ty = field.ty;

        bounds.push(quote! { #field_ty: ::core::convert::From<__V> });
        initializers.push(quote! {
            #field_ident: ::core::convert::From::from(values.require(#control_id)?.clone())
        });
    }

    quote! {
        impl<__V> #calmforms::form::FormData<__V> for #model_ident
        where
            __V: ::core::clone::Clone,
            #(#bounds,)*
        {
            fn from_values(
                values: &#calmforms::form::FormValues<__V>,
            ) -> #calmforms::form::FormResult<Self> {
                ::core::result::Result::Ok(Self {
                    #(#initializers,)*
                })
            }
        }
    }
    .into()
}

fn control_id_override(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut id = None;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("form")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("id") {
                let value: LitStr = meta.value()?.parse()?;
                id = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("unsupported form attribute, expected `id = \"...\"`"))
            }
        })?;
    }
    Ok(id)
}

fn calmforms_path() -> TokenStream2 {
    match crate_name("calmforms") {
        Ok(FoundCrate::Name(name)) => {
            let ident = Ident::new(&name, Span::call_site());
            quote!(::#ident)
        }
        Ok(FoundCrate::Itself) => quote!(crate),
        Err(_) => quote!(::calmforms),
    }
}

use proc_macro2::TokenStream as TokenStream2;
use quote::{quote, quote_spanned, ToTokens};
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    Attribute,
    Expr,
    Fields,
    Ident,
    ItemStruct,
    MetaNameValue,
    Result,
    Token,
};

/// The tags of an `#[error(...)]` attribute.
#[derive(Debug)]
pub struct ErrorTags {
    pub message: Expr,
    pub labels: Option<Expr>,
    pub help: Option<Expr>,
}

impl ErrorTags {
    /// Reads the tags out of the attribute. `span_of` is the struct name, which errors point at
    /// when the required `message` tag is missing.
    fn from_attribute(attr: &Attribute, span_of: &Ident) -> Result<Self> {
        let pairs = attr.parse_args_with(Punctuated::<MetaNameValue, Token![,]>::parse_terminated)?;

        let (mut message, mut labels, mut help) = (None, None, None);
        for pair in pairs {
            let slot = if pair.path.is_ident("message") {
                &mut message
            } else if pair.path.is_ident("labels") {
                &mut labels
            } else if pair.path.is_ident("help") {
                &mut help
            } else {
                return Err(syn::Error::new_spanned(pair.path, "expected `message`, `labels`, or `help`"));
            };

            if slot.replace(pair.value).is_some() {
                return Err(syn::Error::new_spanned(pair.path, "duplicate tag"));
            }
        }

        let Some(message) = message else {
            return Err(syn::Error::new_spanned(span_of, "the `error` attribute requires a `message` tag"));
        };
        Ok(Self { message, labels, help })
    }
}

/// A struct deriving `ErrorKind`.
#[derive(Debug)]
pub struct ErrorKindTarget {
    pub name: Ident,
    pub fields: Fields,
    pub tags: ErrorTags,
}

impl ErrorKindTarget {
    /// A statement binding each named field of `self` to a local of the same name, so tag
    /// expressions can refer to fields directly.
    fn bind_fields(&self) -> TokenStream2 {
        let name = &self.name;
        match &self.fields {
            Fields::Named(named) => {
                let idents = named.named.iter().filter_map(|field| field.ident.as_ref());
                quote! { let #name { #(#idents),* } = self; }
            },
            Fields::Unnamed(_) => quote_spanned! {
                name.span() => compile_error!("`ErrorKind` cannot be derived for tuple structs");
            },
            Fields::Unit => TokenStream2::new(),
        }
    }
}

impl Parse for ErrorKindTarget {
    fn parse(input: ParseStream) -> Result<Self> {
        let attrs = input.call(Attribute::parse_outer)?;
        let item = input.parse::<ItemStruct>()?;

        let attr = attrs
            .iter()
            .find(|attr| attr.path().is_ident("error"))
            .ok_or_else(|| syn::Error::new_spanned(&item.ident, "missing `#[error(...)]` attribute"))?;
        let tags = ErrorTags::from_attribute(attr, &item.ident)?;

        Ok(Self {
            name: item.ident,
            fields: item.fields,
            tags,
        })
    }
}

impl ToTokens for ErrorKindTarget {
    fn to_tokens(&self, tokens: &mut TokenStream2) {
        let bind = self.bind_fields();
        let message = &self.tags.message;

        tokens.extend(quote! {
            #[allow(unused_variables)]
            fn message(&self) -> String {
                #bind
                (#message).to_string()
            }
        });

        if let Some(labels) = &self.tags.labels {
            tokens.extend(quote! {
                #[allow(unused_variables)]
                fn labels(&self) -> Vec<String> {
                    #bind
                    #labels.into_iter().map(|label| label.to_string()).collect()
                }
            });
        }

        if let Some(help) = &self.tags.help {
            tokens.extend(quote! {
                #[allow(unused_variables)]
                fn help(&self) -> Option<String> {
                    #bind
                    Some((#help).to_string())
                }
            });
        }
    }
}

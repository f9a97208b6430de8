use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    Data, DeriveInput, Error, ExprClosure, Field, Fields, Ident, LitInt, Pat, Result, Token, Type,
    parse::{Parse, ParseStream},
    spanned::Spanned,
};

pub(crate) fn expand_from_bits(input: &DeriveInput) -> Result<TokenStream> {
    let Data::Struct(data) = &input.data else {
        Err(Error::new(
            input.span(),
            "`FromBits` may only be derived on structs.",
        ))?
    };

    let Fields::Named(fields) = &data.fields else {
        Err(Error::new(
            input.span(),
            "`FromBits` may only be derived on structs with named fields.",
        ))?
    };

    let initialisers = fields
        .named
        .iter()
        .map(|field| FieldMetadata::parse(field)?.initialiser())
        .collect::<Result<Vec<_>>>()?;

    let width = record_width(input)?.map(|width| quote! { const WIDTH: usize = #width; });

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::ais_binary::FromBits for #name #ty_generics #where_clause {
            #width

            #[allow(clippy::identity_op, clippy::redundant_closure_call)]
            fn from_bits(
                bits: &::ais_binary::BitReader<'_>,
                offset: usize,
            ) -> ::core::result::Result<Self, ::ais_binary::RangeError> {
                ::core::result::Result::Ok(Self {
                    #(#initialisers,)*
                })
            }
        }
    };

    Ok(expanded.into())
}

fn record_width(input: &DeriveInput) -> Result<Option<LitInt>> {
    let Some(attr) = input.attrs.iter().find(|a| a.path().is_ident("bits")) else {
        return Ok(None);
    };

    let RecordAttribute { width } = attr.meta.require_list()?.parse_args()?;

    Ok(Some(width))
}

struct RecordAttribute {
    width: LitInt,
}

impl Parse for RecordAttribute {
    fn parse(input: ParseStream) -> Result<Self> {
        let key: Ident = input.parse()?;

        if key != "width" {
            Err(Error::new_spanned(
                key,
                "Struct attribute must have the form `bits(width = N)`.",
            ))?
        }

        input.parse::<Token![=]>()?;

        Ok(RecordAttribute {
            width: input.parse()?,
        })
    }
}

#[derive(Debug)]
struct FieldMetadata {
    name: Ident,
    ty: Type,
    source: Option<Source>,
}

#[derive(Debug)]
enum Source {
    Bits(BitsAttribute),
    Position(PositionAttribute),
}

impl FieldMetadata {
    fn parse(field: &Field) -> Result<Self> {
        let name = field.ident.clone().unwrap();
        let mut source = None;

        for attr in &field.attrs {
            let parsed = if attr.path().is_ident("bits") {
                Source::Bits(attr.meta.require_list()?.parse_args()?)
            } else if attr.path().is_ident("position") {
                Source::Position(attr.meta.require_list()?.parse_args()?)
            } else {
                continue;
            };

            if source.replace(parsed).is_some() {
                Err(Error::new_spanned(
                    attr,
                    "A field may only be read from one location.",
                ))?
            }
        }

        Ok(FieldMetadata {
            name,
            ty: field.ty.clone(),
            source,
        })
    }

    fn initialiser(&self) -> Result<TokenStream2> {
        let name = &self.name;
        let ty = &self.ty;

        let value = match &self.source {
            None => quote! { ::core::default::Default::default() },
            Some(Source::Position(PositionAttribute { offset, extended })) => {
                if *extended {
                    quote! { bits.get_position_28(offset + #offset)? }
                } else {
                    quote! { bits.get_position(offset + #offset)? }
                }
            }
            Some(Source::Bits(BitsAttribute {
                offset,
                width: None,
                ..
            })) => {
                if primitive_name(ty).as_deref() == Some("bool") {
                    quote! { bits.get_bool(offset + #offset)? }
                } else {
                    quote! { <#ty as ::ais_binary::FromBits>::from_bits(bits, offset + #offset)? }
                }
            }
            Some(Source::Bits(BitsAttribute {
                offset,
                width: Some(width),
                handler,
            })) => match handler {
                Some(handler) => {
                    let read = read_primitive(&handler_primitive(handler)?, offset, width)?;
                    quote! { (#handler)(#read) }
                }
                None => read_primitive(ty, offset, width)?,
            },
        };

        Ok(quote! { #name: #value })
    }
}

fn handler_primitive(handler: &ExprClosure) -> Result<Type> {
    let Some(parameter) = handler.inputs.first() else {
        Err(Error::new_spanned(
            handler,
            "Handler closure must have one parameter.",
        ))?
    };

    if handler.inputs.len() != 1 {
        Err(Error::new_spanned(
            &handler.inputs,
            "Handler closure must have one parameter.",
        ))?
    }

    let Pat::Type(pat_type) = parameter else {
        Err(Error::new_spanned(
            parameter,
            "Handler closure's parameter must be annotated with the primitive type to read.",
        ))?
    };

    Ok((*pat_type.ty).clone())
}

fn primitive_name(ty: &Type) -> Option<String> {
    let Type::Path(path) = ty else {
        return None;
    };

    path.path.get_ident().map(ToString::to_string)
}

fn read_primitive(ty: &Type, offset: &LitInt, width: &LitInt) -> Result<TokenStream2> {
    let read = match primitive_name(ty).as_deref() {
        Some("u32") => quote! { bits.get_uint(offset + #offset, #width)? },
        Some("u8" | "u16" | "u64" | "usize") => {
            quote! { bits.get_uint(offset + #offset, #width)? as #ty }
        }
        Some("i32") => quote! { bits.get_int(offset + #offset, #width)? },
        Some("i8" | "i16" | "i64" | "isize") => {
            quote! { bits.get_int(offset + #offset, #width)? as #ty }
        }
        Some("bool") => {
            if width.base10_parse::<usize>()? != 1 {
                Err(Error::new_spanned(width, "Flags must be one bit wide."))?
            }
            quote! { bits.get_bool(offset + #offset)? }
        }
        Some("String") => quote! { bits.get_string(offset + #offset, #width)? },
        _ => Err(Error::new_spanned(
            ty,
            "Field of this type must have a handler closure with a primitive parameter.",
        ))?,
    };

    Ok(read)
}

#[derive(Debug)]
struct BitsAttribute {
    offset: LitInt,
    width: Option<LitInt>,
    handler: Option<ExprClosure>,
}

impl Parse for BitsAttribute {
    fn parse(input: ParseStream) -> Result<Self> {
        let offset = input.parse()?;

        let width = if input.is_empty() {
            None
        } else {
            input.parse::<Token![,]>()?;
            Some(input.parse()?)
        };

        let handler = if input.is_empty() {
            None
        } else {
            input.parse::<Token![,]>()?;
            Some(input.parse()?)
        };

        Ok(BitsAttribute {
            offset,
            width,
            handler,
        })
    }
}

#[derive(Debug)]
struct PositionAttribute {
    offset: LitInt,
    extended: bool,
}

impl Parse for PositionAttribute {
    fn parse(input: ParseStream) -> Result<Self> {
        let offset = input.parse()?;

        let extended = if input.is_empty() {
            false
        } else {
            input.parse::<Token![,]>()?;
            let flag: Ident = input.parse()?;

            if flag != "extended" {
                Err(Error::new_spanned(flag, "Expected `extended`."))?
            }

            true
        };

        Ok(PositionAttribute { offset, extended })
    }
}

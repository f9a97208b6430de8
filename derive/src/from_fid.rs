use std::collections::HashSet;

use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Error, Fields, Ident, LitInt, Result, Type, Variant, spanned::Spanned};

pub(crate) fn expand_from_fid(input: &DeriveInput) -> Result<TokenStream> {
    let Data::Enum(data) = &input.data else {
        Err(Error::new(
            input.span(),
            "`FromFid` may only be derived on enums.",
        ))?
    };

    let variants = data
        .variants
        .iter()
        .map(VariantMetadata::parse)
        .collect::<Result<Vec<_>>>()?;

    let mut seen = HashSet::new();
    for variant in &variants {
        if !seen.insert(variant.fid.base10_parse::<u8>()?) {
            Err(Error::new(
                variant.fid.span(),
                "Functional IDs must be unique.",
            ))?
        }
    }

    let fids = variants.iter().map(|v| &v.fid);

    let cases = variants.iter().map(|VariantMetadata { name, fid, inner }| {
        quote! {
            #fid => ::core::option::Option::Some(
                <#inner as ::ais_binary::FromBits>::from_bits(bits, 0).map(Self::#name)
            ),
        }
    });

    let name = &input.ident;

    let expanded = quote! {
        impl ::ais_binary::FromFid for #name {
            const FIDS: &'static [u8] = &[#(#fids),*];

            fn from_fid(
                fid: u8,
                bits: &::ais_binary::BitReader<'_>,
            ) -> ::core::option::Option<::core::result::Result<Self, ::ais_binary::RangeError>> {
                match fid {
                    #(#cases)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    };

    Ok(expanded.into())
}

struct VariantMetadata {
    name: Ident,
    fid: LitInt,
    inner: Type,
}

impl VariantMetadata {
    fn parse(variant: &Variant) -> Result<Self> {
        let Some(attr) = variant.attrs.iter().find(|a| a.path().is_ident("fid")) else {
            Err(Error::new_spanned(
                &variant.ident,
                "Variant must have a `fid(N)` attribute.",
            ))?
        };

        let fid = attr.meta.require_list()?.parse_args()?;

        let Fields::Unnamed(fields) = &variant.fields else {
            Err(Error::new_spanned(
                variant,
                "Variant must wrap a single layout type.",
            ))?
        };

        let mut fields = fields.unnamed.iter();
        let (Some(field), None) = (fields.next(), fields.next()) else {
            Err(Error::new_spanned(
                variant,
                "Variant must wrap a single layout type.",
            ))?
        };

        Ok(VariantMetadata {
            name: variant.ident.clone(),
            fid,
            inner: field.ty.clone(),
        })
    }
}

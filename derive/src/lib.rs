use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod from_bits;
mod from_fid;

#[proc_macro_derive(FromBits, attributes(bits, position))]
pub fn derive_from_bits(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match from_bits::expand_from_bits(&input) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error().into(),
    }
}

#[proc_macro_derive(FromFid, attributes(fid))]
pub fn derive_from_fid(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match from_fid::expand_from_fid(&input) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error().into(),
    }
}

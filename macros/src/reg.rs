mod emit;
mod layout;

use self::layout::Layout;
use drone_mmio_macros_core::{parse_error, NewRegMod};
use proc_macro::TokenStream;
use syn::parse::{Parse, ParseStream, Result};
use syn::{braced, parse_macro_input, Attribute, Ident, LitInt, Token};

struct Input {
    header: NewRegMod,
    address: LitInt,
    size: LitInt,
    traits: Vec<Ident>,
    fields: Vec<Field>,
}

struct Field {
    attrs: Vec<Attribute>,
    ident: Ident,
    bits: Bits,
    kind: Kind,
}

enum Bits {
    Span { offset: LitInt, width: LitInt },
    Mask(LitInt),
}

enum Kind {
    Flag(Vec<Variant>),
    Mode(Vec<Variant>),
    Value(Ident),
}

struct Variant {
    attrs: Vec<Attribute>,
    ident: Ident,
    index: Option<LitInt>,
}

impl Parse for Input {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        let header = input.parse()?;
        let address = input.parse()?;
        let size = input.parse()?;
        let mut traits = Vec::new();
        while !input.peek(Token![;]) {
            traits.push(input.parse()?);
        }
        input.parse::<Token![;]>()?;
        let mut fields = Vec::new();
        while !input.is_empty() {
            fields.push(input.parse()?);
        }
        Ok(Self { header, address, size, traits, fields })
    }
}

impl Parse for Field {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        let attrs = input.call(Attribute::parse_outer)?;
        let ident = input.parse()?;
        let content;
        braced!(content in input);
        let bits = content.parse()?;
        let kind = content.parse()?;
        Ok(Self { attrs, ident, bits, kind })
    }
}

impl Parse for Bits {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        if input.peek(Ident) {
            let ident = input.parse::<Ident>()?;
            if ident != "mask" {
                parse_error!(ident.span(), "expected an offset or `mask`, found `{}`", ident);
            }
            return Ok(Self::Mask(input.parse()?));
        }
        let offset = input.parse()?;
        let width = input.parse()?;
        Ok(Self::Span { offset, width })
    }
}

impl Parse for Kind {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        let ident = input.parse::<Ident>()?;
        if ident == "value" {
            return Ok(Self::Value(input.parse()?));
        }
        if ident != "flag" && ident != "mode" {
            parse_error!(ident.span(), "expected `flag`, `mode`, or `value`, found `{}`", ident);
        }
        let content;
        braced!(content in input);
        let variants = content
            .parse_terminated::<_, Token![,]>(Variant::parse)?
            .into_iter()
            .collect();
        if ident == "flag" { Ok(Self::Flag(variants)) } else { Ok(Self::Mode(variants)) }
    }
}

impl Parse for Variant {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        let attrs = input.call(Attribute::parse_outer)?;
        let ident = input.parse()?;
        let index = if input.peek(Token![=]) {
            input.parse::<Token![=]>()?;
            Some(input.parse()?)
        } else {
            None
        };
        Ok(Self { attrs, ident, index })
    }
}

pub fn proc_macro(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as Input);
    match Layout::resolve(&input) {
        Ok(layout) => emit::expand(&input, &layout).into(),
        Err(err) => err.to_compile_error().into(),
    }
}

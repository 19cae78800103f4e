use super::{Bits, Field, Input, Kind, Variant};
use drone_mmio_macros_core::{parse_error, parse_int};
use inflector::Inflector;
use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote};
use std::collections::HashSet;
use syn::{Ident, Result};

/// Names generated for every register.
const RESERVED: &[&str] = &["Map", "Reg", "Val", "Hold", "Dyn", "ADDRESS"];

/// Variant generated for the encodings a mode field leaves unnamed.
pub(super) const RESERVED_MODE: &str = "Reserved";

/// Register schema with every number resolved and checked.
pub(super) struct Layout<'a> {
    pub(super) size: u32,
    pub(super) raw: Ident,
    pub(super) access: TokenStream,
    pub(super) fields: Vec<FieldLayout<'a>>,
}

pub(super) struct FieldLayout<'a> {
    pub(super) field: &'a Field,
    /// Lowest bit of the mask.
    pub(super) offset: u32,
    /// Distance from the lowest to the highest bit of the mask.
    pub(super) width: u32,
    /// Bits owned by the field.
    pub(super) mask: u64,
    /// The mask has gaps between `offset` and `offset + width`.
    pub(super) sparse: bool,
    /// Domain type.
    pub(super) ty: Ident,
    /// Field descriptor.
    pub(super) desc: Ident,
    pub(super) kind: KindLayout<'a>,
}

pub(super) enum KindLayout<'a> {
    /// Variants with their bit index inside the field.
    Flag(Vec<(&'a Variant, u32)>),
    /// Variants with their encodings, ordered by encoding. `reserved` is set
    /// when some encodings have no variant.
    Mode { modes: Vec<(&'a Variant, u64)>, reserved: bool },
    /// Scalar type.
    Value(&'a Ident),
}

impl<'a> Layout<'a> {
    #[allow(clippy::cast_possible_truncation)]
    pub(super) fn resolve(input: &'a Input) -> Result<Self> {
        let size = parse_int(&input.size)?;
        let size = match size {
            8 | 16 | 32 | 64 => size as u32,
            _ => parse_error!(input.size.span(), "register size must be 8, 16, 32, or 64 bits"),
        };
        parse_int(&input.address)?;
        let raw = format_ident!("u{}", size);
        let access = access(&input.traits)?;
        let mut names = RESERVED.iter().map(ToString::to_string).collect::<HashSet<_>>();
        let mut fields = Vec::<FieldLayout<'_>>::with_capacity(input.fields.len());
        for field in &input.fields {
            let (offset, width, mask) = bits(field, size)?;
            let sparse = mask != span_mask(offset, width);
            for prev in &fields {
                if mask & prev.mask != 0 {
                    parse_error!(
                        field.ident.span(),
                        "field `{}` overlaps field `{}`",
                        field.ident,
                        prev.field.ident
                    );
                }
            }
            let ty = format_ident!("{}", field.ident.to_string().to_pascal_case());
            let desc = format_ident!("{}Field", ty);
            for name in [&ty, &desc] {
                if !names.insert(name.to_string()) {
                    parse_error!(
                        field.ident.span(),
                        "field `{}` generates the name `{}`, which is already taken",
                        field.ident,
                        name
                    );
                }
            }
            let kind = match &field.kind {
                Kind::Flag(variants) => {
                    KindLayout::Flag(flags(field, variants, width, mask >> offset)?)
                }
                Kind::Mode(_) | Kind::Value(_) if sparse => parse_error!(
                    field.ident.span(),
                    "field `{}` needs a contiguous mask, only flag fields may have gaps",
                    field.ident
                ),
                Kind::Mode(variants) => modes(field, variants, width)?,
                Kind::Value(ty) => KindLayout::Value(value(field, ty, width)?),
            };
            fields.push(FieldLayout { field, offset, width, mask, sparse, ty, desc, kind });
        }
        Ok(Self { size, raw, access, fields })
    }
}

fn access(traits: &[Ident]) -> Result<TokenStream> {
    let mut names = traits.iter().map(ToString::to_string).collect::<Vec<_>>();
    names.sort_unstable();
    let names = names.iter().map(String::as_str).collect::<Vec<_>>();
    match names.as_slice() {
        ["RReg", "WReg"] => Ok(quote!(__rt::Rw)),
        ["RReg", "RoReg"] => Ok(quote!(__rt::Ro)),
        ["WReg", "WoReg"] => Ok(quote!(__rt::Wo)),
        _ => parse_error!(
            traits.first().map_or_else(Span::call_site, Ident::span),
            "expected `RReg WReg`, `RReg RoReg`, or `WReg WoReg`"
        ),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn bits(field: &Field, size: u32) -> Result<(u32, u32, u64)> {
    match &field.bits {
        Bits::Span { offset, width } => {
            let offset = parse_int(offset)?;
            let width = parse_int(width)?;
            if width == 0 || offset.checked_add(width).map_or(true, |end| end > u64::from(size)) {
                parse_error!(field.ident.span(), "field `{}` doesn't fit in the register", field.ident);
            }
            let (offset, width) = (offset as u32, width as u32);
            Ok((offset, width, span_mask(offset, width)))
        }
        Bits::Mask(lit) => {
            let mask = parse_int(lit)?;
            if mask == 0 || size < u64::BITS && mask >> size != 0 {
                parse_error!(lit.span(), "mask of field `{}` doesn't fit in the register", field.ident);
            }
            let offset = mask.trailing_zeros();
            Ok((offset, u64::BITS - mask.leading_zeros() - offset, mask))
        }
    }
}

fn span_mask(offset: u32, width: u32) -> u64 {
    u64::MAX >> (u64::BITS - width) << offset
}

#[allow(clippy::cast_possible_truncation)]
fn flags<'a>(
    field: &Field,
    variants: &'a [Variant],
    width: u32,
    owned: u64,
) -> Result<Vec<(&'a Variant, u32)>> {
    if variants.is_empty() {
        parse_error!(field.ident.span(), "flag field `{}` has no flags", field.ident);
    }
    let width = u64::from(width);
    let owns = |index: u64| index < width && owned >> index & 1 == 1;
    let mut seen = HashSet::new();
    let mut next = 0;
    let mut flags = Vec::with_capacity(variants.len());
    for variant in variants {
        let index = match &variant.index {
            Some(lit) => parse_int(lit)?,
            None => next,
        };
        if index >= width {
            parse_error!(
                variant.ident.span(),
                "flag `{}` is past the end of field `{}`",
                variant.ident,
                field.ident
            );
        }
        if !owns(index) {
            parse_error!(
                variant.ident.span(),
                "flag `{}` falls into a gap of the mask of field `{}`",
                variant.ident,
                field.ident
            );
        }
        if !seen.insert(index) {
            parse_error!(variant.ident.span(), "flag `{}` reuses bit {}", variant.ident, index);
        }
        flags.push((variant, index as u32));
        next = (index + 1..width).find(|&bit| owns(bit)).unwrap_or(width);
    }
    Ok(flags)
}

fn modes<'a>(field: &Field, variants: &'a [Variant], width: u32) -> Result<KindLayout<'a>> {
    if variants.is_empty() {
        parse_error!(field.ident.span(), "mode field `{}` has no modes", field.ident);
    }
    let count = 1_u128 << width;
    let mut seen = HashSet::new();
    let mut next = 0_u64;
    let mut modes = Vec::with_capacity(variants.len());
    for variant in variants {
        if variant.ident == RESERVED_MODE {
            parse_error!(
                variant.ident.span(),
                "`{}` is generated for unnamed encodings, choose another name",
                RESERVED_MODE
            );
        }
        let encoding = match &variant.index {
            Some(lit) => parse_int(lit)?,
            None => next,
        };
        if u128::from(encoding) >= count {
            parse_error!(
                variant.ident.span(),
                "encoding of `{}` doesn't fit in field `{}`",
                variant.ident,
                field.ident
            );
        }
        if !seen.insert(encoding) {
            parse_error!(variant.ident.span(), "mode `{}` reuses encoding {}", variant.ident, encoding);
        }
        modes.push((variant, encoding));
        next = encoding.saturating_add(1);
    }
    modes.sort_by_key(|&(_, encoding)| encoding);
    let reserved = modes.len() as u128 != count;
    Ok(KindLayout::Mode { modes, reserved })
}

fn value<'a>(field: &Field, ty: &'a Ident, width: u32) -> Result<&'a Ident> {
    let bits = match ty.to_string().as_str() {
        "u8" => 8,
        "u16" => 16,
        "u32" => 32,
        "u64" => 64,
        _ => parse_error!(ty.span(), "expected `u8`, `u16`, `u32`, or `u64`, found `{}`", ty),
    };
    if bits < width {
        parse_error!(
            ty.span(),
            "value type `{}` is narrower than field `{}`",
            ty,
            field.ident
        );
    }
    Ok(ty)
}

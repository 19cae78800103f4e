use super::layout::{FieldLayout, KindLayout, Layout, RESERVED_MODE};
use super::Input;
use drone_mmio_macros_core::unkeywordize;
use inflector::Inflector;
use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{Ident, LitInt};

pub(super) fn expand(input: &Input, layout: &Layout<'_>) -> TokenStream {
    let Input { header, address, .. } = input;
    let attrs = &header.attrs;
    let vis = &header.vis;
    let Layout { size, raw, access, fields } = layout;
    let name = format!("{} {}", header.block, header.ident);
    let reg_mod = Ident::new(
        &unkeywordize(format!("{}_{}", header.block, header.ident).to_snake_case().into()),
        header.ident.span(),
    );
    let spans = fields.iter().map(|FieldLayout { field, mask, .. }| {
        let field_name = field.ident.to_string();
        let mask = LitInt::new(&format!("{:#x}_u64", mask), Span::call_site());
        quote!(__rt::FieldSpan::from_mask(#field_name, #mask))
    });
    let map_doc = format!("Field map of the `{}` register.", name);
    let field_tokens = fields.iter().map(|field| expand_field(field, raw));

    quote! {
        #(#attrs)*
        #vis mod #reg_mod {
            use ::drone_mmio::reg as __rt;

            #[doc = #map_doc]
            pub enum Map {}

            impl __rt::RegMap for Map {
                type Raw = #raw;
                type Access = #access;

                const FIELDS: &'static [__rt::FieldSpan] = &[#(#spans),*];
            }

            const _: () = ::core::assert!(__rt::fields_disjoint(
                <Map as __rt::RegMap>::FIELDS,
                #size,
            ));

            /// Memory address of the register.
            pub const ADDRESS: usize = #address;

            #(#attrs)*
            pub struct Reg<I = __rt::DeviceIo> {
                io: I,
            }

            impl<I: __rt::RegIo<#raw>> Reg<I> {
                /// Creates a register token accessing the register through `io`.
                ///
                /// # Safety
                ///
                /// `ADDRESS` must be valid for `io`, and at most one token of
                /// the register may be in use at a time.
                #[inline]
                pub const unsafe fn new(io: I) -> Self {
                    Self { io }
                }

                /// Releases the backend.
                #[inline]
                pub fn into_io(self) -> I {
                    self.io
                }
            }

            impl Reg {
                /// Creates a register token accessing the device memory.
                ///
                /// # Safety
                ///
                /// Must be called on the target device only, and at most one
                /// token of the register may be in use at a time.
                #[inline]
                pub const unsafe fn take() -> Self {
                    Self { io: __rt::DeviceIo }
                }
            }

            impl<I: __rt::RegIo<#raw>> __rt::Reg for Reg<I> {
                type Io = I;
                type Map = Map;

                #[inline(always)]
                fn io(&self) -> &I {
                    &self.io
                }

                #[inline(always)]
                fn address(&self) -> usize {
                    ADDRESS
                }
            }

            impl<I: __rt::RegIo<#raw>> __rt::FixedReg for Reg<I> {
                const ADDRESS: usize = ADDRESS;
            }

            impl<I> ::core::fmt::Debug for Reg<I> {
                fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                    f.debug_tuple(#name)
                        .field(&::core::format_args!("{:#x}", ADDRESS))
                        .finish()
                }
            }

            /// The register at an address chosen at run time.
            pub type Dyn<I = __rt::DeviceIo> = __rt::DynReg<Map, I>;

            /// Detached value of the register.
            pub type Val = __rt::Val<Map>;

            /// Staged value of the register.
            pub type Hold<'a, I = __rt::DeviceIo> = __rt::Hold<'a, Reg<I>>;

            #(#field_tokens)*
        }
    }
}

fn expand_field(layout: &FieldLayout<'_>, raw: &Ident) -> TokenStream {
    let FieldLayout { field, offset, width, mask, sparse, ty, desc, kind } = layout;
    let attrs = &field.attrs;
    let desc_doc = format!("Descriptor of the `{}` field.", field.ident);
    let kind_ty = match kind {
        KindLayout::Flag(_) => quote!(__rt::FlagKind),
        KindLayout::Mode { .. } => quote!(__rt::ModeKind),
        KindLayout::Value(_) => quote!(__rt::ValueKind),
    };
    let domain = match kind {
        KindLayout::Flag(flags) => expand_flag(ty, desc, attrs, flags, raw),
        KindLayout::Mode { modes, reserved } => {
            expand_mode(ty, desc, attrs, modes, *reserved, raw)
        }
        KindLayout::Value(value_ty) => expand_value(ty, desc, attrs, value_ty, raw),
    };
    let mask_fn = sparse.then(|| {
        let mask = raw_lit(*mask, raw);
        quote! {
            #[inline(always)]
            fn mask() -> #raw {
                #mask
            }
        }
    });
    quote! {
        #[doc = #desc_doc]
        pub enum #desc {}

        impl __rt::RegField for #desc {
            type Map = Map;
            type Kind = #kind_ty;

            const OFFSET: u32 = #offset;
            const WIDTH: u32 = #width;

            #mask_fn
        }

        impl __rt::Operand for #ty {
            type Map = Map;

            #[inline]
            fn set_mask(self) -> __rt::BitMask<#raw> {
                __rt::set_mask::<#desc>(__rt::FieldVal::into_bits(self))
            }
        }

        #domain
    }
}

fn expand_flag(
    ty: &Ident,
    desc: &Ident,
    attrs: &[syn::Attribute],
    flags: &[(&super::Variant, u32)],
    raw: &Ident,
) -> TokenStream {
    let variant_attrs = flags.iter().map(|(variant, _)| &variant.attrs).collect::<Vec<_>>();
    let variants = flags.iter().map(|(variant, _)| &variant.ident).collect::<Vec<_>>();
    let masks = flags.iter().map(|&(_, index)| raw_lit(1 << index, raw)).collect::<Vec<_>>();
    quote! {
        #(#attrs)*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum #ty {
            #(
                #(#variant_attrs)*
                #variants,
            )*
        }

        impl __rt::FieldVal for #ty {
            type Field = #desc;

            #[inline]
            fn into_bits(self) -> #raw {
                match self {
                    #(Self::#variants => #masks,)*
                }
            }
        }

        impl __rt::ClearOperand for #ty {
            #[inline]
            fn clear_mask(self) -> __rt::BitMask<#raw> {
                __rt::clear_mask::<#desc>(__rt::FieldVal::into_bits(self))
            }
        }

        impl ::core::ops::BitOr for #ty {
            type Output = __rt::FlagSet<Self>;

            #[inline]
            fn bitor(self, rhs: Self) -> __rt::FlagSet<Self> {
                __rt::FlagSet::from(self).with(rhs)
            }
        }
    }
}

fn expand_mode(
    ty: &Ident,
    desc: &Ident,
    attrs: &[syn::Attribute],
    modes: &[(&super::Variant, u64)],
    reserved: bool,
    raw: &Ident,
) -> TokenStream {
    let variant_attrs = modes.iter().map(|(variant, _)| &variant.attrs).collect::<Vec<_>>();
    let variants = modes.iter().map(|(variant, _)| &variant.ident).collect::<Vec<_>>();
    let encodings = modes.iter().map(|&(_, encoding)| raw_lit(encoding, raw)).collect::<Vec<_>>();
    if reserved {
        let reserved = Ident::new(RESERVED_MODE, Span::call_site());
        return quote! {
            #(#attrs)*
            #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
            pub enum #ty {
                #(
                    #(#variant_attrs)*
                    #variants,
                )*
                /// Encoding with no name, holding the raw field bits.
                #reserved(#raw),
            }

            impl __rt::FieldVal for #ty {
                type Field = #desc;

                #[inline]
                fn into_bits(self) -> #raw {
                    match self {
                        #(Self::#variants => #encodings,)*
                        Self::#reserved(bits) => bits,
                    }
                }
            }

            impl __rt::FieldDecode for #ty {
                #[inline]
                fn from_bits(bits: #raw) -> Self {
                    match bits {
                        #(#encodings => Self::#variants,)*
                        bits => Self::#reserved(bits),
                    }
                }
            }
        };
    }
    // Encodings cover the whole field, the last one takes the wildcard arm.
    let (last, init) = variants.split_last().map_or((None, &[][..]), |(l, i)| (Some(l), i));
    let init_encodings = &encodings[..init.len()];
    quote! {
        #(#attrs)*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum #ty {
            #(
                #(#variant_attrs)*
                #variants,
            )*
        }

        impl __rt::FieldVal for #ty {
            type Field = #desc;

            #[inline]
            fn into_bits(self) -> #raw {
                match self {
                    #(Self::#variants => #encodings,)*
                }
            }
        }

        impl __rt::FieldDecode for #ty {
            #[inline]
            fn from_bits(bits: #raw) -> Self {
                match bits {
                    #(#init_encodings => Self::#init,)*
                    _ => Self::#last,
                }
            }
        }
    }
}

fn expand_value(
    ty: &Ident,
    desc: &Ident,
    attrs: &[syn::Attribute],
    value_ty: &Ident,
    raw: &Ident,
) -> TokenStream {
    quote! {
        #(#attrs)*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct #ty(pub #value_ty);

        impl __rt::FieldVal for #ty {
            type Field = #desc;

            #[inline]
            #[allow(clippy::cast_possible_truncation, clippy::cast_lossless, clippy::unnecessary_cast)]
            fn into_bits(self) -> #raw {
                self.0 as #raw
            }
        }

        impl __rt::FieldDecode for #ty {
            #[inline]
            #[allow(clippy::cast_possible_truncation, clippy::cast_lossless, clippy::unnecessary_cast)]
            fn from_bits(bits: #raw) -> Self {
                Self(bits as #value_ty)
            }
        }

        impl __rt::ClearOperand for #ty {
            #[inline]
            fn clear_mask(self) -> __rt::BitMask<#raw> {
                __rt::clear_mask::<#desc>(__rt::FieldVal::into_bits(self))
            }
        }

        impl ::core::convert::From<#value_ty> for #ty {
            #[inline]
            fn from(value: #value_ty) -> Self {
                Self(value)
            }
        }

        impl ::core::convert::From<#ty> for #value_ty {
            #[inline]
            fn from(value: #ty) -> Self {
                value.0
            }
        }
    }
}

fn raw_lit(value: u64, raw: &Ident) -> LitInt {
    LitInt::new(&format!("{:#x}_{}", value, raw), Span::call_site())
}

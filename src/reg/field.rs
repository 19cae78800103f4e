use super::{RegMap, RegRaw};
use core::fmt;

/// Disambiguation for `RegField::Map::Raw`.
pub type FieldRaw<F> = <<F as RegField>::Map as RegMap>::Raw;

/// Pending change of register bits.
///
/// Applying the mask to a value first clears the `clear` bits, then sets the
/// `set` bits. Every field operation reduces to one of these.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BitMask<R: RegRaw> {
    /// Bits to clear.
    pub clear: R,
    /// Bits to set.
    pub set: R,
}

impl<R: RegRaw> BitMask<R> {
    /// A mask that changes nothing.
    pub const EMPTY: Self = Self { clear: R::ZERO, set: R::ZERO };

    /// Creates a new mask.
    #[inline]
    pub const fn new(clear: R, set: R) -> Self {
        Self { clear, set }
    }

    /// Applies the mask to `raw`.
    #[inline]
    pub fn apply(self, raw: R) -> R {
        raw & !self.clear | self.set
    }

    /// Returns a mask equivalent to applying `self`, then `next`.
    #[inline]
    #[must_use]
    pub fn merge(self, next: Self) -> Self {
        Self {
            clear: self.clear | next.clear,
            set: self.set & !next.clear | next.set,
        }
    }

    /// Checks whether `raw` already holds the result of this mask.
    #[inline]
    pub fn matches(self, raw: R) -> bool {
        raw & (self.clear | self.set) == self.set
    }
}

impl<R: RegRaw> fmt::Debug for BitMask<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitMask")
            .field("clear", &format_args!("{:#x}", self.clear))
            .field("set", &format_args!("{:#x}", self.set))
            .finish()
    }
}

/// Kind of a register field. Defines how a value is stored into the field.
pub trait FieldKind: 'static {
    /// Computes the mask storing `bits` into the field occupying `field`.
    ///
    /// `bits` are already shifted into the field position.
    fn set_mask<R: RegRaw>(field: R, bits: R) -> BitMask<R>;
}

/// Field kind that supports clearing.
pub trait ClearKind: FieldKind {
    /// Computes the mask clearing `bits` from the field occupying `field`.
    fn clear_mask<R: RegRaw>(field: R, bits: R) -> BitMask<R>;
}

/// Field kind that decodes into a single scalar.
pub trait DecodeKind: FieldKind {}

/// Each bit of the field is an independent flag.
#[derive(Debug)]
pub enum FlagKind {}

/// The field holds exactly one value out of an enumerated domain. A mode can't
/// be cleared, it always holds some value.
#[derive(Debug)]
pub enum ModeKind {}

/// The field holds an arbitrary scalar. Clearing zeroes the field.
#[derive(Debug)]
pub enum ValueKind {}

impl FieldKind for FlagKind {
    #[inline(always)]
    fn set_mask<R: RegRaw>(field: R, bits: R) -> BitMask<R> {
        BitMask::new(R::ZERO, bits & field)
    }
}

impl ClearKind for FlagKind {
    #[inline(always)]
    fn clear_mask<R: RegRaw>(field: R, bits: R) -> BitMask<R> {
        BitMask::new(bits & field, R::ZERO)
    }
}

impl FieldKind for ModeKind {
    #[inline(always)]
    fn set_mask<R: RegRaw>(field: R, bits: R) -> BitMask<R> {
        BitMask::new(field, bits & field)
    }
}

impl DecodeKind for ModeKind {}

impl FieldKind for ValueKind {
    #[inline(always)]
    fn set_mask<R: RegRaw>(field: R, bits: R) -> BitMask<R> {
        BitMask::new(field, bits & field)
    }
}

impl ClearKind for ValueKind {
    #[inline(always)]
    fn clear_mask<R: RegRaw>(field: R, _bits: R) -> BitMask<R> {
        BitMask::new(field, R::ZERO)
    }
}

impl DecodeKind for ValueKind {}

/// Register field descriptor.
///
/// Describes one named portion of a register's bits. Types which implement
/// this trait should be zero-sized and are never instantiated.
pub trait RegField: Sized + 'static {
    /// Register the field belongs to.
    type Map: RegMap;

    /// Kind of the field.
    type Kind: FieldKind;

    /// Position of the lowest bit of the field.
    const OFFSET: u32;

    /// Number of bits from the lowest to the highest bit of the field.
    const WIDTH: u32;

    /// Returns the bits owned by the field.
    ///
    /// Defaults to `WIDTH` adjacent bits starting at `OFFSET`. Flag fields
    /// with gaps between their bits override it with an explicit mask.
    #[inline(always)]
    fn mask() -> FieldRaw<Self> {
        <FieldRaw<Self> as RegRaw>::field_mask(Self::OFFSET, Self::WIDTH)
    }
}

/// A value of the symbolic domain of exactly one field.
pub trait FieldVal: Copy {
    /// Field owning the domain.
    type Field: RegField;

    /// Encodes the value relative to the field's lowest bit.
    ///
    /// Flags encode to their single-bit mask, modes and values to the scalar
    /// stored in the field.
    fn into_bits(self) -> FieldRaw<Self::Field>;
}

/// A value which can be decoded back from its field.
///
/// Only meaningful for fields of a [`DecodeKind`].
pub trait FieldDecode: FieldVal {
    /// Decodes the value from `bits`, already shifted down to the field's
    /// lowest bit and truncated to the field width.
    fn from_bits(bits: FieldRaw<Self::Field>) -> Self;
}

/// Computes the mask storing `bits` into the field `F`.
#[inline(always)]
pub fn set_mask<F: RegField>(bits: FieldRaw<F>) -> BitMask<FieldRaw<F>> {
    F::Kind::set_mask(F::mask(), bits << F::OFFSET)
}

/// Computes the mask clearing `bits` from the field `F`.
#[inline(always)]
pub fn clear_mask<F>(bits: FieldRaw<F>) -> BitMask<FieldRaw<F>>
where
    F: RegField,
    F::Kind: ClearKind,
{
    F::Kind::clear_mask(F::mask(), bits << F::OFFSET)
}

/// Decodes a value of the field owning `V` from the register value `raw`.
#[inline(always)]
pub fn decode<V>(raw: FieldRaw<V::Field>) -> V
where
    V: FieldDecode,
    <V::Field as RegField>::Kind: DecodeKind,
{
    V::from_bits((raw & V::Field::mask()) >> V::Field::OFFSET)
}

use super::{set_mask, BitMask, FieldRaw, FieldVal, FlagKind, MapRaw, RegField, RegMap, RegRaw};
use core::fmt;
use core::marker::PhantomData;
use core::ops::BitOr;

/// Argument of a `set` operation.
///
/// The operand statically resolves to the field (or fields) owning its type,
/// so passing a value of another register is a type error.
pub trait Operand: Sized {
    /// Register the operand belongs to.
    type Map: RegMap;

    /// Computes the mask storing the operand.
    fn set_mask(self) -> BitMask<MapRaw<Self::Map>>;
}

/// Argument of a `clear` operation.
///
/// Not implemented for modes, a mode always holds some value.
pub trait ClearOperand: Operand {
    /// Computes the mask clearing the operand.
    fn clear_mask(self) -> BitMask<MapRaw<Self::Map>>;
}

/// A value of a flag field.
///
/// Implemented for every [`FieldVal`] of a [`FlagKind`] field.
pub trait Flag: Copy {
    /// The flag field.
    type FlagField: RegField<Kind = FlagKind>;

    /// Returns the single-bit mask of the flag relative to the field.
    fn flag_bits(self) -> FieldRaw<Self::FlagField>;
}

impl<V> Flag for V
where
    V: FieldVal,
    V::Field: RegField<Kind = FlagKind>,
{
    type FlagField = V::Field;

    #[inline(always)]
    fn flag_bits(self) -> FieldRaw<V::Field> {
        self.into_bits()
    }
}

/// A set of flags of one flag field, built with the `|` operator.
pub struct FlagSet<F: Flag> {
    bits: FieldRaw<F::FlagField>,
    flag: PhantomData<F>,
}

impl<F: Flag> FlagSet<F> {
    /// Creates an empty set.
    #[inline]
    pub fn empty() -> Self {
        Self { bits: RegRaw::ZERO, flag: PhantomData }
    }

    /// Adds `flag` to the set.
    #[inline]
    #[must_use]
    pub fn with(self, flag: F) -> Self {
        Self { bits: self.bits | flag.flag_bits(), flag: PhantomData }
    }

    /// Checks whether the set contains `flag`.
    #[inline]
    pub fn contains(&self, flag: F) -> bool {
        let bits = flag.flag_bits();
        self.bits & bits == bits
    }

    /// Returns `true` if the set is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_zero()
    }

    /// Returns the combined bits relative to the field's lowest bit.
    #[inline]
    pub fn bits(&self) -> FieldRaw<F::FlagField> {
        self.bits
    }
}

impl<F: Flag> Clone for FlagSet<F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F: Flag> Copy for FlagSet<F> {}

impl<F: Flag> PartialEq for FlagSet<F> {
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits
    }
}

impl<F: Flag> Eq for FlagSet<F> {}

impl<F: Flag> Default for FlagSet<F> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<F: Flag> fmt::Debug for FlagSet<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FlagSet").field(&format_args!("{:#b}", self.bits.to_u64())).finish()
    }
}

impl<F: Flag> From<F> for FlagSet<F> {
    #[inline]
    fn from(flag: F) -> Self {
        Self::empty().with(flag)
    }
}

impl<F: Flag> FromIterator<F> for FlagSet<F> {
    fn from_iter<T: IntoIterator<Item = F>>(iter: T) -> Self {
        iter.into_iter().fold(Self::empty(), Self::with)
    }
}

impl<F: Flag> BitOr<F> for FlagSet<F> {
    type Output = Self;

    #[inline]
    fn bitor(self, flag: F) -> Self {
        self.with(flag)
    }
}

impl<F: Flag> BitOr for FlagSet<F> {
    type Output = Self;

    #[inline]
    fn bitor(self, other: Self) -> Self {
        Self { bits: self.bits | other.bits, flag: PhantomData }
    }
}

impl<F: Flag> Operand for FlagSet<F> {
    type Map = <F::FlagField as RegField>::Map;

    #[inline]
    fn set_mask(self) -> BitMask<MapRaw<Self::Map>> {
        set_mask::<F::FlagField>(self.bits)
    }
}

impl<F: Flag> ClearOperand for FlagSet<F> {
    #[inline]
    fn clear_mask(self) -> BitMask<MapRaw<Self::Map>> {
        super::clear_mask::<F::FlagField>(self.bits)
    }
}

impl<F: Flag, const N: usize> Operand for [F; N] {
    type Map = <F::FlagField as RegField>::Map;

    #[inline]
    fn set_mask(self) -> BitMask<MapRaw<Self::Map>> {
        self.into_iter().collect::<FlagSet<F>>().set_mask()
    }
}

impl<F: Flag, const N: usize> ClearOperand for [F; N] {
    #[inline]
    fn clear_mask(self) -> BitMask<MapRaw<Self::Map>> {
        self.into_iter().collect::<FlagSet<F>>().clear_mask()
    }
}

impl<F: Flag> Operand for &[F] {
    type Map = <F::FlagField as RegField>::Map;

    #[inline]
    fn set_mask(self) -> BitMask<MapRaw<Self::Map>> {
        self.iter().copied().collect::<FlagSet<F>>().set_mask()
    }
}

impl<F: Flag> ClearOperand for &[F] {
    #[inline]
    fn clear_mask(self) -> BitMask<MapRaw<Self::Map>> {
        self.iter().copied().collect::<FlagSet<F>>().clear_mask()
    }
}

macro_rules! tuple_operand {
    ($head:ident $(, $tail:ident)*) => {
        impl<$head: Operand, $($tail: Operand<Map = $head::Map>),*> Operand for ($head, $($tail),*) {
            type Map = $head::Map;

            #[inline]
            #[allow(non_snake_case)]
            fn set_mask(self) -> BitMask<MapRaw<Self::Map>> {
                let ($head, $($tail),*) = self;
                $head.set_mask()$(.merge($tail.set_mask()))*
            }
        }

        impl<$head: ClearOperand, $($tail: ClearOperand<Map = $head::Map>),*> ClearOperand
            for ($head, $($tail),*)
        {
            #[inline]
            #[allow(non_snake_case)]
            fn clear_mask(self) -> BitMask<MapRaw<Self::Map>> {
                let ($head, $($tail),*) = self;
                $head.clear_mask()$(.merge($tail.clear_mask()))*
            }
        }
    };
}

tuple_operand!(A, B);
tuple_operand!(A, B, C);
tuple_operand!(A, B, C, D);

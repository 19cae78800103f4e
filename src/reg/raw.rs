use core::fmt::{Debug, LowerHex};
use core::hash::Hash;
use core::ops::{BitAnd, BitOr, Not, Shl, Shr, Sub};

/// Backing integer of a register.
pub trait RegRaw
where
    Self: Sized
        + Debug
        + LowerHex
        + Copy
        + Default
        + Eq
        + Hash
        + Send
        + Sync
        + Not<Output = Self>
        + Sub<Output = Self>
        + BitOr<Output = Self>
        + BitAnd<Output = Self>
        + Shl<u32, Output = Self>
        + Shr<u32, Output = Self>
        + 'static,
{
    /// All bits cleared.
    const ZERO: Self;

    /// The value of one.
    const ONE: Self;

    /// Width of the type in bits.
    const WIDTH: u32;

    /// Widens the value to `u64`.
    fn to_u64(self) -> u64;

    /// Returns `true` if all bits are zeros.
    #[inline]
    fn is_zero(self) -> bool {
        self == Self::ZERO
    }

    /// Returns a mask of `width` adjacent set bits starting at `offset`.
    ///
    /// `offset + width` must not exceed [`WIDTH`](RegRaw::WIDTH).
    #[inline]
    fn field_mask(offset: u32, width: u32) -> Self {
        if width == Self::WIDTH {
            !Self::ZERO
        } else {
            ((Self::ONE << width) - Self::ONE) << offset
        }
    }
}

macro_rules! reg_raw {
    ($type:ty) => {
        impl RegRaw for $type {
            const ZERO: Self = 0;
            const ONE: Self = 1;
            const WIDTH: u32 = <$type>::BITS;

            #[inline(always)]
            fn to_u64(self) -> u64 {
                self as u64
            }
        }
    };
}

reg_raw!(u8);
reg_raw!(u16);
reg_raw!(u32);
reg_raw!(u64);

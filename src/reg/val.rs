use super::{decode, ClearOperand, DecodeKind, FieldDecode, MapRaw, Operand, RegField, RegMap};
use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;

/// Local copy of a register value.
///
/// All field operations run against the local bits only. The register
/// operations and [`Hold`](super::Hold) build on top of this type, so eager
/// and staged modifications produce identical bits.
pub struct Val<M: RegMap> {
    raw: MapRaw<M>,
    map: PhantomData<M>,
}

impl<M: RegMap> Val<M> {
    /// Creates a value with all bits cleared.
    #[inline]
    pub fn zero() -> Self {
        Self::from_raw(<MapRaw<M> as super::RegRaw>::ZERO)
    }

    /// Creates a value from raw bits.
    #[inline]
    pub fn from_raw(raw: MapRaw<M>) -> Self {
        Self { raw, map: PhantomData }
    }

    /// Returns the raw bits.
    #[inline]
    pub fn raw(&self) -> MapRaw<M> {
        self.raw
    }

    /// Stores the operand into the corresponding field(s).
    #[inline]
    pub fn set<O: Operand<Map = M>>(&mut self, operand: O) -> &mut Self {
        self.raw = operand.set_mask().apply(self.raw);
        self
    }

    /// Clears the operand from the corresponding field(s).
    #[inline]
    pub fn clear<O: ClearOperand<Map = M>>(&mut self, operand: O) -> &mut Self {
        self.raw = operand.clear_mask().apply(self.raw);
        self
    }

    /// Decodes the mode or value of the field owning `V`.
    #[inline]
    pub fn get<V>(&self) -> V
    where
        V: FieldDecode,
        V::Field: RegField<Map = M>,
        <V::Field as RegField>::Kind: DecodeKind,
    {
        decode::<V>(self.raw)
    }

    /// Checks whether the value already holds the operand.
    ///
    /// For flags, checks that every given flag is set. For modes and values,
    /// checks that the field holds exactly the given value.
    #[inline]
    pub fn is_set<O: Operand<Map = M>>(&self, operand: O) -> bool {
        operand.set_mask().matches(self.raw)
    }
}

impl<M: RegMap> Clone for Val<M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: RegMap> Copy for Val<M> {}

impl<M: RegMap> PartialEq for Val<M> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<M: RegMap> Eq for Val<M> {}

impl<M: RegMap> Hash for Val<M> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl<M: RegMap> Default for Val<M> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<M: RegMap> fmt::Debug for Val<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Val").field(&format_args!("{:#x}", self.raw)).finish()
    }
}

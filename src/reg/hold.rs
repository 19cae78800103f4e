use super::{
    ClearOperand, DecodeKind, FieldDecode, MapRaw, Operand, RReg, Reg, RegField, Val, WReg,
};
use core::fmt;

/// A staged register value holding the register reference.
///
/// Field edits touch the local copy only. Nothing reaches the hardware until
/// [`write`](Hold::write) is called.
#[must_use = "a staged value does nothing until written"]
pub struct Hold<'a, R: Reg> {
    reg: &'a R,
    val: Val<R::Map>,
}

impl<'a, R: Reg> Hold<'a, R> {
    /// Binds `val` to `reg`.
    #[inline]
    pub fn new(reg: &'a R, val: Val<R::Map>) -> Self {
        Self { reg, val }
    }

    /// Returns the register the value is staged for.
    #[inline]
    pub fn reg(&self) -> &'a R {
        self.reg
    }

    /// Returns the local value.
    #[inline]
    pub fn val(&self) -> Val<R::Map> {
        self.val
    }

    /// Returns the local raw bits.
    #[inline]
    pub fn raw(&self) -> MapRaw<R::Map> {
        self.val.raw()
    }

    /// Stores the operand into the local copy.
    #[inline]
    pub fn set<O: Operand<Map = R::Map>>(mut self, operand: O) -> Self {
        self.val.set(operand);
        self
    }

    /// Clears the operand from the local copy.
    #[inline]
    pub fn clear<O: ClearOperand<Map = R::Map>>(mut self, operand: O) -> Self {
        self.val.clear(operand);
        self
    }

    /// Decodes a mode or value from the local copy.
    #[inline]
    pub fn get<V>(&self) -> V
    where
        V: FieldDecode,
        V::Field: RegField<Map = R::Map>,
        <V::Field as RegField>::Kind: DecodeKind,
    {
        self.val.get()
    }

    /// Checks the operand against the local copy.
    #[inline]
    pub fn is_set<O: Operand<Map = R::Map>>(&self, operand: O) -> bool {
        self.val.is_set(operand)
    }
}

impl<'a, R: WReg> Hold<'a, R> {
    /// Writes the local copy to the register with a single write.
    ///
    /// The staged value stays usable and can be written again.
    #[inline]
    pub fn write(&self) -> &Self {
        self.reg.store_val(self.val);
        self
    }
}

impl<'a, R: RReg> Hold<'a, R> {
    /// Reads a fresh snapshot of the register, discarding local edits.
    #[inline]
    pub fn read(&self) -> Self {
        self.reg.read()
    }
}

impl<R: Reg> Clone for Hold<'_, R> {
    fn clone(&self) -> Self {
        Self { reg: self.reg, val: self.val }
    }
}

impl<R: Reg> fmt::Debug for Hold<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hold")
            .field("address", &format_args!("{:#x}", self.reg.address()))
            .field("val", &format_args!("{:#x}", self.val.raw()))
            .finish()
    }
}

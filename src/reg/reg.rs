use super::{
    BitMask, ClearOperand, DecodeKind, FieldDecode, Hold, MapRaw, Operand, RAccess, RegField,
    RegIo, RegMap, RegRaw, Val, WAccess, WoAccess,
};

/// Disambiguation for `Reg::Map::Access`.
pub type RegAccessOf<R> = <<R as Reg>::Map as RegMap>::Access;

/// Memory-mapped register binding.
///
/// Binds a [`RegMap`] to an IO backend and an address. The capabilities of
/// the register ([`RReg`], [`WReg`], [`RwReg`], [`WoReg`]) follow from the
/// access tag of the map and are implemented automatically.
pub trait Reg: Sized {
    /// Fields of the register.
    type Map: RegMap;

    /// Backend performing the accesses.
    type Io: RegIo<MapRaw<Self::Map>>;

    /// Returns the backend.
    fn io(&self) -> &Self::Io;

    /// Returns the address passed to the backend.
    fn address(&self) -> usize;
}

/// Register with an address known at compile time.
pub trait FixedReg: Reg {
    /// Address of the register.
    const ADDRESS: usize;
}

/// Register that can read its value.
pub trait RReg: Reg {
    /// Reads the raw register value. Exactly one read.
    #[inline]
    fn load_raw(&self) -> MapRaw<Self::Map> {
        unsafe { self.io().read(self.address()) }
    }

    /// Reads the register value. Exactly one read.
    #[inline]
    fn load_val(&self) -> Val<Self::Map> {
        Val::from_raw(self.load_raw())
    }

    /// Reads the register and decodes a mode or value.
    #[inline]
    fn get<V>(&self) -> V
    where
        V: FieldDecode,
        V::Field: RegField<Map = Self::Map>,
        <V::Field as RegField>::Kind: DecodeKind,
    {
        self.load_val().get()
    }

    /// Reads the register and checks whether it holds the operand.
    #[inline]
    fn is_set<O: Operand<Map = Self::Map>>(&self, operand: O) -> bool {
        self.load_val().is_set(operand)
    }

    /// Reads the register into a staged value.
    #[inline]
    fn read(&self) -> Hold<'_, Self> {
        Hold::new(self, self.load_val())
    }
}

impl<T> RReg for T
where
    T: Reg,
    RegAccessOf<T>: RAccess,
{
}

/// Register that can write its value.
pub trait WReg: Reg {
    /// Writes the raw register value. Exactly one write.
    #[inline]
    fn store_raw(&self, raw: MapRaw<Self::Map>) {
        unsafe { self.io().write(self.address(), raw) };
    }

    /// Writes the register value. Exactly one write.
    #[inline]
    fn store_val(&self, val: Val<Self::Map>) {
        self.store_raw(val.raw());
    }

    /// Creates a zeroed staged value without touching the hardware.
    #[inline]
    fn new_val(&self) -> Hold<'_, Self> {
        Hold::new(self, Val::zero())
    }

    /// Builds a value from zero with `f` and writes it. Exactly one write.
    #[inline]
    fn write<F>(&self, f: F)
    where
        F: FnOnce(&mut Val<Self::Map>) -> &mut Val<Self::Map>,
    {
        let mut val = Val::zero();
        f(&mut val);
        self.store_val(val);
    }
}

impl<T> WReg for T
where
    T: Reg,
    RegAccessOf<T>: WAccess,
{
}

/// Register that can read and write its value.
///
/// Every operation is one read followed by one write, except
/// [`clear_all`](RwReg::clear_all), which writes without reading. Nothing
/// protects the sequence against concurrent writers.
pub trait RwReg: RReg + WReg {
    /// Applies `mask` with one read and one write.
    #[inline]
    fn apply(&self, mask: BitMask<MapRaw<Self::Map>>) {
        self.store_raw(mask.apply(self.load_raw()));
    }

    /// Stores the operand into its field(s).
    ///
    /// Flags are ORed in. Modes and values replace the field's bits.
    #[inline]
    fn set<O: Operand<Map = Self::Map>>(&self, operand: O) {
        self.apply(operand.set_mask());
    }

    /// Clears the operand from its field(s).
    ///
    /// Flags are ANDed out. Values zero the field.
    #[inline]
    fn clear<O: ClearOperand<Map = Self::Map>>(&self, operand: O) {
        self.apply(operand.clear_mask());
    }

    /// Writes zero to the whole register.
    #[inline]
    fn clear_all(&self) {
        self.store_raw(<MapRaw<Self::Map> as RegRaw>::ZERO);
    }

    /// Reads the register, updates the value with `f`, and writes it back.
    #[inline]
    fn modify<F>(&self, f: F)
    where
        F: FnOnce(&mut Val<Self::Map>) -> &mut Val<Self::Map>,
    {
        let mut val = self.load_val();
        f(&mut val);
        self.store_val(val);
    }
}

impl<T: RReg + WReg> RwReg for T {}

/// Write-only register.
pub trait WoReg: WReg {
    /// Writes the operand over a zeroed value. Exactly one write, no read.
    #[inline]
    fn set_wo<O: Operand<Map = Self::Map>>(&self, operand: O) {
        self.store_raw(operand.set_mask().apply(<MapRaw<Self::Map> as RegRaw>::ZERO));
    }
}

impl<T> WoReg for T
where
    T: WReg,
    RegAccessOf<T>: WoAccess,
{
}

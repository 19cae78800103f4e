use super::{DeviceIo, MapRaw, Reg, RegIo, RegMap};
use core::fmt;
use core::marker::PhantomData;

/// Register with an address chosen at run time.
///
/// Has the same capabilities as a fixed register of the same map.
pub struct DynReg<M: RegMap, I = DeviceIo> {
    io: I,
    address: usize,
    map: PhantomData<M>,
}

impl<M: RegMap, I: RegIo<MapRaw<M>>> DynReg<M, I> {
    /// Binds the map `M` to `address`.
    ///
    /// # Safety
    ///
    /// `address` must be valid for reads and writes of `M::Raw` through `io`
    /// for the whole lifetime of the register, and nothing else may own the
    /// same register.
    #[inline]
    pub const unsafe fn new(io: I, address: usize) -> Self {
        Self { io, address, map: PhantomData }
    }

    /// Binds the map `M` to the register of the peripheral number `index`
    /// in an array of peripherals `stride` bytes apart.
    ///
    /// # Safety
    ///
    /// See [`DynReg::new`].
    #[inline]
    pub const unsafe fn strided(io: I, base: usize, stride: usize, index: usize) -> Self {
        unsafe { Self::new(io, base + stride * index) }
    }

    /// Releases the backend.
    #[inline]
    pub fn into_io(self) -> I {
        self.io
    }
}

impl<M: RegMap, I: RegIo<MapRaw<M>>> Reg for DynReg<M, I> {
    type Io = I;
    type Map = M;

    #[inline(always)]
    fn io(&self) -> &I {
        &self.io
    }

    #[inline(always)]
    fn address(&self) -> usize {
        self.address
    }
}

impl<M: RegMap, I> fmt::Debug for DynReg<M, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DynReg").field(&format_args!("{:#x}", self.address)).finish()
    }
}

/// `COUNT` identical registers placed `STRIDE` bytes apart.
pub struct RegArray<M: RegMap, I, const COUNT: usize, const STRIDE: usize> {
    io: I,
    base: usize,
    map: PhantomData<M>,
}

impl<M, I, const COUNT: usize, const STRIDE: usize> RegArray<M, I, COUNT, STRIDE>
where
    M: RegMap,
    I: RegIo<MapRaw<M>>,
{
    /// Number of registers in the array.
    pub const LEN: usize = COUNT;

    /// Creates the array starting at `base`.
    ///
    /// # Safety
    ///
    /// Every address `base + STRIDE * index` for `index < COUNT` must be
    /// valid for reads and writes of `M::Raw` through `io`.
    #[inline]
    pub const unsafe fn new(io: I, base: usize) -> Self {
        Self { io, base, map: PhantomData }
    }

    /// Returns the register number `index`, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, index: usize) -> Option<DynReg<M, &I>> {
        (index < COUNT).then(|| unsafe { DynReg::strided(&self.io, self.base, STRIDE, index) })
    }

    /// Returns the register number `index`.
    ///
    /// # Panics
    ///
    /// If `index` is out of bounds.
    #[inline]
    pub fn index(&self, index: usize) -> DynReg<M, &I> {
        match self.get(index) {
            Some(reg) => reg,
            None => panic!("register index {index} out of bounds for an array of {COUNT}"),
        }
    }

    /// Iterates over all registers in order.
    pub fn iter(&self) -> impl Iterator<Item = DynReg<M, &I>> + '_ {
        (0..COUNT).map(move |index| unsafe { DynReg::strided(&self.io, self.base, STRIDE, index) })
    }
}

impl<M: RegMap, I, const COUNT: usize, const STRIDE: usize> fmt::Debug
    for RegArray<M, I, COUNT, STRIDE>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegArray")
            .field("base", &format_args!("{:#x}", self.base))
            .field("count", &COUNT)
            .field("stride", &STRIDE)
            .finish()
    }
}

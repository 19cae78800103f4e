//! Backends performing the actual register accesses.

use super::RegRaw;
use core::cell::Cell;
use core::fmt;
use core::mem::size_of;
use core::ptr::{read_volatile, write_volatile};

/// Reads and writes register-sized integers at addresses.
pub trait RegIo<R: RegRaw> {
    /// Reads the integer at `address`.
    ///
    /// # Safety
    ///
    /// `address` must be valid for a read of `R` in this backend.
    unsafe fn read(&self, address: usize) -> R;

    /// Writes `raw` to `address`.
    ///
    /// # Safety
    ///
    /// `address` must be valid for a write of `R` in this backend.
    unsafe fn write(&self, address: usize, raw: R);
}

impl<R: RegRaw, T: RegIo<R> + ?Sized> RegIo<R> for &T {
    #[inline(always)]
    unsafe fn read(&self, address: usize) -> R {
        unsafe { (**self).read(address) }
    }

    #[inline(always)]
    unsafe fn write(&self, address: usize, raw: R) {
        unsafe { (**self).write(address, raw) }
    }
}

/// Memory-mapped hardware backend.
///
/// Each access is a single volatile load or store of the register width, never
/// elided, merged, or reordered with other volatile accesses.
#[derive(Clone, Copy, Debug, Default)]
pub struct DeviceIo;

impl<R: RegRaw> RegIo<R> for DeviceIo {
    #[inline(always)]
    unsafe fn read(&self, address: usize) -> R {
        unsafe { read_volatile(address as *const R) }
    }

    #[inline(always)]
    unsafe fn write(&self, address: usize, raw: R) {
        unsafe { write_volatile(address as *mut R, raw) };
    }
}

/// Backend for one instance out of an array of identical peripherals.
///
/// An incoming register address is treated as an offset inside the peripheral
/// block and translated to `base + offset + stride * index`.
#[derive(Clone, Copy, Debug)]
pub struct StridedIo<I> {
    io: I,
    base: usize,
    stride: usize,
    index: usize,
}

impl<I> StridedIo<I> {
    /// Creates a backend for the peripheral number `index`.
    #[inline]
    pub const fn new(io: I, base: usize, stride: usize, index: usize) -> Self {
        Self { io, base, stride, index }
    }

    /// Returns the base address of the selected peripheral.
    #[inline]
    pub const fn block_address(&self) -> usize {
        self.base + self.stride * self.index
    }

    /// Returns the peripheral number.
    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Translates a register offset into the address passed to the inner
    /// backend.
    #[inline]
    pub const fn translate(&self, offset: usize) -> usize {
        self.block_address() + offset
    }
}

impl<R: RegRaw, I: RegIo<R>> RegIo<R> for StridedIo<I> {
    #[inline(always)]
    unsafe fn read(&self, address: usize) -> R {
        unsafe { self.io.read(self.translate(address)) }
    }

    #[inline(always)]
    unsafe fn write(&self, address: usize, raw: R) {
        unsafe { self.io.write(self.translate(address), raw) };
    }
}

/// In-memory backend.
///
/// Holds `N` cells of type `R` mapped at consecutive addresses starting at
/// `base`. Every access through [`RegIo`] is counted, which lets tests check
/// how many bus transactions an operation performs. Useful for host-side
/// simulation of a peripheral.
pub struct MemIo<R: RegRaw, const N: usize> {
    base: usize,
    cells: [Cell<R>; N],
    reads: Cell<usize>,
    writes: Cell<usize>,
}

impl<R: RegRaw, const N: usize> MemIo<R, N> {
    /// Creates a zero-filled memory window starting at `base`.
    pub fn new(base: usize) -> Self {
        Self {
            base,
            cells: [(); N].map(|()| Cell::new(R::ZERO)),
            reads: Cell::new(0),
            writes: Cell::new(0),
        }
    }

    /// Returns the first address of the window.
    pub fn base(&self) -> usize {
        self.base
    }

    /// Returns the value at `address` without counting an access.
    ///
    /// # Panics
    ///
    /// If `address` is outside the window or not aligned to `R`.
    pub fn peek(&self, address: usize) -> R {
        self.cell(address).get()
    }

    /// Stores `raw` at `address` without counting an access.
    ///
    /// # Panics
    ///
    /// If `address` is outside the window or not aligned to `R`.
    pub fn poke(&self, address: usize, raw: R) {
        self.cell(address).set(raw);
    }

    /// Number of reads performed through [`RegIo`].
    pub fn reads(&self) -> usize {
        self.reads.get()
    }

    /// Number of writes performed through [`RegIo`].
    pub fn writes(&self) -> usize {
        self.writes.get()
    }

    /// Resets both access counters to zero.
    pub fn reset_counters(&self) {
        self.reads.set(0);
        self.writes.set(0);
    }

    fn cell(&self, address: usize) -> &Cell<R> {
        let offset = address.checked_sub(self.base).unwrap_or_else(|| {
            panic!("address {address:#x} is below the window base {:#x}", self.base)
        });
        assert!(
            offset % size_of::<R>() == 0,
            "address {address:#x} is not aligned to {} bytes",
            size_of::<R>()
        );
        let index = offset / size_of::<R>();
        self.cells.get(index).unwrap_or_else(|| {
            panic!("address {address:#x} is past the end of a {N}-cell window")
        })
    }
}

impl<R: RegRaw, const N: usize> RegIo<R> for MemIo<R, N> {
    unsafe fn read(&self, address: usize) -> R {
        self.reads.set(self.reads.get() + 1);
        self.peek(address)
    }

    unsafe fn write(&self, address: usize, raw: R) {
        self.writes.set(self.writes.get() + 1);
        self.poke(address, raw);
    }
}

impl<R: RegRaw, const N: usize> fmt::Debug for MemIo<R, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemIo")
            .field("base", &format_args!("{:#x}", self.base))
            .field("cells", &N)
            .field("reads", &self.reads.get())
            .field("writes", &self.writes.get())
            .finish()
    }
}

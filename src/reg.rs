//! Memory-mapped registers.
//!
//! A register is a backing integer at an address, split into named fields.
//! Each field is one of three kinds:
//!
//! * **flag** - every bit is an independent on/off switch;
//! * **mode** - the field holds exactly one value out of an enumerated set;
//! * **value** - the field holds an arbitrary scalar.
//!
//! Every symbolic value belongs to exactly one field of exactly one register,
//! so `set` and `clear` resolve the target field from the argument type alone.
//! Using a value of another register, clearing a mode, writing a read-only
//! register, or reading a write-only one doesn't compile.
//!
//! # Mappings
//!
//! ```
//! use drone_mmio::reg::prelude::*;
//! use drone_mmio::reg::MemIo;
//!
//! drone_mmio::reg! {
//!     /// Timer control register.
//!     pub mod TIM CR1;
//!     0x4000_0000 32 RReg WReg; // address, bit size, access
//!
//!     /// Interrupt enables.
//!     IE { 0 3 flag { Update, Trigger, Break = 2 } }
//!     /// Counter direction.
//!     DIR { 4 1 mode { Up, Down } }
//!     /// Prescaler.
//!     PSC { 8 8 value u8 }
//! }
//!
//! use tim_cr1::{Dir, Ie, Psc};
//!
//! fn main() {
//!     let io = MemIo::<u32, 1>::new(tim_cr1::ADDRESS);
//!     let cr1 = unsafe { tim_cr1::Reg::new(&io) };
//!
//!     // One read and one write per call.
//!     cr1.set(Ie::Update | Ie::Break);
//!     cr1.set(Dir::Down);
//!     cr1.clear(Ie::Update);
//!     assert_eq!(io.peek(tim_cr1::ADDRESS), 0b1_0100);
//!
//!     // Several edits committed with one write.
//!     cr1.read().set(Psc(24)).set(Dir::Up).write();
//!     assert_eq!(cr1.get::<Psc>(), Psc(24));
//!     assert_eq!(cr1.get::<Dir>(), Dir::Up);
//!     assert!(cr1.is_set(Ie::Break));
//! }
//! ```
//!
//! A field may list its bits as an explicit mask instead of an offset and a
//! width. Flag fields may have gaps in the mask, left for other fields:
//!
//! ```text
//! IE { mask 0b1001 flag { Rx, Tx } } // Rx is bit 0, Tx is bit 3
//! PRIO { 1 2 value u8 }
//! ```
//!
//! A mode field which doesn't name every encoding of its width gets an extra
//! `Reserved` variant carrying the raw field bits.

pub mod io;
pub mod prelude;

mod dyn_reg;
mod field;
mod hold;
mod map;
mod operand;
mod raw;
#[allow(clippy::module_inception)]
mod reg;
mod tag;
mod val;

pub use self::{
    dyn_reg::*,
    field::*,
    hold::*,
    io::{DeviceIo, MemIo, RegIo, StridedIo},
    map::*,
    operand::*,
    raw::*,
    reg::*,
    tag::*,
    val::*,
};

mod compile_tests {
    //! ```compile_fail
    //! use drone_mmio::reg::prelude::*;
    //! drone_mmio::reg! {
    //!     pub mod TST TST_MODE;
    //!     0xDEAD_BEEF 32 RReg WReg;
    //!     MODE { 0 1 mode { Off, On } }
    //! }
    //! fn main() {
    //!     let reg = unsafe { tst_tst_mode::Reg::take() };
    //!     reg.clear(tst_tst_mode::Mode::On);
    //! }
    //! ```
    //!
    //! ```compile_fail
    //! use drone_mmio::reg::prelude::*;
    //! drone_mmio::reg! {
    //!     pub mod TST TST_A;
    //!     0xDEAD_BEEF 32 RReg WReg;
    //!     EN { 0 1 flag { On } }
    //! }
    //! drone_mmio::reg! {
    //!     pub mod TST TST_B;
    //!     0xDEAD_BEF0 32 RReg WReg;
    //!     EN { 0 1 flag { On } }
    //! }
    //! fn main() {
    //!     let reg = unsafe { tst_tst_a::Reg::take() };
    //!     reg.set(tst_tst_b::En::On);
    //! }
    //! ```
    //!
    //! ```compile_fail
    //! use drone_mmio::reg::prelude::*;
    //! drone_mmio::reg! {
    //!     pub mod TST TST_RO_REG;
    //!     0xDEAD_BEEF 32 RReg RoReg;
    //!     EN { 0 1 flag { On } }
    //! }
    //! fn main() {
    //!     let reg = unsafe { tst_tst_ro_reg::Reg::take() };
    //!     reg.set(tst_tst_ro_reg::En::On);
    //! }
    //! ```
    //!
    //! ```compile_fail
    //! use drone_mmio::reg::prelude::*;
    //! drone_mmio::reg! {
    //!     pub mod TST TST_RO_REG;
    //!     0xDEAD_BEEF 32 RReg RoReg;
    //!     EN { 0 1 flag { On } }
    //! }
    //! fn main() {
    //!     let reg = unsafe { tst_tst_ro_reg::Reg::take() };
    //!     reg.clear_all();
    //! }
    //! ```
    //!
    //! ```compile_fail
    //! use drone_mmio::reg::prelude::*;
    //! drone_mmio::reg! {
    //!     pub mod TST TST_WO_REG;
    //!     0xDEAD_BEEF 32 WReg WoReg;
    //!     EN { 0 1 flag { On } }
    //! }
    //! fn main() {
    //!     let reg = unsafe { tst_tst_wo_reg::Reg::take() };
    //!     reg.is_set(tst_tst_wo_reg::En::On);
    //! }
    //! ```
    //!
    //! ```compile_fail
    //! use drone_mmio::reg::prelude::*;
    //! drone_mmio::reg! {
    //!     pub mod TST TST_WO_REG;
    //!     0xDEAD_BEEF 32 WReg WoReg;
    //!     EN { 0 1 flag { On } }
    //! }
    //! fn main() {
    //!     let reg = unsafe { tst_tst_wo_reg::Reg::take() };
    //!     reg.set(tst_tst_wo_reg::En::On);
    //! }
    //! ```
    //!
    //! ```compile_fail
    //! use drone_mmio::reg::prelude::*;
    //! drone_mmio::reg! {
    //!     pub mod TST TST_WO_REG;
    //!     0xDEAD_BEEF 32 WReg WoReg;
    //!     EN { 0 1 flag { On } }
    //! }
    //! fn main() {
    //!     let reg = unsafe { tst_tst_wo_reg::Reg::take() };
    //!     let _ = reg.read();
    //! }
    //! ```
    //!
    //! ```compile_fail
    //! use drone_mmio::reg::prelude::*;
    //! drone_mmio::reg! {
    //!     pub mod TST TST_WO_REG;
    //!     0xDEAD_BEEF 32 WReg WoReg;
    //!     CODE { 0 4 value u8 }
    //! }
    //! fn main() {
    //!     let reg = unsafe { tst_tst_wo_reg::Reg::take() };
    //!     let _: tst_tst_wo_reg::Code = reg.get();
    //! }
    //! ```
    //!
    //! ```compile_fail
    //! use drone_mmio::reg::prelude::*;
    //! drone_mmio::reg! {
    //!     pub mod TST TST_RO_REG;
    //!     0xDEAD_BEEF 32 RReg RoReg;
    //!     EN { 0 1 flag { On } }
    //! }
    //! fn main() {
    //!     let reg = unsafe { tst_tst_ro_reg::Reg::take() };
    //!     reg.clear(tst_tst_ro_reg::En::On);
    //! }
    //! ```
    //!
    //! ```
    //! use drone_mmio::reg::prelude::*;
    //! drone_mmio::reg! {
    //!     pub mod TST TST_WO_REG;
    //!     0xDEAD_BEEF 32 WReg WoReg;
    //!     EN { 0 1 flag { On } }
    //! }
    //! fn assert_wo_reg<T: WoReg>() {}
    //! fn main() {
    //!     assert_wo_reg::<tst_tst_wo_reg::Reg>();
    //! }
    //! ```
    //!
    //! ```compile_fail
    //! drone_mmio::reg! {
    //!     pub mod TST TST_OVERLAP;
    //!     0xDEAD_BEEF 32 RReg WReg;
    //!     LOW { 0 4 value u8 }
    //!     HIGH { 3 4 value u8 }
    //! }
    //! fn main() {}
    //! ```
    //!
    //! ```compile_fail
    //! drone_mmio::reg! {
    //!     pub mod TST TST_WIDE;
    //!     0xDEAD_BEEF 8 RReg WReg;
    //!     PSC { 4 8 value u8 }
    //! }
    //! fn main() {}
    //! ```
    //!
    //! ```compile_fail
    //! drone_mmio::reg! {
    //!     pub mod TST TST_MODE;
    //!     0xDEAD_BEEF 32 RReg WReg;
    //!     MODE { mask 0b101 mode { A, B, C, D } }
    //! }
    //! fn main() {}
    //! ```
    //!
    //! ```compile_fail
    //! drone_mmio::reg! {
    //!     pub mod TST TST_MODE;
    //!     0xDEAD_BEEF 32 RReg WReg;
    //!     MODE { 0 2 mode { A, B, Reserved } }
    //! }
    //! fn main() {}
    //! ```
    //!
    //! ```compile_fail
    //! drone_mmio::reg! {
    //!     pub mod TST TST_GAP;
    //!     0xDEAD_BEEF 32 RReg WReg;
    //!     IRQ { mask 0b1001 flag { A, B = 1 } }
    //! }
    //! fn main() {}
    //! ```
    //!
    //! ```compile_fail
    //! drone_mmio::reg! {
    //!     pub mod TST TST_GAP;
    //!     0xDEAD_BEEF 32 RReg WReg;
    //!     IRQ { mask 0b1001 flag { A, B } }
    //!     MID { 1 3 value u8 }
    //! }
    //! fn main() {}
    //! ```
    //!
    //! ```compile_fail
    //! drone_mmio::reg! {
    //!     pub mod TST TST_VALUE;
    //!     0xDEAD_BEEF 32 RReg WReg;
    //!     ARR { 0 16 value u8 }
    //! }
    //! fn main() {}
    //! ```
    //!
    //! ```compile_fail
    //! use drone_mmio::reg::prelude::*;
    //! drone_mmio::reg! {
    //!     pub mod TST TST_FLAGS;
    //!     0xDEAD_BEEF 32 RReg WReg;
    //!     EN { 0 1 flag { On } }
    //! }
    //! fn main() {
    //!     let reg = unsafe { tst_tst_flags::Reg::take() };
    //!     let _: tst_tst_flags::En = reg.get();
    //! }
    //! ```
    //!
    //! ```compile_fail
    //! #![deny(unused_must_use)]
    //! use drone_mmio::reg::prelude::*;
    //! drone_mmio::reg! {
    //!     pub mod TST TST_HOLD;
    //!     0xDEAD_BEEF 32 RReg WReg;
    //!     EN { 0 1 flag { On } }
    //! }
    //! fn main() {
    //!     let reg = unsafe { tst_tst_hold::Reg::take() };
    //!     reg.new_val().set(tst_tst_hold::En::On);
    //! }
    //! ```
}

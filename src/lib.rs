//! Type-checked access to memory-mapped registers.
//!
//! Register layouts are declared with the [`reg!`] macro. Each declaration
//! produces a zero-sized register token and one symbolic type per field, so
//! operations like `set(Mode::Fast)` or `clear(Flag::Enable | Flag::Irq)`
//! resolve to the right bits at compile time and compile down to a single
//! read-modify-write.
//!
//! See the [`reg`](mod@reg) module for an overview.
//!
//! # Features
//!
//! * `std` - links the standard library and implements `std::error::Error`
//!   for [`reg::FieldError`].

#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]
#![warn(clippy::pedantic)]
#![allow(clippy::inline_always, clippy::module_name_repetitions, clippy::must_use_candidate)]
#![no_std]

#[cfg(any(test, feature = "std"))]
extern crate std;

extern crate self as drone_mmio;

pub mod reg;

/// Defines a memory-mapped register.
///
/// See [the module level documentation](mod@reg) for details.
#[doc(inline)]
pub use drone_mmio_macros::reg;

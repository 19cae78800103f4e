//! Procedural macros base for drone-mmio.
//!
//! This crate provides shared functionality for the `reg!` macro of
//! drone-mmio.

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod macros;
mod new_reg_mod;
mod parse_int;
mod unkeywordize;

pub use self::{new_reg_mod::NewRegMod, parse_int::parse_int, unkeywordize::unkeywordize};

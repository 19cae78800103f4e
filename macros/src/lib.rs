//! Procedural macros for drone-mmio.
//!
//! **NOTE** This crate is not intended to be used directly. Use the re-exports
//! from `drone-mmio` instead.

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

extern crate proc_macro;

mod reg;

use proc_macro::TokenStream;

#[proc_macro]
pub fn reg(input: TokenStream) -> TokenStream {
    reg::proc_macro(input)
}

use syn::{LitInt, Result};

/// Parses an unsuffixed integer literal, accepting any radix Rust accepts.
pub fn parse_int(lit: &LitInt) -> Result<u64> {
    if !lit.suffix().is_empty() {
        return Err(syn::Error::new(lit.span(), "expected an unsuffixed integer"));
    }
    lit.base10_parse()
}

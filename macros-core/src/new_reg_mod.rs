use syn::parse::{Parse, ParseStream, Result};
use syn::{Attribute, Ident, Token, Visibility};

/// Register module header: `pub mod BLOCK NAME;`.
#[allow(missing_docs)]
pub struct NewRegMod {
    pub attrs: Vec<Attribute>,
    pub vis: Visibility,
    pub block: Ident,
    pub ident: Ident,
}

impl Parse for NewRegMod {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        let attrs = input.call(Attribute::parse_outer)?;
        let vis = input.parse()?;
        input.parse::<Token![mod]>()?;
        let block = input.parse()?;
        let ident = input.parse()?;
        input.parse::<Token![;]>()?;
        Ok(Self { attrs, vis, block, ident })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_header() {
        let header = syn::parse_str::<NewRegMod>("/// Docs.\npub mod TIM CR1;").unwrap();
        assert_eq!(header.attrs.len(), 1);
        assert!(matches!(header.vis, Visibility::Public(_)));
        assert_eq!(header.block, "TIM");
        assert_eq!(header.ident, "CR1");
    }

    #[test]
    fn missing_name() {
        assert!(syn::parse_str::<NewRegMod>("pub mod TIM;").is_err());
    }
}

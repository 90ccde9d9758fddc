use std::fmt;

use serde::{Deserialize, Serialize};

/// Bangladeshi taka, the symbol a fresh form starts with.
pub const DEFAULT_CURRENCY_SYMBOL: char = '৳';

/// A single-glyph currency symbol placed in front of every formatted amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencySymbol(char);

impl CurrencySymbol {
    pub const fn new(symbol: char) -> Self {
        Self(symbol)
    }

    pub fn as_char(&self) -> char {
        self.0
    }

    /// Reads a symbol from a raw field value.
    ///
    /// Surrounding whitespace is ignored and only the first glyph is kept.
    /// Returns `None` for an empty value.
    pub fn parse(s: &str) -> Option<Self> {
        s.trim().chars().next().map(Self)
    }
}

impl Default for CurrencySymbol {
    fn default() -> Self {
        Self(DEFAULT_CURRENCY_SYMBOL)
    }
}

impl fmt::Display for CurrencySymbol {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for CurrencySymbol {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| "currency symbol must not be empty".to_string())
    }
}

impl From<CurrencySymbol> for String {
    fn from(symbol: CurrencySymbol) -> Self {
        symbol.0.to_string()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_is_taka() {
        assert_eq!(CurrencySymbol::default().as_char(), '৳');
    }

    #[test]
    fn parse_keeps_first_glyph_only() {
        assert_eq!(CurrencySymbol::parse(" $ "), Some(CurrencySymbol::new('$')));
        assert_eq!(CurrencySymbol::parse("€uro"), Some(CurrencySymbol::new('€')));
    }

    #[test]
    fn parse_rejects_blank_values() {
        assert_eq!(CurrencySymbol::parse(""), None);
        assert_eq!(CurrencySymbol::parse("   "), None);
    }

    #[test]
    fn display_writes_the_glyph() {
        assert_eq!(CurrencySymbol::new('£').to_string(), "£");
    }
}

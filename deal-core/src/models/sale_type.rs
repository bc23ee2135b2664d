use serde::{Deserialize, Serialize};

/// Whether the sale is taxed (retail) or untaxed (wholesale).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SaleType {
    #[default]
    Retail,
    Wholesale,
}

impl SaleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Retail => "retail",
            Self::Wholesale => "wholesale",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "retail" | "r" => Some(Self::Retail),
            "wholesale" | "w" => Some(Self::Wholesale),
            _ => None,
        }
    }

    pub fn is_taxable(&self) -> bool {
        matches!(self, Self::Retail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_codes_and_names() {
        assert_eq!(SaleType::parse("Retail"), Some(SaleType::Retail));
        assert_eq!(SaleType::parse("w"), Some(SaleType::Wholesale));
        assert_eq!(SaleType::parse("lease"), None);
    }

    #[test]
    fn only_retail_is_taxable() {
        assert!(SaleType::Retail.is_taxable());
        assert!(!SaleType::Wholesale.is_taxable());
    }
}

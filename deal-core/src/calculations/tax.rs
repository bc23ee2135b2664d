//! Sales tax for vehicle deals.
//!
//! | Line         | Retail                              | Wholesale |
//! |--------------|-------------------------------------|-----------|
//! | State tax    | sales price × state rate, truncated | 0         |
//! | Business tax | sales price × B&O rate, truncated   | 0         |
//! | Local tax    | flat amount                         | 0         |
//!
//! Truncation toward zero is contractual; never round these lines.
//!
//! # Example
//!
//! ```
//! use deal_core::calculations::{TaxEngine, TaxRates};
//! use deal_core::{Money, SaleType};
//!
//! let rates = TaxRates::default();
//! let taxes = TaxEngine::new(&rates).calculate(SaleType::Retail, Money::from_major_minor(10000, 0));
//!
//! assert_eq!(taxes.state_tax, Money::from_major_minor(734, 60));
//! assert_eq!(taxes.business_tax, Money::from_major_minor(30, 45));
//! assert_eq!(taxes.local_tax, Money::from_major_minor(44, 0));
//! ```

use rust_decimal::Decimal;

use crate::calculations::TaxRates;
use crate::calculations::common::scale_truncated;
use crate::{Money, SaleType, TaxBreakdown};

/// Computes the tax lines for a sale.
#[derive(Debug, Clone)]
pub struct TaxEngine<'a> {
    rates: &'a TaxRates,
}

impl<'a> TaxEngine<'a> {
    pub fn new(rates: &'a TaxRates) -> Self {
        Self { rates }
    }

    /// Returns the tax breakdown for `sales_price`.
    pub fn calculate(
        &self,
        sale_type: SaleType,
        sales_price: Money,
    ) -> TaxBreakdown {
        if !sale_type.is_taxable() {
            return TaxBreakdown::default();
        }

        TaxBreakdown {
            state_tax: self.rate_line(sales_price, self.rates.state_rate),
            local_tax: self.rates.local_tax,
            business_tax: self.rate_line(sales_price, self.rates.business_rate),
        }
    }

    fn rate_line(
        &self,
        sales_price: Money,
        rate: Decimal,
    ) -> Money {
        scale_truncated(sales_price, rate, Decimal::ONE)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn retail(price: Money) -> TaxBreakdown {
        let rates = TaxRates::default();
        TaxEngine::new(&rates).calculate(SaleType::Retail, price)
    }

    #[test]
    fn retail_state_tax_on_ten_thousand() {
        let taxes = retail(Money::from_major_minor(10000, 0));

        assert_eq!(taxes.state_tax, Money::from_major_minor(734, 60));
    }

    #[test]
    fn retail_taxes_on_twenty_thousand() {
        let taxes = retail(Money::from_major_minor(20000, 0));

        assert_eq!(taxes.state_tax, Money::from_major_minor(1469, 20));
        assert_eq!(taxes.business_tax, Money::from_major_minor(60, 90));
        assert_eq!(taxes.local_tax, Money::from_major_minor(44, 0));
        assert_eq!(taxes.total(), Money::from_major_minor(1574, 10));
    }

    #[test]
    fn state_tax_truncates_where_rounding_would_go_up() {
        // 10006.80 × 0.07346 = 735.0995... rounds to 735.10, truncates to 735.09
        let taxes = retail(Money::from_major_minor(10006, 80));

        assert_eq!(taxes.state_tax, Money::from_major_minor(735, 9));
    }

    #[test]
    fn business_tax_truncates_where_rounding_would_go_up() {
        // 1999.99 × 0.003045 = 6.08996... rounds to 6.09, truncates to 6.08
        let taxes = retail(Money::from_major_minor(1999, 99));

        assert_eq!(taxes.business_tax, Money::from_major_minor(6, 8));
    }

    #[test]
    fn wholesale_has_no_taxes() {
        let rates = TaxRates::default();
        let engine = TaxEngine::new(&rates);

        for price in [0, 1, 999_999, 2_000_000, 123_456_789] {
            let taxes = engine.calculate(SaleType::Wholesale, Money::from_cents(price));
            assert_eq!(taxes, TaxBreakdown::default());
        }
    }

    #[test]
    fn retail_zero_price_still_owes_local_tax() {
        let taxes = retail(Money::ZERO);

        assert_eq!(taxes.state_tax, Money::ZERO);
        assert_eq!(taxes.business_tax, Money::ZERO);
        assert_eq!(taxes.local_tax, Money::from_major_minor(44, 0));
    }

    #[test]
    fn custom_rates_are_applied() {
        let rates = TaxRates {
            state_rate: dec!(0.065),
            business_rate: Decimal::ZERO,
            local_tax: Money::ZERO,
        };
        let taxes = TaxEngine::new(&rates).calculate(SaleType::Retail, Money::from_major_minor(15999, 99));

        // 15999.99 × 0.065 = 1039.99935
        assert_eq!(taxes.state_tax, Money::from_major_minor(1039, 99));
        assert_eq!(taxes.total(), Money::from_major_minor(1039, 99));
    }
}

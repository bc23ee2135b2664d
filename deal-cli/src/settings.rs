//! Desk settings loaded from a TOML file.
//!
//! Every section and key is optional; anything left out keeps its default.
//!
//! ```toml
//! [fees]
//! doc_fee = 299.00
//! title_fee = 139.50
//!
//! [calculator.tax]
//! state_rate = 0.07346
//! business_rate = 0.003045
//! local_tax = 44.00
//!
//! [calculator.limits]
//! max_search_iterations = 100
//! max_periods = 1000
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use deal_core::Money;
use deal_core::calculations::{CalculatorConfig, CalculatorConfigError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read settings file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid calculator settings: {0}")]
    Calculator(#[from] CalculatorConfigError),

    #[error("{name} must be non-negative, got {value}")]
    NegativeFee { name: &'static str, value: Money },
}

/// Fees filled in when the command line leaves them out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeDefaults {
    pub doc_fee: Money,
    pub title_fee: Money,
}

impl Default for FeeDefaults {
    fn default() -> Self {
        Self {
            doc_fee: Money::from_major_minor(299, 0),
            title_fee: Money::from_major_minor(139, 50),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub fees: FeeDefaults,
    pub calculator: CalculatorConfig,
}

impl Settings {
    /// Parses and validates settings from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads settings from `path`.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), ?settings, "loaded settings");
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        for (name, value) in [
            ("doc_fee", self.fees.doc_fee),
            ("title_fee", self.fees.title_fee),
        ] {
            if value.is_negative() {
                return Err(SettingsError::NegativeFee { name, value });
            }
        }
        self.calculator.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deal_core::calculations::{DEFAULT_MAX_PERIODS, TaxRates};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn empty_file_gives_defaults() {
        let settings = Settings::from_toml_str("").unwrap();

        assert_eq!(settings, Settings::default());
        assert_eq!(settings.fees.doc_fee, Money::from_major_minor(299, 0));
        assert_eq!(settings.fees.title_fee, Money::from_major_minor(139, 50));
        assert_eq!(settings.calculator.tax, TaxRates::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let settings = Settings::from_toml_str(
            r#"
            [fees]
            doc_fee = 150

            [calculator.tax]
            state_rate = "0.065"
            "#,
        )
        .unwrap();

        assert_eq!(settings.fees.doc_fee, Money::from_major_minor(150, 0));
        assert_eq!(settings.fees.title_fee, Money::from_major_minor(139, 50));
        assert_eq!(settings.calculator.tax.state_rate, dec!(0.065));
        assert_eq!(settings.calculator.tax.business_rate, dec!(0.003045));
        assert_eq!(settings.calculator.limits.max_periods, DEFAULT_MAX_PERIODS);
    }

    #[test]
    fn invalid_limits_are_rejected() {
        let err = Settings::from_toml_str("[calculator.limits]\nmax_periods = 0\n").unwrap_err();

        assert!(matches!(
            err,
            SettingsError::Calculator(CalculatorConfigError::ZeroMaxPeriods)
        ));
    }

    #[test]
    fn negative_fee_is_rejected() {
        let err = Settings::from_toml_str("[fees]\ntitle_fee = \"-1.00\"\n").unwrap_err();

        assert!(matches!(
            err,
            SettingsError::NegativeFee {
                name: "title_fee",
                ..
            }
        ));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = Settings::from_toml_str("[fees\n").unwrap_err();

        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Settings::load(Path::new("/nonexistent/deal-desk.toml")).unwrap_err();

        assert!(err.to_string().contains("/nonexistent/deal-desk.toml"));
    }
}

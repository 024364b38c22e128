//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CHAAT_CART_DIR` - Directory holding the stored cart (default: `.chaat-cart`)
//! - `CHAAT_DELIVERY_FEE` - Flat delivery fee in dollars (default: 3.99)
//! - `CHAAT_TAX_RATE` - Tax rate as a fraction (default: 0.08)

use std::path::PathBuf;

use chaat_cart_core::{Price, Pricing};
use rust_decimal::Decimal;
use thiserror::Error;

const DEFAULT_CART_DIR: &str = ".chaat-cart";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Directory the file-backed store writes into
    pub cart_dir: PathBuf,
    /// Delivery fee and tax rate
    pub pricing: Pricing,
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let cart_dir = lookup("CHAAT_CART_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_CART_DIR), PathBuf::from);

        let defaults = Pricing::default();
        let delivery_fee = match lookup("CHAAT_DELIVERY_FEE") {
            Some(raw) => Price::parse(&raw).map_err(|e| {
                ConfigError::InvalidEnvVar("CHAAT_DELIVERY_FEE".to_string(), e.to_string())
            })?,
            None => defaults.delivery_fee,
        };
        let tax_rate = match lookup("CHAAT_TAX_RATE") {
            Some(raw) => parse_rate(&raw)
                .map_err(|e| ConfigError::InvalidEnvVar("CHAAT_TAX_RATE".to_string(), e))?,
            None => defaults.tax_rate,
        };

        Ok(Self {
            cart_dir,
            pricing: Pricing {
                delivery_fee,
                tax_rate,
            },
        })
    }
}

/// Parse a tax rate between 0 and 1.
fn parse_rate(raw: &str) -> Result<Decimal, String> {
    let rate: Decimal = raw.trim().parse().map_err(|e| format!("{e}"))?;
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(format!("must be between 0 and 1 (got {rate})"));
    }
    Ok(rate)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<CliConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        CliConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.cart_dir, PathBuf::from(".chaat-cart"));
        assert_eq!(config.pricing, Pricing::default());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("CHAAT_CART_DIR", "/tmp/carts"),
            ("CHAAT_DELIVERY_FEE", "5"),
            ("CHAAT_TAX_RATE", "0.13"),
        ])
        .unwrap();
        assert_eq!(config.cart_dir, PathBuf::from("/tmp/carts"));
        assert_eq!(config.pricing.delivery_fee, Price::from_cents(500));
        assert_eq!(config.pricing.tax_rate, Decimal::new(13, 2));
    }

    #[test]
    fn test_blank_dir_uses_default() {
        let config = load(&[("CHAAT_CART_DIR", "  ")]).unwrap();
        assert_eq!(config.cart_dir, PathBuf::from(".chaat-cart"));
    }

    #[test]
    fn test_invalid_delivery_fee() {
        let err = load(&[("CHAAT_DELIVERY_FEE", "-1")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref name, _) if name == "CHAAT_DELIVERY_FEE"));
    }

    #[test]
    fn test_invalid_tax_rate() {
        assert!(load(&[("CHAAT_TAX_RATE", "eight")]).is_err());
        assert!(load(&[("CHAAT_TAX_RATE", "8")]).is_err());
    }
}

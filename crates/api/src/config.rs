//! Application configuration loaded from environment variables.

use common::Money;
use domain::FreeShippingAbove;
use services::CheckoutSettings;

const DEFAULT_ORIGIN_ZIP: &str = "01000-000";
const DEFAULT_CARD_APPROVAL_RATE: f64 = 0.9;

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST`: bind address (default: `"0.0.0.0"`)
/// - `PORT`: listen port (default: `3000`)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `ORIGIN_ZIP`: ZIP code shipments leave from (default: `"01000-000"`)
/// - `FREE_SHIPPING_THRESHOLD_CENTS`: order value for free shipping (default: `10000`)
/// - `CARD_APPROVAL_RATE`: acquirer approval probability in `[0, 1]` (default: `0.9`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub origin_zip: String,
    pub free_shipping_threshold: Money,
    pub card_approval_rate: f64,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            log_level: std::env::var("RUST_LOG").unwrap_or(defaults.log_level),
            origin_zip: std::env::var("ORIGIN_ZIP").unwrap_or(defaults.origin_zip),
            free_shipping_threshold: std::env::var("FREE_SHIPPING_THRESHOLD_CENTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|cents: &i64| *cents >= 0)
                .map(Money::from_cents)
                .unwrap_or(defaults.free_shipping_threshold),
            card_approval_rate: std::env::var("CARD_APPROVAL_RATE")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|rate: &f64| (0.0..=1.0).contains(rate))
                .unwrap_or(defaults.card_approval_rate),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn checkout_settings(&self) -> CheckoutSettings {
        CheckoutSettings {
            origin_zip: self.origin_zip.clone(),
            free_shipping_threshold: self.free_shipping_threshold,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            origin_zip: DEFAULT_ORIGIN_ZIP.to_string(),
            free_shipping_threshold: FreeShippingAbove::DEFAULT_THRESHOLD,
            card_approval_rate: DEFAULT_CARD_APPROVAL_RATE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.origin_zip, "01000-000");
        assert_eq!(config.free_shipping_threshold, Money::from_cents(10000));
        assert_eq!(config.card_approval_rate, 0.9);
    }

    #[test]
    fn test_addr_formatting() {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 8080,
            ..Config::default()
        };
        assert_eq!(config.addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_checkout_settings() {
        let config = Config {
            origin_zip: "30100-000".to_string(),
            free_shipping_threshold: Money::from_reais(250),
            ..Config::default()
        };
        let settings = config.checkout_settings();
        assert_eq!(settings.origin_zip, "30100-000");
        assert_eq!(settings.free_shipping_threshold, Money::from_reais(250));
    }
}

//! Storefront configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use eshop_commerce::cart::{ShippingPolicy, CART_KEY};
use eshop_commerce::{Currency, Money};
use eshop_observability::LoggingConfig;
use serde::{Deserialize, Serialize};

use crate::ShopError;

/// Default catalog endpoint.
pub const DEFAULT_BASE_URL: &str = "https://dummyjson.com";

/// File names searched for when no config path is given.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["eshop.toml", ".eshop.toml", "eshop.json"];

/// Storefront configuration file. Every field has a default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShopConfig {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub pricing: PricingConfig,

    #[serde(default)]
    pub home: HomeConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ShopConfig {
    /// Load config from a TOML or JSON file, chosen by extension.
    pub fn load(path: &Path) -> Result<Self, ShopError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ShopError::Config(format!("Failed to read {}: {}", path.display(), e)))?;

        let config: ShopConfig = if path.extension().map_or(false, |e| e == "json") {
            serde_json::from_str(&content)
                .map_err(|e| ShopError::Config(format!("Failed to parse JSON config {}: {}", path.display(), e)))?
        } else {
            toml::from_str(&content)
                .map_err(|e| ShopError::Config(format!("Failed to parse TOML config {}: {}", path.display(), e)))?
        };
        config.validate()?;
        Ok(config)
    }

    /// Walk up from `start` looking for a config file.
    pub fn discover(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            for name in CONFIG_FILE_NAMES {
                let candidate = current.join(name);
                if candidate.is_file() {
                    return Some(candidate);
                }
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Serialize as TOML.
    pub fn to_toml(&self) -> Result<String, ShopError> {
        toml::to_string_pretty(self).map_err(|e| ShopError::Config(e.to_string()))
    }

    /// Check values that deserialize fine but make no sense.
    pub fn validate(&self) -> Result<(), ShopError> {
        if self.api.timeout_secs == 0 {
            return Err(ShopError::Config("api.timeout_secs must be positive".into()));
        }
        if !eshop_cache::is_valid_key(&self.storage.cart_key) {
            return Err(ShopError::Config(format!(
                "storage.cart_key {:?} must be non-empty ASCII letters, digits, '-', '_' or '.' and not start with '.'",
                self.storage.cart_key
            )));
        }
        for (name, value) in [
            ("pricing.free_shipping_threshold", self.pricing.free_shipping_threshold),
            ("pricing.shipping_fee", self.pricing.shipping_fee),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ShopError::Config(format!("{name} must be a finite, non-negative amount")));
            }
        }
        Ok(())
    }

    /// Shipping policy from the `[pricing]` section.
    pub fn shipping_policy(&self) -> Result<ShippingPolicy, ShopError> {
        let currency = self.pricing.currency;
        Ok(ShippingPolicy::new(
            Money::from_decimal(self.pricing.free_shipping_threshold, currency),
            Money::from_decimal(self.pricing.shipping_fee, currency),
        )?)
    }
}

/// Catalog API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Keep the full product and category lists after the first fetch.
    #[serde(default = "default_true")]
    pub memoize: bool,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            memoize: true,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_true() -> bool {
    true
}

/// Where the cart is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_storage_dir")]
    pub dir: PathBuf,

    #[serde(default = "default_cart_key")]
    pub cart_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
            cart_key: default_cart_key(),
        }
    }
}

fn default_storage_dir() -> PathBuf {
    PathBuf::from(".eshop")
}

fn default_cart_key() -> String {
    CART_KEY.to_string()
}

/// Prices and shipping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    #[serde(default)]
    pub currency: Currency,

    /// Orders above this subtotal ship for free.
    #[serde(default = "default_threshold")]
    pub free_shipping_threshold: f64,

    #[serde(default = "default_shipping_fee")]
    pub shipping_fee: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            free_shipping_threshold: default_threshold(),
            shipping_fee: default_shipping_fee(),
        }
    }
}

fn default_threshold() -> f64 {
    500.0
}

fn default_shipping_fee() -> f64 {
    50.0
}

/// Home page settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeConfig {
    /// Number of random products on the home page.
    #[serde(default = "default_featured_count")]
    pub featured_count: usize,
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self {
            featured_count: default_featured_count(),
        }
    }
}

fn default_featured_count() -> usize {
    3
}

/// Generate a commented default `eshop.toml`.
pub fn generate_default_config() -> String {
    format!(
        r#"# eshop storefront configuration

[api]
base_url = "{base_url}"
timeout_secs = 10
# Fetch the full product and category lists once per session
memoize = true

[storage]
dir = ".eshop"
cart_key = "{cart_key}"

[pricing]
currency = "DKK"
# Shipping is free when the subtotal is above this amount
free_shipping_threshold = 500.0
shipping_fee = 50.0

[home]
featured_count = 3

[logging]
# trace, debug, info, warn or error; RUST_LOG takes precedence
level = "warn"
# human or json
format = "human"
"#,
        base_url = DEFAULT_BASE_URL,
        cart_key = CART_KEY,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use eshop_observability::{LogFormat, LogLevel};

    #[test]
    fn test_generated_config_matches_defaults() {
        let parsed: ShopConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(parsed, ShopConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let config: ShopConfig = toml::from_str(
            r#"
[pricing]
currency = "EUR"
shipping_fee = 4.95

[logging]
level = "debug"
format = "json"
"#,
        )
        .unwrap();

        assert_eq!(config.pricing.currency, Currency::EUR);
        assert_eq!(config.pricing.free_shipping_threshold, 500.0);
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.format, LogFormat::Json);

        let policy = config.shipping_policy().unwrap();
        assert_eq!(policy.flat_fee, Money::new(495, Currency::EUR));
    }

    #[test]
    fn test_load_json_and_discover() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("eshop.json"), r#"{"home": {"featured_count": 6}}"#).unwrap();

        let found = ShopConfig::discover(&nested).unwrap();
        assert_eq!(found, dir.path().join("eshop.json"));
        assert_eq!(ShopConfig::load(&found).unwrap().home.featured_count, 6);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("eshop.toml");
        std::fs::write(&path, "[api]\ntimeout_secs = 0\n").unwrap();
        assert!(matches!(ShopConfig::load(&path), Err(ShopError::Config(_))));

        std::fs::write(&path, "[pricing\n").unwrap();
        assert!(matches!(ShopConfig::load(&path), Err(ShopError::Config(_))));
    }

    #[test]
    fn test_non_finite_pricing_rejected() {
        let mut config = ShopConfig::default();
        config.pricing.free_shipping_threshold = f64::NAN;
        assert!(matches!(config.validate(), Err(ShopError::Config(m)) if m.contains("free_shipping_threshold")));

        let mut config = ShopConfig::default();
        config.pricing.shipping_fee = f64::INFINITY;
        assert!(matches!(config.validate(), Err(ShopError::Config(m)) if m.contains("shipping_fee")));
    }

    #[test]
    fn test_cart_key_must_be_a_storage_key() {
        for key in ["", "my cart", "../cart", ".hidden", "a/b"] {
            let mut config = ShopConfig::default();
            config.storage.cart_key = key.to_string();
            assert!(
                matches!(config.validate(), Err(ShopError::Config(ref m)) if m.contains("storage.cart_key")),
                "accepted {key:?}"
            );
        }

        let mut config = ShopConfig::default();
        config.storage.cart_key = "shop-cart_v3.json".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_round_trip_toml() {
        let config = ShopConfig::default();
        let text = config.to_toml().unwrap();
        assert_eq!(toml::from_str::<ShopConfig>(&text).unwrap(), config);
    }
}

//! Widget configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional:
//! - `TRAILS_CART_KEY` - Storage key holding the cart (default: `cart`)
//! - `TRAILS_AUTH_KEY` - Storage key holding the login flag (default: `isAdmin`)
//! - `TRAILS_SCOPE_BY_IDENTITY` - Key the cart by signed-in identity (default: `true`)
//! - `TRAILS_LOGIN_PATH` - Where checkout sends guests (default: `/login/`)
//! - `TRAILS_STATIC_BASE` - Prefix for relative image paths (default: `/static/`)
//! - `TRAILS_CURRENCY` - ISO 4217 code used for display (default: `USD`)
//! - `TRAILS_TOAST_MS` - Toast lifetime in milliseconds (default: 2500)
//! - `TRAILS_CONFIRM_CLEAR` - Ask before emptying the cart (default: `true`)

use std::time::Duration;

use thiserror::Error;
use tranquil_trails_core::CurrencyCode;

const DEFAULT_CART_KEY: &str = "cart";
const DEFAULT_AUTH_KEY: &str = "isAdmin";
const DEFAULT_IDENTITY_KEY: &str = "currentUser";
const DEFAULT_PENDING_CHECKOUT_KEY: &str = "pendingCheckout";
const DEFAULT_LOGIN_PATH: &str = "/login/";
const DEFAULT_STATIC_BASE: &str = "/static/";
const DEFAULT_TOAST_MS: u64 = 2500;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storage keys used by the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    /// Base key for the serialized cart.
    pub cart: String,
    /// Key for the login flag.
    pub auth: String,
    /// Key for the signed-in identity string.
    pub identity: String,
    /// Key for the post-login checkout destination.
    pub pending_checkout: String,
    /// Whether the cart key is suffixed with the signed-in identity.
    pub scope_by_identity: bool,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            cart: DEFAULT_CART_KEY.to_string(),
            auth: DEFAULT_AUTH_KEY.to_string(),
            identity: DEFAULT_IDENTITY_KEY.to_string(),
            pending_checkout: DEFAULT_PENDING_CHECKOUT_KEY.to_string(),
            scope_by_identity: true,
        }
    }
}

/// Cart widget configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    /// Storage keys
    pub keys: StorageKeys,
    /// Login page path for the checkout gate
    pub login_path: String,
    /// Prefix applied to relative image paths, always ending in `/`
    pub static_base: String,
    /// Currency used when formatting prices
    pub currency: CurrencyCode,
    /// How long the "added to cart" toast stays up
    pub toast_ttl: Duration,
    /// Whether clearing the cart asks for confirmation first
    pub confirm_clear: bool,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            keys: StorageKeys::default(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            static_base: DEFAULT_STATIC_BASE.to_string(),
            currency: CurrencyCode::default(),
            toast_ttl: Duration::from_millis(DEFAULT_TOAST_MS),
            confirm_clear: true,
        }
    }
}

impl WidgetConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let keys = StorageKeys {
            cart: get_key_or_default(&lookup, "TRAILS_CART_KEY", DEFAULT_CART_KEY)?,
            auth: get_key_or_default(&lookup, "TRAILS_AUTH_KEY", DEFAULT_AUTH_KEY)?,
            scope_by_identity: get_bool_or_default(&lookup, "TRAILS_SCOPE_BY_IDENTITY", true)?,
            ..StorageKeys::default()
        };

        let login_path = get_env_or_default(&lookup, "TRAILS_LOGIN_PATH", DEFAULT_LOGIN_PATH);
        if !(login_path.starts_with('/') || login_path.starts_with("http")) {
            return Err(ConfigError::InvalidEnvVar(
                "TRAILS_LOGIN_PATH".to_string(),
                "must be an absolute path or URL".to_string(),
            ));
        }

        let mut static_base = get_env_or_default(&lookup, "TRAILS_STATIC_BASE", DEFAULT_STATIC_BASE);
        if !static_base.ends_with('/') {
            static_base.push('/');
        }

        let currency = get_env_or_default(&lookup, "TRAILS_CURRENCY", "USD")
            .parse::<CurrencyCode>()
            .map_err(|e| ConfigError::InvalidEnvVar("TRAILS_CURRENCY".to_string(), e))?;

        let toast_ms = get_env_or_default(&lookup, "TRAILS_TOAST_MS", &DEFAULT_TOAST_MS.to_string())
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar("TRAILS_TOAST_MS".to_string(), e.to_string()))?;

        let confirm_clear = get_bool_or_default(&lookup, "TRAILS_CONFIRM_CLEAR", true)?;

        Ok(Self {
            keys,
            login_path,
            static_base,
            currency,
            toast_ttl: Duration::from_millis(toast_ms),
            confirm_clear,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an environment variable with a default value.
fn get_env_or_default(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    lookup(key).unwrap_or_else(|| default.to_string())
}

/// Get a storage key name, rejecting blank values.
fn get_key_or_default(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<String, ConfigError> {
    let value = get_env_or_default(lookup, key, default);
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "storage key cannot be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

/// Get a boolean flag (`true`/`false`/`1`/`0`/`yes`/`no`).
fn get_bool_or_default(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: bool,
) -> Result<bool, ConfigError> {
    let Some(value) = lookup(key) else {
        return Ok(default);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected a boolean, got '{other}'"),
        )),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = WidgetConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, WidgetConfig::default());
        assert_eq!(config.keys.cart, "cart");
        assert_eq!(config.keys.auth, "isAdmin");
        assert_eq!(config.login_path, "/login/");
        assert_eq!(config.toast_ttl, Duration::from_millis(2500));
    }

    #[test]
    fn test_overrides() {
        let config = WidgetConfig::from_lookup(lookup(&[
            ("TRAILS_CART_KEY", "bag"),
            ("TRAILS_SCOPE_BY_IDENTITY", "no"),
            ("TRAILS_STATIC_BASE", "/assets"),
            ("TRAILS_CURRENCY", "inr"),
            ("TRAILS_TOAST_MS", "1000"),
            ("TRAILS_CONFIRM_CLEAR", "0"),
        ]))
        .unwrap();

        assert_eq!(config.keys.cart, "bag");
        assert!(!config.keys.scope_by_identity);
        assert_eq!(config.static_base, "/assets/");
        assert_eq!(config.currency, CurrencyCode::INR);
        assert_eq!(config.toast_ttl, Duration::from_millis(1000));
        assert!(!config.confirm_clear);
    }

    #[test]
    fn test_invalid_values() {
        let err = WidgetConfig::from_lookup(lookup(&[("TRAILS_TOAST_MS", "soon")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "TRAILS_TOAST_MS"));

        assert!(WidgetConfig::from_lookup(lookup(&[("TRAILS_CURRENCY", "XYZ")])).is_err());
        assert!(WidgetConfig::from_lookup(lookup(&[("TRAILS_CART_KEY", "  ")])).is_err());
        assert!(WidgetConfig::from_lookup(lookup(&[("TRAILS_LOGIN_PATH", "login")])).is_err());
        assert!(
            WidgetConfig::from_lookup(lookup(&[("TRAILS_CONFIRM_CLEAR", "maybe")])).is_err()
        );
    }
}

//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHOPCART_API_URL` - Base URL of the commerce API serving
//!   `products/{id}` and `stock/{id}`
//!
//! ## Optional
//! - `SHOPCART_API_TOKEN` - Bearer token for the commerce API
//! - `SHOPCART_DATA_DIR` - Directory for the persisted cart (default: .shopcart)
//! - `SHOPCART_STORAGE_KEY` - Storage key for the cart payload (default: shopcart:cart)

use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Default directory for the file-backed persistence sink.
const DEFAULT_DATA_DIR: &str = ".shopcart";

/// Default key under which the serialized cart is stored.
pub const DEFAULT_STORAGE_KEY: &str = "shopcart:cart";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart application configuration.
///
/// Implements `Debug` manually to redact the API token.
#[derive(Clone)]
pub struct CartConfig {
    /// Base URL of the commerce API.
    pub api_url: Url,
    /// Bearer token for the commerce API, if the deployment requires one.
    pub api_token: Option<SecretString>,
    /// Directory the file-backed persistence sink writes into.
    pub data_dir: PathBuf,
    /// Key under which the serialized cart is stored.
    pub storage_key: String,
}

impl std::fmt::Debug for CartConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartConfig")
            .field("api_url", &self.api_url.as_str())
            .field(
                "api_token",
                &self.api_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("data_dir", &self.data_dir)
            .field("storage_key", &self.storage_key)
            .finish()
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `SHOPCART_API_URL` is missing or not a valid URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_url = get_required_env("SHOPCART_API_URL")?;
        let api_url = Url::parse(&api_url).map_err(|e| {
            ConfigError::InvalidEnvVar("SHOPCART_API_URL".to_string(), e.to_string())
        })?;

        let api_token = get_optional_env("SHOPCART_API_TOKEN").map(SecretString::from);
        let data_dir = PathBuf::from(get_env_or_default("SHOPCART_DATA_DIR", DEFAULT_DATA_DIR));
        let storage_key = get_env_or_default("SHOPCART_STORAGE_KEY", DEFAULT_STORAGE_KEY);

        Ok(Self {
            api_url,
            api_token,
            data_dir,
            storage_key,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

//! Configuration module for Restcheckr
//!
//! Handles loading and parsing of YAML harness configuration with support
//! for environment variable expansion and validation. The configuration
//! describes the service under test (base URL, fixture user id), the
//! credentials used by the register-or-login flow, and HTTP client limits.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

mod loader;

pub use loader::ConfigLoader;

// ============================================================================
// Environment Variable Expansion
// ============================================================================

/// Expand environment variables in a string.
///
/// Supports two syntaxes:
/// - `${VAR_NAME}` - Simple expansion, keeps placeholder if var not found
/// - `${VAR_NAME:-default}` - Expansion with default value
///
/// Variable names must start with a letter or underscore and contain only
/// uppercase letters, digits, and underscores.
///
/// # Examples
///
/// ```ignore
/// std::env::set_var("MY_VAR", "value");
/// let result = expand_env_vars("prefix-${MY_VAR}-suffix");
/// assert_eq!(result, "prefix-value-suffix");
///
/// let result = expand_env_vars("${MISSING:-default}");
/// assert_eq!(result, "default");
/// ```
fn expand_env_vars(s: &str) -> String {
    // Regex to capture ${VAR} or ${VAR:-default}
    let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)(?::-([^}]+))?\}").unwrap();
    let mut last_match = 0;
    let mut result = String::with_capacity(s.len());

    for cap in re.captures_iter(s) {
        let full_match = cap.get(0).unwrap();
        let var_name = cap.get(1).unwrap().as_str();

        // Append the text before the match
        result.push_str(&s[last_match..full_match.start()]);

        // Get value from env, or use default from regex
        let value = match std::env::var(var_name) {
            Ok(val) => val,
            Err(_) => {
                if let Some(default) = cap.get(2) {
                    default.as_str().to_string()
                } else {
                    // No env var and no default. Keep the original placeholder.
                    full_match.as_str().to_string()
                }
            }
        };
        result.push_str(&value);

        last_match = full_match.end();
    }

    // Append the rest of the string after the last match
    result.push_str(&s[last_match..]);

    result
}

/// Custom deserializer for strings with environment variable expansion.
///
/// This is used with serde's `deserialize_with` attribute to automatically
/// expand environment variables when deserializing configuration values.
fn deserialize_with_env<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::de::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(expand_env_vars(&s))
}

// ============================================================================
// Validation Helpers
// ============================================================================

/// Validate that a URL starts with http:// or https://
fn is_valid_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Main harness configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HarnessConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub credentials: CredentialsConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

impl HarnessConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        ConfigLoader::load(path)
    }

    /// Build configuration from the process environment.
    ///
    /// Starts from defaults and applies overrides:
    /// - `RESTCHECKR_CONFIG` - path to a YAML config file, loaded first
    /// - `RESTCHECKR_BASE_URL` - base URL of the service under test
    /// - `RESTCHECKR_USER_ID` - fixture user id for the per-user create route
    /// - `RESTCHECKR_EMAIL` / `RESTCHECKR_PASSWORD` - auth credentials
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match std::env::var("RESTCHECKR_CONFIG") {
            Ok(path) => Self::load(path)?,
            Err(_) => Self::default(),
        };

        if let Ok(base_url) = std::env::var("RESTCHECKR_BASE_URL") {
            config.api.base_url = base_url;
        }
        if let Ok(user_id) = std::env::var("RESTCHECKR_USER_ID") {
            config.api.user_id = user_id.parse().map_err(|_| {
                ConfigError::ValidationError(format!(
                    "RESTCHECKR_USER_ID is not a number: {user_id}"
                ))
            })?;
        }
        if let Ok(email) = std::env::var("RESTCHECKR_EMAIL") {
            config.credentials.email = email;
        }
        if let Ok(password) = std::env::var("RESTCHECKR_PASSWORD") {
            config.credentials.password = password;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_valid_http_url(&self.api.base_url) {
            return Err(ConfigError::ValidationError(format!(
                "Invalid base_url '{}': must start with http:// or https://",
                self.api.base_url
            )));
        }

        if self.credentials.email.trim().is_empty() || !self.credentials.email.contains('@') {
            return Err(ConfigError::ValidationError(format!(
                "Invalid credentials email '{}'",
                self.credentials.email
            )));
        }

        if self.credentials.password.is_empty() {
            return Err(ConfigError::ValidationError(
                "Credentials password cannot be empty".into(),
            ));
        }

        if self.http.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "HTTP timeout must be greater than zero".into(),
            ));
        }

        Ok(())
    }
}

/// Service-under-test configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the service under test. Supports ${VAR} and
    /// ${VAR:-default} expansion.
    #[serde(
        default = "default_base_url",
        deserialize_with = "deserialize_with_env"
    )]
    pub base_url: String,

    /// Fixture user id used by the per-user create route (`/{user_id}/posts`).
    #[serde(default = "default_user_id")]
    pub user_id: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_id: default_user_id(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_user_id() -> u64 {
    664
}

/// Credentials used by the register-or-login flow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialsConfig {
    #[serde(default = "default_email", deserialize_with = "deserialize_with_env")]
    pub email: String,

    #[serde(
        default = "default_password",
        deserialize_with = "deserialize_with_env"
    )]
    pub password: String,
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            email: default_email(),
            password: default_password(),
        }
    }
}

fn default_email() -> String {
    "olivier@mail.cocmw".to_string()
}

fn default_password() -> String {
    "bestPassw0rd".to_string()
}

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds. Default: 30
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

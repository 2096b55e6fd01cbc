//! Environment-sourced configuration.
//!
//! Read once at process start. A `.env` file in the working directory is
//! loaded first (a missing file is fine), then the process environment is
//! consulted:
//!
//! | Variable                      | Default                                     |
//! |-------------------------------|---------------------------------------------|
//! | `GOOGLE_API_KEY` / `GEMINI_API_KEY` | required unless offline               |
//! | `HEALTH_ASSESS_MODEL`         | `gemini-1.5-pro-exp-0801`                   |
//! | `HEALTH_ASSESS_API_BASE`      | `https://generativelanguage.googleapis.com` |
//! | `HEALTH_ASSESS_TIMEOUT_SECS`  | `0` (no timeout)                            |
//! | `HEALTH_ASSESS_OFFLINE`       | `false`                                     |
//! | `HEALTH_ASSESS_LOG_MODE`      | `auto`                                      |
//! | `HEALTH_ASSESS_LOG_FILE`      | `health-assessment.log`                     |

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use zeroize::Zeroizing;

pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";
pub const API_KEY_FALLBACK_ENV: &str = "GEMINI_API_KEY";
pub const MODEL_ENV: &str = "HEALTH_ASSESS_MODEL";
pub const API_BASE_ENV: &str = "HEALTH_ASSESS_API_BASE";
pub const TIMEOUT_ENV: &str = "HEALTH_ASSESS_TIMEOUT_SECS";
pub const OFFLINE_ENV: &str = "HEALTH_ASSESS_OFFLINE";
pub const LOG_MODE_ENV: &str = "HEALTH_ASSESS_LOG_MODE";
pub const LOG_FILE_ENV: &str = "HEALTH_ASSESS_LOG_FILE";

pub const DEFAULT_MODEL: &str = "gemini-1.5-pro-exp-0801";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_LOG_FILE: &str = "health-assessment.log";

/// Model name reported when running without the remote API.
pub const OFFLINE_MODEL: &str = "offline";

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing API key: set GOOGLE_API_KEY (or GEMINI_API_KEY), or HEALTH_ASSESS_OFFLINE=true")]
    MissingApiKey,

    #[error("Invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },
}

/// Settings for the Gemini HTTP adapter.
#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: Zeroizing<String>,
    pub model: String,
    pub base_url: String,
    /// `None` means the request may block indefinitely
    pub timeout: Option<Duration>,
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl GeminiConfig {
    /// Config pointing at the public endpoint with the default model.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Zeroizing::new(api_key.into()),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_API_BASE.to_string(),
            timeout: None,
        }
    }
}

/// Which text generator backs the application.
#[derive(Debug, Clone)]
pub enum Backend {
    Gemini(GeminiConfig),
    /// Canned local responses, no network
    Offline,
}

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// File when stdout is a terminal (the TUI owns it), stdout otherwise
    Auto,
    File,
    Stdout,
}

impl LogMode {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "auto" => Ok(Self::Auto),
            "file" => Ok(Self::File),
            "stdout" => Ok(Self::Stdout),
            _ => Err(ConfigError::InvalidValue {
                var: LOG_MODE_ENV,
                value: value.to_string(),
            }),
        }
    }

    /// Resolve `Auto` against whether stdout is interactive.
    #[must_use]
    pub fn use_file(self, interactive: bool) -> bool {
        match self {
            Self::File => true,
            Self::Stdout => false,
            Self::Auto => interactive,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub mode: LogMode,
    pub file: PathBuf,
}

/// Complete application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend: Backend,
    pub log: LogConfig,
    /// `.env` file that was loaded, if any
    pub dotenv_path: Option<PathBuf>,
}

impl AppConfig {
    /// Load `.env` (if present) and read the process environment.
    ///
    /// # Errors
    /// Returns `ConfigError` on a missing API key or malformed value.
    pub fn from_env() -> Result<Self, ConfigError> {
        let dotenv_path = load_dotenv();
        let mut config = Self::from_lookup(|key| std::env::var(key).ok())?;
        config.dotenv_path = dotenv_path;
        Ok(config)
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    /// Returns `ConfigError` on a missing API key or malformed value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let offline = match non_empty(OFFLINE_ENV) {
            Some(v) => parse_bool(OFFLINE_ENV, &v)?,
            None => false,
        };

        let backend = if offline {
            Backend::Offline
        } else {
            let api_key = non_empty(API_KEY_ENV)
                .or_else(|| non_empty(API_KEY_FALLBACK_ENV))
                .ok_or(ConfigError::MissingApiKey)?;

            let timeout = match non_empty(TIMEOUT_ENV) {
                Some(v) => {
                    let secs: u64 = v.trim().parse().map_err(|_| ConfigError::InvalidValue {
                        var: TIMEOUT_ENV,
                        value: v.clone(),
                    })?;
                    (secs > 0).then(|| Duration::from_secs(secs))
                }
                None => None,
            };

            Backend::Gemini(GeminiConfig {
                api_key: Zeroizing::new(api_key.trim().to_string()),
                model: non_empty(MODEL_ENV)
                    .map(|m| m.trim().to_string())
                    .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                base_url: non_empty(API_BASE_ENV)
                    .map(|b| b.trim().trim_end_matches('/').to_string())
                    .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
                timeout,
            })
        };

        let mode = match lookup(LOG_MODE_ENV) {
            Some(v) => LogMode::parse(&v)?,
            None => LogMode::Auto,
        };
        let file = non_empty(LOG_FILE_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

        Ok(Self {
            backend,
            log: LogConfig { mode, file },
            dotenv_path: None,
        })
    }

    /// Model name the configured backend will report.
    #[must_use]
    pub fn model_name(&self) -> &str {
        match &self.backend {
            Backend::Gemini(g) => &g.model,
            Backend::Offline => OFFLINE_MODEL,
        }
    }
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim() {
        "1" | "true" | "TRUE" | "yes" | "YES" => Ok(true),
        "0" | "false" | "FALSE" | "no" | "NO" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            var,
            value: value.to_string(),
        }),
    }
}

/// Load a `.env` file from the working directory or its parents.
///
/// A missing file is not an error. Logging is not set up yet when this runs,
/// so a malformed file is reported on stderr.
fn load_dotenv() -> Option<PathBuf> {
    match dotenvy::dotenv() {
        Ok(path) => Some(path),
        Err(dotenvy::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => {
            eprintln!("Warning: failed to load .env file: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&[(API_KEY_ENV, "abc")])).expect("Valid");
        let Backend::Gemini(gemini) = &config.backend else {
            panic!("Expected Gemini backend");
        };
        assert_eq!(gemini.api_key.as_str(), "abc");
        assert_eq!(gemini.model, DEFAULT_MODEL);
        assert_eq!(gemini.base_url, DEFAULT_API_BASE);
        assert!(gemini.timeout.is_none());
        assert_eq!(config.log.mode, LogMode::Auto);
        assert_eq!(config.log.file, PathBuf::from(DEFAULT_LOG_FILE));
    }

    #[test]
    fn test_missing_key() {
        let err = AppConfig::from_lookup(lookup(&[])).expect_err("Key required");
        assert!(matches!(err, ConfigError::MissingApiKey));

        let err = AppConfig::from_lookup(lookup(&[(API_KEY_ENV, "   ")])).expect_err("Blank key");
        assert!(matches!(err, ConfigError::MissingApiKey));
    }

    #[test]
    fn test_fallback_key_and_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            (API_KEY_FALLBACK_ENV, "fallback"),
            (MODEL_ENV, "gemini-1.5-flash"),
            (API_BASE_ENV, "http://localhost:8080/"),
            (TIMEOUT_ENV, "30"),
            (LOG_MODE_ENV, "stdout"),
        ]))
        .expect("Valid");

        assert_eq!(config.model_name(), "gemini-1.5-flash");
        let Backend::Gemini(gemini) = config.backend else {
            panic!("Expected Gemini backend");
        };
        assert_eq!(gemini.api_key.as_str(), "fallback");
        assert_eq!(gemini.base_url, "http://localhost:8080");
        assert_eq!(gemini.timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.log.mode, LogMode::Stdout);
    }

    #[test]
    fn test_zero_timeout_means_none() {
        let config =
            AppConfig::from_lookup(lookup(&[(API_KEY_ENV, "k"), (TIMEOUT_ENV, "0")])).expect("Valid");
        let Backend::Gemini(gemini) = config.backend else {
            panic!("Expected Gemini backend");
        };
        assert!(gemini.timeout.is_none());
    }

    #[test]
    fn test_invalid_values() {
        let err = AppConfig::from_lookup(lookup(&[(API_KEY_ENV, "k"), (TIMEOUT_ENV, "soon")]))
            .expect_err("Bad timeout");
        assert!(matches!(err, ConfigError::InvalidValue { var: TIMEOUT_ENV, .. }));

        let err = AppConfig::from_lookup(lookup(&[(API_KEY_ENV, "k"), (LOG_MODE_ENV, "syslog")]))
            .expect_err("Bad log mode");
        assert!(matches!(err, ConfigError::InvalidValue { var: LOG_MODE_ENV, .. }));
    }

    #[test]
    fn test_offline_needs_no_key() {
        let config = AppConfig::from_lookup(lookup(&[(OFFLINE_ENV, "true")])).expect("Valid");
        assert!(matches!(config.backend, Backend::Offline));
        assert_eq!(config.model_name(), OFFLINE_MODEL);
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = GeminiConfig::new("super-secret-key");
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret-key"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_log_mode_resolution() {
        assert!(LogMode::Auto.use_file(true));
        assert!(!LogMode::Auto.use_file(false));
        assert!(LogMode::File.use_file(false));
        assert!(!LogMode::Stdout.use_file(true));
    }
}

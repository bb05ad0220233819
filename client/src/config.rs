//! Gateway connection settings loaded via OrthoConfig.
//!
//! Values come from `LEDGER_*` environment variables; command-line flags
//! override them through [`GatewaySettings::with_overrides`].

use std::ffi::OsString;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

const DEFAULT_BASE_URL: &str = "http://localhost:3333";

/// Errors raised while resolving gateway settings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The base URL does not parse.
    #[error("invalid gateway base URL `{raw}`: {source}")]
    InvalidBaseUrl {
        /// Configured value.
        raw: String,
        /// Parser failure.
        #[source]
        source: url::ParseError,
    },
    /// The base URL uses a scheme other than http or https.
    #[error("gateway base URL must use http or https, got `{scheme}`")]
    UnsupportedScheme {
        /// Scheme found in the configured URL.
        scheme: String,
    },
    /// The configuration sources could not be read.
    #[error("failed to load gateway settings: {message}")]
    Load {
        /// Loader failure.
        message: String,
    },
    /// A zero timeout would fail every request.
    #[error("gateway timeout must be at least one second")]
    ZeroTimeout,
}

/// Configuration values for reaching the gateway.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "LEDGER")]
pub struct GatewaySettings {
    /// Base URL the endpoint paths are resolved against.
    pub base_url: Option<String>,
    /// Per-request timeout in seconds.
    #[ortho_config(default = 10)]
    pub timeout_seconds: u64,
}

/// Validated gateway location and request timeout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayEndpoint {
    /// Parsed base URL.
    pub base_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl GatewaySettings {
    /// Load settings from the environment only.
    ///
    /// Command-line flags are parsed by the `ledger` binary itself and applied
    /// with [`Self::with_overrides`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Load`] when a source cannot be read or parsed.
    pub fn from_environment() -> Result<Self, ConfigError> {
        Self::load_from_iter([OsString::from("ledger")]).map_err(|error| ConfigError::Load {
            message: error.to_string(),
        })
    }

    /// Return the configured base URL, falling back to the default.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Return the configured timeout in seconds.
    #[must_use]
    pub const fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    /// Replace values with any that were given explicitly.
    #[must_use]
    pub fn with_overrides(self, base_url: Option<String>, timeout_seconds: Option<u64>) -> Self {
        Self {
            base_url: base_url.or(self.base_url),
            timeout_seconds: timeout_seconds.unwrap_or(self.timeout_seconds),
        }
    }

    /// Validate the settings into a usable endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for unparsable or non-HTTP URLs and for a zero
    /// timeout.
    pub fn resolve(&self) -> Result<GatewayEndpoint, ConfigError> {
        let raw = self.base_url();
        let base_url = Url::parse(raw).map_err(|source| ConfigError::InvalidBaseUrl {
            raw: raw.to_owned(),
            source,
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme {
                scheme: base_url.scheme().to_owned(),
            });
        }
        let timeout_seconds = self.timeout_seconds();
        if timeout_seconds == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(GatewayEndpoint {
            base_url,
            timeout: Duration::from_secs(timeout_seconds),
        })
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for gateway configuration parsing.

    use super::*;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> GatewaySettings {
        GatewaySettings::from_environment().expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("LEDGER_BASE_URL", None::<String>),
            ("LEDGER_TIMEOUT_SECONDS", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.base_url(), DEFAULT_BASE_URL);
        assert_eq!(settings.timeout_seconds(), 10);
        let endpoint = settings.resolve().expect("defaults resolve");
        assert_eq!(endpoint.timeout, Duration::from_secs(10));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("LEDGER_BASE_URL", Some("https://ledger.example/api".to_owned())),
            ("LEDGER_TIMEOUT_SECONDS", Some("3".to_owned())),
        ]);

        let settings = load_from_empty_args();
        let endpoint = settings.resolve().expect("settings resolve");
        assert_eq!(endpoint.base_url.as_str(), "https://ledger.example/api");
        assert_eq!(endpoint.timeout, Duration::from_secs(3));
    }

    #[test]
    fn explicit_values_win_over_loaded_ones() {
        let settings = GatewaySettings {
            base_url: Some("http://from-env:1".to_owned()),
            timeout_seconds: 7,
        }
        .with_overrides(Some("http://from-flag:2".to_owned()), None);

        assert_eq!(settings.base_url(), "http://from-flag:2");
        assert_eq!(settings.timeout_seconds(), 7);
    }

    #[rstest]
    fn flags_apply_on_top_of_defaults() {
        let _guard = lock_env([
            ("LEDGER_BASE_URL", None::<String>),
            ("LEDGER_TIMEOUT_SECONDS", None::<String>),
        ]);

        let endpoint = load_from_empty_args()
            .with_overrides(None, Some(3))
            .resolve()
            .expect("defaults with a timeout flag resolve");
        assert_eq!(endpoint.base_url.as_str(), "http://localhost:3333/");
        assert_eq!(endpoint.timeout, Duration::from_secs(3));
    }

    #[rstest]
    #[case::not_a_url(Some("not a url"), 5)]
    #[case::ftp(Some("ftp://ledger.example"), 5)]
    #[case::zero_timeout(None, 0)]
    fn invalid_settings_are_rejected(#[case] base_url: Option<&str>, #[case] timeout: u64) {
        let settings = GatewaySettings {
            base_url: base_url.map(str::to_owned),
            timeout_seconds: timeout,
        };
        assert!(settings.resolve().is_err());
    }
}

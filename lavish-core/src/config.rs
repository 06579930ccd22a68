//! Configuration for the Lavish pipeline.
//!
//! Loadable from TOML or mutated in place through
//! [`crate::configure`]. Set once at startup, read on every operation.

use serde::{Deserialize, Serialize};

/// Pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LavishConfig {
    /// API credential. Without one, non-dry-run calculation fails (and
    /// the interception layer falls back to the CPU, which was free
    /// all along).
    #[serde(default)]
    pub api_key: Option<String>,
    /// Chat-completions endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Model identifier.
    #[serde(default = "default_model")]
    pub model: String,
    /// Simulate calls instead of issuing them. Defaults to on — nobody
    /// should pay for `2 + 3` by accident.
    #[serde(default = "default_true")]
    pub dry_run: bool,
    /// Whether dry runs sleep for the simulated API latency. Off so
    /// test suites finish this year.
    #[serde(default)]
    pub use_real_delay: bool,
    /// Log cache hits at info level. Off by default to avoid spam.
    #[serde(default)]
    pub log_cache_hits: bool,
    /// Retries after the first attempt (3 retries = 4 attempts).
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Base backoff delay in seconds; attempt `n` waits
    /// `base * 2^n` plus jitter.
    #[serde(default = "default_base_delay")]
    pub base_delay_secs: f64,
    /// Per-request HTTP timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Default for LavishConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: default_endpoint(),
            model: default_model(),
            dry_run: true,
            use_real_delay: false,
            log_cache_hits: false,
            max_retries: default_max_retries(),
            base_delay_secs: default_base_delay(),
            request_timeout_ms: default_timeout_ms(),
        }
    }
}

impl LavishConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `LavishError::Configuration` if the TOML is invalid.
    pub fn from_toml(toml_str: &str) -> crate::Result<Self> {
        toml::from_str(toml_str).map_err(|e| crate::LavishError::Configuration(e.to_string()))
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns `LavishError::Configuration` if the file cannot be read
    /// or parsed.
    pub fn from_file(path: &std::path::Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::LavishError::Configuration(e.to_string()))?;
        Self::from_toml(&content)
    }
}

fn default_endpoint() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_model() -> String {
    "gpt-5-nano".to_string()
}

fn default_true() -> bool {
    true
}

fn default_max_retries() -> u32 {
    3
}

fn default_base_delay() -> f64 {
    1.0
}

fn default_timeout_ms() -> u64 {
    30_000
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_safe() {
        let cfg = LavishConfig::default();
        assert!(cfg.api_key.is_none());
        assert!(cfg.dry_run, "must not spend money out of the box");
        assert!(!cfg.use_real_delay);
        assert!(!cfg.log_cache_hits);
        assert_eq!(cfg.max_retries, 3);
        assert_eq!(cfg.endpoint, "https://api.openai.com/v1/chat/completions");
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let cfg = LavishConfig::from_toml(
            r#"
            api_key = "sk-test"
            model = "gpt-4o-mini"
            dry_run = false
            "#,
        )
        .expect("valid toml");
        assert_eq!(cfg.api_key.as_deref(), Some("sk-test"));
        assert_eq!(cfg.model, "gpt-4o-mini");
        assert!(!cfg.dry_run);
        assert_eq!(cfg.max_retries, 3);
    }

    #[test]
    fn invalid_toml_is_a_configuration_error() {
        let err = LavishConfig::from_toml("api_key = [not toml").expect_err("must fail");
        assert!(matches!(err, crate::LavishError::Configuration(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(file, "model = \"test-model\"").expect("write");
        let cfg = LavishConfig::from_file(file.path()).expect("load");
        assert_eq!(cfg.model, "test-model");
    }
}

//! Client configuration: defaults, files, environment and overrides.

use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf};
use thiserror::Error;
use url::Url;

const ENV_API_BASE_URL: &str = "AUTOMART_API_BASE_URL";
const ENV_LOG_LEVEL: &str = "AUTOMART_LOG_LEVEL";
const ENV_SESSION_DIR: &str = "AUTOMART_SESSION_DIR";
const ENV_REQUEST_TIMEOUT: &str = "AUTOMART_REQUEST_TIMEOUT_SECS";

/// File name of the persisted session inside the session directory.
pub const SESSION_FILE_NAME: &str = "session.json";

/// Errors raised while loading or validating the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration file {path}: {source}")]
    Read {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The file extension names no supported format.
    #[error("unsupported configuration format for {0}. Use 'yaml', 'json' or 'toml'.")]
    UnsupportedFormat(PathBuf),
    /// The file content did not parse.
    #[error("invalid configuration file: {0}")]
    Parse(String),
    /// The timeout environment variable is not a whole number.
    #[error("invalid AUTOMART_REQUEST_TIMEOUT_SECS value: must be a whole number of seconds")]
    InvalidTimeout,
    /// Validation failed; every problem found is listed.
    #[error("invalid configuration: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// Settings for talking to the `AutoMart` API.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// API root every request path is appended to.
    pub api_base_url: String,

    /// Logging level used when `RUST_LOG` is not set.
    pub log_level: String,

    /// Directory holding the persisted session; the platform config
    /// directory is used when unset.
    pub session_dir: Option<PathBuf>,

    /// Per-request timeout in seconds. Requests are unbounded when unset.
    pub request_timeout_secs: Option<u64>,

    /// `User-Agent` header sent with every request.
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl Config {
    /// Generates a default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            api_base_url: "http://localhost:5000/api/v1".to_string(),
            log_level: "warn".to_string(),
            session_dir: None,
            request_timeout_secs: None,
            user_agent: "automart-cli".to_string(),
        }
    }

    /// Loads the configuration from a file, environment variables, or defaults.
    ///
    /// Environment variables only apply to values the file left at their
    /// defaults. The base URL override (from the command line) wins over
    /// everything.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, an environment
    /// value is malformed, or the resolved configuration is invalid.
    pub fn load_config(
        config_path: Option<PathBuf>,
        base_url_override: Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => Self::with_defaults(),
        };

        config.apply_env_overrides()?;

        if let Some(base_url) = base_url_override {
            config.api_base_url = base_url;
        }

        config.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    fn from_file(path: PathBuf) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => {
                serde_yml::from_str(&content).map_err(|err| ConfigError::Parse(err.to_string()))
            }
            Some("json") => {
                serde_json::from_str(&content).map_err(|err| ConfigError::Parse(err.to_string()))
            }
            Some("toml") => {
                toml::from_str(&content).map_err(|err| ConfigError::Parse(err.to_string()))
            }
            _ => Err(ConfigError::UnsupportedFormat(path)),
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        let defaults = Self::with_defaults();

        if self.api_base_url == defaults.api_base_url
            && let Ok(base_url) = env::var(ENV_API_BASE_URL)
        {
            self.api_base_url = base_url;
        }
        if self.log_level == defaults.log_level
            && let Ok(log_level) = env::var(ENV_LOG_LEVEL)
        {
            self.log_level = log_level;
        }
        if self.session_dir.is_none()
            && let Ok(dir) = env::var(ENV_SESSION_DIR)
        {
            self.session_dir = Some(PathBuf::from(dir));
        }
        if self.request_timeout_secs.is_none()
            && let Ok(timeout) = env::var(ENV_REQUEST_TIMEOUT)
        {
            let secs = timeout
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidTimeout)?;
            self.request_timeout_secs = Some(secs);
        }
        Ok(())
    }

    /// Validate the resolved configuration, collecting every problem found.
    ///
    /// # Errors
    /// Returns the list of validation messages when any check fails.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        match Url::parse(&self.api_base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => errors.push(format!(
                "API base URL must use http or https, got '{}'",
                url.scheme()
            )),
            Err(err) => errors.push(format!(
                "Invalid API base URL '{}': {err}",
                self.api_base_url
            )),
        }

        if self.request_timeout_secs == Some(0) {
            errors.push("Request timeout must be greater than 0 seconds.".to_string());
        }

        if self.user_agent.trim().is_empty() {
            errors.push("User agent must not be empty.".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Location of the persisted session file.
    #[must_use]
    pub fn session_path(&self) -> PathBuf {
        let dir = self.session_dir.clone().unwrap_or_else(|| {
            directories::BaseDirs::new()
                .map(|dirs| dirs.config_dir().join("automart"))
                .unwrap_or_else(|| PathBuf::from("."))
        });
        dir.join(SESSION_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn cleanup_env_vars() {
        unsafe {
            env::remove_var(ENV_API_BASE_URL);
            env::remove_var(ENV_LOG_LEVEL);
            env::remove_var(ENV_SESSION_DIR);
            env::remove_var(ENV_REQUEST_TIMEOUT);
        }
    }

    #[test]
    #[serial]
    fn test_config_with_defaults() {
        cleanup_env_vars();
        let config = Config::with_defaults();

        assert_eq!(config.api_base_url, "http://localhost:5000/api/v1");
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.session_dir, None);
        assert_eq!(config.request_timeout_secs, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_load_config_without_file_uses_defaults() {
        cleanup_env_vars();
        let config = Config::load_config(None, None).unwrap();
        assert_eq!(config, Config::with_defaults());
    }

    #[test]
    #[serial]
    fn test_load_partial_yaml_file() {
        cleanup_env_vars();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(
            &path,
            "api_base_url: https://api.automart.test/api/v1\nrequest_timeout_secs: 15\n",
        )
        .unwrap();

        let config = Config::load_config(Some(path), None).unwrap();
        assert_eq!(config.api_base_url, "https://api.automart.test/api/v1");
        assert_eq!(config.request_timeout_secs, Some(15));
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    #[serial]
    fn test_load_json_and_toml_files() {
        cleanup_env_vars();
        let dir = TempDir::new().unwrap();

        let json_path = dir.path().join("config.json");
        fs::write(&json_path, r#"{"log_level": "debug"}"#).unwrap();
        let from_json = Config::load_config(Some(json_path), None).unwrap();
        assert_eq!(from_json.log_level, "debug");

        let toml_path = dir.path().join("config.toml");
        fs::write(&toml_path, "user_agent = \"automart-test\"\n").unwrap();
        let from_toml = Config::load_config(Some(toml_path), None).unwrap();
        assert_eq!(from_toml.user_agent, "automart-test");
    }

    #[test]
    #[serial]
    fn test_unsupported_format() {
        cleanup_env_vars();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ini");
        fs::write(&path, "x=1").unwrap();

        let result = Config::load_config(Some(path), None);
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    #[serial]
    fn test_env_overrides_apply_to_defaults_only() {
        cleanup_env_vars();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "log_level: error\n").unwrap();

        unsafe {
            env::set_var(ENV_API_BASE_URL, "http://127.0.0.1:9000/api/v1");
            env::set_var(ENV_LOG_LEVEL, "trace");
            env::set_var(ENV_SESSION_DIR, "/tmp/automart-session");
            env::set_var(ENV_REQUEST_TIMEOUT, "30");
        }

        let config = Config::load_config(Some(path), None).unwrap();
        assert_eq!(config.api_base_url, "http://127.0.0.1:9000/api/v1");
        assert_eq!(config.log_level, "error");
        assert_eq!(
            config.session_dir,
            Some(PathBuf::from("/tmp/automart-session"))
        );
        assert_eq!(config.request_timeout_secs, Some(30));

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_invalid_timeout_env() {
        cleanup_env_vars();
        unsafe {
            env::set_var(ENV_REQUEST_TIMEOUT, "soon");
        }

        let result = Config::load_config(None, None);
        assert!(matches!(result, Err(ConfigError::InvalidTimeout)));

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_cli_override_wins() {
        cleanup_env_vars();
        unsafe {
            env::set_var(ENV_API_BASE_URL, "http://from-env/api/v1");
        }

        let config =
            Config::load_config(None, Some("https://from-cli.example/api/v1".into())).unwrap();
        assert_eq!(config.api_base_url, "https://from-cli.example/api/v1");

        cleanup_env_vars();
    }

    #[test]
    fn test_validate_collects_errors() {
        let config = Config {
            api_base_url: "ftp://files.example".into(),
            request_timeout_secs: Some(0),
            user_agent: " ".into(),
            ..Config::with_defaults()
        };

        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors[0].contains("http or https"));
    }

    #[test]
    fn test_session_path_uses_configured_dir() {
        let config = Config {
            session_dir: Some(PathBuf::from("/var/lib/automart")),
            ..Config::with_defaults()
        };
        assert_eq!(
            config.session_path(),
            PathBuf::from("/var/lib/automart/session.json")
        );
    }
}

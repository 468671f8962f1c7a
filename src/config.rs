use crate::api::RetryPolicy;
use crate::period::PeriodToken;
use serde::Deserialize;
use std::env;
use std::fs;
use std::io;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Environment variable naming the config file to use when `--config` isn't
/// given
pub(crate) const CONFIG_ENV: &str = "MONEYCAL_CONFIG";

/// Overrides `api.base_url`
const API_URL_ENV: &str = "MONEYCAL_API_URL";

/// Overrides `api.token`
const API_TOKEN_ENV: &str = "MONEYCAL_API_TOKEN";

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
    pub(crate) api: ApiConfig,
    pub(crate) log: LogConfig,
    pub(crate) ui: UiConfig,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct ApiConfig {
    pub(crate) base_url: String,
    pub(crate) timeout_secs: u64,
    pub(crate) token: Option<String>,
    pub(crate) retry: RetryConfig,
}

impl Default for ApiConfig {
    fn default() -> ApiConfig {
        ApiConfig {
            base_url: String::from("http://localhost:8000/api"),
            timeout_secs: 10,
            token: None,
            retry: RetryConfig::default(),
        }
    }
}

impl ApiConfig {
    pub(crate) fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct RetryConfig {
    pub(crate) max_attempts: NonZeroU32,
    pub(crate) base_delay_ms: u64,
    pub(crate) max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> RetryConfig {
        let policy = RetryPolicy::default();
        RetryConfig {
            max_attempts: policy.max_attempts,
            base_delay_ms: 1000,
            max_delay_ms: 5000,
        }
    }
}

impl RetryConfig {
    pub(crate) fn policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            base_delay: Duration::from_millis(self.base_delay_ms),
            max_delay: Duration::from_millis(self.max_delay_ms),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct LogConfig {
    /// Logging is disabled unless this is set, as the terminal belongs to
    /// the UI
    pub(crate) file: Option<PathBuf>,
    /// Used when `RUST_LOG` is not set
    pub(crate) filter: String,
}

impl Default for LogConfig {
    fn default() -> LogConfig {
        LogConfig {
            file: None,
            filter: String::from("info"),
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct UiConfig {
    pub(crate) initial_period: PeriodToken,
}

impl Default for UiConfig {
    fn default() -> UiConfig {
        UiConfig {
            initial_period: PeriodToken::Today,
        }
    }
}

impl Config {
    /// Loads the configuration from `path`, or else the file named by
    /// `$MONEYCAL_CONFIG`, or else uses the defaults.  Environment
    /// overrides are applied on top.
    pub(crate) fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
        let path = path.map(Path::to_path_buf).or_else(|| {
            env::var_os(CONFIG_ENV)
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
        });
        let mut config = match path {
            Some(p) => Config::from_file(&p)?,
            None => Config::default(),
        };
        config.apply_env(|key| env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub(crate) fn from_file(path: &Path) -> Result<Config, ConfigError> {
        debug!(path = %path.display(), "reading config file");
        let src = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        toml::from_str(&src).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source: Box::new(source),
        })
    }

    /// Applies overrides from environment variables looked up with `var`.
    /// Empty values are ignored.
    pub(crate) fn apply_env<F: Fn(&str) -> Option<String>>(&mut self, var: F) {
        let lookup = |key: &str| var(key).filter(|s| !s.trim().is_empty());
        if let Some(url) = lookup(API_URL_ENV) {
            self.api.base_url = url;
        }
        if let Some(token) = lookup(API_TOKEN_ENV) {
            self.api.token = Some(token);
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.ui.initial_period == PeriodToken::Custom {
            return Err(ConfigError::CustomInitialPeriod);
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: Box<toml::de::Error>,
    },
    #[error("ui.initial_period cannot be \"custom\"")]
    CustomInitialPeriod,
    #[error("api.timeout_secs must be greater than zero")]
    ZeroTimeout,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn parse(src: &str) -> Result<Config, toml::de::Error> {
        toml::from_str(src)
    }

    #[test]
    fn test_defaults() {
        let config = parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.api.base_url, "http://localhost:8000/api");
        assert_eq!(config.api.timeout(), Duration::from_secs(10));
        assert_eq!(config.api.token, None);
        assert_eq!(config.api.retry.policy(), RetryPolicy::default());
        assert_eq!(config.log.file, None);
        assert_eq!(config.log.filter, "info");
        assert_eq!(config.ui.initial_period, PeriodToken::Today);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_full() {
        let config = parse(concat!(
            "[api]\n",
            "base_url = \"https://money.example.com/api\"\n",
            "timeout_secs = 3\n",
            "token = \"s3cret\"\n",
            "\n",
            "[api.retry]\n",
            "max_attempts = 5\n",
            "base_delay_ms = 250\n",
            "max_delay_ms = 2000\n",
            "\n",
            "[log]\n",
            "file = \"/tmp/moneycal.log\"\n",
            "filter = \"moneycal=debug\"\n",
            "\n",
            "[ui]\n",
            "initial_period = \"half-year\"\n",
        ))
        .unwrap();
        assert_eq!(config.api.base_url, "https://money.example.com/api");
        assert_eq!(config.api.timeout(), Duration::from_secs(3));
        assert_eq!(config.api.token.as_deref(), Some("s3cret"));
        let policy = config.api.retry.policy();
        assert_eq!(policy.max_attempts.get(), 5);
        assert_eq!(policy.base_delay, Duration::from_millis(250));
        assert_eq!(policy.max_delay, Duration::from_secs(2));
        assert_eq!(config.log.file, Some(PathBuf::from("/tmp/moneycal.log")));
        assert_eq!(config.log.filter, "moneycal=debug");
        assert_eq!(config.ui.initial_period, PeriodToken::HalfYear);
    }

    #[test]
    fn test_partial_section() {
        let config = parse("[api.retry]\nmax_attempts = 1\n").unwrap();
        assert_eq!(config.api.retry.max_attempts.get(), 1);
        assert_eq!(config.api.retry.base_delay_ms, 1000);
        assert_eq!(config.api.base_url, "http://localhost:8000/api");
    }

    #[test]
    fn test_rejects_unknown_keys() {
        assert!(parse("[api]\nbase_uri = \"http://x\"\n").is_err());
        assert!(parse("[colors]\n").is_err());
    }

    #[test]
    fn test_rejects_zero_attempts() {
        assert!(parse("[api.retry]\nmax_attempts = 0\n").is_err());
    }

    #[test]
    fn test_rejects_unknown_period() {
        assert!(parse("[ui]\ninitial_period = \"fortnight\"\n").is_err());
    }

    #[test]
    fn test_validate() {
        let config = parse("[ui]\ninitial_period = \"custom\"\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::CustomInitialPeriod)
        ));
        let config = parse("[api]\ntimeout_secs = 0\n").unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::ZeroTimeout)));
    }

    #[test]
    fn test_apply_env() {
        let vars = HashMap::from([
            (API_URL_ENV, "http://10.0.0.2:9000/api"),
            (API_TOKEN_ENV, "tok"),
        ]);
        let mut config = Config::default();
        config.apply_env(|key| vars.get(key).map(|&v| v.to_owned()));
        assert_eq!(config.api.base_url, "http://10.0.0.2:9000/api");
        assert_eq!(config.api.token.as_deref(), Some("tok"));
    }

    #[test]
    fn test_apply_env_ignores_empty() {
        let mut config = Config::default();
        config.apply_env(|_| Some(String::from("  ")));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_from_file() {
        let path = env::temp_dir().join(format!("moneycal-config-test-{}.toml", std::process::id()));
        fs::write(&path, "[ui]\ninitial_period = \"year\"\n").unwrap();
        let config = Config::from_file(&path);
        fs::remove_file(&path).unwrap();
        assert_eq!(config.unwrap().ui.initial_period, PeriodToken::Year);
    }

    #[test]
    fn test_from_missing_file() {
        let path = env::temp_dir().join("moneycal-no-such-config.toml");
        assert!(matches!(
            Config::from_file(&path),
            Err(ConfigError::Read { .. })
        ));
    }
}

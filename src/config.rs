//! Runtime configuration from the environment (and `.env` via dotenv).

use chrono_tz::Tz;
use std::error::Error;
use std::path::PathBuf;

pub const ENV_HISTORY_FILE: &str = "SUBNET_CALC_HISTORY_FILE";
pub const ENV_MODEL_FILE: &str = "SUBNET_CALC_MODEL_FILE";
pub const ENV_HISTORY_LIMIT: &str = "SUBNET_CALC_HISTORY_LIMIT";
pub const ENV_TIMEZONE: &str = "SUBNET_CALC_TIMEZONE";
pub const ENV_LOG_CONFIG: &str = "SUBNET_CALC_LOG_CONFIG";

pub const DEFAULT_HISTORY_FILE: &str = "ip_history.jsonl";
pub const DEFAULT_MODEL_FILE: &str = "subnet_predictor.json";
pub const DEFAULT_HISTORY_LIMIT: usize = 500;
pub const DEFAULT_LOG_CONFIG: &str = "log4rs.yml";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub history_file: PathBuf,
    pub model_file: PathBuf,
    /// Rows shown by `history` when no `--limit` is given.
    pub history_limit: usize,
    /// Zone used when printing history timestamps.
    pub timezone: Tz,
    pub log_config: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            history_file: PathBuf::from(DEFAULT_HISTORY_FILE),
            model_file: PathBuf::from(DEFAULT_MODEL_FILE),
            history_limit: DEFAULT_HISTORY_LIMIT,
            timezone: Tz::UTC,
            log_config: PathBuf::from(DEFAULT_LOG_CONFIG),
        }
    }
}

impl Config {
    /// Read the process environment. Call `dotenv::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Config, Box<dyn Error>> {
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Config, Box<dyn Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get(ENV_HISTORY_FILE) {
            config.history_file = PathBuf::from(v);
        }
        if let Some(v) = get(ENV_MODEL_FILE) {
            config.model_file = PathBuf::from(v);
        }
        if let Some(v) = get(ENV_HISTORY_LIMIT) {
            config.history_limit = v
                .trim()
                .parse()
                .map_err(|e| format!("{ENV_HISTORY_LIMIT}={v} is not a row count: {e}"))?;
        }
        if let Some(v) = get(ENV_TIMEZONE) {
            config.timezone = v
                .trim()
                .parse()
                .map_err(|e| format!("{ENV_TIMEZONE}={v} is not an IANA time zone: {e}"))?;
        }
        if let Some(v) = get(ENV_LOG_CONFIG) {
            config.log_config = PathBuf::from(v);
        }

        log::debug!("config={config:?}");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.history_limit, 500);
        assert_eq!(config.timezone, Tz::UTC);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            (ENV_HISTORY_FILE, "/tmp/h.jsonl"),
            (ENV_HISTORY_LIMIT, " 25 "),
            (ENV_TIMEZONE, "Pacific/Auckland"),
            (ENV_MODEL_FILE, ""),
        ]))
        .unwrap();
        assert_eq!(config.history_file, PathBuf::from("/tmp/h.jsonl"));
        assert_eq!(config.history_limit, 25);
        assert_eq!(config.timezone, chrono_tz::Pacific::Auckland);
        assert_eq!(config.model_file, PathBuf::from(DEFAULT_MODEL_FILE));
    }

    #[test]
    fn test_invalid_values_name_the_variable() {
        let err = Config::from_lookup(lookup(&[(ENV_HISTORY_LIMIT, "lots")])).unwrap_err();
        assert!(err.to_string().contains(ENV_HISTORY_LIMIT));

        let err = Config::from_lookup(lookup(&[(ENV_TIMEZONE, "Mars/Olympus")])).unwrap_err();
        assert!(err.to_string().contains(ENV_TIMEZONE));
    }
}

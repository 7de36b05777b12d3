//! CLI configuration from the environment (`.env` is loaded first if present).

use std::env;

use recur_core::CalendarDate;
use recur_core::app::DEFAULT_LIST_LIMIT;

/// `RECUR_LOG`: tracing filter directive.
const LOG_KEY: &str = "RECUR_LOG";
/// `RECUR_SEARCH_LIMIT`: default result count for `search`.
const SEARCH_LIMIT_KEY: &str = "RECUR_SEARCH_LIMIT";
/// `RECUR_TODAY`: `YYYYMMDD` override for "today".
const TODAY_KEY: &str = "RECUR_TODAY";

const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub log_filter: String,
    pub search_limit: usize,
    pub today: Option<CalendarDate>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            search_limit: DEFAULT_LIST_LIMIT,
            today: None,
        }
    }
}

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

impl CliConfig {
    /// Reads the process environment. Unusable values fall back to their
    /// defaults; the returned messages describe each fallback.
    pub fn from_env() -> (Self, Vec<String>) {
        Self::from_lookup(env_opt)
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> (Self, Vec<String>) {
        let mut config = Self::default();
        let mut warnings = Vec::new();

        if let Some(filter) = lookup(LOG_KEY) {
            config.log_filter = filter;
        }

        if let Some(raw) = lookup(SEARCH_LIMIT_KEY) {
            match raw.parse::<usize>() {
                Ok(limit) if limit > 0 => config.search_limit = limit,
                _ => warnings.push(format!(
                    "{SEARCH_LIMIT_KEY}={raw:?} is not a positive integer, \
                     using {DEFAULT_LIST_LIMIT}"
                )),
            }
        }

        if let Some(raw) = lookup(TODAY_KEY) {
            match raw.parse::<CalendarDate>() {
                Ok(date) => config.today = Some(date),
                Err(e) => warnings.push(format!("{TODAY_KEY}: {e}, using the system date")),
            }
        }

        (config, warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> (CliConfig, Vec<String>) {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        CliConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let (config, warnings) = load(&[]);
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.search_limit, 50);
        assert!(warnings.is_empty());
    }

    #[test]
    fn reads_all_keys() {
        let (config, warnings) = load(&[
            ("RECUR_LOG", "recur_core=debug"),
            ("RECUR_SEARCH_LIMIT", "10"),
            ("RECUR_TODAY", "20240126"),
        ]);
        assert!(warnings.is_empty());
        assert_eq!(config.log_filter, "recur_core=debug");
        assert_eq!(config.search_limit, 10);
        assert_eq!(config.today, Some("20240126".parse().unwrap()));
    }

    #[test]
    fn bad_values_fall_back_with_warnings() {
        let (config, warnings) = load(&[
            ("RECUR_SEARCH_LIMIT", "0"),
            ("RECUR_TODAY", "26.01.2024"),
        ]);
        assert_eq!(config.search_limit, DEFAULT_LIST_LIMIT);
        assert_eq!(config.today, None);
        assert_eq!(warnings.len(), 2);
    }
}

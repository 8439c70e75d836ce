//! Engine configuration.
//!
//! Defaults live here as constants; [`EngineConfig::from_env`] lets a `.env`
//! file or the environment override them.

use std::env;
use std::fmt;
use std::str::FromStr;

/// Default log4rs configuration file, relative to the working directory.
pub const LOG_CONFIG_FILE: &str = "log4rs.yml";

pub const ENV_STRATEGY: &str = "RANGE_ENGINE_STRATEGY";
pub const ENV_COLLECT_FINDINGS: &str = "RANGE_ENGINE_COLLECT_FINDINGS";
pub const ENV_LOG_CONFIG: &str = "RANGE_ENGINE_LOG_CONFIG";

/// How containment is detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Binary prefix trie per address family.
    #[default]
    Trie,
    /// Compare every range against every earlier range.
    Naive,
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trie" => Ok(Strategy::Trie),
            "naive" => Ok(Strategy::Naive),
            other => Err(format!("unknown strategy '{other}', expected trie or naive")),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Trie => write!(f, "trie"),
            Strategy::Naive => write!(f, "naive"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub strategy: Strategy,
    /// Keep the list of findings; when false only the count is reported.
    pub collect_findings: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            strategy: Strategy::Trie,
            collect_findings: true,
        }
    }
}

impl EngineConfig {
    /// Read overrides from the environment. Unparseable values are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = EngineConfig::default();

        if let Some(value) = lookup(ENV_STRATEGY) {
            match value.parse() {
                Ok(strategy) => config.strategy = strategy,
                Err(e) => log::warn!("Ignoring {ENV_STRATEGY}: {e}"),
            }
        }
        if let Some(value) = lookup(ENV_COLLECT_FINDINGS) {
            match value.trim().parse::<bool>() {
                Ok(collect) => config.collect_findings = collect,
                Err(_) => log::warn!("Ignoring {ENV_COLLECT_FINDINGS}={value}: expected true or false"),
            }
        }

        log::debug!("EngineConfig {:?}", config);
        config
    }
}

/// Path of the log4rs file, `RANGE_ENGINE_LOG_CONFIG` or [`LOG_CONFIG_FILE`].
pub fn log_config_path() -> String {
    env::var(ENV_LOG_CONFIG).unwrap_or_else(|_| LOG_CONFIG_FILE.to_string())
}

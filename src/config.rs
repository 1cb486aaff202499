use serde_json::Number;
use std::env;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

use crate::blockchain::pow::MAX_DIFFICULTY;
use crate::blockchain::{BASE_REWARD, DEFAULT_DIFFICULTY, LedgerConfig};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} has an unparseable value {value:?}")]
    Unparseable { name: &'static str, value: String },

    #[error("DIFFICULTY must be between 1 and 64, got {0}")]
    DifficultyOutOfRange(u32),

    #[error("MINING_THREADS must be at least 1")]
    NoMiningThreads,
}

/// Process settings, read from the environment (and `.env` via dotenvy).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Identity credited with mining rewards for this process.
    pub node_id: String,
    pub ledger: LedgerConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port: u16 = parse(&lookup, "PORT")?.unwrap_or(8080);

        let difficulty = parse(&lookup, "DIFFICULTY")?.unwrap_or(DEFAULT_DIFFICULTY);
        if !(1..=MAX_DIFFICULTY).contains(&difficulty) {
            return Err(ConfigError::DifficultyOutOfRange(difficulty));
        }

        let mining_threads = parse(&lookup, "MINING_THREADS")?.unwrap_or(1usize);
        if mining_threads == 0 {
            return Err(ConfigError::NoMiningThreads);
        }

        let reward: u64 = parse(&lookup, "MINING_REWARD")?.unwrap_or(BASE_REWARD);

        let node_id = lookup("NODE_ID")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| Uuid::new_v4().simple().to_string());

        Ok(Self {
            host,
            port,
            node_id,
            ledger: LedgerConfig {
                difficulty,
                reward: Number::from(reward),
                mining_threads,
            },
        })
    }
}

fn parse<T, F>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Unparseable { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = from_pairs(&[]).unwrap();
        assert_eq!(cfg.host, "127.0.0.1");
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.ledger, LedgerConfig::default());
        assert_eq!(cfg.node_id.len(), 32);
        assert!(!cfg.node_id.contains('-'));
    }

    #[test]
    fn reads_overrides() {
        let cfg = from_pairs(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "5000"),
            ("DIFFICULTY", "2"),
            ("MINING_REWARD", "50"),
            ("MINING_THREADS", "4"),
            ("NODE_ID", "node-a"),
        ])
        .unwrap();
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 5000);
        assert_eq!(cfg.node_id, "node-a");
        assert_eq!(cfg.ledger.difficulty, 2);
        assert_eq!(cfg.ledger.reward, Number::from(50u64));
        assert_eq!(cfg.ledger.mining_threads, 4);
    }

    #[test]
    fn rejects_bad_values() {
        assert_eq!(
            from_pairs(&[("DIFFICULTY", "0")]).unwrap_err(),
            ConfigError::DifficultyOutOfRange(0)
        );
        assert_eq!(
            from_pairs(&[("DIFFICULTY", "65")]).unwrap_err(),
            ConfigError::DifficultyOutOfRange(65)
        );
        assert_eq!(
            from_pairs(&[("MINING_THREADS", "0")]).unwrap_err(),
            ConfigError::NoMiningThreads
        );
        assert!(matches!(
            from_pairs(&[("PORT", "eighty")]),
            Err(ConfigError::Unparseable { name: "PORT", .. })
        ));
    }
}

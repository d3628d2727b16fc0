//! Runtime configuration from the environment

use std::net::SocketAddr;
use std::str::FromStr;

use tracing::warn;

pub const ADDR_VAR: &str = "CHESS_TABLE_ADDR";
pub const HISTORY_VAR: &str = "CHESS_TABLE_HISTORY";

const DEFAULT_ADDR: ([u8; 4], u16) = ([127, 0, 0, 1], 3000);
const DEFAULT_HISTORY_LEN: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// Number of moves shown in the move log
    pub history_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(DEFAULT_ADDR),
            history_len: DEFAULT_HISTORY_LEN,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from a variable lookup. Values that fail to parse
    /// are logged and replaced by the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            bind_addr: parse_or(&lookup, ADDR_VAR, defaults.bind_addr),
            history_len: parse_or(&lookup, HISTORY_VAR, defaults.history_len),
        }
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return default;
    };

    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            warn!("Ignoring {}={:?}, using {}", key, raw, default);
            default
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
        let config = Config::from_lookup(lookup(&[]));
        assert_eq!(config, Config::default());
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:3000");
        assert_eq!(config.history_len, 15);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            (ADDR_VAR, "0.0.0.0:8080"),
            (HISTORY_VAR, " 25 "),
        ]));
        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:8080");
        assert_eq!(config.history_len, 25);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = Config::from_lookup(lookup(&[
            (ADDR_VAR, "localhost"),
            (HISTORY_VAR, "-3"),
        ]));
        assert_eq!(config, Config::default());
    }
}

use std::env;
use std::path::PathBuf;

use crate::allotment::SwapPolicy;
use crate::error::ConfigError;
use crate::models::SeatsPerBench;

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_DB_FILE: &str = "hallseat.db";

/// Which repository backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Csv,
    Sqlite,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub bind: String,
    pub data_dir: PathBuf,
    pub store: StoreKind,
    pub db_path: PathBuf,
    /// Used when a plan request does not say how many seats per bench.
    pub seats_per_bench: SeatsPerBench,
    pub swap_policy: SwapPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind: DEFAULT_BIND.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            store: StoreKind::Csv,
            db_path: PathBuf::from(DEFAULT_DATA_DIR).join(DEFAULT_DB_FILE),
            seats_per_bench: SeatsPerBench::One,
            swap_policy: SwapPolicy::SingleLookahead,
        }
    }
}

impl Config {
    /// Reads `HALLSEAT_*` variables, after loading `.env` when one is present.
    pub fn from_env() -> Result<Config, ConfigError> {
        let _ = dotenv::dotenv();
        Config::from_lookup(|k| env::var(k).ok())
    }

    /// Builds the config from any key lookup; unset or blank keys keep their defaults.
    pub fn from_lookup<F>(get: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |k: &str| get(k).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut cfg = Config::default();

        if let Some(bind) = get("HALLSEAT_BIND") {
            cfg.bind = bind;
        }
        if let Some(dir) = get("HALLSEAT_DATA_DIR") {
            cfg.data_dir = PathBuf::from(dir);
        }
        cfg.db_path = match get("HALLSEAT_DB_PATH") {
            Some(p) => db_path_from_url(&p),
            None => cfg.data_dir.join(DEFAULT_DB_FILE),
        };

        if let Some(store) = get("HALLSEAT_STORE") {
            cfg.store = match store.to_lowercase().as_str() {
                "csv" => StoreKind::Csv,
                "sqlite" => StoreKind::Sqlite,
                other => {
                    return Err(ConfigError::InvalidValue {
                        var: "HALLSEAT_STORE",
                        reason: format!("expected 'csv' or 'sqlite', got '{}'", other),
                    })
                }
            };
        }

        if let Some(seats) = get("HALLSEAT_SEATS_PER_BENCH") {
            cfg.seats_per_bench = seats
                .parse::<u8>()
                .map_err(|e| e.to_string())
                .and_then(|n| SeatsPerBench::try_from(n).map_err(|e| e.to_string()))
                .map_err(|reason| ConfigError::InvalidValue { var: "HALLSEAT_SEATS_PER_BENCH", reason })?;
        }

        if let Some(policy) = get("HALLSEAT_SWAP_POLICY") {
            cfg.swap_policy = policy
                .parse()
                .map_err(|reason| ConfigError::InvalidValue { var: "HALLSEAT_SWAP_POLICY", reason })?;
        }

        Ok(cfg)
    }
}

/// Accepts plain paths as well as `sqlite://` and `file://` URLs.
fn db_path_from_url(p: &str) -> PathBuf {
    if let Some(rest) = p.strip_prefix("sqlite://") {
        PathBuf::from(rest)
    } else if let Some(rest) = p.strip_prefix("file://") {
        PathBuf::from(rest)
    } else {
        PathBuf::from(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.db_path, PathBuf::from("data/hallseat.db"));
    }

    #[test]
    fn db_path_follows_data_dir_unless_set() {
        let cfg = Config::from_lookup(lookup(&[("HALLSEAT_DATA_DIR", "/srv/exam")])).unwrap();
        assert_eq!(cfg.db_path, PathBuf::from("/srv/exam/hallseat.db"));

        let cfg = Config::from_lookup(lookup(&[
            ("HALLSEAT_STORE", "SQLite"),
            ("HALLSEAT_DB_PATH", "sqlite://var/plans.db"),
        ]))
        .unwrap();
        assert_eq!(cfg.store, StoreKind::Sqlite);
        assert_eq!(cfg.db_path, PathBuf::from("var/plans.db"));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(Config::from_lookup(lookup(&[("HALLSEAT_SEATS_PER_BENCH", "3")])).is_err());
        assert!(Config::from_lookup(lookup(&[("HALLSEAT_SEATS_PER_BENCH", "two")])).is_err());
        assert!(Config::from_lookup(lookup(&[("HALLSEAT_STORE", "postgres")])).is_err());
        assert!(Config::from_lookup(lookup(&[("HALLSEAT_SWAP_POLICY", "optimal")])).is_err());
    }

    #[test]
    fn parses_seats_and_policy() {
        let cfg = Config::from_lookup(lookup(&[
            ("HALLSEAT_SEATS_PER_BENCH", " 2 "),
            ("HALLSEAT_SWAP_POLICY", "scan"),
        ]))
        .unwrap();
        assert_eq!(cfg.seats_per_bench, SeatsPerBench::Two);
        assert_eq!(cfg.swap_policy, SwapPolicy::ScanAhead);
    }
}

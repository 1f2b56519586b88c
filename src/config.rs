//! Runtime configuration
//!
//! Values come from the environment first; CLI flags in `main.rs` override
//! them.

use crate::servers::HttpConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateConfig {
    pub http: HttpConfig,
    pub db_path: String,
    /// flexi_logger spec, e.g. `info` or `credential_gate=debug`
    pub log_spec: String,
    /// Log to rotating files in this directory instead of stderr
    pub log_dir: Option<String>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            db_path: "data/accounts.db".to_string(),
            log_spec: "info".to_string(),
            log_dir: None,
        }
    }
}

impl GateConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup instead of the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            http: HttpConfig {
                host: lookup("GATE_HOST").unwrap_or(defaults.http.host),
                port: lookup("GATE_PORT")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.http.port),
            },
            db_path: lookup("GATE_DB_PATH").unwrap_or(defaults.db_path),
            log_spec: lookup("RUST_LOG").unwrap_or(defaults.log_spec),
            log_dir: lookup("GATE_LOG_DIR").filter(|dir| !dir.is_empty()),
        }
    }
}

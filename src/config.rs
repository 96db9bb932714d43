use figment::Figment;
use figment::providers::{Env, Serialized};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Runtime configuration, resolved once at startup from defaults merged
/// with `LACQUER_*` environment variables (a `.env` file is honored by the
/// binaries before the first access).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// SQLite database URL, e.g. `sqlite:lacquer.db`.
    pub database_url: String,
    /// Address the HTTP server binds to.
    pub listen_addr: String,
    /// Allowed CORS origin; `None` allows any origin.
    pub cors_origin: Option<String>,
    /// Fallback tracing filter when `RUST_LOG` is unset.
    pub loglevel: String,
    /// Base URL the desk client talks to.
    pub api_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:lacquer.db".to_string(),
            listen_addr: "0.0.0.0:5000".to_string(),
            cors_origin: None,
            loglevel: "info".to_string(),
            api_url: "http://localhost:5000".to_string(),
        }
    }
}

pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Env::prefixed("LACQUER_"))
        .extract()
        .expect("invalid LACQUER_* configuration")
});

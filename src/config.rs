use axum_extra::extract::cookie::Key;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::SnipboxError;

/// Optional config file looked up in the working directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Prefix for environment overrides, e.g. `SNIPBOX_BASIC__OWNER_USERNAME`.
pub const ENV_PREFIX: &str = "SNIPBOX_";

/// Minimum secret length accepted by the cookie `Key`.
const MIN_SECRET_LEN: usize = 64;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub basic: BasicConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicConfig {
    /// The only account allowed to manage snippets.
    pub owner_username: String,
    /// Master key for the private session cookies.
    pub secret_key: String,
    pub database_url: String,
    pub listen_addr: String,
    pub port: u16,
    pub loglevel: String,
    /// Omit the `Secure` cookie attribute. On by default because the default
    /// listener is plain HTTP; set to `false` when serving behind TLS.
    pub insecure_cookie: bool,
}

impl Default for BasicConfig {
    fn default() -> Self {
        Self {
            owner_username: "admin".to_string(),
            secret_key: String::new(),
            database_url: "sqlite:snipbox.db".to_string(),
            listen_addr: "0.0.0.0".to_string(),
            port: 5000,
            loglevel: "info".to_string(),
            insecure_cookie: true,
        }
    }
}

impl Config {
    /// Defaults, then `config.toml`, then `SNIPBOX_*` variables, then `PORT`.
    pub fn load() -> Result<Self, SnipboxError> {
        Self::figment(Figment::from(Serialized::defaults(Config::default())))
            .extract()
            .map_err(SnipboxError::from)
    }

    fn figment(base: Figment) -> Figment {
        base.merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .merge(Env::raw().only(&["PORT"]).map(|_| "basic.port".into()))
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.basic.listen_addr, self.basic.port)
    }

    /// Build the cookie key from `secret_key`, or a random one when unset.
    pub fn session_key(&self) -> Result<Key, SnipboxError> {
        let secret = self.basic.secret_key.as_bytes();
        if secret.is_empty() {
            warn!("secret_key not configured; sessions will not survive a restart");
            return Ok(Key::generate());
        }
        if secret.len() < MIN_SECRET_LEN {
            return Err(SnipboxError::Config(format!(
                "secret_key must be at least {MIN_SECRET_LEN} bytes, got {}",
                secret.len()
            )));
        }
        Key::try_from(secret).map_err(|e| SnipboxError::Config(e.to_string()))
    }
}

//! Process configuration schemas.
//!
//! Configuration is merged by the `config` crate from an optional base file,
//! an optional environment overlay, and `CERBER__*` environment variables.

pub mod logging;
pub mod server;

use serde::{Deserialize, Serialize};

use self::logging::LoggingConfig;
use self::server::ServerConfig;

use crate::error::CerberError;

/// Root process configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Realm name; becomes the `iss` claim of every token.
    #[serde(default = "default_realm")]
    pub realm: String,
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Zone provider URIs, in lookup priority order.
    #[serde(default = "default_providers")]
    pub providers: Vec<String>,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            realm: default_realm(),
            server: ServerConfig::default(),
            providers: default_providers(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration.
    ///
    /// Merges `config_path` (any format the `config` crate understands, the
    /// extension may be omitted), then `config/{env}`, then environment
    /// variables prefixed with `CERBER` and separated by `__`. All sources
    /// are optional.
    pub fn load(config_path: &str, env: &str) -> Result<Self, CerberError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("CERBER")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("providers")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| CerberError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| CerberError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Parse configuration from a TOML document.
    pub fn from_toml(text: &str) -> Result<Self, CerberError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(text, config::FileFormat::Toml))
            .build()?;
        Ok(config.try_deserialize()?)
    }
}

fn default_realm() -> String {
    "cerber".to_string()
}

fn default_providers() -> Vec<String> {
    vec!["directory://./zones".to_string()]
}

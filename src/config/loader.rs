//! Configuration loading from disk and environment.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Name of the environment variable pointing at an optional TOML file.
const CONFIG_FILE_VAR: &str = "GATEWAY_CONFIG";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Env { var: &'static str, reason: String },
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Env { var, reason } => write!(f, "Invalid {}: {}", var, reason),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load the gateway configuration.
///
/// Starts from the TOML file named by `GATEWAY_CONFIG` (or defaults when
/// unset), applies environment-variable overrides, then validates.
pub fn load() -> Result<GatewayConfig, ConfigError> {
    let mut config = match env::var(CONFIG_FILE_VAR) {
        Ok(path) => load_file(Path::new(&path))?,
        Err(_) => GatewayConfig::default(),
    };
    apply_env_overrides(&mut config)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and deserialize configuration from a TOML file.
pub fn load_file(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    toml::from_str(&content).map_err(ConfigError::Parse)
}

/// Apply environment-variable overrides on top of the loaded config.
fn apply_env_overrides(config: &mut GatewayConfig) -> Result<(), ConfigError> {
    if let Ok(port) = env::var("PORT") {
        config.server.port = port.parse().map_err(|e| ConfigError::Env {
            var: "PORT",
            reason: format!("{}", e),
        })?;
    }
    if let Ok(client_id) = env::var("PLAID_CLIENT_ID") {
        config.upstream.credentials.client_id = client_id;
    }
    if let Ok(secret) = env::var("PLAID_SECRET") {
        config.upstream.credentials.secret = secret;
    }
    if let Ok(environment) = env::var("PLAID_ENV") {
        config.upstream.environment = environment;
    }
    if let Ok(dir) = env::var("UPLOAD_DIR") {
        config.uploads.dir = PathBuf::from(dir);
    }
    Ok(())
}

//! Configuration loader.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::ConfigError;
use crate::schema::Config;

/// Environment variable naming a page list file.
pub const CONFIG_ENV_VAR: &str = "PAGEWATCH_CONFIG";

const BUILTIN_PAGES: &str = include_str!("../pages.toml");

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load configuration from a string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let config: Config = toml::from_str(&expanded)?;
        Ok(config)
    }

    /// The page list compiled into the binary.
    pub fn builtin() -> Result<Config, ConfigError> {
        toml::from_str(BUILTIN_PAGES)
            .map_err(|e| ConfigError::InvalidFormat(format!("built-in page list: {}", e)))
    }

    /// Pick and load the page list.
    ///
    /// Order: explicit path, `$PAGEWATCH_CONFIG`, the user config file, the
    /// built-in list. Only the explicit path and the environment variable
    /// must exist.
    pub fn resolve(explicit: Option<&Path>) -> Result<Config, ConfigError> {
        if let Some(path) = explicit {
            let path = PathBuf::from(Self::expand_path(&path.to_string_lossy()));
            debug!("Loading page list from {}", path.display());
            return Self::load(&path);
        }

        if let Ok(value) = std::env::var(CONFIG_ENV_VAR) {
            if !value.is_empty() {
                let path = PathBuf::from(Self::expand_path(&value));
                debug!("Loading page list from ${} ({})", CONFIG_ENV_VAR, path.display());
                return Self::load(&path);
            }
        }

        if let Some(path) = Self::user_config_path() {
            if path.is_file() {
                debug!("Loading page list from {}", path.display());
                return Self::load(&path);
            }
        }

        debug!("Using built-in page list");
        Self::builtin()
    }

    /// `<config dir>/pagewatch/pages.toml`, if the platform has a config dir.
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("pagewatch").join("pages.toml"))
    }

    /// Expand environment variables in the format `${VAR}`.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();
        let re = regex::Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let var_value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }

    /// Expand shell-style paths (e.g., `~/.config`).
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }
}

use crate::config::{HttpSettings, ProfileSettings};
use crate::utils::error::{FuncError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional file-based configuration. Every field is an override; anything
/// left out keeps the value resolved from the environment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub storage: Option<StorageConfig>,
    pub http: Option<HttpConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    pub connection_string: Option<String>,
    pub container: Option<String>,
    pub blob: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HttpConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FuncError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Self::from_toml_str_with(content, |name| std::env::var(name).ok())
    }

    /// Parses `content` after replacing `${VAR}` placeholders through `lookup`.
    /// Unset variables become empty strings.
    pub fn from_toml_str_with<F>(content: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let processed_content = Self::substitute_env_vars(content, lookup)?;

        toml::from_str(&processed_content).map_err(|e| FuncError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    fn substitute_env_vars<F>(content: &str, lookup: F) -> Result<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FuncError::ConfigError {
            message: format!("Invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            match lookup(var_name) {
                Some(value) => value,
                None => {
                    tracing::warn!("Environment variable {} referenced in config is not set", var_name);
                    String::new()
                }
            }
        });

        Ok(result.into_owned())
    }

    pub fn apply_to_profile(&self, settings: &mut ProfileSettings) {
        let Some(storage) = &self.storage else {
            return;
        };

        if let Some(connection_string) = &storage.connection_string {
            settings.connection_string = Some(connection_string.clone());
        }
        if let Some(container) = &storage.container {
            settings.container = container.clone();
        }
        if let Some(blob) = &storage.blob {
            settings.blob = blob.clone();
        }
    }

    pub fn apply_to_http(&self, settings: &mut HttpSettings) {
        let Some(http) = &self.http else {
            return;
        };

        if let Some(host) = &http.host {
            settings.host = host.clone();
        }
        if let Some(port) = http.port {
            settings.port = port;
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        let mut settings = ProfileSettings::default();
        self.apply_to_profile(&mut settings);
        settings.validate()?;

        if let Some(host) = self.http.as_ref().and_then(|h| h.host.as_deref()) {
            crate::utils::validation::validate_non_empty_string("http.host", host)?;
        }

        Ok(())
    }
}

#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};

use crate::domain::model::{DEFAULT_BLOB, DEFAULT_CONTAINER};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{FuncError, Result, CONNECTION_STRING_VAR};
use crate::utils::validation::{validate_blob_name, validate_container_name, Validate};
use std::net::{SocketAddr, ToSocketAddrs};

pub const CONTAINER_VAR: &str = "ProfileContainer";
pub const BLOB_VAR: &str = "ProfileBlob";
pub const CUSTOM_HANDLER_PORT_VAR: &str = "FUNCTIONS_CUSTOMHANDLER_PORT";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 7071;
pub const DEFAULT_HANDLER_PORT: u16 = 8080;

/// Everything the profile handler needs, resolved once and injected.
///
/// The connection string stays optional here: a missing value is reported
/// per request as a 500, not at start-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSettings {
    pub connection_string: Option<String>,
    pub container: String,
    pub blob: String,
}

impl ProfileSettings {
    pub fn new(connection_string: Option<String>) -> Self {
        Self {
            connection_string,
            container: DEFAULT_CONTAINER.to_string(),
            blob: DEFAULT_BLOB.to_string(),
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Self {
            connection_string: lookup(CONNECTION_STRING_VAR),
            container: non_empty(CONTAINER_VAR).unwrap_or_else(|| DEFAULT_CONTAINER.to_string()),
            blob: non_empty(BLOB_VAR).unwrap_or_else(|| DEFAULT_BLOB.to_string()),
        }
    }

    pub fn with_location(mut self, container: impl Into<String>, blob: impl Into<String>) -> Self {
        self.container = container.into();
        self.blob = blob.into();
        self
    }
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self::new(None)
    }
}

impl ConfigProvider for ProfileSettings {
    fn connection_string(&self) -> Option<&str> {
        self.connection_string
            .as_deref()
            .filter(|value| !value.is_empty())
    }

    fn container(&self) -> &str {
        &self.container
    }

    fn blob(&self) -> &str {
        &self.blob
    }
}

impl Validate for ProfileSettings {
    fn validate(&self) -> Result<()> {
        validate_container_name("storage.container", &self.container)?;
        validate_blob_name("storage.blob", &self.blob)?;

        if self.connection_string().is_none() {
            tracing::warn!(
                "{} is not set; every request will answer 500 until it is configured",
                CONNECTION_STRING_VAR
            );
        }

        tracing::debug!("Profile settings validation passed");
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSettings {
    pub host: String,
    pub port: u16,
}

impl HttpSettings {
    /// Listener settings for the Functions custom handler process.
    pub fn for_custom_handler() -> Result<Self> {
        let port = match std::env::var(CUSTOM_HANDLER_PORT_VAR) {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| FuncError::InvalidConfigValueError {
                    field: CUSTOM_HANDLER_PORT_VAR.to_string(),
                    value: raw.clone(),
                    reason: "Port must be a number between 0 and 65535".to_string(),
                })?,
            Err(_) => DEFAULT_HANDLER_PORT,
        };

        Ok(Self {
            host: "0.0.0.0".to_string(),
            port,
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        (self.host.as_str(), self.port)
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| FuncError::InvalidConfigValueError {
                field: "http.host".to_string(),
                value: self.host.clone(),
                reason: "Host did not resolve to any address".to_string(),
            })
    }
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

use crate::core::{BlobStore, ConfigProvider, ProfileDocument, Result, StoreConnector};
use crate::utils::error::{ErrorKind, FuncError};

/// Request-processing logic behind `GET /profile`.
///
/// Each call is independent: the connection string is checked, a store is
/// built from it, and the configured blob is read fresh. Nothing is cached.
pub struct ProfileHandler<C: StoreConnector, P: ConfigProvider> {
    pub(crate) connector: C,
    pub(crate) config: P,
}

impl<C: StoreConnector, P: ConfigProvider> ProfileHandler<C, P> {
    pub fn new(connector: C, config: P) -> Self {
        Self { connector, config }
    }

    pub async fn fetch(&self) -> Result<ProfileDocument> {
        tracing::info!("GetProfile function triggered.");

        let result = self.read_profile().await;

        if let Err(e) = &result {
            match e.kind() {
                ErrorKind::ConfigMissing => tracing::error!("{}", e),
                ErrorKind::NotFound => tracing::warn!("{}", e),
                ErrorKind::StoreFailure => tracing::error!(error = %e, "Error in GetProfile."),
            }
        }

        result
    }

    async fn read_profile(&self) -> Result<ProfileDocument> {
        // No store access at all without a connection string.
        let connection_string = self
            .config
            .connection_string()
            .ok_or_else(FuncError::missing_connection_string)?;

        let location = self.config.location();
        let store = self.connector.connect(connection_string)?;

        if !store.exists(&location).await? {
            return Err(FuncError::BlobNotFound {
                container: location.container,
                key: location.key,
            });
        }

        let bytes = store.download(&location).await?;
        tracing::debug!(blob = %location, size = bytes.len(), "Downloaded profile document");

        let body = String::from_utf8(bytes)?;
        Ok(ProfileDocument { body })
    }
}

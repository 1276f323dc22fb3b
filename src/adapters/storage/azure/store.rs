use super::connection_string::{ConnectionString, Credential};
use crate::domain::model::BlobLocation;
use crate::domain::ports::{BlobStore, StoreConnector};
use crate::utils::error::{FuncError, Result};
use chrono::Utc;
use reqsign::azure::{DefaultSigner, StaticCredentialProvider};
use reqwest::{Method, StatusCode};
use std::fmt;
use std::sync::Arc;
use url::Url;

pub const STORAGE_API_VERSION: &str = "2021-08-06";
const RFC1123_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Blob store backed by the Azure Blob Storage REST API.
#[derive(Clone)]
pub struct AzureBlobStore {
    client: reqwest::Client,
    connection: ConnectionString,
    signer: Option<Arc<DefaultSigner>>,
}

impl fmt::Debug for AzureBlobStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AzureBlobStore")
            .field("connection", &self.connection)
            .field("signed", &self.signer.is_some())
            .finish()
    }
}

impl AzureBlobStore {
    pub fn new(client: reqwest::Client, connection: ConnectionString) -> Self {
        let signer = match &connection.credential {
            Credential::SharedKey { account, key } => Some(Arc::new(
                reqsign::azure::default_signer()
                    .with_credential_provider(StaticCredentialProvider::new_shared_key(account.as_str(), key.as_str())),
            )),
            Credential::Sas(_) | Credential::Anonymous => None,
        };

        Self {
            client,
            connection,
            signer,
        }
    }

    pub fn blob_url(&self, location: &BlobLocation) -> Result<Url> {
        let mut url = self.connection.blob_endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| FuncError::InvalidConnectionString {
                reason: "BlobEndpoint cannot be used as a base URL".to_string(),
            })?
            .pop_if_empty()
            .push(&location.container)
            .extend(location.key.split('/'));

        if let Credential::Sas(token) = &self.connection.credential {
            url.set_query(Some(token));
        }

        Ok(url)
    }

    /// Adds the Shared Key `Authorization` header (and the signer's own
    /// `x-ms-date`) to a built request.
    async fn sign(signer: &DefaultSigner, request: &mut reqwest::Request) -> Result<()> {
        let (mut parts, ()) = http::Request::new(()).into_parts();
        parts.method = request.method().clone();
        parts.uri = request
            .url()
            .as_str()
            .parse::<http::Uri>()
            .map_err(|e| FuncError::SigningError {
                message: e.to_string(),
            })?;
        parts.headers = request.headers().clone();

        signer
            .sign(&mut parts, None)
            .await
            .map_err(|e| FuncError::SigningError {
                message: e.to_string(),
            })?;

        *request.headers_mut() = parts.headers;
        Ok(())
    }

    async fn send(
        &self,
        method: Method,
        location: &BlobLocation,
    ) -> Result<reqwest::Response> {
        let url = self.blob_url(location)?;

        let mut request = self
            .client
            .request(method, url)
            .header("x-ms-date", Utc::now().format(RFC1123_FORMAT).to_string())
            .header("x-ms-version", STORAGE_API_VERSION)
            .build()?;

        if let Some(signer) = &self.signer {
            Self::sign(signer, &mut request).await?;
        }

        tracing::debug!(method = %request.method(), blob = %location, "Sending blob storage request");
        let response = self.client.execute(request).await?;
        tracing::debug!(status = response.status().as_u16(), blob = %location, "Blob storage responded");

        Ok(response)
    }
}

fn unexpected_status(
    operation: &'static str,
    location: &BlobLocation,
    response: &reqwest::Response,
) -> FuncError {
    FuncError::UnexpectedStatus {
        operation,
        resource: location.to_string(),
        status: response.status().as_u16(),
        error_code: response
            .headers()
            .get("x-ms-error-code")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    }
}

impl BlobStore for AzureBlobStore {
    async fn exists(&self, location: &BlobLocation) -> Result<bool> {
        let response = self.send(Method::HEAD, location).await?;

        match response.status() {
            status if status.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            _ => Err(unexpected_status("exists", location, &response)),
        }
    }

    async fn download(&self, location: &BlobLocation) -> Result<Vec<u8>> {
        let response = self.send(Method::GET, location).await?;

        if !response.status().is_success() {
            return Err(unexpected_status("download", location, &response));
        }

        let body = response.bytes().await?;
        Ok(body.to_vec())
    }
}

/// Builds an [`AzureBlobStore`] per connection string, sharing one HTTP client.
#[derive(Debug, Clone)]
pub struct AzureConnector {
    client: reqwest::Client,
}

impl AzureConnector {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("profile-func/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl StoreConnector for AzureConnector {
    type Store = AzureBlobStore;

    fn connect(&self, connection_string: &str) -> Result<AzureBlobStore> {
        let connection = ConnectionString::parse(connection_string)?;
        Ok(AzureBlobStore::new(self.client.clone(), connection))
    }
}

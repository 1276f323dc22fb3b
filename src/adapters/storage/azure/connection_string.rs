use crate::utils::error::{FuncError, Result};
use crate::utils::validation::validate_url;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::fmt;
use url::Url;

pub const DEFAULT_ENDPOINT_SUFFIX: &str = "core.windows.net";

// Well-known emulator account, published by Microsoft for local development.
pub const DEV_ACCOUNT_NAME: &str = "devstoreaccount1";
pub const DEV_ACCOUNT_KEY: &str =
    "Eby8vdM02xNOcqFlqUwJPLlmEtlCDXJ1OUzFT50uSRZ6IFsuFq2UVErCz4I6tq/K1SZFPTOtr/KBHBeksoGMGw==";
pub const DEV_BLOB_ENDPOINT: &str = "http://127.0.0.1:10000/devstoreaccount1";

#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// `key` stays base64 encoded, the form the request signer consumes.
    SharedKey { account: String, key: String },
    Sas(String),
    Anonymous,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credential::SharedKey { account, .. } => f
                .debug_struct("SharedKey")
                .field("account", account)
                .field("key", &"<redacted>")
                .finish(),
            Credential::Sas(_) => f.write_str("Sas(<redacted>)"),
            Credential::Anonymous => f.write_str("Anonymous"),
        }
    }
}

/// A parsed storage account connection string: where the blob service
/// lives and how to authenticate against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionString {
    pub blob_endpoint: Url,
    pub credential: Credential,
}

#[derive(Default)]
struct Fields<'a> {
    protocol: Option<&'a str>,
    account_name: Option<&'a str>,
    account_key: Option<&'a str>,
    endpoint_suffix: Option<&'a str>,
    blob_endpoint: Option<&'a str>,
    sas: Option<&'a str>,
    development: bool,
}

impl ConnectionString {
    pub fn parse(raw: &str) -> Result<Self> {
        let fields = Self::split_fields(raw)?;

        if fields.development {
            return Ok(Self {
                blob_endpoint: Self::endpoint_url(DEV_BLOB_ENDPOINT)?,
                credential: Credential::SharedKey {
                    account: DEV_ACCOUNT_NAME.to_string(),
                    key: checked_key(DEV_ACCOUNT_KEY)?,
                },
            });
        }

        let blob_endpoint = match (fields.blob_endpoint, fields.account_name) {
            (Some(endpoint), _) => Self::endpoint_url(endpoint)?,
            (None, Some(account)) => {
                let protocol = fields.protocol.unwrap_or("https");
                let suffix = fields.endpoint_suffix.unwrap_or(DEFAULT_ENDPOINT_SUFFIX);
                Self::endpoint_url(&format!("{}://{}.blob.{}", protocol, account, suffix))?
            }
            (None, None) => {
                return Err(invalid("AccountName or BlobEndpoint is required"));
            }
        };

        let credential = match (fields.sas, fields.account_key, fields.account_name) {
            (Some(sas), _, _) => Credential::Sas(sas.trim_start_matches('?').to_string()),
            (None, Some(key), Some(account)) => Credential::SharedKey {
                account: account.to_string(),
                key: checked_key(key)?,
            },
            (None, Some(_), None) => {
                return Err(invalid("AccountKey requires AccountName"));
            }
            (None, None, _) if fields.blob_endpoint.is_some() => Credential::Anonymous,
            (None, None, _) => {
                return Err(invalid("AccountKey or SharedAccessSignature is required"));
            }
        };

        Ok(Self {
            blob_endpoint,
            credential,
        })
    }

    fn split_fields(raw: &str) -> Result<Fields<'_>> {
        let mut fields = Fields::default();

        for segment in raw.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            let (key, value) = segment
                .split_once('=')
                .ok_or_else(|| invalid("expected Key=Value pairs separated by ';'"))?;
            let value = value.trim();

            match key.trim().to_ascii_lowercase().as_str() {
                "defaultendpointsprotocol" => fields.protocol = Some(value),
                "accountname" => fields.account_name = Some(value),
                "accountkey" => fields.account_key = Some(value),
                "endpointsuffix" => fields.endpoint_suffix = Some(value),
                "blobendpoint" => fields.blob_endpoint = Some(value),
                "sharedaccesssignature" => fields.sas = Some(value),
                "usedevelopmentstorage" => fields.development = value.eq_ignore_ascii_case("true"),
                other => tracing::debug!("Ignoring connection string key {}", other),
            }
        }

        Ok(fields)
    }

    fn endpoint_url(endpoint: &str) -> Result<Url> {
        validate_url("BlobEndpoint", endpoint).map_err(|e| invalid(&e.to_string()))
    }

}

fn checked_key(key: &str) -> Result<String> {
    STANDARD
        .decode(key)
        .map_err(|_| invalid("AccountKey is not valid base64"))?;
    Ok(key.to_string())
}

fn invalid(reason: &str) -> FuncError {
    FuncError::InvalidConnectionString {
        reason: reason.to_string(),
    }
}

use thiserror::Error;

/// Name of the setting that carries the blob store connection string.
pub const CONNECTION_STRING_VAR: &str = "BlobConnectionString";

#[derive(Error, Debug)]
pub enum FuncError {
    #[error("{field} is not configured.")]
    MissingConfigError { field: String },

    #[error("Blob {container}/{key} not found.")]
    BlobNotFound { container: String, key: String },

    #[error("Invalid connection string: {reason}")]
    InvalidConnectionString { reason: String },

    #[error("Blob storage returned {status} for {operation} on {resource}")]
    UnexpectedStatus {
        operation: &'static str,
        resource: String,
        status: u16,
        error_code: Option<String>,
    },

    #[error("Storage request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Failed to sign storage request: {message}")]
    SigningError { message: String },

    #[error("Blob content is not valid UTF-8: {0}")]
    DecodeError(#[from] std::string::FromUtf8Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

/// The three outcomes a caller can tell apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ConfigMissing,
    NotFound,
    StoreFailure,
}

impl FuncError {
    pub fn missing_connection_string() -> Self {
        FuncError::MissingConfigError {
            field: CONNECTION_STRING_VAR.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            FuncError::MissingConfigError { .. } => ErrorKind::ConfigMissing,
            FuncError::BlobNotFound { .. } => ErrorKind::NotFound,
            _ => ErrorKind::StoreFailure,
        }
    }

    /// Text that is safe to hand back to an HTTP caller.
    ///
    /// Store failures collapse to a single generic message so that
    /// endpoints, account names and status codes never leak.
    pub fn public_message(&self) -> String {
        match self.kind() {
            ErrorKind::ConfigMissing | ErrorKind::NotFound => self.to_string(),
            ErrorKind::StoreFailure => "Internal server error.".to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            FuncError::MissingConfigError { .. } => {
                "Set the BlobConnectionString environment variable or [storage].connection_string"
            }
            FuncError::BlobNotFound { .. } => {
                "Upload the profile document to the configured container"
            }
            FuncError::InvalidConnectionString { .. } => {
                "Copy the connection string again from the storage account's access keys"
            }
            FuncError::UnexpectedStatus { status: 403, .. } => {
                "Check that the account key or SAS token is valid and not expired"
            }
            FuncError::UnexpectedStatus { .. } | FuncError::HttpError(_) => {
                "Check network access to the storage account and retry"
            }
            FuncError::SigningError { .. } => "Check the AccountName and AccountKey pair",
            FuncError::DecodeError(_) => "Re-upload the blob as UTF-8 encoded JSON",
            FuncError::IoError(_) => "Check file paths and permissions",
            FuncError::ConfigError { .. }
            | FuncError::ConfigValidationError { .. }
            | FuncError::InvalidConfigValueError { .. } => "Fix the configuration and restart",
        }
    }
}

pub type Result<T> = std::result::Result<T, FuncError>;

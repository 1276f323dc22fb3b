//! Azure Blob Storage over its REST API.
//!
//! Only the two read operations the profile endpoint needs are implemented:
//! a `HEAD` for existence and a `GET` for the body. Shared Key requests
//! are signed with `reqsign`.

pub mod connection_string;
pub mod store;

pub use connection_string::{ConnectionString, Credential};
pub use store::{AzureBlobStore, AzureConnector, STORAGE_API_VERSION};

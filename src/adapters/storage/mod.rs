pub mod azure;

pub use azure::{AzureBlobStore, AzureConnector};

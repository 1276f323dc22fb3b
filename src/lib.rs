pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod http;
pub mod utils;

pub use adapters::storage::{AzureBlobStore, AzureConnector};
pub use config::{HttpSettings, ProfileSettings};
pub use crate::core::ProfileHandler;
pub use http::create_router;
pub use utils::error::{ErrorKind, FuncError, Result};

pub mod handler;

pub use crate::domain::model::{BlobLocation, ProfileDocument};
pub use crate::domain::ports::{BlobStore, ConfigProvider, StoreConnector};
pub use crate::utils::error::Result;

pub use handler::ProfileHandler;

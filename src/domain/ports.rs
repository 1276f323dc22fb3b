use crate::domain::model::BlobLocation;
use crate::utils::error::Result;

/// Read-only view of a blob store addressed by container and key.
pub trait BlobStore: Send + Sync {
    fn exists(
        &self,
        location: &BlobLocation,
    ) -> impl std::future::Future<Output = Result<bool>> + Send;
    fn download(
        &self,
        location: &BlobLocation,
    ) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}

/// Turns an opaque connection string into a usable store.
pub trait StoreConnector: Send + Sync {
    type Store: BlobStore;

    fn connect(&self, connection_string: &str) -> Result<Self::Store>;
}

pub trait ConfigProvider: Send + Sync {
    fn connection_string(&self) -> Option<&str>;
    fn container(&self) -> &str;
    fn blob(&self) -> &str;

    fn location(&self) -> BlobLocation {
        BlobLocation::new(self.container(), self.blob())
    }
}

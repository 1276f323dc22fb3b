use std::fmt;

pub const DEFAULT_CONTAINER: &str = "site-content";
pub const DEFAULT_BLOB: &str = "profile.json";

/// Address of one object in a blob store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlobLocation {
    pub container: String,
    pub key: String,
}

impl BlobLocation {
    pub fn new(container: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            key: key.into(),
        }
    }
}

impl Default for BlobLocation {
    fn default() -> Self {
        Self::new(DEFAULT_CONTAINER, DEFAULT_BLOB)
    }
}

impl fmt::Display for BlobLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.container, self.key)
    }
}

/// The profile payload exactly as stored. Assumed to be JSON, never parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileDocument {
    pub body: String,
}

impl ProfileDocument {
    pub fn into_body(self) -> String {
        self.body
    }
}

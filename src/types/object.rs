use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the bucket backing the capacity tier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BucketName(String);

impl BucketName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for BucketName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<&str> for BucketName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl fmt::Display for BucketName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque object identifier within a bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectKey(String);

impl ObjectKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ObjectKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl From<&str> for ObjectKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One entry of a bucket listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListedObject {
    pub key: ObjectKey,
    pub size_bytes: u64,
}

/// Contents returned by a successful list call. A failed call is represented
/// by the absence of a listing (`Option<ObjectListing>` = `None`), not by an
/// empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ObjectListing {
    pub contents: Vec<ListedObject>,
}

impl ObjectListing {
    pub fn contains_key(&self, key: &ObjectKey) -> bool {
        self.contents.iter().any(|object| object.key == *key)
    }

    /// The cheapest object to fetch. Ties are broken by iteration order,
    /// which the storage backend does not define.
    pub fn smallest(&self) -> Option<&ListedObject> {
        self.contents.iter().min_by_key(|object| object.size_bytes)
    }
}

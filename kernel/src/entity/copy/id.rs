use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize, Fromln, AsRefln)]
pub struct CopyId(i64);

impl CopyId {
    pub fn new(id: impl Into<i64>) -> Self {
        Self(id.into())
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct StoreLocation(String);

impl StoreLocation {
    pub fn new(location: impl Into<String>) -> Self {
        Self(location.into())
    }
}

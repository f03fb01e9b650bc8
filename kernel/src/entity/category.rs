use destructure::Destructure;
use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln, References};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize, Fromln, AsRefln)]
pub struct CategoryId(i64);

impl CategoryId {
    pub fn new(id: impl Into<i64>) -> Self {
        Self(id.into())
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct CategoryName(String);

impl CategoryName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, References, Destructure)]
pub struct Category {
    id: CategoryId,
    name: CategoryName,
}

impl Category {
    pub fn new(id: CategoryId, name: CategoryName) -> Self {
        Self { id, name }
    }
}

use destructure::Destructure;
use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln, References};

use crate::entity::{FirstName, LastName};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize, Fromln, AsRefln)]
pub struct ActorId(i64);

impl ActorId {
    pub fn new(id: impl Into<i64>) -> Self {
        Self(id.into())
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, References, Destructure)]
pub struct Actor {
    id: ActorId,
    first_name: FirstName,
    last_name: LastName,
}

impl Actor {
    pub fn new(id: ActorId, first_name: FirstName, last_name: LastName) -> Self {
        Self {
            id,
            first_name,
            last_name,
        }
    }
}

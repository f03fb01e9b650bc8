use destructure::Destructure;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vodca::{AsRefln, Fromln, References};

use crate::entity::{CreatedAt, Role, UserId, UserName};

/// Opaque bearer token handed out on login.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize, Fromln, AsRefln)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new(id: impl Into<Uuid>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, References, Destructure)]
pub struct Session {
    id: SessionId,
    user_id: UserId,
    user_name: UserName,
    role: Role,
    created_at: CreatedAt<Session>,
}

impl Session {
    pub fn new(
        id: SessionId,
        user_id: UserId,
        user_name: UserName,
        role: Role,
        created_at: CreatedAt<Session>,
    ) -> Self {
        Self {
            id,
            user_id,
            user_name,
            role,
            created_at,
        }
    }
}

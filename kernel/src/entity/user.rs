mod id;
mod name;
mod password;
mod role;

pub use self::{id::*, name::*, password::*, role::*};
use destructure::Destructure;
use vodca::References;

/// A login account. Unrelated to [`Customer`](crate::entity::Customer) identity.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct User {
    id: UserId,
    name: UserName,
    password_hash: PasswordHash,
    role: Role,
}

impl User {
    pub fn new(id: UserId, name: UserName, password_hash: PasswordHash, role: Role) -> Self {
        Self {
            id,
            name,
            password_hash,
            role,
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct NewUser {
    name: UserName,
    password_hash: PasswordHash,
    role: Role,
}

impl NewUser {
    pub fn new(name: UserName, password_hash: PasswordHash, role: Role) -> Self {
        Self {
            name,
            password_hash,
            role,
        }
    }
}

use uuid::Uuid;

use kernel::prelude::entity::{DestructSession, Session};

pub struct RegisterDto {
    pub name: String,
    pub password: String,
    pub confirm_password: String,
}

pub struct LoginDto {
    pub name: String,
    pub password: String,
}

pub struct LogoutDto {
    pub session_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct SessionDto {
    pub id: Uuid,
    pub user_id: i64,
    pub user_name: String,
    pub role: String,
}

impl From<Session> for SessionDto {
    fn from(value: Session) -> Self {
        let DestructSession {
            id,
            user_id,
            user_name,
            role,
            ..
        } = value.into_destruct();
        Self {
            id: id.into(),
            user_id: user_id.into(),
            user_name: user_name.into(),
            role: role.to_string(),
        }
    }
}

use error_stack::Report;

use kernel::KernelError;

mod auth;
mod catalog;
mod customer;
mod rental;
mod report;

pub use self::{auth::*, catalog::*, customer::*, rental::*, report::*};

/// Trims `value`, rejecting it with [`KernelError::Validation`] when nothing is left.
fn required(field: &str, value: &str) -> error_stack::Result<String, KernelError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Report::new(KernelError::Validation)
            .attach_printable(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// Blank optional text counts as absent.
fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn invalid(message: impl Into<String>) -> Report<KernelError> {
    Report::new(KernelError::Validation).attach_printable(message.into())
}

fn not_found(message: impl Into<String>) -> Report<KernelError> {
    Report::new(KernelError::NotFound).attach_printable(message.into())
}

#[cfg(test)]
mod test_support {
    use driver::database::SqliteDatabase;
    use driver::hash::Argon2Hasher;
    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::interface::hash::PasswordHasher;
    use kernel::interface::update::{SessionModifier, UserModifier};
    use kernel::prelude::entity::{
        CreatedAt, NewUser, Role, Session, SessionId, UserName,
    };
    use kernel::KernelError;

    use driver::database::{SqliteSessionRepository, SqliteUserRepository};

    /// Stored session for a freshly created account with `role`.
    pub async fn session(
        db: &SqliteDatabase,
        name: &str,
        role: Role,
    ) -> error_stack::Result<Session, KernelError> {
        let mut con = db.transact().await?;
        let user_name = UserName::new(name);
        let user = NewUser::new(user_name.clone(), Argon2Hasher.hash("secret")?, role);
        let user_id = SqliteUserRepository.create(&mut con, &user).await?;
        let session = Session::new(SessionId::generate(), user_id, user_name, role, CreatedAt::now());
        SqliteSessionRepository.create(&mut con, &session).await?;
        con.commit().await?;
        Ok(session)
    }
}

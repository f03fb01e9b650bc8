use error_stack::Report;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::hash::{DependOnPasswordHasher, PasswordHasher};
use kernel::interface::query::{DependOnSessionQuery, DependOnUserQuery, SessionQuery, UserQuery};
use kernel::interface::update::{
    DependOnSessionModifier, DependOnUserModifier, SessionModifier, UserModifier,
};
use kernel::prelude::entity::{CreatedAt, NewUser, Role, Session, SessionId, UserName};
use kernel::KernelError;

use crate::service::{invalid, required};
use crate::transfer::{LoginDto, LogoutDto, RegisterDto, SessionDto};

pub const MIN_PASSWORD_LENGTH: usize = 4;

/// Gate for every protected operation.
///
/// Fails with [`KernelError::Authentication`] when there is no session and with
/// [`KernelError::Authorization`] when the session's role does not satisfy `required`.
pub fn authorize(
    session: Option<&Session>,
    required: Role,
) -> error_stack::Result<&Session, KernelError> {
    let session = session.ok_or_else(|| {
        Report::new(KernelError::Authentication).attach_printable("Login required")
    })?;
    if !session.role().satisfies(required) {
        return Err(Report::new(KernelError::Authorization)
            .attach_printable(format!("{required} role required")));
    }
    Ok(session)
}

#[async_trait::async_trait]
pub trait RegisterService:
    'static + Sync + Send + DependOnUserQuery + DependOnUserModifier + DependOnPasswordHasher
{
    async fn register(&self, dto: RegisterDto) -> error_stack::Result<i64, KernelError> {
        let user_name = required("Username", &dto.name)?;
        if dto.password.trim().is_empty() {
            return Err(invalid("Password is required"));
        }
        if dto.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(invalid(format!(
                "Password must be at least {MIN_PASSWORD_LENGTH} characters"
            )));
        }
        if dto.password != dto.confirm_password {
            return Err(invalid("Passwords do not match"));
        }
        let password_hash = self.password_hasher().hash(&dto.password)?;
        let name = UserName::new(user_name.clone());

        let mut connection = self.database_connection().transact().await?;
        if self
            .user_query()
            .find_by_name(&mut connection, &name)
            .await?
            .is_some()
        {
            return Err(Report::new(KernelError::Conflict)
                .attach_printable(format!("Username {user_name} is taken")));
        }
        let user = NewUser::new(name, password_hash, Role::User);
        let id = self.user_modifier().create(&mut connection, &user).await?;
        connection.commit().await?;

        tracing::info!("registered user {user_name}");
        Ok(id.into())
    }
}

impl<T> RegisterService for T where
    T: DependOnUserQuery + DependOnUserModifier + DependOnPasswordHasher
{
}

#[async_trait::async_trait]
pub trait LoginService:
    'static + Sync + Send + DependOnUserQuery + DependOnSessionModifier + DependOnPasswordHasher
{
    async fn login(&self, dto: LoginDto) -> error_stack::Result<SessionDto, KernelError> {
        let rejected = || {
            Report::new(KernelError::Authentication)
                .attach_printable("Invalid username or password")
        };
        let user_name = dto.name.trim().to_string();
        let name = UserName::new(user_name.clone());

        let mut connection = self.database_connection().transact().await?;
        let Some(user) = self.user_query().find_by_name(&mut connection, &name).await? else {
            tracing::warn!("login rejected for unknown user {user_name}");
            return Err(rejected());
        };
        if !self
            .password_hasher()
            .verify(&dto.password, user.password_hash())?
        {
            tracing::warn!("login rejected for user {user_name}");
            return Err(rejected());
        }

        let session = Session::new(
            SessionId::generate(),
            *user.id(),
            user.name().clone(),
            *user.role(),
            CreatedAt::now(),
        );
        self.session_modifier()
            .create(&mut connection, &session)
            .await?;
        connection.commit().await?;

        tracing::info!("user {user_name} logged in as {}", user.role());
        Ok(SessionDto::from(session))
    }
}

impl<T> LoginService for T where
    T: DependOnUserQuery + DependOnSessionModifier + DependOnPasswordHasher
{
}

#[async_trait::async_trait]
pub trait LogoutService: 'static + Sync + Send + DependOnSessionModifier {
    /// Unknown sessions are ignored.
    async fn logout(&self, dto: LogoutDto) -> error_stack::Result<(), KernelError> {
        let mut connection = self.database_connection().transact().await?;
        self.session_modifier()
            .delete(&mut connection, &SessionId::new(dto.session_id))
            .await?;
        connection.commit().await?;
        Ok(())
    }
}

impl<T> LogoutService for T where T: DependOnSessionModifier {}

#[async_trait::async_trait]
pub trait ResolveSessionService: 'static + Sync + Send + DependOnSessionQuery {
    async fn resolve_session(
        &self,
        session_id: Uuid,
    ) -> error_stack::Result<Option<Session>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let session = self
            .session_query()
            .find_by_id(&mut connection, &SessionId::new(session_id))
            .await?;
        connection.roll_back().await?;
        Ok(session)
    }
}

impl<T> ResolveSessionService for T where T: DependOnSessionQuery {}

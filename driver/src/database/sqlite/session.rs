use sqlx::SqliteConnection;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::query::{DependOnSessionQuery, SessionQuery};
use kernel::interface::update::{DependOnSessionModifier, SessionModifier};
use kernel::prelude::entity::{CreatedAt, Role, Session, SessionId, UserId, UserName};
use kernel::KernelError;

use crate::database::sqlite::{SqliteDatabase, SqliteTransaction};
use crate::error::ConvertError;

pub struct SqliteSessionRepository;

#[async_trait::async_trait]
impl SessionQuery for SqliteSessionRepository {
    type Transaction = SqliteTransaction;

    async fn find_by_id(
        &self,
        con: &mut SqliteTransaction,
        id: &SessionId,
    ) -> error_stack::Result<Option<Session>, KernelError> {
        SqliteSessionInternal::find_by_id(con, id).await
    }
}

#[async_trait::async_trait]
impl SessionModifier for SqliteSessionRepository {
    type Transaction = SqliteTransaction;

    async fn create(
        &self,
        con: &mut SqliteTransaction,
        session: &Session,
    ) -> error_stack::Result<(), KernelError> {
        SqliteSessionInternal::create(con, session).await
    }

    async fn delete(
        &self,
        con: &mut SqliteTransaction,
        id: &SessionId,
    ) -> error_stack::Result<(), KernelError> {
        SqliteSessionInternal::delete(con, id).await
    }
}

impl DependOnSessionQuery for SqliteDatabase {
    type SessionQuery = SqliteSessionRepository;
    fn session_query(&self) -> &Self::SessionQuery {
        &SqliteSessionRepository
    }
}

impl DependOnSessionModifier for SqliteDatabase {
    type SessionModifier = SqliteSessionRepository;
    fn session_modifier(&self) -> &Self::SessionModifier {
        &SqliteSessionRepository
    }
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    session_id: String,
    user_id: i64,
    username: String,
    role: String,
    created_at: OffsetDateTime,
}

impl TryFrom<SessionRow> for Session {
    type Error = error_stack::Report<KernelError>;
    fn try_from(value: SessionRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&value.session_id)
            .map_err(|error| error_stack::Report::new(error).change_context(KernelError::Internal))?;
        Ok(Session::new(
            SessionId::new(id),
            UserId::new(value.user_id),
            UserName::new(value.username),
            value.role.parse::<Role>()?,
            CreatedAt::new(value.created_at),
        ))
    }
}

pub(in crate::database) struct SqliteSessionInternal;

impl SqliteSessionInternal {
    async fn find_by_id(
        con: &mut SqliteConnection,
        id: &SessionId,
    ) -> error_stack::Result<Option<Session>, KernelError> {
        let row = sqlx::query_as::<_, SessionRow>(
            // language=sqlite
            r#"
            SELECT s.session_id, s.user_id, u.username, u.role, s.created_at
            FROM session s
            JOIN app_user u ON u.user_id = s.user_id
            WHERE s.session_id = ?
            "#,
        )
        .bind(Uuid::from(*id).to_string())
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(Session::try_from).transpose()
    }

    async fn create(
        con: &mut SqliteConnection,
        session: &Session,
    ) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=sqlite
            r#"
            INSERT INTO session (session_id, user_id, created_at) VALUES (?, ?, ?)
            "#,
        )
        .bind(Uuid::from(*session.id()).to_string())
        .bind(session.user_id().as_ref())
        .bind(session.created_at().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn delete(
        con: &mut SqliteConnection,
        id: &SessionId,
    ) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=sqlite
            r#"
            DELETE FROM session WHERE session_id = ?
            "#,
        )
        .bind(Uuid::from(*id).to_string())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::SessionQuery;
    use kernel::interface::update::{SessionModifier, UserModifier};
    use kernel::prelude::entity::{
        CreatedAt, NewUser, PasswordHash, Role, Session, SessionId, UserName,
    };
    use kernel::KernelError;

    use crate::database::sqlite::{SqliteDatabase, SqliteSessionRepository, SqliteUserRepository};

    #[tokio::test]
    async fn session_lives_until_deleted() -> error_stack::Result<(), KernelError> {
        let db = SqliteDatabase::in_memory().await?;
        let mut con = db.transact().await?;
        let user_id = SqliteUserRepository
            .create(
                &mut con,
                &NewUser::new(UserName::new("clerk"), PasswordHash::new("x"), Role::User),
            )
            .await?;
        let session = Session::new(
            SessionId::generate(),
            user_id,
            UserName::new("clerk"),
            Role::User,
            CreatedAt::now(),
        );
        SqliteSessionRepository.create(&mut con, &session).await?;

        let found = SqliteSessionRepository
            .find_by_id(&mut con, session.id())
            .await?
            .expect("session exists");
        assert_eq!(found.user_id(), &user_id);
        assert_eq!(found.role(), &Role::User);

        SqliteSessionRepository.delete(&mut con, session.id()).await?;
        let gone = SqliteSessionRepository
            .find_by_id(&mut con, session.id())
            .await?;
        assert!(gone.is_none());
        Ok(())
    }
}

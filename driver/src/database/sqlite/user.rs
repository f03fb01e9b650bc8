use sqlx::SqliteConnection;

use kernel::interface::query::{DependOnUserQuery, UserQuery};
use kernel::interface::update::{DependOnUserModifier, UserModifier};
use kernel::prelude::entity::{NewUser, PasswordHash, Role, User, UserId, UserName};
use kernel::KernelError;

use crate::database::sqlite::{SqliteDatabase, SqliteTransaction};
use crate::error::ConvertError;

pub struct SqliteUserRepository;

#[async_trait::async_trait]
impl UserQuery for SqliteUserRepository {
    type Transaction = SqliteTransaction;

    async fn find_by_id(
        &self,
        con: &mut SqliteTransaction,
        id: &UserId,
    ) -> error_stack::Result<Option<User>, KernelError> {
        SqliteUserInternal::find_by_id(con, id).await
    }

    async fn find_by_name(
        &self,
        con: &mut SqliteTransaction,
        name: &UserName,
    ) -> error_stack::Result<Option<User>, KernelError> {
        SqliteUserInternal::find_by_name(con, name).await
    }
}

#[async_trait::async_trait]
impl UserModifier for SqliteUserRepository {
    type Transaction = SqliteTransaction;

    async fn create(
        &self,
        con: &mut SqliteTransaction,
        user: &NewUser,
    ) -> error_stack::Result<UserId, KernelError> {
        SqliteUserInternal::create(con, user).await
    }
}

impl DependOnUserQuery for SqliteDatabase {
    type UserQuery = SqliteUserRepository;
    fn user_query(&self) -> &Self::UserQuery {
        &SqliteUserRepository
    }
}

impl DependOnUserModifier for SqliteDatabase {
    type UserModifier = SqliteUserRepository;
    fn user_modifier(&self) -> &Self::UserModifier {
        &SqliteUserRepository
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: i64,
    username: String,
    password_hash: String,
    role: String,
}

impl TryFrom<UserRow> for User {
    type Error = error_stack::Report<KernelError>;
    fn try_from(value: UserRow) -> Result<Self, Self::Error> {
        Ok(User::new(
            UserId::new(value.user_id),
            UserName::new(value.username),
            PasswordHash::new(value.password_hash),
            value.role.parse::<Role>()?,
        ))
    }
}

pub(in crate::database) struct SqliteUserInternal;

impl SqliteUserInternal {
    async fn find_by_id(
        con: &mut SqliteConnection,
        id: &UserId,
    ) -> error_stack::Result<Option<User>, KernelError> {
        let row = sqlx::query_as::<_, UserRow>(
            // language=sqlite
            r#"
            SELECT user_id, username, password_hash, role FROM app_user WHERE user_id = ?
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(User::try_from).transpose()
    }

    async fn find_by_name(
        con: &mut SqliteConnection,
        name: &UserName,
    ) -> error_stack::Result<Option<User>, KernelError> {
        let row = sqlx::query_as::<_, UserRow>(
            // language=sqlite
            r#"
            SELECT user_id, username, password_hash, role FROM app_user WHERE username = ?
            "#,
        )
        .bind(name.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(User::try_from).transpose()
    }

    pub(in crate::database) async fn create(
        con: &mut SqliteConnection,
        user: &NewUser,
    ) -> error_stack::Result<UserId, KernelError> {
        let result = sqlx::query(
            // language=sqlite
            r#"
            INSERT INTO app_user (username, password_hash, role) VALUES (?, ?, ?)
            "#,
        )
        .bind(user.name().as_ref())
        .bind(user.password_hash().as_ref())
        .bind(user.role().as_str())
        .execute(con)
        .await
        .convert_error()?;
        Ok(UserId::new(result.last_insert_rowid()))
    }
}

#[cfg(test)]
mod test {
    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::UserQuery;
    use kernel::interface::update::UserModifier;
    use kernel::prelude::entity::{NewUser, PasswordHash, Role, UserName};
    use kernel::KernelError;

    use crate::database::sqlite::{SqliteDatabase, SqliteUserRepository};

    #[tokio::test]
    async fn user_names_are_unique() -> error_stack::Result<(), KernelError> {
        let db = SqliteDatabase::in_memory().await?;
        let mut con = db.transact().await?;
        let user = NewUser::new(
            UserName::new("clerk"),
            PasswordHash::new("$argon2id$placeholder"),
            Role::Admin,
        );
        let id = SqliteUserRepository.create(&mut con, &user).await?;

        let found = SqliteUserRepository
            .find_by_name(&mut con, &UserName::new("clerk"))
            .await?
            .expect("user exists");
        assert_eq!(found.id(), &id);
        assert_eq!(found.role(), &Role::Admin);

        let error = SqliteUserRepository
            .create(&mut con, &user)
            .await
            .expect_err("user name is unique");
        assert_eq!(error.current_context(), &KernelError::Conflict);
        Ok(())
    }
}

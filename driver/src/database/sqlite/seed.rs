use sqlx::{Executor, SqliteConnection};

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::hash::PasswordHasher;
use kernel::prelude::entity::{NewUser, Role, UserName};
use kernel::KernelError;

use crate::database::sqlite::{SqliteDatabase, SqliteUserInternal};
use crate::env_or_none;
use crate::error::ConvertError;

static DEFAULT_ADMIN_PASSWORD: &str = "DEFAULT_ADMIN_PASSWORD";
static DEFAULT_USER_PASSWORD: &str = "DEFAULT_USER_PASSWORD";

// language=sqlite
const SAMPLE_DATA: &str = include_str!("../../../seeds/sample.sql");

/// Passwords for the `admin` and `user` accounts created on an empty database.
#[derive(Clone)]
pub struct DefaultAccounts {
    admin_password: String,
    user_password: String,
}

impl DefaultAccounts {
    pub fn new(admin_password: impl Into<String>, user_password: impl Into<String>) -> Self {
        Self {
            admin_password: admin_password.into(),
            user_password: user_password.into(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(
            env_or_none(DEFAULT_ADMIN_PASSWORD).unwrap_or_else(|| "admin1234".to_string()),
            env_or_none(DEFAULT_USER_PASSWORD).unwrap_or_else(|| "user1234".to_string()),
        )
    }
}

impl std::fmt::Debug for DefaultAccounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DefaultAccounts(..)")
    }
}

impl SqliteDatabase {
    /// Loads the sample catalog when no movie exists yet. Returns whether anything was written.
    pub async fn seed_sample_data(&self) -> error_stack::Result<bool, KernelError> {
        let mut con = self.transact().await?;
        if count(&mut con, "movie").await? > 0 {
            con.roll_back().await?;
            return Ok(false);
        }
        (&mut *con).execute(SAMPLE_DATA).await.convert_error()?;
        con.commit().await?;
        tracing::info!("loaded sample catalog");
        Ok(true)
    }

    /// Creates `admin` and `user` when no account exists yet. Returns whether anything was written.
    pub async fn seed_accounts(
        &self,
        accounts: &DefaultAccounts,
        hasher: &impl PasswordHasher,
    ) -> error_stack::Result<bool, KernelError> {
        let mut con = self.transact().await?;
        if count(&mut con, "app_user").await? > 0 {
            con.roll_back().await?;
            return Ok(false);
        }
        for (name, password, role) in [
            ("admin", &accounts.admin_password, Role::Admin),
            ("user", &accounts.user_password, Role::User),
        ] {
            let user = NewUser::new(UserName::new(name), hasher.hash(password)?, role);
            SqliteUserInternal::create(&mut con, &user).await?;
        }
        con.commit().await?;
        tracing::info!("created default accounts `admin` and `user`");
        Ok(true)
    }
}

async fn count(
    con: &mut SqliteConnection,
    table: &'static str,
) -> error_stack::Result<i64, KernelError> {
    let sql = format!("SELECT COUNT(*) FROM {table}");
    sqlx::query_scalar::<_, i64>(&sql)
        .fetch_one(con)
        .await
        .convert_error()
}

#[cfg(test)]
mod test {
    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::hash::PasswordHasher;
    use kernel::interface::query::{CopyQuery, MovieQuery, RentalQuery, UserQuery};
    use kernel::prelude::entity::{MovieFilter, MovieSort, Role, UserName};
    use kernel::KernelError;

    use super::DefaultAccounts;
    use crate::database::sqlite::{
        SqliteCopyRepository, SqliteDatabase, SqliteMovieRepository, SqliteRentalRepository,
        SqliteUserRepository,
    };
    use crate::hash::Argon2Hasher;

    #[tokio::test]
    async fn sample_data_loads_once() -> error_stack::Result<(), KernelError> {
        let db = SqliteDatabase::in_memory().await?;
        assert!(db.seed_sample_data().await?);
        assert!(!db.seed_sample_data().await?);

        let mut con = db.transact().await?;
        let movies = SqliteMovieRepository
            .find_all(&mut con, &MovieFilter::default(), &MovieSort::default())
            .await?;
        assert_eq!(movies.len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn sample_copies_match_open_rentals() -> error_stack::Result<(), KernelError> {
        let db = SqliteDatabase::in_memory().await?;
        db.seed_sample_data().await?;
        let mut con = db.transact().await?;
        let movies = SqliteMovieRepository
            .find_all(&mut con, &MovieFilter::default(), &MovieSort::default())
            .await?;
        for movie in movies {
            let copies = SqliteCopyRepository
                .find_by_movie_id(&mut con, movie.id())
                .await?;
            for copy in copies {
                let open = SqliteRentalRepository
                    .find_open_by_copy_id(&mut con, copy.id())
                    .await?;
                let expected = if copy.is_available() { 0 } else { 1 };
                assert_eq!(open.len(), expected);
            }
        }
        Ok(())
    }

    #[tokio::test]
    async fn default_accounts_are_created_once() -> error_stack::Result<(), KernelError> {
        let db = SqliteDatabase::in_memory().await?;
        let accounts = DefaultAccounts::new("admin-secret", "user-secret");
        assert!(db.seed_accounts(&accounts, &Argon2Hasher).await?);
        assert!(!db.seed_accounts(&accounts, &Argon2Hasher).await?);

        let mut con = db.transact().await?;
        let admin = SqliteUserRepository
            .find_by_name(&mut con, &UserName::new("admin"))
            .await?
            .expect("admin exists");
        assert_eq!(admin.role(), &Role::Admin);
        assert!(Argon2Hasher.verify("admin-secret", admin.password_hash())?);

        let user = SqliteUserRepository
            .find_by_name(&mut con, &UserName::new("user"))
            .await?
            .expect("user exists");
        assert_eq!(user.role(), &Role::User);
        assert!(!Argon2Hasher.verify("admin-secret", user.password_hash())?);
        Ok(())
    }
}

use std::ops::{Deref, DerefMut};
use std::str::FromStr;

use error_stack::Report;
use sqlx::migrate::MigrateError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Error, Pool, Sqlite, SqliteConnection};

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::KernelError;

use crate::env;
use crate::error::ConvertError;

pub use self::{
    actor::*, category::*, copy::*, customer::*, movie::*, payment::*, rental::*, report::*,
    seed::*, session::*, user::*,
};

mod actor;
mod category;
mod copy;
mod customer;
mod movie;
mod payment;
mod rental;
mod report;
mod seed;
mod session;
mod user;

static DATABASE_URL: &str = "DATABASE_URL";

// SQLite allows a single writer. One pooled connection serializes every
// transaction so two rentals can never interleave.
const MAX_CONNECTIONS: u32 = 1;

#[derive(Clone)]
pub struct SqliteDatabase {
    pool: Pool<Sqlite>,
}

impl SqliteDatabase {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        let url = env(DATABASE_URL)?;
        Self::connect(&url).await
    }

    pub async fn connect(url: &str) -> error_stack::Result<Self, KernelError> {
        let options = SqliteConnectOptions::from_str(url)
            .convert_error()?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await
            .convert_error()?;
        let database = Self { pool };
        database.migrate().await?;
        tracing::debug!("connected to {url}");
        Ok(database)
    }

    /// Fresh, migrated and empty database that lives as long as this handle.
    pub async fn in_memory() -> error_stack::Result<Self, KernelError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .convert_error()?
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .convert_error()?;
        let database = Self { pool };
        database.migrate().await?;
        Ok(database)
    }

    async fn migrate(&self) -> error_stack::Result<(), KernelError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .convert_error()
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for SqliteDatabase {
    type Transaction = SqliteTransaction;
    async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError> {
        let transaction = self.pool.begin().await.convert_error()?;
        Ok(SqliteTransaction(transaction))
    }
}

pub struct SqliteTransaction(sqlx::Transaction<'static, Sqlite>);

#[async_trait::async_trait]
impl Transaction for SqliteTransaction {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        self.0.commit().await.convert_error()
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        self.0.rollback().await.convert_error()
    }
}

impl Deref for SqliteTransaction {
    type Target = SqliteConnection;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for SqliteTransaction {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

// SQLITE_BUSY, SQLITE_LOCKED and their extended codes
const LOCK_CODES: [&str; 5] = ["5", "6", "261", "262", "517"];

impl<T> ConvertError for Result<T, Error> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| {
            let context = match &error {
                Error::PoolTimedOut => KernelError::Timeout,
                Error::Database(db) if db.is_unique_violation() => KernelError::Conflict,
                Error::Database(db) if db.is_foreign_key_violation() => KernelError::NotFound,
                Error::Database(db)
                    if db
                        .code()
                        .is_some_and(|code| LOCK_CODES.iter().any(|lock| code == *lock)) =>
                {
                    KernelError::Concurrency
                }
                _ => KernelError::Internal,
            };
            Report::from(error).change_context(context)
        })
    }
}

impl<T> ConvertError for Result<T, MigrateError> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| {
            Report::from(error)
                .change_context(KernelError::Internal)
                .attach_printable("Failed to migrate database schema")
        })
    }
}

#[cfg(test)]
pub(in crate::database) mod test_support {
    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::prelude::entity::{
        CopyId, CustomerId, Email, FirstName, LastName, LateFee, MovieId, MovieTitle, NewCustomer,
        NewMovie, RentalRate, SignupDate,
    };
    use kernel::KernelError;

    use crate::database::sqlite::{
        SqliteCopyInternal, SqliteCustomerInternal, SqliteDatabase, SqliteMovieInternal,
    };

    pub fn new_movie(title: &str) -> NewMovie {
        NewMovie::new(
            MovieTitle::new(title),
            None,
            None,
            None,
            None,
            None,
            RentalRate::default(),
            LateFee::default(),
        )
    }

    pub fn new_customer(email: &str) -> NewCustomer {
        NewCustomer::new(
            FirstName::new("Test"),
            LastName::new("Customer"),
            Email::new(email),
            None,
            None,
            SignupDate::today(),
        )
    }

    /// Movie with `copies` available copies and one customer, committed.
    pub async fn stocked(
        db: &SqliteDatabase,
        title: &str,
        copies: usize,
    ) -> error_stack::Result<(MovieId, Vec<CopyId>, CustomerId), KernelError> {
        let mut con = db.transact().await?;
        let movie_id = SqliteMovieInternal::create(&mut con, &new_movie(title)).await?;
        let mut copy_ids = Vec::with_capacity(copies);
        for _ in 0..copies {
            copy_ids.push(SqliteCopyInternal::create(&mut con, &movie_id, None).await?);
        }
        let email = format!("customer{}@example.com", i64::from(movie_id));
        let customer_id = SqliteCustomerInternal::create(&mut con, &new_customer(&email)).await?;
        con.commit().await?;
        Ok((movie_id, copy_ids, customer_id))
    }
}

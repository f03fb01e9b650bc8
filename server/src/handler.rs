use std::ops::Deref;
use std::sync::Arc;

use vodca::References;

use driver::database::{DefaultAccounts, SqliteDatabase};
use driver::hash::Argon2Hasher;
use kernel::KernelError;

#[derive(Clone)]
pub struct AppModule(Arc<Handler>);

impl AppModule {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        Ok(Self(Arc::new(Handler::init().await?)))
    }

    #[cfg(test)]
    pub fn with_database(database: SqliteDatabase) -> Self {
        Self(Arc::new(Handler { database }))
    }
}

impl Deref for AppModule {
    type Target = Handler;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

#[derive(References)]
pub struct Handler {
    database: SqliteDatabase,
}

impl Handler {
    pub async fn init() -> error_stack::Result<Self, KernelError> {
        let database = SqliteDatabase::new().await?;

        let seed_sample = driver::env_or_none("SEED_SAMPLE_DATA")
            .map(|value| !matches!(value.to_ascii_lowercase().as_str(), "false" | "0" | "no"))
            .unwrap_or(true);
        if seed_sample && database.seed_sample_data().await? {
            tracing::info!("sample catalog loaded");
        }
        let accounts = DefaultAccounts::from_env();
        if database.seed_accounts(&accounts, &Argon2Hasher).await? {
            tracing::info!("default accounts created");
        }

        Ok(Self { database })
    }
}

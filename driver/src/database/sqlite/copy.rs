use sqlx::SqliteConnection;

use kernel::interface::query::{CopyQuery, DependOnCopyQuery};
use kernel::interface::update::{CopyModifier, DependOnCopyModifier};
use kernel::prelude::entity::{CopyId, CopyStatus, InventoryCopy, MovieId, StoreLocation};
use kernel::KernelError;

use crate::database::sqlite::{SqliteDatabase, SqliteTransaction};
use crate::error::ConvertError;

pub struct SqliteCopyRepository;

#[async_trait::async_trait]
impl CopyQuery for SqliteCopyRepository {
    type Transaction = SqliteTransaction;

    async fn find_by_id(
        &self,
        con: &mut SqliteTransaction,
        id: &CopyId,
    ) -> error_stack::Result<Option<InventoryCopy>, KernelError> {
        SqliteCopyInternal::find_by_id(con, id).await
    }

    async fn find_by_movie_id(
        &self,
        con: &mut SqliteTransaction,
        movie_id: &MovieId,
    ) -> error_stack::Result<Vec<InventoryCopy>, KernelError> {
        SqliteCopyInternal::find_by_movie_id(con, movie_id).await
    }
}

#[async_trait::async_trait]
impl CopyModifier for SqliteCopyRepository {
    type Transaction = SqliteTransaction;

    async fn create(
        &self,
        con: &mut SqliteTransaction,
        movie_id: &MovieId,
        location: Option<&StoreLocation>,
    ) -> error_stack::Result<CopyId, KernelError> {
        SqliteCopyInternal::create(con, movie_id, location).await
    }

    async fn claim_available(
        &self,
        con: &mut SqliteTransaction,
        movie_id: &MovieId,
    ) -> error_stack::Result<Option<CopyId>, KernelError> {
        SqliteCopyInternal::claim_available(con, movie_id).await
    }

    async fn release(
        &self,
        con: &mut SqliteTransaction,
        copy_id: &CopyId,
    ) -> error_stack::Result<bool, KernelError> {
        SqliteCopyInternal::release(con, copy_id).await
    }
}

impl DependOnCopyQuery for SqliteDatabase {
    type CopyQuery = SqliteCopyRepository;
    fn copy_query(&self) -> &Self::CopyQuery {
        &SqliteCopyRepository
    }
}

impl DependOnCopyModifier for SqliteDatabase {
    type CopyModifier = SqliteCopyRepository;
    fn copy_modifier(&self) -> &Self::CopyModifier {
        &SqliteCopyRepository
    }
}

#[derive(sqlx::FromRow)]
struct CopyRow {
    copy_id: i64,
    movie_id: i64,
    status: String,
    store_location: Option<String>,
}

impl TryFrom<CopyRow> for InventoryCopy {
    type Error = error_stack::Report<KernelError>;
    fn try_from(value: CopyRow) -> Result<Self, Self::Error> {
        Ok(InventoryCopy::new(
            CopyId::new(value.copy_id),
            MovieId::new(value.movie_id),
            value.status.parse::<CopyStatus>()?,
            value.store_location.map(StoreLocation::new),
        ))
    }
}

pub(in crate::database) struct SqliteCopyInternal;

impl SqliteCopyInternal {
    async fn find_by_id(
        con: &mut SqliteConnection,
        id: &CopyId,
    ) -> error_stack::Result<Option<InventoryCopy>, KernelError> {
        let row = sqlx::query_as::<_, CopyRow>(
            // language=sqlite
            r#"
            SELECT copy_id, movie_id, status, store_location
            FROM inventory_copy
            WHERE copy_id = ?
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(InventoryCopy::try_from).transpose()
    }

    async fn find_by_movie_id(
        con: &mut SqliteConnection,
        movie_id: &MovieId,
    ) -> error_stack::Result<Vec<InventoryCopy>, KernelError> {
        let rows = sqlx::query_as::<_, CopyRow>(
            // language=sqlite
            r#"
            SELECT copy_id, movie_id, status, store_location
            FROM inventory_copy
            WHERE movie_id = ?
            ORDER BY copy_id
            "#,
        )
        .bind(movie_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        rows.into_iter().map(InventoryCopy::try_from).collect()
    }

    pub(in crate::database) async fn create(
        con: &mut SqliteConnection,
        movie_id: &MovieId,
        location: Option<&StoreLocation>,
    ) -> error_stack::Result<CopyId, KernelError> {
        let result = sqlx::query(
            // language=sqlite
            r#"
            INSERT INTO inventory_copy (movie_id, status, store_location)
            VALUES (?, 'AVAILABLE', ?)
            "#,
        )
        .bind(movie_id.as_ref())
        .bind(location.map(AsRef::<String>::as_ref))
        .execute(con)
        .await
        .convert_error()?;
        Ok(CopyId::new(result.last_insert_rowid()))
    }

    /// The select and the state change are a single statement, so two callers can
    /// never receive the same copy.
    async fn claim_available(
        con: &mut SqliteConnection,
        movie_id: &MovieId,
    ) -> error_stack::Result<Option<CopyId>, KernelError> {
        let claimed = sqlx::query_scalar::<_, i64>(
            // language=sqlite
            r#"
            UPDATE inventory_copy
            SET status = 'RENTED'
            WHERE copy_id = (
                SELECT copy_id FROM inventory_copy
                WHERE movie_id = ? AND status = 'AVAILABLE'
                ORDER BY copy_id
                LIMIT 1
            )
            AND status = 'AVAILABLE'
            RETURNING copy_id
            "#,
        )
        .bind(movie_id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(claimed.map(CopyId::new))
    }

    async fn release(
        con: &mut SqliteConnection,
        copy_id: &CopyId,
    ) -> error_stack::Result<bool, KernelError> {
        let result = sqlx::query(
            // language=sqlite
            r#"
            UPDATE inventory_copy SET status = 'AVAILABLE'
            WHERE copy_id = ? AND status = 'RENTED'
            "#,
        )
        .bind(copy_id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(result.rows_affected() == 1)
    }
}

#[cfg(test)]
mod test {
    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::interface::query::CopyQuery;
    use kernel::interface::update::CopyModifier;
    use kernel::prelude::entity::{CopyStatus, MovieId, StoreLocation};
    use kernel::KernelError;

    use crate::database::sqlite::test_support::stocked;
    use crate::database::sqlite::{SqliteCopyRepository, SqliteDatabase};

    #[tokio::test]
    async fn claims_lowest_available_copy_first() -> error_stack::Result<(), KernelError> {
        let db = SqliteDatabase::in_memory().await?;
        let (movie_id, copies, _) = stocked(&db, "Fargo", 2).await?;
        let mut con = db.transact().await?;

        let first = SqliteCopyRepository
            .claim_available(&mut con, &movie_id)
            .await?;
        let second = SqliteCopyRepository
            .claim_available(&mut con, &movie_id)
            .await?;
        let third = SqliteCopyRepository
            .claim_available(&mut con, &movie_id)
            .await?;
        assert_eq!(first, Some(copies[0]));
        assert_eq!(second, Some(copies[1]));
        assert_eq!(third, None);

        let stored = SqliteCopyRepository
            .find_by_movie_id(&mut con, &movie_id)
            .await?;
        assert!(stored.iter().all(|copy| copy.status() == &CopyStatus::Rented));
        con.commit().await?;
        Ok(())
    }

    #[tokio::test]
    async fn release_only_touches_rented_copies() -> error_stack::Result<(), KernelError> {
        let db = SqliteDatabase::in_memory().await?;
        let (movie_id, copies, _) = stocked(&db, "Heat", 1).await?;
        let mut con = db.transact().await?;

        assert!(!SqliteCopyRepository.release(&mut con, &copies[0]).await?);
        SqliteCopyRepository
            .claim_available(&mut con, &movie_id)
            .await?;
        assert!(SqliteCopyRepository.release(&mut con, &copies[0]).await?);

        let copy = SqliteCopyRepository
            .find_by_id(&mut con, &copies[0])
            .await?
            .expect("copy exists");
        assert!(copy.is_available());
        Ok(())
    }

    #[tokio::test]
    async fn copy_keeps_its_location() -> error_stack::Result<(), KernelError> {
        let db = SqliteDatabase::in_memory().await?;
        let (movie_id, _, _) = stocked(&db, "Alien", 0).await?;
        let mut con = db.transact().await?;
        let location = StoreLocation::new("Back Shelf");
        let id = SqliteCopyRepository
            .create(&mut con, &movie_id, Some(&location))
            .await?;
        let copy = SqliteCopyRepository.find_by_id(&mut con, &id).await?;
        assert_eq!(copy.and_then(|copy| copy.location().clone()), Some(location));

        let missing = SqliteCopyRepository
            .create(&mut con, &MovieId::new(999), None)
            .await
            .expect_err("movie 999 does not exist");
        assert_eq!(missing.current_context(), &KernelError::NotFound);
        Ok(())
    }
}

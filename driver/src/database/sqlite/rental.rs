use error_stack::ResultExt;
use sqlx::SqliteConnection;
use time::OffsetDateTime;

use kernel::interface::query::{DependOnRentalQuery, RentalQuery};
use kernel::interface::update::{DependOnRentalModifier, RentalModifier};
use kernel::prelude::entity::{
    CopyId, CustomerId, DueAt, FirstName, LastName, MovieId, MovieTitle, NewRental, Rental,
    RentalId, RentalOverview, RentalStatus, RentedAt, ReturnedAt,
};
use kernel::KernelError;

use crate::database::sqlite::{SqliteDatabase, SqliteTransaction};
use crate::error::ConvertError;

pub struct SqliteRentalRepository;

#[async_trait::async_trait]
impl RentalQuery for SqliteRentalRepository {
    type Transaction = SqliteTransaction;

    async fn find_by_id(
        &self,
        con: &mut SqliteTransaction,
        id: &RentalId,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        SqliteRentalInternal::find_by_id(con, id).await
    }

    async fn find_open_by_copy_id(
        &self,
        con: &mut SqliteTransaction,
        copy_id: &CopyId,
    ) -> error_stack::Result<Vec<Rental>, KernelError> {
        SqliteRentalInternal::find_open_by_copy_id(con, copy_id).await
    }

    async fn find_open(
        &self,
        con: &mut SqliteTransaction,
    ) -> error_stack::Result<Vec<RentalOverview>, KernelError> {
        SqliteRentalInternal::find_open(con).await
    }
}

#[async_trait::async_trait]
impl RentalModifier for SqliteRentalRepository {
    type Transaction = SqliteTransaction;

    async fn create(
        &self,
        con: &mut SqliteTransaction,
        rental: &NewRental,
    ) -> error_stack::Result<RentalId, KernelError> {
        SqliteRentalInternal::create(con, rental).await
    }

    async fn close(
        &self,
        con: &mut SqliteTransaction,
        id: &RentalId,
        returned_at: &ReturnedAt,
    ) -> error_stack::Result<Option<CopyId>, KernelError> {
        SqliteRentalInternal::close(con, id, returned_at).await
    }
}

impl DependOnRentalQuery for SqliteDatabase {
    type RentalQuery = SqliteRentalRepository;
    fn rental_query(&self) -> &Self::RentalQuery {
        &SqliteRentalRepository
    }
}

impl DependOnRentalModifier for SqliteDatabase {
    type RentalModifier = SqliteRentalRepository;
    fn rental_modifier(&self) -> &Self::RentalModifier {
        &SqliteRentalRepository
    }
}

#[derive(sqlx::FromRow)]
struct RentalRow {
    rental_id: i64,
    customer_id: i64,
    copy_id: i64,
    rental_date: OffsetDateTime,
    due_date: OffsetDateTime,
    return_date: Option<OffsetDateTime>,
    rental_status: String,
}

impl TryFrom<RentalRow> for Rental {
    type Error = error_stack::Report<KernelError>;
    fn try_from(value: RentalRow) -> Result<Self, Self::Error> {
        Ok(Rental::new(
            RentalId::new(value.rental_id),
            CustomerId::new(value.customer_id),
            CopyId::new(value.copy_id),
            RentedAt::new(value.rental_date),
            DueAt::new(value.due_date),
            value.return_date.map(ReturnedAt::new),
            value.rental_status.parse::<RentalStatus>()?,
        ))
    }
}

#[derive(sqlx::FromRow)]
struct RentalOverviewRow {
    rental_id: i64,
    rental_date: OffsetDateTime,
    due_date: OffsetDateTime,
    customer_id: i64,
    first_name: String,
    last_name: String,
    copy_id: i64,
    movie_id: i64,
    title: String,
}

impl From<RentalOverviewRow> for RentalOverview {
    fn from(value: RentalOverviewRow) -> Self {
        RentalOverview::new(
            RentalId::new(value.rental_id),
            RentedAt::new(value.rental_date),
            DueAt::new(value.due_date),
            CustomerId::new(value.customer_id),
            FirstName::new(value.first_name),
            LastName::new(value.last_name),
            CopyId::new(value.copy_id),
            MovieId::new(value.movie_id),
            MovieTitle::new(value.title),
        )
    }
}

pub(in crate::database) struct SqliteRentalInternal;

impl SqliteRentalInternal {
    async fn find_by_id(
        con: &mut SqliteConnection,
        id: &RentalId,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        let row = sqlx::query_as::<_, RentalRow>(
            // language=sqlite
            r#"
            SELECT rental_id, customer_id, copy_id, rental_date, due_date, return_date, rental_status
            FROM rental
            WHERE rental_id = ?
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(Rental::try_from).transpose()
    }

    async fn find_open_by_copy_id(
        con: &mut SqliteConnection,
        copy_id: &CopyId,
    ) -> error_stack::Result<Vec<Rental>, KernelError> {
        let rows = sqlx::query_as::<_, RentalRow>(
            // language=sqlite
            r#"
            SELECT rental_id, customer_id, copy_id, rental_date, due_date, return_date, rental_status
            FROM rental
            WHERE copy_id = ? AND rental_status = 'OPEN'
            "#,
        )
        .bind(copy_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        rows.into_iter().map(Rental::try_from).collect()
    }

    async fn find_open(
        con: &mut SqliteConnection,
    ) -> error_stack::Result<Vec<RentalOverview>, KernelError> {
        let rows = sqlx::query_as::<_, RentalOverviewRow>(
            // language=sqlite
            r#"
            SELECT r.rental_id, r.rental_date, r.due_date,
                   c.customer_id, c.first_name, c.last_name,
                   ic.copy_id, m.movie_id, m.title
            FROM rental r
            JOIN customer c ON c.customer_id = r.customer_id
            JOIN inventory_copy ic ON ic.copy_id = r.copy_id
            JOIN movie m ON m.movie_id = ic.movie_id
            WHERE r.rental_status = 'OPEN'
            ORDER BY julianday(r.rental_date) DESC, r.rental_id DESC
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(RentalOverview::from).collect())
    }

    async fn create(
        con: &mut SqliteConnection,
        rental: &NewRental,
    ) -> error_stack::Result<RentalId, KernelError> {
        let result = sqlx::query(
            // language=sqlite
            r#"
            INSERT INTO rental (customer_id, copy_id, rental_date, due_date, return_date, rental_status)
            VALUES (?, ?, ?, ?, NULL, 'OPEN')
            "#,
        )
        .bind(rental.customer_id().as_ref())
        .bind(rental.copy_id().as_ref())
        .bind(rental.rented_at().as_ref())
        .bind(rental.due_at().as_ref())
        .execute(con)
        .await
        .convert_error()
        .attach_printable_lazy(|| {
            format!("Failed to open rental for copy {}", i64::from(*rental.copy_id()))
        })?;
        Ok(RentalId::new(result.last_insert_rowid()))
    }

    /// Only an `OPEN` rental matches, so a second return finds nothing to close.
    async fn close(
        con: &mut SqliteConnection,
        id: &RentalId,
        returned_at: &ReturnedAt,
    ) -> error_stack::Result<Option<CopyId>, KernelError> {
        let copy_id = sqlx::query_scalar::<_, i64>(
            // language=sqlite
            r#"
            UPDATE rental
            SET return_date = ?, rental_status = 'RETURNED'
            WHERE rental_id = ? AND rental_status = 'OPEN'
            RETURNING copy_id
            "#,
        )
        .bind(returned_at.as_ref())
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(copy_id.map(CopyId::new))
    }
}

#[cfg(test)]
mod test {
    use time::macros::datetime;

    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::RentalQuery;
    use kernel::interface::update::{CopyModifier, RentalModifier};
    use kernel::prelude::entity::{NewRental, RentalStatus, RentedAt, ReturnedAt};
    use kernel::KernelError;

    use crate::database::sqlite::test_support::stocked;
    use crate::database::sqlite::{SqliteCopyRepository, SqliteDatabase, SqliteRentalRepository};

    #[tokio::test]
    async fn close_happens_once() -> error_stack::Result<(), KernelError> {
        let db = SqliteDatabase::in_memory().await?;
        let (movie_id, _, customer_id) = stocked(&db, "Fargo", 1).await?;
        let mut con = db.transact().await?;
        let copy_id = SqliteCopyRepository
            .claim_available(&mut con, &movie_id)
            .await?
            .expect("one copy is available");
        let rented_at = RentedAt::new(datetime!(2025-11-01 10:00 UTC));
        let rental_id = SqliteRentalRepository
            .create(&mut con, &NewRental::open(customer_id, copy_id, rented_at))
            .await?;

        let opened = SqliteRentalRepository
            .find_by_id(&mut con, &rental_id)
            .await?
            .expect("rental exists");
        assert!(opened.is_open());
        assert_eq!(opened.rented_at(), &rented_at);

        let returned_at = ReturnedAt::new(datetime!(2025-11-03 09:30 UTC));
        let closed = SqliteRentalRepository
            .close(&mut con, &rental_id, &returned_at)
            .await?;
        assert_eq!(closed, Some(copy_id));
        let again = SqliteRentalRepository
            .close(&mut con, &rental_id, &returned_at)
            .await?;
        assert_eq!(again, None);

        let stored = SqliteRentalRepository
            .find_by_id(&mut con, &rental_id)
            .await?
            .expect("rental exists");
        assert_eq!(stored.status(), &RentalStatus::Returned);
        assert_eq!(stored.returned_at(), &Some(returned_at));
        Ok(())
    }

    #[tokio::test]
    async fn second_open_rental_on_a_copy_is_rejected() -> error_stack::Result<(), KernelError> {
        let db = SqliteDatabase::in_memory().await?;
        let (_, copies, customer_id) = stocked(&db, "Heat", 1).await?;
        let mut con = db.transact().await?;
        let rental = NewRental::open(customer_id, copies[0], RentedAt::now());
        SqliteRentalRepository.create(&mut con, &rental).await?;
        let error = SqliteRentalRepository
            .create(&mut con, &rental)
            .await
            .expect_err("copy already has an open rental");
        assert_eq!(error.current_context(), &KernelError::Conflict);

        let open = SqliteRentalRepository
            .find_open_by_copy_id(&mut con, &copies[0])
            .await?;
        assert_eq!(open.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn open_rentals_are_newest_first() -> error_stack::Result<(), KernelError> {
        let db = SqliteDatabase::in_memory().await?;
        let (_, copies, customer_id) = stocked(&db, "Alien", 3).await?;
        let mut con = db.transact().await?;
        let older = SqliteRentalRepository
            .create(
                &mut con,
                &NewRental::open(
                    customer_id,
                    copies[0],
                    RentedAt::new(datetime!(2025-10-01 08:00 UTC)),
                ),
            )
            .await?;
        let newer = SqliteRentalRepository
            .create(
                &mut con,
                &NewRental::open(
                    customer_id,
                    copies[1],
                    RentedAt::new(datetime!(2025-10-02 08:00 +02:00)),
                ),
            )
            .await?;
        let returned = SqliteRentalRepository
            .create(
                &mut con,
                &NewRental::open(
                    customer_id,
                    copies[2],
                    RentedAt::new(datetime!(2025-10-03 08:00 UTC)),
                ),
            )
            .await?;
        SqliteRentalRepository
            .close(&mut con, &returned, &ReturnedAt::now())
            .await?;

        let open = SqliteRentalRepository.find_open(&mut con).await?;
        let ids = open.iter().map(|r| *r.rental_id()).collect::<Vec<_>>();
        assert_eq!(ids, vec![newer, older]);
        Ok(())
    }
}

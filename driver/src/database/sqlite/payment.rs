use sqlx::SqliteConnection;
use time::OffsetDateTime;

use kernel::interface::query::{DependOnPaymentQuery, PaymentQuery};
use kernel::interface::update::{DependOnPaymentModifier, PaymentModifier};
use kernel::prelude::entity::{CreatedAt, Payment, PaymentAmount, PaymentId, RentalId};
use kernel::KernelError;

use crate::database::sqlite::{SqliteDatabase, SqliteTransaction};
use crate::error::ConvertError;

pub struct SqlitePaymentRepository;

#[async_trait::async_trait]
impl PaymentQuery for SqlitePaymentRepository {
    type Transaction = SqliteTransaction;

    async fn find_by_rental_id(
        &self,
        con: &mut SqliteTransaction,
        rental_id: &RentalId,
    ) -> error_stack::Result<Vec<Payment>, KernelError> {
        SqlitePaymentInternal::find_by_rental_id(con, rental_id).await
    }
}

#[async_trait::async_trait]
impl PaymentModifier for SqlitePaymentRepository {
    type Transaction = SqliteTransaction;

    async fn create(
        &self,
        con: &mut SqliteTransaction,
        rental_id: &RentalId,
        amount: &PaymentAmount,
        paid_at: &CreatedAt<Payment>,
    ) -> error_stack::Result<PaymentId, KernelError> {
        SqlitePaymentInternal::create(con, rental_id, amount, paid_at).await
    }
}

impl DependOnPaymentQuery for SqliteDatabase {
    type PaymentQuery = SqlitePaymentRepository;
    fn payment_query(&self) -> &Self::PaymentQuery {
        &SqlitePaymentRepository
    }
}

impl DependOnPaymentModifier for SqliteDatabase {
    type PaymentModifier = SqlitePaymentRepository;
    fn payment_modifier(&self) -> &Self::PaymentModifier {
        &SqlitePaymentRepository
    }
}

#[derive(sqlx::FromRow)]
struct PaymentRow {
    payment_id: i64,
    rental_id: i64,
    amount: f64,
    payment_date: OffsetDateTime,
}

impl From<PaymentRow> for Payment {
    fn from(value: PaymentRow) -> Self {
        Payment::new(
            PaymentId::new(value.payment_id),
            RentalId::new(value.rental_id),
            PaymentAmount::new(value.amount),
            CreatedAt::new(value.payment_date),
        )
    }
}

pub(in crate::database) struct SqlitePaymentInternal;

impl SqlitePaymentInternal {
    async fn find_by_rental_id(
        con: &mut SqliteConnection,
        rental_id: &RentalId,
    ) -> error_stack::Result<Vec<Payment>, KernelError> {
        let rows = sqlx::query_as::<_, PaymentRow>(
            // language=sqlite
            r#"
            SELECT payment_id, rental_id, amount, payment_date
            FROM payment
            WHERE rental_id = ?
            ORDER BY julianday(payment_date), payment_id
            "#,
        )
        .bind(rental_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Payment::from).collect())
    }

    async fn create(
        con: &mut SqliteConnection,
        rental_id: &RentalId,
        amount: &PaymentAmount,
        paid_at: &CreatedAt<Payment>,
    ) -> error_stack::Result<PaymentId, KernelError> {
        let result = sqlx::query(
            // language=sqlite
            r#"
            INSERT INTO payment (rental_id, amount, payment_date) VALUES (?, ?, ?)
            "#,
        )
        .bind(rental_id.as_ref())
        .bind(amount.as_ref())
        .bind(paid_at.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(PaymentId::new(result.last_insert_rowid()))
    }
}

#[cfg(test)]
mod test {
    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::PaymentQuery;
    use kernel::interface::update::{PaymentModifier, RentalModifier};
    use kernel::prelude::entity::{CreatedAt, NewRental, PaymentAmount, RentalId, RentedAt};
    use kernel::KernelError;

    use crate::database::sqlite::test_support::stocked;
    use crate::database::sqlite::{SqliteDatabase, SqlitePaymentRepository, SqliteRentalRepository};

    #[tokio::test]
    async fn payments_attach_to_rental() -> error_stack::Result<(), KernelError> {
        let db = SqliteDatabase::in_memory().await?;
        let (_, copies, customer_id) = stocked(&db, "Fargo", 1).await?;
        let mut con = db.transact().await?;
        let rental_id = SqliteRentalRepository
            .create(
                &mut con,
                &NewRental::open(customer_id, copies[0], RentedAt::now()),
            )
            .await?;
        SqlitePaymentRepository
            .create(&mut con, &rental_id, &PaymentAmount::new(3.99), &CreatedAt::now())
            .await?;
        SqlitePaymentRepository
            .create(&mut con, &rental_id, &PaymentAmount::new(1.5), &CreatedAt::now())
            .await?;

        let payments = SqlitePaymentRepository
            .find_by_rental_id(&mut con, &rental_id)
            .await?;
        let amounts = payments
            .iter()
            .map(|payment| f64::from(*payment.amount()))
            .collect::<Vec<_>>();
        assert_eq!(amounts, vec![3.99, 1.5]);
        Ok(())
    }

    #[tokio::test]
    async fn payment_for_unknown_rental_is_not_found() -> error_stack::Result<(), KernelError> {
        let db = SqliteDatabase::in_memory().await?;
        let mut con = db.transact().await?;
        let error = SqlitePaymentRepository
            .create(
                &mut con,
                &RentalId::new(77),
                &PaymentAmount::new(2.0),
                &CreatedAt::now(),
            )
            .await
            .expect_err("rental 77 does not exist");
        assert_eq!(error.current_context(), &KernelError::NotFound);
        Ok(())
    }
}

use error_stack::ResultExt;
use sqlx::SqliteConnection;
use time::Date;

use kernel::interface::query::{CustomerQuery, DependOnCustomerQuery};
use kernel::interface::update::{CustomerModifier, DependOnCustomerModifier};
use kernel::prelude::entity::{
    Address, Customer, CustomerId, Email, FirstName, LastName, NewCustomer, Phone, SignupDate,
};
use kernel::KernelError;

use crate::database::sqlite::{SqliteDatabase, SqliteTransaction};
use crate::error::ConvertError;

pub struct SqliteCustomerRepository;

#[async_trait::async_trait]
impl CustomerQuery for SqliteCustomerRepository {
    type Transaction = SqliteTransaction;

    async fn find_by_id(
        &self,
        con: &mut SqliteTransaction,
        id: &CustomerId,
    ) -> error_stack::Result<Option<Customer>, KernelError> {
        SqliteCustomerInternal::find_by_id(con, id).await
    }

    async fn find_by_email(
        &self,
        con: &mut SqliteTransaction,
        email: &Email,
    ) -> error_stack::Result<Option<Customer>, KernelError> {
        SqliteCustomerInternal::find_by_email(con, email).await
    }

    async fn find_all(
        &self,
        con: &mut SqliteTransaction,
    ) -> error_stack::Result<Vec<Customer>, KernelError> {
        SqliteCustomerInternal::find_all(con).await
    }
}

#[async_trait::async_trait]
impl CustomerModifier for SqliteCustomerRepository {
    type Transaction = SqliteTransaction;

    async fn create(
        &self,
        con: &mut SqliteTransaction,
        customer: &NewCustomer,
    ) -> error_stack::Result<CustomerId, KernelError> {
        SqliteCustomerInternal::create(con, customer).await
    }
}

impl DependOnCustomerQuery for SqliteDatabase {
    type CustomerQuery = SqliteCustomerRepository;
    fn customer_query(&self) -> &Self::CustomerQuery {
        &SqliteCustomerRepository
    }
}

impl DependOnCustomerModifier for SqliteDatabase {
    type CustomerModifier = SqliteCustomerRepository;
    fn customer_modifier(&self) -> &Self::CustomerModifier {
        &SqliteCustomerRepository
    }
}

#[derive(sqlx::FromRow)]
struct CustomerRow {
    customer_id: i64,
    first_name: String,
    last_name: String,
    email: String,
    phone: Option<String>,
    address: Option<String>,
    signup_date: Date,
}

impl From<CustomerRow> for Customer {
    fn from(value: CustomerRow) -> Self {
        Customer::new(
            CustomerId::new(value.customer_id),
            FirstName::new(value.first_name),
            LastName::new(value.last_name),
            Email::new(value.email),
            value.phone.map(Phone::new),
            value.address.map(Address::new),
            SignupDate::new(value.signup_date),
        )
    }
}

pub(in crate::database) struct SqliteCustomerInternal;

impl SqliteCustomerInternal {
    async fn find_by_id(
        con: &mut SqliteConnection,
        id: &CustomerId,
    ) -> error_stack::Result<Option<Customer>, KernelError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            // language=sqlite
            r#"
            SELECT customer_id, first_name, last_name, email, phone, address, signup_date
            FROM customer
            WHERE customer_id = ?
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Customer::from))
    }

    async fn find_by_email(
        con: &mut SqliteConnection,
        email: &Email,
    ) -> error_stack::Result<Option<Customer>, KernelError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            // language=sqlite
            r#"
            SELECT customer_id, first_name, last_name, email, phone, address, signup_date
            FROM customer
            WHERE email = ?
            "#,
        )
        .bind(email.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Customer::from))
    }

    async fn find_all(con: &mut SqliteConnection) -> error_stack::Result<Vec<Customer>, KernelError> {
        let rows = sqlx::query_as::<_, CustomerRow>(
            // language=sqlite
            r#"
            SELECT customer_id, first_name, last_name, email, phone, address, signup_date
            FROM customer
            ORDER BY last_name, first_name, customer_id
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Customer::from).collect())
    }

    pub(in crate::database) async fn create(
        con: &mut SqliteConnection,
        customer: &NewCustomer,
    ) -> error_stack::Result<CustomerId, KernelError> {
        let result = sqlx::query(
            // language=sqlite
            r#"
            INSERT INTO customer (first_name, last_name, email, phone, address, signup_date)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(customer.first_name().as_ref())
        .bind(customer.last_name().as_ref())
        .bind(customer.email().as_ref())
        .bind(customer.phone().clone().map(String::from))
        .bind(customer.address().clone().map(String::from))
        .bind(customer.signup_date().as_ref())
        .execute(con)
        .await
        .convert_error()
        .attach_printable_lazy(|| {
            format!("Customer email {} is taken", customer.email().as_ref())
        })?;
        Ok(CustomerId::new(result.last_insert_rowid()))
    }
}

#[cfg(test)]
mod test {
    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::CustomerQuery;
    use kernel::interface::update::CustomerModifier;
    use kernel::prelude::entity::{Email, FirstName, LastName, NewCustomer, SignupDate};
    use kernel::KernelError;

    use crate::database::sqlite::test_support::new_customer;
    use crate::database::sqlite::{SqliteCustomerRepository, SqliteDatabase};

    #[tokio::test]
    async fn customers_are_ordered_by_name() -> error_stack::Result<(), KernelError> {
        let db = SqliteDatabase::in_memory().await?;
        let mut con = db.transact().await?;
        let lee = SqliteCustomerRepository
            .create(
                &mut con,
                &NewCustomer::new(
                    FirstName::new("Bob"),
                    LastName::new("Lee"),
                    Email::new("bob@example.com"),
                    None,
                    None,
                    SignupDate::today(),
                ),
            )
            .await?;
        let johnson = SqliteCustomerRepository
            .create(
                &mut con,
                &NewCustomer::new(
                    FirstName::new("Alice"),
                    LastName::new("Johnson"),
                    Email::new("alice@example.com"),
                    None,
                    None,
                    SignupDate::today(),
                ),
            )
            .await?;
        let all = SqliteCustomerRepository.find_all(&mut con).await?;
        let ids = all.iter().map(|c| *c.id()).collect::<Vec<_>>();
        assert_eq!(ids, vec![johnson, lee]);

        let by_email = SqliteCustomerRepository
            .find_by_email(&mut con, &Email::new("bob@example.com"))
            .await?;
        assert_eq!(by_email.map(|c| *c.id()), Some(lee));
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() -> error_stack::Result<(), KernelError> {
        let db = SqliteDatabase::in_memory().await?;
        let mut con = db.transact().await?;
        let customer = new_customer("dup@example.com");
        let id = SqliteCustomerRepository.create(&mut con, &customer).await?;
        let error = SqliteCustomerRepository
            .create(&mut con, &customer)
            .await
            .expect_err("email is unique");
        assert_eq!(error.current_context(), &KernelError::Conflict);

        let stored = SqliteCustomerRepository.find_by_id(&mut con, &id).await?;
        assert_eq!(
            stored.map(|c| *c.signup_date()),
            Some(*customer.signup_date())
        );
        Ok(())
    }
}

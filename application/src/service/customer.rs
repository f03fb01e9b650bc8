use error_stack::Report;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{CustomerQuery, DependOnCustomerQuery};
use kernel::interface::update::{CustomerModifier, DependOnCustomerModifier};
use kernel::prelude::entity::{
    Address, CustomerId, Email, FirstName, LastName, NewCustomer, Phone, Role, Session,
    SignupDate,
};
use kernel::KernelError;

use crate::service::{authorize, invalid, not_found, optional, required};
use crate::transfer::{CreateCustomerDto, CustomerDto};

/// Checks the mandatory contact fields before anything touches the store.
pub(crate) fn validate_new_customer(
    dto: CreateCustomerDto,
) -> error_stack::Result<NewCustomer, KernelError> {
    let first_name = required("First name", &dto.first_name)?;
    let last_name = required("Last name", &dto.last_name)?;
    let email = required("Email", &dto.email)?;
    if !email.contains('@') {
        return Err(invalid(format!("{email} is not an email address")));
    }
    Ok(NewCustomer::new(
        FirstName::new(first_name),
        LastName::new(last_name),
        Email::new(email),
        optional(dto.phone).map(Phone::new),
        optional(dto.address).map(Address::new),
        SignupDate::today(),
    ))
}

#[async_trait::async_trait]
pub trait GetCustomerService: 'static + Sync + Send + DependOnCustomerQuery {
    async fn list_customers(
        &self,
        session: Option<&Session>,
    ) -> error_stack::Result<Vec<CustomerDto>, KernelError> {
        authorize(session, Role::User)?;
        let mut connection = self.database_connection().transact().await?;
        let customers = self.customer_query().find_all(&mut connection).await?;
        Ok(customers.into_iter().map(CustomerDto::from).collect())
    }

    async fn get_customer(
        &self,
        session: Option<&Session>,
        id: i64,
    ) -> error_stack::Result<CustomerDto, KernelError> {
        authorize(session, Role::User)?;
        let mut connection = self.database_connection().transact().await?;
        let customer = self
            .customer_query()
            .find_by_id(&mut connection, &CustomerId::new(id))
            .await?
            .ok_or_else(|| not_found(format!("Customer {id} does not exist")))?;
        Ok(CustomerDto::from(customer))
    }
}

impl<T> GetCustomerService for T where T: DependOnCustomerQuery {}

#[async_trait::async_trait]
pub trait CreateCustomerService:
    'static + Sync + Send + DependOnCustomerQuery + DependOnCustomerModifier
{
    async fn create_customer(
        &self,
        session: Option<&Session>,
        dto: CreateCustomerDto,
    ) -> error_stack::Result<CustomerDto, KernelError> {
        authorize(session, Role::User)?;
        let customer = validate_new_customer(dto)?;

        let mut connection = self.database_connection().transact().await?;
        let id = self
            .customer_modifier()
            .create(&mut connection, &customer)
            .await?;
        let created = self
            .customer_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::Internal)
                    .attach_printable(format!("Customer {} was not stored", i64::from(id)))
            })?;
        connection.commit().await?;

        tracing::info!("created customer {}", i64::from(id));
        Ok(CustomerDto::from(created))
    }
}

impl<T> CreateCustomerService for T where T: DependOnCustomerQuery + DependOnCustomerModifier {}

#[cfg(test)]
mod test {
    use driver::database::SqliteDatabase;
    use kernel::prelude::entity::Role;
    use kernel::KernelError;

    use super::{CreateCustomerService, GetCustomerService};
    use crate::service::test_support::session;
    use crate::transfer::CreateCustomerDto;

    fn customer(first_name: &str, last_name: &str, email: &str) -> CreateCustomerDto {
        CreateCustomerDto {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn customers_need_name_and_email() -> error_stack::Result<(), KernelError> {
        let db = SqliteDatabase::in_memory().await?;
        let clerk = session(&db, "clerk", Role::User).await?;

        for dto in [
            customer("", "Lee", "bob@example.com"),
            customer("Bob", " ", "bob@example.com"),
            customer("Bob", "Lee", ""),
        ] {
            let error = db
                .create_customer(Some(&clerk), dto)
                .await
                .expect_err("mandatory field missing");
            assert_eq!(error.current_context(), &KernelError::Validation);
        }
        assert!(db.list_customers(Some(&clerk)).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn customer_email_is_unique() -> error_stack::Result<(), KernelError> {
        let db = SqliteDatabase::in_memory().await?;
        let clerk = session(&db, "clerk", Role::User).await?;

        let created = db
            .create_customer(Some(&clerk), customer(" Bob ", "Lee", "bob@example.com"))
            .await?;
        assert_eq!(created.first_name, "Bob");
        let fetched = db.get_customer(Some(&clerk), created.id).await?;
        assert_eq!(fetched.email, "bob@example.com");

        let duplicate = db
            .create_customer(Some(&clerk), customer("Rob", "Lee", "bob@example.com"))
            .await;
        assert_eq!(
            duplicate.expect_err("email is taken").current_context(),
            &KernelError::Conflict
        );

        let missing = db.get_customer(Some(&clerk), created.id + 1).await;
        assert_eq!(
            missing.expect_err("unknown customer").current_context(),
            &KernelError::NotFound
        );
        Ok(())
    }

    #[tokio::test]
    async fn customer_records_require_a_session() -> error_stack::Result<(), KernelError> {
        let db = SqliteDatabase::in_memory().await?;
        let error = db
            .list_customers(None)
            .await
            .expect_err("no session");
        assert_eq!(error.current_context(), &KernelError::Authentication);
        Ok(())
    }
}

use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Customer, CustomerId, Email};
use crate::KernelError;

#[async_trait::async_trait]
pub trait CustomerQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &CustomerId,
    ) -> error_stack::Result<Option<Customer>, KernelError>;
    async fn find_by_email(
        &self,
        con: &mut Self::Transaction,
        email: &Email,
    ) -> error_stack::Result<Option<Customer>, KernelError>;
    /// Ordered by last name, then first name.
    async fn find_all(
        &self,
        con: &mut Self::Transaction,
    ) -> error_stack::Result<Vec<Customer>, KernelError>;
}

pub trait DependOnCustomerQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type CustomerQuery: CustomerQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn customer_query(&self) -> &Self::CustomerQuery;
}

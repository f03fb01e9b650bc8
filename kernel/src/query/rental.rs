use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{CopyId, Rental, RentalId, RentalOverview};
use crate::KernelError;

#[async_trait::async_trait]
pub trait RentalQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &RentalId,
    ) -> error_stack::Result<Option<Rental>, KernelError>;
    async fn find_open_by_copy_id(
        &self,
        con: &mut Self::Transaction,
        copy_id: &CopyId,
    ) -> error_stack::Result<Vec<Rental>, KernelError>;
    /// Newest rental first.
    async fn find_open(
        &self,
        con: &mut Self::Transaction,
    ) -> error_stack::Result<Vec<RentalOverview>, KernelError>;
}

pub trait DependOnRentalQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type RentalQuery: RentalQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn rental_query(&self) -> &Self::RentalQuery;
}

use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{CopyId, NewRental, RentalId, ReturnedAt};
use crate::KernelError;

#[async_trait::async_trait]
pub trait RentalModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn create(
        &self,
        con: &mut Self::Transaction,
        rental: &NewRental,
    ) -> error_stack::Result<RentalId, KernelError>;
    /// Moves an `OPEN` rental to `RETURNED` and yields the copy it held.
    ///
    /// Returns `None` if the rental does not exist or is already returned.
    async fn close(
        &self,
        con: &mut Self::Transaction,
        id: &RentalId,
        returned_at: &ReturnedAt,
    ) -> error_stack::Result<Option<CopyId>, KernelError>;
}

pub trait DependOnRentalModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type RentalModifier: RentalModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn rental_modifier(&self) -> &Self::RentalModifier;
}

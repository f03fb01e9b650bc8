use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{CopyId, MovieId, StoreLocation};
use crate::KernelError;

#[async_trait::async_trait]
pub trait CopyModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    /// Adds a new copy in `AVAILABLE` state.
    async fn create(
        &self,
        con: &mut Self::Transaction,
        movie_id: &MovieId,
        location: Option<&StoreLocation>,
    ) -> error_stack::Result<CopyId, KernelError>;
    /// Moves the lowest numbered `AVAILABLE` copy of the movie to `RENTED` in one step.
    ///
    /// Returns `None` when the movie has no available copy left.
    async fn claim_available(
        &self,
        con: &mut Self::Transaction,
        movie_id: &MovieId,
    ) -> error_stack::Result<Option<CopyId>, KernelError>;
    /// Moves a `RENTED` copy back to `AVAILABLE`. Returns `false` if it was not rented.
    async fn release(
        &self,
        con: &mut Self::Transaction,
        copy_id: &CopyId,
    ) -> error_stack::Result<bool, KernelError>;
}

pub trait DependOnCopyModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type CopyModifier: CopyModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn copy_modifier(&self) -> &Self::CopyModifier;
}

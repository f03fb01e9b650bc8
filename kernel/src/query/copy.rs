use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{CopyId, InventoryCopy, MovieId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait CopyQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &CopyId,
    ) -> error_stack::Result<Option<InventoryCopy>, KernelError>;
    async fn find_by_movie_id(
        &self,
        con: &mut Self::Transaction,
        movie_id: &MovieId,
    ) -> error_stack::Result<Vec<InventoryCopy>, KernelError>;
}

pub trait DependOnCopyQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type CopyQuery: CopyQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn copy_query(&self) -> &Self::CopyQuery;
}

use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Actor, ActorId, MovieId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait ActorQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &ActorId,
    ) -> error_stack::Result<Option<Actor>, KernelError>;
    async fn find_all(
        &self,
        con: &mut Self::Transaction,
    ) -> error_stack::Result<Vec<Actor>, KernelError>;
    async fn find_by_movie_id(
        &self,
        con: &mut Self::Transaction,
        movie_id: &MovieId,
    ) -> error_stack::Result<Vec<Actor>, KernelError>;
}

pub trait DependOnActorQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type ActorQuery: ActorQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn actor_query(&self) -> &Self::ActorQuery;
}

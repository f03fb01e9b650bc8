use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{ActorId, CategoryId, MovieId, NewMovie};
use crate::KernelError;

#[async_trait::async_trait]
pub trait MovieModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn create(
        &self,
        con: &mut Self::Transaction,
        movie: &NewMovie,
    ) -> error_stack::Result<MovieId, KernelError>;
    async fn add_category(
        &self,
        con: &mut Self::Transaction,
        movie_id: &MovieId,
        category_id: &CategoryId,
    ) -> error_stack::Result<(), KernelError>;
    async fn add_actor(
        &self,
        con: &mut Self::Transaction,
        movie_id: &MovieId,
        actor_id: &ActorId,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnMovieModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type MovieModifier: MovieModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn movie_modifier(&self) -> &Self::MovieModifier;
}

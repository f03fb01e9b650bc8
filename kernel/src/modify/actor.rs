use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{ActorId, FirstName, LastName};
use crate::KernelError;

#[async_trait::async_trait]
pub trait ActorModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn create(
        &self,
        con: &mut Self::Transaction,
        first_name: &FirstName,
        last_name: &LastName,
    ) -> error_stack::Result<ActorId, KernelError>;
}

pub trait DependOnActorModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type ActorModifier: ActorModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn actor_modifier(&self) -> &Self::ActorModifier;
}

use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{CategoryId, CategoryName};
use crate::KernelError;

#[async_trait::async_trait]
pub trait CategoryModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn create(
        &self,
        con: &mut Self::Transaction,
        name: &CategoryName,
    ) -> error_stack::Result<CategoryId, KernelError>;
}

pub trait DependOnCategoryModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type CategoryModifier: CategoryModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn category_modifier(&self) -> &Self::CategoryModifier;
}

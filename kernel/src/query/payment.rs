use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Payment, RentalId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait PaymentQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_rental_id(
        &self,
        con: &mut Self::Transaction,
        rental_id: &RentalId,
    ) -> error_stack::Result<Vec<Payment>, KernelError>;
}

pub trait DependOnPaymentQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type PaymentQuery: PaymentQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn payment_query(&self) -> &Self::PaymentQuery;
}

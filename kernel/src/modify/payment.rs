use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{CreatedAt, Payment, PaymentAmount, PaymentId, RentalId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait PaymentModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn create(
        &self,
        con: &mut Self::Transaction,
        rental_id: &RentalId,
        amount: &PaymentAmount,
        paid_at: &CreatedAt<Payment>,
    ) -> error_stack::Result<PaymentId, KernelError>;
}

pub trait DependOnPaymentModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type PaymentModifier: PaymentModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn payment_modifier(&self) -> &Self::PaymentModifier;
}

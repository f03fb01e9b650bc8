use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{PopularMovie, RentalStatistics};
use crate::KernelError;

#[async_trait::async_trait]
pub trait ReportQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    /// Movies ranked by how often any of their copies was rented.
    async fn popular_movies(
        &self,
        con: &mut Self::Transaction,
        limit: i64,
    ) -> error_stack::Result<Vec<PopularMovie>, KernelError>;
    async fn statistics(
        &self,
        con: &mut Self::Transaction,
    ) -> error_stack::Result<RentalStatistics, KernelError>;
}

pub trait DependOnReportQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type ReportQuery: ReportQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn report_query(&self) -> &Self::ReportQuery;
}

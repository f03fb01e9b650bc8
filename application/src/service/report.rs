use kernel::interface::database::DatabaseConnection;
use kernel::interface::query::{DependOnReportQuery, ReportQuery};
use kernel::KernelError;

use crate::transfer::{PopularMovieDto, StatisticsDto};

/// How many titles the popularity ranking returns.
pub const POPULAR_MOVIE_LIMIT: i64 = 10;

#[async_trait::async_trait]
pub trait GetReportService: 'static + Sync + Send + DependOnReportQuery {
    /// Most rented titles first, equal counts ordered by movie id.
    async fn popular_movies(
        &self,
    ) -> error_stack::Result<Vec<PopularMovieDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let movies = self
            .report_query()
            .popular_movies(&mut connection, POPULAR_MOVIE_LIMIT)
            .await?;
        Ok(movies.into_iter().map(PopularMovieDto::from).collect())
    }

    async fn statistics(&self) -> error_stack::Result<StatisticsDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let statistics = self.report_query().statistics(&mut connection).await?;
        Ok(StatisticsDto::from(statistics))
    }
}

impl<T> GetReportService for T where T: DependOnReportQuery {}

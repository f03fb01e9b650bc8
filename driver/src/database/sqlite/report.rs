use sqlx::SqliteConnection;

use kernel::interface::query::{DependOnReportQuery, ReportQuery};
use kernel::prelude::entity::{MovieId, MovieTitle, PopularMovie, RentalStatistics};
use kernel::KernelError;

use crate::database::sqlite::{SqliteDatabase, SqliteTransaction};
use crate::error::ConvertError;

pub struct SqliteReportRepository;

#[async_trait::async_trait]
impl ReportQuery for SqliteReportRepository {
    type Transaction = SqliteTransaction;

    async fn popular_movies(
        &self,
        con: &mut SqliteTransaction,
        limit: i64,
    ) -> error_stack::Result<Vec<PopularMovie>, KernelError> {
        SqliteReportInternal::popular_movies(con, limit).await
    }

    async fn statistics(
        &self,
        con: &mut SqliteTransaction,
    ) -> error_stack::Result<RentalStatistics, KernelError> {
        SqliteReportInternal::statistics(con).await
    }
}

impl DependOnReportQuery for SqliteDatabase {
    type ReportQuery = SqliteReportRepository;
    fn report_query(&self) -> &Self::ReportQuery {
        &SqliteReportRepository
    }
}

#[derive(sqlx::FromRow)]
struct PopularMovieRow {
    movie_id: i64,
    title: String,
    rental_count: i64,
}

impl From<PopularMovieRow> for PopularMovie {
    fn from(value: PopularMovieRow) -> Self {
        PopularMovie {
            movie_id: MovieId::new(value.movie_id),
            title: MovieTitle::new(value.title),
            rental_count: value.rental_count,
        }
    }
}

#[derive(sqlx::FromRow)]
struct StatisticsRow {
    movie_count: i64,
    customer_count: i64,
    rental_count: i64,
    open_rental_count: i64,
    average_rental_days: f64,
    average_rental_rate: f64,
    average_rentals_per_customer: f64,
    average_movie_rating: f64,
    average_copies_per_movie: f64,
    average_payment_amount: f64,
}

impl From<StatisticsRow> for RentalStatistics {
    fn from(value: StatisticsRow) -> Self {
        RentalStatistics {
            movie_count: value.movie_count,
            customer_count: value.customer_count,
            rental_count: value.rental_count,
            open_rental_count: value.open_rental_count,
            average_rental_days: value.average_rental_days,
            average_rental_rate: value.average_rental_rate,
            average_rentals_per_customer: value.average_rentals_per_customer,
            average_movie_rating: value.average_movie_rating,
            average_copies_per_movie: value.average_copies_per_movie,
            average_payment_amount: value.average_payment_amount,
        }
    }
}

pub(in crate::database) struct SqliteReportInternal;

impl SqliteReportInternal {
    async fn popular_movies(
        con: &mut SqliteConnection,
        limit: i64,
    ) -> error_stack::Result<Vec<PopularMovie>, KernelError> {
        let rows = sqlx::query_as::<_, PopularMovieRow>(
            // language=sqlite
            r#"
            SELECT m.movie_id, m.title, COUNT(*) AS rental_count
            FROM rental r
            JOIN inventory_copy ic ON ic.copy_id = r.copy_id
            JOIN movie m ON m.movie_id = ic.movie_id
            GROUP BY m.movie_id, m.title
            ORDER BY rental_count DESC, m.movie_id ASC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(PopularMovie::from).collect())
    }

    async fn statistics(
        con: &mut SqliteConnection,
    ) -> error_stack::Result<RentalStatistics, KernelError> {
        let row = sqlx::query_as::<_, StatisticsRow>(
            // language=sqlite
            r#"
            SELECT
                (SELECT COUNT(*) FROM movie) AS movie_count,
                (SELECT COUNT(*) FROM customer) AS customer_count,
                (SELECT COUNT(*) FROM rental) AS rental_count,
                (SELECT COUNT(*) FROM rental WHERE rental_status = 'OPEN') AS open_rental_count,
                COALESCE((
                    SELECT AVG(julianday(return_date) - julianday(rental_date))
                    FROM rental
                    WHERE rental_status = 'RETURNED' AND return_date IS NOT NULL
                ), 0.0) AS average_rental_days,
                COALESCE((SELECT AVG(rental_rate) FROM movie), 0.0) AS average_rental_rate,
                COALESCE((
                    SELECT AVG(rentals)
                    FROM (SELECT COUNT(*) AS rentals FROM rental GROUP BY customer_id)
                ), 0.0) AS average_rentals_per_customer,
                COALESCE((
                    SELECT AVG(movie_rating) FROM movie WHERE movie_rating IS NOT NULL
                ), 0.0) AS average_movie_rating,
                COALESCE((
                    SELECT AVG(copies)
                    FROM (
                        SELECT COUNT(ic.copy_id) AS copies
                        FROM movie m
                        LEFT JOIN inventory_copy ic ON ic.movie_id = m.movie_id
                        GROUP BY m.movie_id
                    )
                ), 0.0) AS average_copies_per_movie,
                COALESCE((SELECT AVG(amount) FROM payment), 0.0) AS average_payment_amount
            "#,
        )
        .fetch_one(con)
        .await
        .convert_error()?;
        Ok(RentalStatistics::from(row))
    }
}

#[cfg(test)]
mod test {
    use time::macros::datetime;

    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::ReportQuery;
    use kernel::interface::update::{PaymentModifier, RentalModifier};
    use kernel::prelude::entity::{
        CreatedAt, NewRental, PaymentAmount, RentalStatistics, RentedAt, ReturnedAt,
    };
    use kernel::KernelError;

    use crate::database::sqlite::test_support::stocked;
    use crate::database::sqlite::{
        SqliteDatabase, SqlitePaymentRepository, SqliteRentalRepository, SqliteReportRepository,
    };

    #[tokio::test]
    async fn empty_database_reports_zeroes() -> error_stack::Result<(), KernelError> {
        let db = SqliteDatabase::in_memory().await?;
        let mut con = db.transact().await?;
        let statistics = SqliteReportRepository.statistics(&mut con).await?;
        assert_eq!(statistics, RentalStatistics::default());
        let popular = SqliteReportRepository.popular_movies(&mut con, 10).await?;
        assert!(popular.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn statistics_follow_rentals() -> error_stack::Result<(), KernelError> {
        let db = SqliteDatabase::in_memory().await?;
        let (fargo, fargo_copies, customer_id) = stocked(&db, "Fargo", 2).await?;
        let (heat, heat_copies, _) = stocked(&db, "Heat", 1).await?;
        let mut con = db.transact().await?;

        let returned = SqliteRentalRepository
            .create(
                &mut con,
                &NewRental::open(
                    customer_id,
                    fargo_copies[0],
                    RentedAt::new(datetime!(2025-10-20 12:00 UTC)),
                ),
            )
            .await?;
        SqliteRentalRepository
            .close(
                &mut con,
                &returned,
                &ReturnedAt::new(datetime!(2025-10-23 00:00 UTC)),
            )
            .await?;
        SqliteRentalRepository
            .create(
                &mut con,
                &NewRental::open(customer_id, fargo_copies[1], RentedAt::now()),
            )
            .await?;
        SqliteRentalRepository
            .create(
                &mut con,
                &NewRental::open(customer_id, heat_copies[0], RentedAt::now()),
            )
            .await?;
        SqlitePaymentRepository
            .create(&mut con, &returned, &PaymentAmount::new(4.0), &CreatedAt::now())
            .await?;

        let statistics = SqliteReportRepository.statistics(&mut con).await?;
        assert_eq!(statistics.movie_count, 2);
        assert_eq!(statistics.customer_count, 2);
        assert_eq!(statistics.rental_count, 3);
        assert_eq!(statistics.open_rental_count, 2);
        assert!((statistics.average_rental_days - 2.5).abs() < 1e-6);
        assert!((statistics.average_rentals_per_customer - 3.0).abs() < 1e-9);
        assert!((statistics.average_copies_per_movie - 1.5).abs() < 1e-9);
        assert!((statistics.average_payment_amount - 4.0).abs() < 1e-9);
        assert!((statistics.average_rental_rate - 2.99).abs() < 1e-9);
        assert_eq!(statistics.average_movie_rating, 0.0);

        let popular = SqliteReportRepository.popular_movies(&mut con, 10).await?;
        let ranking = popular
            .iter()
            .map(|movie| (movie.movie_id, movie.rental_count))
            .collect::<Vec<_>>();
        assert_eq!(ranking, vec![(fargo, 2), (heat, 1)]);
        Ok(())
    }

    #[tokio::test]
    async fn popular_movies_break_ties_by_id() -> error_stack::Result<(), KernelError> {
        let db = SqliteDatabase::in_memory().await?;
        let (first, first_copies, customer_id) = stocked(&db, "Alien", 1).await?;
        let (second, second_copies, _) = stocked(&db, "Aliens", 1).await?;
        let mut con = db.transact().await?;
        for copy_id in [second_copies[0], first_copies[0]] {
            SqliteRentalRepository
                .create(&mut con, &NewRental::open(customer_id, copy_id, RentedAt::now()))
                .await?;
        }
        let popular = SqliteReportRepository.popular_movies(&mut con, 1).await?;
        assert_eq!(popular.len(), 1);
        assert_eq!(popular[0].movie_id, first);
        assert_ne!(popular[0].movie_id, second);
        Ok(())
    }
}

use error_stack::ResultExt;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

use kernel::interface::query::{DependOnMovieQuery, MovieQuery};
use kernel::interface::update::{DependOnMovieModifier, MovieModifier};
use kernel::prelude::entity::{
    ActorId, Availability, CategoryId, LateFee, LengthMinutes, Movie, MovieDescription,
    MovieFilter, MovieId, MovieRating, MovieSort, MovieSortKey, MovieSummary, MovieTitle,
    MpaaRating, NewMovie, ReleaseYear, RentalRate, SortDirection,
};
use kernel::KernelError;

use crate::database::sqlite::{SqliteDatabase, SqliteTransaction};
use crate::error::ConvertError;

pub struct SqliteMovieRepository;

#[async_trait::async_trait]
impl MovieQuery for SqliteMovieRepository {
    type Transaction = SqliteTransaction;

    async fn find_by_id(
        &self,
        con: &mut SqliteTransaction,
        id: &MovieId,
    ) -> error_stack::Result<Option<Movie>, KernelError> {
        SqliteMovieInternal::find_by_id(con, id).await
    }

    async fn find_all(
        &self,
        con: &mut SqliteTransaction,
        filter: &MovieFilter,
        sort: &MovieSort,
    ) -> error_stack::Result<Vec<MovieSummary>, KernelError> {
        SqliteMovieInternal::find_all(con, filter, sort).await
    }

    async fn availability(
        &self,
        con: &mut SqliteTransaction,
        id: &MovieId,
    ) -> error_stack::Result<Availability, KernelError> {
        SqliteMovieInternal::availability(con, id).await
    }
}

#[async_trait::async_trait]
impl MovieModifier for SqliteMovieRepository {
    type Transaction = SqliteTransaction;

    async fn create(
        &self,
        con: &mut SqliteTransaction,
        movie: &NewMovie,
    ) -> error_stack::Result<MovieId, KernelError> {
        SqliteMovieInternal::create(con, movie).await
    }

    async fn add_category(
        &self,
        con: &mut SqliteTransaction,
        movie_id: &MovieId,
        category_id: &CategoryId,
    ) -> error_stack::Result<(), KernelError> {
        SqliteMovieInternal::add_category(con, movie_id, category_id).await
    }

    async fn add_actor(
        &self,
        con: &mut SqliteTransaction,
        movie_id: &MovieId,
        actor_id: &ActorId,
    ) -> error_stack::Result<(), KernelError> {
        SqliteMovieInternal::add_actor(con, movie_id, actor_id).await
    }
}

impl DependOnMovieQuery for SqliteDatabase {
    type MovieQuery = SqliteMovieRepository;
    fn movie_query(&self) -> &Self::MovieQuery {
        &SqliteMovieRepository
    }
}

impl DependOnMovieModifier for SqliteDatabase {
    type MovieModifier = SqliteMovieRepository;
    fn movie_modifier(&self) -> &Self::MovieModifier {
        &SqliteMovieRepository
    }
}

#[derive(sqlx::FromRow)]
struct MovieRow {
    movie_id: i64,
    title: String,
    release_year: Option<i32>,
    mpaa_rating: Option<String>,
    length_minutes: Option<i32>,
    movie_rating: Option<f64>,
    description: Option<String>,
    rental_rate: f64,
    late_fee: f64,
}

impl From<MovieRow> for Movie {
    fn from(value: MovieRow) -> Self {
        Movie::new(
            MovieId::new(value.movie_id),
            MovieTitle::new(value.title),
            value.release_year.map(ReleaseYear::new),
            value.mpaa_rating.map(MpaaRating::new),
            value.length_minutes.map(LengthMinutes::new),
            value.movie_rating.map(MovieRating::new),
            value.description.map(MovieDescription::new),
            RentalRate::new(value.rental_rate),
            LateFee::new(value.late_fee),
        )
    }
}

#[derive(sqlx::FromRow)]
struct MovieSummaryRow {
    movie_id: i64,
    title: String,
    release_year: Option<i32>,
    mpaa_rating: Option<String>,
    movie_rating: Option<f64>,
    categories: String,
}

impl From<MovieSummaryRow> for MovieSummary {
    fn from(value: MovieSummaryRow) -> Self {
        MovieSummary::new(
            MovieId::new(value.movie_id),
            MovieTitle::new(value.title),
            value.release_year.map(ReleaseYear::new),
            value.mpaa_rating.map(MpaaRating::new),
            value.movie_rating.map(MovieRating::new),
            value.categories,
        )
    }
}

/// Turns a [`MovieFilter`] and [`MovieSort`] into one parameterized statement.
///
/// User input only ever reaches the statement as bound parameters. Sorting maps onto
/// a fixed set of columns.
struct MovieListing<'a> {
    filter: &'a MovieFilter,
    sort: &'a MovieSort,
}

impl<'a> MovieListing<'a> {
    fn new(filter: &'a MovieFilter, sort: &'a MovieSort) -> Self {
        Self { filter, sort }
    }

    fn build(&self) -> QueryBuilder<'a, Sqlite> {
        let mut builder = QueryBuilder::new(
            // language=sqlite
            r#"
            SELECT
                m.movie_id,
                m.title,
                m.release_year,
                m.mpaa_rating,
                m.movie_rating,
                COALESCE((
                    SELECT GROUP_CONCAT(c.category_name, ', ')
                    FROM (SELECT category_id, category_name FROM category ORDER BY category_name) AS c
                    WHERE c.category_id IN (
                        SELECT mc.category_id FROM movie_category mc WHERE mc.movie_id = m.movie_id
                    )
                ), '') AS categories
            FROM movie m
            "#,
        );

        let mut clause = " WHERE ";
        if let Some(keyword) = self.filter.keyword() {
            // LIKE ignores ASCII case in SQLite
            builder
                .push(clause)
                .push("m.title LIKE ")
                .push_bind(like_pattern(keyword))
                .push(" ESCAPE '\\'");
            clause = " AND ";
        }
        if let Some(category_id) = self.filter.category_id() {
            builder
                .push(clause)
                .push("EXISTS (SELECT 1 FROM movie_category fc WHERE fc.movie_id = m.movie_id AND fc.category_id = ")
                .push_bind(i64::from(*category_id))
                .push(")");
            clause = " AND ";
        }
        if let Some(release_year) = self.filter.release_year() {
            builder
                .push(clause)
                .push("m.release_year = ")
                .push_bind(i32::from(*release_year));
            clause = " AND ";
        }
        if let Some(min_rating) = self.filter.min_rating() {
            builder
                .push(clause)
                .push("m.movie_rating >= ")
                .push_bind(f64::from(*min_rating));
        }

        builder
            .push(" ORDER BY ")
            .push(order_column(self.sort.key))
            .push(" ")
            .push(order_direction(self.sort.direction))
            .push(", m.movie_id ASC");
        builder
    }
}

fn order_column(key: MovieSortKey) -> &'static str {
    match key {
        MovieSortKey::Title => "m.title COLLATE NOCASE",
        MovieSortKey::Year => "m.release_year",
        MovieSortKey::Rating => "m.movie_rating",
    }
}

fn order_direction(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::Asc => "ASC",
        SortDirection::Desc => "DESC",
    }
}

fn like_pattern(keyword: &str) -> String {
    let mut pattern = String::with_capacity(keyword.len() + 2);
    pattern.push('%');
    for c in keyword.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

pub(in crate::database) struct SqliteMovieInternal;

impl SqliteMovieInternal {
    async fn find_by_id(
        con: &mut SqliteConnection,
        id: &MovieId,
    ) -> error_stack::Result<Option<Movie>, KernelError> {
        let row = sqlx::query_as::<_, MovieRow>(
            // language=sqlite
            r#"
            SELECT movie_id, title, release_year, mpaa_rating, length_minutes,
                   movie_rating, description, rental_rate, late_fee
            FROM movie
            WHERE movie_id = ?
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Movie::from))
    }

    async fn find_all(
        con: &mut SqliteConnection,
        filter: &MovieFilter,
        sort: &MovieSort,
    ) -> error_stack::Result<Vec<MovieSummary>, KernelError> {
        let mut builder = MovieListing::new(filter, sort).build();
        let rows = builder
            .build_query_as::<MovieSummaryRow>()
            .fetch_all(con)
            .await
            .convert_error()?;
        Ok(rows.into_iter().map(MovieSummary::from).collect())
    }

    async fn availability(
        con: &mut SqliteConnection,
        id: &MovieId,
    ) -> error_stack::Result<Availability, KernelError> {
        let (total, available) = sqlx::query_as::<_, (i64, i64)>(
            // language=sqlite
            r#"
            SELECT
                COUNT(*),
                COALESCE(SUM(CASE WHEN status = 'AVAILABLE' THEN 1 ELSE 0 END), 0)
            FROM inventory_copy
            WHERE movie_id = ?
            "#,
        )
        .bind(id.as_ref())
        .fetch_one(con)
        .await
        .convert_error()?;
        Ok(Availability::new(total, available))
    }

    pub(in crate::database) async fn create(
        con: &mut SqliteConnection,
        movie: &NewMovie,
    ) -> error_stack::Result<MovieId, KernelError> {
        let result = sqlx::query(
            // language=sqlite
            r#"
            INSERT INTO movie (title, release_year, mpaa_rating, length_minutes,
                               movie_rating, description, rental_rate, late_fee)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(movie.title().as_ref())
        .bind(movie.release_year().map(i32::from))
        .bind(movie.mpaa_rating().clone().map(String::from))
        .bind(movie.length().map(i32::from))
        .bind(movie.rating().map(f64::from))
        .bind(movie.description().clone().map(String::from))
        .bind(f64::from(*movie.rental_rate()))
        .bind(f64::from(*movie.late_fee()))
        .execute(con)
        .await
        .convert_error()?;
        let id = MovieId::new(result.last_insert_rowid());
        tracing::debug!("created movie {}", i64::from(id));
        Ok(id)
    }

    async fn add_category(
        con: &mut SqliteConnection,
        movie_id: &MovieId,
        category_id: &CategoryId,
    ) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=sqlite
            r#"
            INSERT INTO movie_category (movie_id, category_id)
            VALUES (?, ?)
            "#,
        )
        .bind(movie_id.as_ref())
        .bind(category_id.as_ref())
        .execute(con)
        .await
        .convert_error()
        .attach_printable_lazy(|| format!("Unknown category {}", i64::from(*category_id)))?;
        Ok(())
    }

    async fn add_actor(
        con: &mut SqliteConnection,
        movie_id: &MovieId,
        actor_id: &ActorId,
    ) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=sqlite
            r#"
            INSERT INTO movie_actor (movie_id, actor_id)
            VALUES (?, ?)
            "#,
        )
        .bind(movie_id.as_ref())
        .bind(actor_id.as_ref())
        .execute(con)
        .await
        .convert_error()
        .attach_printable_lazy(|| format!("Unknown actor {}", i64::from(*actor_id)))?;
        Ok(())
    }
}

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{
    ActorQuery, CategoryQuery, DependOnActorQuery, DependOnCategoryQuery, DependOnMovieQuery,
    MovieQuery,
};
use kernel::interface::update::{
    ActorModifier, CategoryModifier, CopyModifier, DependOnActorModifier,
    DependOnCategoryModifier, DependOnCopyModifier, DependOnMovieModifier, MovieModifier,
};
use kernel::prelude::entity::{
    ActorId, CategoryId, CategoryName, FirstName, LastName, LateFee, LengthMinutes,
    MovieDescription, MovieDetail, MovieFilter, MovieId, MovieRating, MovieSort, MovieTitle,
    MpaaRating, NewMovie, ReleaseYear, RentalRate, Role, Session, StoreLocation,
};
use kernel::KernelError;

use crate::service::{authorize, invalid, not_found, optional, required};
use crate::transfer::{
    ActorDto, AddCopiesDto, CategoryDto, CreateActorDto, CreateCategoryDto, CreateMovieDto,
    MovieDetailDto, MovieQueryDto, MovieSummaryDto,
};

#[async_trait::async_trait]
pub trait GetMovieService:
    'static + Sync + Send + DependOnMovieQuery + DependOnCategoryQuery + DependOnActorQuery
{
    async fn list_movies(
        &self,
        dto: MovieQueryDto,
    ) -> error_stack::Result<Vec<MovieSummaryDto>, KernelError> {
        let mut filter = MovieFilter::default();
        if let Some(keyword) = dto.keyword {
            filter = filter.with_keyword(keyword);
        }
        if let Some(category_id) = dto.category_id {
            filter = filter.with_category_id(CategoryId::new(category_id));
        }
        if let Some(release_year) = dto.release_year {
            filter = filter.with_release_year(ReleaseYear::new(release_year));
        }
        if let Some(min_rating) = dto.min_rating {
            filter = filter.with_min_rating(MovieRating::new(min_rating));
        }
        let sort = MovieSort::parse(dto.sort.as_deref(), dto.direction.as_deref());

        let mut connection = self.database_connection().transact().await?;
        let movies = self
            .movie_query()
            .find_all(&mut connection, &filter, &sort)
            .await?;
        Ok(movies.into_iter().map(MovieSummaryDto::from).collect())
    }

    /// Fails with [`KernelError::NotFound`] for an unknown id.
    async fn get_movie(&self, id: i64) -> error_stack::Result<MovieDetailDto, KernelError> {
        let id = MovieId::new(id);
        let mut connection = self.database_connection().transact().await?;
        let movie = self
            .movie_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| not_found(format!("Movie {} does not exist", i64::from(id))))?;
        let categories = self
            .category_query()
            .find_by_movie_id(&mut connection, &id)
            .await?;
        let actors = self
            .actor_query()
            .find_by_movie_id(&mut connection, &id)
            .await?;
        let availability = self
            .movie_query()
            .availability(&mut connection, &id)
            .await?;
        let detail = MovieDetail::new(movie, categories, actors, availability);
        Ok(MovieDetailDto::from(detail))
    }
}

impl<T> GetMovieService for T where
    T: DependOnMovieQuery + DependOnCategoryQuery + DependOnActorQuery
{
}

#[async_trait::async_trait]
pub trait GetCategoryService: 'static + Sync + Send + DependOnCategoryQuery {
    async fn list_categories(&self) -> error_stack::Result<Vec<CategoryDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let categories = self.category_query().find_all(&mut connection).await?;
        Ok(categories.into_iter().map(CategoryDto::from).collect())
    }
}

impl<T> GetCategoryService for T where T: DependOnCategoryQuery {}

#[async_trait::async_trait]
pub trait GetActorService: 'static + Sync + Send + DependOnActorQuery {
    async fn list_actors(&self) -> error_stack::Result<Vec<ActorDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let actors = self.actor_query().find_all(&mut connection).await?;
        Ok(actors.into_iter().map(ActorDto::from).collect())
    }
}

impl<T> GetActorService for T where T: DependOnActorQuery {}

fn validate_new_movie(dto: &CreateMovieDto) -> error_stack::Result<NewMovie, KernelError> {
    let title = required("Title", &dto.title)?;
    let rental_rate = dto.rental_rate.map(RentalRate::new).unwrap_or_default();
    if f64::from(rental_rate) < 0.0 {
        return Err(invalid("Rental rate must not be negative"));
    }
    let late_fee = dto.late_fee.map(LateFee::new).unwrap_or_default();
    if f64::from(late_fee) < 0.0 {
        return Err(invalid("Late fee must not be negative"));
    }
    let rating = dto.rating.map(MovieRating::new);
    if rating.is_some_and(|rating| !rating.is_in_range()) {
        return Err(invalid(format!(
            "Rating must be between {} and {}",
            MovieRating::MIN,
            MovieRating::MAX
        )));
    }
    if dto.copies < 0 {
        return Err(invalid("Copies must not be negative"));
    }
    Ok(NewMovie::new(
        MovieTitle::new(title),
        dto.release_year.map(ReleaseYear::new),
        optional(dto.mpaa_rating.clone()).map(MpaaRating::new),
        dto.length_minutes.map(LengthMinutes::new),
        rating,
        optional(dto.description.clone()).map(MovieDescription::new),
        rental_rate,
        late_fee,
    ))
}

#[async_trait::async_trait]
pub trait CreateMovieService:
    'static + Sync + Send + DependOnMovieModifier + DependOnCopyModifier
{
    /// Stores the movie with its links and copies in one transaction.
    async fn create_movie(
        &self,
        session: Option<&Session>,
        dto: CreateMovieDto,
    ) -> error_stack::Result<i64, KernelError> {
        authorize(session, Role::Admin)?;
        let movie = validate_new_movie(&dto)?;
        let location = optional(dto.store_location).map(StoreLocation::new);

        let mut connection = self.database_connection().transact().await?;
        let id = self.movie_modifier().create(&mut connection, &movie).await?;
        for category_id in dto.category_ids {
            self.movie_modifier()
                .add_category(&mut connection, &id, &CategoryId::new(category_id))
                .await?;
        }
        for actor_id in dto.actor_ids {
            self.movie_modifier()
                .add_actor(&mut connection, &id, &ActorId::new(actor_id))
                .await?;
        }
        for _ in 0..dto.copies {
            self.copy_modifier()
                .create(&mut connection, &id, location.as_ref())
                .await?;
        }
        connection.commit().await?;

        tracing::info!("created movie {} with {} copies", i64::from(id), dto.copies);
        Ok(id.into())
    }
}

impl<T> CreateMovieService for T where T: DependOnMovieModifier + DependOnCopyModifier {}

#[async_trait::async_trait]
pub trait AddCopiesService:
    'static + Sync + Send + DependOnMovieQuery + DependOnCopyModifier
{
    async fn add_copies(
        &self,
        session: Option<&Session>,
        dto: AddCopiesDto,
    ) -> error_stack::Result<Vec<i64>, KernelError> {
        authorize(session, Role::Admin)?;
        if dto.count < 1 {
            return Err(invalid("At least one copy must be added"));
        }
        let movie_id = MovieId::new(dto.movie_id);
        let location = optional(dto.store_location).map(StoreLocation::new);

        let mut connection = self.database_connection().transact().await?;
        if self
            .movie_query()
            .find_by_id(&mut connection, &movie_id)
            .await?
            .is_none()
        {
            return Err(not_found(format!("Movie {} does not exist", dto.movie_id)));
        }
        let mut copies = Vec::new();
        for _ in 0..dto.count {
            let id = self
                .copy_modifier()
                .create(&mut connection, &movie_id, location.as_ref())
                .await?;
            copies.push(id.into());
        }
        connection.commit().await?;

        tracing::info!("added {} copies of movie {}", dto.count, dto.movie_id);
        Ok(copies)
    }
}

impl<T> AddCopiesService for T where T: DependOnMovieQuery + DependOnCopyModifier {}

#[async_trait::async_trait]
pub trait CreateCategoryService: 'static + Sync + Send + DependOnCategoryModifier {
    async fn create_category(
        &self,
        session: Option<&Session>,
        dto: CreateCategoryDto,
    ) -> error_stack::Result<i64, KernelError> {
        authorize(session, Role::Admin)?;
        let name = required("Category name", &dto.name)?;

        let mut connection = self.database_connection().transact().await?;
        let id = self
            .category_modifier()
            .create(&mut connection, &CategoryName::new(name.clone()))
            .await
            .map_err(|report| {
                if *report.current_context() == KernelError::Conflict {
                    report.attach_printable(format!("Category {name} already exists"))
                } else {
                    report
                }
            })?;
        connection.commit().await?;
        Ok(id.into())
    }
}

impl<T> CreateCategoryService for T where T: DependOnCategoryModifier {}

#[async_trait::async_trait]
pub trait CreateActorService: 'static + Sync + Send + DependOnActorModifier {
    async fn create_actor(
        &self,
        session: Option<&Session>,
        dto: CreateActorDto,
    ) -> error_stack::Result<i64, KernelError> {
        authorize(session, Role::Admin)?;
        let first_name = FirstName::new(required("First name", &dto.first_name)?);
        let last_name = LastName::new(required("Last name", &dto.last_name)?);

        let mut connection = self.database_connection().transact().await?;
        let id = self
            .actor_modifier()
            .create(&mut connection, &first_name, &last_name)
            .await?;
        connection.commit().await?;
        Ok(id.into())
    }
}

impl<T> CreateActorService for T where T: DependOnActorModifier {}

#[cfg(test)]
mod test {
    use driver::database::SqliteDatabase;
    use kernel::prelude::entity::Role;
    use kernel::KernelError;

    use super::{
        AddCopiesService, CreateActorService, CreateCategoryService, CreateMovieService,
        GetActorService, GetCategoryService, GetMovieService,
    };
    use crate::service::test_support::session;
    use crate::transfer::{
        AddCopiesDto, CreateActorDto, CreateCategoryDto, CreateMovieDto, MovieQueryDto,
    };

    fn movie(title: &str, rating: f64) -> CreateMovieDto {
        CreateMovieDto {
            title: title.to_string(),
            rating: Some(rating),
            copies: 1,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn min_rating_filter_keeps_title_order() -> error_stack::Result<(), KernelError> {
        let db = SqliteDatabase::in_memory().await?;
        let admin = session(&db, "boss", Role::Admin).await?;
        for (title, rating) in [
            ("Schindler's List", 9.0),
            ("Heat", 8.3),
            ("The Godfather", 9.2),
            ("Casablanca", 8.5),
            ("Ikiru", 9.1),
        ] {
            db.create_movie(Some(&admin), movie(title, rating)).await?;
        }

        let movies = db
            .list_movies(MovieQueryDto {
                min_rating: Some(9.0),
                ..Default::default()
            })
            .await?;
        let titles = movies
            .iter()
            .map(|movie| movie.title.as_str())
            .collect::<Vec<_>>();
        assert_eq!(titles, vec!["Ikiru", "Schindler's List", "The Godfather"]);
        assert!(movies
            .iter()
            .all(|movie| movie.rating.is_some_and(|rating| rating >= 9.0)));

        let by_rating = db
            .list_movies(MovieQueryDto {
                sort: Some("rating".to_string()),
                direction: Some("desc".to_string()),
                ..Default::default()
            })
            .await?;
        assert_eq!(by_rating[0].title, "The Godfather");
        Ok(())
    }

    #[tokio::test]
    async fn detail_reports_links_and_availability() -> error_stack::Result<(), KernelError> {
        let db = SqliteDatabase::in_memory().await?;
        let admin = session(&db, "boss", Role::Admin).await?;
        let crime = db
            .create_category(
                Some(&admin),
                CreateCategoryDto {
                    name: "Crime".to_string(),
                },
            )
            .await?;
        let actor = db
            .create_actor(
                Some(&admin),
                CreateActorDto {
                    first_name: "Frances".to_string(),
                    last_name: "McDormand".to_string(),
                },
            )
            .await?;
        let id = db
            .create_movie(
                Some(&admin),
                CreateMovieDto {
                    title: "Fargo".to_string(),
                    category_ids: vec![crime],
                    actor_ids: vec![actor],
                    copies: 2,
                    store_location: Some("Front Shelf".to_string()),
                    ..Default::default()
                },
            )
            .await?;

        let detail = db.get_movie(id).await?;
        assert_eq!(detail.movie.title, "Fargo");
        assert_eq!(detail.movie.rental_rate, 2.99);
        assert_eq!(detail.categories.len(), 1);
        assert_eq!(detail.actors[0].last_name, "McDormand");
        assert_eq!((detail.total_copies, detail.available_copies), (2, 2));

        let missing = db.get_movie(id + 100).await;
        assert_eq!(
            missing.expect_err("unknown movie").current_context(),
            &KernelError::NotFound
        );

        assert_eq!(db.list_categories().await?.len(), 1);
        assert_eq!(db.list_actors().await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn catalog_edits_need_admin() -> error_stack::Result<(), KernelError> {
        let db = SqliteDatabase::in_memory().await?;
        let user = session(&db, "clerk", Role::User).await?;

        let as_user = db.create_movie(Some(&user), movie("Heat", 8.3)).await;
        assert_eq!(
            as_user.expect_err("user is not admin").current_context(),
            &KernelError::Authorization
        );
        let anonymous = db
            .create_category(
                None,
                CreateCategoryDto {
                    name: "Drama".to_string(),
                },
            )
            .await;
        assert_eq!(
            anonymous.expect_err("no session").current_context(),
            &KernelError::Authentication
        );
        Ok(())
    }

    #[tokio::test]
    async fn invalid_movie_leaves_catalog_untouched() -> error_stack::Result<(), KernelError> {
        let db = SqliteDatabase::in_memory().await?;
        let admin = session(&db, "boss", Role::Admin).await?;

        let blank = db.create_movie(Some(&admin), movie("   ", 5.0)).await;
        assert_eq!(
            blank.expect_err("title is blank").current_context(),
            &KernelError::Validation
        );
        let out_of_range = db.create_movie(Some(&admin), movie("Heat", 11.0)).await;
        assert_eq!(
            out_of_range.expect_err("rating above ten").current_context(),
            &KernelError::Validation
        );
        let unknown_category = db
            .create_movie(
                Some(&admin),
                CreateMovieDto {
                    category_ids: vec![404],
                    ..movie("Heat", 8.3)
                },
            )
            .await;
        assert_eq!(
            unknown_category
                .expect_err("category 404 does not exist")
                .current_context(),
            &KernelError::NotFound
        );

        let movies = db.list_movies(MovieQueryDto::default()).await?;
        assert!(movies.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn copies_are_added_to_existing_movies() -> error_stack::Result<(), KernelError> {
        let db = SqliteDatabase::in_memory().await?;
        let admin = session(&db, "boss", Role::Admin).await?;
        let id = db.create_movie(Some(&admin), movie("Heat", 8.3)).await?;

        let copies = db
            .add_copies(
                Some(&admin),
                AddCopiesDto {
                    movie_id: id,
                    count: 2,
                    store_location: None,
                },
            )
            .await?;
        assert_eq!(copies.len(), 2);
        assert_eq!(db.get_movie(id).await?.available_copies, 3);

        let zero = db
            .add_copies(
                Some(&admin),
                AddCopiesDto {
                    movie_id: id,
                    count: 0,
                    store_location: None,
                },
            )
            .await;
        assert_eq!(
            zero.expect_err("count below one").current_context(),
            &KernelError::Validation
        );
        let unknown = db
            .add_copies(
                Some(&admin),
                AddCopiesDto {
                    movie_id: id + 1,
                    count: 1,
                    store_location: None,
                },
            )
            .await;
        assert_eq!(
            unknown.expect_err("movie does not exist").current_context(),
            &KernelError::NotFound
        );
        Ok(())
    }
}

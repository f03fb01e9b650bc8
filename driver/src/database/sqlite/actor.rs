use sqlx::SqliteConnection;

use kernel::interface::query::{ActorQuery, DependOnActorQuery};
use kernel::interface::update::{ActorModifier, DependOnActorModifier};
use kernel::prelude::entity::{Actor, ActorId, FirstName, LastName, MovieId};
use kernel::KernelError;

use crate::database::sqlite::{SqliteDatabase, SqliteTransaction};
use crate::error::ConvertError;

pub struct SqliteActorRepository;

#[async_trait::async_trait]
impl ActorQuery for SqliteActorRepository {
    type Transaction = SqliteTransaction;

    async fn find_by_id(
        &self,
        con: &mut SqliteTransaction,
        id: &ActorId,
    ) -> error_stack::Result<Option<Actor>, KernelError> {
        SqliteActorInternal::find_by_id(con, id).await
    }

    async fn find_all(
        &self,
        con: &mut SqliteTransaction,
    ) -> error_stack::Result<Vec<Actor>, KernelError> {
        SqliteActorInternal::find_all(con).await
    }

    async fn find_by_movie_id(
        &self,
        con: &mut SqliteTransaction,
        movie_id: &MovieId,
    ) -> error_stack::Result<Vec<Actor>, KernelError> {
        SqliteActorInternal::find_by_movie_id(con, movie_id).await
    }
}

#[async_trait::async_trait]
impl ActorModifier for SqliteActorRepository {
    type Transaction = SqliteTransaction;

    async fn create(
        &self,
        con: &mut SqliteTransaction,
        first_name: &FirstName,
        last_name: &LastName,
    ) -> error_stack::Result<ActorId, KernelError> {
        SqliteActorInternal::create(con, first_name, last_name).await
    }
}

impl DependOnActorQuery for SqliteDatabase {
    type ActorQuery = SqliteActorRepository;
    fn actor_query(&self) -> &Self::ActorQuery {
        &SqliteActorRepository
    }
}

impl DependOnActorModifier for SqliteDatabase {
    type ActorModifier = SqliteActorRepository;
    fn actor_modifier(&self) -> &Self::ActorModifier {
        &SqliteActorRepository
    }
}

#[derive(sqlx::FromRow)]
struct ActorRow {
    actor_id: i64,
    first_name: String,
    last_name: String,
}

impl From<ActorRow> for Actor {
    fn from(value: ActorRow) -> Self {
        Actor::new(
            ActorId::new(value.actor_id),
            FirstName::new(value.first_name),
            LastName::new(value.last_name),
        )
    }
}

pub(in crate::database) struct SqliteActorInternal;

impl SqliteActorInternal {
    async fn find_by_id(
        con: &mut SqliteConnection,
        id: &ActorId,
    ) -> error_stack::Result<Option<Actor>, KernelError> {
        let row = sqlx::query_as::<_, ActorRow>(
            // language=sqlite
            r#"
            SELECT actor_id, first_name, last_name FROM actor WHERE actor_id = ?
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Actor::from))
    }

    async fn find_all(con: &mut SqliteConnection) -> error_stack::Result<Vec<Actor>, KernelError> {
        let rows = sqlx::query_as::<_, ActorRow>(
            // language=sqlite
            r#"
            SELECT actor_id, first_name, last_name FROM actor ORDER BY last_name, first_name
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Actor::from).collect())
    }

    async fn find_by_movie_id(
        con: &mut SqliteConnection,
        movie_id: &MovieId,
    ) -> error_stack::Result<Vec<Actor>, KernelError> {
        let rows = sqlx::query_as::<_, ActorRow>(
            // language=sqlite
            r#"
            SELECT a.actor_id, a.first_name, a.last_name
            FROM actor a
            JOIN movie_actor ma ON ma.actor_id = a.actor_id
            WHERE ma.movie_id = ?
            ORDER BY a.last_name, a.first_name
            "#,
        )
        .bind(movie_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Actor::from).collect())
    }

    async fn create(
        con: &mut SqliteConnection,
        first_name: &FirstName,
        last_name: &LastName,
    ) -> error_stack::Result<ActorId, KernelError> {
        let result = sqlx::query(
            // language=sqlite
            r#"
            INSERT INTO actor (first_name, last_name) VALUES (?, ?)
            "#,
        )
        .bind(first_name.as_ref())
        .bind(last_name.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(ActorId::new(result.last_insert_rowid()))
    }
}

use sqlx::SqliteConnection;

use kernel::interface::query::{CategoryQuery, DependOnCategoryQuery};
use kernel::interface::update::{CategoryModifier, DependOnCategoryModifier};
use kernel::prelude::entity::{Category, CategoryId, CategoryName, MovieId};
use kernel::KernelError;

use crate::database::sqlite::{SqliteDatabase, SqliteTransaction};
use crate::error::ConvertError;

pub struct SqliteCategoryRepository;

#[async_trait::async_trait]
impl CategoryQuery for SqliteCategoryRepository {
    type Transaction = SqliteTransaction;

    async fn find_by_id(
        &self,
        con: &mut SqliteTransaction,
        id: &CategoryId,
    ) -> error_stack::Result<Option<Category>, KernelError> {
        SqliteCategoryInternal::find_by_id(con, id).await
    }

    async fn find_all(
        &self,
        con: &mut SqliteTransaction,
    ) -> error_stack::Result<Vec<Category>, KernelError> {
        SqliteCategoryInternal::find_all(con).await
    }

    async fn find_by_movie_id(
        &self,
        con: &mut SqliteTransaction,
        movie_id: &MovieId,
    ) -> error_stack::Result<Vec<Category>, KernelError> {
        SqliteCategoryInternal::find_by_movie_id(con, movie_id).await
    }
}

#[async_trait::async_trait]
impl CategoryModifier for SqliteCategoryRepository {
    type Transaction = SqliteTransaction;

    async fn create(
        &self,
        con: &mut SqliteTransaction,
        name: &CategoryName,
    ) -> error_stack::Result<CategoryId, KernelError> {
        SqliteCategoryInternal::create(con, name).await
    }
}

impl DependOnCategoryQuery for SqliteDatabase {
    type CategoryQuery = SqliteCategoryRepository;
    fn category_query(&self) -> &Self::CategoryQuery {
        &SqliteCategoryRepository
    }
}

impl DependOnCategoryModifier for SqliteDatabase {
    type CategoryModifier = SqliteCategoryRepository;
    fn category_modifier(&self) -> &Self::CategoryModifier {
        &SqliteCategoryRepository
    }
}

#[derive(sqlx::FromRow)]
struct CategoryRow {
    category_id: i64,
    category_name: String,
}

impl From<CategoryRow> for Category {
    fn from(value: CategoryRow) -> Self {
        Category::new(
            CategoryId::new(value.category_id),
            CategoryName::new(value.category_name),
        )
    }
}

pub(in crate::database) struct SqliteCategoryInternal;

impl SqliteCategoryInternal {
    async fn find_by_id(
        con: &mut SqliteConnection,
        id: &CategoryId,
    ) -> error_stack::Result<Option<Category>, KernelError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            // language=sqlite
            r#"
            SELECT category_id, category_name FROM category WHERE category_id = ?
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Category::from))
    }

    async fn find_all(con: &mut SqliteConnection) -> error_stack::Result<Vec<Category>, KernelError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            // language=sqlite
            r#"
            SELECT category_id, category_name FROM category ORDER BY category_name
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn find_by_movie_id(
        con: &mut SqliteConnection,
        movie_id: &MovieId,
    ) -> error_stack::Result<Vec<Category>, KernelError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            // language=sqlite
            r#"
            SELECT c.category_id, c.category_name
            FROM category c
            JOIN movie_category mc ON mc.category_id = c.category_id
            WHERE mc.movie_id = ?
            ORDER BY c.category_name
            "#,
        )
        .bind(movie_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn create(
        con: &mut SqliteConnection,
        name: &CategoryName,
    ) -> error_stack::Result<CategoryId, KernelError> {
        let result = sqlx::query(
            // language=sqlite
            r#"
            INSERT INTO category (category_name) VALUES (?)
            "#,
        )
        .bind(name.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(CategoryId::new(result.last_insert_rowid()))
    }
}

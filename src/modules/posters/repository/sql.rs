use async_trait::async_trait;
use posterboard_db::DbPool;
use sqlx::{QueryBuilder, Sqlite};

use super::{PosterRepository, RepositoryError};
use crate::modules::posters::models::{NewPoster, Poster, PosterId, PosterParams};
use crate::modules::posters::query::{PosterFilter, PosterQuery};

/// Column list for posters queries.
const POSTER_COLUMNS: &str =
    "id, name, description, price, year, vintage, img_url, created_at, updated_at";

/// Current UTC time as fixed-width RFC 3339 text, so text order is time order.
const NOW: &str = "strftime('%Y-%m-%dT%H:%M:%fZ', 'now')";

/// Posters stored in the `posters` table.
#[derive(Clone)]
pub struct SqlPosterRepository {
    pool: DbPool,
}

impl SqlPosterRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PosterRepository for SqlPosterRepository {
    async fn list(&self, query: &PosterQuery) -> Result<Vec<Poster>, RepositoryError> {
        let mut builder =
            QueryBuilder::<Sqlite>::new(format!("SELECT {POSTER_COLUMNS} FROM posters"));

        // SQLite's LOWER only folds ASCII, so name matching happens after the fetch.
        let price_filters = query
            .filters
            .iter()
            .filter(|filter| !matches!(filter, PosterFilter::NameContains(_)));
        for (index, filter) in price_filters.enumerate() {
            builder.push(if index == 0 { " WHERE " } else { " AND " });
            match filter {
                PosterFilter::MinPrice(bound) => {
                    builder.push("price >= ").push_bind(*bound);
                }
                PosterFilter::MaxPrice(bound) => {
                    builder.push("price <= ").push_bind(*bound);
                }
                PosterFilter::NameContains(_) => {}
            }
        }

        let direction = query.sort.as_sql();
        builder.push(format!(" ORDER BY created_at {direction}, id {direction}"));

        let mut posters = builder
            .build_query_as::<Poster>()
            .fetch_all(&self.pool)
            .await?;
        posters.retain(|poster| query.matches(poster));
        Ok(posters)
    }

    async fn get(&self, id: PosterId) -> Result<Poster, RepositoryError> {
        let query = format!("SELECT {POSTER_COLUMNS} FROM posters WHERE id = ?");
        sqlx::query_as::<_, Poster>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepositoryError::NotFound { id })
    }

    async fn create(&self, poster: NewPoster) -> Result<Poster, RepositoryError> {
        let query = format!(
            "INSERT INTO posters
                (name, description, price, year, vintage, img_url, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, {NOW}, {NOW})
             RETURNING {POSTER_COLUMNS}"
        );
        let created = sqlx::query_as::<_, Poster>(&query)
            .bind(&poster.name)
            .bind(&poster.description)
            .bind(poster.price)
            .bind(poster.year)
            .bind(poster.vintage)
            .bind(&poster.img_url)
            .fetch_one(&self.pool)
            .await?;
        Ok(created)
    }

    async fn update(
        &self,
        id: PosterId,
        changes: &PosterParams,
    ) -> Result<Poster, RepositoryError> {
        let query = format!(
            "UPDATE posters SET
                name = COALESCE(?, name),
                description = COALESCE(?, description),
                price = COALESCE(?, price),
                year = COALESCE(?, year),
                vintage = COALESCE(?, vintage),
                img_url = COALESCE(?, img_url),
                updated_at = {NOW}
             WHERE id = ?
             RETURNING {POSTER_COLUMNS}"
        );
        sqlx::query_as::<_, Poster>(&query)
            .bind(&changes.name)
            .bind(&changes.description)
            .bind(changes.price)
            .bind(changes.year)
            .bind(changes.vintage)
            .bind(&changes.img_url)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepositoryError::NotFound { id })
    }

    async fn delete(&self, id: PosterId) -> Result<Poster, RepositoryError> {
        let query = format!("DELETE FROM posters WHERE id = ? RETURNING {POSTER_COLUMNS}");
        sqlx::query_as::<_, Poster>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepositoryError::NotFound { id })
    }
}

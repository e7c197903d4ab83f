//! Storage gateway for posters.

mod memory;
mod sql;

use async_trait::async_trait;
use posterboard_http::error::AppError;

use super::models::{NewPoster, Poster, PosterId, PosterParams};
use super::query::PosterQuery;

pub use memory::InMemoryPosterRepository;
pub use sql::SqlPosterRepository;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Poster with id {id} not found")]
    NotFound { id: PosterId },

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { .. } => AppError::not_found(err.to_string()),
            RepositoryError::Database(e) => AppError::Internal(e.into()),
        }
    }
}

/// CRUD and filtered listing over the poster collection.
#[async_trait]
pub trait PosterRepository: Send + Sync {
    /// Posters matching every filter in `query`, in its sort order.
    async fn list(&self, query: &PosterQuery) -> Result<Vec<Poster>, RepositoryError>;

    async fn get(&self, id: PosterId) -> Result<Poster, RepositoryError>;

    /// Insert a poster; the store assigns `id`, `created_at` and `updated_at`.
    async fn create(&self, poster: NewPoster) -> Result<Poster, RepositoryError>;

    /// Apply the supplied fields and refresh `updated_at`.
    async fn update(&self, id: PosterId, changes: &PosterParams)
        -> Result<Poster, RepositoryError>;

    /// Hard-delete a poster, returning its last state.
    async fn delete(&self, id: PosterId) -> Result<Poster, RepositoryError>;
}

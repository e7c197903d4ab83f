use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::Mutex;

use super::{PosterRepository, RepositoryError};
use crate::modules::posters::models::{NewPoster, Poster, PosterId, PosterParams};
use crate::modules::posters::query::{PosterQuery, SortDirection};

/// Process-local poster store with the same semantics as the SQL table.
#[derive(Default)]
pub struct InMemoryPosterRepository {
    state: Mutex<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    last_id: PosterId,
    posters: Vec<Poster>,
}

impl InMemoryPosterRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PosterRepository for InMemoryPosterRepository {
    async fn list(&self, query: &PosterQuery) -> Result<Vec<Poster>, RepositoryError> {
        let state = self.state.lock().await;

        let mut posters: Vec<Poster> = state
            .posters
            .iter()
            .filter(|poster| query.matches(poster))
            .cloned()
            .collect();

        posters.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        if query.sort == SortDirection::Desc {
            posters.reverse();
        }

        Ok(posters)
    }

    async fn get(&self, id: PosterId) -> Result<Poster, RepositoryError> {
        let state = self.state.lock().await;
        state
            .posters
            .iter()
            .find(|poster| poster.id == id)
            .cloned()
            .ok_or(RepositoryError::NotFound { id })
    }

    async fn create(&self, poster: NewPoster) -> Result<Poster, RepositoryError> {
        let mut state = self.state.lock().await;
        state.last_id += 1;

        let now = OffsetDateTime::now_utc();
        let created = Poster {
            id: state.last_id,
            name: poster.name,
            description: poster.description,
            price: poster.price,
            year: poster.year,
            vintage: poster.vintage,
            img_url: poster.img_url,
            created_at: now,
            updated_at: now,
        };
        state.posters.push(created.clone());

        Ok(created)
    }

    async fn update(
        &self,
        id: PosterId,
        changes: &PosterParams,
    ) -> Result<Poster, RepositoryError> {
        let mut state = self.state.lock().await;
        let poster = state
            .posters
            .iter_mut()
            .find(|poster| poster.id == id)
            .ok_or(RepositoryError::NotFound { id })?;

        changes.apply_to(poster);
        poster.updated_at = OffsetDateTime::now_utc();

        Ok(poster.clone())
    }

    async fn delete(&self, id: PosterId) -> Result<Poster, RepositoryError> {
        let mut state = self.state.lock().await;
        let index = state
            .posters
            .iter()
            .position(|poster| poster.id == id)
            .ok_or(RepositoryError::NotFound { id })?;

        Ok(state.posters.remove(index))
    }
}

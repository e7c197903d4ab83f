//! HTTP handlers for `/api/v1/posters`.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use posterboard_http::{
    error::AppError,
    response::{CollectionResponse, DataResponse},
};
use posterboard_kernel::settings::FilterComposition;

use super::models::{PosterId, PosterParams, PosterPayload};
use super::query::{ListParams, PosterQuery};
use super::repository::PosterRepository;
use super::serializer::{format_poster, format_posters, PosterResource};

/// Shared handler state.
#[derive(Clone)]
pub struct PostersState {
    pub repo: Arc<dyn PosterRepository>,
    pub filter_composition: FilterComposition,
}

type PosterResponse = Json<DataResponse<PosterResource>>;

pub fn router(state: PostersState) -> Router {
    Router::new()
        .route("/", get(list_posters).post(create_poster))
        .route("/health", get(health_check))
        .route(
            "/{id}",
            get(show_poster)
                .patch(update_poster)
                .put(update_poster)
                .delete(delete_poster),
        )
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "posters module is healthy"
}

async fn list_posters(
    State(state): State<PostersState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<CollectionResponse<PosterResource>>, AppError> {
    let params = ListParams::from_pairs(pairs);
    let query = PosterQuery::compose(&params, state.filter_composition);
    let posters = state.repo.list(&query).await?;

    tracing::debug!(
        sort = ?query.sort,
        filters = query.filters.len(),
        count = posters.len(),
        "listed posters"
    );
    Ok(Json(format_posters(posters)))
}

async fn show_poster(
    State(state): State<PostersState>,
    Path(id): Path<String>,
) -> Result<PosterResponse, AppError> {
    let poster = state.repo.get(parse_id(&id)?).await?;
    Ok(Json(format_poster(poster)))
}

async fn create_poster(
    State(state): State<PostersState>,
    payload: Result<Json<PosterPayload>, JsonRejection>,
) -> Result<(StatusCode, PosterResponse), AppError> {
    let params = required_params(payload)?;
    let poster = state.repo.create(params.into()).await?;

    tracing::info!(poster_id = poster.id, "poster created");
    Ok((StatusCode::CREATED, Json(format_poster(poster))))
}

async fn update_poster(
    State(state): State<PostersState>,
    Path(id): Path<String>,
    payload: Result<Json<PosterPayload>, JsonRejection>,
) -> Result<PosterResponse, AppError> {
    let id = parse_id(&id)?;
    let params = required_params(payload)?;
    let poster = state.repo.update(id, &params).await?;

    tracing::info!(poster_id = poster.id, "poster updated");
    Ok(Json(format_poster(poster)))
}

async fn delete_poster(
    State(state): State<PostersState>,
    Path(id): Path<String>,
) -> Result<PosterResponse, AppError> {
    let poster = state.repo.delete(parse_id(&id)?).await?;

    tracing::info!(poster_id = poster.id, "poster deleted");
    Ok(Json(format_poster(poster)))
}

/// Ids that are not integers can never name a poster.
fn parse_id(raw: &str) -> Result<PosterId, AppError> {
    raw.parse()
        .map_err(|_| AppError::not_found(format!("Poster with id {raw} not found")))
}

/// The `poster` key must be present and carry at least one permitted field.
fn required_params(
    payload: Result<Json<PosterPayload>, JsonRejection>,
) -> Result<PosterParams, AppError> {
    let Json(payload) = payload?;
    match payload.poster {
        Some(params) if !params.is_empty() => Ok(params),
        _ => Err(AppError::missing_param("poster")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::posters::models::NewPoster;
    use crate::modules::posters::repository::InMemoryPosterRepository;
    use axum::{body::Body, http::Request, response::Response};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn seeded_state(composition: FilterComposition) -> PostersState {
        let repo = InMemoryPosterRepository::new();
        for (name, price) in [("FAILURE", 68.0), ("MEDIOCRITY", 127.0), ("REGRET", 89.0)] {
            repo.create(NewPoster {
                name: name.to_string(),
                price,
                ..NewPoster::default()
            })
            .await
            .unwrap();
        }
        PostersState {
            repo: Arc::new(repo),
            filter_composition: composition,
        }
    }

    async fn send(state: PostersState, request: Request<Body>) -> Response {
        router(state).oneshot(request).await.unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn names(json: &serde_json::Value) -> Vec<String> {
        json["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["attributes"]["name"].as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn priority_composition_applies_only_name_filter() {
        let state = seeded_state(FilterComposition::Priority).await;
        let response = send(state, get("/?name=re&min_price=100")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(names(&json), vec!["FAILURE", "REGRET"]);
        assert_eq!(json["meta"]["count"], 2);
    }

    #[tokio::test]
    async fn all_composition_intersects_filters() {
        let state = seeded_state(FilterComposition::All).await;
        let json = body_json(send(state, get("/?name=re&min_price=80")).await).await;

        assert_eq!(names(&json), vec!["REGRET"]);
    }

    #[tokio::test]
    async fn repeated_filter_key_uses_last_value() {
        let state = seeded_state(FilterComposition::All).await;
        let response = send(state, get("/?name=zz&name=re")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(names(&json), vec!["FAILURE", "REGRET"]);
    }

    #[tokio::test]
    async fn non_numeric_id_is_not_found() {
        let state = seeded_state(FilterComposition::All).await;
        let response = send(state, get("/abc")).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "not_found");
    }

    #[tokio::test]
    async fn empty_poster_object_is_rejected() {
        let state = seeded_state(FilterComposition::All).await;
        let response = send(state, json_request("PATCH", "/1", r#"{"poster": {}}"#)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_json_is_a_bad_request() {
        let state = seeded_state(FilterComposition::All).await;
        let response = send(state, json_request("POST", "/", r#"{"poster": "#)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn health_route_is_not_an_id() {
        let state = seeded_state(FilterComposition::All).await;
        let response = send(state, get("/health")).await;

        assert_eq!(response.status(), StatusCode::OK);
    }
}

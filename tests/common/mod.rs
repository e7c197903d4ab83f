use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use posterboard_kernel::settings::{FilterComposition, Settings};
use serde_json::{json, Value};
use tower::ServiceExt;

/// Build the full application router over a fresh, migrated in-memory database.
pub async fn build_test_app(composition: FilterComposition) -> Router {
    let mut settings = Settings::default();
    settings.database.url = "sqlite::memory:".to_string();
    settings.posters.filter_composition = composition;

    let pool = posterboard_db::create_pool(&settings.database)
        .await
        .expect("in-memory pool");
    let registry = posterboard_app::app::registry(&settings, &pool);
    posterboard_app::app::migrate_pool(&registry, &pool)
        .await
        .expect("migrations");

    posterboard_http::build_router(&registry, &settings.server)
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None).await
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn failure() -> Value {
    json!({
        "name": "FAILURE",
        "description": "Why bother trying? It's probably not worth it.",
        "price": 68.0,
        "year": 2019,
        "vintage": true,
        "img_url": "./assets/failure.jpg"
    })
}

pub fn mediocrity() -> Value {
    json!({
        "name": "MEDIOCRITY",
        "description": "Dreams are just that—dreams.",
        "price": 127.0,
        "year": 2021,
        "vintage": false,
        "img_url": "./assets/mediocrity.jpg"
    })
}

pub fn regret() -> Value {
    json!({
        "name": "REGRET",
        "description": "Hard work rarely pays off.",
        "price": 89.0,
        "year": 2018,
        "vintage": true,
        "img_url": "./assets/regret.jpg"
    })
}

/// Create a poster through the API and return its id.
pub async fn create(app: &Router, attributes: Value) -> String {
    let response = send(
        app,
        Method::POST,
        "/api/v1/posters",
        Some(json!({ "poster": attributes })),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);

    body_json(response).await["data"]["id"]
        .as_str()
        .expect("string id")
        .to_string()
}

pub async fn seed_three(app: &Router) -> Vec<String> {
    let mut ids = Vec::new();
    for attributes in [failure(), mediocrity(), regret()] {
        ids.push(create(app, attributes).await);
    }
    ids
}

pub fn names(json: &Value) -> Vec<String> {
    json["data"]
        .as_array()
        .expect("data array")
        .iter()
        .map(|poster| poster["attributes"]["name"].as_str().unwrap().to_string())
        .collect()
}

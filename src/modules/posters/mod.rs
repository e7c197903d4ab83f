pub mod models;
pub mod query;
pub mod repository;
pub mod routes;
pub mod serializer;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use posterboard_kernel::settings::PosterSettings;
use posterboard_kernel::{InitCtx, Migration, Module};
use serde_json::json;

use repository::PosterRepository;
use routes::PostersState;

/// Poster catalog: CRUD plus filtered, sorted listing.
pub struct PostersModule {
    state: PostersState,
}

impl PostersModule {
    pub fn new(repo: Arc<dyn PosterRepository>, settings: &PosterSettings) -> Self {
        Self {
            state: PostersState {
                repo,
                filter_composition: settings.filter_composition,
            },
        }
    }
}

#[async_trait]
impl Module for PostersModule {
    fn name(&self) -> &'static str {
        "posters"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            filter_composition = ?self.state.filter_composition,
            "posters module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.state.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(openapi_fragment())
    }

    fn migrations(&self) -> Vec<Migration> {
        migrations()
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "posters module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "posters module stopped");
        Ok(())
    }
}

/// Schema for the `posters` table.
pub fn migrations() -> Vec<Migration> {
    vec![Migration {
        id: "001_create_posters",
        up: r#"
            CREATE TABLE posters (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                name        TEXT    NOT NULL DEFAULT '',
                description TEXT    NOT NULL DEFAULT '',
                price       REAL    NOT NULL DEFAULT 0,
                year        INTEGER NOT NULL DEFAULT 0,
                vintage     BOOLEAN NOT NULL DEFAULT 0,
                img_url     TEXT    NOT NULL DEFAULT '',
                created_at  TEXT    NOT NULL,
                updated_at  TEXT    NOT NULL
            );
            CREATE INDEX posters_created_at_idx ON posters (created_at, id);
            "#,
    }]
}

/// Create a new instance of the posters module
pub fn create_module(
    repo: Arc<dyn PosterRepository>,
    settings: &PosterSettings,
) -> Arc<dyn Module> {
    Arc::new(PostersModule::new(repo, settings))
}

fn error_response(description: &str) -> serde_json::Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/ErrorResponse" }
            }
        }
    })
}

fn poster_response(description: &str) -> serde_json::Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/PosterEnvelope" }
            }
        }
    })
}

fn openapi_fragment() -> serde_json::Value {
    let id_param = json!({
        "name": "id",
        "in": "path",
        "required": true,
        "schema": { "type": "string" }
    });
    let poster_body = json!({
        "required": true,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/PosterPayload" }
            }
        }
    });
    let query_param = |name: &str, description: &str| {
        json!({
            "name": name,
            "in": "query",
            "required": false,
            "description": description,
            "schema": { "type": "string" }
        })
    };

    json!({
        "paths": {
            "/": {
                "get": {
                    "summary": "List posters",
                    "tags": ["Posters"],
                    "parameters": [
                        query_param("sort", "asc (default) or desc by creation time"),
                        query_param("name", "Case-insensitive name substring"),
                        query_param("min_price", "Inclusive lower price bound"),
                        query_param("max_price", "Inclusive upper price bound")
                    ],
                    "responses": {
                        "200": {
                            "description": "Matching posters",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/PosterCollection" }
                                }
                            }
                        }
                    }
                },
                "post": {
                    "summary": "Create a poster",
                    "tags": ["Posters"],
                    "requestBody": poster_body.clone(),
                    "responses": {
                        "201": poster_response("Created poster"),
                        "400": error_response("Missing poster parameters")
                    }
                }
            },
            "/health": {
                "get": {
                    "summary": "Posters health check",
                    "tags": ["Posters"],
                    "responses": {
                        "200": {
                            "description": "OK",
                            "content": { "text/plain": { "schema": { "type": "string" } } }
                        }
                    }
                }
            },
            "/{id}": {
                "get": {
                    "summary": "Show a poster",
                    "tags": ["Posters"],
                    "parameters": [id_param.clone()],
                    "responses": {
                        "200": poster_response("Poster"),
                        "404": error_response("Poster not found")
                    }
                },
                "patch": {
                    "summary": "Update a poster",
                    "tags": ["Posters"],
                    "parameters": [id_param.clone()],
                    "requestBody": poster_body.clone(),
                    "responses": {
                        "200": poster_response("Updated poster"),
                        "400": error_response("Missing poster parameters"),
                        "404": error_response("Poster not found")
                    }
                },
                "put": {
                    "summary": "Update a poster",
                    "tags": ["Posters"],
                    "parameters": [id_param.clone()],
                    "requestBody": poster_body,
                    "responses": {
                        "200": poster_response("Updated poster"),
                        "400": error_response("Missing poster parameters"),
                        "404": error_response("Poster not found")
                    }
                },
                "delete": {
                    "summary": "Delete a poster",
                    "tags": ["Posters"],
                    "parameters": [id_param],
                    "responses": {
                        "200": poster_response("Deleted poster"),
                        "404": error_response("Poster not found")
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "PosterAttributes": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "description": { "type": "string" },
                        "price": { "type": "number", "format": "double" },
                        "year": { "type": "integer", "format": "int32" },
                        "vintage": { "type": "boolean" },
                        "img_url": { "type": "string" }
                    }
                },
                "PosterResource": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "string" },
                        "type": { "type": "string", "enum": ["poster"] },
                        "attributes": { "$ref": "#/components/schemas/PosterAttributes" }
                    },
                    "required": ["id", "type", "attributes"]
                },
                "PosterEnvelope": {
                    "type": "object",
                    "properties": {
                        "data": { "$ref": "#/components/schemas/PosterResource" }
                    },
                    "required": ["data"]
                },
                "PosterCollection": {
                    "type": "object",
                    "properties": {
                        "data": {
                            "type": "array",
                            "items": { "$ref": "#/components/schemas/PosterResource" }
                        },
                        "meta": {
                            "type": "object",
                            "properties": { "count": { "type": "integer" } },
                            "required": ["count"]
                        }
                    },
                    "required": ["data", "meta"]
                },
                "PosterPayload": {
                    "type": "object",
                    "properties": {
                        "poster": { "$ref": "#/components/schemas/PosterAttributes" }
                    },
                    "required": ["poster"]
                }
            }
        }
    })
}

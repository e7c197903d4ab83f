//! Poster resource representation: `{ id, type, attributes }`.

use posterboard_http::response::{CollectionResponse, DataResponse};
use serde::Serialize;

use super::models::Poster;

/// Value of the `type` member on every poster resource.
pub const RESOURCE_TYPE: &str = "poster";

/// A poster as clients see it. The id is always a string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PosterResource {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub attributes: PosterAttributes,
}

/// Domain fields only; identity and timestamps stay out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PosterAttributes {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub year: i32,
    pub vintage: bool,
    pub img_url: String,
}

impl From<Poster> for PosterResource {
    fn from(poster: Poster) -> Self {
        Self {
            id: poster.id.to_string(),
            kind: RESOURCE_TYPE,
            attributes: PosterAttributes {
                name: poster.name,
                description: poster.description,
                price: poster.price,
                year: poster.year,
                vintage: poster.vintage,
                img_url: poster.img_url,
            },
        }
    }
}

/// `{ "data": resource }` for show, create, update and delete.
pub fn format_poster(poster: Poster) -> DataResponse<PosterResource> {
    DataResponse::new(poster.into())
}

/// `{ "data": [...], "meta": { "count": n } }` for the index.
pub fn format_posters(posters: Vec<Poster>) -> CollectionResponse<PosterResource> {
    CollectionResponse::new(posters.into_iter().map(PosterResource::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::OffsetDateTime;

    fn failure(id: i64) -> Poster {
        let now = OffsetDateTime::now_utc();
        Poster {
            id,
            name: "FAILURE".to_string(),
            description: "Why bother trying? It's probably not worth it.".to_string(),
            price: 68.0,
            year: 2019,
            vintage: true,
            img_url: "./assets/failure.jpg".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn single_poster_envelope() {
        let value = serde_json::to_value(format_poster(failure(42))).unwrap();

        assert_eq!(
            value,
            json!({
                "data": {
                    "id": "42",
                    "type": "poster",
                    "attributes": {
                        "name": "FAILURE",
                        "description": "Why bother trying? It's probably not worth it.",
                        "price": 68.0,
                        "year": 2019,
                        "vintage": true,
                        "img_url": "./assets/failure.jpg"
                    }
                }
            })
        );
    }

    #[test]
    fn attributes_exclude_identity_and_timestamps() {
        let value = serde_json::to_value(format_poster(failure(1))).unwrap();
        let attributes = value["data"]["attributes"].as_object().unwrap();

        assert!(!attributes.contains_key("id"));
        assert!(!attributes.contains_key("created_at"));
        assert!(!attributes.contains_key("updated_at"));
    }

    #[test]
    fn collection_envelope_counts_its_data() {
        let value = serde_json::to_value(format_posters(vec![failure(1), failure(2)])).unwrap();

        assert_eq!(value["meta"]["count"], 2);
        assert_eq!(value["data"].as_array().unwrap().len(), 2);
        assert_eq!(value["data"][1]["id"], "2");
        assert_eq!(value["data"][1]["type"], "poster");
    }
}

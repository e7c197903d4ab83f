//! Merged OpenAPI document built from module fragments.

use posterboard_kernel::ModuleRegistry;
use serde_json::{json, Value};

use crate::router::module_prefix;

/// Build the OpenAPI 3 document for every registered module.
///
/// Module paths are prefixed with the module mount point and module schemas
/// are merged into `components.schemas` next to the shared `ErrorResponse`.
pub fn document(registry: &ModuleRegistry) -> Value {
    let mut spec = json!({
        "openapi": "3.1.0",
        "info": {
            "title": "Posterboard API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Poster catalog REST API"
        },
        "paths": {},
        "components": {
            "schemas": {}
        }
    });

    spec["components"]["schemas"]["ErrorResponse"] = json!({
        "type": "object",
        "properties": {
            "error": {
                "type": "object",
                "properties": {
                    "code": { "type": "string" },
                    "message": { "type": "string" },
                    "details": { "type": "array", "items": {} },
                    "trace_id": { "type": "string" },
                    "timestamp": { "type": "string" }
                },
                "required": ["code", "message", "trace_id", "timestamp"]
            }
        },
        "required": ["error"]
    });

    spec["paths"]["/healthz"] = json!({
        "get": {
            "summary": "Health check",
            "responses": {
                "200": {
                    "description": "OK",
                    "content": { "text/plain": { "schema": { "type": "string" } } }
                }
            }
        }
    });

    for module in registry.modules() {
        let Some(fragment) = module.openapi() else {
            continue;
        };

        if let Some(paths) = fragment.get("paths").and_then(Value::as_object) {
            let prefix = module_prefix(module.name());
            for (path, item) in paths {
                // "/" maps onto the mount point itself
                let full = if path == "/" {
                    prefix.clone()
                } else {
                    format!("{prefix}{path}")
                };
                spec["paths"][full] = item.clone();
            }
        }

        if let Some(schemas) = fragment
            .get("components")
            .and_then(|c| c.get("schemas"))
            .and_then(Value::as_object)
        {
            for (name, schema) in schemas {
                spec["components"]["schemas"][name] = schema.clone();
            }
        }
    }

    spec
}

#[cfg(test)]
mod tests {
    use super::*;
    use posterboard_kernel::Module;
    use std::sync::Arc;

    struct Catalog;

    #[async_trait::async_trait]
    impl Module for Catalog {
        fn name(&self) -> &'static str {
            "catalog"
        }

        fn openapi(&self) -> Option<Value> {
            Some(json!({
                "paths": {
                    "/": { "get": { "summary": "List" } },
                    "/{id}": { "get": { "summary": "Show" } }
                },
                "components": { "schemas": { "Item": { "type": "object" } } }
            }))
        }
    }

    #[test]
    fn module_fragments_are_prefixed_and_merged() {
        let mut registry = ModuleRegistry::new();
        registry.register(Arc::new(Catalog));

        let doc = document(&registry);

        assert_eq!(doc["paths"]["/api/v1/catalog"]["get"]["summary"], "List");
        assert_eq!(doc["paths"]["/api/v1/catalog/{id}"]["get"]["summary"], "Show");
        assert!(doc["paths"]["/healthz"].is_object());
        assert!(doc["components"]["schemas"]["Item"].is_object());
        assert!(doc["components"]["schemas"]["ErrorResponse"].is_object());
    }
}

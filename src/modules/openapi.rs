//! OpenAPI fragment shared by the CRUD resource modules.

use serde_json::{json, Value};

fn json_content(schema: Value) -> Value {
    json!({"application/json": {"schema": schema}})
}

fn schema_ref(name: &str) -> Value {
    json!({"$ref": format!("#/components/schemas/{name}")})
}

fn message_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": json_content(schema_ref("MessageBody"))
    })
}

/// Paths for list/create on `/` and get/update/delete on `/{id}`, plus the
/// given component schemas. `schema` names the stored record; its create and
/// update bodies are `{schema}Input` and `{schema}Update`.
pub fn resource_fragment(tag: &str, schema: &str, schemas: Value) -> Value {
    let record = schema_ref(schema);
    let input = schema_ref(&format!("{schema}Input"));
    let update = schema_ref(&format!("{schema}Update"));
    let id_parameter = json!({
        "name": "id",
        "in": "path",
        "required": true,
        "schema": {"type": "string"}
    });

    json!({
        "paths": {
            "/": {
                "get": {
                    "summary": format!("List {}", tag.to_lowercase()),
                    "tags": [tag],
                    "responses": {
                        "200": {
                            "description": "All records",
                            "content": json_content(json!({"type": "array", "items": record.clone()}))
                        }
                    }
                },
                "post": {
                    "summary": format!("Create {}", schema.to_lowercase()),
                    "tags": [tag],
                    "requestBody": {"required": true, "content": json_content(input)},
                    "responses": {
                        "201": {"description": "Created", "content": json_content(record.clone())},
                        "400": message_response("Validation error")
                    }
                }
            },
            "/{id}": {
                "parameters": [id_parameter],
                "get": {
                    "summary": format!("Get {}", schema.to_lowercase()),
                    "tags": [tag],
                    "responses": {
                        "200": {"description": "The record", "content": json_content(record.clone())},
                        "404": message_response("Not found")
                    }
                },
                "put": {
                    "summary": format!("Update {}", schema.to_lowercase()),
                    "tags": [tag],
                    "requestBody": {"required": true, "content": json_content(update)},
                    "responses": {
                        "200": {
                            "description": "The updated record, or null when the id is unknown",
                            "content": json_content(record)
                        },
                        "400": message_response("Validation error")
                    }
                },
                "delete": {
                    "summary": format!("Delete {}", schema.to_lowercase()),
                    "tags": [tag],
                    "responses": {
                        "200": message_response("Deleted"),
                        "404": message_response("Not found")
                    }
                }
            }
        },
        "components": {"schemas": schemas}
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_references_named_schemas() {
        let fragment = resource_fragment("Books", "Book", json!({"Book": {"type": "object"}}));

        assert_eq!(
            fragment["paths"]["/"]["post"]["requestBody"]["content"]["application/json"]["schema"]
                ["$ref"],
            "#/components/schemas/BookInput"
        );
        assert_eq!(
            fragment["paths"]["/{id}"]["delete"]["responses"]["404"]["content"]
                ["application/json"]["schema"]["$ref"],
            "#/components/schemas/MessageBody"
        );
        assert!(fragment["components"]["schemas"]["Book"].is_object());
    }
}

// Helper functions for building JSON-Schema-shaped tool input schemas

use serde_json::{json, Value};

pub fn json_schema_object(properties: Value, required: Vec<&str>) -> Value {
    json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

/// Object schema with no `required` list. `closed` adds `additionalProperties: false`.
pub fn json_schema_empty_object(properties: Value, closed: bool) -> Value {
    let mut schema = json!({
        "type": "object",
        "properties": properties
    });
    if closed {
        schema["additionalProperties"] = Value::Bool(false);
    }
    schema
}

pub fn json_schema_string(description: &str) -> Value {
    json!({
        "type": "string",
        "description": description
    })
}

pub fn json_schema_number(description: &str) -> Value {
    json!({
        "type": "number",
        "description": description
    })
}

pub fn json_schema_boolean(description: &str) -> Value {
    json!({
        "type": "boolean",
        "description": description
    })
}

pub fn json_schema_array(items: Value, description: &str) -> Value {
    json!({
        "type": "array",
        "items": items,
        "description": description
    })
}

pub fn json_schema_string_enum(variants: &[&str], description: &str) -> Value {
    json!({
        "type": "string",
        "enum": variants,
        "description": description
    })
}

/// Bare `{"type": <kind>}` with no description, used for nested items
pub fn json_schema_type(kind: &str) -> Value {
    json!({ "type": kind })
}

pub fn with_default(mut schema: Value, default: impl Into<Value>) -> Value {
    schema["default"] = default.into();
    schema
}

pub fn with_min_length(mut schema: Value, min_length: u64) -> Value {
    schema["minLength"] = Value::from(min_length);
    schema
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_schema_lists_required() {
        let schema = json_schema_object(
            json!({ "path": json_schema_string("Where to look") }),
            vec!["path"],
        );

        assert_eq!(schema["type"], "object");
        assert_eq!(schema["required"], json!(["path"]));
        assert_eq!(schema["properties"]["path"]["type"], "string");
    }

    #[test]
    fn test_empty_object_has_no_required_key() {
        let open = json_schema_empty_object(json!({}), false);
        assert!(open.get("required").is_none());
        assert!(open.get("additionalProperties").is_none());

        let closed = json_schema_empty_object(json!({}), true);
        assert_eq!(closed["additionalProperties"], false);
    }

    #[test]
    fn test_decorators() {
        let page = with_default(json_schema_number("Page number"), 1);
        assert_eq!(page["default"], 1);

        let query = with_min_length(json_schema_string("The search query to use"), 2);
        assert_eq!(query["minLength"], 2);

        let mode = json_schema_string_enum(&["code", "markdown"], "The type of the cell");
        assert_eq!(mode["enum"], json!(["code", "markdown"]));
    }
}

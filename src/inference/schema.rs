//! Structural JSON schema inference
//!
//! Derives a JSON schema from one sample payload body. Inference is
//! best-effort and per-record: callers log a failure, record the schema as
//! absent, and keep the run going.

use serde_json::{json, Map, Value};
use thiserror::Error;

/// Maximum nesting depth a payload may have before inference gives up
pub const MAX_DEPTH: usize = 64;

/// Schema inference failures
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The payload nests deeper than [`MAX_DEPTH`]
    #[error("Payload nesting exceeds {limit} levels")]
    DepthExceeded {
        /// The configured depth limit
        limit: usize,
    },
}

/// Infer a structural JSON schema from a sample body.
///
/// Objects gain `properties` and a sorted `required` list; arrays gain an
/// `items` schema merged across elements (`anyOf` when they disagree).
pub fn infer_schema(body: &Value) -> Result<Value, SchemaError> {
    infer_at_depth(body, 0)
}

fn infer_at_depth(value: &Value, depth: usize) -> Result<Value, SchemaError> {
    if depth > MAX_DEPTH {
        return Err(SchemaError::DepthExceeded { limit: MAX_DEPTH });
    }

    Ok(match value {
        Value::Null => json!({"type": "null"}),
        Value::Bool(_) => json!({"type": "boolean"}),
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                json!({"type": "integer"})
            } else {
                json!({"type": "number"})
            }
        }
        Value::String(_) => json!({"type": "string"}),
        Value::Array(items) => {
            let mut schema = Map::new();
            schema.insert("type".to_string(), json!("array"));
            if !items.is_empty() {
                let element_schemas = items
                    .iter()
                    .map(|item| infer_at_depth(item, depth + 1))
                    .collect::<Result<Vec<_>, _>>()?;
                schema.insert("items".to_string(), merge_schemas(element_schemas));
            }
            Value::Object(schema)
        }
        Value::Object(map) => {
            let mut properties = Map::new();
            let mut required: Vec<Value> = Vec::new();
            for (key, field) in map {
                properties.insert(key.clone(), infer_at_depth(field, depth + 1)?);
                required.push(json!(key));
            }
            required.sort_by(|a, b| a.as_str().cmp(&b.as_str()));
            json!({
                "type": "object",
                "properties": properties,
                "required": required,
            })
        }
    })
}

/// Collapse element schemas into one `items` schema.
///
/// Identical schemas collapse to a single value; mixed shapes become an
/// `anyOf` over the distinct variants, in first-seen order.
fn merge_schemas(schemas: Vec<Value>) -> Value {
    let mut distinct: Vec<Value> = Vec::new();
    for schema in schemas {
        if !distinct.contains(&schema) {
            distinct.push(schema);
        }
    }
    if distinct.len() == 1 {
        distinct.remove(0)
    } else {
        json!({"anyOf": distinct})
    }
}

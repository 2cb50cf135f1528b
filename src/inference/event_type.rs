//! Event-type resolution
//!
//! Groups same-shaped payloads under one logical event identifier. The type
//! comes from the payload when it names one, and falls back to a positional
//! id otherwise.

use serde_json::Value;

/// Separator substituted for `.` in catalog event ids
pub const ID_SEPARATOR: &str = "-";

/// Resolve the logical event type for one record.
///
/// Precedence: a string `type` field in the body, then a string `eventType`
/// field, then the positional fallback `<entity_id>:<index>` (warned, since
/// positional ids do not group across runs).
pub fn resolve_event_type(body: Option<&Value>, entity_id: &str, index: usize) -> String {
    if let Some(Value::Object(map)) = body {
        if let Some(Value::String(ty)) = map.get("type") {
            return ty.clone();
        }
        if let Some(Value::String(ty)) = map.get("eventType") {
            return ty.clone();
        }
    }

    let fallback = format!("{entity_id}:{index}");
    tracing::warn!(
        entity_id = %entity_id,
        index,
        fallback = %fallback,
        "Payload carries no type field, using positional event type"
    );
    fallback
}

/// Derive the catalog id for a resolved event type.
///
/// The catalog store disallows `.` in identifiers, so the first `.` is
/// replaced with [`ID_SEPARATOR`]. Only the first: multi-segment types keep
/// their residual dots until the single-substitution behavior is revisited.
pub fn catalog_event_id(event_type: &str) -> String {
    catalog_event_id_with(event_type, ID_SEPARATOR)
}

/// [`catalog_event_id`] with an explicit separator
pub fn catalog_event_id_with(event_type: &str, separator: &str) -> String {
    event_type.replacen('.', separator, 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_type_field_wins() {
        let body = json!({"type": "order.created", "eventType": "ignored"});
        assert_eq!(
            resolve_event_type(Some(&body), "src_1", 0),
            "order.created"
        );
    }

    #[test]
    fn test_event_type_field_is_second_choice() {
        let body = json!({"eventType": "x"});
        assert_eq!(resolve_event_type(Some(&body), "src_1", 0), "x");
    }

    #[test]
    fn test_positional_fallback() {
        let body = json!({"payload": {"id": 1}});
        assert_eq!(resolve_event_type(Some(&body), "src_1", 3), "src_1:3");
        assert_eq!(resolve_event_type(None, "dst_2", 0), "dst_2:0");
    }

    #[test]
    fn test_non_string_type_falls_back() {
        let body = json!({"type": 42});
        assert_eq!(resolve_event_type(Some(&body), "src_1", 1), "src_1:1");
    }

    #[test]
    fn test_non_object_body_falls_back() {
        let body = json!(["not", "an", "object"]);
        assert_eq!(resolve_event_type(Some(&body), "src_1", 2), "src_1:2");
    }

    #[test]
    fn test_first_dot_substituted() {
        assert_eq!(catalog_event_id("order.created"), "order-created");
    }

    #[test]
    fn test_only_first_dot_substituted() {
        // Residual dots are kept as-is.
        assert_eq!(catalog_event_id("order.created.v2"), "order-created.v2");
    }

    #[test]
    fn test_dotless_types_unchanged() {
        assert_eq!(catalog_event_id("src_1:3"), "src_1:3");
    }

    #[test]
    fn test_custom_separator() {
        assert_eq!(catalog_event_id_with("order.created", "_"), "order_created");
    }
}

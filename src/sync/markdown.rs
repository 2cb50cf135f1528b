//! Catalog document bodies
//!
//! Renders the markdown persisted with catalog services and events. Event
//! bodies embed the inferred schema (or `null` when inference failed), the
//! example payload, the observed headers, and the provider record id the
//! sample came from.

use serde_json::Value;

/// Markdown body for a catalog service
pub fn service_markdown(description: Option<&str>) -> String {
    description.unwrap_or_default().to_string()
}

/// Markdown body for a catalog event
pub fn event_markdown(
    schema: Option<&Value>,
    example: &Value,
    headers: &Value,
    record_id: &str,
) -> String {
    format!(
        "## Schema\n\n\
         ```json\n{schema}\n```\n\n\
         ## Example\n\n\
         ```json\n{example}\n```\n\n\
         ## Headers\n\n\
         ```json\n{headers}\n```\n\n\
         ---\n\
         Provider record id: `{record_id}`\n",
        schema = pretty(schema.unwrap_or(&Value::Null)),
        example = pretty(example),
        headers = pretty(headers),
    )
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_service_markdown_is_description_or_empty() {
        assert_eq!(service_markdown(Some("Billing webhooks")), "Billing webhooks");
        assert_eq!(service_markdown(None), "");
    }

    #[test]
    fn test_event_markdown_sections() {
        let schema = json!({"type": "object"});
        let example = json!({"type": "order.created"});
        let headers = json!({"content-type": "application/json"});

        let markdown = event_markdown(Some(&schema), &example, &headers, "req_1");

        assert!(markdown.contains("## Schema"));
        assert!(markdown.contains("## Example"));
        assert!(markdown.contains("## Headers"));
        assert!(markdown.contains("\"type\": \"object\""));
        assert!(markdown.contains("\"content-type\": \"application/json\""));
        assert!(markdown.contains("Provider record id: `req_1`"));
    }

    #[test]
    fn test_absent_schema_renders_null() {
        let markdown = event_markdown(None, &json!({}), &json!({}), "req_2");
        assert!(markdown.contains("## Schema\n\n```json\nnull\n```"));
    }
}

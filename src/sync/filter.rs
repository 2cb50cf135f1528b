//! Connection filtering
//!
//! Narrows the working set of provider connections to those whose source
//! name matches the user-supplied pattern.

use regex::Regex;

use crate::provider::types::Connection;

/// Filter connections by source display name.
///
/// Without a pattern every connection passes through unchanged. With one,
/// matching is unanchored (`Regex::is_match`); dropped connections leave a
/// debug trace and the surviving count is summarized at info level.
pub fn filter_connections(connections: Vec<Connection>, pattern: Option<&Regex>) -> Vec<Connection> {
    let Some(pattern) = pattern else {
        return connections;
    };

    tracing::info!(pattern = %pattern, "Applying connection source match");
    let total = connections.len();
    let kept: Vec<Connection> = connections
        .into_iter()
        .filter(|connection| {
            if pattern.is_match(&connection.source.name) {
                true
            } else {
                tracing::debug!(
                    source = %connection.source.name,
                    pattern = %pattern,
                    "Connection source does not match, dropping"
                );
                false
            }
        })
        .collect();
    tracing::info!(matched = kept.len(), total, "Connection source match applied");
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::types::{Destination, Source};
    use chrono::Utc;

    fn connection(source_name: &str) -> Connection {
        Connection {
            source: Source {
                id: format!("src_{source_name}"),
                name: source_name.to_string(),
                description: None,
                updated_at: Utc::now(),
            },
            destination: Destination {
                id: "dst_1".to_string(),
                name: "consumer".to_string(),
                description: None,
                updated_at: Utc::now(),
            },
        }
    }

    #[test]
    fn test_no_pattern_passes_everything() {
        let connections = vec![connection("billing-svc"), connection("auth-svc")];
        let kept = filter_connections(connections, None);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_anchored_prefix_match() {
        let connections = vec![
            connection("billing-svc"),
            connection("auth-svc"),
            connection("billing-webhook"),
        ];
        let pattern = Regex::new("^billing").unwrap();
        let kept = filter_connections(connections, Some(&pattern));
        let names: Vec<&str> = kept.iter().map(|c| c.source.name.as_str()).collect();
        assert_eq!(names, ["billing-svc", "billing-webhook"]);
    }

    #[test]
    fn test_unanchored_substring_match() {
        let connections = vec![connection("billing-svc"), connection("svc-billing")];
        let pattern = Regex::new("billing").unwrap();
        let kept = filter_connections(connections, Some(&pattern));
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_nothing_matches() {
        let connections = vec![connection("auth-svc")];
        let pattern = Regex::new("^billing").unwrap();
        assert!(filter_connections(connections, Some(&pattern)).is_empty());
    }
}

//! Catalog documents
//!
//! The documents hookcat projects into the documentation catalog. Every
//! document is keyed by `(id, version)`; one run writes all of its
//! documents under a single run version.

use serde::{Deserialize, Serialize};

/// Direction of an event relative to its owning service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// The service emits this event (source-originated requests)
    Sends,
    /// The service consumes this event (destination-delivered events)
    Receives,
}

impl Role {
    /// String form used in catalog link records
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Sends => "sends",
            Role::Receives => "receives",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A versioned reference to another catalog document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionedRef {
    /// Referenced document id
    pub id: String,
    /// Referenced document version
    pub version: String,
}

impl VersionedRef {
    /// Build a reference
    pub fn new<I: Into<String>, V: Into<String>>(id: I, version: V) -> Self {
        Self {
            id: id.into(),
            version: version.into(),
        }
    }
}

/// A catalog service: one per provider source or destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDoc {
    /// Provider entity id
    pub id: String,
    /// Display name
    pub name: String,
    /// Run version the document was written at
    pub version: String,
    /// Markdown body (the provider description, or empty)
    pub markdown: String,
    /// Events this service sends
    #[serde(default)]
    pub sends: Vec<VersionedRef>,
    /// Events this service receives
    #[serde(default)]
    pub receives: Vec<VersionedRef>,
}

/// A catalog event: one per distinct observed payload shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDoc {
    /// Derived event-type id (first `.` already substituted)
    pub id: String,
    /// Display name; same as the id
    pub name: String,
    /// Run version the document was written at
    pub version: String,
    /// Markdown body embedding schema, example and headers
    pub markdown: String,
}

/// A catalog domain grouping services
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainDoc {
    /// Domain id
    pub id: String,
    /// Display name
    pub name: String,
    /// Run version the document was written at
    pub version: String,
    /// Services grouped under this domain
    #[serde(default)]
    pub services: Vec<VersionedRef>,
}

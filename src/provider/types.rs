//! Provider wire types
//!
//! Typed representations of the webhook provider's API resources. These are
//! read-only projections: hookcat never writes provider-side data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A provider connection pairing exactly one source with one destination.
///
/// Fetched fresh each run and never persisted by hookcat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
    /// Inbound endpoint of the connection
    pub source: Source,
    /// Outbound delivery target of the connection
    pub destination: Destination,
}

/// An inbound webhook endpoint; receives requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Source {
    /// Stable provider-assigned id
    pub id: String,
    /// Display name
    pub name: String,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
    /// Last provider-side update
    pub updated_at: DateTime<Utc>,
}

/// An outbound delivery target; receives events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Destination {
    /// Stable provider-assigned id
    pub id: String,
    /// Display name
    pub name: String,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
    /// Last provider-side update
    pub updated_at: DateTime<Utc>,
}

/// Payload carried by a request or event record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordData {
    /// The delivered JSON body, when the provider captured one
    #[serde(default)]
    pub body: Option<Value>,
    /// Headers observed on the delivery
    #[serde(default)]
    pub headers: Value,
}

/// One inbound request observed at a source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestRecord {
    /// Provider-assigned id, unique within the provider
    pub id: String,
    /// When the request was received
    pub created_at: DateTime<Utc>,
    /// Payload; present on detail responses, absent on list summaries
    #[serde(default)]
    pub data: Option<RecordData>,
}

/// One outbound event delivered to a destination
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    /// Provider-assigned id, unique within the provider
    pub id: String,
    /// When the event was delivered
    pub created_at: DateTime<Utc>,
    /// Payload; present on detail responses, absent on list summaries
    #[serde(default)]
    pub data: Option<RecordData>,
}

/// One page of a cursor-paginated collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// Records on this page
    #[serde(default = "Vec::new")]
    pub models: Vec<T>,
    /// Cursor block
    #[serde(default)]
    pub pagination: Pagination,
}

/// Pagination cursors returned alongside a page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pagination {
    /// Cursor for the next page; absent on the last page
    #[serde(default)]
    pub next: Option<String>,
}

/// Anything with a provider-assigned record id.
///
/// The pager uses this for its per-entity duplicate detection.
pub trait Identified {
    /// The provider-assigned id
    fn record_id(&self) -> &str;
}

impl Identified for RequestRecord {
    fn record_id(&self) -> &str {
        &self.id
    }
}

impl Identified for EventRecord {
    fn record_id(&self) -> &str {
        &self.id
    }
}

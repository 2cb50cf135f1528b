//! Webhook provider API
//!
//! Read-only collaborator: typed wire resources, the HTTP client behind the
//! [`ProviderClient`] seam, and the bounded pagination shared by request and
//! event ingestion.

pub mod client;
pub mod pager;
pub mod types;

pub use client::{HttpProviderClient, ProviderClient, DEFAULT_API_BASE};
pub use pager::{BoundedPager, EventPages, PageSource, RequestPages, RECORD_DELAY};
pub use types::{
    Connection, Destination, EventRecord, Identified, Page, Pagination, RecordData, RequestRecord,
    Source,
};

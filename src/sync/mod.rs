//! Catalog synchronization
//!
//! Everything between the provider and the catalog store: connection
//! filtering, markdown rendering, create-if-absent reconciliation, and the
//! run orchestrator.

pub mod filter;
pub mod markdown;
pub mod orchestrator;
pub mod reconciler;

pub use filter::filter_connections;
pub use markdown::{event_markdown, service_markdown};
pub use orchestrator::{Generator, RunSummary};
pub use reconciler::{DiscoveredEvent, Reconciler};

//! Catalog store seam
//!
//! The documentation catalog is an external collaborator; this trait is the
//! surface hookcat writes through. Existence checks are the idempotency
//! gates: everything is keyed by `(id, version)`, and link operations must
//! collapse duplicate references.

use async_trait::async_trait;

use crate::catalog::types::{DomainDoc, EventDoc, Role, ServiceDoc, VersionedRef};
use crate::error::Result;

/// Write/read operations against the documentation catalog
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Write a domain document
    async fn write_domain(&self, domain: DomainDoc) -> Result<()>;

    /// Write a service document
    async fn write_service(&self, service: ServiceDoc) -> Result<()>;

    /// Fetch a service at an exact version, if present
    async fn get_service(&self, id: &str, version: &str) -> Result<Option<ServiceDoc>>;

    /// Write an event document
    async fn write_event(&self, event: EventDoc) -> Result<()>;

    /// Fetch an event at an exact version, if present
    async fn get_event(&self, id: &str, version: &str) -> Result<Option<EventDoc>>;

    /// Link an event to the latest version of a service, under a role.
    /// Adding the same reference twice is a no-op.
    async fn add_event_to_service(
        &self,
        service_id: &str,
        role: Role,
        event: &VersionedRef,
    ) -> Result<()>;

    /// Link a service into the latest version of a domain.
    /// Adding the same reference twice is a no-op.
    async fn add_service_to_domain(&self, domain_id: &str, service: &VersionedRef) -> Result<()>;
}

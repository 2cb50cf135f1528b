//! Catalog reconciliation
//!
//! Create-if-absent synchronization against the catalog store at run-version
//! granularity. An entity already present at the run version short-circuits
//! the write, but the link step still runs: the store's link semantics are
//! idempotent.

use serde_json::Value;

use crate::catalog::store::CatalogStore;
use crate::catalog::types::{DomainDoc, EventDoc, Role, ServiceDoc, VersionedRef};
use crate::error::Result;
use crate::sync::markdown::{event_markdown, service_markdown};

/// One record's derived artifacts, ready to persist as a catalog event
#[derive(Debug, Clone)]
pub struct DiscoveredEvent {
    /// Catalog event id (event type with the first `.` substituted)
    pub id: String,
    /// Provider record id the sample came from
    pub record_id: String,
    /// Inferred schema; absent when inference failed
    pub schema: Option<Value>,
    /// Example payload body
    pub example: Value,
    /// Headers observed on the delivery
    pub headers: Value,
}

/// Create-if-absent writer for one run
pub struct Reconciler<'a, S: CatalogStore + ?Sized> {
    store: &'a S,
    version: &'a str,
    domain: Option<&'a str>,
}

impl<'a, S: CatalogStore + ?Sized> Reconciler<'a, S> {
    /// Build a reconciler for a run's version stamp and optional domain
    pub fn new(store: &'a S, version: &'a str, domain: Option<&'a str>) -> Self {
        Self {
            store,
            version,
            domain,
        }
    }

    /// Write the configured domain at the run version
    pub async fn sync_domain(&self, name: &str) -> Result<()> {
        self.store
            .write_domain(DomainDoc {
                id: name.to_string(),
                name: name.to_string(),
                version: self.version.to_string(),
                services: Vec::new(),
            })
            .await
    }

    /// Ensure a service exists at the run version and link it into the
    /// domain when one is configured. Returns whether a write happened.
    pub async fn sync_service(
        &self,
        id: &str,
        name: &str,
        description: Option<&str>,
    ) -> Result<bool> {
        let written = if self.store.get_service(id, self.version).await?.is_none() {
            self.store
                .write_service(ServiceDoc {
                    id: id.to_string(),
                    name: name.to_string(),
                    version: self.version.to_string(),
                    markdown: service_markdown(description),
                    sends: Vec::new(),
                    receives: Vec::new(),
                })
                .await?;
            tracing::debug!(service_id = %id, version = %self.version, "Wrote service");
            true
        } else {
            tracing::debug!(service_id = %id, version = %self.version, "Service already exists");
            false
        };

        // Link even when the service pre-existed; the store deduplicates.
        if let Some(domain) = self.domain {
            self.store
                .add_service_to_domain(domain, &VersionedRef::new(id, self.version))
                .await?;
        }

        Ok(written)
    }

    /// Ensure an event exists at the run version and link it to its owning
    /// service under the given role. Returns whether a write happened.
    pub async fn sync_event(
        &self,
        service_id: &str,
        role: Role,
        event: DiscoveredEvent,
    ) -> Result<bool> {
        let written = if self.store.get_event(&event.id, self.version).await?.is_none() {
            let markdown = event_markdown(
                event.schema.as_ref(),
                &event.example,
                &event.headers,
                &event.record_id,
            );
            self.store
                .write_event(EventDoc {
                    id: event.id.clone(),
                    name: event.id.clone(),
                    version: self.version.to_string(),
                    markdown,
                })
                .await?;
            tracing::debug!(event_id = %event.id, version = %self.version, "Wrote event");
            true
        } else {
            tracing::debug!(event_id = %event.id, version = %self.version, "Event already exists");
            false
        };

        self.store
            .add_event_to_service(service_id, role, &VersionedRef::new(&event.id, self.version))
            .await?;

        Ok(written)
    }
}

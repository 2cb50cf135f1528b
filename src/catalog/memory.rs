//! In-memory catalog store
//!
//! Backs tests and dry runs. Tracks write counts so idempotency can be
//! asserted: a second run over unchanged data must leave every counter
//! where it was.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::catalog::store::CatalogStore;
use crate::catalog::types::{DomainDoc, EventDoc, Role, ServiceDoc, VersionedRef};
use crate::error::{CatalogError, Result};

type Key = (String, String);

#[derive(Default)]
struct Docs {
    domains: HashMap<Key, DomainDoc>,
    services: HashMap<Key, ServiceDoc>,
    events: HashMap<Key, EventDoc>,
}

/// [`CatalogStore`] held entirely in memory
#[derive(Default)]
pub struct InMemoryCatalogStore {
    docs: RwLock<Docs>,
    domain_writes: AtomicU64,
    service_writes: AtomicU64,
    event_writes: AtomicU64,
}

impl InMemoryCatalogStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `write_domain` calls observed
    pub fn domain_writes(&self) -> u64 {
        self.domain_writes.load(Ordering::SeqCst)
    }

    /// Number of `write_service` calls observed
    pub fn service_writes(&self) -> u64 {
        self.service_writes.load(Ordering::SeqCst)
    }

    /// Number of `write_event` calls observed
    pub fn event_writes(&self) -> u64 {
        self.event_writes.load(Ordering::SeqCst)
    }

    /// Snapshot of all service documents
    pub async fn services(&self) -> Vec<ServiceDoc> {
        self.docs.read().await.services.values().cloned().collect()
    }

    /// Snapshot of all event documents
    pub async fn events(&self) -> Vec<EventDoc> {
        self.docs.read().await.events.values().cloned().collect()
    }

    /// Snapshot of all domain documents
    pub async fn domains(&self) -> Vec<DomainDoc> {
        self.docs.read().await.domains.values().cloned().collect()
    }

    /// Fetch one service document at an exact version
    pub async fn service(&self, id: &str, version: &str) -> Option<ServiceDoc> {
        self.docs
            .read()
            .await
            .services
            .get(&(id.to_string(), version.to_string()))
            .cloned()
    }
}

/// Latest version key for an id, relying on the stamp format sorting
/// chronologically.
fn latest_key<'a, T>(map: &'a HashMap<Key, T>, id: &str) -> Option<&'a Key> {
    map.keys()
        .filter(|(doc_id, _)| doc_id == id)
        .max_by(|a, b| a.1.cmp(&b.1))
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn write_domain(&self, domain: DomainDoc) -> Result<()> {
        self.domain_writes.fetch_add(1, Ordering::SeqCst);
        let mut docs = self.docs.write().await;
        docs.domains
            .insert((domain.id.clone(), domain.version.clone()), domain);
        Ok(())
    }

    async fn write_service(&self, service: ServiceDoc) -> Result<()> {
        self.service_writes.fetch_add(1, Ordering::SeqCst);
        let mut docs = self.docs.write().await;
        docs.services
            .insert((service.id.clone(), service.version.clone()), service);
        Ok(())
    }

    async fn get_service(&self, id: &str, version: &str) -> Result<Option<ServiceDoc>> {
        Ok(self.service(id, version).await)
    }

    async fn write_event(&self, event: EventDoc) -> Result<()> {
        self.event_writes.fetch_add(1, Ordering::SeqCst);
        let mut docs = self.docs.write().await;
        docs.events
            .insert((event.id.clone(), event.version.clone()), event);
        Ok(())
    }

    async fn get_event(&self, id: &str, version: &str) -> Result<Option<EventDoc>> {
        Ok(self
            .docs
            .read()
            .await
            .events
            .get(&(id.to_string(), version.to_string()))
            .cloned())
    }

    async fn add_event_to_service(
        &self,
        service_id: &str,
        role: Role,
        event: &VersionedRef,
    ) -> Result<()> {
        let mut docs = self.docs.write().await;
        let key = latest_key(&docs.services, service_id)
            .cloned()
            .ok_or_else(|| CatalogError::Store(format!("unknown service {service_id}")))?;
        let service = docs
            .services
            .get_mut(&key)
            .ok_or_else(|| CatalogError::Store(format!("unknown service {service_id}")))?;
        let links = match role {
            Role::Sends => &mut service.sends,
            Role::Receives => &mut service.receives,
        };
        if !links.contains(event) {
            links.push(event.clone());
        }
        Ok(())
    }

    async fn add_service_to_domain(&self, domain_id: &str, service: &VersionedRef) -> Result<()> {
        let mut docs = self.docs.write().await;
        let key = latest_key(&docs.domains, domain_id)
            .cloned()
            .ok_or_else(|| CatalogError::Store(format!("unknown domain {domain_id}")))?;
        let domain = docs
            .domains
            .get_mut(&key)
            .ok_or_else(|| CatalogError::Store(format!("unknown domain {domain_id}")))?;
        if !domain.services.contains(service) {
            domain.services.push(service.clone());
        }
        Ok(())
    }
}

//! Filesystem catalog store
//!
//! Persists catalog documents as JSON files under the catalog directory,
//! one file per `(id, version)` pair:
//!
//! ```text
//! <root>/domains/<id>/<version>.json
//! <root>/services/<id>/<version>.json
//! <root>/events/<id>/<version>.json
//! ```
//!
//! Link operations read-modify-write the latest version of the target
//! document; the version stamp format sorts chronologically, so "latest"
//! is the lexically greatest file stem.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::catalog::store::CatalogStore;
use crate::catalog::types::{DomainDoc, EventDoc, Role, ServiceDoc, VersionedRef};
use crate::error::{CatalogError, Result};

const DOMAINS: &str = "domains";
const SERVICES: &str = "services";
const EVENTS: &str = "events";

/// [`CatalogStore`] over a directory of JSON documents
pub struct FileCatalogStore {
    root: PathBuf,
}

impl FileCatalogStore {
    /// Create a store rooted at the given catalog directory
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    fn doc_path(&self, kind: &str, id: &str, version: &str) -> PathBuf {
        self.root.join(kind).join(id).join(format!("{version}.json"))
    }

    async fn read_doc<T: DeserializeOwned>(&self, path: &Path) -> Result<Option<T>> {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let doc = serde_json::from_slice(&bytes).map_err(|e| CatalogError::CorruptDocument {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(Some(doc))
    }

    async fn write_doc<T: Serialize>(&self, path: &Path, doc: &T) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec_pretty(doc)?;
        tokio::fs::write(path, bytes).await?;
        Ok(())
    }

    /// Greatest version stamp present for an id, if any
    async fn latest_version(&self, kind: &str, id: &str) -> Result<Option<String>> {
        let dir = self.root.join(kind).join(id);
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut latest: Option<String> = None;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            if latest.as_deref().map_or(true, |current| stem > current) {
                latest = Some(stem.to_string());
            }
        }
        Ok(latest)
    }
}

#[async_trait]
impl CatalogStore for FileCatalogStore {
    async fn write_domain(&self, domain: DomainDoc) -> Result<()> {
        let path = self.doc_path(DOMAINS, &domain.id, &domain.version);
        self.write_doc(&path, &domain).await
    }

    async fn write_service(&self, service: ServiceDoc) -> Result<()> {
        let path = self.doc_path(SERVICES, &service.id, &service.version);
        self.write_doc(&path, &service).await
    }

    async fn get_service(&self, id: &str, version: &str) -> Result<Option<ServiceDoc>> {
        self.read_doc(&self.doc_path(SERVICES, id, version)).await
    }

    async fn write_event(&self, event: EventDoc) -> Result<()> {
        let path = self.doc_path(EVENTS, &event.id, &event.version);
        self.write_doc(&path, &event).await
    }

    async fn get_event(&self, id: &str, version: &str) -> Result<Option<EventDoc>> {
        self.read_doc(&self.doc_path(EVENTS, id, version)).await
    }

    async fn add_event_to_service(
        &self,
        service_id: &str,
        role: Role,
        event: &VersionedRef,
    ) -> Result<()> {
        let version = self
            .latest_version(SERVICES, service_id)
            .await?
            .ok_or_else(|| CatalogError::Store(format!("unknown service {service_id}")))?;
        let path = self.doc_path(SERVICES, service_id, &version);
        let mut service: ServiceDoc = self
            .read_doc(&path)
            .await?
            .ok_or_else(|| CatalogError::Store(format!("unknown service {service_id}")))?;

        let links = match role {
            Role::Sends => &mut service.sends,
            Role::Receives => &mut service.receives,
        };
        if !links.contains(event) {
            links.push(event.clone());
            self.write_doc(&path, &service).await?;
        }
        Ok(())
    }

    async fn add_service_to_domain(&self, domain_id: &str, service: &VersionedRef) -> Result<()> {
        let version = self
            .latest_version(DOMAINS, domain_id)
            .await?
            .ok_or_else(|| CatalogError::Store(format!("unknown domain {domain_id}")))?;
        let path = self.doc_path(DOMAINS, domain_id, &version);
        let mut domain: DomainDoc = self
            .read_doc(&path)
            .await?
            .ok_or_else(|| CatalogError::Store(format!("unknown domain {domain_id}")))?;

        if !domain.services.contains(service) {
            domain.services.push(service.clone());
            self.write_doc(&path, &domain).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(id: &str, version: &str) -> ServiceDoc {
        ServiceDoc {
            id: id.to_string(),
            name: id.to_string(),
            version: version.to_string(),
            markdown: "Billing webhooks".to_string(),
            sends: vec![],
            receives: vec![],
        }
    }

    #[tokio::test]
    async fn test_roundtrip_service() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCatalogStore::new(dir.path());

        store
            .write_service(service("src_1", "2024-0305-090702"))
            .await
            .unwrap();

        let loaded = store
            .get_service("src_1", "2024-0305-090702")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.markdown, "Billing webhooks");
        assert!(store
            .get_service("src_1", "2024-0401-000000")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_event_link_roundtrip_and_dedup() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCatalogStore::new(dir.path());

        store
            .write_service(service("src_1", "2024-0305-090702"))
            .await
            .unwrap();

        let event_ref = VersionedRef::new("order-created", "2024-0305-090702");
        store
            .add_event_to_service("src_1", Role::Sends, &event_ref)
            .await
            .unwrap();
        store
            .add_event_to_service("src_1", Role::Sends, &event_ref)
            .await
            .unwrap();

        let loaded = store
            .get_service("src_1", "2024-0305-090702")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.sends, vec![event_ref]);
    }

    #[tokio::test]
    async fn test_links_pick_latest_version() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCatalogStore::new(dir.path());

        store
            .write_service(service("src_1", "2024-0305-090702"))
            .await
            .unwrap();
        store
            .write_service(service("src_1", "2024-0401-120000"))
            .await
            .unwrap();

        let event_ref = VersionedRef::new("order-created", "2024-0401-120000");
        store
            .add_event_to_service("src_1", Role::Receives, &event_ref)
            .await
            .unwrap();

        let old = store
            .get_service("src_1", "2024-0305-090702")
            .await
            .unwrap()
            .unwrap();
        let new = store
            .get_service("src_1", "2024-0401-120000")
            .await
            .unwrap()
            .unwrap();
        assert!(old.receives.is_empty());
        assert_eq!(new.receives.len(), 1);
    }

    #[tokio::test]
    async fn test_domain_linking() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCatalogStore::new(dir.path());

        store
            .write_domain(DomainDoc {
                id: "payments".to_string(),
                name: "payments".to_string(),
                version: "2024-0305-090702".to_string(),
                services: vec![],
            })
            .await
            .unwrap();

        let service_ref = VersionedRef::new("src_1", "2024-0305-090702");
        store
            .add_service_to_domain("payments", &service_ref)
            .await
            .unwrap();

        let domains_dir = dir.path().join("domains").join("payments");
        let bytes = std::fs::read(domains_dir.join("2024-0305-090702.json")).unwrap();
        let domain: DomainDoc = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(domain.services, vec![service_ref]);
    }

    #[tokio::test]
    async fn test_corrupt_document_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCatalogStore::new(dir.path());

        let path = dir.path().join("events").join("order-created");
        std::fs::create_dir_all(&path).unwrap();
        std::fs::write(path.join("2024-0305-090702.json"), b"{not json").unwrap();

        let err = store
            .get_event("order-created", "2024-0305-090702")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Corrupt catalog document"));
    }
}

//! Run orchestration
//!
//! The end-to-end driver: validate configuration, discover connections,
//! partition them into unique sources and destinations, and drive the
//! pager, inference, and reconciler over both collections. All I/O is
//! awaited sequentially, one entity at a time.

use std::collections::BTreeMap;

use chrono::{DateTime, Local};
use serde_json::Value;

use crate::catalog::store::CatalogStore;
use crate::catalog::types::Role;
use crate::config::GeneratorConfig;
use crate::error::{ProviderError, Result};
use crate::inference::event_type::{catalog_event_id, resolve_event_type};
use crate::inference::schema::infer_schema;
use crate::provider::client::ProviderClient;
use crate::provider::pager::{BoundedPager, EventPages, RequestPages};
use crate::provider::types::{Destination, RecordData, Source};
use crate::sync::filter::filter_connections;
use crate::sync::reconciler::{DiscoveredEvent, Reconciler};
use crate::version::run_version;

/// Counters reported after a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Connections in the working set after filtering
    pub connections: usize,
    /// Services newly written this run
    pub services_written: usize,
    /// Events newly written this run
    pub events_written: usize,
    /// Provider records processed across all entities
    pub records_processed: usize,
}

/// Catalog generation driver
#[derive(Debug, Default)]
pub struct Generator {
    run_at: Option<DateTime<Local>>,
}

impl Generator {
    /// Create a generator stamping runs with the current time
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the run timestamp, fixing the version stamp. Tests use this to
    /// make consecutive runs share a version.
    pub fn pinned_at(at: DateTime<Local>) -> Self {
        Self { run_at: Some(at) }
    }

    /// Execute one full catalog generation run.
    ///
    /// The version stamp is computed once here and shared by every catalog
    /// write in the run.
    pub async fn run<C, S>(
        &self,
        config: &GeneratorConfig,
        client: &C,
        store: &S,
    ) -> Result<RunSummary>
    where
        C: ProviderClient,
        S: CatalogStore,
    {
        config.validate()?;
        let match_pattern = config.compiled_match()?;

        let version = run_version(self.run_at);
        tracing::info!(version = %version, "Starting catalog generation run");
        let reconciler = Reconciler::new(store, &version, config.domain.as_deref());

        if let Some(domain) = &config.domain {
            reconciler.sync_domain(domain).await?;
            tracing::info!(domain = %domain, "Created domain");
        }

        let connections = client.list_connections().await?;
        if connections.is_empty() {
            tracing::info!("No connections found");
            return Ok(RunSummary::default());
        }

        let connections = filter_connections(connections, match_pattern.as_ref());
        tracing::info!(connections = connections.len(), "Found connections");

        let mut sources: BTreeMap<String, Source> = BTreeMap::new();
        let mut destinations: BTreeMap<String, Destination> = BTreeMap::new();
        for connection in &connections {
            sources.insert(connection.source.id.clone(), connection.source.clone());
            destinations.insert(
                connection.destination.id.clone(),
                connection.destination.clone(),
            );
        }

        let mut summary = RunSummary {
            connections: connections.len(),
            ..RunSummary::default()
        };

        for source in sources.values() {
            if reconciler
                .sync_service(&source.id, &source.name, source.description.as_deref())
                .await?
            {
                summary.services_written += 1;
            }

            let mut pager = BoundedPager::new(
                RequestPages::new(client, &source.id),
                source.id.clone(),
                config.max_records_per_entity,
            );
            while let Some(record) = pager.next_record().await? {
                let detail = client.retrieve_request(&record.id).await?;
                let RecordData { body, headers } = detail.data.unwrap_or_default();
                let Some(body) = body else {
                    // Request bodies are assumed always present.
                    return Err(ProviderError::MissingRequestBody {
                        record_id: record.id,
                        source_id: source.id.clone(),
                    }
                    .into());
                };
                summary.records_processed += 1;
                let index = pager.yielded() - 1;
                if ingest_record(
                    &reconciler,
                    &source.id,
                    Role::Sends,
                    &record.id,
                    body,
                    headers,
                    index,
                )
                .await?
                {
                    summary.events_written += 1;
                }
            }
        }
        tracing::info!(sources = sources.len(), "Created services for sources");

        for destination in destinations.values() {
            if reconciler
                .sync_service(
                    &destination.id,
                    &destination.name,
                    destination.description.as_deref(),
                )
                .await?
            {
                summary.services_written += 1;
            }

            let mut pager = BoundedPager::new(
                EventPages::new(client, &destination.id),
                destination.id.clone(),
                config.max_records_per_entity,
            );
            while let Some(record) = pager.next_record().await? {
                let detail = match client.retrieve_event(&record.id).await {
                    Ok(detail) => detail,
                    Err(e) => {
                        // Unlike requests, a failed event detail skips the record.
                        tracing::warn!(
                            record_id = %record.id,
                            destination_id = %destination.id,
                            error = %e,
                            "Failed to fetch event detail, skipping record"
                        );
                        summary.records_processed += 1;
                        continue;
                    }
                };
                let RecordData { body, headers } = detail.data.unwrap_or_default();
                let Some(body) = body else {
                    // Unlike requests, a bodyless event is skipped.
                    tracing::warn!(
                        record_id = %record.id,
                        destination_id = %destination.id,
                        "Event detail has no payload body, skipping record"
                    );
                    summary.records_processed += 1;
                    continue;
                };
                summary.records_processed += 1;
                let index = pager.yielded() - 1;
                if ingest_record(
                    &reconciler,
                    &destination.id,
                    Role::Receives,
                    &record.id,
                    body,
                    headers,
                    index,
                )
                .await?
                {
                    summary.events_written += 1;
                }
            }
        }
        tracing::info!(
            destinations = destinations.len(),
            "Created services for destinations"
        );

        tracing::info!(
            services_written = summary.services_written,
            events_written = summary.events_written,
            records_processed = summary.records_processed,
            "Run complete"
        );
        Ok(summary)
    }
}

/// Derive one record's artifacts and sync the resulting catalog event.
async fn ingest_record<S: CatalogStore>(
    reconciler: &Reconciler<'_, S>,
    service_id: &str,
    role: Role,
    record_id: &str,
    body: Value,
    headers: Value,
    index: usize,
) -> Result<bool> {
    let event_type = resolve_event_type(Some(&body), service_id, index);

    let schema = match infer_schema(&body) {
        Ok(schema) => Some(schema),
        Err(e) => {
            tracing::warn!(
                record_id = %record_id,
                event_type = %event_type,
                error = %e,
                "Schema inference failed, recording event without schema"
            );
            None
        }
    };

    reconciler
        .sync_event(
            service_id,
            role,
            DiscoveredEvent {
                id: catalog_event_id(&event_type),
                record_id: record_id.to_string(),
                schema,
                example: body,
                headers,
            },
        )
        .await
}

//! Bounded paginated fetch
//!
//! One pagination loop shared by request and event ingestion. A
//! [`PageSource`] knows how to fetch one page for its entity; the
//! [`BoundedPager`] drives it as a lazy sequence of records, enforcing the
//! per-run record cap, the inter-record rate-limit delay, and the
//! duplicate-id protocol check.

use std::collections::{HashSet, VecDeque};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::provider::client::ProviderClient;
use crate::provider::types::{EventRecord, Identified, Page, RequestRecord};

/// Fixed pause before each record is yielded for its detail fetch.
/// Smooths request rate against provider limits.
pub const RECORD_DELAY: Duration = Duration::from_millis(200);

/// One entity's cursor-paginated record collection
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Record type the collection yields
    type Record: Identified + Send;

    /// Fetch one page, starting from the given cursor
    async fn fetch_page(&self, cursor: Option<&str>) -> Result<Page<Self::Record>>;
}

/// Lazy, capped record sequence over a [`PageSource`].
///
/// Yields records one at a time until the cap is reached or pages are
/// exhausted. A repeated record id within the sequence is a protocol
/// violation and surfaces as a fatal [`ProviderError::DuplicateRecord`].
pub struct BoundedPager<S: PageSource> {
    source: S,
    entity_id: String,
    cursor: Option<String>,
    buffer: VecDeque<S::Record>,
    seen: HashSet<String>,
    yielded: usize,
    max_records: usize,
    delay: Duration,
    exhausted: bool,
}

impl<S: PageSource> BoundedPager<S> {
    /// Create a pager for one entity's collection
    pub fn new<E: Into<String>>(source: S, entity_id: E, max_records: usize) -> Self {
        Self {
            source,
            entity_id: entity_id.into(),
            cursor: None,
            buffer: VecDeque::new(),
            seen: HashSet::new(),
            yielded: 0,
            max_records,
            delay: RECORD_DELAY,
            exhausted: false,
        }
    }

    /// Override the inter-record delay (tests use zero)
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Records yielded so far
    pub fn yielded(&self) -> usize {
        self.yielded
    }

    /// Yield the next record, or `None` once the cap is reached or pages
    /// are exhausted.
    pub async fn next_record(&mut self) -> Result<Option<S::Record>> {
        if self.yielded >= self.max_records {
            tracing::debug!(
                entity_id = %self.entity_id,
                max_records = self.max_records,
                "Record cap reached, stopping pagination"
            );
            return Ok(None);
        }

        while self.buffer.is_empty() && !self.exhausted {
            let page = self.source.fetch_page(self.cursor.as_deref()).await?;
            tracing::debug!(
                entity_id = %self.entity_id,
                records = page.models.len(),
                has_next = page.pagination.next.is_some(),
                "Fetched page"
            );
            self.cursor = page.pagination.next;
            if self.cursor.is_none() {
                self.exhausted = true;
            }
            self.buffer.extend(page.models);
        }

        let Some(record) = self.buffer.pop_front() else {
            return Ok(None);
        };

        if !self.seen.insert(record.record_id().to_string()) {
            return Err(ProviderError::DuplicateRecord {
                record_id: record.record_id().to_string(),
                entity_id: self.entity_id.clone(),
            }
            .into());
        }
        self.yielded += 1;

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        Ok(Some(record))
    }
}

/// Requests received by one source, as a [`PageSource`]
pub struct RequestPages<'a, C: ProviderClient> {
    client: &'a C,
    source_id: &'a str,
}

impl<'a, C: ProviderClient> RequestPages<'a, C> {
    /// Page source for the given source's requests
    pub fn new(client: &'a C, source_id: &'a str) -> Self {
        Self { client, source_id }
    }
}

#[async_trait]
impl<C: ProviderClient> PageSource for RequestPages<'_, C> {
    type Record = RequestRecord;

    async fn fetch_page(&self, cursor: Option<&str>) -> Result<Page<RequestRecord>> {
        self.client.list_requests(self.source_id, cursor).await
    }
}

/// Events delivered to one destination, as a [`PageSource`]
pub struct EventPages<'a, C: ProviderClient> {
    client: &'a C,
    destination_id: &'a str,
}

impl<'a, C: ProviderClient> EventPages<'a, C> {
    /// Page source for the given destination's events
    pub fn new(client: &'a C, destination_id: &'a str) -> Self {
        Self {
            client,
            destination_id,
        }
    }
}

#[async_trait]
impl<C: ProviderClient> PageSource for EventPages<'_, C> {
    type Record = EventRecord;

    async fn fetch_page(&self, cursor: Option<&str>) -> Result<Page<EventRecord>> {
        self.client.list_events(self.destination_id, cursor).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::provider::types::Pagination;
    use chrono::Utc;

    /// Serves fixed pages of request ids keyed by cursor index
    struct StubPages {
        pages: Vec<Vec<&'static str>>,
    }

    fn record(id: &str) -> RequestRecord {
        RequestRecord {
            id: id.to_string(),
            created_at: Utc::now(),
            data: None,
        }
    }

    #[async_trait]
    impl PageSource for StubPages {
        type Record = RequestRecord;

        async fn fetch_page(&self, cursor: Option<&str>) -> Result<Page<RequestRecord>> {
            let index: usize = cursor.map_or(0, |c| c.parse().unwrap());
            let next = if index + 1 < self.pages.len() {
                Some((index + 1).to_string())
            } else {
                None
            };
            Ok(Page {
                models: self.pages[index].iter().map(|id| record(id)).collect(),
                pagination: Pagination { next },
            })
        }
    }

    fn pager(pages: Vec<Vec<&'static str>>, max: usize) -> BoundedPager<StubPages> {
        BoundedPager::new(StubPages { pages }, "src_test", max).with_delay(Duration::ZERO)
    }

    async fn drain(pager: &mut BoundedPager<StubPages>) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        while let Some(record) = pager.next_record().await? {
            ids.push(record.id);
        }
        Ok(ids)
    }

    #[tokio::test]
    async fn test_walks_all_pages() {
        let mut pager = pager(vec![vec!["a", "b"], vec!["c"], vec!["d", "e"]], 200);
        let ids = drain(&mut pager).await.unwrap();
        assert_eq!(ids, ["a", "b", "c", "d", "e"]);
        assert_eq!(pager.yielded(), 5);
    }

    #[tokio::test]
    async fn test_cap_stops_mid_page() {
        let mut pager = pager(vec![vec!["a", "b", "c"], vec!["d", "e"]], 4);
        let ids = drain(&mut pager).await.unwrap();
        assert_eq!(ids, ["a", "b", "c", "d"]);
    }

    #[tokio::test]
    async fn test_cap_never_exceeded_even_with_more_pages() {
        let mut pager = pager(vec![vec!["a", "b"], vec!["c", "d"], vec!["e", "f"]], 3);
        let ids = drain(&mut pager).await.unwrap();
        assert_eq!(ids.len(), 3);
        // Further polls stay exhausted.
        assert!(pager.next_record().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_across_pages_is_fatal() {
        let mut pager = pager(vec![vec!["a", "b"], vec!["b", "c"]], 200);
        let err = drain(&mut pager).await.unwrap_err();
        match err {
            Error::Provider(ProviderError::DuplicateRecord {
                record_id,
                entity_id,
            }) => {
                assert_eq!(record_id, "b");
                assert_eq!(entity_id, "src_test");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_empty_collection() {
        let mut pager = pager(vec![vec![]], 200);
        assert!(pager.next_record().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_empty_page_with_continuation() {
        let mut pager = pager(vec![vec![], vec!["a"]], 200);
        let ids = drain(&mut pager).await.unwrap();
        assert_eq!(ids, ["a"]);
    }
}

//! In-process resource store.
//!
//! Keeps records in insertion order and answers the same operations as the
//! HTTP API. Failures can be injected one call at a time, and call counts
//! are recorded so tests can assert what reached the backend.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use schoolhub_core::error::AppError;
use schoolhub_core::result::AppResult;
use schoolhub_core::traits::{Resource, ResourceApi};
use schoolhub_core::types::ListQuery;

/// In-memory implementation of [`ResourceApi`].
#[derive(Debug)]
pub struct MemoryApi<R: Resource> {
    records: RwLock<Vec<R>>,
    fail_next: Mutex<Option<String>>,
    list_calls: AtomicUsize,
    create_calls: AtomicUsize,
}

impl<R: Resource> Default for MemoryApi<R> {
    fn default() -> Self {
        Self::with_records(Vec::new())
    }
}

impl<R: Resource> MemoryApi<R> {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with records.
    pub fn with_records(records: Vec<R>) -> Self {
        Self {
            records: RwLock::new(records),
            fail_next: Mutex::new(None),
            list_calls: AtomicUsize::new(0),
            create_calls: AtomicUsize::new(0),
        }
    }

    /// Make the next call fail with an external-service error.
    pub fn fail_next(&self, message: impl Into<String>) {
        let mut slot = self.fail_next.lock().unwrap_or_else(|e| e.into_inner());
        *slot = Some(message.into());
    }

    /// Number of `list` calls made so far.
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Number of `create` calls that reached the store.
    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    /// Current number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    fn take_failure(&self) -> AppResult<()> {
        let mut slot = self.fail_next.lock().unwrap_or_else(|e| e.into_inner());
        match slot.take() {
            Some(message) => Err(AppError::external(message)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl<R: Resource> ResourceApi<R> for MemoryApi<R> {
    async fn list(&self, query: Option<&ListQuery>) -> AppResult<Vec<R>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.take_failure()?;

        let records = self.records.read().await;
        let pairs = query.map(ListQuery::to_pairs).unwrap_or_default();
        let result: Vec<R> = records
            .iter()
            .filter(|r| pairs.iter().all(|(field, value)| r.matches_field(field, value)))
            .cloned()
            .collect();
        debug!(resource = R::RESOURCE, count = result.len(), "Listed records");
        Ok(result)
    }

    async fn stats(&self) -> AppResult<R::Stats> {
        self.take_failure()?;
        Ok(R::summarize(&self.records.read().await))
    }

    async fn create(&self, draft: &R::Draft) -> AppResult<R> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.take_failure()?;

        let record = R::from_draft(Uuid::new_v4().to_string(), draft);
        self.records.write().await.push(record.clone());
        debug!(resource = R::RESOURCE, id = record.id(), "Created record");
        Ok(record)
    }

    async fn update(&self, id: &str, draft: &R::Draft) -> AppResult<R> {
        self.take_failure()?;

        let mut records = self.records.write().await;
        let slot = records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| AppError::not_found(format!("{} '{id}' not found", R::LABEL)))?;
        slot.apply_draft(draft);
        Ok(slot.clone())
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        self.take_failure()?;

        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.id() != id);
        if records.len() == before {
            return Err(AppError::not_found(format!("{} '{id}' not found", R::LABEL)));
        }
        Ok(())
    }
}

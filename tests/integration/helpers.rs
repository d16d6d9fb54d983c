//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use schoolhub_client::MemoryApi;
use schoolhub_core::result::AppResult;
use schoolhub_core::traits::{Resource, ResourceApi};
use schoolhub_core::types::ListQuery;
use schoolhub_entity::{Student, StudentStatus};
use schoolhub_view::{CollectingNotifier, ListScreen};

/// A student with the fields the list screens look at.
pub fn student(id: &str, name: &str, status: StudentStatus, class_name: &str) -> Student {
    Student {
        id: id.to_string(),
        admission_no: format!("ADM-{id}"),
        name: name.to_string(),
        email: Some(format!("{}@school.test", name.to_lowercase().replace(' ', "."))),
        class_name: class_name.to_string(),
        status,
        ..Default::default()
    }
}

/// `count` active students named `Student 0..count`, alternating classes 9 and 10.
pub fn roster(count: usize) -> Vec<Student> {
    (0..count)
        .map(|i| {
            let class = if i % 2 == 0 { "10" } else { "9" };
            student(&format!("s{i:02}"), &format!("Student {i}"), StudentStatus::Active, class)
        })
        .collect()
}

/// Screen test context
pub struct TestScreen<R: Resource> {
    /// The in-memory backend
    pub api: Arc<MemoryApi<R>>,
    /// Toasts emitted by the screen
    pub toasts: Arc<CollectingNotifier>,
    /// The screen under test, already loaded
    pub screen: ListScreen<R, MemoryApi<R>>,
}

impl<R: Resource> TestScreen<R> {
    /// Create a screen over `records` and perform the initial load.
    pub async fn loaded(records: Vec<R>, page_size: u64) -> Self {
        let api = Arc::new(MemoryApi::with_records(records));
        let toasts = Arc::new(CollectingNotifier::new());
        let mut screen = ListScreen::new(api.clone(), toasts.clone(), page_size);
        screen.refresh().await.expect("initial load");
        Self { api, toasts, screen }
    }

    /// Messages of the toasts emitted so far, clearing them.
    pub fn toast_messages(&self) -> Vec<String> {
        self.toasts.drain().into_iter().map(|t| t.message).collect()
    }
}

/// Wraps an API so every stats call takes `delay` and is counted.
pub struct SlowApi<R: Resource> {
    pub inner: MemoryApi<R>,
    pub delay: Duration,
    pub stats_calls: AtomicUsize,
}

impl<R: Resource> SlowApi<R> {
    pub fn new(inner: MemoryApi<R>, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            inner,
            delay,
            stats_calls: AtomicUsize::new(0),
        })
    }

    pub fn stats_calls(&self) -> usize {
        self.stats_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<R: Resource> ResourceApi<R> for SlowApi<R> {
    async fn list(&self, query: Option<&ListQuery>) -> AppResult<Vec<R>> {
        self.inner.list(query).await
    }

    async fn stats(&self) -> AppResult<R::Stats> {
        self.stats_calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.inner.stats().await
    }

    async fn create(&self, draft: &R::Draft) -> AppResult<R> {
        self.inner.create(draft).await
    }

    async fn update(&self, id: &str, draft: &R::Draft) -> AppResult<R> {
        self.inner.update(id, draft).await
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        self.inner.delete(id).await
    }
}

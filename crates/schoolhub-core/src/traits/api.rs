//! The backend collaborator contract.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::form::{Form, FormValues};
use crate::result::AppResult;
use crate::traits::listable::Listable;
use crate::types::filter::ListQuery;

/// A record type managed by one console module.
pub trait Resource:
    Listable + Serialize + DeserializeOwned + Clone + Send + Sync + 'static
{
    /// Typed draft submitted by the create/edit dialog.
    type Draft: Form + Serialize + Clone + Send + Sync + 'static;

    /// Aggregate shape returned by the module's stats endpoint.
    type Stats: Serialize + DeserializeOwned + Clone + Send + Sync + 'static;

    /// Resource path segment, e.g. `"students"`.
    const RESOURCE: &'static str;

    /// Singular human label used in messages, e.g. `"student"`.
    const LABEL: &'static str;

    /// Built-in page size of the module's list screen.
    const PAGE_SIZE: u64;

    /// Materialize a record from a draft (used by in-process backends).
    fn from_draft(id: String, draft: &Self::Draft) -> Self;

    /// Overwrite the editable fields from a draft, keeping the id and
    /// any state the draft does not carry.
    fn apply_draft(&mut self, draft: &Self::Draft) {
        *self = Self::from_draft(self.id().to_string(), draft);
    }

    /// Form values that pre-fill the edit dialog.
    fn to_form(&self) -> FormValues;

    /// Compute the module's stats from a full collection.
    fn summarize(items: &[Self]) -> Self::Stats;
}

/// Remote API operations for one resource type.
///
/// Every call may fail with a generic error; callers never branch on the
/// failure kind, they surface a single notification.
#[async_trait]
pub trait ResourceApi<R: Resource>: Send + Sync + 'static {
    /// Fetch the collection, optionally narrowed server-side.
    async fn list(&self, query: Option<&ListQuery>) -> AppResult<Vec<R>>;

    /// Fetch the module's aggregate stats.
    async fn stats(&self) -> AppResult<R::Stats>;

    /// Create a record and return it as stored.
    async fn create(&self, draft: &R::Draft) -> AppResult<R>;

    /// Replace a record's editable fields and return it as stored.
    async fn update(&self, id: &str, draft: &R::Draft) -> AppResult<R>;

    /// Delete a record.
    async fn delete(&self, id: &str) -> AppResult<()>;
}

//! Refresh task abstraction.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use schoolhub_core::result::AppResult;

/// Work the scheduler runs once per tick.
///
/// `cancel` fires when the run is superseded by the next tick or the
/// scheduler shuts down. A task must not apply results after it fires.
#[async_trait]
pub trait RefreshTask: Send + Sync + std::fmt::Debug + 'static {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Fetch and apply fresh state.
    async fn refresh(&self, cancel: CancellationToken) -> AppResult<()>;
}

//! Overview CLI command.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use schoolhub_core::result::AppResult;
use schoolhub_entity::{
    Alumnus, AttendanceRecord, Book, HostelRoom, InventoryItem, Notice, SportsEvent, Student,
    Transaction,
};
use schoolhub_worker::{DashboardApis, RefreshTask, StatusDashboard};

use super::{Backend, Context};
use crate::output::{self, OutputFormat};

/// Execute `overview`: one dashboard refresh, printed.
pub async fn execute(ctx: &Context) -> AppResult<()> {
    let apis = match &ctx.backend {
        Backend::Http(api) => DashboardApis::shared(api.clone()),
        Backend::Offline(seed) => DashboardApis {
            students: Arc::new(seed.api::<Student>()?),
            attendance: Arc::new(seed.api::<AttendanceRecord>()?),
            library: Arc::new(seed.api::<Book>()?),
            hostel: Arc::new(seed.api::<HostelRoom>()?),
            inventory: Arc::new(seed.api::<InventoryItem>()?),
            accounts: Arc::new(seed.api::<Transaction>()?),
            alumni: Arc::new(seed.api::<Alumnus>()?),
            sports: Arc::new(seed.api::<SportsEvent>()?),
            notices: Arc::new(seed.api::<Notice>()?),
        },
    };

    let dashboard = StatusDashboard::new(apis, ctx.notifier.clone());
    dashboard.refresh(CancellationToken::new()).await?;
    let Some(snapshot) = dashboard.snapshot() else {
        return Ok(());
    };

    match ctx.format {
        OutputFormat::Table => {
            println!("SchoolHub overview ({})", snapshot.fetched_at.format("%Y-%m-%d %H:%M UTC"));
            for (module, headline) in snapshot.headlines() {
                output::print_kv(module, &headline);
            }
        }
        OutputFormat::Json => output::print_item(&snapshot, ctx.format)?,
    }
    Ok(())
}

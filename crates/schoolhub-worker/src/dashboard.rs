//! Status dashboard refresh job.
//!
//! Loads the stats of every module in one batch. The batch is
//! all-or-nothing: either every module answers and the snapshot is
//! replaced, or the first failure is reported and the previous snapshot
//! stays in place. Results of a cancelled run are discarded.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use schoolhub_core::error::AppError;
use schoolhub_core::result::AppResult;
use schoolhub_core::traits::{Notifier, ResourceApi, Toast};
use schoolhub_entity::accounts::AccountStats;
use schoolhub_entity::alumni::AlumniStats;
use schoolhub_entity::attendance::AttendanceStats;
use schoolhub_entity::hostel::HostelStats;
use schoolhub_entity::inventory::InventoryStats;
use schoolhub_entity::library::LibraryStats;
use schoolhub_entity::notice::NoticeStats;
use schoolhub_entity::sports::SportsStats;
use schoolhub_entity::student::StudentStats;
use schoolhub_entity::{
    Alumnus, AttendanceRecord, Book, HostelRoom, InventoryItem, Notice, SportsEvent, Student,
    Transaction,
};

use crate::task::RefreshTask;

/// Stats of every module at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    /// Student headcounts.
    pub students: StudentStats,
    /// Attendance totals.
    pub attendance: AttendanceStats,
    /// Library totals.
    pub library: LibraryStats,
    /// Hostel occupancy.
    pub hostel: HostelStats,
    /// Inventory value and stock alerts.
    pub inventory: InventoryStats,
    /// Account balances.
    pub accounts: AccountStats,
    /// Alumni counts.
    pub alumni: AlumniStats,
    /// Sports events.
    pub sports: SportsStats,
    /// Notice board.
    pub notices: NoticeStats,
    /// When the batch completed.
    pub fetched_at: DateTime<Utc>,
}

impl DashboardSnapshot {
    /// One headline figure per module, in display order.
    pub fn headlines(&self) -> Vec<(&'static str, String)> {
        vec![
            (
                "Students",
                format!("{} total, {} active", self.students.total, self.students.active),
            ),
            (
                "Attendance",
                format!("{:.1}% of {} marks", self.attendance.attendance_rate, self.attendance.total),
            ),
            (
                "Library",
                format!(
                    "{} of {} copies available",
                    self.library.available_copies, self.library.total_copies
                ),
            ),
            (
                "Hostel",
                format!(
                    "{}/{} beds occupied ({:.1}%)",
                    self.hostel.occupied_beds, self.hostel.total_beds, self.hostel.occupancy_rate
                ),
            ),
            (
                "Inventory",
                format!(
                    "{} items, {} low, {} out of stock",
                    self.inventory.total_items, self.inventory.low_stock, self.inventory.out_of_stock
                ),
            ),
            (
                "Accounts",
                format!("balance {:.2}, {} pending", self.accounts.balance, self.accounts.pending),
            ),
            (
                "Alumni",
                format!("{} total, {} verified", self.alumni.total, self.alumni.verified),
            ),
            (
                "Sports",
                format!("{} events, {} upcoming", self.sports.total_events, self.sports.upcoming),
            ),
            (
                "Notices",
                format!("{} total, {} published", self.notices.total, self.notices.published),
            ),
        ]
    }
}

/// The stats collaborators the dashboard reads from.
#[derive(Clone)]
pub struct DashboardApis {
    /// Student records.
    pub students: Arc<dyn ResourceApi<Student>>,
    /// Attendance marks.
    pub attendance: Arc<dyn ResourceApi<AttendanceRecord>>,
    /// Library catalogue.
    pub library: Arc<dyn ResourceApi<Book>>,
    /// Hostel rooms.
    pub hostel: Arc<dyn ResourceApi<HostelRoom>>,
    /// Inventory items.
    pub inventory: Arc<dyn ResourceApi<InventoryItem>>,
    /// Ledger transactions.
    pub accounts: Arc<dyn ResourceApi<Transaction>>,
    /// Alumni directory.
    pub alumni: Arc<dyn ResourceApi<Alumnus>>,
    /// Sports events.
    pub sports: Arc<dyn ResourceApi<SportsEvent>>,
    /// Notice board.
    pub notices: Arc<dyn ResourceApi<Notice>>,
}

impl DashboardApis {
    /// Use one client that serves every resource.
    pub fn shared<A>(api: Arc<A>) -> Self
    where
        A: ResourceApi<Student>
            + ResourceApi<AttendanceRecord>
            + ResourceApi<Book>
            + ResourceApi<HostelRoom>
            + ResourceApi<InventoryItem>
            + ResourceApi<Transaction>
            + ResourceApi<Alumnus>
            + ResourceApi<SportsEvent>
            + ResourceApi<Notice>,
    {
        Self {
            students: api.clone(),
            attendance: api.clone(),
            library: api.clone(),
            hostel: api.clone(),
            inventory: api.clone(),
            accounts: api.clone(),
            alumni: api.clone(),
            sports: api.clone(),
            notices: api,
        }
    }
}

impl std::fmt::Debug for DashboardApis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardApis").finish_non_exhaustive()
    }
}

/// Periodically refreshed overview of all modules.
#[derive(Debug)]
pub struct StatusDashboard {
    apis: DashboardApis,
    notifier: Arc<dyn Notifier>,
    snapshot: watch::Sender<Option<DashboardSnapshot>>,
    applied: AtomicU64,
}

impl StatusDashboard {
    /// Create a dashboard with no snapshot yet.
    pub fn new(apis: DashboardApis, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            apis,
            notifier,
            snapshot: watch::Sender::new(None),
            applied: AtomicU64::new(0),
        }
    }

    /// The last applied snapshot, if any.
    pub fn snapshot(&self) -> Option<DashboardSnapshot> {
        self.snapshot.borrow().clone()
    }

    /// Receiver notified every time a snapshot is applied.
    pub fn subscribe(&self) -> watch::Receiver<Option<DashboardSnapshot>> {
        self.snapshot.subscribe()
    }

    /// How many snapshots have been applied.
    pub fn applied_count(&self) -> u64 {
        self.applied.load(Ordering::SeqCst)
    }

    /// Fetch all module stats concurrently. Fails with the first error.
    pub async fn fetch_snapshot(&self) -> AppResult<DashboardSnapshot> {
        let a = &self.apis;
        let (students, attendance, library, hostel, inventory, accounts, alumni, sports, notices) = tokio::try_join!(
            a.students.stats(),
            a.attendance.stats(),
            a.library.stats(),
            a.hostel.stats(),
            a.inventory.stats(),
            a.accounts.stats(),
            a.alumni.stats(),
            a.sports.stats(),
            a.notices.stats(),
        )?;

        Ok(DashboardSnapshot {
            students,
            attendance,
            library,
            hostel,
            inventory,
            accounts,
            alumni,
            sports,
            notices,
            fetched_at: Utc::now(),
        })
    }

    fn apply(&self, snapshot: DashboardSnapshot, cancel: &CancellationToken) -> AppResult<()> {
        // Checked under the channel lock so a superseded run cannot land after a newer one.
        let applied = self.snapshot.send_if_modified(|slot| {
            if cancel.is_cancelled() {
                return false;
            }
            *slot = Some(snapshot);
            true
        });
        if !applied {
            return Err(AppError::cancelled("Dashboard refresh superseded"));
        }
        let applied = self.applied.fetch_add(1, Ordering::SeqCst) + 1;
        info!(applied, "Dashboard snapshot updated");
        Ok(())
    }
}

#[async_trait]
impl RefreshTask for StatusDashboard {
    fn name(&self) -> &str {
        "status_dashboard"
    }

    async fn refresh(&self, cancel: CancellationToken) -> AppResult<()> {
        debug!("Refreshing dashboard");
        match self.fetch_snapshot().await {
            Ok(snapshot) => self.apply(snapshot, &cancel),
            Err(e) if cancel.is_cancelled() => Err(e),
            Err(e) => {
                error!(error = %e, "Failed to load dashboard data");
                self.notifier
                    .notify(Toast::error("Failed to load dashboard data"));
                Err(e)
            }
        }
    }
}

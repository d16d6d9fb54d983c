//! Integration tests for the periodic dashboard refresh.

mod helpers;

use std::sync::Arc;
use std::time::Duration;

use helpers::{SlowApi, roster};

use schoolhub_client::MemoryApi;
use schoolhub_core::traits::ToastLevel;
use schoolhub_entity::{
    Alumnus, AttendanceRecord, Book, HostelRoom, InventoryItem, Notice, SportsEvent, Student,
    Transaction,
};
use schoolhub_view::CollectingNotifier;
use schoolhub_worker::{DashboardApis, RefreshScheduler, StatusDashboard};

struct Harness {
    students: Arc<SlowApi<Student>>,
    books: Arc<MemoryApi<Book>>,
    toasts: Arc<CollectingNotifier>,
    dashboard: Arc<StatusDashboard>,
}

fn harness(delay: Duration) -> Harness {
    let students = SlowApi::new(MemoryApi::with_records(roster(7)), delay);
    let books = Arc::new(MemoryApi::<Book>::new());
    let toasts = Arc::new(CollectingNotifier::new());
    let apis = DashboardApis {
        students: students.clone(),
        attendance: Arc::new(MemoryApi::<AttendanceRecord>::new()),
        library: books.clone(),
        hostel: Arc::new(MemoryApi::<HostelRoom>::new()),
        inventory: Arc::new(MemoryApi::<InventoryItem>::new()),
        accounts: Arc::new(MemoryApi::<Transaction>::new()),
        alumni: Arc::new(MemoryApi::<Alumnus>::new()),
        sports: Arc::new(MemoryApi::<SportsEvent>::new()),
        notices: Arc::new(MemoryApi::<Notice>::new()),
    };
    let dashboard = Arc::new(StatusDashboard::new(apis, toasts.clone()));
    Harness {
        students,
        books,
        toasts,
        dashboard,
    }
}

#[tokio::test(start_paused = true)]
async fn test_refreshes_every_thirty_seconds() {
    let h = harness(Duration::from_millis(200));
    let handle = RefreshScheduler::every_seconds(30).spawn(h.dashboard.clone());

    tokio::time::sleep(Duration::from_secs(1)).await;
    let snapshot = h.dashboard.snapshot().expect("initial snapshot");
    assert_eq!(snapshot.students.total, 7);
    assert_eq!(h.dashboard.applied_count(), 1);

    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(h.dashboard.applied_count(), 3);
    assert_eq!(h.students.stats_calls(), 3);

    handle.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_superseded_responses_are_never_applied() {
    // Each request outlives the interval, so every run is superseded.
    let h = harness(Duration::from_secs(40));
    let handle = RefreshScheduler::every_seconds(30).spawn(h.dashboard.clone());

    tokio::time::sleep(Duration::from_secs(95)).await;
    assert_eq!(h.students.stats_calls(), 4);
    assert_eq!(h.dashboard.applied_count(), 0);
    assert!(h.dashboard.snapshot().is_none());
    assert!(h.toasts.snapshot().is_empty());

    handle.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_cancels_in_flight_request() {
    let h = harness(Duration::from_secs(10));
    let handle = RefreshScheduler::every_seconds(30).spawn(h.dashboard.clone());

    tokio::time::sleep(Duration::from_secs(2)).await;
    handle.shutdown().await.unwrap();

    tokio::time::sleep(Duration::from_secs(300)).await;
    assert_eq!(h.students.stats_calls(), 1);
    assert!(h.dashboard.snapshot().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_failed_tick_keeps_previous_snapshot_and_recovers() {
    let h = harness(Duration::from_millis(10));
    let handle = RefreshScheduler::every_seconds(30).spawn(h.dashboard.clone());

    tokio::time::sleep(Duration::from_secs(1)).await;
    let first = h.dashboard.snapshot().expect("first snapshot");

    h.books.fail_next("library service down");
    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(h.dashboard.snapshot(), Some(first));
    let toasts = h.toasts.drain();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].level, ToastLevel::Error);

    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(h.dashboard.applied_count(), 2);

    handle.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_subscribers_see_each_snapshot() {
    let h = harness(Duration::from_millis(10));
    let mut updates = h.dashboard.subscribe();
    let handle = RefreshScheduler::every_seconds(30).spawn(h.dashboard.clone());

    updates.changed().await.unwrap();
    assert!(updates.borrow_and_update().is_some());

    updates.changed().await.unwrap();
    assert_eq!(h.dashboard.applied_count(), 2);

    handle.shutdown().await.unwrap();
}

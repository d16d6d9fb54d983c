//! Background refresh for the SchoolHub console.
//!
//! This crate provides:
//! - A [`RefreshTask`] trait for work that re-fetches remote state
//! - A [`RefreshScheduler`] that runs a task on a fixed interval and
//!   cancels superseded or outstanding runs
//! - The [`StatusDashboard`] task, which loads every module's stats at once

pub mod dashboard;
pub mod scheduler;
pub mod task;

pub use dashboard::{DashboardApis, DashboardSnapshot, StatusDashboard};
pub use scheduler::{RefreshHandle, RefreshScheduler};
pub use task::RefreshTask;

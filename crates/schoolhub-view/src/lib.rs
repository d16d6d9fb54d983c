//! # schoolhub-view
//!
//! The presentation layer of the SchoolHub console, independent of any
//! particular front end:
//!
//! - [`list`]: the pure filter/paginate transform and the
//!   [`ListViewModel`] holding a screen's filter and page state
//! - [`screen`]: [`ListScreen`], the per-module controller that loads the
//!   collection, drives the create/edit dialog, and reports failures as
//!   toasts
//! - [`export`]: CSV and JSON downloads of the filtered collection
//! - [`notify`]: toast sinks

pub mod export;
pub mod list;
pub mod notify;
pub mod screen;

pub use list::{DerivedView, ListViewModel, filter, filter_partial, paginate};
pub use notify::{ChannelNotifier, CollectingNotifier, TracingNotifier};
pub use screen::{Dialog, DialogMode, ListScreen};

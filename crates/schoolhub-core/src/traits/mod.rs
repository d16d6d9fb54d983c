//! Core traits defined in `schoolhub-core` and implemented by other crates.

pub mod api;
pub mod listable;
pub mod notifier;

pub use api::{Resource, ResourceApi};
pub use listable::Listable;
pub use notifier::{Notifier, Toast, ToastLevel};

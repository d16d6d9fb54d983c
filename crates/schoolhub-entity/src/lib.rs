//! # schoolhub-entity
//!
//! Domain entities for the SchoolHub console modules. Every record type
//! implements [`Listable`](schoolhub_core::traits::Listable) for the list
//! screens and [`Resource`](schoolhub_core::traits::Resource) for the API
//! collaborator, and comes with a validated create draft and a stats shape.
//!
//! Records deserialize leniently (`#[serde(default)]`) because the API may
//! return partially populated rows.

pub mod accounts;
pub mod alumni;
pub mod attendance;
pub mod hostel;
pub mod inventory;
pub mod library;
pub mod notice;
pub mod sports;
pub mod student;

pub(crate) mod util;

pub use accounts::{Transaction, TransactionKind, TransactionStatus};
pub use alumni::{Alumnus, AlumnusStatus};
pub use attendance::{AttendanceRecord, AttendanceStatus};
pub use hostel::{HostelRoom, RoomStatus};
pub use inventory::{InventoryItem, StockStatus};
pub use library::{Book, BookStatus};
pub use notice::{Audience, Notice, NoticeStatus};
pub use sports::{EventStatus, SportsEvent};
pub use student::{Student, StudentStatus};

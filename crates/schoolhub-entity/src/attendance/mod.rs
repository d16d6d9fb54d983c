//! Daily attendance records.

pub mod model;
pub mod status;

pub use model::{AttendanceRecord, AttendanceStats, BulkAttendance, BulkEntry, MarkAttendance};
pub use status::AttendanceStatus;

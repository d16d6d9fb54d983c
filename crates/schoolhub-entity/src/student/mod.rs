//! Student records.

pub mod model;
pub mod status;

pub use model::{CreateStudent, Student, StudentStats};
pub use status::StudentStatus;

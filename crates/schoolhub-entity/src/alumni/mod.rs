//! Alumni directory.

pub mod model;
pub mod status;

pub use model::{AlumniStats, Alumnus, CreateAlumnus};
pub use status::AlumnusStatus;

//! Sports events.

pub mod model;
pub mod status;

pub use model::{CreateEvent, SportsEvent, SportsStats};
pub use status::EventStatus;

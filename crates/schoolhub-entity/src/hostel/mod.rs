//! Hostel rooms and occupancy.

pub mod model;
pub mod status;

pub use model::{CreateRoom, HostelRoom, HostelStats};
pub use status::RoomStatus;

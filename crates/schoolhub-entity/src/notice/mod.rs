//! Notice board announcements.

pub mod model;
pub mod status;

pub use model::{CreateNotice, Notice, NoticeStats};
pub use status::{Audience, NoticeStatus};

//! Library catalogue and lending.

pub mod model;
pub mod status;

pub use model::{Book, CreateBook, IssueBook, LibraryStats, ReturnBook};
pub use status::BookStatus;

//! Core type definitions shared by the SchoolHub crates.

pub mod filter;
pub mod pagination;

pub use filter::{ALL, FieldFilter, FilterState, ListQuery};
pub use pagination::{MAX_PAGE_SIZE, Page, PageState};

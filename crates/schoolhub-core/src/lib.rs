//! # schoolhub-core
//!
//! Core crate for the SchoolHub console. Contains the collaborator traits,
//! configuration schemas, filter and pagination types, form parsing
//! helpers, and the unified error system.
//!
//! This crate has **no** internal dependencies on other SchoolHub crates.

pub mod config;
pub mod error;
pub mod form;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;

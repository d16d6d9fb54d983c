//! # schoolhub-client
//!
//! Implementations of [`ResourceApi`](schoolhub_core::traits::ResourceApi):
//! [`HttpApi`] talks to the school-administration REST API, [`MemoryApi`]
//! keeps records in process for tests and the offline console.

pub mod http;
pub mod memory;
mod rows;
pub mod seed;

pub use http::HttpApi;
pub use memory::MemoryApi;
pub use seed::SeedData;

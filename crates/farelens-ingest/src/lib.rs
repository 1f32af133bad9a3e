//! # farelens-ingest
//!
//! Deal ingestion for FareLens. Defines the [`DealSource`] trait and the
//! two concrete sources: an HTTP client for the external price feed and
//! a seeded in-memory source for local development and tests.

pub mod http;
pub mod memory;
pub mod source;

pub use http::HttpDealSource;
pub use memory::InMemoryDealSource;
pub use source::{DealSource, build_source};

//! # farelens-database
//!
//! PostgreSQL database connection management and concrete repository
//! implementations for FareLens profiles, watchlists, and alert state.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;

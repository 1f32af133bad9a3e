//! # farelens-api
//!
//! The FareLens HTTP surface: curated deal feed, alert history
//! read-back, and health probes. Thin handlers over the engine and
//! repositories; all policy lives below this crate.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;

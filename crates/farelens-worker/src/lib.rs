//! # farelens-worker
//!
//! Scheduled background work for FareLens: the periodic alert scan
//! (curate per user, evaluate admission, dispatch) and the maintenance
//! sweeps over admission state.

pub mod executor;
pub mod jobs;
pub mod scheduler;

pub use executor::{JobHandler, JobRegistry};
pub use scheduler::CronScheduler;

//! # farelens-engine
//!
//! The FareLens deal engine: preference resolution, queue scoring,
//! capacity-constrained curation, alert admission control, and the
//! cached feed pipeline that ties them together.
//!
//! Scoring and curation are pure and run freely in parallel across
//! users. Admission control is the one stateful component; it
//! serializes evaluations per user while keeping different users
//! fully concurrent.

pub mod admission;
pub mod curation;
pub mod dispatch;
pub mod feed;
pub mod preference;
pub mod scoring;

pub use admission::AdmissionController;
pub use curation::Curator;
pub use dispatch::{AlertDispatcher, TracingDispatcher};
pub use feed::FeedService;
pub use preference::PreferenceResolver;
pub use scoring::Scorer;

//! Scheduled job implementations.

pub mod alert_scan;
pub mod counter_purge;
pub mod dedup_sweep;

pub use alert_scan::AlertScanJob;
pub use counter_purge::CounterPurgeJob;
pub use dedup_sweep::DedupSweepJob;

/// Job name for the alert scan cycle.
pub const ALERT_SCAN: &str = "alert_scan";
/// Job name for the duplicate-record sweep.
pub const DEDUP_SWEEP: &str = "dedup_sweep";
/// Job name for the stale-counter purge.
pub const COUNTER_PURGE: &str = "counter_purge";

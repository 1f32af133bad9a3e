//! Alert admission decisions and delivery records.

pub mod decision;
pub mod record;

pub use decision::{AdmissionDecision, DenyReason};
pub use record::AlertRecord;

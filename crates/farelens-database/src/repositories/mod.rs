//! Concrete repository implementations.

pub mod admission;
pub mod alert_history;
pub mod profile;

pub use admission::AdmissionRepository;
pub use alert_history::AlertHistoryRepository;
pub use profile::ProfileRepository;

//! In-memory backends.

pub mod admission;
pub mod store;

pub use admission::MemoryAdmissionStore;
pub use store::MemoryCacheProvider;

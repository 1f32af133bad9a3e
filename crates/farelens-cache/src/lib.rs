//! # farelens-cache
//!
//! Caching layer for FareLens. Provides the in-memory cache backend,
//! the memory-backed admission state store used outside production,
//! centralized cache key construction, and the [`CacheManager`] that
//! selects a provider from configuration.

pub mod keys;
pub mod memory;
pub mod provider;

pub use memory::{MemoryAdmissionStore, MemoryCacheProvider};
pub use provider::CacheManager;

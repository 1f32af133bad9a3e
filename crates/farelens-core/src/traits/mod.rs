//! Trait seams implemented by infrastructure crates.

pub mod admission;
pub mod cache;

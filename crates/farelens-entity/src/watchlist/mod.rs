//! Watchlist entities.

pub mod model;

pub use model::Watchlist;

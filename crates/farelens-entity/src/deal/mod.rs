//! Flight deal entities.

pub mod model;
pub mod ranked;

pub use model::Deal;
pub use ranked::RankedDeal;

//! HTTP request handlers.

pub mod alerts;
pub mod deals;
pub mod health;

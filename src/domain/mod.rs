//! Core domain types and logic.

pub mod trade;
pub mod metrics;
pub mod quality;
pub mod summary;
pub mod error;

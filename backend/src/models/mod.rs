//! Domain models for the fare pricing core

pub mod matrix;
pub mod order;
pub mod tier;

// Re-exports
pub use matrix::{FareMatrixEntry, StationPair};
pub use order::OrderPriceRequest;
pub use tier::DistanceTier;

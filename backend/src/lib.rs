//! Fare Pricing Core - Rust Engine
//!
//! Pure, synchronous fare-pricing resolution for a transit-ticketing system:
//! distance tiers in, station-pair prices and order totals out.
//!
//! # Architecture
//!
//! - **models**: Domain types (DistanceTier, FareMatrixEntry, OrderPriceRequest)
//! - **tariff**: Tier table, overlap validation, and price resolution
//! - **projector**: Fare matrix materialization and regeneration
//! - **checkout**: Order total calculation (single trip, time-based, upgrade)
//! - **engine**: Coordinating layer sequencing validate-then-regenerate
//!
//! # Critical Invariants
//!
//! 1. All money values are i64 (minor currency units)
//! 2. Active tiers never overlap; the table enforces it on every mutation
//! 3. Distance comparisons happen at meter precision
//! 4. The fare matrix is a derived cache, soft-deactivated on coverage loss,
//!    never hand-edited
//! 5. No I/O, no clocks, no locking: callers pass in materialized inputs and
//!    timestamps, and serialize writers

// Module declarations
pub mod checkout;
pub mod engine;
pub mod models;
pub mod projector;
pub mod tariff;

// Re-exports for convenience
pub use checkout::{compute_total, OrderError, UpgradeQuote};
pub use engine::{FareEngine, TierChangeOutcome};
pub use models::{
    matrix::{FareMatrixEntry, StationPair},
    order::OrderPriceRequest,
    tier::DistanceTier,
};
pub use projector::{regenerate, regenerate_within, RegenerationResult, UnresolvedPair};
pub use tariff::{
    resolver::{resolve, ResolveError},
    TierError, TierTable,
};

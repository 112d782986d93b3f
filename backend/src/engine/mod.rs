//! Fare engine - coordinating layer over table, projector, and matrix
//!
//! Owns an in-memory snapshot of the fare schedule (tier table), the station
//! distance pairs, and the materialized fare matrix, and sequences the
//! validate-then-regenerate pair that every tier change requires.
//!
//! # Atomicity
//!
//! A tier change is applied to a **clone** of the table; the matrix is
//! regenerated against that clone; only when both succeed are table and
//! matrix swapped into the engine together. A reader holding an engine
//! snapshot therefore observes either the full pre-edit state or the full
//! post-edit state, never a table that violates the non-overlap invariant or
//! a matrix inconsistent with its table.
//!
//! The engine provides no locking: callers serialize writers (single admin
//! session or a server-side transaction). Concurrent readers clone the
//! engine or its parts.
//!
//! # Scoped regeneration
//!
//! A tier edit can only re-price distances inside the union of the tier's
//! old and new brackets, so [`FareEngine::apply_tier_change`] regenerates
//! within that range only. Everything else passes through untouched.

use crate::models::matrix::{FareMatrixEntry, StationPair};
use crate::models::tier::DistanceTier;
use crate::projector::{self, RegenerationResult};
use crate::tariff::resolver::ResolveError;
use crate::tariff::{TierError, TierTable};
use chrono::{DateTime, Utc};
use log::debug;

/// Outcome of a tier change applied through the engine
#[derive(Debug, Clone, PartialEq)]
pub struct TierChangeOutcome {
    /// The stored tier after the change
    pub tier: DistanceTier,

    /// The regeneration the change triggered
    pub regeneration: RegenerationResult,
}

/// In-memory fare pricing state: tier table + station pairs + fare matrix
///
/// # Example
/// ```
/// use chrono::Utc;
/// use fare_engine_core_rs::{DistanceTier, FareEngine, StationPair, TierTable};
///
/// let pairs = vec![StationPair::new("ST_01", "ST_02", 7.2)];
/// let mut engine = FareEngine::new(TierTable::new(), pairs);
///
/// let outcome = engine
///     .apply_tier_change(DistanceTier::new(5.0, 10.0, 8_000), Utc::now())
///     .unwrap();
/// assert!(outcome.regeneration.is_fully_resolved());
/// assert_eq!(engine.quote("ST_01", "ST_02"), Ok(8_000));
/// ```
#[derive(Debug, Clone)]
pub struct FareEngine {
    /// Current fare schedule
    table: TierTable,

    /// Station pairs with distances, supplied by the route network
    pairs: Vec<StationPair>,

    /// Materialized fare matrix, owned and regenerated by the engine
    matrix: Vec<FareMatrixEntry>,
}

impl FareEngine {
    /// Create an engine with an empty matrix
    ///
    /// The matrix materializes on the first tier change, or immediately via
    /// [`refresh_matrix`](Self::refresh_matrix).
    pub fn new(table: TierTable, pairs: Vec<StationPair>) -> Self {
        Self {
            table,
            pairs,
            matrix: Vec::new(),
        }
    }

    /// Rebuild an engine from persisted parts
    ///
    /// Tiers are re-validated on load; a tier set violating the non-overlap
    /// invariant is rejected rather than trusted.
    pub fn from_parts(
        tiers: Vec<DistanceTier>,
        pairs: Vec<StationPair>,
        matrix: Vec<FareMatrixEntry>,
    ) -> Result<Self, TierError> {
        Ok(Self {
            table: TierTable::from_tiers(tiers)?,
            pairs,
            matrix,
        })
    }

    /// Validate a tier change and regenerate the affected matrix slice
    ///
    /// Sequencing per the change contract: validate against the current
    /// table, then regenerate, then swap both in together. On any validation
    /// error the engine is untouched.
    ///
    /// Regeneration is scoped to the union of the tier's previous bracket
    /// (when editing) and its new bracket; only distances there can resolve
    /// differently.
    pub fn apply_tier_change(
        &mut self,
        candidate: DistanceTier,
        now: DateTime<Utc>,
    ) -> Result<TierChangeOutcome, TierError> {
        let previous_bounds = self
            .table
            .get(candidate.id())
            .map(|tier| (tier.min_distance_km(), tier.max_distance_km()));
        let candidate_bounds = (candidate.min_distance_km(), candidate.max_distance_km());

        let mut table = self.table.clone();
        let tier = table.validate_and_upsert(candidate)?.clone();

        let (lo, hi) = union_bounds(candidate_bounds, previous_bounds);
        let regeneration =
            projector::regenerate_within(lo, hi, &self.pairs, &table, &self.matrix, now);

        debug!(
            "tier change {} applied to [{}, {}) km: {} matrix entries changed",
            tier.id(),
            lo,
            hi,
            regeneration.changed
        );

        // Whole-snapshot swap: readers never see table and matrix disagree
        self.table = table;
        self.matrix = regeneration.entries.clone();

        Ok(TierChangeOutcome { tier, regeneration })
    }

    /// Soft-disable a tier and regenerate its bracket
    ///
    /// Pairs priced by the deactivated tier lose coverage (unless another
    /// active tier spans the same distances) and their matrix entries are
    /// soft-deactivated by the projector.
    pub fn deactivate_tier(
        &mut self,
        tier_id: &str,
        now: DateTime<Utc>,
    ) -> Result<TierChangeOutcome, TierError> {
        let mut table = self.table.clone();
        let tier = table.deactivate(tier_id)?.clone();

        let regeneration = projector::regenerate_within(
            tier.min_distance_km(),
            tier.max_distance_km(),
            &self.pairs,
            &table,
            &self.matrix,
            now,
        );

        self.table = table;
        self.matrix = regeneration.entries.clone();

        Ok(TierChangeOutcome { tier, regeneration })
    }

    /// Fully rematerialize the matrix against the current table
    ///
    /// Used after loading persisted state or replacing the station pairs;
    /// idempotent like the underlying projector.
    pub fn refresh_matrix(&mut self, now: DateTime<Utc>) -> RegenerationResult {
        let regeneration = projector::regenerate(&self.pairs, &self.table, &self.matrix, now);
        self.matrix = regeneration.entries.clone();
        regeneration
    }

    /// Replace the station pairs (route network changed) and rematerialize
    pub fn set_pairs(&mut self, pairs: Vec<StationPair>, now: DateTime<Utc>) -> RegenerationResult {
        self.pairs = pairs;
        self.refresh_matrix(now)
    }

    /// Fare for a station pair from the materialized matrix
    ///
    /// A missing or soft-deactivated entry is an error, never a silent
    /// fallback: a stale fare must surface before checkout, not price a
    /// ticket from a second source of truth.
    pub fn quote(&self, start_station_id: &str, end_station_id: &str) -> Result<i64, ResolveError> {
        self.matrix
            .iter()
            .find(|entry| entry.matches_pair(start_station_id, end_station_id))
            .filter(|entry| entry.is_active())
            .map(|entry| entry.price())
            .ok_or_else(|| ResolveError::NoFareForPair {
                start_station_id: start_station_id.to_string(),
                end_station_id: end_station_id.to_string(),
            })
    }

    /// Current fare schedule
    pub fn table(&self) -> &TierTable {
        &self.table
    }

    /// Station pairs the matrix is derived from
    pub fn pairs(&self) -> &[StationPair] {
        &self.pairs
    }

    /// Current materialized matrix
    pub fn matrix(&self) -> &[FareMatrixEntry] {
        &self.matrix
    }
}

/// Union of the candidate bracket with the (optional) previous bracket
fn union_bounds(new: (f64, f64), previous: Option<(f64, f64)>) -> (f64, f64) {
    match previous {
        Some((p_min, p_max)) => (new.0.min(p_min), new.1.max(p_max)),
        None => new,
    }
}

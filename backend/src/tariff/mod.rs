//! Distance tier table and validation
//!
//! The tier table is the fare schedule: the set of administrator-defined
//! distance brackets with prices. All mutation goes through
//! [`TierTable::validate_and_upsert`] and [`TierTable::deactivate`], which
//! guard the table's one hard invariant.
//!
//! # Critical Invariants
//!
//! 1. No two **active** tiers intersect: for any active A, B,
//!    `[A.min, A.max)` and `[B.min, B.max)` are disjoint. Adjacent brackets
//!    (`A.max == B.min`) are legal.
//! 2. Every stored tier has `min >= 0`, `max > min`, `price > 0`
//!    (at meter precision for the bounds).
//! 3. Tiers are never physically deleted; deactivation flips `is_active`
//!    and the tier stays for audit.
//! 4. Tiers are kept sorted by lower bound, so iteration order is
//!    deterministic and independent of insertion order.
//!
//! Validation failures are recoverable [`TierError`]s carrying what the admin
//! form needs to display, including the conflicting tier's bounds on overlap.

pub mod resolver;

use crate::models::tier::DistanceTier;
use resolver::{round_to_meters, ResolveError};
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur validating or mutating the tier table
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TierError {
    #[error("Invalid distance range [{min_distance_km}, {max_distance_km}): lower bound must be >= 0 and below the upper bound")]
    InvalidRange {
        min_distance_km: f64,
        max_distance_km: f64,
    },

    #[error("Invalid price {price}: must be positive")]
    InvalidPrice { price: i64 },

    #[error("Range overlaps existing tier {conflicting_tier_id} [{conflicting_min_km}, {conflicting_max_km})")]
    OverlappingRange {
        conflicting_tier_id: String,
        conflicting_min_km: f64,
        conflicting_max_km: f64,
    },

    #[error("Unknown tier {tier_id}")]
    UnknownTier { tier_id: String },
}

/// The fare schedule: an ordered set of non-overlapping distance tiers
///
/// # Example
/// ```
/// use fare_engine_core_rs::{DistanceTier, TierTable};
///
/// let mut table = TierTable::new();
/// table.validate_and_upsert(DistanceTier::new(0.0, 5.0, 6_000)).unwrap();
/// table.validate_and_upsert(DistanceTier::new(5.0, 10.0, 8_000)).unwrap();
///
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.resolve(7.2), Ok(8_000));
///
/// // [8, 15) intersects [5, 10): rejected, table unchanged
/// assert!(table.validate_and_upsert(DistanceTier::new(8.0, 15.0, 9_000)).is_err());
/// assert_eq!(table.len(), 2);
/// ```
// Serialize only: deserialization goes through `from_tiers` so a stored
// table is re-validated on load instead of trusted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TierTable {
    /// All tiers, active and inactive, sorted by lower bound
    tiers: Vec<DistanceTier>,
}

impl TierTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self { tiers: Vec::new() }
    }

    /// Build a table from tiers fetched from persistence
    ///
    /// Validates every tier as if it were inserted through
    /// [`validate_and_upsert`](Self::validate_and_upsert), so a corrupted or
    /// hand-edited upstream tier set is rejected instead of silently loaded.
    pub fn from_tiers(tiers: Vec<DistanceTier>) -> Result<Self, TierError> {
        let mut table = Self::new();
        for tier in tiers {
            table.validate_and_upsert(tier)?;
        }
        Ok(table)
    }

    /// Validate a candidate tier and insert or replace it
    ///
    /// The candidate's id decides insert vs. edit: if a stored tier carries
    /// the same id it is replaced, otherwise the candidate is inserted. On
    /// edit the stored tier is excluded from the overlap check, so a no-op
    /// edit that keeps the old bounds always passes.
    ///
    /// Checks, in order:
    /// - bounds: `min >= 0` and `max > min` at meter precision
    ///   ([`TierError::InvalidRange`]);
    /// - price: `> 0` ([`TierError::InvalidPrice`]);
    /// - overlap against every **other** active tier
    ///   ([`TierError::OverlappingRange`], naming the first conflict).
    ///
    /// An inactive candidate skips the overlap check (it takes no part in
    /// resolution) but its bounds and price are still validated.
    ///
    /// On failure the table is untouched. On success the stored tier is
    /// returned.
    pub fn validate_and_upsert(
        &mut self,
        candidate: DistanceTier,
    ) -> Result<&DistanceTier, TierError> {
        let min = round_to_meters(candidate.min_distance_km());
        let max = round_to_meters(candidate.max_distance_km());

        if !(min >= 0.0 && max > min) {
            return Err(TierError::InvalidRange {
                min_distance_km: candidate.min_distance_km(),
                max_distance_km: candidate.max_distance_km(),
            });
        }
        if candidate.price() <= 0 {
            return Err(TierError::InvalidPrice {
                price: candidate.price(),
            });
        }

        if candidate.is_active() {
            if let Some(conflict) = self.find_overlap(min, max, Some(candidate.id())) {
                return Err(TierError::OverlappingRange {
                    conflicting_tier_id: conflict.id().to_string(),
                    conflicting_min_km: conflict.min_distance_km(),
                    conflicting_max_km: conflict.max_distance_km(),
                });
            }
        }

        // Replace on id match, insert otherwise; keep sort order by lower bound
        self.tiers.retain(|tier| tier.id() != candidate.id());
        let at = self
            .tiers
            .partition_point(|tier| tier.min_distance_km() < candidate.min_distance_km());
        self.tiers.insert(at, candidate);

        Ok(&self.tiers[at])
    }

    /// Soft-disable a tier by id
    ///
    /// The tier stays in the table for audit but stops participating in
    /// resolution and overlap checks. Returns [`TierError::UnknownTier`] if
    /// no tier has the given id.
    pub fn deactivate(&mut self, tier_id: &str) -> Result<&DistanceTier, TierError> {
        let tier = self
            .tiers
            .iter_mut()
            .find(|tier| tier.id() == tier_id)
            .ok_or_else(|| TierError::UnknownTier {
                tier_id: tier_id.to_string(),
            })?;
        tier.set_active(false);
        Ok(tier)
    }

    /// Resolve a distance against this table's active tiers
    ///
    /// See [`resolver::resolve`] for semantics.
    pub fn resolve(&self, distance_km: f64) -> Result<i64, ResolveError> {
        resolver::resolve(distance_km, &self.tiers)
    }

    /// Get a tier by id
    pub fn get(&self, tier_id: &str) -> Option<&DistanceTier> {
        self.tiers.iter().find(|tier| tier.id() == tier_id)
    }

    /// All tiers, active and inactive, sorted by lower bound
    pub fn tiers(&self) -> &[DistanceTier] {
        &self.tiers
    }

    /// Active tiers only, sorted by lower bound
    pub fn active_tiers(&self) -> impl Iterator<Item = &DistanceTier> {
        self.tiers.iter().filter(|tier| tier.is_active())
    }

    /// Number of stored tiers (active and inactive)
    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    /// True if no tiers are stored
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// First active tier intersecting `[min, max)`, excluding `exclude_id`
    ///
    /// Intersection test for half-open intervals:
    /// `max(a.min, b.min) < min(a.max, b.max)`.
    fn find_overlap(
        &self,
        min: f64,
        max: f64,
        exclude_id: Option<&str>,
    ) -> Option<&DistanceTier> {
        self.tiers
            .iter()
            .filter(|tier| tier.is_active())
            .filter(|tier| exclude_id != Some(tier.id()))
            .find(|tier| {
                let e_min = round_to_meters(tier.min_distance_km());
                let e_max = round_to_meters(tier.max_distance_km());
                min.max(e_min) < max.min(e_max)
            })
    }
}

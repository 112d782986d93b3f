//! Fare matrix projector
//!
//! Derives the pairwise station price table from station-pair distances plus
//! the tier table, and keeps it current when tiers change. The matrix is a
//! materialized cache: every active entry's price equals the tier resolution
//! of its distance as of the last regeneration.
//!
//! # Partial-failure policy
//!
//! One uncovered distance must never abort regeneration of the other pairs.
//! When a pair's distance has no covering active tier, its existing entry is
//! soft-deactivated (price kept for inspection) and the pair is recorded in
//! [`RegenerationResult::unresolved`]; pairs with no prior entry are only
//! recorded. Unresolved pairs are also logged at `warn` so operators see
//! coverage gaps before customers do.
//!
//! # Idempotence
//!
//! Entries keep their id and `created_at` across regenerations, and
//! `updated_at` is stamped only when price or active flag actually changes.
//! Running regeneration twice with unchanged inputs therefore produces
//! byte-identical entries, timestamps included.
//!
//! # Critical Invariants
//!
//! 1. Exactly one entry per station pair: ids are stable across runs.
//! 2. No entry is ever deleted by regeneration; loss of coverage
//!    deactivates.
//! 3. Previous entries whose pair is absent from the input are carried
//!    through untouched (station CRUD is an external concern).

use crate::models::matrix::{FareMatrixEntry, StationPair};
use crate::tariff::resolver::{round_to_meters, ResolveError};
use crate::tariff::TierTable;
use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// A station pair that no active tier could price
///
/// Surfaced to administrators so coverage gaps are discoverable; mirrors the
/// pair that was submitted, not the (possibly absent) matrix entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnresolvedPair {
    pub start_station_id: String,
    pub end_station_id: String,
    pub distance_km: f64,
}

/// Outcome of a matrix regeneration
#[derive(Debug, Clone, PartialEq)]
pub struct RegenerationResult {
    /// The full regenerated matrix: recomputed entries plus carried-over
    /// previous entries whose pair was not in the input
    pub entries: Vec<FareMatrixEntry>,

    /// Pairs with no covering active tier, in input order
    pub unresolved: Vec<UnresolvedPair>,

    /// Number of entries whose price or active flag changed
    pub changed: usize,
}

impl RegenerationResult {
    /// True if every pair resolved to a price
    pub fn is_fully_resolved(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Regenerate the fare matrix for every station pair
///
/// For each pair, resolves its distance against the table's active tiers and
/// upserts the matching entry. `now` stamps entries that changed; the caller
/// supplies the clock.
///
/// # Example
/// ```
/// use chrono::Utc;
/// use fare_engine_core_rs::projector::regenerate;
/// use fare_engine_core_rs::{DistanceTier, StationPair, TierTable};
///
/// let table = TierTable::from_tiers(vec![
///     DistanceTier::new(0.0, 5.0, 6_000),
///     DistanceTier::new(5.0, 10.0, 8_000),
/// ]).unwrap();
///
/// let pairs = vec![
///     StationPair::new("ST_01", "ST_02", 3.4),
///     StationPair::new("ST_01", "ST_03", 7.2),
///     StationPair::new("ST_01", "ST_04", 42.0), // nothing covers this
/// ];
///
/// let result = regenerate(&pairs, &table, &[], Utc::now());
/// assert_eq!(result.entries.len(), 2);
/// assert_eq!(result.unresolved.len(), 1);
/// assert_eq!(result.entries[0].price(), 6_000);
/// assert_eq!(result.entries[1].price(), 8_000);
/// ```
pub fn regenerate(
    pairs: &[StationPair],
    table: &TierTable,
    previous: &[FareMatrixEntry],
    now: DateTime<Utc>,
) -> RegenerationResult {
    regenerate_filtered(pairs, table, previous, now, |_| true)
}

/// Regenerate only the pairs whose distance lies in `[min_km, max_km)`
///
/// Scoped variant for tier edits: only distances inside the changed bracket
/// can have a different resolution, so everything outside the range is
/// carried through untouched. Bounds are compared at meter precision, like
/// resolution itself.
pub fn regenerate_within(
    min_km: f64,
    max_km: f64,
    pairs: &[StationPair],
    table: &TierTable,
    previous: &[FareMatrixEntry],
    now: DateTime<Utc>,
) -> RegenerationResult {
    let (lo, hi) = (round_to_meters(min_km), round_to_meters(max_km));
    regenerate_filtered(pairs, table, previous, now, |pair| {
        let d = round_to_meters(pair.distance_km);
        lo <= d && d < hi
    })
}

fn regenerate_filtered(
    pairs: &[StationPair],
    table: &TierTable,
    previous: &[FareMatrixEntry],
    now: DateTime<Utc>,
    in_scope: impl Fn(&StationPair) -> bool,
) -> RegenerationResult {
    let mut entries: Vec<FareMatrixEntry> = previous.to_vec();
    let mut unresolved = Vec::new();
    let mut changed = 0;

    for pair in pairs {
        if !in_scope(pair) {
            continue;
        }

        let existing = entries
            .iter()
            .position(|entry| entry.matches_pair(&pair.start_station_id, &pair.end_station_id));

        match table.resolve(pair.distance_km) {
            Ok(price) => match existing {
                Some(at) => {
                    if entries[at].apply_resolution(pair.distance_km, price, true, now) {
                        changed += 1;
                    }
                }
                None => {
                    entries.push(FareMatrixEntry::new(
                        pair.start_station_id.clone(),
                        pair.end_station_id.clone(),
                        pair.distance_km,
                        price,
                        now,
                    ));
                    changed += 1;
                }
            },
            Err(ResolveError::NoTierForDistance { .. }) => {
                warn!(
                    "no active tier covers {} km ({} -> {}); fare marked unresolved",
                    pair.distance_km, pair.start_station_id, pair.end_station_id
                );
                if let Some(at) = existing {
                    if entries[at].deactivate(now) {
                        changed += 1;
                    }
                }
                unresolved.push(UnresolvedPair {
                    start_station_id: pair.start_station_id.clone(),
                    end_station_id: pair.end_station_id.clone(),
                    distance_km: pair.distance_km,
                });
            }
            // resolve() by distance only emits NoTierForDistance
            Err(_) => unreachable!("distance resolution has no other failure mode"),
        }
    }

    debug!(
        "matrix regeneration: {} pairs in, {} entries out, {} changed, {} unresolved",
        pairs.len(),
        entries.len(),
        changed,
        unresolved.len()
    );

    RegenerationResult {
        entries,
        unresolved,
        changed,
    }
}

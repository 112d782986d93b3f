//! Price resolution: distance → fare
//!
//! Maps a travel distance to the price of the active tier covering it. The
//! tier table's non-overlap invariant guarantees at most one covering tier,
//! so the first match is the only match and no tie-break is needed.
//!
//! Distances are compared at meter precision (3 decimal places). Tier edges
//! are exact administrative values like 5.0 km, while distances arrive from
//! floating-point route-length sums; rounding both sides before comparison
//! keeps a trip of 4.9999999 km inside the `[0, 5)` bracket instead of
//! flapping across the edge.
//!
//! The resolver never invents a price: an uncovered distance is an error the
//! caller decides how to handle (the projector soft-deactivates the matrix
//! entry, the admin UI shows the gap).
//!
//! Tier counts are small (administrative data entry), so resolution is a
//! linear scan. If tables ever grow, the table is already kept sorted by
//! lower bound and this can switch to a binary search.

use crate::models::tier::DistanceTier;
use thiserror::Error;

/// Errors that can occur during fare resolution
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ResolveError {
    #[error("No active tier covers distance {distance_km} km")]
    NoTierForDistance { distance_km: f64 },

    #[error("No active fare for station pair {start_station_id} -> {end_station_id}")]
    NoFareForPair {
        start_station_id: String,
        end_station_id: String,
    },
}

/// Round a distance in kilometers to meter precision
///
/// All boundary comparisons in the crate go through this helper so tier
/// validation and price resolution agree on where an edge lies.
///
/// # Example
/// ```
/// use fare_engine_core_rs::tariff::resolver::round_to_meters;
///
/// assert_eq!(round_to_meters(4.9999999), 5.0);
/// assert_eq!(round_to_meters(7.2001), 7.2);
/// ```
pub fn round_to_meters(km: f64) -> f64 {
    (km * 1000.0).round() / 1000.0
}

/// Resolve a distance to a fare using the active tiers of a table
///
/// Finds the active tier whose `[min, max)` bracket covers `distance_km`
/// (at meter precision) and returns its price. Inactive tiers are skipped.
///
/// # Example
/// ```
/// use fare_engine_core_rs::tariff::resolver::resolve;
/// use fare_engine_core_rs::DistanceTier;
///
/// let tiers = vec![
///     DistanceTier::new(0.0, 5.0, 6_000),
///     DistanceTier::new(5.0, 10.0, 8_000),
/// ];
///
/// assert_eq!(resolve(7.2, &tiers), Ok(8_000));
/// assert_eq!(resolve(5.0, &tiers), Ok(8_000)); // lower bound inclusive
/// assert!(resolve(25.0, &tiers).is_err());
/// ```
pub fn resolve(distance_km: f64, tiers: &[DistanceTier]) -> Result<i64, ResolveError> {
    let d = round_to_meters(distance_km);

    tiers
        .iter()
        .filter(|tier| tier.is_active())
        .find(|tier| {
            round_to_meters(tier.min_distance_km()) <= d
                && d < round_to_meters(tier.max_distance_km())
        })
        .map(|tier| tier.price())
        .ok_or(ResolveError::NoTierForDistance { distance_km })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule() -> Vec<DistanceTier> {
        vec![
            DistanceTier::new(0.0, 5.0, 6_000),
            DistanceTier::new(5.0, 10.0, 8_000),
            DistanceTier::new(10.0, 20.0, 12_000),
        ]
    }

    #[test]
    fn test_resolve_inside_bracket() {
        assert_eq!(resolve(7.2, &schedule()), Ok(8_000));
        assert_eq!(resolve(0.0, &schedule()), Ok(6_000));
        assert_eq!(resolve(19.999, &schedule()), Ok(12_000));
    }

    #[test]
    fn test_lower_bound_inclusive_upper_exclusive() {
        let tiers = schedule();
        assert_eq!(resolve(5.0, &tiers), Ok(8_000));
        assert_eq!(resolve(10.0, &tiers), Ok(12_000));
        assert_eq!(
            resolve(20.0, &tiers),
            Err(ResolveError::NoTierForDistance { distance_km: 20.0 })
        );
    }

    #[test]
    fn test_uncovered_distance_errors() {
        assert_eq!(
            resolve(25.0, &schedule()),
            Err(ResolveError::NoTierForDistance { distance_km: 25.0 })
        );
    }

    #[test]
    fn test_inactive_tiers_skipped() {
        let tiers = vec![
            DistanceTier::new(0.0, 5.0, 6_000).deactivated(),
            DistanceTier::new(0.0, 5.0, 7_000),
        ];
        assert_eq!(resolve(2.0, &tiers), Ok(7_000));
    }

    #[test]
    fn test_meter_precision_at_edge() {
        // Floating-point noise just below the edge rounds onto it, landing
        // in the upper bracket.
        assert_eq!(resolve(4.9999999, &schedule()), Ok(8_000));
        // A genuine sub-meter distance below the edge stays in the lower one.
        assert_eq!(resolve(4.999, &schedule()), Ok(6_000));
    }

    #[test]
    fn test_empty_table() {
        assert!(resolve(1.0, &[]).is_err());
    }
}

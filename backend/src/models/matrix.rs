//! Fare matrix model
//!
//! The fare matrix is the materialized price table per station pair. Each
//! entry caches the result of resolving the pair's distance against the tier
//! table at the time of last regeneration — it is never an independent source
//! of truth. The [`projector`](crate::projector) owns regeneration; entries
//! whose distance loses tier coverage are soft-deactivated, not deleted, so
//! missing fares stay visible to administrators.
//!
//! Timestamps are wall-clock `DateTime<Utc>` values supplied by the caller;
//! the core never reads system time.
//!
//! CRITICAL: All money values are i64 (minor currency units)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A station pair with its travel distance, input row for regeneration
///
/// Distances come from the route network (an external collaborator); the
/// projector only consumes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationPair {
    /// Origin station identifier
    pub start_station_id: String,

    /// Destination station identifier
    pub end_station_id: String,

    /// Travel distance between the two stations, kilometers
    pub distance_km: f64,
}

impl StationPair {
    /// Create a station pair
    ///
    /// # Example
    /// ```
    /// use fare_engine_core_rs::StationPair;
    ///
    /// let pair = StationPair::new("ST_01", "ST_02", 7.2);
    /// assert_eq!(pair.distance_km, 7.2);
    /// ```
    pub fn new(
        start_station_id: impl Into<String>,
        end_station_id: impl Into<String>,
        distance_km: f64,
    ) -> Self {
        Self {
            start_station_id: start_station_id.into(),
            end_station_id: end_station_id.into(),
            distance_km,
        }
    }
}

/// One materialized fare: the cached price for a station pair
///
/// `price` must equal the tier resolution of `distance_in_km` as of the last
/// regeneration. An inactive entry records a pair whose distance currently
/// has no covering tier; its price is the last known fare, kept for
/// administrator inspection rather than zeroed.
///
/// # Example
/// ```
/// use chrono::Utc;
/// use fare_engine_core_rs::FareMatrixEntry;
///
/// let now = Utc::now();
/// let entry = FareMatrixEntry::new("ST_01", "ST_02", 7.2, 8_000, now);
/// assert!(entry.is_active());
/// assert_eq!(entry.price(), 8_000);
/// assert_eq!(entry.created_at(), entry.updated_at());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FareMatrixEntry {
    /// Unique entry identifier (UUID)
    id: String,

    /// Origin station identifier
    start_station_id: String,

    /// Destination station identifier
    end_station_id: String,

    /// Travel distance used for the last resolution, kilometers
    distance_in_km: f64,

    /// Cached fare (i64 minor units)
    price: i64,

    /// False when the distance had no covering tier at last regeneration
    is_active: bool,

    /// When the entry was first materialized
    created_at: DateTime<Utc>,

    /// When price or active flag last changed
    updated_at: DateTime<Utc>,
}

impl FareMatrixEntry {
    /// Materialize a new active entry with a freshly assigned id
    pub fn new(
        start_station_id: impl Into<String>,
        end_station_id: impl Into<String>,
        distance_in_km: f64,
        price: i64,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            start_station_id: start_station_id.into(),
            end_station_id: end_station_id.into(),
            distance_in_km,
            price,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Entry identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Origin station identifier
    pub fn start_station_id(&self) -> &str {
        &self.start_station_id
    }

    /// Destination station identifier
    pub fn end_station_id(&self) -> &str {
        &self.end_station_id
    }

    /// Distance used for the last resolution, kilometers
    pub fn distance_in_km(&self) -> f64 {
        self.distance_in_km
    }

    /// Cached fare (i64 minor units)
    pub fn price(&self) -> i64 {
        self.price
    }

    /// Whether the cached fare is currently backed by an active tier
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// When the entry was first materialized
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When price or active flag last changed
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// True if this entry materializes the given pair
    pub fn matches_pair(&self, start_station_id: &str, end_station_id: &str) -> bool {
        self.start_station_id == start_station_id && self.end_station_id == end_station_id
    }

    /// Apply a regeneration outcome in place
    ///
    /// Updates distance, price, and active flag; stamps `updated_at` only if
    /// price or active flag actually changed, so re-running an unchanged
    /// regeneration leaves the entry byte-identical.
    ///
    /// Returns true if the entry changed.
    pub(crate) fn apply_resolution(
        &mut self,
        distance_in_km: f64,
        price: i64,
        is_active: bool,
        now: DateTime<Utc>,
    ) -> bool {
        let changed =
            self.price != price || self.is_active != is_active || self.distance_in_km != distance_in_km;
        if changed {
            self.distance_in_km = distance_in_km;
            self.price = price;
            self.is_active = is_active;
            self.updated_at = now;
        }
        changed
    }

    /// Soft-deactivate the entry, keeping the last known price
    ///
    /// Returns true if the entry changed (was previously active).
    pub(crate) fn deactivate(&mut self, now: DateTime<Utc>) -> bool {
        if self.is_active {
            self.is_active = false;
            self.updated_at = now;
            true
        } else {
            false
        }
    }
}

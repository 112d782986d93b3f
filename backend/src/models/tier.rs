//! Distance tier model
//!
//! A tier is an administrator-defined distance bracket `[min, max)` in
//! kilometers with an associated price. The active tiers of a table form the
//! fare schedule: a trip's price is the price of the tier covering its
//! distance.
//!
//! Tiers are soft-disabled (`is_active = false`) rather than deleted, so past
//! fare schedules remain auditable. Inactive tiers take no part in resolution
//! or overlap validation.
//!
//! CRITICAL: All money values are i64 (minor currency units)

use serde::{Deserialize, Serialize};

/// An administrator-defined distance bracket with a price
///
/// The interval is half-open: `min_distance_km` is inclusive,
/// `max_distance_km` is exclusive. Two tiers may be adjacent
/// (`a.max == b.min`) without conflicting.
///
/// Bounds and prices supplied by administrators are **not** validated here;
/// validation happens when the tier is submitted to a
/// [`TierTable`](crate::tariff::TierTable), which reports malformed values as
/// recoverable [`TierError`](crate::tariff::TierError)s for form display.
///
/// # Example
/// ```
/// use fare_engine_core_rs::DistanceTier;
///
/// let tier = DistanceTier::new(0.0, 5.0, 6_000);
/// assert_eq!(tier.price(), 6_000);
/// assert!(tier.is_active());
/// assert!(!tier.id().is_empty()); // uuid assigned on creation
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceTier {
    /// Unique tier identifier (UUID)
    id: String,

    /// Inclusive lower bound of the bracket, kilometers
    min_distance_km: f64,

    /// Exclusive upper bound of the bracket, kilometers
    max_distance_km: f64,

    /// Price for any distance inside the bracket (i64 minor units)
    price: i64,

    /// Whether this tier participates in resolution
    is_active: bool,
}

impl DistanceTier {
    /// Create a new active tier with a freshly assigned id
    ///
    /// # Example
    /// ```
    /// use fare_engine_core_rs::DistanceTier;
    ///
    /// let tier = DistanceTier::new(5.0, 10.0, 8_000);
    /// assert_eq!(tier.min_distance_km(), 5.0);
    /// assert_eq!(tier.max_distance_km(), 10.0);
    /// ```
    pub fn new(min_distance_km: f64, max_distance_km: f64, price: i64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            min_distance_km,
            max_distance_km,
            price,
            is_active: true,
        }
    }

    /// Replace the assigned id (builder style)
    ///
    /// Used when editing an existing tier: the candidate carries the id of
    /// the tier it replaces so the validator can exclude it from the overlap
    /// check.
    ///
    /// # Example
    /// ```
    /// use fare_engine_core_rs::DistanceTier;
    ///
    /// let tier = DistanceTier::new(0.0, 5.0, 6_000).with_id("tier-1");
    /// assert_eq!(tier.id(), "tier-1");
    /// ```
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Mark the tier inactive (builder style)
    pub fn deactivated(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Tier identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Inclusive lower bound, kilometers
    pub fn min_distance_km(&self) -> f64 {
        self.min_distance_km
    }

    /// Exclusive upper bound, kilometers
    pub fn max_distance_km(&self) -> f64 {
        self.max_distance_km
    }

    /// Bracket price (i64 minor units)
    pub fn price(&self) -> i64 {
        self.price
    }

    /// Whether this tier participates in resolution
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Set the active flag in place
    pub fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }
}

//! Order pricing request model
//!
//! The request the checkout flow hands to the price calculator. A request is
//! a pure function input: it consumes tier/matrix prices but owns no pricing
//! state of its own.
//!
//! CRITICAL: All money values are i64 (minor currency units)

use serde::{Deserialize, Serialize};

/// What the checkout flow wants priced
///
/// Serialized with a `kind` tag so the remote API's order payloads map onto
/// it directly.
///
/// # Example
/// ```
/// use fare_engine_core_rs::OrderPriceRequest;
///
/// let request = OrderPriceRequest::SingleTrip {
///     unit_price: 6_000,
///     quantity: 3,
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OrderPriceRequest {
    /// One or more single-trip tickets at a distance-resolved unit price
    ///
    /// `unit_price` comes from a fare matrix entry or a direct tier
    /// resolution of the station pair's distance.
    SingleTrip {
        /// Fare for one ticket (i64 minor units)
        unit_price: i64,
        /// Number of tickets; must be >= 1
        quantity: i64,
    },

    /// Time-based passes at a flat ticket-type price
    ///
    /// The price is independent of travel distance. Quantity is typically 1
    /// but bulk purchase is allowed.
    TimeBased {
        /// Flat pass price (i64 minor units)
        ticket_type_price: i64,
        /// Number of passes; must be >= 1
        quantity: i64,
    },

    /// Upgrade of an existing ticket to a higher type
    ///
    /// `raw_upgrade_amount` is the server-quoted delta already net of the
    /// service fee; the calculator re-adds exactly one `service_fee`. See
    /// [`UpgradeQuote`](crate::checkout::UpgradeQuote) for the quote-side
    /// arithmetic.
    Upgrade {
        /// Upgrade delta net of fee (i64 minor units)
        raw_upgrade_amount: i64,
        /// Fixed service fee (i64 minor units)
        service_fee: i64,
    },
}

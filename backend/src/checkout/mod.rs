//! Order price calculation
//!
//! Composes a resolved unit price with order-level parameters into the final
//! payable amount. Pure arithmetic over i64 minor units; formatting
//! (thousands separators, currency symbol) is a presentation concern that
//! lives in the front end.
//!
//! # Upgrade fee round trip
//!
//! The upgrade flow quotes a gross amount server-side. The fee is subtracted
//! **once** so the customer sees the upgrade delta net of fee, and re-added
//! **once** at charge time. [`UpgradeQuote`] is the constructor for that
//! round trip: build the request from the server quote through it and the
//! charged total always equals the original quote. `compute_total` itself
//! only ever adds one fee; it never sees the gross quote.
//!
//! CRITICAL: All money values are i64 (minor currency units)

use crate::models::order::OrderPriceRequest;
use thiserror::Error;

/// Errors that can occur computing an order total
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OrderError {
    #[error("Invalid quantity {quantity}: must be a positive integer")]
    InvalidQuantity { quantity: i64 },
}

/// Compute the payable total for an order
///
/// - `SingleTrip`: `unit_price * quantity`
/// - `TimeBased`: `ticket_type_price * quantity`
/// - `Upgrade`: `raw_upgrade_amount + service_fee`
///
/// Quantities must be positive integers; `quantity <= 0` fails with
/// [`OrderError::InvalidQuantity`].
///
/// # Example
/// ```
/// use fare_engine_core_rs::checkout::compute_total;
/// use fare_engine_core_rs::OrderPriceRequest;
///
/// let total = compute_total(&OrderPriceRequest::SingleTrip {
///     unit_price: 6_000,
///     quantity: 3,
/// });
/// assert_eq!(total, Ok(18_000));
///
/// let total = compute_total(&OrderPriceRequest::Upgrade {
///     raw_upgrade_amount: 15_000,
///     service_fee: 10_000,
/// });
/// assert_eq!(total, Ok(25_000));
/// ```
pub fn compute_total(request: &OrderPriceRequest) -> Result<i64, OrderError> {
    match *request {
        OrderPriceRequest::SingleTrip {
            unit_price,
            quantity,
        } => {
            ensure_positive_quantity(quantity)?;
            Ok(unit_price * quantity)
        }
        OrderPriceRequest::TimeBased {
            ticket_type_price,
            quantity,
        } => {
            ensure_positive_quantity(quantity)?;
            Ok(ticket_type_price * quantity)
        }
        OrderPriceRequest::Upgrade {
            raw_upgrade_amount,
            service_fee,
        } => Ok(raw_upgrade_amount + service_fee),
    }
}

fn ensure_positive_quantity(quantity: i64) -> Result<(), OrderError> {
    if quantity <= 0 {
        return Err(OrderError::InvalidQuantity { quantity });
    }
    Ok(())
}

/// An upgrade quote split into display and charge amounts
///
/// Built from the server-quoted gross amount; the net amount is what the
/// customer sees ("upgrade price"), the fee is itemized next to it, and the
/// charge re-adds the fee exactly once.
///
/// # Example
/// ```
/// use fare_engine_core_rs::checkout::{compute_total, UpgradeQuote};
///
/// let quote = UpgradeQuote::from_server_amount(25_000, 10_000);
/// assert_eq!(quote.raw_upgrade_amount(), 15_000); // shown to customer
///
/// // Charging the derived request recovers the server quote exactly
/// assert_eq!(compute_total(&quote.to_request()), Ok(25_000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpgradeQuote {
    /// Upgrade delta net of fee (i64 minor units)
    raw_upgrade_amount: i64,

    /// Fixed service fee (i64 minor units)
    service_fee: i64,
}

impl UpgradeQuote {
    /// Split a server-quoted gross amount into net display amount plus fee
    pub fn from_server_amount(server_quoted_amount: i64, service_fee: i64) -> Self {
        Self {
            raw_upgrade_amount: server_quoted_amount - service_fee,
            service_fee,
        }
    }

    /// Upgrade delta net of fee, for display
    pub fn raw_upgrade_amount(&self) -> i64 {
        self.raw_upgrade_amount
    }

    /// Fixed service fee
    pub fn service_fee(&self) -> i64 {
        self.service_fee
    }

    /// The pricing request for the charge
    pub fn to_request(self) -> OrderPriceRequest {
        OrderPriceRequest::Upgrade {
            raw_upgrade_amount: self.raw_upgrade_amount,
            service_fee: self.service_fee,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_trip_multiplies() {
        let total = compute_total(&OrderPriceRequest::SingleTrip {
            unit_price: 6_000,
            quantity: 3,
        });
        assert_eq!(total, Ok(18_000));
    }

    #[test]
    fn test_time_based_allows_bulk() {
        let total = compute_total(&OrderPriceRequest::TimeBased {
            ticket_type_price: 200_000,
            quantity: 2,
        });
        assert_eq!(total, Ok(400_000));
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let err = compute_total(&OrderPriceRequest::SingleTrip {
            unit_price: 6_000,
            quantity: 0,
        })
        .unwrap_err();
        assert_eq!(err, OrderError::InvalidQuantity { quantity: 0 });
    }

    #[test]
    fn test_negative_quantity_rejected() {
        let err = compute_total(&OrderPriceRequest::TimeBased {
            ticket_type_price: 200_000,
            quantity: -1,
        })
        .unwrap_err();
        assert_eq!(err, OrderError::InvalidQuantity { quantity: -1 });
    }

    #[test]
    fn test_upgrade_adds_fee_once() {
        let total = compute_total(&OrderPriceRequest::Upgrade {
            raw_upgrade_amount: 15_000,
            service_fee: 10_000,
        });
        assert_eq!(total, Ok(25_000));
    }

    #[test]
    fn test_upgrade_quote_round_trip() {
        let quote = UpgradeQuote::from_server_amount(25_000, 10_000);
        assert_eq!(quote.raw_upgrade_amount(), 15_000);
        assert_eq!(quote.service_fee(), 10_000);
        assert_eq!(compute_total(&quote.to_request()), Ok(25_000));
    }
}

//! Tests for order total calculation
//!
//! CRITICAL: All money values are i64 (minor currency units)

use fare_engine_core_rs::{compute_total, OrderError, OrderPriceRequest, UpgradeQuote};

#[test]
fn test_single_trip_reference_scenario() {
    // 3 tickets at 6000 minor units
    let total = compute_total(&OrderPriceRequest::SingleTrip {
        unit_price: 6_000,
        quantity: 3,
    });
    assert_eq!(total, Ok(18_000));
}

#[test]
fn test_single_trip_single_ticket() {
    let total = compute_total(&OrderPriceRequest::SingleTrip {
        unit_price: 12_000,
        quantity: 1,
    });
    assert_eq!(total, Ok(12_000));
}

#[test]
fn test_single_trip_quantity_linearity() {
    for quantity in 1..=20 {
        let total = compute_total(&OrderPriceRequest::SingleTrip {
            unit_price: 8_000,
            quantity,
        })
        .unwrap();
        assert_eq!(total, 8_000 * quantity);
    }
}

#[test]
fn test_single_trip_rejects_non_positive_quantity() {
    for quantity in [0, -1, -100] {
        let err = compute_total(&OrderPriceRequest::SingleTrip {
            unit_price: 6_000,
            quantity,
        })
        .unwrap_err();
        assert_eq!(err, OrderError::InvalidQuantity { quantity });
    }
}

#[test]
fn test_time_based_flat_price() {
    let total = compute_total(&OrderPriceRequest::TimeBased {
        ticket_type_price: 150_000,
        quantity: 1,
    });
    assert_eq!(total, Ok(150_000));
}

#[test]
fn test_time_based_bulk_purchase() {
    let total = compute_total(&OrderPriceRequest::TimeBased {
        ticket_type_price: 150_000,
        quantity: 4,
    });
    assert_eq!(total, Ok(600_000));
}

#[test]
fn test_time_based_rejects_zero_quantity() {
    let err = compute_total(&OrderPriceRequest::TimeBased {
        ticket_type_price: 150_000,
        quantity: 0,
    })
    .unwrap_err();
    assert_eq!(err, OrderError::InvalidQuantity { quantity: 0 });
}

#[test]
fn test_upgrade_reference_scenario() {
    let total = compute_total(&OrderPriceRequest::Upgrade {
        raw_upgrade_amount: 15_000,
        service_fee: 10_000,
    });
    assert_eq!(total, Ok(25_000));
}

#[test]
fn test_upgrade_round_trip_recovers_server_quote() {
    // Server quotes 25000 gross; the customer sees 15000 net of the 10000
    // fee; the charge re-adds the fee exactly once.
    let server_quoted_amount = 25_000;
    let service_fee = 10_000;

    let quote = UpgradeQuote::from_server_amount(server_quoted_amount, service_fee);
    assert_eq!(quote.raw_upgrade_amount(), server_quoted_amount - service_fee);

    let charged = compute_total(&quote.to_request()).unwrap();
    assert_eq!(charged, server_quoted_amount);
}

#[test]
fn test_upgrade_fee_is_not_compounded() {
    // Passing the quote through display and back to a charge must apply the
    // fee round trip once, however many times the quote is re-read.
    let quote = UpgradeQuote::from_server_amount(25_000, 10_000);
    let request = quote.to_request();

    let first = compute_total(&request).unwrap();
    let second = compute_total(&request).unwrap();
    assert_eq!(first, 25_000);
    assert_eq!(second, 25_000);
}

#[test]
fn test_upgrade_with_zero_fee() {
    let quote = UpgradeQuote::from_server_amount(25_000, 0);
    assert_eq!(quote.raw_upgrade_amount(), 25_000);
    assert_eq!(compute_total(&quote.to_request()), Ok(25_000));
}

#[test]
fn test_order_request_deserializes_from_api_payload() {
    let payload = r#"{"kind":"upgrade","raw_upgrade_amount":15000,"service_fee":10000}"#;
    let request: OrderPriceRequest = serde_json::from_str(payload).unwrap();
    assert_eq!(compute_total(&request), Ok(25_000));
}

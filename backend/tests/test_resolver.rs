//! Tests for distance-to-price resolution
//!
//! Covers the reference fare schedule scenario:
//! [0, 5) -> 6000, [5, 10) -> 8000, [10, 20) -> 12000

use fare_engine_core_rs::{resolve, DistanceTier, ResolveError, TierTable};

fn schedule() -> Vec<DistanceTier> {
    vec![
        DistanceTier::new(0.0, 5.0, 6_000),
        DistanceTier::new(5.0, 10.0, 8_000),
        DistanceTier::new(10.0, 20.0, 12_000),
    ]
}

#[test]
fn test_reference_scenario() {
    let tiers = schedule();
    assert_eq!(resolve(7.2, &tiers), Ok(8_000));
    assert_eq!(
        resolve(25.0, &tiers),
        Err(ResolveError::NoTierForDistance { distance_km: 25.0 })
    );
}

#[test]
fn test_distances_in_same_tier_price_identically() {
    let tiers = schedule();
    let a = resolve(5.0, &tiers).unwrap();
    let b = resolve(7.2, &tiers).unwrap();
    let c = resolve(9.999, &tiers).unwrap();
    assert_eq!(a, b);
    assert_eq!(b, c);
}

#[test]
fn test_every_edge_of_the_schedule() {
    let tiers = schedule();
    assert_eq!(resolve(0.0, &tiers), Ok(6_000));
    assert_eq!(resolve(5.0, &tiers), Ok(8_000));
    assert_eq!(resolve(10.0, &tiers), Ok(12_000));
    assert!(resolve(20.0, &tiers).is_err());
}

#[test]
fn test_gap_between_tiers_is_uncovered() {
    let tiers = vec![
        DistanceTier::new(0.0, 5.0, 6_000),
        DistanceTier::new(8.0, 12.0, 9_000),
    ];
    assert!(resolve(6.0, &tiers).is_err());
    assert_eq!(resolve(8.0, &tiers), Ok(9_000));
}

#[test]
fn test_insertion_order_is_irrelevant() {
    let mut reversed = schedule();
    reversed.reverse();
    assert_eq!(resolve(7.2, &reversed), Ok(8_000));
}

#[test]
fn test_deactivated_tier_leaves_a_gap() {
    let mut table = TierTable::from_tiers(schedule()).unwrap();
    let mid_id = table
        .active_tiers()
        .find(|tier| tier.min_distance_km() == 5.0)
        .unwrap()
        .id()
        .to_string();

    table.deactivate(&mid_id).unwrap();

    assert_eq!(table.resolve(3.0), Ok(6_000));
    assert!(table.resolve(7.2).is_err());
    assert_eq!(table.resolve(12.0), Ok(12_000));
}

#[test]
fn test_floating_point_noise_at_edges() {
    let tiers = schedule();

    // A route-length sum landing a hair under an edge rounds onto it
    assert_eq!(resolve(4.999999999, &tiers), Ok(8_000));
    assert_eq!(resolve(9.9999999, &tiers), Ok(12_000));

    // A hair above stays where it is
    assert_eq!(resolve(5.0000001, &tiers), Ok(8_000));
}

#[test]
fn test_error_carries_the_distance() {
    let err = resolve(25.0, &schedule()).unwrap_err();
    assert!(err.to_string().contains("25"));
}

//! # Invalid input
//!
//! Errors are reported through `EmdError`, the cost function is only called once the signatures
//! are known to be valid.
use std::cell::Cell;

use approx::assert_abs_diff_eq;

use emd::{EmdError, Options, Signature, SignatureError, get_distance, get_distance_and_flow, solve};
use emd::algorithm::transportation_simplex::strategy::initial_basis::{NorthwestCorner, Russell};
use emd::algorithm::transportation_simplex::strategy::pivot_rule::{FirstProfitable, SteepestDescent};

use super::{Point, euclidean, init_logging};

/// Compute a distance from raw parts, counting cost function calls.
fn distance(
    source: (Vec<f64>, Vec<f64>),
    destination: (Vec<f64>, Vec<f64>),
    calls: &Cell<usize>,
) -> Result<f64, EmdError> {
    let source = Signature::new(source.0, source.1)?;
    let destination = Signature::new(destination.0, destination.1)?;

    get_distance(&source, &destination, |x: &f64, y: &f64| {
        calls.set(calls.get() + 1);
        (x - y).abs()
    })
}

#[test]
fn invalid_signature() {
    init_logging();
    let calls = Cell::new(0);
    let valid = || (vec![0f64, 1f64], vec![0.5, 0.5]);

    assert_eq!(
        distance((vec![0f64, 1f64], vec![0.5, -0.5]), valid(), &calls),
        Err(EmdError::InvalidSignature(SignatureError::NonPositiveWeight { index: 1, weight: -0.5 })),
    );
    assert_eq!(
        distance(valid(), (vec![], vec![]), &calls),
        Err(EmdError::InvalidSignature(SignatureError::Empty)),
    );
    assert_eq!(
        distance(valid(), (vec![0f64], vec![0.5, 0.5]), &calls),
        Err(EmdError::InvalidSignature(SignatureError::LengthMismatch { nr_features: 1, nr_weights: 2 })),
    );
    assert_eq!(
        distance((vec![3f64], vec![f64::NAN]), valid(), &calls),
        Err(EmdError::InvalidSignature(SignatureError::NonFiniteWeight { index: 0 })),
    );
    assert_eq!(
        distance(valid(), (vec![0f64, 1f64], vec![f64::MAX, f64::MAX]), &calls),
        Err(EmdError::InvalidSignature(SignatureError::NonFiniteTotalWeight)),
    );
    assert_eq!(calls.get(), 0);

    assert_eq!(distance(valid(), valid(), &calls), Ok(0f64));
    assert!(calls.get() > 0);
}

#[test]
fn zero_weights_dropped() {
    assert_eq!(
        Signature::with_nonzero_weights(vec![0f64, 1f64, 2f64], vec![0f64, 1f64, -1f64]),
        Err(SignatureError::NonPositiveWeight { index: 2, weight: -1f64 }),
    );

    let source = Signature::with_nonzero_weights(vec![[0f64, 0f64], [5f64, 5f64]], vec![1f64, 0f64]).unwrap();
    let destination = Signature::<Point>::uniform(vec![[3f64, 4f64]]).unwrap();

    assert_eq!(source.len(), 1);
    assert_eq!(get_distance(&source, &destination, euclidean), Ok(5f64));
}

#[test]
fn invalid_cost() {
    init_logging();
    let source = Signature::uniform(vec![0u8, 1u8, 2u8]).unwrap();
    let destination = Signature::uniform(vec![0u8, 1u8]).unwrap();

    let result = get_distance(&source, &destination, |&x: &u8, &y: &u8| {
        if (x, y) == (2, 1) { f64::NAN } else { f64::from(x.abs_diff(y)) }
    });
    assert!(matches!(result, Err(EmdError::InvalidCost { from: 2, to: 1, .. })));

    let result = get_distance(&source, &destination, |&x: &u8, &y: &u8| f64::from(x) - f64::from(y));
    assert_eq!(result, Err(EmdError::InvalidCost { from: 0, to: 1, value: -1f64 }));
}

#[test]
fn pivot_limit() {
    init_logging();
    // The northwest corner of this problem is the most expensive plan
    let source = Signature::uniform(vec![0f64, 1f64]).unwrap();
    let destination = Signature::uniform(vec![1f64, 0f64]).unwrap();
    let cost = |x: &f64, y: &f64| (x - y).abs();

    let options = Options { iteration_factor: 0, ..Options::default() };
    let result = solve::<NorthwestCorner, SteepestDescent, _, _, _, _>(&source, &destination, cost, &options);
    assert_eq!(result, Err(EmdError::ConvergenceFailure { nr_pivots: 0 }));

    let solution = solve::<NorthwestCorner, SteepestDescent, _, _, _, _>(&source, &destination, cost, &Options::default())
        .unwrap();
    assert_eq!(solution.distance, 0f64);
    assert_eq!(solution.nr_pivots, 1);
}

#[test]
fn different_magnitudes() {
    init_logging();
    // The small pile of the source is 500 times the small pile of the destination
    let source = Signature::new(vec![0u8, 1u8], vec![5e-7, 1000f64]).unwrap();
    let destination = Signature::new(vec![0u8, 1u8], vec![1e-9, 1000f64 + 5e-7 - 1e-9]).unwrap();
    let cost = |&x: &u8, &y: &u8| if x == y { 0f64 } else { 10f64 };
    let options = Options { flow_epsilon: 0f64, ..Options::default() };

    for solution in [
        solve::<Russell, SteepestDescent, _, _, _, _>(&source, &destination, cost, &options),
        solve::<NorthwestCorner, FirstProfitable, _, _, _, _>(&source, &destination, cost, &options),
    ] {
        let solution = solution.unwrap();
        let mut sent = [0f64; 2];
        let mut received = [0f64; 2];
        for flow in &solution.flows {
            sent[flow.from] += flow.amount;
            received[flow.to] += flow.amount;
        }
        assert!(received[0] <= 1e-9);
        assert!(received[1] <= destination.weights()[1] + 1e-12);
        assert_abs_diff_eq!(sent[0], 5e-7, epsilon = 1e-15);
        assert_abs_diff_eq!(sent[1], 1000f64, epsilon = 1e-12);
        // All but 1e-9 of the small pile has to cross over at cost 10
        assert_abs_diff_eq!(solution.total_cost, 10f64 * (5e-7 - 1e-9), epsilon = 1e-15);
    }

    let (distance, flows) = get_distance_and_flow(&source, &destination, cost).unwrap();
    assert_abs_diff_eq!(distance, 10f64 * (5e-7 - 1e-9) / source.total_weight(), epsilon = 1e-18);
    assert!(flows.iter().any(|flow| (flow.from, flow.to) == (0, 1)));
}

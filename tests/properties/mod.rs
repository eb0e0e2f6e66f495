//! # Properties of optimal transport plans
//!
//! Checked on many small, seeded random signatures.
use approx::{assert_abs_diff_eq, assert_relative_eq};

use emd::{Flow, Options, Signature, get_distance, get_distance_and_flow, solve};
use emd::algorithm::transportation_simplex::strategy::initial_basis::{NorthwestCorner, Russell};
use emd::algorithm::transportation_simplex::strategy::pivot_rule::{FirstProfitable, FirstProfitableWithMemory, SteepestDescent};

use super::{Point, euclidean, init_logging, random_signature, seeded_rng};

const NR_SAMPLES: u64 = 200;

fn assert_feasible(source: &Signature<Point>, destination: &Signature<Point>, flows: &[Flow<f64>]) {
    let mut sent = vec![0f64; source.len()];
    let mut received = vec![0f64; destination.len()];
    for flow in flows {
        assert!(flow.amount > 0f64);
        sent[flow.from] += flow.amount;
        received[flow.to] += flow.amount;
    }

    for (&amount, &weight) in sent.iter().zip(source.weights()) {
        assert!(amount <= weight + 1e-9);
    }
    for (&amount, &weight) in received.iter().zip(destination.weights()) {
        assert!(amount <= weight + 1e-9);
    }

    let transported = flows.iter().map(|flow| flow.amount).sum::<f64>();
    assert_abs_diff_eq!(transported, source.total_weight().min(destination.total_weight()), epsilon = 1e-6);
}

#[test]
fn feasibility() {
    init_logging();

    for seed in 0..NR_SAMPLES {
        let mut rng = seeded_rng(seed);
        let source = random_signature(&mut rng, 8);
        let destination = random_signature(&mut rng, 8);

        let (distance, flows) = get_distance_and_flow(&source, &destination, euclidean).unwrap();
        assert_feasible(&source, &destination, &flows);
        assert!(flows.windows(2).all(|pair| (pair[0].from, pair[0].to) < (pair[1].from, pair[1].to)));

        let total_cost = flows.iter()
            .map(|flow| flow.amount * euclidean(&source.features()[flow.from], &destination.features()[flow.to]))
            .sum::<f64>();
        let transported = source.total_weight().min(destination.total_weight());
        assert_relative_eq!(distance, total_cost / transported, max_relative = 1e-9, epsilon = 1e-12);
    }
}

#[test]
fn symmetry() {
    init_logging();

    for seed in 0..NR_SAMPLES {
        let mut rng = seeded_rng(seed);
        let source = random_signature(&mut rng, 8);
        let destination = random_signature(&mut rng, 8);

        let (forward, forward_flows) = get_distance_and_flow(&source, &destination, euclidean).unwrap();
        let (backward, backward_flows) = get_distance_and_flow(&destination, &source, euclidean).unwrap();
        assert_relative_eq!(forward, backward, max_relative = 1e-9, epsilon = 1e-12);
        assert_feasible(&destination, &source, &backward_flows);

        // With features in general position the optimal plan is unique, so it is the same plan
        let mut transposed = backward_flows.iter()
            .map(|flow| Flow { from: flow.to, to: flow.from, amount: flow.amount })
            .collect::<Vec<_>>();
        transposed.sort_unstable_by_key(|flow| (flow.from, flow.to));
        assert_eq!(transposed.len(), forward_flows.len());
        for (backward, forward) in transposed.iter().zip(&forward_flows) {
            assert_eq!((backward.from, backward.to), (forward.from, forward.to));
            assert_abs_diff_eq!(backward.amount, forward.amount, epsilon = 1e-9);
        }
    }
}

#[test]
fn identity() {
    init_logging();

    for seed in 0..NR_SAMPLES {
        let signature = random_signature(&mut seeded_rng(seed), 10);

        let (distance, flows) = get_distance_and_flow(&signature, &signature, euclidean).unwrap();
        assert_abs_diff_eq!(distance, 0f64, epsilon = 1e-9);
        assert_feasible(&signature, &signature, &flows);
    }
}

#[test]
fn scaling() {
    // Multiplying all weights by the same factor doesn't change the distance
    let scale = |signature: &Signature<Point>| Signature::new(
        signature.features().to_vec(),
        signature.weights().iter().map(|weight| weight * 4f64).collect(),
    ).unwrap();

    for seed in 0..NR_SAMPLES {
        let mut rng = seeded_rng(seed);
        let source = random_signature(&mut rng, 6);
        let destination = random_signature(&mut rng, 6);

        assert_relative_eq!(
            get_distance(&source, &destination, euclidean).unwrap(),
            get_distance(&scale(&source), &scale(&destination), euclidean).unwrap(),
            max_relative = 1e-9,
            epsilon = 1e-12,
        );
    }
}

#[test]
fn strategies_agree() {
    init_logging();
    let options = Options::default();

    for seed in 0..NR_SAMPLES {
        let mut rng = seeded_rng(seed);
        let source = random_signature(&mut rng, 7);
        let destination = random_signature(&mut rng, 7);

        let reference = solve::<Russell, SteepestDescent, _, _, _, _>(&source, &destination, euclidean, &options)
            .unwrap();
        for solution in [
            solve::<NorthwestCorner, FirstProfitable, _, _, _, _>(&source, &destination, euclidean, &options),
            solve::<NorthwestCorner, FirstProfitableWithMemory, _, _, _, _>(&source, &destination, euclidean, &options),
            solve::<NorthwestCorner, SteepestDescent, _, _, _, _>(&source, &destination, euclidean, &options),
            solve::<Russell, FirstProfitable, _, _, _, _>(&source, &destination, euclidean, &options),
            solve::<Russell, FirstProfitableWithMemory, _, _, _, _>(&source, &destination, euclidean, &options),
        ] {
            let solution = solution.unwrap();
            assert_relative_eq!(solution.distance, reference.distance, max_relative = 1e-9, epsilon = 1e-12);
            assert_feasible(&source, &destination, &solution.flows);
        }
    }
}

#[test]
fn single_precision() {
    for seed in 0..NR_SAMPLES {
        let mut rng = seeded_rng(seed);
        let source = random_signature(&mut rng, 5);
        let destination = random_signature(&mut rng, 5);
        let to_single = |signature: &Signature<Point>| Signature::new(
            signature.features().iter().map(|&[x, y]| [x as f32, y as f32]).collect(),
            signature.weights().iter().map(|&weight| weight as f32).collect(),
        ).unwrap();
        let euclidean_f32 = |x: &[f32; 2], y: &[f32; 2]| ((x[0] - y[0]).powi(2) + (x[1] - y[1]).powi(2)).sqrt();

        let wide = get_distance(&source, &destination, euclidean).unwrap();
        let narrow = get_distance(&to_single(&source), &to_single(&destination), euclidean_f32).unwrap();
        assert_abs_diff_eq!(narrow as f64, wide, epsilon = 1e-3);
    }
}

//! # Integration tests
//!
//! Integration tests completely external from the crate. All code written in this module could be
//! written by an external user of the crate.
//!
//! ## Note
//!
//! The tests in the `stress` module are only ran when the `stress` feature is enabled, as these
//! tests take a long time to run.
use rand::{Rng, SeedableRng};
use rand::rngs::SmallRng;

use emd::Signature;

mod properties;
mod validation;

/// Show the solver logs of failing tests, run with `RUST_LOG=trace` to see every pivot.
fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

type Point = [f64; 2];

fn euclidean(x: &Point, y: &Point) -> f64 {
    ((x[0] - y[0]).powi(2) + (x[1] - y[1]).powi(2)).sqrt()
}

/// Signature of points in the unit square.
///
/// # Arguments
///
/// * `rng`: Source of randomness, seeded for reproducibility.
/// * `max_len`: The signature will have between 1 and `max_len` features.
fn random_signature(rng: &mut SmallRng, max_len: usize) -> Signature<Point> {
    let len = rng.random_range(1..=max_len);
    let features = (0..len).map(|_| [rng.random(), rng.random()]).collect();
    let weights = (0..len).map(|_| rng.random_range(0.01..1f64)).collect();

    Signature::new(features, weights).unwrap()
}

fn seeded_rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

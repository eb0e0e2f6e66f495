//! # Earth Mover's Distance
//!
//! The Earth Mover's Distance between two distributions of mass is the minimum cost of turning one
//! into the other, where moving a unit of mass between two locations has a given cost. If the two
//! distributions have a different total mass, only the smaller amount is moved.
//!
//! Distributions are described by signatures, and the underlying transportation problem is solved
//! with the transportation simplex method as described in the book Combinatorial Optimization by
//! Christos H. Papadimitriou and Kenneth Steiglitz.
//!
//! ```
//! use emd::{get_distance, Signature};
//!
//! let source = Signature::new(vec![0f64, 1f64], vec![0.5, 0.5]).unwrap();
//! let destination = Signature::uniform(vec![0.5f64]).unwrap();
//!
//! let distance = get_distance(&source, &destination, |x: &f64, y: &f64| (x - y).abs()).unwrap();
//! assert!((distance - 0.5).abs() < 1e-9);
//! ```
#![warn(missing_docs)]

pub mod algorithm;
pub mod data;
pub mod distance;
pub mod error;

pub use crate::algorithm::Options;
pub use crate::data::signature::Signature;
pub use crate::distance::{Flow, Solution, get_distance, get_distance_and_flow, solve};
pub use crate::error::{EmdError, SignatureError};

#[cfg(test)]
mod tests;

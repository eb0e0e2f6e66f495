//! # Error reporting
//!
//! A collection of enums describing anything that prevents a distance from being computed.
//!
//! Problems with the signatures are found before any solving starts. Problems with the cost
//! function are only found once the offending cell is evaluated, which may be in the middle of a
//! solve.
use thiserror::Error;

/// An `EmdError` is returned when no distance could be computed.
///
/// It is the highest error in the error hierarchy.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EmdError {
    /// One of the two signatures can't be used to describe a distribution of mass.
    #[error("invalid signature: {0}")]
    InvalidSignature(#[from] SignatureError),
    /// The cost function returned a value that is negative, infinite or not a number.
    #[error("invalid cost {value} from source {from} to destination {to}")]
    InvalidCost {
        /// Index of the feature in the source signature.
        from: usize,
        /// Index of the feature in the destination signature.
        to: usize,
        /// The offending value, converted for reporting.
        value: f64,
    },
    /// The maximum number of pivots was reached before an optimal basis was found.
    #[error("no optimal transport plan found within {nr_pivots} pivots")]
    ConvergenceFailure {
        /// Number of pivots that were done.
        nr_pivots: usize,
    },
}

/// A `SignatureError` describes why a collection of features and weights is not a signature.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SignatureError {
    /// There are no features.
    #[error("a signature needs at least one feature")]
    Empty,
    /// The number of weights doesn't match the number of features.
    #[error("{nr_features} features but {nr_weights} weights")]
    LengthMismatch {
        /// Number of features provided.
        nr_features: usize,
        /// Number of weights provided.
        nr_weights: usize,
    },
    /// A weight is zero or negative.
    #[error("weight {weight} at index {index} is not positive")]
    NonPositiveWeight {
        /// Index of the feature.
        index: usize,
        /// The offending weight, converted for reporting.
        weight: f64,
    },
    /// A weight is infinite or not a number.
    #[error("weight at index {index} is not finite")]
    NonFiniteWeight {
        /// Index of the feature.
        index: usize,
    },
    /// The weights are finite, but their sum is not.
    #[error("the total weight is not finite")]
    NonFiniteTotalWeight,
    /// There is no mass to move.
    #[error("the total weight to transport is zero")]
    ZeroTotalWeight,
}

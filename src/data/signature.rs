//! # Signatures
//!
//! A signature is a distribution of mass over a finite set of features: piles of earth, each at
//! some location. Two signatures are the input of a transportation problem; one supplies the mass,
//! the other demands it.
use index_utils::remove_indices;

use crate::data::number_types::traits::Real;
use crate::error::SignatureError;

/// Weighted collection of features.
///
/// The features can be of any type; the only thing the solver does with them is handing them to
/// the cost function. All weights are strictly positive and finite, and there is at least one
/// feature.
#[derive(Debug, Clone, PartialEq)]
pub struct Signature<T, R = f64> {
    features: Vec<T>,
    weights: Vec<R>,
    total_weight: R,
}

impl<T, R> Signature<T, R>
where
    R: Real,
{
    /// Create a new signature.
    ///
    /// # Arguments
    ///
    /// * `features`: Locations of the mass.
    /// * `weights`: Amount of mass at each feature, with the same length as `features`.
    ///
    /// # Errors
    ///
    /// If the lengths differ, if there are no features, if any weight is not strictly positive
    /// and finite, or if the weights don't add up to a finite total.
    pub fn new(features: Vec<T>, weights: Vec<R>) -> Result<Self, SignatureError> {
        if features.len() != weights.len() {
            return Err(SignatureError::LengthMismatch {
                nr_features: features.len(),
                nr_weights: weights.len(),
            });
        }
        if features.is_empty() {
            return Err(SignatureError::Empty);
        }

        for (index, &weight) in weights.iter().enumerate() {
            if !weight.is_finite() {
                return Err(SignatureError::NonFiniteWeight { index });
            }
            if weight <= R::zero() {
                return Err(SignatureError::NonPositiveWeight { index, weight: weight.to_reported() });
            }
        }

        let total_weight = weights.iter().copied().sum::<R>();
        if !total_weight.is_finite() {
            return Err(SignatureError::NonFiniteTotalWeight);
        }
        if !(total_weight > R::zero()) {
            return Err(SignatureError::ZeroTotalWeight);
        }

        Ok(Self { features, weights, total_weight })
    }

    /// Create a probability distribution with equal mass at each feature.
    ///
    /// # Arguments
    ///
    /// * `features`: Locations of the mass, each will get weight `1 / features.len()`.
    ///
    /// # Errors
    ///
    /// If there are no features.
    pub fn uniform(features: Vec<T>) -> Result<Self, SignatureError> {
        if features.is_empty() {
            return Err(SignatureError::Empty);
        }

        let weight = R::one() / R::from_usize(features.len());
        let weights = vec![weight; features.len()];

        Self::new(features, weights)
    }

    /// Create a signature, dropping all features without mass.
    ///
    /// Features with weight exactly zero carry no information for the transportation problem.
    /// Negative weights are still rejected.
    ///
    /// # Arguments
    ///
    /// * `features`: Locations of the mass.
    /// * `weights`: Amount of mass at each feature, with the same length as `features`.
    ///
    /// # Errors
    ///
    /// Like `new`. Indices in errors refer to the arguments as given, before any feature is
    /// removed.
    pub fn with_nonzero_weights(mut features: Vec<T>, mut weights: Vec<R>) -> Result<Self, SignatureError> {
        if features.len() != weights.len() {
            return Err(SignatureError::LengthMismatch {
                nr_features: features.len(),
                nr_weights: weights.len(),
            });
        }
        for (index, &weight) in weights.iter().enumerate() {
            if !weight.is_finite() {
                return Err(SignatureError::NonFiniteWeight { index });
            }
            if weight < R::zero() {
                return Err(SignatureError::NonPositiveWeight { index, weight: weight.to_reported() });
            }
        }

        let zero_weight = weights.iter().enumerate()
            .filter(|&(_, &weight)| weight == R::zero())
            .map(|(index, _)| index)
            .collect::<Vec<_>>();
        remove_indices(&mut features, &zero_weight);
        remove_indices(&mut weights, &zero_weight);

        Self::new(features, weights)
    }

    /// Create a signature from `(feature, weight)` pairs.
    ///
    /// # Errors
    ///
    /// Like `new`.
    pub fn from_pairs<I: IntoIterator<Item = (T, R)>>(pairs: I) -> Result<Self, SignatureError> {
        let (features, weights) = pairs.into_iter().unzip();
        Self::new(features, weights)
    }

    /// Number of features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Always false, a signature has at least one feature.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// All features, in order.
    pub fn features(&self) -> &[T] {
        &self.features
    }

    /// All weights, in the same order as the features.
    pub fn weights(&self) -> &[R] {
        &self.weights
    }

    /// Sum of all weights.
    pub fn total_weight(&self) -> R {
        self.total_weight
    }

    /// Iterate over `(feature, weight)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&T, R)> + '_ {
        self.features.iter().zip(self.weights.iter().copied())
    }
}

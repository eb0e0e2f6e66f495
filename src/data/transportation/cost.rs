//! # Ground costs
//!
//! The cost of moving a unit of mass from a source feature to a destination feature. The cost
//! matrix is virtual: values are computed when the solver asks for them and are never stored as a
//! whole by the types in this module.
use crate::data::number_types::traits::Real;
use crate::error::EmdError;

/// Abstract interface for a matrix of transportation costs.
///
/// Rows correspond to supply nodes, columns to demand nodes. Implementors don't have to store the
/// matrix; they could also compute each value from a pair of features.
pub trait CostMatrix<R> {
    /// Number of supply nodes.
    fn nr_rows(&self) -> usize;

    /// Number of demand nodes.
    fn nr_columns(&self) -> usize;

    /// Cost of moving one unit of mass.
    ///
    /// # Arguments
    ///
    /// * `i`: Row index, smaller than `self.nr_rows()`.
    /// * `j`: Column index, smaller than `self.nr_columns()`.
    ///
    /// # Return value
    ///
    /// A nonnegative, finite cost.
    ///
    /// # Errors
    ///
    /// When no such cost can be given.
    fn cost(&self, i: usize, j: usize) -> Result<R, EmdError>;
}

/// Computes costs between two slices of features with a caller supplied function.
///
/// Nothing is cached: every call to `evaluate` calls the cost function. Callers with an expensive
/// cost function should memoize it themselves.
#[derive(Debug, Clone)]
pub struct CostEvaluator<'a, T, U, C> {
    sources: &'a [T],
    destinations: &'a [U],
    cost: C,
}

impl<'a, T, U, C> CostEvaluator<'a, T, U, C> {
    /// Create a new evaluator.
    ///
    /// # Arguments
    ///
    /// * `sources`: Features of the supplying signature, these index the rows.
    /// * `destinations`: Features of the demanding signature, these index the columns.
    /// * `cost`: Pure function giving the cost of moving a unit of mass between two features.
    pub fn new(sources: &'a [T], destinations: &'a [U], cost: C) -> Self {
        Self { sources, destinations, cost }
    }

    /// Cost between a source and a destination feature.
    ///
    /// # Arguments
    ///
    /// * `i`: Index of the source feature.
    /// * `j`: Index of the destination feature.
    ///
    /// # Return value
    ///
    /// The value of the cost function.
    ///
    /// # Errors
    ///
    /// If the cost function returned a negative, infinite or NaN value.
    pub fn evaluate<R>(&self, i: usize, j: usize) -> Result<R, EmdError>
    where
        R: Real,
        C: Fn(&T, &U) -> R,
    {
        debug_assert!(i < self.sources.len());
        debug_assert!(j < self.destinations.len());

        let value = (self.cost)(&self.sources[i], &self.destinations[j]);
        if value.is_finite() && value >= R::zero() {
            Ok(value)
        } else {
            Err(EmdError::InvalidCost { from: i, to: j, value: value.to_reported() })
        }
    }
}

impl<'a, T, U, R, C> CostMatrix<R> for CostEvaluator<'a, T, U, C>
where
    R: Real,
    C: Fn(&T, &U) -> R,
{
    fn nr_rows(&self) -> usize {
        self.sources.len()
    }

    fn nr_columns(&self) -> usize {
        self.destinations.len()
    }

    fn cost(&self, i: usize, j: usize) -> Result<R, EmdError> {
        self.evaluate(i, j)
    }
}

//! # Algorithms
use crate::data::number_types::traits::Real;

pub mod transportation_simplex;

/// Parameters of a solve.
///
/// The defaults work for signatures whose weights are of comparable magnitude; callers with
/// extremely unevenly distributed mass might want to tighten `flow_epsilon`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Options<R> {
    /// Reduced costs above `-tolerance` are considered nonnegative.
    pub tolerance: R,
    /// Flows up to this value are not reported.
    pub flow_epsilon: R,
    /// The solve fails after `iteration_factor` times the squared number of nodes pivots.
    pub iteration_factor: usize,
}

impl<R: Real> Default for Options<R> {
    fn default() -> Self {
        Self {
            tolerance: R::default_tolerance(),
            flow_epsilon: R::default_tolerance(),
            iteration_factor: 10,
        }
    }
}

impl<R> Options<R> {
    /// Maximum number of pivots.
    ///
    /// # Arguments
    ///
    /// * `nr_nodes`: Number of supply and demand nodes, including a dummy node.
    pub fn max_pivots(&self, nr_nodes: usize) -> usize {
        self.iteration_factor.saturating_mul(nr_nodes.saturating_mul(nr_nodes))
    }
}

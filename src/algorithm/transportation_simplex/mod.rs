//! # Transportation simplex
//!
//! The transportation problem is a linear program with a very special constraint matrix: each
//! variable appears in exactly one supply and one demand constraint. The simplex method can use
//! that structure directly. A basis is a spanning tree, the dual values follow from one traversal
//! of that tree, and a basis change moves flow around the unique cycle that an entering cell
//! closes. This is also known as the MODI or u-v method.
use log::{debug, trace, warn};

use crate::algorithm::Options;
use crate::algorithm::transportation_simplex::basis::Basis;
use crate::algorithm::transportation_simplex::strategy::initial_basis::InitialBasis;
use crate::algorithm::transportation_simplex::strategy::pivot_rule::{EnteringCell, PivotRule};
use crate::data::number_types::traits::Real;
use crate::data::transportation::TransportationProblem;
use crate::data::transportation::cost::CostMatrix;
use crate::error::EmdError;

pub mod basis;
pub mod strategy;

/// An optimal basis, and how it was found.
#[derive(Debug, Clone)]
pub struct Optimum<R> {
    /// Optimal basic feasible solution.
    pub basis: Basis<R>,
    /// Number of basis changes needed to get there from the initial basis.
    pub nr_pivots: usize,
}

/// Reduces the cost of a basic feasible solution to the minimum.
///
/// A transportation problem always has a finite optimum: it is feasible because it is balanced,
/// and bounded because all costs are nonnegative.
///
/// # Arguments
///
/// * `problem`: Balanced problem to solve.
/// * `options`: Tolerances and the pivot limit.
///
/// # Return value
///
/// An optimal basis.
///
/// # Errors
///
/// If a cost can't be evaluated, or if no optimum is found within the pivot limit.
pub fn primal<R, CM, IB, PR>(
    problem: &TransportationProblem<R, CM>,
    options: &Options<R>,
) -> Result<Optimum<R>, EmdError>
where
    R: Real,
    CM: CostMatrix<R>,
    IB: InitialBasis,
    PR: PivotRule<R>,
{
    let mut basis = IB::initial_basis(problem)?;
    debug!("Initial basis with {} cells, objective {}", basis.len(), basis.objective());

    let max_pivots = options.max_pivots(problem.nr_nodes());
    let mut rule = PR::new(problem);
    let mut nr_pivots = 0;
    loop {
        debug_assert!(basis.is_spanning_tree());

        let potentials = basis.potentials();
        match rule.select_entering_cell(problem, &basis, &potentials, options.tolerance)? {
            Some(EnteringCell { row, column, cost, reduced_cost }) => {
                if nr_pivots >= max_pivots {
                    warn!("No optimum found within {} pivots, objective is {}", nr_pivots, basis.objective());
                    break Err(EmdError::ConvergenceFailure { nr_pivots });
                }

                let pivot = basis.pivot(row, column, cost);
                nr_pivots += 1;
                trace!(
                    "Pivot {}: ({}, {}) enters with reduced cost {}, moving {}, ({}, {}) leaves",
                    nr_pivots, row, column, reduced_cost, pivot.amount, pivot.leaving.0, pivot.leaving.1,
                );
            },
            None => {
                debug!("Optimal after {} pivots, objective {}", nr_pivots, basis.objective());
                break Ok(Optimum { basis, nr_pivots });
            },
        }
    }
}

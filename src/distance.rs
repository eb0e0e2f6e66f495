//! # Earth Mover's Distance
//!
//! Entry points of the crate. Two signatures and a cost function are turned into a balanced
//! transportation problem, which is solved to optimality. The optimal flow is then read from the
//! basis, leaving out any mass that was routed through the dummy node.
use crate::algorithm::Options;
use crate::algorithm::transportation_simplex::primal;
use crate::algorithm::transportation_simplex::strategy::initial_basis::{InitialBasis, Russell};
use crate::algorithm::transportation_simplex::strategy::pivot_rule::{PivotRule, SteepestDescent};
use crate::data::number_types::traits::Real;
use crate::data::signature::Signature;
use crate::data::transportation::TransportationProblem;
use crate::data::transportation::cost::CostEvaluator;
use crate::error::EmdError;

/// Mass moved from a source feature to a destination feature.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Flow<R> {
    /// Index of the feature in the source signature.
    pub from: usize,
    /// Index of the feature in the destination signature.
    pub to: usize,
    /// Amount of mass moved, positive.
    pub amount: R,
}

/// Everything known about an optimal transport plan.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution<R> {
    /// Total cost divided by the transported mass.
    pub distance: R,
    /// Cost of moving all mass along the flows.
    pub total_cost: R,
    /// The smaller of the two total weights.
    pub transported_mass: R,
    /// Nonzero flows, sorted by source and then destination index.
    pub flows: Vec<Flow<R>>,
    /// Number of basis changes the solver needed.
    pub nr_pivots: usize,
}

/// Compute the Earth Mover's Distance and its transport plan.
///
/// # Arguments
///
/// * `source`: Signature that supplies mass.
/// * `destination`: Signature that demands mass.
/// * `cost`: Nonnegative cost of moving a unit of mass between two features. It is called lazily,
/// at most once per cell for each basis.
/// * `options`: Tolerances and the pivot limit.
///
/// # Return value
///
/// The distance together with the flows realizing it.
///
/// # Errors
///
/// If the cost function returns a negative or non finite value for a cell the solver looks at, or
/// if the pivot limit is reached.
pub fn solve<IB, PR, T, U, R, C>(
    source: &Signature<T, R>,
    destination: &Signature<U, R>,
    cost: C,
    options: &Options<R>,
) -> Result<Solution<R>, EmdError>
where
    IB: InitialBasis,
    PR: PivotRule<R>,
    R: Real,
    C: Fn(&T, &U) -> R,
{
    let costs = CostEvaluator::new(source.features(), destination.features(), cost);
    let problem = TransportationProblem::new(costs, source.weights(), destination.weights())?;

    let optimum = primal::<_, _, IB, PR>(&problem, options)?;

    let mut total_cost = R::zero();
    let mut flows = Vec::new();
    for cell in optimum.basis.cells() {
        if problem.is_dummy(cell.row, cell.column) {
            continue;
        }

        total_cost = total_cost + cell.flow * cell.cost;
        if cell.flow > options.flow_epsilon {
            flows.push(Flow { from: cell.row, to: cell.column, amount: cell.flow });
        }
    }
    flows.sort_unstable_by_key(|flow| (flow.from, flow.to));

    let transported_mass = problem.transported_mass();
    Ok(Solution {
        distance: total_cost / transported_mass,
        total_cost,
        transported_mass,
        flows,
        nr_pivots: optimum.nr_pivots,
    })
}

/// Compute the Earth Mover's Distance between two signatures.
///
/// Uses Russell's initial basis, the steepest descent pivot rule and default options.
///
/// # Arguments
///
/// * `source`: Signature that supplies mass.
/// * `destination`: Signature that demands mass.
/// * `cost`: Nonnegative cost of moving a unit of mass between two features.
///
/// # Errors
///
/// See `solve`.
pub fn get_distance<T, U, R, C>(
    source: &Signature<T, R>,
    destination: &Signature<U, R>,
    cost: C,
) -> Result<R, EmdError>
where
    R: Real,
    C: Fn(&T, &U) -> R,
{
    solve::<Russell, SteepestDescent, _, _, _, _>(source, destination, cost, &Options::default())
        .map(|solution| solution.distance)
}

/// Compute the Earth Mover's Distance between two signatures, and how mass moves.
///
/// Like `get_distance`, but also returns the nonzero flows, sorted by source and then destination
/// index.
pub fn get_distance_and_flow<T, U, R, C>(
    source: &Signature<T, R>,
    destination: &Signature<U, R>,
    cost: C,
) -> Result<(R, Vec<Flow<R>>), EmdError>
where
    R: Real,
    C: Fn(&T, &U) -> R,
{
    solve::<Russell, SteepestDescent, _, _, _, _>(source, destination, cost, &Options::default())
        .map(|solution| (solution.distance, solution.flows))
}

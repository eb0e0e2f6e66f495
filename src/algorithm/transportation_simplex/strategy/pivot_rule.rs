//! # Pivot rules
//!
//! Strategies for moving from basis to basis.
use itertools::iproduct;

use crate::algorithm::transportation_simplex::basis::{Basis, Potentials};
use crate::data::number_types::traits::Real;
use crate::data::transportation::TransportationProblem;
use crate::data::transportation::cost::CostMatrix;
use crate::error::EmdError;

/// A non basic cell that should enter the basis.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EnteringCell<R> {
    /// Row index.
    pub row: usize,
    /// Column index.
    pub column: usize,
    /// Cost of the cell, such that it doesn't need to be evaluated again.
    pub cost: R,
    /// Negative reduced cost of the cell.
    pub reduced_cost: R,
}

/// Deciding how to pivot.
///
/// During the transportation simplex method, one needs to decide how to move from basic solution
/// to basic solution. The pivot rule describes which non basic cell enters; the cell that leaves
/// follows from the cycle that the entering cell closes and is independent of the strategy.
pub trait PivotRule<R> {
    /// Create a new instance.
    fn new<CM>(problem: &TransportationProblem<R, CM>) -> Self
    where
        R: Real,
        CM: CostMatrix<R>,
    ;

    /// Cell selection rule.
    ///
    /// # Arguments
    ///
    /// * `problem`: Provides the costs.
    /// * `basis`: Current basis, cells in it are never selected.
    /// * `potentials`: Dual values of `basis`.
    /// * `tolerance`: Only cells with a reduced cost below `-tolerance` are considered profitable.
    ///
    /// # Return value
    ///
    /// A profitable cell, or `None` if there is none and the basis is optimal.
    ///
    /// # Errors
    ///
    /// If a cost can't be evaluated.
    fn select_entering_cell<CM>(
        &mut self,
        problem: &TransportationProblem<R, CM>,
        basis: &Basis<R>,
        potentials: &Potentials<R>,
        tolerance: R,
    ) -> Result<Option<EnteringCell<R>>, EmdError>
    where
        R: Real,
        CM: CostMatrix<R>,
    ;
}

/// Reduced cost of a non basic cell, if it is profitable.
fn profitable<R, CM>(
    problem: &TransportationProblem<R, CM>,
    basis: &Basis<R>,
    potentials: &Potentials<R>,
    tolerance: R,
    (row, column): (usize, usize),
) -> Result<Option<EnteringCell<R>>, EmdError>
where
    R: Real,
    CM: CostMatrix<R>,
{
    if basis.is_basic(row, column) {
        return Ok(None);
    }

    let cost = problem.cost(row, column)?;
    let reduced_cost = potentials.reduced_cost(row, column, cost);
    Ok((reduced_cost < -tolerance).then_some(EnteringCell { row, column, cost, reduced_cost }))
}

/// First profitable cell among cells given by their row-major index.
fn find<R, CM, I>(
    problem: &TransportationProblem<R, CM>,
    basis: &Basis<R>,
    potentials: &Potentials<R>,
    tolerance: R,
    to_consider: I,
) -> Result<Option<EnteringCell<R>>, EmdError>
where
    R: Real,
    CM: CostMatrix<R>,
    I: IntoIterator<Item = usize>,
{
    let nr_columns = problem.nr_columns();
    for index in to_consider {
        let cell = (index / nr_columns, index % nr_columns);
        if let Some(entering) = profitable(problem, basis, potentials, tolerance, cell)? {
            return Ok(Some(entering));
        }
    }

    Ok(None)
}

/// Simply pivot on the first cell, in row-major order, which has a negative reduced cost.
pub struct FirstProfitable;
impl<R> PivotRule<R> for FirstProfitable {
    fn new<CM>(_problem: &TransportationProblem<R, CM>) -> Self {
        Self
    }

    fn select_entering_cell<CM>(
        &mut self,
        problem: &TransportationProblem<R, CM>,
        basis: &Basis<R>,
        potentials: &Potentials<R>,
        tolerance: R,
    ) -> Result<Option<EnteringCell<R>>, EmdError>
    where
        R: Real,
        CM: CostMatrix<R>,
    {
        let nr_cells = problem.nr_rows() * problem.nr_columns();
        find(problem, basis, potentials, tolerance, 0..nr_cells)
    }
}

/// Small modification w.r.t. the `FirstProfitable` rule; it starts the search from the last
/// cell selected.
pub struct FirstProfitableWithMemory {
    /// Row-major index of the last cell selected.
    last_selected: Option<usize>,
}
impl<R> PivotRule<R> for FirstProfitableWithMemory {
    fn new<CM>(_problem: &TransportationProblem<R, CM>) -> Self {
        Self { last_selected: None }
    }

    fn select_entering_cell<CM>(
        &mut self,
        problem: &TransportationProblem<R, CM>,
        basis: &Basis<R>,
        potentials: &Potentials<R>,
        tolerance: R,
    ) -> Result<Option<EnteringCell<R>>, EmdError>
    where
        R: Real,
        CM: CostMatrix<R>,
    {
        let nr_cells = problem.nr_rows() * problem.nr_columns();
        let potential = match self.last_selected {
            None => find(problem, basis, potentials, tolerance, 0..nr_cells)?,
            Some(last) => find(problem, basis, potentials, tolerance, ((last + 1)..nr_cells).chain(0..last))?,
        };

        self.last_selected = potential.as_ref().map(|cell| cell.row * problem.nr_columns() + cell.column);
        Ok(potential)
    }
}

/// Pivot on the cell with the most negative reduced cost.
///
/// Of several cells with the same reduced cost, the first one in row-major order is selected.
pub struct SteepestDescent;
impl<R> PivotRule<R> for SteepestDescent {
    fn new<CM>(_problem: &TransportationProblem<R, CM>) -> Self {
        Self
    }

    fn select_entering_cell<CM>(
        &mut self,
        problem: &TransportationProblem<R, CM>,
        basis: &Basis<R>,
        potentials: &Potentials<R>,
        tolerance: R,
    ) -> Result<Option<EnteringCell<R>>, EmdError>
    where
        R: Real,
        CM: CostMatrix<R>,
    {
        let mut smallest: Option<EnteringCell<R>> = None;
        for cell in iproduct!(0..problem.nr_rows(), 0..problem.nr_columns()) {
            if let Some(candidate) = profitable(problem, basis, potentials, tolerance, cell)? {
                match smallest.as_mut() {
                    Some(existing) => if candidate.reduced_cost < existing.reduced_cost {
                        *existing = candidate;
                    },
                    None => smallest = Some(candidate),
                }
            }
        }

        Ok(smallest)
    }
}

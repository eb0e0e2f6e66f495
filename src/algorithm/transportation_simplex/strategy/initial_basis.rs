//! # Initial basis
//!
//! Strategies for finding a first basic feasible solution.
//!
//! Both strategies are greedy: repeatedly, a cell among the rows and columns that are still
//! available is selected, as much mass as possible is assigned to it, and the row or column that
//! got exhausted is no longer available. They differ only in how the cell is selected.
use itertools::iproduct;

use crate::algorithm::transportation_simplex::basis::Basis;
use crate::data::number_types::traits::Real;
use crate::data::transportation::{Side, TransportationProblem};
use crate::data::transportation::cost::CostMatrix;
use crate::error::EmdError;

/// Constructing a first basis.
pub trait InitialBasis {
    /// Find a basic feasible solution.
    ///
    /// # Arguments
    ///
    /// * `problem`: Balanced transportation problem.
    ///
    /// # Return value
    ///
    /// A spanning tree of `nr_rows + nr_columns - 1` cells with feasible flows.
    ///
    /// # Errors
    ///
    /// If a cost can't be evaluated.
    fn initial_basis<R, CM>(problem: &TransportationProblem<R, CM>) -> Result<Basis<R>, EmdError>
    where
        R: Real,
        CM: CostMatrix<R>,
    ;
}

/// Assign as much mass as possible to a cell.
///
/// The flow is the smaller of the two remaining amounts, so neither side is ever overdrawn. When
/// both sides are exhausted at the same time, only the supply is considered exhausted, such that a
/// cell with zero flow keeps the demand node connected to the tree.
///
/// # Return value
///
/// The flow of the cell and which side was exhausted.
fn exhaust<R: Real>(supply: &mut R, demand: &mut R) -> (R, Side) {
    let flow = supply.min(*demand);
    let exhausted = if *supply <= *demand { Side::Supply } else { Side::Demand };
    *supply = (*supply - flow).max(R::zero());
    *demand = (*demand - flow).max(R::zero());

    (flow, exhausted)
}

/// Which line to remove after a cell was assigned.
///
/// The exhausted line is removed, unless it is the last line on its side while lines on the other
/// side remain. That guarantees exactly one removal per assigned cell.
fn remove_row(exhausted: Side, nr_rows_left: usize, nr_columns_left: usize) -> bool {
    match exhausted {
        Side::Supply => nr_rows_left > 1,
        Side::Demand => nr_columns_left == 1 && nr_rows_left > 1,
    }
}

/// Always select the top left cell of the rows and columns still available.
pub struct NorthwestCorner;
impl InitialBasis for NorthwestCorner {
    fn initial_basis<R, CM>(problem: &TransportationProblem<R, CM>) -> Result<Basis<R>, EmdError>
    where
        R: Real,
        CM: CostMatrix<R>,
    {
        let (nr_rows, nr_columns) = (problem.nr_rows(), problem.nr_columns());

        let mut supply = problem.supply().to_vec();
        let mut demand = problem.demand().to_vec();
        let mut basis = Basis::new(problem.layout());
        let (mut row, mut column) = (0, 0);
        while row < nr_rows && column < nr_columns {
            let (flow, exhausted) = exhaust(&mut supply[row], &mut demand[column]);
            basis.insert(row, column, flow, problem.cost(row, column)?);

            if remove_row(exhausted, nr_rows - row, nr_columns - column) {
                row += 1;
            } else {
                column += 1;
            }
        }

        debug_assert!(basis.is_spanning_tree());
        Ok(basis)
    }
}

/// Russell's approximation method.
///
/// With `ū[i]` the largest cost in row `i` and `v̄[j]` the largest cost in column `j`, the cell
/// with the most negative `c[i][j] - ū[i] - v̄[j]` is selected, the first one in row-major order
/// on ties. The maxima are taken once, over the full table.
///
/// No cost table is stored. Each row remembers its best cell among the columns still available,
/// and only rows whose best cell was in a removed column are scanned again. Memory use is linear
/// in the number of nodes, at the price of evaluating some costs more than once.
///
/// This typically results in a basis that is a lot closer to optimal than the northwest corner
/// basis.
pub struct Russell;
impl InitialBasis for Russell {
    fn initial_basis<R, CM>(problem: &TransportationProblem<R, CM>) -> Result<Basis<R>, EmdError>
    where
        R: Real,
        CM: CostMatrix<R>,
    {
        let (nr_rows, nr_columns) = (problem.nr_rows(), problem.nr_columns());

        let mut row_maximum = vec![R::neg_infinity(); nr_rows];
        let mut column_maximum = vec![R::neg_infinity(); nr_columns];
        for (i, j) in iproduct!(0..nr_rows, 0..nr_columns) {
            let cost = problem.cost(i, j)?;
            row_maximum[i] = row_maximum[i].max(cost);
            column_maximum[j] = column_maximum[j].max(cost);
        }
        let maxima = Maxima { row: &row_maximum, column: &column_maximum };

        let mut supply = problem.supply().to_vec();
        let mut demand = problem.demand().to_vec();
        let mut rows = (0..nr_rows).collect::<Vec<_>>();
        let mut columns = (0..nr_columns).collect::<Vec<_>>();
        let mut candidates = rows.iter()
            .map(|&i| maxima.best_in_row(problem, i, &columns))
            .collect::<Result<Vec<_>, _>>()?;
        let mut basis = Basis::new(problem.layout());
        while !rows.is_empty() && !columns.is_empty() {
            let mut selected: Option<(usize, Candidate<R>)> = None;
            for (i, candidate) in rows.iter().filter_map(|&i| candidates[i].map(|candidate| (i, candidate))) {
                if selected.is_none_or(|(_, best)| candidate.delta < best.delta) {
                    selected = Some((i, candidate));
                }
            }
            let Some((row, Candidate { column, cost, .. })) = selected else {
                break;
            };

            let (flow, exhausted) = exhaust(&mut supply[row], &mut demand[column]);
            basis.insert(row, column, flow, cost);

            if remove_row(exhausted, rows.len(), columns.len()) {
                rows.retain(|&i| i != row);
            } else {
                columns.retain(|&j| j != column);
                for &i in &rows {
                    if candidates[i].is_some_and(|candidate| candidate.column == column) {
                        candidates[i] = maxima.best_in_row(problem, i, &columns)?;
                    }
                }
            }
        }

        debug_assert!(basis.is_spanning_tree());
        Ok(basis)
    }
}

/// Best cell of a row for Russell's method.
#[derive(Debug, Copy, Clone)]
struct Candidate<R> {
    delta: R,
    column: usize,
    cost: R,
}

/// Largest costs per row and per column.
struct Maxima<'a, R> {
    row: &'a [R],
    column: &'a [R],
}

impl<R: Real> Maxima<'_, R> {
    /// The first cell with the most negative `c[i][j] - ū[i] - v̄[j]` in a row.
    ///
    /// # Return value
    ///
    /// `None` if there are no columns left.
    fn best_in_row<CM: CostMatrix<R>>(
        &self,
        problem: &TransportationProblem<R, CM>,
        row: usize,
        columns: &[usize],
    ) -> Result<Option<Candidate<R>>, EmdError> {
        let mut best: Option<Candidate<R>> = None;
        for &column in columns {
            let cost = problem.cost(row, column)?;
            let delta = cost - self.row[row] - self.column[column];
            if best.is_none_or(|candidate| delta < candidate.delta) {
                best = Some(Candidate { delta, column, cost });
            }
        }

        Ok(best)
    }
}

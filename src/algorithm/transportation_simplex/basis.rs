//! # Basis
//!
//! A basis of a transportation problem with `m` rows and `n` columns consists of `m + n - 1`
//! cells. Seen as edges between supply and demand nodes, these cells form a spanning tree of the
//! complete bipartite graph. Rather than maintaining a basis inverse, as the general simplex
//! method does, all computations are done by traversing this tree.
//!
//! The cells are stored in an arena. Each node keeps the arena indices of its incident cells, and
//! a pivot reuses the arena slot of the leaving cell for the entering cell.
use std::cmp::Ordering;
use std::collections::HashMap;
use std::iter;

use fifo_set::FIFOSet;

use crate::data::number_types::traits::Real;
use crate::data::transportation::{NodeLayout, Side};

/// A cell of the flow matrix that is in the basis.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BasicCell<R> {
    /// Row (supply node) index.
    pub row: usize,
    /// Column (demand node) index.
    pub column: usize,
    /// Mass moved along this cell, nonnegative.
    pub flow: R,
    /// Cost of moving a unit of mass along this cell, stored to avoid evaluating it again.
    pub cost: R,
}

/// Dual values of the current basis.
///
/// For every basic cell, `u[row] + v[column]` equals the cost of that cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Potentials<R> {
    /// One value for each row.
    pub u: Vec<R>,
    /// One value for each column.
    pub v: Vec<R>,
}

impl<R: Real> Potentials<R> {
    /// Cost of a cell relative to the current basis.
    ///
    /// # Arguments
    ///
    /// * `row`: Row index.
    /// * `column`: Column index.
    /// * `cost`: Cost of the cell.
    ///
    /// # Return value
    ///
    /// The change in total cost per unit of flow sent along this cell. Zero for basic cells.
    pub fn reduced_cost(&self, row: usize, column: usize, cost: R) -> R {
        cost - self.u[row] - self.v[column]
    }
}

/// Outcome of a basis change.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Pivot<R> {
    /// Mass moved around the cycle; zero for a degenerate pivot.
    pub amount: R,
    /// Row and column of the cell that left the basis.
    pub leaving: (usize, usize),
}

/// Spanning tree of basic cells, with their flows.
#[derive(Debug, Clone)]
pub struct Basis<R> {
    cells: Vec<BasicCell<R>>,
    /// Arena indices of the cells incident to each node, indexed by node.
    incident: Vec<Vec<usize>>,
    /// Arena index of each basic cell.
    index: HashMap<(usize, usize), usize>,
    layout: NodeLayout,
}

impl<R> Basis<R>
where
    R: Real,
{
    /// Create an empty basis.
    ///
    /// Cells are added with `insert` until the basis is complete.
    pub fn new(layout: NodeLayout) -> Self {
        let nr_nodes = layout.nr_nodes();

        Self {
            cells: Vec::with_capacity(nr_nodes.saturating_sub(1)),
            incident: vec![Vec::new(); nr_nodes],
            index: HashMap::with_capacity(nr_nodes.saturating_sub(1)),
            layout,
        }
    }

    /// Add a cell while constructing an initial basis.
    ///
    /// # Arguments
    ///
    /// * `row`: Row index.
    /// * `column`: Column index.
    /// * `flow`: Nonnegative flow.
    /// * `cost`: Cost of the cell.
    pub fn insert(&mut self, row: usize, column: usize, flow: R, cost: R) {
        debug_assert!(!self.is_basic(row, column));
        debug_assert!(self.cells.len() < self.layout.nr_nodes() - 1);
        debug_assert!(flow >= R::zero());

        let slot = self.cells.len();
        self.cells.push(BasicCell { row, column, flow, cost });
        self.attach(slot);
    }

    fn attach(&mut self, slot: usize) {
        let BasicCell { row, column, .. } = self.cells[slot];
        self.incident[self.layout.node(Side::Supply, row)].push(slot);
        self.incident[self.layout.node(Side::Demand, column)].push(slot);
        self.index.insert((row, column), slot);
    }

    fn detach(&mut self, slot: usize) {
        let BasicCell { row, column, .. } = self.cells[slot];
        self.incident[self.layout.node(Side::Supply, row)].retain(|&other| other != slot);
        self.incident[self.layout.node(Side::Demand, column)].retain(|&other| other != slot);
        self.index.remove(&(row, column));
    }

    /// Number of basic cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no cells have been added yet.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether a cell is in the basis.
    pub fn is_basic(&self, row: usize, column: usize) -> bool {
        self.index.contains_key(&(row, column))
    }

    /// The basic cell at a position, if it is basic.
    pub fn cell(&self, row: usize, column: usize) -> Option<&BasicCell<R>> {
        self.index.get(&(row, column)).map(|&slot| &self.cells[slot])
    }

    /// All basic cells, in arena order.
    pub fn cells(&self) -> &[BasicCell<R>] {
        &self.cells
    }

    /// Total cost of the current flow.
    pub fn objective(&self) -> R {
        self.cells.iter().map(|cell| cell.flow * cell.cost).sum()
    }

    /// Whether the cells form a spanning tree of all nodes.
    pub fn is_spanning_tree(&self) -> bool {
        let nr_nodes = self.layout.nr_nodes();
        if self.cells.len() + 1 != nr_nodes {
            return false;
        }

        let mut visited = vec![false; nr_nodes];
        visited[0] = true;
        let mut queue = iter::once(0).collect::<FIFOSet<_>>();
        while let Some(node) = queue.pop() {
            for &slot in &self.incident[node] {
                let other = self.other_end(slot, node);
                if !visited[other] {
                    visited[other] = true;
                    queue.push(other);
                }
            }
        }

        visited.into_iter().all(|reached| reached)
    }

    /// Node at the other end of a basic cell.
    fn other_end(&self, slot: usize, node: usize) -> usize {
        let BasicCell { row, column, .. } = self.cells[slot];
        let row_node = self.layout.node(Side::Supply, row);

        if node == row_node {
            self.layout.node(Side::Demand, column)
        } else {
            row_node
        }
    }

    /// Solve the dual values of the current basis.
    ///
    /// The system `u[i] + v[j] = c[i][j]` over all basic cells has one degree of freedom, which is
    /// fixed by setting `u[0]` to zero. Because the basis is a spanning tree, the remaining values
    /// follow from a single traversal.
    pub fn potentials(&self) -> Potentials<R> {
        debug_assert!(self.is_spanning_tree());

        let mut u = vec![R::zero(); self.layout.len(Side::Supply)];
        let mut v = vec![R::zero(); self.layout.len(Side::Demand)];

        let mut visited = vec![false; self.layout.nr_nodes()];
        visited[0] = true;
        let mut queue = iter::once(0).collect::<FIFOSet<_>>();
        while let Some(node) = queue.pop() {
            for &slot in &self.incident[node] {
                let other = self.other_end(slot, node);
                if visited[other] {
                    continue;
                }
                visited[other] = true;

                let BasicCell { row, column, cost, .. } = self.cells[slot];
                match self.layout.side(other) {
                    (Side::Demand, _) => v[column] = cost - u[row],
                    (Side::Supply, _) => u[row] = cost - v[column],
                }
                queue.push(other);
            }
        }

        Potentials { u, v }
    }

    /// Path through the tree between two nodes.
    ///
    /// # Return value
    ///
    /// Arena indices of the cells on the path, starting at the cell incident to `to`.
    fn path(&self, from: usize, to: usize) -> Vec<usize> {
        let mut predecessor = vec![None; self.layout.nr_nodes()];
        let mut visited = vec![false; self.layout.nr_nodes()];
        visited[from] = true;
        let mut queue = iter::once(from).collect::<FIFOSet<_>>();
        while let Some(node) = queue.pop() {
            if node == to {
                break;
            }
            for &slot in &self.incident[node] {
                let other = self.other_end(slot, node);
                if !visited[other] {
                    visited[other] = true;
                    predecessor[other] = Some((slot, node));
                    queue.push(other);
                }
            }
        }

        let mut path = Vec::new();
        let mut current = to;
        while let Some((slot, previous)) = predecessor[current] {
            path.push(slot);
            current = previous;
        }
        debug_assert_eq!(current, from);

        path
    }

    /// Bring a cell into the basis.
    ///
    /// Adding the cell to the tree closes a unique cycle. Going around the cycle, starting with the
    /// entering cell, flow is alternately increased and decreased by the largest amount that keeps
    /// all flows nonnegative. The decreasing cell that limits this amount leaves the basis; when
    /// several do, the one with the lowest row and column.
    ///
    /// # Arguments
    ///
    /// * `row`: Row of the entering cell.
    /// * `column`: Column of the entering cell.
    /// * `cost`: Cost of the entering cell.
    ///
    /// # Return value
    ///
    /// The amount of mass that was moved, and which cell left.
    pub fn pivot(&mut self, row: usize, column: usize, cost: R) -> Pivot<R> {
        debug_assert!(!self.is_basic(row, column));
        debug_assert!(self.is_spanning_tree());

        // Cells alternate between decreasing and increasing, starting with a decreasing one
        let cycle = self.path(
            self.layout.node(Side::Supply, row),
            self.layout.node(Side::Demand, column),
        );
        debug_assert_eq!(cycle.len() % 2, 1);

        let leaving = match cycle.iter().step_by(2).copied().min_by(|&left, &right| {
            let (left, right) = (&self.cells[left], &self.cells[right]);
            left.flow.partial_cmp(&right.flow).unwrap_or(Ordering::Equal)
                .then((left.row, left.column).cmp(&(right.row, right.column)))
        }) {
            Some(slot) => slot,
            None => panic!("Cell ({}, {}) doesn't close a cycle in the basis.", row, column),
        };

        let amount = self.cells[leaving].flow;
        for (position, &slot) in cycle.iter().enumerate() {
            let cell = &mut self.cells[slot];
            cell.flow = if position % 2 == 0 {
                (cell.flow - amount).max(R::zero())
            } else {
                cell.flow + amount
            };
        }

        let BasicCell { row: leaving_row, column: leaving_column, .. } = self.cells[leaving];
        self.detach(leaving);
        self.cells[leaving] = BasicCell { row, column, flow: amount, cost };
        self.attach(leaving);

        debug_assert!(self.is_spanning_tree());
        Pivot { amount, leaving: (leaving_row, leaving_column) }
    }
}

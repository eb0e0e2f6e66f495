//! # Transportation problems
//!
//! A transportation problem moves mass from supply nodes to demand nodes at minimum cost. The
//! solver only handles balanced problems, in which the total supply equals the total demand. An
//! unbalanced problem is balanced by adding a single dummy node on the lighter side, connected to
//! every node on the other side at zero cost. Mass routed through the dummy node is mass that is
//! not moved at all.
use cumsum::cumsum_array_owned;
use enum_map::{Enum, enum_map, EnumMap};
use log::debug;

use crate::data::number_types::traits::Real;
use crate::data::transportation::cost::CostMatrix;
use crate::error::{EmdError, SignatureError};

pub mod cost;

/// The two node groups of the bipartite transportation graph.
#[derive(Enum, Debug, Copy, Clone, Eq, PartialEq)]
pub enum Side {
    /// Nodes that provide mass, indexing the rows of the cost and flow matrices.
    Supply,
    /// Nodes that receive mass, indexing the columns.
    Demand,
}

/// Numbering of all nodes of the transportation graph.
///
/// Supply nodes come first, followed by the demand nodes.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct NodeLayout {
    group_end: EnumMap<Side, usize>,
}

impl NodeLayout {
    /// Create a new layout.
    ///
    /// # Arguments
    ///
    /// * `nr_rows`: Number of supply nodes.
    /// * `nr_columns`: Number of demand nodes.
    pub fn new(nr_rows: usize, nr_columns: usize) -> Self {
        let cumulative = cumsum_array_owned([nr_rows, nr_columns]);

        Self {
            group_end: enum_map! {
                Side::Supply => cumulative[0],
                Side::Demand => cumulative[1],
            },
        }
    }

    fn group_start(&self, side: Side) -> usize {
        match side {
            Side::Supply => 0,
            Side::Demand => self.group_end[Side::Supply],
        }
    }

    /// Number of nodes on one side.
    pub fn len(&self, side: Side) -> usize {
        self.group_end[side] - self.group_start(side)
    }

    /// Total number of nodes.
    pub fn nr_nodes(&self) -> usize {
        self.group_end[Side::Demand]
    }

    /// Node index of a row or column.
    ///
    /// # Arguments
    ///
    /// * `side`: Whether the index is a row (supply) or column (demand) index.
    /// * `index`: Row or column index.
    pub fn node(&self, side: Side, index: usize) -> usize {
        debug_assert!(index < self.len(side));

        self.group_start(side) + index
    }

    /// Row or column of a node index.
    ///
    /// # Return value
    ///
    /// Inverse of `node`.
    pub fn side(&self, node: usize) -> (Side, usize) {
        debug_assert!(node < self.nr_nodes());

        if node < self.group_end[Side::Supply] {
            (Side::Supply, node)
        } else {
            (Side::Demand, node - self.group_end[Side::Supply])
        }
    }
}

/// A balanced transportation problem.
///
/// Wraps the costs between the original supply and demand nodes and adds the dummy node, if one
/// is needed. All indices used with this type include the dummy node.
#[derive(Debug, Clone)]
pub struct TransportationProblem<R, CM> {
    costs: CM,
    supply: Vec<R>,
    demand: Vec<R>,
    /// Side of the dummy node, if the problem needed balancing. It is the last node on that side.
    dummy: Option<Side>,
    /// Mass that is actually moved between original nodes.
    transported_mass: R,
    layout: NodeLayout,
}

impl<R, CM> TransportationProblem<R, CM>
where
    R: Real,
    CM: CostMatrix<R>,
{
    /// Create a new balanced problem.
    ///
    /// # Arguments
    ///
    /// * `costs`: Costs between the original nodes.
    /// * `supply`: Mass at each supply node, all positive, `costs.nr_rows()` values.
    /// * `demand`: Mass at each demand node, all positive, `costs.nr_columns()` values.
    ///
    /// # Errors
    ///
    /// If either side has no mass.
    pub fn new(costs: CM, supply: &[R], demand: &[R]) -> Result<Self, EmdError> {
        debug_assert_eq!(supply.len(), costs.nr_rows());
        debug_assert_eq!(demand.len(), costs.nr_columns());
        debug_assert!(supply.iter().chain(demand.iter()).all(|&mass| mass > R::zero()));

        let total_supply = supply.iter().copied().sum::<R>();
        let total_demand = demand.iter().copied().sum::<R>();
        let transported_mass = total_supply.min(total_demand);
        if !(transported_mass > R::zero()) {
            return Err(SignatureError::ZeroTotalWeight.into());
        }

        let mut supply = supply.to_vec();
        let mut demand = demand.to_vec();
        let difference = total_supply - total_demand;
        // Any difference gets a dummy node, however small
        let dummy = if difference == R::zero() {
            None
        } else if difference < R::zero() {
            supply.push(-difference);
            Some(Side::Supply)
        } else {
            demand.push(difference);
            Some(Side::Demand)
        };

        let layout = NodeLayout::new(supply.len(), demand.len());
        debug!(
            "Transportation problem with {} supply and {} demand nodes, dummy node: {:?}",
            supply.len(), demand.len(), dummy,
        );

        Ok(Self { costs, supply, demand, dummy, transported_mass, layout })
    }

    /// Mass available at each supply node, including the dummy node.
    pub fn supply(&self) -> &[R] {
        &self.supply
    }

    /// Mass required at each demand node, including the dummy node.
    pub fn demand(&self) -> &[R] {
        &self.demand
    }

    /// Side on which a dummy node was added, if any.
    pub fn dummy(&self) -> Option<Side> {
        self.dummy
    }

    /// Whether a cell connects to the dummy node.
    ///
    /// # Arguments
    ///
    /// * `i`: Row index.
    /// * `j`: Column index.
    pub fn is_dummy(&self, i: usize, j: usize) -> bool {
        match self.dummy {
            Some(Side::Supply) => i == self.supply.len() - 1,
            Some(Side::Demand) => j == self.demand.len() - 1,
            None => false,
        }
    }

    /// The smaller of the two original total masses.
    ///
    /// This is the amount of mass that is moved between original nodes in any feasible solution.
    pub fn transported_mass(&self) -> R {
        self.transported_mass
    }

    /// Total supply, which equals total demand, including the dummy node.
    pub fn total_mass(&self) -> R {
        self.supply.iter().copied().sum()
    }

    /// Numbering of the nodes, including the dummy node.
    pub fn layout(&self) -> NodeLayout {
        self.layout
    }

    /// Number of supply and demand nodes, including the dummy node.
    pub fn nr_nodes(&self) -> usize {
        self.layout.nr_nodes()
    }
}

impl<R, CM> CostMatrix<R> for TransportationProblem<R, CM>
where
    R: Real,
    CM: CostMatrix<R>,
{
    fn nr_rows(&self) -> usize {
        self.supply.len()
    }

    fn nr_columns(&self) -> usize {
        self.demand.len()
    }

    fn cost(&self, i: usize, j: usize) -> Result<R, EmdError> {
        debug_assert!(i < self.nr_rows() && j < self.nr_columns());

        if self.is_dummy(i, j) {
            Ok(R::zero())
        } else {
            self.costs.cost(i, j)
        }
    }
}

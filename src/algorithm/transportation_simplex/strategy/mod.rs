//! # Strategies for the transportation simplex algorithm
//!
//! Module containing different strategies for performing certain procedures in the transportation
//! simplex method: how to find a first basis, and how to decide on which cell to pivot.
pub mod initial_basis;
pub mod pivot_rule;

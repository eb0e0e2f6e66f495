//! # Storing of transportation problems in memory
//!
//! This module provides the data structures used to describe the input of a distance computation.
//! Algorithms may introduce their specific data structures in `algorithm::my_algorithm`.
pub mod number_types;
pub mod signature;
pub mod transportation;

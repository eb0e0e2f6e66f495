//! # Number types
//!
//! The number types in which weights, costs and flows are represented.
pub mod traits;

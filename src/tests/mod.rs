//! # Integration tests that require a look inside the crate.
//!
//! Each module contains a small problem with a known optimum. Convention for function names:
//!
//! * `fn source()` and `fn destination()` for the signatures
//! * `fn cost()` for the ground distance
//! * `const DISTANCE` for the expected distance

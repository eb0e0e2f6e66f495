//! # Traits
//!
//! Weights, costs, flows and potentials all live in the same number type. Only floating point
//! types are supported; the contracts below are therefore kept up to a tolerance.
use std::fmt::{Debug, Display};
use std::iter::Sum;

use num_traits::{Float, ToPrimitive};

/// Number type in which a transportation problem is solved.
///
/// Floating point arithmetic accumulates rounding errors, so the solver never compares against
/// zero directly. Instead, values are compared against a tolerance, the default of which depends
/// on the precision of the type.
pub trait Real: Float + Sum + Debug + Display + 'static {
    /// Tolerance used when no other tolerance is configured.
    ///
    /// Reduced costs that are larger than the negation of this value are considered nonnegative.
    fn default_tolerance() -> Self;

    /// Convert a count, for example a number of features.
    ///
    /// # Arguments
    ///
    /// * `value`: Count to convert.
    ///
    /// # Return value
    ///
    /// The closest representable value.
    fn from_usize(value: usize) -> Self;

    /// Representation used for error reporting.
    ///
    /// # Return value
    ///
    /// This value as an `f64`, or NaN if that conversion fails.
    fn to_reported(self) -> f64 {
        self.to_f64().unwrap_or(f64::NAN)
    }
}

macro_rules! impl_real {
    ($t:ident, $tolerance:expr) => {
        impl Real for $t {
            fn default_tolerance() -> Self {
                $tolerance
            }

            fn from_usize(value: usize) -> Self {
                value as $t
            }
        }
    }
}
impl_real!(f64, 1e-9);
impl_real!(f32, 1e-5);

use std::fmt::Debug;

use num_traits::{Float, FromPrimitive};

/// Scalar bound used throughout the crate.
///
/// Blanket-implemented for every float type that also converts from primitive
/// integers, so `f32` and `f64` both qualify.
pub trait FloatOps: Float + FromPrimitive + Debug + Send + Sync + 'static {}

impl<T> FloatOps for T where T: Float + FromPrimitive + Debug + Send + Sync + 'static {}

/// Returns `true` when `value` lies in the closed interval `[0, 1]`. NaN never does.
pub(crate) fn in_unit_interval<T: FloatOps>(value: T) -> bool {
    value >= T::zero() && value <= T::one()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_interval_bounds() {
        assert!(in_unit_interval(0.0_f64));
        assert!(in_unit_interval(1.0_f64));
        assert!(in_unit_interval(0.5_f32));
        assert!(!in_unit_interval(-1e-12_f64));
        assert!(!in_unit_interval(1.0000001_f64));
        assert!(!in_unit_interval(f64::NAN));
    }
}

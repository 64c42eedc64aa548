//! # Spectrum Summary
//!
//! Turns the eigenvalues of a decomposition into an explained-variance distribution:
//! one proportion per component plus the running (cumulative) total of those proportions.
//!
//! Proportions are computed from absolute eigenvalues, since some covariance estimators
//! yield negative eigenvalues whose magnitude still measures variance. A spectrum whose
//! magnitudes sum to zero produces all-zero proportions instead of NaN.

use log::warn;
use ndarray::{Array1, ArrayView1};

use crate::error::{PcaError, Result};
use crate::utils::{in_unit_interval, FloatOps};

/// Proportions and cumulative proportions derived from one spectrum.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumSummary<T> {
    proportions: Array1<T>,
    cumulative: Array1<T>,
}

impl<T: FloatOps> SpectrumSummary<T> {
    /// Summary of an empty spectrum.
    pub fn empty() -> Self {
        Self {
            proportions: Array1::zeros(0),
            cumulative: Array1::zeros(0),
        }
    }

    pub fn proportions(&self) -> ArrayView1<'_, T> {
        self.proportions.view()
    }

    pub fn cumulative(&self) -> ArrayView1<'_, T> {
        self.cumulative.view()
    }

    pub fn len(&self) -> usize {
        self.proportions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proportions.is_empty()
    }

    /// Smallest number of leading components whose cumulative proportion reaches `threshold`.
    ///
    /// Scans the cumulative distribution in index order and stops at the first entry
    /// `>= threshold`. When rounding keeps every entry below the threshold, the full
    /// length is returned.
    ///
    /// # Errors
    /// - `PcaError::InvalidArgument` if `threshold` is outside `[0, 1]`
    pub fn number_of_components(&self, threshold: T) -> Result<usize> {
        if !in_unit_interval(threshold) {
            return Err(PcaError::InvalidArgument {
                name: "threshold",
                value: threshold.to_f64().unwrap_or(f64::NAN),
            });
        }

        let count = self
            .cumulative
            .iter()
            .position(|&c| c >= threshold)
            .map(|i| i + 1)
            .unwrap_or(self.cumulative.len());

        Ok(count)
    }
}

impl<T: FloatOps> Default for SpectrumSummary<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Computes proportions and cumulative proportions for `eigenvalues` in one pass each.
pub fn summarize<T: FloatOps>(eigenvalues: ArrayView1<T>) -> SpectrumSummary<T> {
    let proportions = proportions(eigenvalues);
    let cumulative = cumulative_proportions(proportions.view());

    SpectrumSummary {
        proportions,
        cumulative,
    }
}

/// `|eigenvalues[i]| / sum(|eigenvalues|)`, or zeros when that sum is zero.
pub fn proportions<T: FloatOps>(eigenvalues: ArrayView1<T>) -> Array1<T> {
    let total = eigenvalues
        .iter()
        .fold(T::zero(), |acc, &value| acc + value.abs());

    if total == T::zero() {
        if !eigenvalues.is_empty() {
            warn!(
                "Spectrum of {} eigenvalues sums to zero, all proportions set to zero",
                eigenvalues.len()
            );
        }
        return Array1::zeros(eigenvalues.len());
    }

    Array1::from_iter(eigenvalues.iter().map(|&value| value.abs() / total))
}

/// Left-to-right prefix sum of `proportions`.
pub fn cumulative_proportions<T: FloatOps>(proportions: ArrayView1<T>) -> Array1<T> {
    let mut cumulative = Array1::zeros(proportions.len());
    let mut sum = T::zero();
    for (i, &ratio) in proportions.iter().enumerate() {
        sum = sum + ratio;
        cumulative[i] = sum;
    }

    cumulative
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use ndarray::{array, s, Array1};

    #[test]
    fn test_descending_spectrum() {
        let eigenvalues = array![4.0, 3.0, 2.0, 1.0];
        let summary = summarize(eigenvalues.view());

        let expected_props = array![0.4, 0.3, 0.2, 0.1];
        let expected_cum = array![0.4, 0.7, 0.9, 1.0];
        for i in 0..4 {
            assert_relative_eq!(summary.proportions()[i], expected_props[i], epsilon = 1e-12);
            assert_relative_eq!(summary.cumulative()[i], expected_cum[i], epsilon = 1e-12);
        }

        assert_eq!(summary.number_of_components(0.65).unwrap(), 2);
        assert_eq!(summary.number_of_components(0.95).unwrap(), 4);
    }

    #[test]
    fn test_zero_spectrum_has_no_nan() {
        let summary = summarize(array![0.0_f64, 0.0].view());

        assert_eq!(summary.proportions(), array![0.0, 0.0]);
        assert_eq!(summary.cumulative(), array![0.0, 0.0]);
        assert!(summary.proportions().iter().all(|p| p.is_finite()));
        assert_eq!(summary.number_of_components(0.5).unwrap(), 2);
    }

    #[test]
    fn test_empty_spectrum() {
        let empty: Array1<f64> = Array1::zeros(0);
        let summary = summarize(empty.view());

        assert!(summary.is_empty());
        assert!(summary.cumulative().is_empty());
        assert_eq!(summary.number_of_components(0.5).unwrap(), 0);
    }

    #[test]
    fn test_negative_eigenvalues_use_magnitude() {
        let summary = summarize(array![3.0_f64, -1.0].view());

        assert_relative_eq!(summary.proportions()[0], 0.75);
        assert_relative_eq!(summary.proportions()[1], 0.25);
        assert!(summary.proportions().iter().all(|&p| p >= 0.0));
    }

    #[test]
    fn test_proportions_sum_to_one() {
        let eigenvalues = array![12.5, 7.25, 3.0, 0.125, 0.0, 1e-9];
        let summary = summarize(eigenvalues.view());

        assert_abs_diff_eq!(summary.proportions().sum(), 1.0, epsilon = 1e-12);
        assert!(summary.proportions().iter().all(|&p| p >= 0.0));

        let cumulative = summary.cumulative();
        for i in 1..cumulative.len() {
            assert!(cumulative[i] >= cumulative[i - 1]);
        }
        assert_abs_diff_eq!(cumulative[cumulative.len() - 1], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_threshold_bounds() {
        let summary = summarize(array![5.0_f32, 2.0, 1.0].view());

        assert_eq!(summary.number_of_components(0.0).unwrap(), 1);
        assert_eq!(summary.number_of_components(1.0).unwrap(), 3);
    }

    #[test]
    fn test_threshold_outside_unit_interval() {
        let summary = summarize(array![1.0, 1.0].view());

        assert!(matches!(
            summary.number_of_components(1.5),
            Err(PcaError::InvalidArgument { .. })
        ));
        assert!(matches!(
            summary.number_of_components(-0.1),
            Err(PcaError::InvalidArgument { .. })
        ));
        assert!(summary.number_of_components(f64::NAN).is_err());
    }

    #[test]
    fn test_reversed_view_keeps_logical_order() {
        let eigenvalues = array![1.0, 2.0, 3.0, 4.0];
        let summary = summarize(eigenvalues.slice(s![..;-1]));

        assert_relative_eq!(summary.cumulative()[0], 0.4, epsilon = 1e-12);
        assert_relative_eq!(summary.cumulative()[1], 0.7, epsilon = 1e-12);
    }
}

//! # Decomposition Hand-off
//!
//! A [`Decomposition`] is everything a decomposition routine hands over to the analysis:
//! the spectrum (eigenvalues and, for SVD-based methods, singular values), the eigenvector
//! matrix and the column statistics used to prepare the data.
//!
//! Decompositions are produced by a [`DecompositionBackend`]. [`NalgebraBackend`] is the
//! reference implementation, built on nalgebra's SVD and symmetric eigensolver.

use std::cmp::Ordering;

use anyhow::{anyhow, bail};
use log::debug;
use nalgebra::DMatrix;
use ndarray::{Array1, Array2, ArrayView2, Axis};
use rayon::prelude::*;

use crate::dimred::pca::{AnalysisMethod, PcaConfig};
use crate::error::{PcaError, Result};
use crate::utils::FloatOps;

/// Output of a decomposition routine.
///
/// Eigenvectors are stored one per column: column `i` of [`eigenvectors`](Self::eigenvectors)
/// belongs to `eigenvalues[i]`, so the matrix has shape `(n_features, n_components)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Decomposition<T> {
    eigenvalues: Array1<T>,
    singular_values: Array1<T>,
    eigenvectors: Array2<T>,
    means: Array1<T>,
    standard_deviations: Array1<T>,
}

impl<T: FloatOps> Decomposition<T> {
    pub fn new(eigenvalues: Array1<T>, eigenvectors: Array2<T>) -> Self {
        Self {
            eigenvalues,
            singular_values: Array1::zeros(0),
            eigenvectors,
            means: Array1::zeros(0),
            standard_deviations: Array1::zeros(0),
        }
    }

    /// Decomposition with no components at all.
    pub fn empty() -> Self {
        Self::new(Array1::zeros(0), Array2::zeros((0, 0)))
    }

    pub fn with_singular_values(mut self, singular_values: Array1<T>) -> Self {
        self.singular_values = singular_values;
        self
    }

    pub fn with_means(mut self, means: Array1<T>) -> Self {
        self.means = means;
        self
    }

    pub fn with_standard_deviations(mut self, standard_deviations: Array1<T>) -> Self {
        self.standard_deviations = standard_deviations;
        self
    }

    pub fn eigenvalues(&self) -> &Array1<T> {
        &self.eigenvalues
    }

    pub fn singular_values(&self) -> &Array1<T> {
        &self.singular_values
    }

    pub fn eigenvectors(&self) -> &Array2<T> {
        &self.eigenvectors
    }

    pub fn means(&self) -> &Array1<T> {
        &self.means
    }

    pub fn standard_deviations(&self) -> &Array1<T> {
        &self.standard_deviations
    }

    /// Number of components along the component axis.
    pub fn n_components(&self) -> usize {
        self.eigenvalues.len()
    }

    /// Checks that the eigenvector matrix and the singular values line up with the eigenvalues.
    ///
    /// # Errors
    /// - `PcaError::DimensionMismatch` if the eigenvector column count differs from the
    ///   number of eigenvalues, or singular values are present with a different length
    pub fn validate(&self) -> Result<()> {
        let n = self.eigenvalues.len();

        if self.eigenvectors.ncols() != n {
            return Err(PcaError::DimensionMismatch {
                what: "eigenvector columns",
                expected: n,
                actual: self.eigenvectors.ncols(),
            });
        }

        if !self.singular_values.is_empty() && self.singular_values.len() != n {
            return Err(PcaError::DimensionMismatch {
                what: "singular values",
                expected: n,
                actual: self.singular_values.len(),
            });
        }

        Ok(())
    }
}

impl<T: FloatOps> Default for Decomposition<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// A routine able to decompose a matrix into a [`Decomposition`].
///
/// For [`AnalysisMethod::Center`] and [`AnalysisMethod::Standardize`] the input is a
/// samples × features data matrix; for the matrix methods it is an already computed
/// covariance or correlation matrix.
pub trait DecompositionBackend<T: FloatOps>: Send + Sync {
    fn decompose(&self, x: ArrayView2<T>, config: &PcaConfig) -> anyhow::Result<Decomposition<T>>;
}

/// Reference backend on top of nalgebra.
///
/// Data methods use a thin SVD of the prepared data matrix and report
/// `eigenvalues = s² / (n_samples - 1)`. Matrix methods use a symmetric
/// eigendecomposition and report no singular values. Components are returned in
/// descending order of variance.
#[derive(Debug, Clone, Copy, Default)]
pub struct NalgebraBackend;

impl DecompositionBackend<f64> for NalgebraBackend {
    fn decompose(
        &self,
        x: ArrayView2<f64>,
        config: &PcaConfig,
    ) -> anyhow::Result<Decomposition<f64>> {
        debug!(
            "Decomposing {}x{} input with {:?} (overwrite: {}, whiten: {})",
            x.nrows(),
            x.ncols(),
            config.method(),
            config.overwrite(),
            config.whiten()
        );

        ensure_finite(x)?;

        match config.method() {
            AnalysisMethod::Center => decompose_data(x, false),
            AnalysisMethod::Standardize => decompose_data(x, true),
            AnalysisMethod::CovarianceMatrix | AnalysisMethod::CorrelationMatrix => {
                decompose_matrix(x)
            }
        }
    }
}

fn decompose_data(x: ArrayView2<f64>, standardize: bool) -> anyhow::Result<Decomposition<f64>> {
    let (n_samples, n_features) = x.dim();
    if n_samples < 2 {
        bail!(
            "At least two samples are required to estimate variance, got {}",
            n_samples
        );
    }

    let means = x
        .mean_axis(Axis(0))
        .ok_or_else(|| anyhow!("Failed to compute column means"))?;
    let standard_deviations = x.std_axis(Axis(0), 1.0);

    let mut prepared = x.to_owned();
    prepared
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .for_each(|mut row| {
            row -= &means;
        });

    // Constant columns stay centred only.
    if standardize {
        let divisors = standard_deviations.mapv(|s| if s > 0.0 { s } else { 1.0 });
        prepared
            .axis_iter_mut(Axis(0))
            .into_par_iter()
            .for_each(|mut row| {
                row /= &divisors;
            });
    }

    let matrix = DMatrix::from_fn(n_samples, n_features, |i, j| prepared[[i, j]]);
    let svd = matrix
        .try_svd(false, true, f64::EPSILON, 0)
        .ok_or_else(|| anyhow!("SVD computation did not converge"))?;
    let v_t = svd
        .v_t
        .ok_or_else(|| anyhow!("SVD did not return right singular vectors"))?;

    // try_svd already orders singular values from largest to smallest.
    let n_minus_1 = (n_samples - 1) as f64;
    let singular_values = Array1::from_iter(svd.singular_values.iter().copied());
    let eigenvalues = singular_values.mapv(|s| s * s / n_minus_1);
    let eigenvectors = Array2::from_shape_fn((n_features, singular_values.len()), |(row, col)| {
        v_t[(col, row)]
    });

    Ok(Decomposition::new(eigenvalues, eigenvectors)
        .with_singular_values(singular_values)
        .with_means(means)
        .with_standard_deviations(standard_deviations))
}

fn decompose_matrix(x: ArrayView2<f64>) -> anyhow::Result<Decomposition<f64>> {
    let (rows, cols) = x.dim();
    if rows != cols {
        bail!(
            "Expected a square covariance or correlation matrix, got {}x{}",
            rows,
            cols
        );
    }

    let matrix = DMatrix::from_fn(rows, cols, |i, j| x[[i, j]]);
    let eigen = matrix
        .try_symmetric_eigen(f64::EPSILON, 0)
        .ok_or_else(|| anyhow!("Symmetric eigendecomposition did not converge"))?;

    let values: Vec<f64> = eigen.eigenvalues.iter().copied().collect();
    let order = descending_order(&values);

    let eigenvalues = Array1::from_iter(order.iter().map(|&i| values[i]));
    let eigenvectors = Array2::from_shape_fn((rows, order.len()), |(row, col)| {
        eigen.eigenvectors[(row, order[col])]
    });

    Ok(Decomposition::new(eigenvalues, eigenvectors))
}

// nalgebra's SVD sorts with `partial_cmp(..).expect(..)` and panics on NaN.
fn ensure_finite(x: ArrayView2<f64>) -> anyhow::Result<()> {
    if let Some(((row, col), value)) = x.indexed_iter().find(|(_, v)| !v.is_finite()) {
        bail!("Input contains a non-finite value {} at ({}, {})", value, row, col);
    }
    Ok(())
}

fn descending_order(values: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[b].partial_cmp(&values[a]).unwrap_or(Ordering::Equal));
    order
}

//! # Principal Component Analysis
//!
//! Owns the spectrum handed over by a decomposition backend, summarizes it into
//! explained-variance proportions, and decides how many components to retain.
//!
//! An analysis starts out [`AnalysisState::Unbuilt`]. Loading a decomposition stores the
//! raw spectrum; [`PrincipalComponentAnalysis::build_components`] derives the proportions
//! and exposes the component views. Queries made before that return empty results.

use log::debug;
use ndarray::{ArrayView1, ArrayView2};

use crate::dimred::pca::components::ComponentCollection;
use crate::dimred::pca::decomposition::{Decomposition, DecompositionBackend};
use crate::dimred::pca::spectrum::{summarize, SpectrumSummary};
use crate::dimred::pca::{AnalysisMethod, PcaConfig};
use crate::error::{PcaError, Result};
use crate::utils::FloatOps;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisState {
    Unbuilt,
    Built,
}

#[derive(Debug, Clone)]
pub struct PrincipalComponentAnalysis<T: FloatOps> {
    config: PcaConfig,
    decomposition: Decomposition<T>,
    summary: SpectrumSummary<T>,
    state: AnalysisState,
    number_of_outputs: usize,
}

impl<T: FloatOps> PrincipalComponentAnalysis<T> {
    pub fn new(config: PcaConfig, number_of_outputs: usize) -> Self {
        Self {
            config,
            decomposition: Decomposition::empty(),
            summary: SpectrumSummary::empty(),
            state: AnalysisState::Unbuilt,
            number_of_outputs,
        }
    }

    /// Stores the output of a decomposition and returns to the unbuilt state.
    ///
    /// # Errors
    /// - `PcaError::DimensionMismatch` if the decomposition is internally inconsistent
    pub fn load_decomposition(&mut self, decomposition: Decomposition<T>) -> Result<()> {
        decomposition.validate()?;

        self.decomposition = decomposition;
        self.summary = SpectrumSummary::empty();
        self.state = AnalysisState::Unbuilt;
        Ok(())
    }

    /// Summarizes the loaded spectrum and materializes one component per eigenvalue.
    ///
    /// A retained-output count of 0, or one above the number of components found, is
    /// reset to keep every component.
    pub fn build_components(&mut self) {
        self.summary = summarize(self.decomposition.eigenvalues().view());
        self.state = AnalysisState::Built;

        let maximum = self.maximum_number_of_outputs();
        if self.number_of_outputs == 0 || self.number_of_outputs > maximum {
            self.number_of_outputs = maximum;
        }

        debug!(
            "Built {} components, retaining {}",
            maximum, self.number_of_outputs
        );
    }

    /// Loads `decomposition` and builds its components in one step.
    pub fn fit_decomposition(&mut self, decomposition: Decomposition<T>) -> Result<&mut Self> {
        self.load_decomposition(decomposition)?;
        self.build_components();
        Ok(self)
    }

    /// Runs `backend` on `x` with this analysis' configuration, then builds the components.
    ///
    /// # Errors
    /// - `PcaError::Backend` if the backend fails to decompose `x`
    /// - `PcaError::DimensionMismatch` if the backend returns an inconsistent decomposition
    pub fn fit<B>(&mut self, x: ArrayView2<T>, backend: &B) -> Result<&mut Self>
    where
        B: DecompositionBackend<T> + ?Sized,
    {
        let decomposition = backend.decompose(x, &self.config)?;
        self.fit_decomposition(decomposition)
    }

    pub fn state(&self) -> AnalysisState {
        self.state
    }

    pub fn is_built(&self) -> bool {
        self.state == AnalysisState::Built
    }

    pub fn config(&self) -> &PcaConfig {
        &self.config
    }

    pub fn method(&self) -> AnalysisMethod {
        self.config.method()
    }

    pub fn overwrite(&self) -> bool {
        self.config.overwrite()
    }

    pub fn whiten(&self) -> bool {
        self.config.whiten()
    }

    pub fn eigenvalues(&self) -> ArrayView1<'_, T> {
        self.decomposition.eigenvalues().view()
    }

    /// Empty unless the decomposition was SVD-based.
    pub fn singular_values(&self) -> ArrayView1<'_, T> {
        self.decomposition.singular_values().view()
    }

    /// Eigenvector matrix, one component per column.
    pub fn component_vectors(&self) -> ArrayView2<'_, T> {
        self.decomposition.eigenvectors().view()
    }

    /// Eigenvectors copied out as one row vector per component.
    pub fn component_vectors_as_rows(&self) -> Vec<Vec<T>> {
        self.decomposition
            .eigenvectors()
            .columns()
            .into_iter()
            .map(|column| column.to_vec())
            .collect()
    }

    pub fn means(&self) -> ArrayView1<'_, T> {
        self.decomposition.means().view()
    }

    pub fn standard_deviations(&self) -> ArrayView1<'_, T> {
        self.decomposition.standard_deviations().view()
    }

    pub fn component_proportions(&self) -> ArrayView1<'_, T> {
        self.summary.proportions()
    }

    pub fn cumulative_proportions(&self) -> ArrayView1<'_, T> {
        self.summary.cumulative()
    }

    /// Component views, empty until the components have been built.
    pub fn components(&self) -> ComponentCollection<'_, T> {
        ComponentCollection::new(self, self.summary.len())
    }

    pub fn number_of_outputs(&self) -> usize {
        self.number_of_outputs
    }

    /// Number of components found by the decomposition.
    pub fn maximum_number_of_outputs(&self) -> usize {
        self.decomposition.n_components()
    }

    /// # Errors
    /// - `PcaError::OutOfRange` if `number_of_outputs` exceeds
    ///   [`maximum_number_of_outputs`](Self::maximum_number_of_outputs)
    pub fn set_number_of_outputs(&mut self, number_of_outputs: usize) -> Result<()> {
        let maximum = self.maximum_number_of_outputs();
        if number_of_outputs > maximum {
            return Err(PcaError::OutOfRange {
                value: number_of_outputs,
                maximum,
            });
        }

        self.number_of_outputs = number_of_outputs;
        Ok(())
    }

    /// Smallest number of leading components explaining at least `threshold` of the variance.
    ///
    /// # Errors
    /// - `PcaError::InvalidArgument` if `threshold` is outside `[0, 1]`
    pub fn number_of_components(&self, threshold: T) -> Result<usize> {
        self.summary.number_of_components(threshold)
    }

    /// Proportion stored at index `number_of_outputs`.
    ///
    /// This is the proportion of the first component *not* retained, not the cumulative
    /// proportion of the retained ones. Returns `None` when that index does not exist,
    /// which includes the unbuilt state and the case where every component is retained.
    pub fn explained_variance(&self) -> Option<T> {
        self.summary
            .proportions()
            .get(self.number_of_outputs)
            .copied()
    }

    /// Retains the fewest components whose cumulative proportion reaches `threshold`.
    ///
    /// Returns the new retained-output count.
    ///
    /// # Errors
    /// - `PcaError::InvalidArgument` if `threshold` is outside `[0, 1]`
    pub fn set_retained_count_by_variance(&mut self, threshold: T) -> Result<usize> {
        let count = self.number_of_components(threshold)?;
        self.number_of_outputs = count;

        debug!(
            "Retaining {} of {} components for variance threshold {:?}",
            count,
            self.maximum_number_of_outputs(),
            threshold
        );
        Ok(count)
    }
}

impl<T: FloatOps> Default for PrincipalComponentAnalysis<T> {
    fn default() -> Self {
        Self::new(PcaConfig::default(), 0)
    }
}

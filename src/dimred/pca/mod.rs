mod analysis;
mod components;
mod decomposition;
mod spectrum;

pub use analysis::AnalysisState;
pub use analysis::PrincipalComponentAnalysis;
pub use components::Component;
pub use components::ComponentCollection;
pub use components::ComponentIter;
pub use decomposition::Decomposition;
pub use decomposition::DecompositionBackend;
pub use decomposition::NalgebraBackend;
pub use spectrum::{cumulative_proportions, proportions, summarize, SpectrumSummary};

use crate::utils::FloatOps;

/// How the decomposition backend should treat its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisMethod {
    /// Input is a data matrix; columns are centred before decomposition.
    Center,
    /// Input is a data matrix; columns are centred and scaled to unit variance.
    Standardize,
    /// Input is already a covariance matrix.
    CovarianceMatrix,
    /// Input is already a correlation matrix.
    CorrelationMatrix,
}

impl Default for AnalysisMethod {
    fn default() -> Self {
        Self::Center
    }
}

/// Flags handed through to the decomposition backend.
///
/// The analysis itself only stores these; `overwrite` and `whiten` are honoured (or not)
/// by whichever backend runs the decomposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PcaConfig {
    method: AnalysisMethod,
    overwrite: bool,
    whiten: bool,
}

impl PcaConfig {
    pub fn method(&self) -> AnalysisMethod {
        self.method
    }

    pub fn overwrite(&self) -> bool {
        self.overwrite
    }

    pub fn whiten(&self) -> bool {
        self.whiten
    }
}

/// Builder for configuring and creating [`PrincipalComponentAnalysis`] instances.
///
/// # Example Usage
/// ```ignore
/// let mut pca = PcaBuilder::new()
///     .method(AnalysisMethod::Standardize)
///     .whiten(true)
///     .build::<f64>();
/// pca.fit(x.view(), &NalgebraBackend)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct PcaBuilder {
    config: PcaConfig,
    number_of_outputs: usize,
}

impl PcaBuilder {
    /// Creates a new builder with default parameters.
    ///
    /// Default values:
    /// - `method`: Center
    /// - `overwrite`: false
    /// - `whiten`: false
    /// - `number_of_outputs`: 0 (retain every component once built)
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how the backend interprets its input.
    ///
    /// Data methods (`Center`, `Standardize`) produce singular values; matrix methods do not.
    pub fn method(mut self, method: AnalysisMethod) -> Self {
        self.config.method = method;
        self
    }

    /// Sets whether the backend may reuse the input buffer.
    ///
    /// Stored for the backend; the analysis never modifies its input.
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.config.overwrite = overwrite;
        self
    }

    /// Sets whether projected output should be rescaled to unit variance.
    ///
    /// Stored for the backend; the analysis does not project data.
    pub fn whiten(mut self, whiten: bool) -> Self {
        self.config.whiten = whiten;
        self
    }

    /// Initial retained-output count.
    ///
    /// Values of 0 or above the number of components found are replaced by the full
    /// component count when the components are built.
    pub fn number_of_outputs(mut self, number_of_outputs: usize) -> Self {
        self.number_of_outputs = number_of_outputs;
        self
    }

    pub fn config(&self) -> PcaConfig {
        self.config
    }

    pub fn build<T: FloatOps>(self) -> PrincipalComponentAnalysis<T> {
        PrincipalComponentAnalysis::new(self.config, self.number_of_outputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = PcaBuilder::new().config();

        assert_eq!(config.method(), AnalysisMethod::Center);
        assert!(!config.overwrite());
        assert!(!config.whiten());
    }

    #[test]
    fn test_builder_passes_flags_through() {
        let pca = PcaBuilder::new()
            .method(AnalysisMethod::CorrelationMatrix)
            .overwrite(true)
            .whiten(true)
            .number_of_outputs(3)
            .build::<f32>();

        assert_eq!(pca.method(), AnalysisMethod::CorrelationMatrix);
        assert!(pca.overwrite());
        assert!(pca.whiten());
        assert_eq!(pca.number_of_outputs(), 3);
        assert!(!pca.is_built());
    }
}

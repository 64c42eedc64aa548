//! # Dimensionality Reduction
//!
//! This module interprets the output of dimensionality reduction decompositions.
//!
//! ## Currently Available
//! - **PCA** ([`pca`]): explained-variance summaries of a principal component spectrum,
//!   component views and threshold-based selection of how many components to keep
//!
//! The decomposition itself is pluggable through [`pca::DecompositionBackend`];
//! [`pca::NalgebraBackend`] is provided as a reference implementation.

pub mod pca;

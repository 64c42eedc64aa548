use std::iter::FusedIterator;

use ndarray::{ArrayView1, Axis};

use crate::dimred::pca::analysis::PrincipalComponentAnalysis;
use crate::utils::FloatOps;

/// One principal direction of a built analysis.
///
/// Holds only an index and a borrow of the owning analysis; every value is read
/// through the owner, so a component can not outlive or observe a rebuild of it.
#[derive(Debug, Clone, Copy)]
pub struct Component<'a, T: FloatOps> {
    index: usize,
    analysis: &'a PrincipalComponentAnalysis<T>,
}

impl<'a, T: FloatOps> Component<'a, T> {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn eigenvalue(&self) -> T {
        self.analysis.eigenvalues()[self.index]
    }

    /// `None` when the decomposition produced no singular values.
    pub fn singular_value(&self) -> Option<T> {
        self.analysis.singular_values().get(self.index).copied()
    }

    pub fn eigenvector(&self) -> ArrayView1<'a, T> {
        self.analysis
            .component_vectors()
            .index_axis_move(Axis(1), self.index)
    }

    pub fn proportion(&self) -> T {
        self.analysis.component_proportions()[self.index]
    }

    pub fn cumulative_proportion(&self) -> T {
        self.analysis.cumulative_proportions()[self.index]
    }
}

/// Read-only, indexable collection of the components of an analysis.
#[derive(Debug, Clone, Copy)]
pub struct ComponentCollection<'a, T: FloatOps> {
    analysis: &'a PrincipalComponentAnalysis<T>,
    len: usize,
}

impl<'a, T: FloatOps> ComponentCollection<'a, T> {
    pub(crate) fn new(analysis: &'a PrincipalComponentAnalysis<T>, len: usize) -> Self {
        Self { analysis, len }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, index: usize) -> Option<Component<'a, T>> {
        (index < self.len).then_some(Component {
            index,
            analysis: self.analysis,
        })
    }

    pub fn iter(&self) -> ComponentIter<'a, T> {
        ComponentIter {
            collection: *self,
            next: 0,
        }
    }
}

impl<'a, T: FloatOps> IntoIterator for ComponentCollection<'a, T> {
    type Item = Component<'a, T>;
    type IntoIter = ComponentIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct ComponentIter<'a, T: FloatOps> {
    collection: ComponentCollection<'a, T>,
    next: usize,
}

impl<'a, T: FloatOps> Iterator for ComponentIter<'a, T> {
    type Item = Component<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let component = self.collection.get(self.next)?;
        self.next += 1;
        Some(component)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.collection.len() - self.next;
        (remaining, Some(remaining))
    }
}

impl<T: FloatOps> ExactSizeIterator for ComponentIter<'_, T> {}

impl<T: FloatOps> FusedIterator for ComponentIter<'_, T> {}

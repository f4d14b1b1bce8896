use crate::sample::{FeatureVector, InstanceSet};
use crate::{Error, Result};


/// A binary classification problem derived from an [`InstanceSet`].
/// The `i`-th row of the problem refers to the instance `rows[i]`,
/// which is positive iff its label is `target`.
/// Rows may repeat (e.g., a bootstrap resample).
#[derive(Debug, Clone)]
pub struct BinaryProblem<'a> {
    set: &'a InstanceSet,
    target: usize,
    rows: Vec<usize>,
    n_positive: usize,
}


impl<'a> BinaryProblem<'a> {
    /// Construct the problem `target` vs. the rest over all instances.
    pub fn one_vs_rest(set: &'a InstanceSet, target: usize) -> Result<Self> {
        let rows = (0..set.len()).collect();
        Self::from_rows(set, target, rows)
    }


    /// Construct the problem `target` vs. the rest over the given rows.
    pub fn from_rows(set: &'a InstanceSet, target: usize, rows: Vec<usize>)
        -> Result<Self>
    {
        if target >= set.n_labels() {
            return Err(Error::invalid(
                "target",
                format!("label index {target} is out of range. \
                    the instance set has {} labels.", set.n_labels())
            ));
        }
        if rows.is_empty() {
            return Err(Error::EmptyInstanceSet);
        }
        if let Some(&row) = rows.iter().find(|&&r| r >= set.len()) {
            return Err(Error::ShapeMismatch(format!(
                "row {row} is out of range. the instance set has {} instances.",
                set.len()
            )));
        }

        let n_positive = rows.iter()
            .filter(|&&r| set.label(r) == target)
            .count();
        Ok(Self { set, target, rows, n_positive })
    }


    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }


    /// Returns `true` if the problem has no row.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }


    /// Returns the number of positive rows.
    pub fn n_positive(&self) -> usize {
        self.n_positive
    }


    /// Returns the number of negative rows.
    pub fn n_negative(&self) -> usize {
        self.rows.len() - self.n_positive
    }


    /// Returns `+1.0` if the `i`-th row is positive, `-1.0` otherwise.
    #[inline(always)]
    pub fn sign(&self, i: usize) -> f64 {
        if self.set.label(self.rows[i]) == self.target { 1.0 } else { -1.0 }
    }


    /// Returns the feature vector of the `i`-th row.
    #[inline(always)]
    pub fn features(&self, i: usize) -> &'a FeatureVector {
        self.set.features(self.rows[i])
    }


    /// Returns the target label index.
    pub fn target(&self) -> usize {
        self.target
    }


    /// Returns the instance indices of the rows.
    pub fn rows(&self) -> &[usize] {
        &self.rows[..]
    }


    /// Returns the feature dimension of the underlying instance set.
    pub fn n_features(&self) -> usize {
        self.set.n_features()
    }


    /// Returns the underlying instance set.
    pub fn instance_set(&self) -> &'a InstanceSet {
        self.set
    }
}

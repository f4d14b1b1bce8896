use serde::{Serialize, Deserialize};

use crate::sample::FeatureVector;
use crate::solver::LinearSeparator;
use crate::{Error, Result};


/// Dense one-vs-all weights.
/// The weight for feature `f` and label `l` is stored at `f * L + l`,
/// so the weights of one feature are contiguous.
/// Each label also owns an intercept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightMatrix {
    n_labels: usize,
    n_features: usize,
    weights: Vec<f64>,
    intercepts: Vec<f64>,
}


impl WeightMatrix {
    /// The all-zero matrix.
    pub fn zeros(n_labels: usize, n_features: usize) -> Result<Self> {
        let n_weights = Self::n_weights(n_labels, n_features)?;
        Ok(Self {
            n_labels,
            n_features,
            weights: vec![0.0; n_weights],
            intercepts: vec![0.0; n_labels],
        })
    }


    fn n_weights(n_labels: usize, n_features: usize) -> Result<usize> {
        n_labels.checked_mul(n_features)
            .ok_or_else(|| Error::ShapeMismatch(format!(
                "{n_labels} labels x {n_features} features overflow the weight matrix"
            )))
    }


    /// Construct a matrix from flattened weights and intercepts.
    pub fn from_raw(
        n_labels: usize,
        n_features: usize,
        weights: Vec<f64>,
        intercepts: Vec<f64>,
    ) -> Result<Self>
    {
        let n_weights = Self::n_weights(n_labels, n_features)?;
        if weights.len() != n_weights {
            return Err(Error::ShapeMismatch(format!(
                "expected {n_weights} weights ({n_labels} labels x {n_features} features), got {}",
                weights.len(),
            )));
        }
        if intercepts.len() != n_labels {
            return Err(Error::ShapeMismatch(format!(
                "expected {n_labels} intercepts, got {}", intercepts.len(),
            )));
        }
        Ok(Self { n_labels, n_features, weights, intercepts })
    }


    /// Construct a matrix whose `l`-th column is `columns[l]`.
    pub fn from_columns(n_features: usize, columns: &[LinearSeparator]) -> Result<Self> {
        let mut matrix = Self::zeros(columns.len(), n_features)?;
        for (label, column) in columns.iter().enumerate() {
            matrix.set_column(label, column)?;
        }
        Ok(matrix)
    }


    /// Returns the number of labels.
    pub fn n_labels(&self) -> usize {
        self.n_labels
    }


    /// Returns the feature dimension.
    pub fn n_features(&self) -> usize {
        self.n_features
    }


    /// Returns the flattened weights.
    pub fn weights(&self) -> &[f64] {
        &self.weights[..]
    }


    /// Returns the intercepts.
    pub fn intercepts(&self) -> &[f64] {
        &self.intercepts[..]
    }


    /// Returns the weight of `feature` for `label`.
    #[inline(always)]
    pub fn get(&self, feature: usize, label: usize) -> f64 {
        self.weights[feature * self.n_labels + label]
    }


    /// Returns the separator of `label`.
    pub fn column(&self, label: usize) -> LinearSeparator {
        let weights = (0..self.n_features)
            .map(|f| self.get(f, label))
            .collect::<Vec<_>>();
        LinearSeparator::new(weights, self.intercepts[label])
    }


    /// Overwrite the separator of `label`.
    /// `separator` may be shorter than the feature dimension;
    /// the missing weights are zero.
    pub fn set_column(&mut self, label: usize, separator: &LinearSeparator) -> Result<()> {
        if label >= self.n_labels {
            return Err(Error::ShapeMismatch(format!(
                "label index {label} is out of range for {} labels", self.n_labels,
            )));
        }
        if separator.n_features() > self.n_features {
            return Err(Error::ShapeMismatch(format!(
                "separator has {} features, the matrix has {}",
                separator.n_features(), self.n_features,
            )));
        }

        for f in 0..self.n_features {
            let w = separator.weights().get(f).copied().unwrap_or(0.0);
            self.weights[f * self.n_labels + label] = w;
        }
        self.intercepts[label] = separator.intercept();
        Ok(())
    }


    /// Returns `w_label^T x + b_label`.
    /// Features beyond the dimension of the matrix contribute nothing.
    #[inline(always)]
    pub fn score(&self, label: usize, x: &FeatureVector) -> f64 {
        let sum = x.iter()
            .filter(|&(f, _)| f < self.n_features)
            .map(|(f, v)| self.get(f, label) * v)
            .sum::<f64>();
        sum + self.intercepts[label]
    }


    /// Returns `a * self + b * other`.
    pub(crate) fn linear_combination(&self, a: f64, other: &Self, b: f64) -> Result<Self> {
        if self.n_labels != other.n_labels || self.n_features != other.n_features {
            return Err(Error::ShapeMismatch(format!(
                "cannot combine a {}x{} matrix with a {}x{} matrix",
                self.n_labels, self.n_features, other.n_labels, other.n_features,
            )));
        }
        let weights = self.weights.iter()
            .zip(&other.weights)
            .map(|(x, y)| a * x + b * y)
            .collect();
        let intercepts = self.intercepts.iter()
            .zip(&other.intercepts)
            .map(|(x, y)| a * x + b * y)
            .collect();
        Ok(Self { weights, intercepts, ..*self })
    }
}

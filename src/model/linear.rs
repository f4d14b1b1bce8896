use serde::{Serialize, Deserialize};

use std::path::Path;

use super::classifier::Classifier;
use super::io::{self, Model};
use super::matrix::WeightMatrix;

use crate::sample::{FeatureVector, LabelSet};
use crate::solver::LinearSeparator;
use crate::{Error, Result};


/// The one-vs-all linear model.
/// The score of label `l` for `x` is `w_l^T x + b_l`.
/// This model is produced by
/// [`LinearTrainer`](crate::LinearTrainer) and
/// [`AdaBoostTrainer`](crate::AdaBoostTrainer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    labels: LabelSet,
    matrix: WeightMatrix,
}


impl LinearModel {
    /// Construct a model from the labels and their weights.
    pub fn new(labels: LabelSet, matrix: WeightMatrix) -> Result<Self> {
        if labels.is_empty() {
            return Err(Error::invalid("labels", "a model needs at least one label"));
        }
        if labels.len() != matrix.n_labels() {
            return Err(Error::ShapeMismatch(format!(
                "{} labels for a matrix of {} labels",
                labels.len(), matrix.n_labels(),
            )));
        }
        Ok(Self { labels, matrix })
    }


    /// Construct a model whose `l`-th label has the separator `columns[l]`.
    pub fn from_separators(
        labels: LabelSet,
        n_features: usize,
        columns: &[LinearSeparator],
    ) -> Result<Self>
    {
        let matrix = WeightMatrix::from_columns(n_features, columns)?;
        Self::new(labels, matrix)
    }


    /// Returns the index of the label named `name`.
    pub fn label_index(&self, name: &str) -> Option<usize> {
        self.labels.index_of(name)
    }


    /// Returns the weights.
    pub fn matrix(&self) -> &WeightMatrix {
        &self.matrix
    }


    /// Returns the feature dimension.
    pub fn n_features(&self) -> usize {
        self.matrix.n_features()
    }


    /// Returns the separator of `label`.
    pub fn separator(&self, label: usize) -> LinearSeparator {
        self.matrix.column(label)
    }


    /// Returns the model `wa * a + wb * b`.
    /// Both models must share the labels and the feature dimension.
    pub fn join(a: &Self, wa: f64, b: &Self, wb: f64) -> Result<Self> {
        if a.labels != b.labels {
            return Err(Error::ShapeMismatch(
                "cannot join models with different labels".into()
            ));
        }
        let matrix = a.matrix.linear_combination(wa, &b.matrix, wb)?;
        Ok(Self { labels: a.labels.clone(), matrix })
    }


    /// Writes this model to `path`.
    /// The file is gzip-compressed if `path` ends with `.gz`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        io::save(path, |w| io::write_linear(w, self))
    }


    /// Reads a plain model from `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        match Model::load(path)? {
            Model::Linear(model) => Ok(model),
            Model::Vote(_) => Err(Error::model_format(
                4, "expected a plain model, found a voted model"
            )),
        }
    }
}


impl Classifier for LinearModel {
    fn labels(&self) -> &LabelSet {
        &self.labels
    }


    #[inline(always)]
    fn score(&self, label: usize, x: &FeatureVector) -> f64 {
        self.matrix.score(label, x)
    }
}

use super::feature_vector::{FeatureKind, FeatureVector};
use super::label_set::LabelSet;

use crate::{Error, Result};


/// Struct `InstanceSet` holds the training instances.
/// Each instance is a pair of a label and a sparse feature vector.
/// The set is immutable after construction;
/// trainers only read from it.
#[derive(Debug, Clone)]
pub struct InstanceSet {
    label_set: LabelSet,
    labels: Vec<usize>,
    features: Vec<FeatureVector>,
    kind: FeatureKind,
    n_features: usize,
}


impl InstanceSet {
    /// Construct a new instance set.
    /// `labels[i]` is the label of `features[i]`.
    /// Every feature vector must be of the given `kind`.
    pub fn new<S: AsRef<str>>(
        labels: Vec<S>,
        features: Vec<FeatureVector>,
        kind: FeatureKind,
    ) -> Result<Self>
    {
        if labels.len() != features.len() {
            return Err(Error::ShapeMismatch(format!(
                "{} labels for {} feature vectors",
                labels.len(),
                features.len(),
            )));
        }
        if labels.is_empty() {
            return Err(Error::EmptyInstanceSet);
        }
        if let Some(i) = features.iter().position(|x| x.kind() != kind) {
            return Err(Error::invalid(
                "kind",
                format!("instance {i} is not a {kind} feature vector")
            ));
        }

        let label_set = LabelSet::new(labels.iter());
        let labels = labels.iter()
            .map(|s| {
                label_set.index_of(s.as_ref())
                    .ok_or_else(|| Error::invalid("label", "unknown label"))
            })
            .collect::<Result<Vec<_>>>()?;

        let n_features = match features.iter().filter_map(|x| x.max_index()).max() {
            None => 0,
            Some(i) => i.checked_add(1)
                .ok_or_else(|| Error::invalid("indices", "feature index overflows the dimension"))?,
        };

        let set = Self { label_set, labels, features, kind, n_features };
        Ok(set)
    }


    /// Returns the number of instances.
    pub fn len(&self) -> usize {
        self.labels.len()
    }


    /// Returns `true` if there is no instance.
    /// An `InstanceSet` built by [`InstanceSet::new`] is never empty.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }


    /// Returns the pair of the number of instances and
    /// the feature dimension.
    pub fn shape(&self) -> (usize, usize) {
        (self.len(), self.n_features)
    }


    /// Returns the feature dimension, i.e., the largest index plus one.
    pub fn n_features(&self) -> usize {
        self.n_features
    }


    /// Returns the distinct labels.
    pub fn label_set(&self) -> &LabelSet {
        &self.label_set
    }


    /// Returns the number of distinct labels.
    pub fn n_labels(&self) -> usize {
        self.label_set.len()
    }


    /// Returns the label index of the `i`-th instance.
    pub fn label(&self, i: usize) -> usize {
        self.labels[i]
    }


    /// Returns the label indices of all instances.
    pub fn labels(&self) -> &[usize] {
        &self.labels[..]
    }


    /// Returns the feature vector of the `i`-th instance.
    pub fn features(&self, i: usize) -> &FeatureVector {
        &self.features[i]
    }


    /// Returns whether the instances are binary or valued.
    pub fn kind(&self) -> FeatureKind {
        self.kind
    }


    /// Returns the number of instances whose label index is `label`.
    pub fn count_label(&self, label: usize) -> usize {
        self.labels.iter()
            .filter(|&&l| l == label)
            .count()
    }
}

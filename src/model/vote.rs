use serde::{Serialize, Deserialize};

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use super::classifier::Classifier;
use super::io::{self, Model};
use super::matrix::WeightMatrix;

use crate::sample::{FeatureVector, LabelSet};
use crate::{Error, Result};


/// How [`VoteModel`] turns the per-vote scores into one score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    /// Sum of the per-vote scores.
    #[default]
    Sum,
    /// Mean of the per-vote scores.
    Mean,
    /// Number of votes with a positive score.
    Majority,
}


impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Sum => write!(f, "sum"),
            Self::Mean => write!(f, "mean"),
            Self::Majority => write!(f, "majority"),
        }
    }
}


impl FromStr for Aggregation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "sum" => Ok(Self::Sum),
            "mean" => Ok(Self::Mean),
            "majority" => Ok(Self::Majority),
            _ => Err(Error::invalid(
                "aggregation",
                format!("expected `sum`, `mean`, or `majority`. got `{s}`.")
            )),
        }
    }
}


/// The bootstrap-voting model.
/// Each vote is a full one-vs-all weight matrix
/// trained on its own resample.
/// This model is produced by [`VoteTrainer`](crate::VoteTrainer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteModel {
    labels: LabelSet,
    votes: Vec<WeightMatrix>,
    #[serde(default)]
    aggregation: Aggregation,
}


impl VoteModel {
    /// Construct a model from the labels and the votes.
    /// Every vote must have the same shape.
    pub fn new(labels: LabelSet, votes: Vec<WeightMatrix>) -> Result<Self> {
        if labels.is_empty() {
            return Err(Error::invalid("labels", "a model needs at least one label"));
        }
        let Some(first) = votes.first() else {
            return Err(Error::invalid("votes", "a voted model needs at least one vote"));
        };
        let n_features = first.n_features();

        let bad = votes.iter()
            .position(|m| m.n_labels() != labels.len() || m.n_features() != n_features);
        if let Some(k) = bad {
            return Err(Error::ShapeMismatch(format!(
                "vote {k} is {}x{}, expected {}x{n_features}",
                votes[k].n_labels(), votes[k].n_features(), labels.len(),
            )));
        }

        Ok(Self { labels, votes, aggregation: Aggregation::default() })
    }


    /// Set the aggregation of the per-vote scores.
    /// Default is [`Aggregation::Sum`].
    pub fn aggregation(mut self, aggregation: Aggregation) -> Self {
        self.aggregation = aggregation;
        self
    }


    /// Returns the current aggregation.
    pub fn current_aggregation(&self) -> Aggregation {
        self.aggregation
    }


    /// Returns the index of the label named `name`.
    pub fn label_index(&self, name: &str) -> Option<usize> {
        self.labels.index_of(name)
    }


    /// Returns the number of votes.
    pub fn n_votes(&self) -> usize {
        self.votes.len()
    }


    /// Returns the votes.
    pub fn votes(&self) -> &[WeightMatrix] {
        &self.votes[..]
    }


    /// Returns the feature dimension.
    pub fn n_features(&self) -> usize {
        self.votes[0].n_features()
    }


    /// Returns the score of `label` for `x` under every vote.
    pub fn vote_scores(&self, label: usize, x: &FeatureVector) -> Vec<f64> {
        self.votes.iter()
            .map(|m| m.score(label, x))
            .collect()
    }


    /// Writes this model to `path`.
    /// The file is gzip-compressed if `path` ends with `.gz`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        io::save(path, |w| io::write_vote(w, self))
    }


    /// Reads a voted model from `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        match Model::load(path)? {
            Model::Vote(model) => Ok(model),
            Model::Linear(_) => Err(Error::model_format(
                4, "expected a voted model, found a plain model"
            )),
        }
    }
}


impl Classifier for VoteModel {
    fn labels(&self) -> &LabelSet {
        &self.labels
    }


    fn score(&self, label: usize, x: &FeatureVector) -> f64 {
        let scores = self.vote_scores(label, x);
        match self.aggregation {
            Aggregation::Sum => scores.iter().sum::<f64>(),
            Aggregation::Mean => {
                scores.iter().sum::<f64>() / scores.len() as f64
            },
            Aggregation::Majority => {
                scores.iter().filter(|&&s| s > 0.0).count() as f64
            },
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> VoteModel {
        let labels = LabelSet::new(["A", "B"]);
        let votes = vec![
            WeightMatrix::from_raw(2, 1, vec![1.0, -1.0], vec![0.0, 0.0]).unwrap(),
            WeightMatrix::from_raw(2, 1, vec![-0.5, 3.0], vec![0.0, 0.0]).unwrap(),
            WeightMatrix::from_raw(2, 1, vec![2.0, -1.0], vec![0.0, 0.0]).unwrap(),
        ];
        VoteModel::new(labels, votes).unwrap()
    }

    #[test]
    fn test_aggregations() {
        let x = FeatureVector::binary(vec![0]).unwrap();

        let f = model();
        assert_eq!(f.vote_scores(1, &x), vec![-1.0, 3.0, -1.0]);
        assert_eq!(f.scores(&x), vec![2.5, 1.0]);
        assert_eq!(f.predict(&x).0, 0);

        let f = model().aggregation(Aggregation::Mean);
        assert_eq!(f.scores(&x), vec![2.5 / 3.0, 1.0 / 3.0]);

        let f = model().aggregation(Aggregation::Majority);
        assert_eq!(f.scores(&x), vec![2.0, 1.0]);
    }

    #[test]
    fn test_rejects_inconsistent_votes() {
        let labels = LabelSet::new(["A", "B"]);
        assert!(VoteModel::new(labels.clone(), Vec::new()).is_err());

        let votes = vec![
            WeightMatrix::zeros(2, 1).unwrap(),
            WeightMatrix::zeros(2, 2).unwrap(),
        ];
        assert!(VoteModel::new(labels, votes).is_err());
    }


    #[test]
    fn test_rejects_empty_labels() {
        let labels = LabelSet::new(Vec::<&str>::new());
        let votes = vec![WeightMatrix::zeros(0, 1).unwrap()];
        let f = VoteModel::new(labels, votes);
        assert!(matches!(f, Err(Error::InvalidParameter { .. })));
    }
}

use rayon::prelude::*;

use crate::sample::{FeatureVector, InstanceSet, LabelSet};


/// A trait that defines the multi-label prediction
/// of the one-vs-all models.
/// Implementors provide one score per label;
/// the predicted label is the one with the largest score.
pub trait Classifier {
    /// Returns the labels in the order the scores refer to.
    fn labels(&self) -> &LabelSet;


    /// Computes the score of `label` for `x`.
    fn score(&self, label: usize, x: &FeatureVector) -> f64;


    /// Returns the number of labels.
    fn n_labels(&self) -> usize {
        self.labels().len()
    }


    /// Computes the score of every label.
    fn scores(&self, x: &FeatureVector) -> Vec<f64> {
        (0..self.n_labels()).map(|label| self.score(label, x))
            .collect()
    }


    /// Returns the label with the largest score and the score.
    /// Ties go to the smallest label index.
    fn predict(&self, x: &FeatureVector) -> (usize, f64) {
        self.scores(x)
            .into_iter()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |best, (label, score)| {
                if score > best.1 { (label, score) } else { best }
            })
    }


    /// Returns every label paired with its score,
    /// sorted by descending score.
    fn rank(&self, x: &FeatureVector) -> Vec<(usize, f64)> {
        let mut ranked = self.scores(x)
            .into_iter()
            .enumerate()
            .collect::<Vec<_>>();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }


    /// Predicts the label names of all instances in `set`.
    /// A classifier without labels predicts nothing.
    fn predict_all(&self, set: &InstanceSet) -> Vec<&str>
        where Self: Sync
    {
        if self.n_labels() == 0 {
            return Vec::new();
        }
        (0..set.len()).into_par_iter()
            .map(|i| self.labels().name(self.predict(set.features(i)).0))
            .collect()
    }


    /// Returns the fraction of instances in `set` whose label is predicted.
    /// Labels are compared by name,
    /// so `set` may carry labels the model has never seen.
    /// Returns `0.0` for a classifier without labels.
    fn accuracy(&self, set: &InstanceSet) -> f64
        where Self: Sync
    {
        if self.n_labels() == 0 {
            return 0.0;
        }
        let n_correct = self.predict_all(set)
            .into_iter()
            .enumerate()
            .filter(|&(i, name)| set.label_set().name(set.label(i)) == name)
            .count();
        n_correct as f64 / set.len() as f64
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::FeatureKind;

    struct Unlabeled(LabelSet);

    impl Classifier for Unlabeled {
        fn labels(&self) -> &LabelSet {
            &self.0
        }

        fn score(&self, _label: usize, _x: &FeatureVector) -> f64 {
            0.0
        }
    }

    #[test]
    fn test_classifier_without_labels() {
        let f = Unlabeled(LabelSet::new(Vec::<&str>::new()));
        let x = FeatureVector::binary(vec![0]).unwrap();
        let set = InstanceSet::new(vec!["A"], vec![x], FeatureKind::Binary).unwrap();

        assert!(f.predict_all(&set).is_empty());
        assert_eq!(f.accuracy(&set), 0.0);
    }
}

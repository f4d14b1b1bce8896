use serde::{Serialize, Deserialize};

use crate::common::utils;
use crate::sample::FeatureVector;


/// A linear separator `x -> w^T x + b`.
/// The intercept `b` already includes the value of the bias feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearSeparator {
    pub(crate) weights: Vec<f64>,
    pub(crate) intercept: f64,
}


impl LinearSeparator {
    /// Construct a separator from its weights and intercept.
    pub fn new(weights: Vec<f64>, intercept: f64) -> Self {
        Self { weights, intercept }
    }


    /// The zero separator over `n_features` features.
    /// Its score is `0` for every instance.
    pub fn zeros(n_features: usize) -> Self {
        Self { weights: vec![0.0; n_features], intercept: 0.0 }
    }


    /// Returns the weight vector.
    pub fn weights(&self) -> &[f64] {
        &self.weights[..]
    }


    /// Returns the intercept.
    pub fn intercept(&self) -> f64 {
        self.intercept
    }


    /// Returns the feature dimension.
    pub fn n_features(&self) -> usize {
        self.weights.len()
    }


    /// Returns `w^T x + b`.
    #[inline(always)]
    pub fn score(&self, x: &FeatureVector) -> f64 {
        x.dot(&self.weights) + self.intercept
    }


    /// Returns `y (w^T x + b)`.
    #[inline(always)]
    pub fn margin(&self, x: &FeatureVector, y: f64) -> f64 {
        y * self.score(x)
    }


    /// Performs `self += a * other`.
    /// The dimension grows to fit `other` if needed.
    pub fn add_scaled(&mut self, a: f64, other: &Self) {
        if self.weights.len() < other.weights.len() {
            self.weights.resize(other.weights.len(), 0.0);
        }
        self.weights.iter_mut()
            .zip(&other.weights)
            .for_each(|(w, v)| { *w += a * v; });
        self.intercept += a * other.intercept;
    }


    /// Returns the euclidean norm of `(w, b)`.
    pub fn norm(&self) -> f64 {
        (utils::squared_norm(&self.weights) + self.intercept.powi(2)).sqrt()
    }


    /// Scales `(w, b)` to unit euclidean norm.
    /// The zero separator is left untouched.
    pub fn normalize(&mut self) {
        let norm = self.norm();
        if norm == 0.0 { return; }

        self.weights.iter_mut()
            .for_each(|w| { *w /= norm; });
        self.intercept /= norm;
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_and_margin() {
        let h = LinearSeparator::new(vec![0.5, -0.3, 0.1], 0.25);
        let x = FeatureVector::binary(vec![0, 2]).unwrap();
        assert_eq!(h.score(&x), 0.5 + 0.1 + 0.25);
        assert_eq!(h.margin(&x, -1.0), -(0.5 + 0.1 + 0.25));
    }

    #[test]
    fn test_add_scaled_and_normalize() {
        let mut h = LinearSeparator::zeros(1);
        h.add_scaled(2.0, &LinearSeparator::new(vec![1.5, 0.0], 0.0));
        h.add_scaled(1.0, &LinearSeparator::new(vec![0.0, 4.0], 0.0));
        assert_eq!(h.weights(), &[3.0, 4.0]);

        h.normalize();
        assert!((h.weights()[0] - 0.6).abs() < 1e-12);
        assert!((h.weights()[1] - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_zero_is_noop() {
        let mut h = LinearSeparator::zeros(3);
        h.normalize();
        assert_eq!(h, LinearSeparator::zeros(3));
        assert!(h.weights().iter().all(|w| w.is_finite()));
    }
}

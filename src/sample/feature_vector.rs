use serde::{Serialize, Deserialize};
use std::fmt;

use crate::{Error, Result};


/// Whether the feature vectors of an instance set carry explicit values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureKind {
    /// Every present feature has the implicit value `1`.
    Binary,
    /// Every present feature carries its own value.
    Valued,
}


impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Binary => write!(f, "binary"),
            Self::Valued => write!(f, "valued"),
        }
    }
}


/// A sparse feature vector.
/// The indices are strictly ascending.
/// If `values` is `None`, every present feature has value `1.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    indices: Vec<usize>,
    values: Option<Vec<f64>>,
}


impl FeatureVector {
    /// Construct a binary feature vector from ascending indices.
    pub fn binary(indices: Vec<usize>) -> Result<Self> {
        check_ascending(&indices)?;
        Ok(Self { indices, values: None })
    }


    /// Construct a valued feature vector from `(index, value)` pairs
    /// with ascending indices.
    pub fn valued(pairs: Vec<(usize, f64)>) -> Result<Self> {
        let (indices, values): (Vec<_>, Vec<_>) = pairs.into_iter().unzip();
        check_ascending(&indices)?;
        if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
            return Err(Error::invalid(
                "value",
                format!("feature {} has a non-finite value", indices[pos])
            ));
        }
        Ok(Self { indices, values: Some(values) })
    }


    /// Returns the kind of this vector.
    pub fn kind(&self) -> FeatureKind {
        match self.values {
            None => FeatureKind::Binary,
            Some(_) => FeatureKind::Valued,
        }
    }


    /// Returns the number of present features.
    pub fn len(&self) -> usize {
        self.indices.len()
    }


    /// Returns `true` if no feature is present.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }


    /// Returns the present feature indices.
    pub fn indices(&self) -> &[usize] {
        &self.indices[..]
    }


    /// Returns the largest present index.
    pub fn max_index(&self) -> Option<usize> {
        self.indices.last().copied()
    }


    /// Returns an iterator over `(index, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        let values = self.values.as_deref();
        self.indices.iter()
            .enumerate()
            .map(move |(k, &i)| (i, values.map_or(1.0, |v| v[k])))
    }


    /// Returns `sum_j weights[j] * x[j]`.
    /// Indices beyond `weights.len()` contribute nothing.
    #[inline]
    pub fn dot(&self, weights: &[f64]) -> f64 {
        match &self.values {
            None => {
                self.indices.iter()
                    .map(|&i| weights.get(i).copied().unwrap_or(0.0))
                    .sum::<f64>()
            },
            Some(values) => {
                self.indices.iter()
                    .zip(values)
                    .map(|(&i, v)| weights.get(i).map_or(0.0, |w| w * v))
                    .sum::<f64>()
            },
        }
    }


    /// Performs `weights += a * x`.
    /// Indices beyond `weights.len()` are ignored.
    #[inline]
    pub fn axpy(&self, a: f64, weights: &mut [f64]) {
        match &self.values {
            None => {
                for &i in &self.indices {
                    if let Some(w) = weights.get_mut(i) { *w += a; }
                }
            },
            Some(values) => {
                for (&i, v) in self.indices.iter().zip(values) {
                    if let Some(w) = weights.get_mut(i) { *w += a * v; }
                }
            },
        }
    }


    /// Returns `|| x ||^2`.
    #[inline]
    pub fn squared_norm(&self) -> f64 {
        match &self.values {
            None => self.indices.len() as f64,
            Some(values) => values.iter().map(|v| v * v).sum::<f64>(),
        }
    }
}


fn check_ascending(indices: &[usize]) -> Result<()> {
    if let Some(k) = indices.windows(2).position(|w| w[0] >= w[1]) {
        return Err(Error::invalid(
            "indices",
            format!(
                "feature indices must be strictly ascending, \
                but {} is followed by {}",
                indices[k], indices[k + 1],
            )
        ));
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_dot_and_axpy() {
        let x = FeatureVector::binary(vec![0, 2]).unwrap();
        let mut w = vec![0.5, -0.3, 0.1];
        assert_eq!(x.dot(&w), 0.5 + 0.1);

        x.axpy(2.0, &mut w);
        assert_eq!(w, vec![2.5, -0.3, 2.1]);
        assert_eq!(x.squared_norm(), 2.0);
    }

    #[test]
    fn test_valued_dot() {
        let x = FeatureVector::valued(vec![(1, 2.0), (3, -1.0)]).unwrap();
        let w = vec![9.0, 0.5, 9.0, 4.0];
        assert_eq!(x.dot(&w), 1.0 - 4.0);
        assert_eq!(x.squared_norm(), 5.0);
        assert_eq!(x.iter().collect::<Vec<_>>(), vec![(1, 2.0), (3, -1.0)]);
    }

    #[test]
    fn test_out_of_range_indices_are_ignored() {
        let x = FeatureVector::binary(vec![1, 7]).unwrap();
        let mut w = vec![1.0, 2.0];
        assert_eq!(x.dot(&w), 2.0);
        x.axpy(1.0, &mut w);
        assert_eq!(w, vec![1.0, 3.0]);
    }

    #[test]
    fn test_rejects_unsorted_indices() {
        assert!(FeatureVector::binary(vec![3, 1]).is_err());
        assert!(FeatureVector::binary(vec![1, 1]).is_err());
        assert!(FeatureVector::valued(vec![(2, 1.0), (0, 1.0)]).is_err());
    }

    #[test]
    fn test_rejects_non_finite_value() {
        assert!(FeatureVector::valued(vec![(0, f64::NAN)]).is_err());
    }
}

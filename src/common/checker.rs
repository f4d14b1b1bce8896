//! This file defines some functions that checks some pre-conditions
//! E.g., the domain of hyperparameters.

use crate::{Error, Result};
use crate::common::constants::SIMPLEX_TOLERANCE;


/// Check whether the regularization parameter is valid or not.
#[inline(always)]
pub(crate) fn cost(c: f64) -> Result<()> {
    if c.is_finite() && c > 0.0 {
        return Ok(());
    }
    Err(Error::invalid("c", format!("must be a positive finite number. got {c}.")))
}


/// Check the stopping tolerance.
#[inline(always)]
pub(crate) fn tolerance(eps: f64) -> Result<()> {
    if eps.is_finite() && eps > 0.0 {
        return Ok(());
    }
    Err(Error::invalid("eps", format!("must be a positive finite number. got {eps}.")))
}


/// Check the value of the constant bias feature.
#[inline(always)]
pub(crate) fn bias(bias: Option<f64>) -> Result<()> {
    match bias {
        Some(b) if !(b.is_finite() && b > 0.0) => {
            Err(Error::invalid("bias", format!("must be a positive finite number. got {b}.")))
        },
        _ => Ok(()),
    }
}


/// Check that a count parameter is at least one.
#[inline(always)]
pub(crate) fn positive_count(name: &'static str, value: usize) -> Result<()> {
    if value > 0 {
        return Ok(());
    }
    Err(Error::invalid(name, "must be at least 1. got 0."))
}


/// Check whether `dist` is a probability distribution over `n` rows.
#[inline(always)]
pub(crate) fn distribution(dist: &[f64], n: usize) -> Result<()> {
    if dist.len() != n {
        return Err(Error::ShapeMismatch(format!(
            "the distribution has {} entries, the problem has {n} rows",
            dist.len()
        )));
    }
    if dist.iter().any(|d| !d.is_finite() || *d < 0.0) {
        return Err(Error::invalid("dist", "entries must be non-negative and finite"));
    }
    let sum = dist.iter().sum::<f64>();
    if (sum - 1.0).abs() > SIMPLEX_TOLERANCE {
        return Err(Error::invalid("dist", format!("must sum to 1. got {sum}.")));
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_success() {
        assert!(cost(0.1).is_ok());
        assert!(cost(1e6).is_ok());
    }

    #[test]
    fn test_cost_failure() {
        assert!(cost(0.0).is_err());
        assert!(cost(-1.0).is_err());
        assert!(cost(f64::NAN).is_err());
        assert!(cost(f64::INFINITY).is_err());
    }

    #[test]
    fn test_tolerance_failure() {
        assert!(tolerance(0.0).is_err());
        assert!(tolerance(-0.1).is_err());
    }

    #[test]
    fn test_bias() {
        assert!(bias(None).is_ok());
        assert!(bias(Some(1.0)).is_ok());
        assert!(bias(Some(0.0)).is_err());
        assert!(bias(Some(-1.0)).is_err());
    }

    #[test]
    fn test_distribution() {
        assert!(distribution(&[0.25; 4], 4).is_ok());
        assert!(distribution(&[0.25; 4], 3).is_err());
        assert!(distribution(&[0.5, 0.6], 2).is_err());
        assert!(distribution(&[1.5, -0.5], 2).is_err());
    }
}

use serde::{Serialize, Deserialize};

use std::fmt;
use std::str::FromStr;

use crate::Error;


/// The loss function of the primal SVM problem.
/// Each variant fixes the diagonal term added to `Q`
/// and the upper bound on the dual variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LossType {
    /// The hinge loss `max(0, 1 - y w^T x)`.
    /// The dual variables live in `[0, C]`.
    L1,
    /// The squared hinge loss `max(0, 1 - y w^T x)^2`.
    /// The dual variables are unbounded above.
    L2,
}


impl LossType {
    /// Returns the diagonal term `D_ii` for the regularization parameter `cost`.
    #[inline(always)]
    pub fn diag(&self, cost: f64) -> f64 {
        match self {
            Self::L1 => 0.0,
            Self::L2 => 0.5 / cost,
        }
    }


    /// Returns the upper bound `U` of the dual variables.
    #[inline(always)]
    pub fn upper_bound(&self, cost: f64) -> f64 {
        match self {
            Self::L1 => cost,
            Self::L2 => f64::INFINITY,
        }
    }
}


impl Default for LossType {
    fn default() -> Self {
        Self::L1
    }
}


impl fmt::Display for LossType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::L1 => write!(f, "L1-loss"),
            Self::L2 => write!(f, "L2-loss"),
        }
    }
}


impl FromStr for LossType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "l1" | "1" => Ok(Self::L1),
            "l2" | "2" => Ok(Self::L2),
            _ => Err(Error::invalid(
                "loss",
                format!("expected `l1` or `l2`. got `{s}`.")
            )),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert_eq!(LossType::L1.diag(0.5), 0.0);
        assert_eq!(LossType::L1.upper_bound(0.5), 0.5);
        assert_eq!(LossType::L2.diag(0.5), 1.0);
        assert_eq!(LossType::L2.upper_bound(0.5), f64::INFINITY);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("l1".parse::<LossType>().unwrap(), LossType::L1);
        assert_eq!("L2".parse::<LossType>().unwrap(), LossType::L2);
        assert_eq!("2".parse::<LossType>().unwrap(), LossType::L2);
        assert!("hinge".parse::<LossType>().is_err());
    }
}

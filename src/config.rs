//! Training configuration read from JSON.
use serde::{Serialize, Deserialize};

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::common::{checker, constants::*};
use crate::model::Model;
use crate::sample::InstanceSet;
use crate::solver::{DualCoordinateDescent, LossType};
use crate::trainer::{AdaBoostTrainer, LinearTrainer, Trainer, VoteTrainer};
use crate::Result;


/// The ensemble wrapped around the solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Ensemble {
    /// One separator per label.
    #[default]
    None,
    /// AdaBoost with at most `max_rounds` rounds per label.
    AdaBoost {
        /// Maximal number of boosting rounds.
        max_rounds: usize,
    },
    /// `n_votes` bootstrap separators per label.
    Vote {
        /// Number of votes per label.
        n_votes: usize,
        /// Seed of the resampling.
        #[serde(default)]
        seed: u64,
    },
}


/// The full set of training hyperparameters.
/// Missing fields take their default values.
///
/// ```json
/// {
///   "loss": "l2",
///   "c": 1.0,
///   "eps": 0.01,
///   "bias": 1.0,
///   "n_threads": 4,
///   "ensemble": { "type": "vote", "n_votes": 10, "seed": 7 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrainConfig {
    /// Loss function.
    pub loss: LossType,
    /// Regularization parameter.
    pub c: f64,
    /// Stopping tolerance.
    pub eps: f64,
    /// Value of the constant bias feature. `None` disables the bias.
    pub bias: Option<f64>,
    /// Maximal number of solver epochs.
    pub max_iter: usize,
    /// Seed of the per-epoch shuffling. `None` disables shuffling.
    pub shuffle_seed: Option<u64>,
    /// Number of worker threads. `0` lets rayon decide.
    pub n_threads: usize,
    /// Print the progress to the console.
    pub verbose: bool,
    /// The ensemble wrapped around the solver.
    pub ensemble: Ensemble,
}


impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            loss: LossType::L1,
            c: DEFAULT_COST,
            eps: DEFAULT_EPS,
            bias: None,
            max_iter: MAX_ITER,
            shuffle_seed: None,
            n_threads: DEFAULT_THREADS,
            verbose: false,
            ensemble: Ensemble::None,
        }
    }
}


impl TrainConfig {
    /// Reads a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let config = serde_json::from_reader(BufReader::new(file))?;
        Ok(config)
    }


    /// Parses a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }


    /// Returns the configuration as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }


    /// Returns the solver described by this configuration.
    pub fn solver(&self) -> DualCoordinateDescent {
        let solver = DualCoordinateDescent::new(self.loss)
            .c(self.c)
            .eps(self.eps)
            .bias_term(self.bias)
            .max_iter(self.max_iter);
        match self.shuffle_seed {
            Some(seed) => solver.shuffle(seed),
            None => solver,
        }
    }


    /// Check the hyperparameters.
    pub fn validate(&self) -> Result<()> {
        self.solver().validate()?;
        match self.ensemble {
            Ensemble::None => Ok(()),
            Ensemble::AdaBoost { max_rounds } => {
                checker::positive_count("max_rounds", max_rounds)
            },
            Ensemble::Vote { n_votes, .. } => {
                checker::positive_count("n_votes", n_votes)
            },
        }
    }


    /// Train a model on `set`.
    pub fn train(&self, set: &InstanceSet) -> Result<Model> {
        self.validate()?;
        let solver = self.solver();
        let model: Model = match self.ensemble {
            Ensemble::None => {
                LinearTrainer::new(solver)
                    .verbose(self.verbose)
                    .run(set, self.n_threads)?
                    .into()
            },
            Ensemble::AdaBoost { max_rounds } => {
                AdaBoostTrainer::new(solver)
                    .max_rounds(max_rounds)
                    .verbose(self.verbose)
                    .run(set, self.n_threads)?
                    .into()
            },
            Ensemble::Vote { n_votes, seed } => {
                VoteTrainer::new(solver)
                    .n_votes(n_votes)
                    .seed(seed)
                    .verbose(self.verbose)
                    .run(set, self.n_threads)?
                    .into()
            },
        };
        Ok(model)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TrainConfig::from_json_str("{}").unwrap();
        assert_eq!(config, TrainConfig::default());
        assert_eq!(config.loss, LossType::L1);
        assert_eq!(config.c, 0.1);
        assert_eq!(config.n_threads, 2);
        assert_eq!(config.ensemble, Ensemble::None);
    }

    #[test]
    fn test_parse_ensembles() {
        let config = TrainConfig::from_json_str(
            r#"{"loss": "l2", "bias": 1.0, "ensemble": {"type": "adaboost", "max_rounds": 50}}"#
        ).unwrap();
        assert_eq!(config.loss, LossType::L2);
        assert_eq!(config.bias, Some(1.0));
        assert_eq!(config.ensemble, Ensemble::AdaBoost { max_rounds: 50 });

        let config = TrainConfig::from_json_str(
            r#"{"ensemble": {"type": "vote", "n_votes": 3}}"#
        ).unwrap();
        assert_eq!(config.ensemble, Ensemble::Vote { n_votes: 3, seed: 0 });
    }

    #[test]
    fn test_rejects_bad_configs() {
        assert!(TrainConfig::from_json_str(r#"{"cost": 1.0}"#).is_err());
        assert!(TrainConfig::from_json_str(r#"{"loss": "hinge"}"#).is_err());

        let config = TrainConfig { c: -1.0, ..TrainConfig::default() };
        assert!(config.validate().is_err());

        let config = TrainConfig {
            ensemble: Ensemble::Vote { n_votes: 0, seed: 0 },
            ..TrainConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let config = TrainConfig {
            shuffle_seed: Some(3),
            ensemble: Ensemble::Vote { n_votes: 5, seed: 9 },
            ..TrainConfig::default()
        };
        let json = config.to_json().unwrap();
        assert_eq!(TrainConfig::from_json_str(&json).unwrap(), config);
    }
}

#![warn(missing_docs)]

//!
//! A crate that provides linear SVMs trained by dual coordinate descent.
//!
//! Multi-label problems are decomposed into `label vs. rest` problems,
//! which are trained in parallel.
//! Each binary problem is solved by one of the following trainers.
//!
//! - [`LinearTrainer`]
//!     One L1-loss or L2-loss SVM per label.
//!
//! - [`AdaBoostTrainer`]
//!     AdaBoost over SVMs trained on reweighted instances.
//!     The resulting separators are combined linearly,
//!     so the model has the same shape as the plain one.
//!
//! - [`VoteTrainer`]
//!     Several SVMs per label, each trained on a bootstrap resample.
//!     The scores are aggregated at prediction time.
//!
//! # Example
//! ```no_run
//! use minilinear::prelude::*;
//!
//! let instances = InstanceReader::default()
//!     .file("/path/to/instances.txt")
//!     .read()?;
//!
//! let config = TrainConfig::default();
//! let model = config.train(&instances)?;
//! model.save("/path/to/model.txt.gz")?;
//!
//! let model = Model::load("/path/to/model.txt.gz")?;
//! println!("training accuracy: {}", model.accuracy(&instances));
//! # Ok::<(), minilinear::Error>(())
//! ```

pub mod common;
pub mod error;
pub mod sample;
pub mod solver;
pub mod trainer;
pub mod model;
pub mod config;
pub mod prelude;

mod report;


pub use error::{Error, Result};

pub use sample::{
    FeatureKind,
    FeatureVector,
    LabelSet,
    InstanceSet,
    InstanceReader,
};

pub use solver::{
    LossType,
    BinaryProblem,
    LinearSeparator,
    DualCoordinateDescent,
    DualSolution,
};

pub use trainer::{
    Trainer,
    LinearTrainer,
    AdaBoostTrainer,
    AdaBoost,
    BoostRound,
    BoostOutcome,
    VoteTrainer,
    bootstrap,
};

pub use model::{
    WeightMatrix,
    Classifier,
    LinearModel,
    VoteModel,
    Aggregation,
    Model,
};

pub use config::{TrainConfig, Ensemble};

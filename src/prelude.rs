//! Exports the standard trainers, models, and traits.
//!
pub use crate::sample::{
    FeatureKind,
    FeatureVector,
    LabelSet,
    InstanceSet,
    InstanceReader,
};


pub use crate::solver::{
    LossType,
    BinaryProblem,
    LinearSeparator,
    DualCoordinateDescent,
};


pub use crate::trainer::{
    // Trainer trait
    Trainer,

    // One-vs-all
    LinearTrainer,

    // Ensembles
    AdaBoostTrainer,
    VoteTrainer,
};


pub use crate::model::{
    // Classifier trait
    Classifier,

    LinearModel,
    VoteModel,
    Aggregation,
    Model,
};


pub use crate::config::{TrainConfig, Ensemble};

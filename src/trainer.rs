//! One-vs-all trainers built on the dual coordinate descent solver.

// Provides the `Trainer` trait.
mod core;
// Provides the plain one-vs-all trainer.
mod linear;
// Provides the boosting wrapper.
mod adaboost;
// Provides the bootstrap-voting wrapper.
mod vote;


pub use self::core::Trainer;
pub use self::linear::LinearTrainer;
pub use self::adaboost::{AdaBoostTrainer, AdaBoost, BoostRound, BoostOutcome};
pub use self::vote::{VoteTrainer, bootstrap};

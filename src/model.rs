//! Trained models and their text format.

// Provides the dense weight storage.
mod matrix;
// Provides the `Classifier` trait.
mod classifier;
// Provides the plain one-vs-all model.
mod linear;
// Provides the bootstrap-voting model.
mod vote;
// Provides the model file codec.
mod io;


pub use matrix::WeightMatrix;
pub use classifier::Classifier;
pub use linear::LinearModel;
pub use vote::{VoteModel, Aggregation};
pub use io::Model;

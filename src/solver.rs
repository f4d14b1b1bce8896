//! The dual coordinate descent solver for L1/L2-loss linear SVMs.

// Provides the loss types.
mod loss;
// Provides the binary (one-vs-rest) view over an instance set.
mod problem;
// Provides the linear separator.
mod separator;
// Provides the dual coordinate descent method.
mod dual_cd;


pub use loss::LossType;
pub use problem::BinaryProblem;
pub use separator::LinearSeparator;
pub use dual_cd::{DualCoordinateDescent, DualSolution};

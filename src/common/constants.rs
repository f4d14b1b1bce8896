//! Constants and default hyperparameters.

/// Maximal number of epochs the dual solver runs.
pub const MAX_ITER: usize = 1_000;

/// Projected gradients with absolute value at most this one
/// do not trigger a coordinate update.
pub const PG_TOLERANCE: f64 = 1e-12;

/// Default regularization parameter `C`.
pub const DEFAULT_COST: f64 = 0.1;

/// Default stopping tolerance on `PGmax - PGmin`.
pub const DEFAULT_EPS: f64 = 0.1;

/// Default number of worker threads.
pub const DEFAULT_THREADS: usize = 2;

/// Default number of bootstrap votes per label.
pub const DEFAULT_VOTES: usize = 10;

/// Default number of boosting rounds per label.
pub const DEFAULT_BOOST_ROUNDS: usize = 1_000;

/// Default seed of the bootstrap resampling.
pub const DEFAULT_SEED: u64 = 0;

/// Initial error threshold of the boosting wrapper.
pub const BOOST_THRESHOLD: f64 = 0.5;

/// The boosting threshold decreases by this amount ...
pub const BOOST_THRESHOLD_DECAY: f64 = 0.01;

/// ... every this many rounds.
pub const BOOST_THRESHOLD_PERIOD: usize = 100;

/// Tolerance used when checking that a distribution sums to one.
pub const SIMPLEX_TOLERANCE: f64 = 1e-5;

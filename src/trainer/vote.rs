//! Provides the bootstrap-voting wrapper around the dual solver.
use rand::prelude::*;

use super::core::{self, Trainer};

use crate::common::{checker, utils, constants::*};
use crate::model::{VoteModel, WeightMatrix};
use crate::report;
use crate::sample::InstanceSet;
use crate::solver::{BinaryProblem, DualCoordinateDescent, LinearSeparator};
use crate::Result;


/// Draws a bootstrap resample of the rows.
/// The resample has as many rows drawn (with replacement) from `positives`
/// as `positives` has, and likewise for `negatives`,
/// so the class sizes are preserved.
/// The resampled rows are shuffled.
pub fn bootstrap<R>(positives: &[usize], negatives: &[usize], rng: &mut R) -> Vec<usize>
    where R: Rng + ?Sized,
{
    let mut rows = Vec::with_capacity(positives.len() + negatives.len());
    for class in [positives, negatives] {
        rows.extend(
            (0..class.len()).map(|_| class[rng.gen_range(0..class.len())])
        );
    }
    rows.shuffle(rng);
    rows
}


/// The one-vs-all trainer that trains `n_votes` separators per label,
/// each on its own bootstrap resample.
/// Each label draws its resamples from a generator seeded by
/// `seed` and the label index,
/// so the model does not depend on the number of threads.
///
/// # Example
/// ```no_run
/// use minilinear::prelude::*;
///
/// let instances = InstanceReader::default()
///     .file("/path/to/instances.txt")
///     .read()?;
///
/// let solver = DualCoordinateDescent::new(LossType::L1);
/// let model = VoteTrainer::new(solver)
///     .n_votes(10)
///     .seed(1234)
///     .run(&instances, 4)?;
///
/// let model = model.aggregation(Aggregation::Majority);
/// # Ok::<(), minilinear::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct VoteTrainer {
    solver: DualCoordinateDescent,
    n_votes: usize,
    seed: u64,
    verbose: bool,
}


impl VoteTrainer {
    /// Construct a new trainer with the given solver.
    /// By default, `10` votes are trained per label with seed `0`.
    pub fn new(solver: DualCoordinateDescent) -> Self {
        Self {
            solver,
            n_votes: DEFAULT_VOTES,
            seed: DEFAULT_SEED,
            verbose: false,
        }
    }


    /// Set the number of votes per label.
    pub fn n_votes(mut self, n_votes: usize) -> Self {
        self.n_votes = n_votes;
        self
    }


    /// Set the seed of the resampling.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }


    /// Print the progress to the console.
    /// Default is `false`.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}


impl Trainer for VoteTrainer {
    type Output = Vec<LinearSeparator>;
    type Model = VoteModel;


    fn name(&self) -> &str {
        "Bootstrap Voting"
    }


    fn info(&self) -> Option<Vec<(&str, String)>> {
        let mut info = core::solver_info(&self.solver);
        info.push(("Votes", self.n_votes.to_string()));
        info.push(("Seed", self.seed.to_string()));
        Some(info)
    }


    fn is_verbose(&self) -> bool {
        self.verbose
    }


    fn validate(&self) -> Result<()> {
        self.solver.validate()?;
        checker::positive_count("n_votes", self.n_votes)
    }


    fn train_label(&self, set: &InstanceSet, label: usize) -> Result<Self::Output> {
        core::check_degenerate(set, label);
        let (positives, negatives): (Vec<usize>, Vec<usize>) = (0..set.len())
            .partition(|&i| set.label(i) == label);

        let name = set.label_set().name(label);
        let mut rng = StdRng::seed_from_u64(utils::label_seed(self.seed, label));
        let mut iterations = 0;
        let separators = (0..self.n_votes)
            .map(|k| {
                let rows = bootstrap(&positives, &negatives, &mut rng);
                let problem = BinaryProblem::from_rows(set, label, rows)?;
                let solution = self.solver.solve(&problem)?;
                log::debug!(
                    "label {name}: vote {k}, {} epochs, {} SVs",
                    solution.iterations, solution.n_sv,
                );
                iterations += solution.iterations;
                Ok(solution.separator)
            })
            .collect::<Result<Vec<_>>>()?;

        log::info!(
            "label {name}: {} positives, {} votes, {iterations} epochs in total",
            positives.len(), self.n_votes,
        );
        if self.verbose {
            report::print_label(name, &[
                ("POS", positives.len().to_string()),
                ("VOTES", self.n_votes.to_string()),
                ("ITER", iterations.to_string()),
            ]);
        }

        Ok(separators)
    }


    fn assemble(&self, set: &InstanceSet, outputs: Vec<Self::Output>)
        -> Result<Self::Model>
    {
        let n_features = set.n_features();
        let votes = (0..self.n_votes)
            .map(|k| {
                let columns = outputs.iter()
                    .map(|separators| separators[k].clone())
                    .collect::<Vec<_>>();
                WeightMatrix::from_columns(n_features, &columns)
            })
            .collect::<Result<Vec<_>>>()?;
        VoteModel::new(set.label_set().clone(), votes)
    }
}

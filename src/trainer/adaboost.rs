//! Provides the AdaBoost wrapper around the dual solver.
//! Each round solves the problem under the current distribution
//! and reweights the rows the new separator misclassifies.
use std::ops::ControlFlow;

use super::core::{self, Trainer};

use crate::common::{checker, utils, constants::*};
use crate::model::LinearModel;
use crate::report;
use crate::sample::InstanceSet;
use crate::solver::{BinaryProblem, DualCoordinateDescent, LinearSeparator};
use crate::Result;


/// The statistics of one boosting round.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoostRound {
    /// Weighted training error of the round's separator.
    pub error: f64,
    /// Coefficient `0.5 ln((1 - error) / error)`.
    pub alpha: f64,
    /// Number of solver epochs.
    pub iterations: usize,
}


/// The result of [`AdaBoost::run`].
#[derive(Debug, Clone)]
pub struct BoostOutcome {
    /// The combined separator, scaled to unit norm.
    pub separator: LinearSeparator,
    /// Statistics of every round, including the last one.
    pub rounds: Vec<BoostRound>,
    /// The round boosting stopped at.
    pub terminated: usize,
}


/// The boosting state machine of a single label.
/// The distribution starts uniform.
/// In round `t`, the solver is called with the row costs scaled
/// by the distribution, and the weighted error `ε_t` of its separator
/// decides what happens next:
///
/// - `ε_t >= θ_t` stops boosting and keeps the combination so far.
///   The threshold `θ_t` starts at `0.5` and drops by `0.01`
///   every `100` rounds.
/// - `ε_t = 0` stops boosting and keeps the round's separator alone.
/// - Otherwise the separator joins the combination
///   with weight `α_t = 0.5 ln((1 - ε_t) / ε_t)`
///   and the mass of the misclassified rows grows by `exp(2 α_t)`
///   relative to the others.
///
/// Boosting also stops after `max_rounds` rounds.
/// The combined separator is scaled to unit norm.
pub struct AdaBoost<'a> {
    problem: &'a BinaryProblem<'a>,
    solver: &'a DualCoordinateDescent,

    // Distribution on the rows of `problem`.
    dist: Vec<f64>,

    // Current error threshold.
    threshold: f64,

    max_rounds: usize,

    combined: LinearSeparator,
    rounds: Vec<BoostRound>,
    terminated: usize,
}


impl<'a> AdaBoost<'a> {
    /// Initialize the boosting state of `problem`.
    /// By default, boosting runs for at most `1000` rounds.
    pub fn init(problem: &'a BinaryProblem<'a>, solver: &'a DualCoordinateDescent)
        -> Result<Self>
    {
        solver.validate()?;
        let n_rows = problem.len();
        let uni = 1.0 / n_rows as f64;
        Ok(Self {
            problem,
            solver,
            dist: vec![uni; n_rows],
            threshold: BOOST_THRESHOLD,
            max_rounds: DEFAULT_BOOST_ROUNDS,
            combined: LinearSeparator::zeros(problem.n_features()),
            rounds: Vec::new(),
            terminated: 0,
        })
    }


    /// Set the maximal number of rounds.
    pub fn max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }


    /// Returns the current distribution over the rows.
    pub fn distribution(&self) -> &[f64] {
        &self.dist[..]
    }


    /// Returns the current error threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }


    /// Reset the state.
    pub fn preprocess(&mut self) {
        let n_rows = self.problem.len();
        let uni = 1.0 / n_rows as f64;
        self.dist = vec![uni; n_rows];
        self.threshold = BOOST_THRESHOLD;
        self.combined = LinearSeparator::zeros(self.problem.n_features());
        self.rounds = Vec::new();
        self.terminated = 0;
    }


    /// Boosting step per round.
    /// This method returns
    /// `ControlFlow::Break(round)` if boosting stops at `round`,
    /// `ControlFlow::Continue(())` otherwise.
    pub fn boost(&mut self, round: usize) -> ControlFlow<usize> {
        if round > self.max_rounds {
            self.terminated = self.max_rounds;
            return ControlFlow::Break(self.max_rounds);
        }
        if round % BOOST_THRESHOLD_PERIOD == 0 {
            self.threshold -= BOOST_THRESHOLD_DECAY;
        }

        let solution = self.solver.fit(self.problem, Some(&self.dist[..]));
        let h = solution.separator;

        let correct = (0..self.problem.len())
            .map(|i| h.margin(self.problem.features(i), self.problem.sign(i)) > 0.0)
            .collect::<Vec<_>>();
        let error = self.dist.iter()
            .zip(&correct)
            .filter_map(|(d, &ok)| if ok { None } else { Some(d) })
            .fold(0.0, |acc, d| acc + d);
        let alpha = 0.5 * ((1.0 - error) / error).ln();

        self.rounds.push(BoostRound { error, alpha, iterations: solution.iterations });
        log::debug!(
            "label {}: round {round}, error {error:.6}, alpha {alpha:.6}, {} epochs",
            self.problem.target(), solution.iterations,
        );

        if error >= self.threshold {
            self.terminated = round;
            return ControlFlow::Break(round);
        }
        if error == 0.0 {
            self.combined = h;
            self.terminated = round;
            return ControlFlow::Break(round);
        }

        self.combined.add_scaled(alpha, &h);
        self.update_distribution(alpha, &correct);

        ControlFlow::Continue(())
    }


    /// Returns the combined separator.
    pub fn postprocess(&mut self) -> BoostOutcome {
        let mut separator = self.combined.clone();
        separator.normalize();
        BoostOutcome {
            separator,
            rounds: self.rounds.clone(),
            terminated: self.terminated,
        }
    }


    /// A main function that runs boosting.
    pub fn run(&mut self) -> BoostOutcome {
        self.preprocess();

        let _ = (1..).try_for_each(|round| self.boost(round));

        self.postprocess()
    }


    /// Multiply the mass of the correct rows by `exp(-alpha)`,
    /// the others by `exp(alpha)`, and normalize.
    fn update_distribution(&mut self, alpha: f64, correct: &[bool]) {
        // To prevent underflow, take the logarithm.
        let log_dist = self.dist.iter()
            .zip(correct)
            .map(|(d, &ok)| d.ln() + if ok { -alpha } else { alpha })
            .collect::<Vec<_>>();

        let normalizer = utils::log_sum_exp(&log_dist);

        self.dist.iter_mut()
            .zip(log_dist)
            .for_each(|(d, ld)| { *d = (ld - normalizer).exp(); });
    }
}


/// The one-vs-all trainer that boosts every label with [`AdaBoost`].
///
/// # Example
/// ```no_run
/// use minilinear::prelude::*;
///
/// let instances = InstanceReader::default()
///     .file("/path/to/instances.txt")
///     .read()?;
///
/// let solver = DualCoordinateDescent::new(LossType::L2).c(1.0);
/// let model = AdaBoostTrainer::new(solver)
///     .max_rounds(200)
///     .run(&instances, 2)?;
/// # Ok::<(), minilinear::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct AdaBoostTrainer {
    solver: DualCoordinateDescent,
    max_rounds: usize,
    verbose: bool,
}


impl AdaBoostTrainer {
    /// Construct a new trainer with the given solver.
    /// By default, each label is boosted for at most `1000` rounds.
    pub fn new(solver: DualCoordinateDescent) -> Self {
        Self { solver, max_rounds: DEFAULT_BOOST_ROUNDS, verbose: false }
    }


    /// Set the maximal number of rounds per label.
    pub fn max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }


    /// Print the progress to the console.
    /// Default is `false`.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }


    /// Boost the label `label` and return the full outcome.
    pub fn boost_label(&self, set: &InstanceSet, label: usize) -> Result<BoostOutcome> {
        self.validate()?;
        let problem = BinaryProblem::one_vs_rest(set, label)?;
        let outcome = AdaBoost::init(&problem, &self.solver)?
            .max_rounds(self.max_rounds)
            .run();
        Ok(outcome)
    }
}


impl Trainer for AdaBoostTrainer {
    type Output = LinearSeparator;
    type Model = LinearModel;


    fn name(&self) -> &str {
        "AdaBoost"
    }


    fn info(&self) -> Option<Vec<(&str, String)>> {
        let mut info = core::solver_info(&self.solver);
        info.push(("Max rounds", self.max_rounds.to_string()));
        Some(info)
    }


    fn is_verbose(&self) -> bool {
        self.verbose
    }


    fn validate(&self) -> Result<()> {
        self.solver.validate()?;
        checker::positive_count("max_rounds", self.max_rounds)
    }


    fn train_label(&self, set: &InstanceSet, label: usize) -> Result<Self::Output> {
        core::check_degenerate(set, label);
        let outcome = self.boost_label(set, label)?;

        let name = set.label_set().name(label);
        let error = outcome.rounds.last().map_or(f64::NAN, |r| r.error);
        log::info!(
            "label {name}: stopped at round {}, last error {error:.6}",
            outcome.terminated,
        );
        if self.verbose {
            report::print_label(name, &[
                ("ROUND", outcome.terminated.to_string()),
                ("ERROR", format!("{error:.5}")),
            ]);
        }

        Ok(outcome.separator)
    }


    fn assemble(&self, set: &InstanceSet, outputs: Vec<Self::Output>)
        -> Result<Self::Model>
    {
        LinearModel::from_separators(set.label_set().clone(), set.n_features(), &outputs)
    }
}

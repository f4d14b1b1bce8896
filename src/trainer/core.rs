//! Provides `Trainer` trait.
use rayon::prelude::*;

use std::time::Instant;

use crate::report;
use crate::sample::InstanceSet;
use crate::solver::DualCoordinateDescent;
use crate::Result;


/// The trait [`Trainer`] defines the one-vs-all training framework.
/// For each label `l` of an instance set,
/// [`Trainer::train_label`] solves the problem `l` vs. the rest.
/// The labels are independent of each other,
/// so [`Trainer::run`] trains them on a pool of worker threads
/// and [`Trainer::assemble`] combines the results into a model
/// once every label is done.
///
/// # Required Methods
/// - [`Trainer::name`]
/// - [`Trainer::validate`]
/// - [`Trainer::train_label`]
/// - [`Trainer::assemble`]
/// - [`Trainer::info`] ... optional.
/// - [`Trainer::is_verbose`] ... optional.
///
/// # Provided Methods
/// - [`Trainer::run`]
pub trait Trainer: Sync {
    /// The result of training a single label.
    type Output: Send;

    /// The model returned by [`Trainer::run`].
    type Model;


    /// Returns the name of the trainer.
    fn name(&self) -> &str;


    /// Returns the hyperparameters of the trainer.
    fn info(&self) -> Option<Vec<(&str, String)>> {
        None
    }


    /// Returns `true` if the trainer prints its progress.
    fn is_verbose(&self) -> bool {
        false
    }


    /// Check the hyperparameters.
    fn validate(&self) -> Result<()>;


    /// Train the separator(s) of `label` vs. the rest.
    fn train_label(&self, set: &InstanceSet, label: usize) -> Result<Self::Output>;


    /// Combine the per-label outputs into a model.
    /// `outputs[l]` is the output for label `l`.
    fn assemble(&self, set: &InstanceSet, outputs: Vec<Self::Output>)
        -> Result<Self::Model>;


    /// A main function that trains every label.
    /// `n_threads = 0` lets rayon choose the number of workers.
    /// The first error of any label aborts the whole run.
    fn run(&self, set: &InstanceSet, n_threads: usize) -> Result<Self::Model> {
        self.validate()?;
        if self.is_verbose() {
            report::print_stats(self, set, n_threads);
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(n_threads)
            .build()?;

        let now = Instant::now();
        let outputs = pool.install(|| {
            (0..set.n_labels()).into_par_iter()
                .map(|label| self.train_label(set, label))
                .collect::<Result<Vec<_>>>()
        })?;
        let elapsed = now.elapsed().as_millis();

        log::info!(
            "{}: trained {} labels in {elapsed} ms",
            self.name(), set.n_labels(),
        );
        if self.is_verbose() {
            report::print_finished(set.n_labels(), elapsed);
        }

        self.assemble(set, outputs)
    }
}


/// The hyperparameters of `solver` as `(key, value)` pairs.
pub(super) fn solver_info(solver: &DualCoordinateDescent) -> Vec<(&'static str, String)> {
    let bias = solver.bias_value()
        .map_or("-".to_string(), |b| format!("{b}"));
    let shuffle = solver.shuffle_seed()
        .map_or("-".to_string(), |s| format!("seed {s}"));

    vec![
        ("Loss", solver.loss().to_string()),
        ("C", format!("{}", solver.cost())),
        ("Tolerance", format!("{}", solver.tolerance())),
        ("Bias", bias),
        ("Max epochs", solver.iteration_cap().to_string()),
        ("Shuffle", shuffle),
    ]
}


/// Warns about a label that has no positive or no negative instance.
pub(super) fn check_degenerate(set: &InstanceSet, label: usize) {
    let n_positive = set.count_label(label);
    let name = set.label_set().name(label);
    if n_positive == 0 || n_positive == set.len() {
        log::warn!(
            "label {name}: {n_positive} of {} instances are positive. \
            the separator is degenerate",
            set.len(),
        );
    }
}

use super::core::{self, Trainer};

use crate::model::LinearModel;
use crate::report;
use crate::sample::InstanceSet;
use crate::solver::{BinaryProblem, DualCoordinateDescent, LinearSeparator, LossType};
use crate::Result;


/// The plain one-vs-all trainer.
/// Each label gets the separator returned by one solver call.
///
/// # Example
/// ```no_run
/// use minilinear::prelude::*;
///
/// let instances = InstanceReader::default()
///     .file("/path/to/instances.txt")
///     .read()?;
///
/// let solver = DualCoordinateDescent::new(LossType::L1)
///     .c(0.1)
///     .eps(0.1);
/// let model = LinearTrainer::new(solver)
///     .verbose(true)
///     .run(&instances, 4)?;
///
/// model.save("/path/to/model.txt.gz")?;
/// # Ok::<(), minilinear::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct LinearTrainer {
    solver: DualCoordinateDescent,
    verbose: bool,
}


impl LinearTrainer {
    /// Construct a new trainer with the given solver.
    pub fn new(solver: DualCoordinateDescent) -> Self {
        Self { solver, verbose: false }
    }


    /// Print the progress to the console.
    /// Default is `false`.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }


    /// Returns the solver.
    pub fn solver(&self) -> &DualCoordinateDescent {
        &self.solver
    }
}


impl Default for LinearTrainer {
    fn default() -> Self {
        Self::new(DualCoordinateDescent::new(LossType::default()))
    }
}


impl Trainer for LinearTrainer {
    type Output = LinearSeparator;
    type Model = LinearModel;


    fn name(&self) -> &str {
        "One-vs-All"
    }


    fn info(&self) -> Option<Vec<(&str, String)>> {
        Some(core::solver_info(&self.solver))
    }


    fn is_verbose(&self) -> bool {
        self.verbose
    }


    fn validate(&self) -> Result<()> {
        self.solver.validate()
    }


    fn train_label(&self, set: &InstanceSet, label: usize) -> Result<Self::Output> {
        core::check_degenerate(set, label);
        let problem = BinaryProblem::one_vs_rest(set, label)?;
        let solution = self.solver.solve(&problem)?;

        let name = set.label_set().name(label);
        log::info!(
            "label {name}: {} positives, {} epochs, {} SVs, active set {}",
            problem.n_positive(), solution.iterations,
            solution.n_sv, solution.active_size,
        );
        if self.verbose {
            report::print_label(name, &[
                ("POS", problem.n_positive().to_string()),
                ("ITER", solution.iterations.to_string()),
                ("SV", solution.n_sv.to_string()),
            ]);
        }

        Ok(solution.separator)
    }


    fn assemble(&self, set: &InstanceSet, outputs: Vec<Self::Output>)
        -> Result<Self::Model>
    {
        LinearModel::from_separators(set.label_set().clone(), set.n_features(), &outputs)
    }
}

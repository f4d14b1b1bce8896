//! Provides the dual coordinate descent method for linear SVMs
//! by Hsieh, Chang, Lin, Keerthi, and Sundararajan, 2008.
use rand::prelude::*;

use super::loss::LossType;
use super::problem::BinaryProblem;
use super::separator::LinearSeparator;

use crate::common::{checker, utils, constants::*};
use crate::Result;


/// The dual coordinate descent method.
/// This struct solves the dual of the L1/L2-loss SVM
///
/// ```text
/// min_α   (1/2) α^T Q̄ α - e^T α
/// s.t.    0 <= α_i <= U_i,
/// ```
/// where `Q̄_ij = y_i y_j x_i^T x_j + D_ii [i == j]`.
/// The primal weight vector `w = sum_i α_i y_i x_i` is maintained
/// while updating `α` one coordinate at a time.
/// The solver shrinks the coordinates stuck at their bounds
/// and restores them before declaring convergence.
///
/// # Example
/// ```no_run
/// use minilinear::prelude::*;
///
/// let instances = InstanceReader::default()
///     .file("/path/to/instances.txt")
///     .read()?;
///
/// let problem = BinaryProblem::one_vs_rest(&instances, 0)?;
/// let solution = DualCoordinateDescent::new(LossType::L2)
///     .c(1.0)
///     .eps(0.01)
///     .bias(1.0)
///     .solve(&problem)?;
///
/// println!("converged after {} epochs", solution.iterations);
/// # Ok::<(), minilinear::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DualCoordinateDescent {
    loss: LossType,
    c: f64,
    eps: f64,

    // Value of the constant bias feature.
    bias: Option<f64>,
    max_iter: usize,

    // Seed of the per-epoch shuffling. `None` keeps the input order.
    shuffle: Option<u64>,
}


/// The outcome of [`DualCoordinateDescent::solve`].
#[derive(Debug, Clone)]
pub struct DualSolution {
    /// The primal separator.
    pub separator: LinearSeparator,
    /// The dual variables, one per row of the problem.
    pub alpha: Vec<f64>,
    /// The upper bound of each dual variable.
    pub upper_bounds: Vec<f64>,
    /// Number of epochs.
    pub iterations: usize,
    /// `true` if the stopping criterion was met before `max_iter` epochs.
    pub converged: bool,
    /// Number of rows with `α_i > 0`.
    pub n_sv: usize,
    /// Size of the active set at exit.
    pub active_size: usize,
    /// The dual objective value.
    pub objective: f64,
}


impl DualCoordinateDescent {
    /// Construct a new solver for the given loss.
    /// By default, `C = 0.1`, `eps = 0.1`, no bias, `1000` epochs,
    /// and no shuffling.
    pub fn new(loss: LossType) -> Self {
        Self {
            loss,
            c: DEFAULT_COST,
            eps: DEFAULT_EPS,
            bias: None,
            max_iter: MAX_ITER,
            shuffle: None,
        }
    }


    /// Set the regularization parameter `C`.
    pub fn c(mut self, c: f64) -> Self {
        self.c = c;
        self
    }


    /// Set the stopping tolerance on `PGmax - PGmin`.
    pub fn eps(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }


    /// Append a constant feature of value `term` to every instance.
    pub fn bias(mut self, term: f64) -> Self {
        self.bias = Some(term);
        self
    }


    /// Set or unset the constant bias feature.
    pub fn bias_term(mut self, term: Option<f64>) -> Self {
        self.bias = term;
        self
    }


    /// Set the maximum number of epochs.
    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }


    /// Shuffle the active set at the start of every epoch.
    /// The permutation is drawn from a generator seeded by `seed`
    /// and the target label of the problem.
    pub fn shuffle(mut self, seed: u64) -> Self {
        self.shuffle = Some(seed);
        self
    }


    /// Returns the loss type.
    pub fn loss(&self) -> LossType {
        self.loss
    }


    /// Returns the regularization parameter.
    pub fn cost(&self) -> f64 {
        self.c
    }


    /// Returns the stopping tolerance.
    pub fn tolerance(&self) -> f64 {
        self.eps
    }


    /// Returns the value of the bias feature, if any.
    pub fn bias_value(&self) -> Option<f64> {
        self.bias
    }


    /// Returns the maximum number of epochs.
    pub fn iteration_cap(&self) -> usize {
        self.max_iter
    }


    /// Returns the shuffling seed, if shuffling is enabled.
    pub fn shuffle_seed(&self) -> Option<u64> {
        self.shuffle
    }


    /// Check the hyperparameters.
    pub fn validate(&self) -> Result<()> {
        checker::cost(self.c)?;
        checker::tolerance(self.eps)?;
        checker::bias(self.bias)?;
        checker::positive_count("max_iter", self.max_iter)?;
        Ok(())
    }


    /// Solve the problem with cost `C` on every row.
    pub fn solve(&self, problem: &BinaryProblem<'_>) -> Result<DualSolution> {
        self.validate()?;
        Ok(self.fit(problem, None))
    }


    /// Solve the problem where the `i`-th row has cost `C n dist[i]`.
    /// `dist` must be a probability distribution over the rows,
    /// so the uniform distribution reproduces [`Self::solve`].
    /// Rows with zero mass keep `α_i = 0`.
    pub fn solve_weighted(&self, problem: &BinaryProblem<'_>, dist: &[f64])
        -> Result<DualSolution>
    {
        self.validate()?;
        checker::distribution(dist, problem.len())?;
        Ok(self.fit(problem, Some(dist)))
    }


    /// The solver body. The hyperparameters must be valid.
    pub(crate) fn fit(
        &self,
        problem: &BinaryProblem<'_>,
        dist: Option<&[f64]>,
    ) -> DualSolution
    {
        let n_rows = problem.len();
        let n_features = problem.n_features();
        let bias = self.bias.unwrap_or(0.0);

        let costs = match dist {
            None => vec![self.c; n_rows],
            Some(dist) => {
                let scale = self.c * n_rows as f64;
                dist.iter().map(|s| scale * s).collect::<Vec<_>>()
            },
        };

        let (diag, upper_bounds): (Vec<f64>, Vec<f64>) = costs.iter()
            .map(|&c| {
                if c > 0.0 {
                    (self.loss.diag(c), self.loss.upper_bound(c))
                } else {
                    (0.0, 0.0)
                }
            })
            .unzip();

        let qd = (0..n_rows).map(|i| {
                diag[i] + problem.features(i).squared_norm() + bias * bias
            })
            .collect::<Vec<_>>();

        // Rows with zero cost never enter the active set.
        let mut index = (0..n_rows).filter(|&i| costs[i] > 0.0)
            .collect::<Vec<_>>();
        let n_active = index.len();
        let mut active_size = n_active;

        let mut rng = self.shuffle.map(|seed| {
            StdRng::seed_from_u64(utils::label_seed(seed, problem.target()))
        });

        let mut alpha = vec![0.0_f64; n_rows];
        let mut weights = vec![0.0_f64; n_features];
        let mut bias_weight = 0.0_f64;

        let mut pg_max_old = f64::INFINITY;
        let mut pg_min_old = f64::NEG_INFINITY;

        let mut iterations = 0;
        let mut converged = false;
        while iterations < self.max_iter {
            iterations += 1;
            let mut pg_max_new = f64::NEG_INFINITY;
            let mut pg_min_new = f64::INFINITY;

            if let Some(rng) = rng.as_mut() {
                index[..active_size].shuffle(rng);
            }

            let mut s = 0;
            while s < active_size {
                let i = index[s];
                let yi = problem.sign(i);
                let xi = problem.features(i);
                let u = upper_bounds[i];

                let g = yi * (xi.dot(&weights) + bias_weight * bias)
                    - 1.0
                    + alpha[i] * diag[i];

                let pg = if alpha[i] == 0.0 {
                    if g > pg_max_old {
                        active_size -= 1;
                        index.swap(s, active_size);
                        continue;
                    }
                    g.min(0.0)
                } else if alpha[i] == u {
                    if g < pg_min_old {
                        active_size -= 1;
                        index.swap(s, active_size);
                        continue;
                    }
                    g.max(0.0)
                } else {
                    g
                };

                pg_max_new = pg_max_new.max(pg);
                pg_min_new = pg_min_new.min(pg);

                if pg.abs() > PG_TOLERANCE {
                    let alpha_old = alpha[i];
                    alpha[i] = (alpha[i] - g / qd[i]).max(0.0).min(u);
                    let d = (alpha[i] - alpha_old) * yi;
                    xi.axpy(d, &mut weights);
                    bias_weight += d * bias;
                }
                s += 1;
            }

            log::trace!(
                "label {}: epoch {iterations}, active set {active_size}/{n_active}",
                problem.target(),
            );

            if pg_max_new - pg_min_new <= self.eps {
                if active_size == n_active {
                    converged = true;
                    break;
                }
                active_size = n_active;
                pg_max_old = f64::INFINITY;
                pg_min_old = f64::NEG_INFINITY;
                continue;
            }

            pg_max_old = if pg_max_new <= 0.0 { f64::INFINITY } else { pg_max_new };
            pg_min_old = if pg_min_new >= 0.0 { f64::NEG_INFINITY } else { pg_min_new };
        }

        if !converged {
            log::warn!(
                "label {}: reached the maximum number of epochs ({}) \
                before PGmax - PGmin <= {}",
                problem.target(), self.max_iter, self.eps,
            );
        }

        let n_sv = alpha.iter().filter(|&&a| a > 0.0).count();
        let objective = {
            let quad = utils::squared_norm(&weights) + bias_weight * bias_weight;
            let dual = alpha.iter()
                .zip(&diag)
                .map(|(a, d)| a * (a * d - 2.0))
                .sum::<f64>();
            0.5 * (quad + dual)
        };

        log::debug!(
            "label {}: {iterations} epochs, {n_sv} SVs, objective {objective:.6}",
            problem.target(),
        );

        let separator = LinearSeparator::new(weights, bias_weight * bias);
        DualSolution {
            separator,
            alpha,
            upper_bounds,
            iterations,
            converged,
            n_sv,
            active_size,
            objective,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::{FeatureKind, FeatureVector, InstanceSet};

    fn separable() -> InstanceSet {
        let x = |pairs: &[(usize, f64)]| FeatureVector::valued(pairs.to_vec()).unwrap();
        InstanceSet::new(
            vec!["+", "+", "+", "-", "-", "-"],
            vec![
                x(&[(0, 2.0), (1, 1.0)]),
                x(&[(0, 3.0), (1, 0.5)]),
                x(&[(0, 2.5), (1, 2.0)]),
                x(&[(0, -2.0), (1, 1.0)]),
                x(&[(0, -3.0), (1, -0.5)]),
                x(&[(0, -2.5), (1, 0.0)]),
            ],
            FeatureKind::Valued,
        ).unwrap()
    }

    #[test]
    fn test_solves_separable_problem() {
        let set = separable();
        let target = set.label_set().index_of("+").unwrap();
        let problem = BinaryProblem::one_vs_rest(&set, target).unwrap();

        for loss in [LossType::L1, LossType::L2] {
            let solution = DualCoordinateDescent::new(loss)
                .c(1.0)
                .eps(1e-3)
                .solve(&problem)
                .unwrap();

            assert!(solution.converged);
            for i in 0..problem.len() {
                let margin = solution.separator.margin(problem.features(i), problem.sign(i));
                assert!(margin > 0.0, "{loss}: row {i} has margin {margin}");
            }
        }
    }

    #[test]
    fn test_uniform_weights_match_plain_training() {
        let set = separable();
        let problem = BinaryProblem::one_vs_rest(&set, 0).unwrap();
        let solver = DualCoordinateDescent::new(LossType::L1).c(0.5).bias(1.0);

        let plain = solver.solve(&problem).unwrap();
        let uniform = vec![1.0 / 6.0; 6];
        let weighted = solver.solve_weighted(&problem, &uniform).unwrap();

        for (a, b) in plain.alpha.iter().zip(&weighted.alpha) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn test_zero_mass_rows_stay_at_zero() {
        let set = separable();
        let problem = BinaryProblem::one_vs_rest(&set, 0).unwrap();
        let dist = [0.0, 0.25, 0.25, 0.25, 0.25, 0.0];
        let solution = DualCoordinateDescent::new(LossType::L2)
            .c(1.0)
            .solve_weighted(&problem, &dist)
            .unwrap();

        assert_eq!(solution.alpha[0], 0.0);
        assert_eq!(solution.alpha[5], 0.0);
        assert!(solution.objective.is_finite());
    }

    #[test]
    fn test_shuffled_runs_are_reproducible() {
        let set = separable();
        let problem = BinaryProblem::one_vs_rest(&set, 1).unwrap();
        let solver = DualCoordinateDescent::new(LossType::L2).shuffle(7);

        let a = solver.solve(&problem).unwrap();
        let b = solver.solve(&problem).unwrap();
        assert_eq!(a.separator, b.separator);
        assert_eq!(a.alpha, b.alpha);
    }

    #[test]
    fn test_rejects_invalid_parameters() {
        let set = separable();
        let problem = BinaryProblem::one_vs_rest(&set, 0).unwrap();

        assert!(DualCoordinateDescent::new(LossType::L1).c(0.0).solve(&problem).is_err());
        assert!(DualCoordinateDescent::new(LossType::L1).eps(-1.0).solve(&problem).is_err());
        assert!(DualCoordinateDescent::new(LossType::L1).bias(0.0).solve(&problem).is_err());
        assert!(DualCoordinateDescent::new(LossType::L1).max_iter(0).solve(&problem).is_err());
    }
}

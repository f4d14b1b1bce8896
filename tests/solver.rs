mod common;

use minilinear::prelude::*;


#[cfg(test)]
pub mod solver_tests {
    use super::*;
    use super::common::{overlapping, separable};


    /// Recomputes the dual gradient `y_i w·x_i - 1 + D_ii α_i`
    /// of every row from the returned separator.
    fn gradients(
        problem: &BinaryProblem<'_>,
        solver: &DualCoordinateDescent,
        alpha: &[f64],
        separator: &LinearSeparator,
    ) -> Vec<f64>
    {
        let diag = solver.loss().diag(solver.cost());
        (0..problem.len())
            .map(|i| {
                let y = problem.sign(i);
                y * separator.score(problem.features(i)) - 1.0 + diag * alpha[i]
            })
            .collect()
    }


    #[test]
    fn separable_blobs() {
        let set = separable(7);
        let problem = BinaryProblem::one_vs_rest(&set, 0).unwrap();

        for loss in [LossType::L1, LossType::L2] {
            let solver = DualCoordinateDescent::new(loss).c(1.0).bias(1.0);
            let solution = solver.solve(&problem).unwrap();
            assert!(solution.converged, "{loss} did not converge");
            assert!(solution.iterations < solver.iteration_cap());

            for i in 0..problem.len() {
                let y = problem.sign(i);
                let margin = solution.separator.margin(problem.features(i), y);
                assert!(margin > 0.0, "{loss}: row {i} has margin {margin}");
            }
        }
    }


    #[test]
    fn alpha_stays_in_the_box() {
        let set = overlapping(11);
        let problem = BinaryProblem::one_vs_rest(&set, 0).unwrap();

        for loss in [LossType::L1, LossType::L2] {
            let solver = DualCoordinateDescent::new(loss).c(0.5).bias(1.0);
            let solution = solver.solve(&problem).unwrap();

            assert_eq!(solution.alpha.len(), problem.len());
            assert_eq!(solution.upper_bounds.len(), problem.len());
            for (a, u) in solution.alpha.iter().zip(&solution.upper_bounds) {
                assert!(*a >= 0.0 && *a <= *u, "{loss}: α = {a}, U = {u}");
            }

            let n_sv = solution.alpha.iter().filter(|&&a| a > 0.0).count();
            assert_eq!(n_sv, solution.n_sv);
        }
        let solver = DualCoordinateDescent::new(LossType::L2).c(0.5);
        let solution = solver.solve(&problem).unwrap();
        assert!(solution.upper_bounds.iter().all(|u| u.is_infinite()));
    }


    #[test]
    fn free_variables_satisfy_kkt() {
        let set = overlapping(23);
        let problem = BinaryProblem::one_vs_rest(&set, 0).unwrap();

        for loss in [LossType::L1, LossType::L2] {
            let solver = DualCoordinateDescent::new(loss)
                .c(1.0)
                .eps(1e-4)
                .bias(1.0)
                .max_iter(100_000);
            let solution = solver.solve(&problem).unwrap();
            assert!(solution.converged);

            let grad = gradients(&problem, &solver, &solution.alpha, &solution.separator);
            let mut n_free = 0;
            for i in 0..problem.len() {
                let (a, u) = (solution.alpha[i], solution.upper_bounds[i]);
                if a > 0.0 && a < u {
                    n_free += 1;
                    assert!(grad[i].abs() < 1e-2, "{loss}: row {i} has gradient {}", grad[i]);
                }
                if a == 0.0 {
                    assert!(grad[i] > -1e-2, "{loss}: row {i} has gradient {}", grad[i]);
                }
            }
            if loss == LossType::L2 {
                assert!(n_free > 0);
            }
        }
    }


    #[test]
    fn shrinking_keeps_the_dual_objective() {
        let set = overlapping(5);
        let problem = BinaryProblem::one_vs_rest(&set, 1).unwrap();

        let plain = DualCoordinateDescent::new(LossType::L1)
            .c(1.0)
            .eps(1e-4)
            .max_iter(100_000);
        let shuffled = plain.clone().shuffle(99);

        let a = plain.solve(&problem).unwrap();
        let b = shuffled.solve(&problem).unwrap();
        assert!(a.converged && b.converged);
        assert!(
            (a.objective - b.objective).abs() < 1e-3 * a.objective.abs().max(1.0),
            "objectives {} and {} differ", a.objective, b.objective,
        );
    }


    #[test]
    fn weighted_solve_drops_massless_rows() {
        let set = overlapping(3);
        let problem = BinaryProblem::one_vs_rest(&set, 0).unwrap();
        let n = problem.len();

        let mut dist = vec![0.0; n];
        for d in dist.iter_mut().take(n / 2) {
            *d = 2.0 / n as f64;
        }
        let solver = DualCoordinateDescent::new(LossType::L1).c(1.0);
        let solution = solver.solve_weighted(&problem, &dist).unwrap();

        for i in n / 2..n {
            assert_eq!(solution.alpha[i], 0.0);
            assert_eq!(solution.upper_bounds[i], 0.0);
        }
        assert!(solution.separator.weights().iter().all(|w| w.is_finite()));
    }
}

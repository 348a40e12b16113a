//! Enhanced Newton-Raphson with numerically estimated derivatives.

use tracing::{debug, trace, warn};

use super::{Objective, SolverConfig, SolverResult};
use crate::error::{MathError, MathResult};

/// Finds a root of `objective` starting from `config.initial_guess`.
///
/// Each iteration evaluates the objective at the guess and at a small offset
/// either side of it (1% of the guess when `|guess| > 1`, otherwise 0.01),
/// estimates the first and second derivatives by central differences, and
/// takes a second-order corrected Newton step:
///
/// ```text
/// g0 = x - f / f'
/// g1 = x - f / (f' + f'' (g0 - x) / 2)
/// step = f / (f' + f'' (g1 - x) / 2)
/// ```
///
/// Iteration stops once `|step| <= tolerance`.
///
/// # Errors
///
/// Returns `MathError::ConvergenceFailed` if the iteration cap is reached
/// or the guess becomes non-finite, and `MathError::InvalidInput` for an
/// invalid configuration.
///
/// # Example
///
/// ```rust
/// use accrue_math::solvers::{labelled, solve_root, SolverConfig};
///
/// let mut quartic = labelled("Quartic", |x: f64| {
///     (x + 15.0) * (x + 10.0) * (x + 20.0) * (x - 4.5)
/// });
/// let config = SolverConfig::default().with_initial_guess(0.01);
/// let result = solve_root(&mut quartic, &config).unwrap();
/// assert!((result.root - 4.5).abs() < 1e-7);
/// ```
pub fn solve_root<O>(objective: &mut O, config: &SolverConfig) -> MathResult<SolverResult>
where
    O: Objective + ?Sized,
{
    config.validate()?;

    let mut guess = config.initial_guess;
    let mut iterations = 0;
    let mut residual;

    loop {
        let offset = if guess.abs() > 1.0 { 0.01 * guess } else { 0.01 };

        let f0 = objective.compute(guess);
        let fp = objective.compute(guess + offset);
        let fm = objective.compute(guess - offset);

        let d1 = (fp - fm) / (2.0 * offset);
        let d2 = (fp - 2.0 * f0 + fm) / (offset * offset);

        let g0 = guess - f0 / d1;
        let g1 = guess - f0 / (d1 + d2 * (g0 - guess) / 2.0);
        let step = f0 / (d1 + d2 * (g1 - guess) / 2.0);

        guess -= step;
        iterations += 1;
        residual = f0;
        trace!(iteration = iterations, guess, step, residual, "newton step");

        if iterations >= config.max_iterations
            || !guess.is_finite()
            || step.abs() <= config.tolerance
        {
            break;
        }
    }

    if iterations >= config.max_iterations || !guess.is_finite() {
        warn!(objective = objective.label(), iterations, guess, "solver did not converge");
        return Err(MathError::convergence_failed(
            objective.label(),
            config.max_iterations,
            guess,
            residual,
        ));
    }

    debug!(objective = objective.label(), root = guess, iterations, "solver converged");
    Ok(SolverResult {
        root: guess,
        iterations,
        residual,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solvers::labelled;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_quartic_from_small_seed() {
        let mut f = labelled("Quartic", |x: f64| {
            (x + 15.0) * (x + 10.0) * (x + 20.0) * (x - 4.5)
        });
        let config = SolverConfig::default().with_initial_guess(0.01);
        let result = solve_root(&mut f, &config).unwrap();

        assert_relative_eq!(result.root, 4.5, epsilon = 1e-7);
        assert!(result.iterations < 50);
    }

    #[test]
    fn test_constant_zero_fails() {
        let mut f = labelled("Flat Line", |_x: f64| 0.0);
        let err = solve_root(&mut f, &SolverConfig::default()).unwrap_err();

        match err {
            MathError::ConvergenceFailed {
                objective,
                iterations,
                guess,
                residual,
            } => {
                assert_eq!(objective, "Flat Line");
                assert_eq!(iterations, 50);
                assert!(guess.is_nan());
                assert_eq!(residual, 0.0);
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn test_no_real_root_exhausts_iterations() {
        let mut f = labelled("Parabola", |x: f64| x * x + 1.0);
        let err = solve_root(&mut f, &SolverConfig::default()).unwrap_err();

        assert!(matches!(
            err,
            MathError::ConvergenceFailed { iterations: 50, .. }
        ));
        assert!(err.to_string().contains("Parabola"));
    }

    #[test]
    fn test_large_guess_uses_relative_offset() {
        let mut f = labelled("Instalment", |x: f64| 3.0 * x - 1020.06);
        let config = SolverConfig::default().with_initial_guess(500.0);
        let result = solve_root(&mut f, &config).unwrap();

        assert_relative_eq!(result.root, 340.02, epsilon = 1e-9);
    }

    #[test]
    fn test_iteration_cap_is_respected() {
        let mut evaluations = 0;
        let mut f = labelled("Cubic", |x: f64| {
            evaluations += 1;
            x * x * x - 2.0 * x + 2.0
        });
        let config = SolverConfig::default()
            .with_initial_guess(0.0)
            .with_max_iterations(5);
        assert!(solve_root(&mut f, &config).is_err());
        drop(f);
        assert_eq!(evaluations, 15);
    }

    #[test]
    fn test_invalid_config() {
        let mut f = labelled("Line", |x: f64| x);
        let config = SolverConfig::default().with_tolerance(-1.0);
        assert!(matches!(
            solve_root(&mut f, &config),
            Err(MathError::InvalidInput { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_linear_roots(slope in 0.5f64..50.0, root in -0.9f64..5.0) {
            let mut f = labelled("Line", move |x: f64| slope * (x - root));
            let result = solve_root(&mut f, &SolverConfig::default()).unwrap();
            prop_assert!((result.root - root).abs() < 1e-7);
        }
    }
}

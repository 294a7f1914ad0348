use orrery_core::{OdeProblem, VectorState};

use crate::transient::rk4::{self, single_step};

use super::Config;

/// Exponent of the RK4 step-size update, `1 / (order + 1)`.
const EXPONENT: f64 = 0.2;

/// A candidate advance of size `dt`, evaluated by step doubling.
pub(super) struct Attempt {
    /// Result of two half steps, kept when the attempt is accepted.
    pub(super) state: VectorState,

    /// Largest componentwise relative difference between the two estimates.
    pub(super) rel_error: f64,

    /// Either estimate contains a non-finite component.
    pub(super) diverged: bool,
}

/// Evaluates an advance of `dt` from `state` by comparing two half steps
/// against one full step.
pub(super) fn attempt<P: OdeProblem>(
    problem: &P,
    state: &VectorState,
    dt: f64,
    floor: f64,
) -> Result<Attempt, rk4::Error> {
    let half = 0.5 * dt;

    let midway = single_step(problem, state, half)?;
    let double = single_step(problem, &midway, half)?;
    let single = single_step(problem, state, dt)?;

    let diverged = !double.is_finite() || !single.is_finite();
    let rel_error = if diverged {
        f64::NAN
    } else {
        relative_error(&double, &single, floor)
    };

    Ok(Attempt {
        state: double,
        rel_error,
        diverged,
    })
}

/// Returns `max_i |double[i] - single[i]| / max(|single[i]|, floor)`.
///
/// Components where both estimates agree exactly contribute zero, even over a
/// zero denominator. Any other difference over a zero denominator is infinite.
pub(super) fn relative_error(double: &VectorState, single: &VectorState, floor: f64) -> f64 {
    double
        .iter()
        .zip(single.iter())
        .map(|(d, s)| {
            let diff = (d - s).abs();
            if diff == 0.0 {
                0.0
            } else {
                diff / s.abs().max(floor)
            }
        })
        .fold(0.0, f64::max)
}

/// Proposes the next step size after an attempt of size `dt`.
///
/// `dt_est = dt · (err / rel_error)^0.2`, scaled by the safety factor and
/// clamped to `[dt / S2, S2 · dt]`.
pub(super) fn next_step(dt: f64, err: f64, rel_error: f64, config: &Config) -> f64 {
    let dt_est = if rel_error > 0.0 {
        dt * (err / rel_error).powf(EXPONENT)
    } else {
        f64::INFINITY
    };

    let limit = config.growth_limit();
    (config.safety() * dt_est).max(dt / limit).min(limit * dt)
}

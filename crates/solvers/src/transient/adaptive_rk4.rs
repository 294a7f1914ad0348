//! Adaptive fourth-order Runge-Kutta integration with step-doubling error
//! control.
//!
//! # Algorithm
//!
//! Each advance from time `t` with trial step `dt` (capped so that `t + dt`
//! never exceeds `tmax`) is evaluated twice: once as two successive RK4 steps
//! of `dt / 2`, and once as a single RK4 step of `dt`. The largest
//! componentwise relative difference between the two results estimates the
//! local error.
//!
//! ```text
//! rel_error = max_i |double[i] - single[i]| / |single[i]|
//! dt_est    = dt · (err / rel_error)^0.2
//! dt_new    = min(max(S1 · dt_est, dt / S2), S2 · dt)
//! ```
//!
//! If `rel_error <= err` the two-half-step result is committed to the
//! trajectory and `dt_new` becomes the next trial step. Otherwise the attempt
//! is discarded and retried from the same time with `dt_new`.
//!
//! Setting `err <= 0` disables adaptivity: the integrator takes fixed steps of
//! `dt0`, truncating the last one to land exactly on `tmax`.
//!
//! # Relative error near zero
//!
//! The estimate divides by each component of the single-step result. With the
//! default [`Config`], a component that is exactly zero makes the estimate
//! infinite (unless both results agree exactly) and the step shrinks by `S2`.
//! Problems whose states cross zero can set [`Config::with_error_floor`] to
//! bound the denominator from below.
//!
//! # Failure
//!
//! A candidate state containing NaN or infinity ends the run with
//! [`Error::NumericalDivergence`]. An advance that is rejected more than
//! [`Config::max_retries`] times ends the run with
//! [`Error::StepRetryExhausted`].
//!
//! # Observer Events
//!
//! The integrator emits [`Event::Started`] once, then [`Event::Rejected`] for
//! every rejected attempt and [`Event::Accepted`] for every committed step.
//! Observers can return [`Action::StopEarly`] from any event to end the run
//! with the trajectory accumulated so far.

mod action;
mod config;
mod error;
mod estimate;
mod event;
mod solution;
mod stepping;

#[cfg(test)]
mod tests;

pub use action::Action;
pub use config::{Config, ConfigError};
pub use error::Error;
pub use event::Event;
pub use solution::{Solution, Status};

use orrery_core::{Observer, OdeProblem, Trajectory, VectorState};

/// Integrates `ẏ = problem.derivative(y)` from `t = 0` to `tmax`.
///
/// `dt0` is the initial trial step and `err` the target relative error per
/// step; `err <= 0` selects fixed stepping. The observer receives an [`Event`]
/// for the start of the run and for every attempt.
///
/// # Errors
///
/// Returns an error if the inputs are invalid, the problem fails or returns a
/// derivative of the wrong dimension, the state diverges, or a step cannot
/// meet `err` within the configured number of retries.
pub fn integrate<P, Obs>(
    problem: &P,
    initial: VectorState,
    dt0: f64,
    err: f64,
    tmax: f64,
    config: &Config,
    mut observer: Obs,
) -> Result<Solution, Error>
where
    P: OdeProblem,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    validate(&initial, dt0, err, tmax)?;

    let trajectory = Trajectory::new(initial);

    let action = observer.observe(&Event::Started {
        state: trajectory.first().1,
    });
    if let Some(Action::StopEarly) = action {
        return Ok(Solution {
            status: Status::StoppedByObserver,
            trajectory,
            steps: 0,
            n_reset: 0,
        });
    }

    if err > 0.0 {
        stepping::adaptive(problem, trajectory, dt0, err, tmax, config, &mut observer)
    } else {
        stepping::fixed(problem, trajectory, dt0, tmax, &mut observer)
    }
}

/// Integrates without observer support.
///
/// This is a convenience wrapper around [`integrate`] that discards events.
///
/// # Errors
///
/// Returns an error under the same conditions as [`integrate`].
pub fn integrate_unobserved<P: OdeProblem>(
    problem: &P,
    initial: VectorState,
    dt0: f64,
    err: f64,
    tmax: f64,
    config: &Config,
) -> Result<Solution, Error> {
    integrate(problem, initial, dt0, err, tmax, config, ())
}

fn validate(initial: &VectorState, dt0: f64, err: f64, tmax: f64) -> Result<(), Error> {
    if !dt0.is_finite() || dt0 <= 0.0 {
        return Err(Error::InvalidStepSize { dt: dt0 });
    }
    if !tmax.is_finite() || tmax < 0.0 {
        return Err(Error::InvalidEndTime { tmax });
    }
    if err.is_nan() {
        return Err(Error::InvalidTolerance);
    }
    if !initial.is_finite() {
        return Err(Error::NumericalDivergence { time: 0.0, dt: dt0 });
    }
    Ok(())
}

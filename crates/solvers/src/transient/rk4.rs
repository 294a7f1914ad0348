//! Classical fourth-order Runge-Kutta step.
//!
//! A single step advances `state` by `dt` under `ẏ = f(y)`:
//!
//! ```text
//! k1 = f(y)
//! k2 = f(y + dt/2 · k1)
//! k3 = f(y + dt/2 · k2)
//! k4 = f(y + dt · k3)
//! y' = y + dt/6 · (k1 + 2 k2 + 2 k3 + k4)
//! ```
//!
//! There is no error estimation at this level. See
//! [`adaptive_rk4`](super::adaptive_rk4) for step-size control.

use std::error::Error as StdError;

use orrery_core::{DimensionMismatch, OdeProblem, VectorState};

/// Errors that can occur while taking a Runge-Kutta step.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The right-hand side returned a derivative of the wrong dimension.
    #[error(transparent)]
    DimensionMismatch(#[from] DimensionMismatch),

    /// The right-hand side failed.
    #[error("problem error: {0}")]
    Problem(#[source] Box<dyn StdError + Send + Sync>),
}

impl Error {
    pub(crate) fn problem<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        Self::Problem(Box::new(err))
    }
}

/// Takes a single classical RK4 step of size `dt` from `state`.
///
/// The right-hand side is evaluated four times. The result is deterministic
/// and `state` is left untouched.
///
/// # Errors
///
/// Returns an error if the problem fails or returns a derivative whose
/// dimension differs from `state`.
pub fn single_step<P: OdeProblem>(
    problem: &P,
    state: &VectorState,
    dt: f64,
) -> Result<VectorState, Error> {
    let half = 0.5 * dt;

    let k1 = derivative(problem, state)?;
    let k2 = derivative(problem, &state.step(&k1, half)?)?;
    let k3 = derivative(problem, &state.step(&k2, half)?)?;
    let k4 = derivative(problem, &state.step(&k3, dt)?)?;

    let slope = k1.step(&k2, 2.0)?.step(&k3, 2.0)?.step(&k4, 1.0)?;

    Ok(state.step(&slope, dt / 6.0)?)
}

fn derivative<P: OdeProblem>(problem: &P, state: &VectorState) -> Result<VectorState, Error> {
    problem.derivative(state).map_err(Error::problem)
}

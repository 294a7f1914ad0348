use std::error::Error as StdError;

use orrery_core::{DimensionMismatch, TrajectoryError};

use crate::transient::rk4;

/// Errors that can occur during adaptive RK4 integration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("initial step size must be finite and positive, got {dt}")]
    InvalidStepSize { dt: f64 },

    #[error("end time must be finite and non-negative, got {tmax}")]
    InvalidEndTime { tmax: f64 },

    #[error("target relative error must not be NaN")]
    InvalidTolerance,

    #[error(transparent)]
    DimensionMismatch(#[from] DimensionMismatch),

    #[error("problem error: {0}")]
    Problem(#[source] Box<dyn StdError + Send + Sync>),

    #[error("state became non-finite stepping from t = {time} with dt = {dt}")]
    NumericalDivergence { time: f64, dt: f64 },

    #[error(
        "step from t = {time} rejected {retries} times (last dt = {dt}, relative error = {rel_error})"
    )]
    StepRetryExhausted {
        time: f64,
        dt: f64,
        rel_error: f64,
        retries: usize,
    },

    #[error("step size {dt} is too small to advance from t = {time}")]
    StepSizeUnderflow { time: f64, dt: f64 },

    #[error(transparent)]
    Trajectory(#[from] TrajectoryError),
}

impl From<rk4::Error> for Error {
    fn from(err: rk4::Error) -> Self {
        match err {
            rk4::Error::DimensionMismatch(e) => Self::DimensionMismatch(e),
            rk4::Error::Problem(e) => Self::Problem(e),
        }
    }
}

//! Core types for the orrery integrators.
//!
//! This crate defines the shared abstractions that solvers, models, and
//! observers build on:
//!
//! - [`VectorState`] — a fixed-dimension point in phase space with the affine
//!   arithmetic explicit Runge-Kutta methods need
//! - [`Trajectory`] — the time-ordered history an integrator produces
//! - [`OdeProblem`] — the right-hand side `ẏ = f(y)` of an ODE system
//! - [`Observer`] — receives integrator events and optionally returns control
//!   actions

mod observer;
mod problems;
mod state;
mod trajectory;

pub use observer::Observer;
pub use problems::OdeProblem;
pub use state::{DimensionMismatch, EmptyState, VectorState};
pub use trajectory::{Trajectory, TrajectoryError};

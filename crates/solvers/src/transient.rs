//! Explicit time integrators for autonomous ODE systems.
//!
//! An [`OdeProblem`] supplies the right-hand side `ẏ = f(y)` of a system
//! whose state is a [`VectorState`]. Integrators in this module advance that
//! state from `t = 0` and record the result as a [`Trajectory`].
//!
//! # Integrators
//!
//! - [`rk4`] — a single classical fourth-order Runge-Kutta step
//! - [`adaptive_rk4`] — RK4 with step-doubling error control and step-size
//!   adaptation
//!
//! [`OdeProblem`]: orrery_core::OdeProblem
//! [`VectorState`]: orrery_core::VectorState
//! [`Trajectory`]: orrery_core::Trajectory

pub mod adaptive_rk4;
pub mod rk4;

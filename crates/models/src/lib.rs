//! Gravitational models for the orrery integrators.
//!
//! Each model implements [`OdeProblem`] and carries its physical parameters
//! as fields, so several systems with different constants can be integrated
//! side by side.
//!
//! - [`Kepler`] — a single body orbiting a fixed central mass, state
//!   `[x, y, u, v]`
//! - [`NBody`] — planar gravitational interaction of `N` bodies with a
//!   softened force law, state `[x1, y1, …, xN, yN, u1, v1, …, uN, vN]`
//!
//! [`OdeProblem`]: orrery_core::OdeProblem

mod kepler;
mod n_body;

pub use kepler::{Kepler, KeplerError};
pub use n_body::{NBody, NBodyError};

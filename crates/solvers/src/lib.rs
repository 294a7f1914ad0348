//! Integrators for the orrery workspace.
//!
//! See [`transient`] for the available time integrators.

pub mod transient;

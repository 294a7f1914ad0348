//! Reusable observers for the orrery integrators.
//!
//! This crate provides [`Observer`] implementations and the capability traits
//! they are written against, so the same observer can watch any integrator
//! whose events and actions implement those traits.
//!
//! # Modules
//!
//! - [`traits`] — Capability traits for integrator events and actions
//!   ([`HasTime`], [`HasStepSize`], [`HasErrorEstimate`], [`CanStopEarly`])
//!
//! # Observers
//!
//! - [`StepLog`] — records every step attempt for later inspection
//! - [`StopAfter`] — stops a run after a fixed number of accepted steps
//!
//! [`Observer`]: orrery_core::Observer
//! [`HasTime`]: traits::HasTime
//! [`HasStepSize`]: traits::HasStepSize
//! [`HasErrorEstimate`]: traits::HasErrorEstimate
//! [`CanStopEarly`]: traits::CanStopEarly

pub mod traits;

mod step_log;
mod stop_after;

pub use step_log::{Attempt, StepLog};
pub use stop_after::StopAfter;

//! Capability traits for cross-integrator observers.
//!
//! These traits abstract over integrator-specific event and action types,
//! enabling observers to work generically across integrators.
//!
//! # Event traits
//!
//! - [`HasTime`] — events that carry a simulation time
//! - [`HasStepSize`] — events that describe a step attempt and its outcome
//! - [`HasErrorEstimate`] — events that may carry a local error estimate
//!
//! # Action traits
//!
//! - [`CanStopEarly`] — actions that can signal early termination
//!
//! # Example
//!
//! ```rust
//! use orrery_core::Observer;
//! use orrery_observers::traits::{CanStopEarly, HasTime};
//!
//! struct StopAt {
//!     time: f64,
//! }
//!
//! impl<E: HasTime, A: CanStopEarly> Observer<E, A> for StopAt {
//!     fn observe(&mut self, event: &E) -> Option<A> {
//!         (event.time() >= self.time).then(A::stop_early)
//!     }
//! }
//! ```

use orrery_solvers::transient::adaptive_rk4;

/// An event that carries a simulation time.
pub trait HasTime {
    /// Returns the time associated with this event.
    fn time(&self) -> f64;
}

/// An event that may describe a step attempt.
pub trait HasStepSize {
    /// Returns the attempted step size, or `None` if the event is not an
    /// attempt.
    fn step_size(&self) -> Option<f64>;

    /// Returns `true` if the event describes a step that was kept.
    fn is_accepted(&self) -> bool;
}

/// An event that may carry an estimate of the local relative error.
pub trait HasErrorEstimate {
    /// Returns the estimate, or `None` when none was computed.
    fn rel_error(&self) -> Option<f64>;
}

/// An action type that can signal early termination.
pub trait CanStopEarly {
    /// Returns the action that stops the integrator early.
    fn stop_early() -> Self;
}

// --- adaptive_rk4::Event ---

impl HasTime for adaptive_rk4::Event<'_> {
    fn time(&self) -> f64 {
        adaptive_rk4::Event::time(self)
    }
}

impl HasStepSize for adaptive_rk4::Event<'_> {
    fn step_size(&self) -> Option<f64> {
        self.dt()
    }

    fn is_accepted(&self) -> bool {
        adaptive_rk4::Event::is_accepted(self)
    }
}

impl HasErrorEstimate for adaptive_rk4::Event<'_> {
    fn rel_error(&self) -> Option<f64> {
        adaptive_rk4::Event::rel_error(self)
    }
}

// --- adaptive_rk4::Action ---

impl CanStopEarly for adaptive_rk4::Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use orrery_core::VectorState;

    use orrery_solvers::transient::adaptive_rk4::{Action, Event};

    #[test]
    fn adaptive_events_expose_capabilities() {
        let s = VectorState::new([1.0]).unwrap();

        let started = Event::Started { state: &s };
        assert_eq!(HasTime::time(&started), 0.0);
        assert_eq!(started.step_size(), None);
        assert!(!HasStepSize::is_accepted(&started));

        let accepted = Event::Accepted {
            step: 1,
            time: 0.5,
            dt: 0.5,
            state: &s,
            rel_error: Some(1e-9),
            next_dt: 1.0,
        };
        assert_eq!(HasTime::time(&accepted), 0.5);
        assert_eq!(accepted.step_size(), Some(0.5));
        assert!(HasStepSize::is_accepted(&accepted));
        assert_eq!(HasErrorEstimate::rel_error(&accepted), Some(1e-9));

        let rejected = Event::Rejected {
            time: 0.5,
            dt: 1.0,
            rel_error: 1e-3,
            next_dt: 0.25,
            retries: 1,
        };
        assert_eq!(rejected.step_size(), Some(1.0));
        assert!(!HasStepSize::is_accepted(&rejected));
        assert_eq!(HasErrorEstimate::rel_error(&rejected), Some(1e-3));
    }

    #[test]
    fn stop_early_maps_to_action() {
        assert_eq!(<Action as CanStopEarly>::stop_early(), Action::StopEarly);
    }
}

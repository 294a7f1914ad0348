use orrery_core::Trajectory;

/// Indicates how the integrator terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Reached `tmax`.
    Complete,

    /// Stopped early due to an observer action.
    StoppedByObserver,
}

/// The result of an adaptive RK4 integration.
#[derive(Debug, Clone)]
pub struct Solution {
    /// How the integrator terminated.
    pub status: Status,

    /// Every accepted `(time, state)` sample, starting with the initial state.
    pub trajectory: Trajectory,

    /// Number of accepted steps.
    pub steps: usize,

    /// Number of rejected attempts that were retried with a smaller step.
    pub n_reset: usize,
}

use orrery_core::Observer;

use crate::traits::{CanStopEarly, HasStepSize};

/// An observer that stops a run once a number of steps have been accepted.
///
/// Rejected attempts do not count toward the limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopAfter {
    limit: usize,
    accepted: usize,
}

impl StopAfter {
    /// Creates an observer that stops after `limit` accepted steps.
    ///
    /// A limit of zero stops at the first accepted step.
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self { limit, accepted: 0 }
    }

    /// Returns the number of accepted steps seen so far.
    #[must_use]
    pub fn accepted(&self) -> usize {
        self.accepted
    }
}

impl<E, A> Observer<E, A> for StopAfter
where
    E: HasStepSize,
    A: CanStopEarly,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        if !event.is_accepted() {
            return None;
        }
        self.accepted += 1;
        (self.accepted >= self.limit).then(A::stop_early)
    }
}

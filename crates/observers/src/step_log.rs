use orrery_core::Observer;

use crate::traits::{HasErrorEstimate, HasStepSize, HasTime};

/// A single step attempt recorded by a [`StepLog`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attempt {
    /// Time reported by the event.
    pub time: f64,

    /// Attempted step size.
    pub dt: f64,

    /// Estimated relative error, if the integrator computed one.
    pub rel_error: Option<f64>,

    /// Whether the step was kept.
    pub accepted: bool,
}

/// An observer that records every step attempt.
///
/// Events that are not attempts, such as a start notification, are ignored.
/// The log never requests an action, so it does not change how a run
/// proceeds.
///
/// Pass `&mut StepLog` to an integrator to keep the log available for
/// inspection after the run:
///
/// ```ignore
/// let mut log = StepLog::new();
/// adaptive_rk4::integrate(&problem, y0, dt0, err, tmax, &config, &mut log)?;
/// println!("{} rejections", log.rejections());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepLog {
    attempts: Vec<Attempt>,
}

impl StepLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every recorded attempt in the order it happened.
    #[must_use]
    pub fn attempts(&self) -> &[Attempt] {
        &self.attempts
    }

    /// Returns the number of accepted steps.
    #[must_use]
    pub fn accepted(&self) -> usize {
        self.attempts.iter().filter(|a| a.accepted).count()
    }

    /// Returns the number of rejected attempts.
    #[must_use]
    pub fn rejections(&self) -> usize {
        self.attempts.len() - self.accepted()
    }

    /// Returns the sizes of the accepted steps in order.
    #[must_use]
    pub fn accepted_step_sizes(&self) -> Vec<f64> {
        self.attempts
            .iter()
            .filter(|a| a.accepted)
            .map(|a| a.dt)
            .collect()
    }

    /// Returns the largest error estimate among accepted steps.
    ///
    /// Returns `None` if no accepted step carried an estimate.
    #[must_use]
    pub fn max_accepted_error(&self) -> Option<f64> {
        self.attempts
            .iter()
            .filter(|a| a.accepted)
            .filter_map(|a| a.rel_error)
            .reduce(f64::max)
    }

    /// Records `event` if it describes a step attempt.
    pub fn record<E>(&mut self, event: &E)
    where
        E: HasTime + HasStepSize + HasErrorEstimate,
    {
        if let Some(dt) = event.step_size() {
            self.attempts.push(Attempt {
                time: event.time(),
                dt,
                rel_error: event.rel_error(),
                accepted: event.is_accepted(),
            });
        }
    }
}

impl<E, A> Observer<E, A> for StepLog
where
    E: HasTime + HasStepSize + HasErrorEstimate,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self.record(event);
        None
    }
}

impl<E, A> Observer<E, A> for &mut StepLog
where
    E: HasTime + HasStepSize + HasErrorEstimate,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self.record(event);
        None
    }
}

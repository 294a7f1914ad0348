use thiserror::Error;

use crate::VectorState;

/// An ordered history of `(time, state)` samples produced by an integrator.
///
/// A trajectory always starts with the initial state at `t = 0` and grows
/// monotonically. Times are strictly increasing and every state has the same
/// dimension as the initial one. Consecutive samples are not assumed to be
/// evenly spaced; use [`Trajectory::step_sizes`] to inspect the spacing.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    times: Vec<f64>,
    states: Vec<VectorState>,
}

/// Errors that can occur when appending to a [`Trajectory`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum TrajectoryError {
    #[error("time {time} does not follow the last recorded time {last}")]
    NonIncreasingTime { last: f64, time: f64 },

    #[error("state has {found} components, trajectory holds {expected}")]
    DimensionMismatch { expected: usize, found: usize },
}

impl Trajectory {
    /// Creates a trajectory holding only `initial` at `t = 0`.
    #[must_use]
    pub fn new(initial: VectorState) -> Self {
        Self {
            times: vec![0.0],
            states: vec![initial],
        }
    }

    /// Appends a sample.
    ///
    /// # Errors
    ///
    /// Returns an error if `time` is not strictly greater than the last
    /// recorded time, or if `state` has a different dimension.
    pub fn push(&mut self, time: f64, state: VectorState) -> Result<(), TrajectoryError> {
        let last = self.final_time();
        if time.is_nan() || time <= last {
            return Err(TrajectoryError::NonIncreasingTime { last, time });
        }
        if state.dimension() != self.dimension() {
            return Err(TrajectoryError::DimensionMismatch {
                expected: self.dimension(),
                found: state.dimension(),
            });
        }

        self.times.push(time);
        self.states.push(state);
        Ok(())
    }

    /// Returns the number of samples, including the initial one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always `false`: a trajectory holds at least its initial sample.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Returns the dimension shared by every state.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.states[0].dimension()
    }

    /// Returns the sample times.
    #[must_use]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Returns the recorded states.
    #[must_use]
    pub fn states(&self) -> &[VectorState] {
        &self.states
    }

    /// Returns sample `n`, if present.
    #[must_use]
    pub fn get(&self, n: usize) -> Option<(f64, &VectorState)> {
        Some((*self.times.get(n)?, self.states.get(n)?))
    }

    /// Returns the initial sample.
    #[must_use]
    pub fn first(&self) -> (f64, &VectorState) {
        (self.times[0], &self.states[0])
    }

    /// Returns the most recent sample.
    #[must_use]
    pub fn last(&self) -> (f64, &VectorState) {
        let n = self.len() - 1;
        (self.times[n], &self.states[n])
    }

    /// Returns the time of the most recent sample.
    #[must_use]
    pub fn final_time(&self) -> f64 {
        self.times[self.len() - 1]
    }

    /// Returns an iterator over `(time, state)` samples in order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, &VectorState)> {
        self.times.iter().copied().zip(self.states.iter())
    }

    /// Returns the time series of component `index`.
    ///
    /// Returns `None` if `index` is out of range for this trajectory's states.
    #[must_use]
    pub fn component(&self, index: usize) -> Option<Vec<f64>> {
        if index >= self.dimension() {
            return None;
        }
        Some(self.states.iter().map(|s| s[index]).collect())
    }

    /// Returns the spacing between consecutive sample times.
    ///
    /// The result has one entry fewer than the trajectory.
    #[must_use]
    pub fn step_sizes(&self) -> Vec<f64> {
        self.times.windows(2).map(|w| w[1] - w[0]).collect()
    }
}

use orrery_core::VectorState;

/// Events emitted by the adaptive RK4 integrator.
///
/// Every attempted advance ends in exactly one [`Event::Accepted`], preceded
/// by one [`Event::Rejected`] per retry.
#[derive(Debug, Clone, Copy)]
pub enum Event<'a> {
    /// Emitted once before the first step.
    Started {
        /// The initial state at `t = 0`.
        state: &'a VectorState,
    },

    /// A step was committed to the trajectory.
    Accepted {
        /// Accepted step count, starting at 1.
        step: usize,

        /// Time at the end of the step.
        time: f64,

        /// Size of the step just taken.
        dt: f64,

        /// The committed state.
        state: &'a VectorState,

        /// Estimated relative error, or `None` when adaptivity is disabled.
        rel_error: Option<f64>,

        /// Step size proposed for the next advance.
        next_dt: f64,
    },

    /// An attempt exceeded the error target and will be retried.
    Rejected {
        /// Time the rejected attempt started from.
        time: f64,

        /// Size of the rejected attempt.
        dt: f64,

        /// Estimated relative error of the attempt.
        rel_error: f64,

        /// Step size the retry will use (before truncation at `tmax`).
        next_dt: f64,

        /// Rejections so far for this advance, starting at 1.
        retries: usize,
    },
}

impl Event<'_> {
    /// Returns the time associated with this event.
    ///
    /// For accepted steps this is the end of the step; for rejections it is
    /// the time the attempt started from.
    #[must_use]
    pub fn time(&self) -> f64 {
        match self {
            Self::Started { .. } => 0.0,
            Self::Accepted { time, .. } | Self::Rejected { time, .. } => *time,
        }
    }

    /// Returns the attempted step size, if this event describes an attempt.
    #[must_use]
    pub fn dt(&self) -> Option<f64> {
        match self {
            Self::Started { .. } => None,
            Self::Accepted { dt, .. } | Self::Rejected { dt, .. } => Some(*dt),
        }
    }

    /// Returns the estimated relative error, if one was computed.
    #[must_use]
    pub fn rel_error(&self) -> Option<f64> {
        match self {
            Self::Started { .. } => None,
            Self::Accepted { rel_error, .. } => *rel_error,
            Self::Rejected { rel_error, .. } => Some(*rel_error),
        }
    }

    /// Returns `true` for an accepted step.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

use orrery_core::{Observer, OdeProblem, Trajectory};

use crate::transient::rk4::single_step;

use super::{
    Action, Config, Error, Event, Solution,
    estimate::{attempt, next_step},
    solution::Status,
};

/// Adaptive stepping loop.
///
/// Each advance is proposed, evaluated by step doubling, then either accepted
/// (appended to the trajectory, next step proposed) or rejected (step shrunk,
/// attempt retried from the same time).
pub(super) fn adaptive<P, Obs>(
    problem: &P,
    mut trajectory: Trajectory,
    dt0: f64,
    err: f64,
    tmax: f64,
    config: &Config,
    observer: &mut Obs,
) -> Result<Solution, Error>
where
    P: OdeProblem,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    let mut t = 0.0;
    let mut dt_next = dt0;
    let mut steps = 0;
    let mut n_reset = 0;

    while t < tmax {
        let mut retries = 0;

        let (dt, time, candidate) = loop {
            let (dt, time) = truncate(t, dt_next, tmax);
            if time <= t {
                return Err(Error::StepSizeUnderflow { time: t, dt });
            }

            let candidate = attempt(problem, trajectory.last().1, dt, config.error_floor())?;
            if candidate.diverged {
                return Err(Error::NumericalDivergence { time: t, dt });
            }

            dt_next = next_step(dt, err, candidate.rel_error, config);

            if candidate.rel_error <= err {
                break (dt, time, candidate);
            }

            retries += 1;
            n_reset += 1;

            let action = observer.observe(&Event::Rejected {
                time: t,
                dt,
                rel_error: candidate.rel_error,
                next_dt: dt_next,
                retries,
            });
            if let Some(Action::StopEarly) = action {
                return Ok(Solution {
                    status: Status::StoppedByObserver,
                    trajectory,
                    steps,
                    n_reset,
                });
            }

            if retries > config.max_retries() {
                return Err(Error::StepRetryExhausted {
                    time: t,
                    dt,
                    rel_error: candidate.rel_error,
                    retries,
                });
            }
        };

        trajectory.push(time, candidate.state)?;
        t = time;
        steps += 1;

        let action = observer.observe(&Event::Accepted {
            step: steps,
            time,
            dt,
            state: trajectory.last().1,
            rel_error: Some(candidate.rel_error),
            next_dt: dt_next,
        });
        if let Some(Action::StopEarly) = action {
            return Ok(Solution {
                status: Status::StoppedByObserver,
                trajectory,
                steps,
                n_reset,
            });
        }
    }

    Ok(Solution {
        status: Status::Complete,
        trajectory,
        steps,
        n_reset,
    })
}

/// Fixed stepping loop, used when adaptivity is disabled.
///
/// Takes `ceil(tmax / dt0)` steps of `dt0`; the last one is truncated to land
/// on `tmax` exactly.
pub(super) fn fixed<P, Obs>(
    problem: &P,
    mut trajectory: Trajectory,
    dt0: f64,
    tmax: f64,
    observer: &mut Obs,
) -> Result<Solution, Error>
where
    P: OdeProblem,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    let total = fixed_step_count(dt0, tmax);
    let mut t = 0.0;

    for step in 1..=total {
        #[allow(clippy::cast_precision_loss)]
        let time = if step == total {
            tmax
        } else {
            (step as f64 * dt0).min(tmax)
        };
        let dt = time - t;

        let next = single_step(problem, trajectory.last().1, dt)?;
        if !next.is_finite() {
            return Err(Error::NumericalDivergence { time: t, dt });
        }

        trajectory.push(time, next)?;
        t = time;

        let action = observer.observe(&Event::Accepted {
            step,
            time,
            dt,
            state: trajectory.last().1,
            rel_error: None,
            next_dt: dt0,
        });
        if let Some(Action::StopEarly) = action {
            return Ok(Solution {
                status: Status::StoppedByObserver,
                trajectory,
                steps: step,
                n_reset: 0,
            });
        }
    }

    Ok(Solution {
        status: Status::Complete,
        trajectory,
        steps: total,
        n_reset: 0,
    })
}

/// Caps a proposed step so it never carries `t` past `tmax`.
///
/// Returns the step size and the time it lands on. A truncated step lands on
/// `tmax` exactly rather than on `t + (tmax - t)`.
fn truncate(t: f64, dt: f64, tmax: f64) -> (f64, f64) {
    if t + dt >= tmax {
        (tmax - t, tmax)
    } else {
        (dt, t + dt)
    }
}

/// Returns `ceil(tmax / dt0)`.
///
/// The ratio is nudged down by a few ULPs first so that quotients such as
/// `1.1 / 0.1 = 11.000000000000002` do not produce a spurious extra step.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(super) fn fixed_step_count(dt0: f64, tmax: f64) -> usize {
    if tmax <= 0.0 {
        return 0;
    }
    let ratio = tmax / dt0;
    (ratio * (1.0 - 4.0 * f64::EPSILON)).ceil().max(1.0) as usize
}

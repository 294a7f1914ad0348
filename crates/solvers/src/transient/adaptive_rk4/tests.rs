use std::convert::Infallible;

use approx::assert_relative_eq;
use thiserror::Error;

use orrery_core::{OdeProblem, VectorState};

use crate::transient::rk4::single_step;

use super::{Action, Config, Error, Event, Status, integrate, integrate_unobserved};

fn state(components: &[f64]) -> VectorState {
    VectorState::new(components.to_vec()).unwrap()
}

/// Exponential decay: ẏ = -y.
struct Decay;

impl OdeProblem for Decay {
    type Error = Infallible;

    fn derivative(&self, s: &VectorState) -> Result<VectorState, Self::Error> {
        Ok(s.scale(-1.0))
    }
}

/// Simple harmonic oscillator: ẋ = v, v̇ = -x.
fn oscillator(s: &VectorState) -> VectorState {
    state(&[s[1], -s[0]])
}

#[test]
fn zero_end_time_returns_initial_point() {
    for err in [1e-8, 0.0, -1.0] {
        let solution =
            integrate_unobserved(&Decay, state(&[1.0]), 0.1, err, 0.0, &Config::default())
                .expect("should return initial");

        assert_eq!(solution.status, Status::Complete);
        assert_eq!(solution.steps, 0);
        assert_eq!(solution.n_reset, 0);
        assert_eq!(solution.trajectory.len(), 1);
        assert_eq!(solution.trajectory.first(), (0.0, &state(&[1.0])));
    }
}

#[test]
fn fixed_mode_takes_ceil_steps_and_truncates_last() {
    let solution = integrate_unobserved(&Decay, state(&[1.0]), 0.3, 0.0, 1.0, &Config::default())
        .expect("should integrate");

    assert_eq!(solution.status, Status::Complete);
    assert_eq!(solution.steps, 4);
    assert_eq!(solution.n_reset, 0);
    assert_eq!(solution.trajectory.len(), 5);
    assert_eq!(solution.trajectory.final_time(), 1.0);

    let dts = solution.trajectory.step_sizes();
    assert_relative_eq!(dts[0], 0.3, epsilon = 1e-12);
    assert_relative_eq!(dts[1], 0.3, epsilon = 1e-12);
    assert_relative_eq!(dts[2], 0.3, epsilon = 1e-12);
    assert_relative_eq!(dts[3], 0.1, epsilon = 1e-12);
}

#[test]
fn fixed_mode_does_not_add_sliver_steps() {
    let solution =
        integrate_unobserved(&Decay, state(&[1.0]), 0.1, -1.0, 1.0, &Config::default())
            .expect("should integrate");

    assert_eq!(solution.steps, 10);
    assert_eq!(solution.trajectory.final_time(), 1.0);
}

#[test]
fn fixed_mode_matches_repeated_single_steps() {
    let solution =
        integrate_unobserved(&oscillator, state(&[1.0, 0.0]), 0.25, 0.0, 1.0, &Config::default())
            .expect("should integrate");

    let mut expected = state(&[1.0, 0.0]);
    for _ in 0..4 {
        expected = single_step(&oscillator, &expected, 0.25).unwrap();
    }

    assert_eq!(solution.trajectory.last().1, &expected);
}

#[test]
fn adaptive_decay_reaches_end_time_accurately() {
    let solution = integrate_unobserved(&Decay, state(&[1.0]), 0.1, 1e-8, 5.0, &Config::default())
        .expect("should integrate");

    assert_eq!(solution.status, Status::Complete);
    assert_eq!(solution.trajectory.final_time(), 5.0);
    assert_eq!(solution.steps, solution.trajectory.len() - 1);
    assert!(solution.trajectory.step_sizes().iter().all(|&dt| dt > 0.0));

    let (_, last) = solution.trajectory.last();
    assert_relative_eq!(last[0], (-5.0_f64).exp(), max_relative = 1e-6);
}

#[test]
fn equilibrium_grows_step_by_growth_limit() {
    let rest = state(&[2.0, -3.0]);
    let zero = |s: &VectorState| VectorState::zeros(s.dimension()).unwrap();

    let solution = integrate_unobserved(&zero, rest.clone(), 0.01, 1e-8, 1.0, &Config::default())
        .expect("should integrate");

    // Zero error estimate: every accepted step proposes S2 = 4 times itself.
    assert_eq!(solution.steps, 5);
    assert_eq!(solution.n_reset, 0);

    let dts = solution.trajectory.step_sizes();
    for (dt, expected) in dts.iter().zip([0.01, 0.04, 0.16, 0.64, 0.15]) {
        assert_relative_eq!(*dt, expected, epsilon = 1e-12);
    }
    assert!(solution.trajectory.states().iter().all(|s| *s == rest));
}

#[test]
fn integration_is_deterministic() {
    let run = || {
        integrate_unobserved(
            &oscillator,
            state(&[1.0, 0.5]),
            0.05,
            1e-9,
            3.0,
            &Config::default(),
        )
        .expect("should integrate")
    };

    let first = run();
    let second = run();

    assert_eq!(first.trajectory, second.trajectory);
    assert_eq!(first.n_reset, second.n_reset);
}

#[test]
fn smaller_initial_step_does_not_add_retries() {
    let resets = |dt0: f64| {
        integrate_unobserved(&Decay, state(&[1.0]), dt0, 1e-8, 5.0, &Config::default())
            .expect("should integrate")
            .n_reset
    };

    let coarse = resets(1.0);
    let medium = resets(0.5);
    let fine = resets(0.25);

    assert!(coarse > 0);
    assert!(medium <= coarse);
    assert!(fine <= medium);
}

#[test]
fn error_floor_handles_zero_crossings() {
    let config = Config::default().with_error_floor(1e-3).unwrap();
    let period = 2.0 * std::f64::consts::PI;

    let solution = integrate_unobserved(&oscillator, state(&[1.0, 0.0]), 0.01, 1e-10, period, &config)
        .expect("should integrate");

    let (t, last) = solution.trajectory.last();
    assert_eq!(t, period);
    assert!(last.approx_eq(&state(&[1.0, 0.0]), 1e-6), "last = {last}");
}

#[test]
fn retry_cap_is_reported() {
    let config = Config::new(0.9, 4.0, 0).unwrap();

    let result = integrate_unobserved(&Decay, state(&[1.0]), 1.0, 1e-8, 5.0, &config);

    match result {
        Err(Error::StepRetryExhausted {
            time,
            dt,
            retries,
            rel_error,
        }) => {
            assert_eq!(time, 0.0);
            assert_eq!(dt, 1.0);
            assert_eq!(retries, 1);
            assert!(rel_error > 1e-8);
        }
        other => panic!("expected retry exhaustion, got {other:?}"),
    }
}

#[test]
fn divergence_is_reported_not_propagated() {
    // Linear growth whose derivative turns to NaN past y = 1.5.
    let cliff = |s: &VectorState| {
        if s[0] > 1.5 {
            state(&[f64::NAN])
        } else {
            state(&[1.0])
        }
    };

    for err in [1e-6, 0.0] {
        let result = integrate_unobserved(&cliff, state(&[1.0]), 0.1, err, 2.0, &Config::default());

        match result {
            Err(Error::NumericalDivergence { time, .. }) => assert!(time < 0.5 + 1e-12),
            other => panic!("expected divergence, got {other:?}"),
        }
    }
}

#[test]
fn non_finite_initial_state_is_divergent() {
    let result =
        integrate_unobserved(&Decay, state(&[f64::NAN]), 0.1, 1e-8, 1.0, &Config::default());

    assert!(matches!(
        result,
        Err(Error::NumericalDivergence { time, .. }) if time == 0.0
    ));
}

#[test]
fn invalid_inputs_are_rejected() {
    let config = Config::default();
    let y0 = || state(&[1.0]);

    for dt0 in [0.0, -0.1, f64::NAN, f64::INFINITY] {
        assert!(matches!(
            integrate_unobserved(&Decay, y0(), dt0, 1e-8, 1.0, &config),
            Err(Error::InvalidStepSize { .. })
        ));
    }
    for tmax in [-1.0, f64::NAN, f64::INFINITY] {
        assert!(matches!(
            integrate_unobserved(&Decay, y0(), 0.1, 1e-8, tmax, &config),
            Err(Error::InvalidEndTime { .. })
        ));
    }
    assert!(matches!(
        integrate_unobserved(&Decay, y0(), 0.1, f64::NAN, 1.0, &config),
        Err(Error::InvalidTolerance)
    ));
}

#[test]
fn wrong_derivative_dimension_aborts() {
    let widening = |_: &VectorState| state(&[1.0, 1.0, 1.0]);

    let result =
        integrate_unobserved(&widening, state(&[1.0, 1.0]), 0.1, 1e-8, 1.0, &Config::default());

    assert!(matches!(result, Err(Error::DimensionMismatch(_))));
}

#[derive(Debug, Error)]
#[error("out of fuel")]
struct OutOfFuel;

/// Fails once the state drops below a threshold.
struct Burn;

impl OdeProblem for Burn {
    type Error = OutOfFuel;

    fn derivative(&self, s: &VectorState) -> Result<VectorState, Self::Error> {
        if s[0] < 0.5 {
            return Err(OutOfFuel);
        }
        Ok(state(&[-1.0]))
    }
}

#[test]
fn problem_errors_abort() {
    let result = integrate_unobserved(&Burn, state(&[1.0]), 0.1, 1e-8, 2.0, &Config::default());

    match result {
        Err(Error::Problem(source)) => assert_eq!(source.to_string(), "out of fuel"),
        other => panic!("expected problem error, got {other:?}"),
    }
}

#[test]
fn observer_can_stop_early() {
    let observer = |event: &Event<'_>| match event {
        Event::Accepted { step, .. } if *step >= 3 => Some(Action::StopEarly),
        _ => None,
    };

    let solution = integrate(
        &Decay,
        state(&[1.0]),
        0.01,
        1e-8,
        5.0,
        &Config::default(),
        observer,
    )
    .expect("should stop early");

    assert_eq!(solution.status, Status::StoppedByObserver);
    assert_eq!(solution.steps, 3);
    assert_eq!(solution.trajectory.len(), 4);
}

#[test]
fn observer_can_stop_before_first_step() {
    let observer = |event: &Event<'_>| match event {
        Event::Started { .. } => Some(Action::StopEarly),
        _ => None,
    };

    let solution = integrate(
        &Decay,
        state(&[1.0]),
        0.1,
        0.0,
        1.0,
        &Config::default(),
        observer,
    )
    .expect("should stop early");

    assert_eq!(solution.status, Status::StoppedByObserver);
    assert_eq!(solution.trajectory.len(), 1);
}

#[test]
fn events_mirror_solution() {
    let mut accepted_dts = Vec::new();
    let mut rejected = 0;
    let mut started = 0;

    let solution = integrate(
        &Decay,
        state(&[1.0]),
        1.0,
        1e-8,
        5.0,
        &Config::default(),
        |event: &Event<'_>| -> Option<Action> {
            match event {
                Event::Started { .. } => started += 1,
                Event::Accepted { dt, rel_error, .. } => {
                    assert!(rel_error.is_some_and(|e| e <= 1e-8));
                    accepted_dts.push(*dt);
                }
                Event::Rejected {
                    dt,
                    next_dt,
                    rel_error,
                    ..
                } => {
                    assert!(*rel_error > 1e-8);
                    assert!(next_dt < dt);
                    rejected += 1;
                }
            }
            None
        },
    )
    .expect("should integrate");

    assert_eq!(started, 1);
    assert_eq!(rejected, solution.n_reset);
    let spacing = solution.trajectory.step_sizes();
    assert_eq!(accepted_dts.len(), spacing.len());
    for (dt, gap) in accepted_dts.iter().zip(spacing) {
        assert_relative_eq!(*dt, gap, epsilon = 1e-12);
    }
}

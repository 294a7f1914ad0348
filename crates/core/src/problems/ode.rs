use std::convert::Infallible;

use crate::VectorState;

/// Defines the right-hand side of an autonomous ODE system `ẏ = f(y)`.
///
/// Integrators call [`OdeProblem::derivative`] several times per step, at
/// intermediate states, with no ordering dependency between calls at the same
/// stage. Implementations must therefore be pure: the same state always yields
/// the same derivative, and nothing observable changes between calls.
///
/// Physical parameters (a gravitational parameter, body masses, a softening
/// length) belong in the implementing type, not in global state.
///
/// Any closure `Fn(&VectorState) -> VectorState` is an `OdeProblem` whose
/// error type is [`Infallible`], so simple systems can be passed inline.
pub trait OdeProblem {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Computes the derivative of `state`.
    ///
    /// The returned state must have the same dimension as `state`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the derivative cannot be computed.
    fn derivative(&self, state: &VectorState) -> Result<VectorState, Self::Error>;
}

impl<F> OdeProblem for F
where
    F: Fn(&VectorState) -> VectorState,
{
    type Error = Infallible;

    fn derivative(&self, state: &VectorState) -> Result<VectorState, Self::Error> {
        Ok(self(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use thiserror::Error;

    /// Exponential decay: ẏ = -k y.
    struct Decay {
        rate: f64,
    }

    impl OdeProblem for Decay {
        type Error = Infallible;

        fn derivative(&self, state: &VectorState) -> Result<VectorState, Self::Error> {
            Ok(state.scale(-self.rate))
        }
    }

    #[derive(Debug, Error)]
    #[error("state left the domain")]
    struct OutOfDomain;

    /// Square root growth, only defined for non-negative states.
    struct SqrtGrowth;

    impl OdeProblem for SqrtGrowth {
        type Error = OutOfDomain;

        fn derivative(&self, state: &VectorState) -> Result<VectorState, Self::Error> {
            if state.iter().any(|&y| y < 0.0) {
                return Err(OutOfDomain);
            }
            Ok(VectorState::new(state.iter().map(|y| y.sqrt()).collect::<Vec<_>>())
                .expect("same dimension as a valid state"))
        }
    }

    #[test]
    fn struct_problem() {
        let problem = Decay { rate: 2.0 };
        let state = VectorState::new([1.0, -3.0]).unwrap();

        let ydot = problem.derivative(&state).unwrap();

        assert_eq!(ydot, VectorState::new([-2.0, 6.0]).unwrap());
    }

    #[test]
    fn closure_problem() {
        let harmonic = |s: &VectorState| VectorState::new([s[1], -s[0]]).unwrap();
        let state = VectorState::new([1.0, 0.0]).unwrap();

        let ydot = harmonic.derivative(&state).unwrap();

        assert_eq!(ydot, VectorState::new([0.0, -1.0]).unwrap());
    }

    #[test]
    fn fallible_problem() {
        let state = VectorState::new([4.0]).unwrap();
        assert_eq!(
            SqrtGrowth.derivative(&state).unwrap(),
            VectorState::new([2.0]).unwrap()
        );

        let bad = VectorState::new([-1.0]).unwrap();
        assert!(SqrtGrowth.derivative(&bad).is_err());
    }
}

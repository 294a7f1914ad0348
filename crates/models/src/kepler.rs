use std::f64::consts::PI;

use thiserror::Error;

use orrery_core::{OdeProblem, Trajectory, VectorState};

/// A single body orbiting a fixed central mass at the origin.
///
/// The state is `[x, y, u, v]`: planar position and velocity. The central
/// mass enters only through the gravitational parameter `GM`.
///
/// In units of AU, years, and solar masses, Kepler's third law gives
/// `GM = 4π²` for the Sun; see [`Kepler::solar`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kepler {
    gm: f64,
}

/// Errors that can occur when building or evaluating a [`Kepler`] orbit.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum KeplerError {
    #[error("gravitational parameter must be finite and positive, got {0}")]
    Parameter(f64),

    #[error("semi-major axis must be finite and positive, got {0}")]
    SemiMajorAxis(f64),

    #[error("eccentricity must be in [0, 1), got {0}")]
    Eccentricity(f64),

    #[error("orbit state must have 4 components, got {0}")]
    Dimension(usize),
}

impl Kepler {
    /// Creates an orbit model with gravitational parameter `gm`.
    ///
    /// # Errors
    ///
    /// Returns [`KeplerError::Parameter`] if `gm` is not finite and positive.
    pub fn new(gm: f64) -> Result<Self, KeplerError> {
        if !gm.is_finite() || gm <= 0.0 {
            return Err(KeplerError::Parameter(gm));
        }
        Ok(Self { gm })
    }

    /// A body orbiting one solar mass, in AU / yr units (`GM = 4π²`).
    #[must_use]
    pub fn solar() -> Self {
        Self { gm: 4.0 * PI * PI }
    }

    /// Returns the gravitational parameter.
    #[must_use]
    pub fn gm(&self) -> f64 {
        self.gm
    }

    /// Returns the state at perihelion of an orbit with semi-major axis `a`
    /// and eccentricity `e`.
    ///
    /// The body starts on the positive y-axis moving in the -x direction.
    ///
    /// # Errors
    ///
    /// Returns an error if `a` is not positive or `e` is outside `[0, 1)`.
    pub fn perihelion_state(&self, a: f64, e: f64) -> Result<VectorState, KeplerError> {
        if !a.is_finite() || a <= 0.0 {
            return Err(KeplerError::SemiMajorAxis(a));
        }
        if !(0.0..1.0).contains(&e) {
            return Err(KeplerError::Eccentricity(e));
        }

        let y0 = a * (1.0 - e);
        let u0 = -((self.gm / a) * (1.0 + e) / (1.0 - e)).sqrt();

        Ok(orbit_state([0.0, y0, u0, 0.0]))
    }

    /// Returns the state of a circular orbit of the given radius.
    ///
    /// # Errors
    ///
    /// Returns an error if `radius` is not finite and positive.
    pub fn circular_state(&self, radius: f64) -> Result<VectorState, KeplerError> {
        self.perihelion_state(radius, 0.0)
    }

    /// Returns the orbital period for semi-major axis `a`, `2π √(a³ / GM)`.
    #[must_use]
    pub fn period(&self, a: f64) -> f64 {
        2.0 * PI * (a.powi(3) / self.gm).sqrt()
    }

    /// Returns the distance from the central mass.
    ///
    /// # Errors
    ///
    /// Returns [`KeplerError::Dimension`] if `state` is not `[x, y, u, v]`.
    pub fn radius(&self, state: &VectorState) -> Result<f64, KeplerError> {
        let [x, y, _, _] = unpack(state)?;
        Ok(x.hypot(y))
    }

    /// Returns the specific orbital energy, `½ (u² + v²) - GM / r`.
    ///
    /// # Errors
    ///
    /// Returns [`KeplerError::Dimension`] if `state` is not `[x, y, u, v]`.
    pub fn energy(&self, state: &VectorState) -> Result<f64, KeplerError> {
        let [x, y, u, v] = unpack(state)?;
        Ok(0.5 * (u * u + v * v) - self.gm / x.hypot(y))
    }

    /// Returns the distance between the first and last positions of a
    /// trajectory.
    ///
    /// After integrating over one period this measures how well the orbit
    /// closes.
    ///
    /// # Errors
    ///
    /// Returns [`KeplerError::Dimension`] if the trajectory does not hold
    /// `[x, y, u, v]` states.
    pub fn displacement(&self, trajectory: &Trajectory) -> Result<f64, KeplerError> {
        let [x0, y0, _, _] = unpack(trajectory.first().1)?;
        let [x1, y1, _, _] = unpack(trajectory.last().1)?;
        Ok((x1 - x0).hypot(y1 - y0))
    }
}

impl OdeProblem for Kepler {
    type Error = KeplerError;

    fn derivative(&self, state: &VectorState) -> Result<VectorState, Self::Error> {
        let [x, y, u, v] = unpack(state)?;

        let r = x.hypot(y);
        let r3 = r * r * r;

        Ok(orbit_state([u, v, -self.gm * x / r3, -self.gm * y / r3]))
    }
}

fn unpack(state: &VectorState) -> Result<[f64; 4], KeplerError> {
    <[f64; 4]>::try_from(state.components()).map_err(|_| KeplerError::Dimension(state.dimension()))
}

fn orbit_state(components: [f64; 4]) -> VectorState {
    // Four components, unwrap is safe
    VectorState::new(components).unwrap()
}

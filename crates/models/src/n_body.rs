use thiserror::Error;

use orrery_core::{OdeProblem, VectorState};

/// Planar gravitational interaction of `N` point masses.
///
/// The state holds all positions followed by all velocities:
/// `[x1, y1, …, xN, yN, u1, v1, …, uN, vN]`, so its dimension is `4N`.
///
/// A small softening length is added to every pairwise distance, which keeps
/// the acceleration finite when two bodies coincide. The default of `1e-30`
/// leaves well-separated dynamics unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct NBody {
    masses: Vec<f64>,
    g: f64,
    softening: f64,
}

/// Errors that can occur when building or evaluating an [`NBody`] system.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum NBodyError {
    #[error("a system needs at least one body")]
    NoBodies,

    #[error("mass of body {index} must be finite and positive, got {mass}")]
    Mass { index: usize, mass: f64 },

    #[error("gravitational constant must be finite and positive, got {0}")]
    Gravity(f64),

    #[error("softening must be finite and non-negative, got {0}")]
    Softening(f64),

    #[error("state has {found} components, expected four per body for {bodies} bodies")]
    Dimension { bodies: usize, found: usize },

    #[error("got {found} {what} for a system of {bodies} bodies")]
    BodyCount {
        what: &'static str,
        bodies: usize,
        found: usize,
    },

    #[error("body {index} does not exist in a system of {bodies} bodies")]
    NoSuchBody { index: usize, bodies: usize },
}

const DEFAULT_SOFTENING: f64 = 1e-30;

impl NBody {
    /// Creates a system of bodies with the given masses and gravitational
    /// constant `g`.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no bodies, any mass is not finite and
    /// positive, or `g` is not finite and positive.
    pub fn new(masses: impl Into<Vec<f64>>, g: f64) -> Result<Self, NBodyError> {
        let masses = masses.into();
        if masses.is_empty() {
            return Err(NBodyError::NoBodies);
        }
        if let Some((index, &mass)) = masses
            .iter()
            .enumerate()
            .find(|(_, m)| !m.is_finite() || **m <= 0.0)
        {
            return Err(NBodyError::Mass { index, mass });
        }
        if !g.is_finite() || g <= 0.0 {
            return Err(NBodyError::Gravity(g));
        }

        Ok(Self {
            masses,
            g,
            softening: DEFAULT_SOFTENING,
        })
    }

    /// Replaces the softening length added to each pairwise distance.
    ///
    /// # Errors
    ///
    /// Returns [`NBodyError::Softening`] if `eps` is negative or not finite.
    pub fn with_softening(self, eps: f64) -> Result<Self, NBodyError> {
        if !eps.is_finite() || eps < 0.0 {
            return Err(NBodyError::Softening(eps));
        }
        Ok(Self {
            softening: eps,
            ..self
        })
    }

    /// Returns the number of bodies.
    #[must_use]
    pub fn bodies(&self) -> usize {
        self.masses.len()
    }

    /// Returns the body masses.
    #[must_use]
    pub fn masses(&self) -> &[f64] {
        &self.masses
    }

    /// Returns the gravitational constant.
    #[must_use]
    pub fn g(&self) -> f64 {
        self.g
    }

    /// Returns the softening length.
    #[must_use]
    pub fn softening(&self) -> f64 {
        self.softening
    }

    /// Returns the dimension of a state for this system, `4N`.
    #[must_use]
    pub fn dimension(&self) -> usize {
        4 * self.bodies()
    }

    #[must_use]
    pub fn total_mass(&self) -> f64 {
        self.masses.iter().sum()
    }

    /// Builds a state from per-body positions and velocities.
    ///
    /// # Errors
    ///
    /// Returns [`NBodyError::BodyCount`] if either slice does not have one
    /// entry per body.
    pub fn pack(
        &self,
        positions: &[[f64; 2]],
        velocities: &[[f64; 2]],
    ) -> Result<VectorState, NBodyError> {
        for (what, found) in [("positions", positions.len()), ("velocities", velocities.len())] {
            if found != self.bodies() {
                return Err(NBodyError::BodyCount {
                    what,
                    bodies: self.bodies(),
                    found,
                });
            }
        }

        let components: Vec<f64> = positions
            .iter()
            .chain(velocities)
            .flat_map(|&[a, b]| [a, b])
            .collect();

        Ok(system_state(components))
    }

    /// Returns the position `[x, y]` of body `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if `state` has the wrong dimension or `index` is out
    /// of range.
    pub fn position(&self, state: &VectorState, index: usize) -> Result<[f64; 2], NBodyError> {
        let (positions, _) = self.split(state)?;
        self.body(positions, index)
    }

    /// Returns the velocity `[u, v]` of body `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if `state` has the wrong dimension or `index` is out
    /// of range.
    pub fn velocity(&self, state: &VectorState, index: usize) -> Result<[f64; 2], NBodyError> {
        let (_, velocities) = self.split(state)?;
        self.body(velocities, index)
    }

    /// Returns the mass-weighted mean position.
    ///
    /// # Errors
    ///
    /// Returns [`NBodyError::Dimension`] if `state` has the wrong dimension.
    pub fn center_of_mass(&self, state: &VectorState) -> Result<[f64; 2], NBodyError> {
        let (positions, _) = self.split(state)?;
        let [mx, my] = self.weighted_sum(positions);
        let total = self.total_mass();
        Ok([mx / total, my / total])
    }

    /// Returns the total linear momentum.
    ///
    /// # Errors
    ///
    /// Returns [`NBodyError::Dimension`] if `state` has the wrong dimension.
    pub fn momentum(&self, state: &VectorState) -> Result<[f64; 2], NBodyError> {
        let (_, velocities) = self.split(state)?;
        Ok(self.weighted_sum(velocities))
    }

    /// Returns the total energy: kinetic plus the potential of every pair,
    /// each pair counted once.
    ///
    /// # Errors
    ///
    /// Returns [`NBodyError::Dimension`] if `state` has the wrong dimension.
    pub fn energy(&self, state: &VectorState) -> Result<f64, NBodyError> {
        let (positions, velocities) = self.split(state)?;

        let kinetic: f64 = self
            .masses
            .iter()
            .zip(velocities.chunks_exact(2))
            .map(|(m, v)| 0.5 * m * (v[0] * v[0] + v[1] * v[1]))
            .sum();

        let mut potential = 0.0;
        for i in 0..self.bodies() {
            for j in 0..i {
                let r = self.distance(positions, i, j);
                potential -= self.g * self.masses[i] * self.masses[j] / r;
            }
        }

        Ok(kinetic + potential)
    }

    fn split<'s>(&self, state: &'s VectorState) -> Result<(&'s [f64], &'s [f64]), NBodyError> {
        if state.dimension() != self.dimension() {
            return Err(NBodyError::Dimension {
                bodies: self.bodies(),
                found: state.dimension(),
            });
        }
        Ok(state.components().split_at(2 * self.bodies()))
    }

    fn body(&self, block: &[f64], index: usize) -> Result<[f64; 2], NBodyError> {
        if index >= self.bodies() {
            return Err(NBodyError::NoSuchBody {
                index,
                bodies: self.bodies(),
            });
        }
        Ok([block[2 * index], block[2 * index + 1]])
    }

    fn weighted_sum(&self, block: &[f64]) -> [f64; 2] {
        self.masses
            .iter()
            .zip(block.chunks_exact(2))
            .fold([0.0, 0.0], |[sx, sy], (m, q)| [sx + m * q[0], sy + m * q[1]])
    }

    /// Softened distance between bodies `i` and `j`.
    fn distance(&self, positions: &[f64], i: usize, j: usize) -> f64 {
        let dx = positions[2 * j] - positions[2 * i];
        let dy = positions[2 * j + 1] - positions[2 * i + 1];
        dx.hypot(dy) + self.softening
    }
}

impl OdeProblem for NBody {
    type Error = NBodyError;

    fn derivative(&self, state: &VectorState) -> Result<VectorState, Self::Error> {
        let (positions, velocities) = self.split(state)?;
        let n = self.bodies();

        let mut accelerations = vec![0.0; 2 * n];
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let r = self.distance(positions, i, j);
                let k = self.g * self.masses[j] / (r * r * r);
                accelerations[2 * i] += k * (positions[2 * j] - positions[2 * i]);
                accelerations[2 * i + 1] += k * (positions[2 * j + 1] - positions[2 * i + 1]);
            }
        }

        let mut components = velocities.to_vec();
        components.extend(accelerations);
        Ok(system_state(components))
    }
}

fn system_state(components: Vec<f64>) -> VectorState {
    // At least one body, so at least four components; unwrap is safe
    VectorState::new(components).unwrap()
}

use std::{
    fmt,
    ops::{Index, Mul},
};

use approx::{AbsDiffEq, RelativeEq};
use thiserror::Error;

/// A point in the phase space of an ODE system.
///
/// A `VectorState` is an ordered, fixed-dimension tuple of real components,
/// for example `[x, y, u, v]` for a single body moving in a plane or `4N`
/// components for `N` bodies. The dimension is fixed at construction and is
/// always at least one.
///
/// States are values: every operation returns a new state and never mutates
/// its operands. Operations that combine two states are fallible and return
/// [`DimensionMismatch`] when the operands have different dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorState(Vec<f64>);

/// Error returned when two states of different dimension are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("dimension mismatch: left operand has {left} components, right has {right}")]
pub struct DimensionMismatch {
    pub left: usize,
    pub right: usize,
}

/// Error returned when constructing a state with no components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("a state must have at least one component")]
pub struct EmptyState;

impl VectorState {
    /// Creates a state from its components.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyState`] if `components` is empty.
    pub fn new(components: impl Into<Vec<f64>>) -> Result<Self, EmptyState> {
        let components = components.into();
        if components.is_empty() {
            return Err(EmptyState);
        }
        Ok(Self(components))
    }

    /// Creates a state of the given dimension with every component zero.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyState`] if `dimension` is zero.
    pub fn zeros(dimension: usize) -> Result<Self, EmptyState> {
        Self::new(vec![0.0; dimension])
    }

    /// Returns the number of components.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.0.len()
    }

    /// Returns the components as a slice.
    #[must_use]
    pub fn components(&self) -> &[f64] {
        &self.0
    }

    /// Returns an iterator over the components.
    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.0.iter()
    }

    /// Consumes the state and returns its components.
    #[must_use]
    pub fn into_vec(self) -> Vec<f64> {
        self.0
    }

    /// Returns `true` if every component is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|c| c.is_finite())
    }

    /// Returns the componentwise sum `self + other`.
    ///
    /// # Errors
    ///
    /// Returns [`DimensionMismatch`] if the dimensions differ.
    pub fn add(&self, other: &Self) -> Result<Self, DimensionMismatch> {
        self.zip_with(other, |a, b| a + b)
    }

    /// Returns the componentwise difference `self - other`.
    ///
    /// # Errors
    ///
    /// Returns [`DimensionMismatch`] if the dimensions differ.
    pub fn subtract(&self, other: &Self) -> Result<Self, DimensionMismatch> {
        self.zip_with(other, |a, b| a - b)
    }

    /// Returns the state with every component multiplied by `k`.
    #[must_use]
    pub fn scale(&self, k: f64) -> Self {
        Self(self.0.iter().map(|c| k * c).collect())
    }

    /// Returns `self + dt * derivative`.
    ///
    /// This is the affine update every explicit Runge-Kutta stage is built
    /// from. It avoids the intermediate allocation of `add(&derivative.scale(dt))`.
    ///
    /// # Errors
    ///
    /// Returns [`DimensionMismatch`] if the dimensions differ.
    pub fn step(&self, derivative: &Self, dt: f64) -> Result<Self, DimensionMismatch> {
        self.zip_with(derivative, |s, d| s + dt * d)
    }

    /// Returns `true` if every component of `other` is within `tol` of the
    /// corresponding component of `self`.
    ///
    /// States of different dimension are never approximately equal.
    #[must_use]
    pub fn approx_eq(&self, other: &Self, tol: f64) -> bool {
        self.abs_diff_eq(other, tol)
    }

    fn zip_with<F>(&self, other: &Self, f: F) -> Result<Self, DimensionMismatch>
    where
        F: Fn(f64, f64) -> f64,
    {
        if self.dimension() != other.dimension() {
            return Err(DimensionMismatch {
                left: self.dimension(),
                right: other.dimension(),
            });
        }

        Ok(Self(
            self.0
                .iter()
                .zip(other.0.iter())
                .map(|(&a, &b)| f(a, b))
                .collect(),
        ))
    }
}

impl TryFrom<Vec<f64>> for VectorState {
    type Error = EmptyState;

    fn try_from(components: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(components)
    }
}

impl Index<usize> for VectorState {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a VectorState {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// Scaling commutes, so both `state * k` and `k * state` are accepted.

impl Mul<f64> for &VectorState {
    type Output = VectorState;

    fn mul(self, k: f64) -> VectorState {
        self.scale(k)
    }
}

impl Mul<f64> for VectorState {
    type Output = VectorState;

    fn mul(self, k: f64) -> VectorState {
        self.scale(k)
    }
}

impl Mul<&VectorState> for f64 {
    type Output = VectorState;

    fn mul(self, state: &VectorState) -> VectorState {
        state.scale(self)
    }
}

impl Mul<VectorState> for f64 {
    type Output = VectorState;

    fn mul(self, state: VectorState) -> VectorState {
        state.scale(self)
    }
}

impl fmt::Display for VectorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{c:10.6}")?;
        }
        Ok(())
    }
}

impl AbsDiffEq for VectorState {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.dimension() == other.dimension()
            && self
                .iter()
                .zip(other.iter())
                .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for VectorState {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.dimension() == other.dimension()
            && self
                .iter()
                .zip(other.iter())
                .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

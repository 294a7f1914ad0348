//! Shared scenarios for the cross-crate tests.

use orrery_core::VectorState;
use orrery_models::NBody;

/// Three equal unit masses on an equilateral triangle of circumradius 1,
/// rotating rigidly about their center of mass (`G = 1`).
///
/// The configuration is a relative equilibrium: in exact arithmetic each body
/// stays on the unit circle and the triangle turns at angular speed
/// [`lagrange_omega`].
#[must_use]
pub fn lagrange_triangle() -> (NBody, VectorState) {
    let system = NBody::new([1.0, 1.0, 1.0], 1.0).unwrap();

    let half_root3 = 3.0_f64.sqrt() / 2.0;
    let w = lagrange_omega();

    let state = system
        .pack(
            &[[0.0, 1.0], [-half_root3, -0.5], [half_root3, -0.5]],
            &[[-w, 0.0], [w / 2.0, -w * half_root3], [w / 2.0, w * half_root3]],
        )
        .unwrap();

    (system, state)
}

/// Angular speed of [`lagrange_triangle`], `ω² = G m / (√3 R³)`.
#[must_use]
pub fn lagrange_omega() -> f64 {
    3.0_f64.powf(-0.25)
}

/// Burrau's three-body problem: masses 150, 200, and 250 released from rest
/// at the corners of a 3-4-5 right triangle (`G = 1`).
#[must_use]
pub fn pythagorean() -> (NBody, VectorState) {
    let system = NBody::new([150.0, 200.0, 250.0], 1.0).unwrap();
    let state = system
        .pack(&[[3.0, 1.0], [-1.0, -2.0], [-1.0, 1.0]], &[[0.0, 0.0]; 3])
        .unwrap();

    (system, state)
}

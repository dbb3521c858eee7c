//! Conserved quantities and two-body orbit helpers.

use std::f64::consts::PI;

use crate::simulation::barnes_hut::MIN_SEPARATION;
use crate::simulation::states::{Body, NVec3};

pub fn kinetic_energy(bodies: &[Body]) -> f64 {
    bodies.iter().map(|b| 0.5 * b.m * b.v.norm_squared()).sum()
}

/// Pairwise Newtonian potential energy. Coincident pairs are skipped, the
/// same way the force walk skips them.
#[allow(non_snake_case)]
pub fn potential_energy(bodies: &[Body], G: f64) -> f64 {
    let mut u = 0.0;
    for (i, bi) in bodies.iter().enumerate() {
        for bj in &bodies[i + 1..] {
            let r = (bj.x - bi.x).norm();
            if r >= MIN_SEPARATION {
                u -= G * bi.m * bj.m / r;
            }
        }
    }
    u
}

#[allow(non_snake_case)]
pub fn total_energy(bodies: &[Body], G: f64) -> f64 {
    kinetic_energy(bodies) + potential_energy(bodies, G)
}

pub fn total_momentum(bodies: &[Body]) -> NVec3 {
    bodies.iter().fold(NVec3::zeros(), |p, b| p + b.v * b.m)
}

/// Speed of a circular orbit of radius `r` around a central mass `m_central`.
#[allow(non_snake_case)]
pub fn circular_speed(G: f64, m_central: f64, r: f64) -> f64 {
    (G * m_central / r).sqrt()
}

/// Kepler period of a circular orbit of radius `r`.
#[allow(non_snake_case)]
pub fn orbital_period(G: f64, m_central: f64, r: f64) -> f64 {
    2.0 * PI * (r * r * r / (G * m_central)).sqrt()
}

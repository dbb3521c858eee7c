//! Core state types for the N-body simulation.
//!
//! - `Body`   one named point mass with position and velocity
//! - `System` the list of bodies plus the current simulation time `t`
//!
//! Body identity is its index in `System::bodies`; the octree refers to
//! bodies by that index and never holds a copy.

use nalgebra::Vector3;
pub type NVec3 = Vector3<f64>;

#[derive(Debug, Clone)]
pub struct Body {
    pub name: String, // identity used in trajectory output
    pub x: NVec3, // position
    pub v: NVec3, // velocity
    pub m: f64, // mass, > 0
}

impl Body {
    pub fn new(name: impl Into<String>, m: f64, x: NVec3, v: NVec3) -> Self {
        Self {
            name: name.into(),
            x,
            v,
            m,
        }
    }
}

#[derive(Debug, Clone)]
pub struct System {
    pub bodies: Vec<Body>, // collection of bodies
    pub t: f64, // time
}

impl System {
    pub fn new(bodies: Vec<Body>) -> Self {
        Self { bodies, t: 0.0 }
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Sum of all body masses.
    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(|b| b.m).sum()
    }

    /// Mass-weighted average position, or zero for a massless system.
    pub fn center_of_mass(&self) -> NVec3 {
        let m = self.total_mass();
        if m <= 0.0 {
            return NVec3::zeros();
        }
        self.bodies
            .iter()
            .fold(NVec3::zeros(), |acc, b| acc + b.x * b.m)
            / m
    }
}

//! Force / acceleration models for the n-body engine
//!
//! Defines the [`ForceModel`] trait the integrator drives, with a
//! Barnes–Hut octree model and an exact direct-sum model used as the
//! accuracy reference

use rayon::prelude::*;

use crate::error::Result;
use crate::simulation::barnes_hut::{Octree, MIN_SEPARATION};
use crate::simulation::states::{Body, NVec3, System};

/// Source of per-body accelerations for a [`System`]
///
/// Implementations only read the system. `out[i]` is overwritten with the
/// acceleration of body `i`; a failed call leaves `out` unspecified
pub trait ForceModel {
    fn accelerations(&mut self, sys: &System, out: &mut [NVec3]) -> Result<()>;
}

/// Newtonian gravity evaluated via a Barnes–Hut octree
///
/// Owns the octree so its node arena is reused from one call to the next.
/// `theta` controls the accuracy / cost tradeoff, `theta = 0` is exact
#[allow(non_snake_case)]
#[derive(Debug, Clone)]
pub struct BarnesHutGravity {
    pub G: f64, // gravitational constant
    pub theta: f64, // opening threshold
    pub parallel: bool, // evaluate bodies on the rayon pool
    tree: Octree,
}

impl BarnesHutGravity {
    #[allow(non_snake_case)]
    pub fn new(G: f64, theta: f64, max_depth: usize) -> Self {
        Self {
            G,
            theta,
            parallel: false,
            tree: Octree::new(max_depth),
        }
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Tree from the most recent call to [`ForceModel::accelerations`]
    pub fn tree(&self) -> &Octree {
        &self.tree
    }

    /// Rebuild the tree over `bodies` and write the net force on each body
    /// into `out`
    pub fn forces(&mut self, bodies: &[Body], out: &mut [NVec3]) -> Result<()> {
        // write phase: must finish before any query
        self.tree.rebuild(bodies)?;

        // read phase
        let tree = &self.tree;
        let (g, theta) = (self.G, self.theta);
        if self.parallel {
            out.par_iter_mut()
                .enumerate()
                .for_each(|(i, f)| *f = tree.force_on(i, bodies, g, theta));
        } else {
            for (i, f) in out.iter_mut().enumerate() {
                *f = tree.force_on(i, bodies, g, theta);
            }
        }
        Ok(())
    }
}

impl ForceModel for BarnesHutGravity {
    fn accelerations(&mut self, sys: &System, out: &mut [NVec3]) -> Result<()> {
        self.forces(&sys.bodies, out)?;
        for (a, b) in out.iter_mut().zip(sys.bodies.iter()) {
            *a /= b.m;
        }
        Ok(())
    }
}

/// Exact Newtonian gravity (direct n^2 sum)
///
/// Pairs closer than [`MIN_SEPARATION`] are skipped, matching the tree walk
#[allow(non_snake_case)]
#[derive(Debug, Clone)]
pub struct DirectGravity {
    pub G: f64,
}

impl DirectGravity {
    /// Net force on every body, written into `out`
    pub fn forces(&self, bodies: &[Body], out: &mut [NVec3]) {
        for f in out.iter_mut() {
            *f = NVec3::zeros();
        }

        let n = bodies.len();
        // each unordered pair (i, j) with i < j once
        for i in 0..n {
            let bi = &bodies[i];
            for j in (i + 1)..n {
                let bj = &bodies[j];

                // r points from i to j: i is pulled along +r, j along -r
                let r = bj.x - bi.x;
                let r_mag = r.norm();
                if r_mag < MIN_SEPARATION {
                    continue;
                }

                let f = r * (self.G * bi.m * bj.m / (r_mag * r_mag * r_mag));
                out[i] += f;
                out[j] -= f;
            }
        }
    }
}

impl ForceModel for DirectGravity {
    fn accelerations(&mut self, sys: &System, out: &mut [NVec3]) -> Result<()> {
        self.forces(&sys.bodies, out);
        for (a, b) in out.iter_mut().zip(sys.bodies.iter()) {
            *a /= b.m;
        }
        Ok(())
    }
}

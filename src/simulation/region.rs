//! Cubic regions of space and the octant arithmetic used by the octree.
//!
//! Octant indices use 3 bits, one per axis:
//!
//! - Bit 0 (value 1): X axis, set when `p.x >= center.x`
//! - Bit 1 (value 2): Y axis, set when `p.y >= center.y`
//! - Bit 2 (value 4): Z axis, set when `p.z >= center.z`
//!
//! A point lying exactly on a splitting plane goes to the positive side.
//! That tie-break is a convention, nothing physical depends on it, but it is
//! kept stable so trajectories stay reproducible.

use crate::error::{Result, SimError};
use crate::simulation::states::{Body, NVec3};

/// Margin applied to the largest extent of the body cloud so no body sits on
/// the root boundary.
pub const BOUNDS_MARGIN: f64 = 1.1;

/// Axis-aligned cube given by its center and edge length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialRegion {
    pub center: NVec3,
    pub size: f64, // edge length
}

impl SpatialRegion {
    pub fn new(center: NVec3, size: f64) -> Self {
        Self { center, size }
    }

    /// Region of the child octant `octant` (0..8) of this region.
    ///
    /// The child has half the edge length and its center is shifted by a
    /// quarter of the parent edge along each axis, toward the side selected by
    /// the octant bit.
    pub fn child(&self, octant: usize) -> SpatialRegion {
        debug_assert!(octant < 8);
        let offset = self.size * 0.25;
        let mut center = self.center;

        for axis in 0..3 {
            if octant & (1 << axis) != 0 {
                center[axis] += offset;
            } else {
                center[axis] -= offset;
            }
        }

        SpatialRegion {
            center,
            size: self.size * 0.5,
        }
    }

    /// Octant of this region that `p` falls into.
    pub fn octant_of(&self, p: &NVec3) -> usize {
        octant(p, &self.center)
    }
}

/// Octant index in `0..8` for point `p` relative to `center`.
pub fn octant(p: &NVec3, center: &NVec3) -> usize {
    let mut idx = 0;

    // bit 0
    if p.x >= center.x {
        idx |= 1;
    }
    // bit 1
    if p.y >= center.y {
        idx |= 2;
    }
    // bit 2
    if p.z >= center.z {
        idx |= 4;
    }

    idx
}

/// Smallest cube (plus [`BOUNDS_MARGIN`]) enclosing every body.
///
/// A single body gives a zero-size region. That is fine: a lone body stays a
/// leaf at the root and the region is never subdivided.
pub fn compute_bounds(bodies: &[Body]) -> Result<SpatialRegion> {
    let first = bodies.first().ok_or(SimError::EmptySystem)?;

    let (min, max) = bodies.iter().skip(1).fold((first.x, first.x), |(min, max), b| {
        (min.inf(&b.x), max.sup(&b.x))
    });

    let center = (min + max) * 0.5;
    let extent = max - min;
    let size = extent.x.max(extent.y).max(extent.z) * BOUNDS_MARGIN;

    Ok(SpatialRegion { center, size })
}

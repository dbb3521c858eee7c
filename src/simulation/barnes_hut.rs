//! # Barnes–Hut Octree (3D)
//!
//! This module implements a **3D Barnes–Hut octree** for approximating
//! gravitational forces in an `N`-body system. It replaces the naive `O(N²)`
//! all-pairs sum with an approximate `O(N log N)` walk that keeps good accuracy
//! for distant interactions.
//!
//! ## Core Concepts
//!
//! A group of distant bodies is treated as a single pseudo-body located at
//! its center of mass. For a far enough cluster, one interaction replaces many.
//!
//! - The simulation space is recursively subdivided into 8 octants.
//! - Each region becomes a node of the octree.
//! - A leaf holds at most one body; a second arrival subdivides it.
//! - Each node stores:
//!   - its cubic [`SpatialRegion`]
//!   - total mass of its subtree
//!   - center of mass (COM) of its subtree
//!
//! ## Lifecycle
//!
//! Every timestep runs the same three phases on one [`Octree`]:
//!
//! 1. [`Octree::rebuild`] resets the node arena, computes bounds and inserts
//!    every body (write phase).
//! 2. The same call summarizes mass and COM bottom-up (write phase).
//! 3. [`Octree::force_on`] is queried once per body (read-only phase; the tree
//!    is `Sync`, so queries may run in parallel).
//!
//! Nodes live in a flat `Vec` and refer to their children by index, so the
//! arena is cleared and reused between steps instead of reallocated.

use crate::error::{Result, SimError};
use crate::simulation::region::{compute_bounds, SpatialRegion};
use crate::simulation::states::{Body, NVec3};

/// Default recursion limit for insertion, summarization and force walks.
pub const DEFAULT_MAX_DEPTH: usize = 40;

/// Default multipole acceptance threshold.
pub const DEFAULT_THETA: f64 = 0.5;

/// Separations below this are treated as coincident and contribute nothing.
pub const MIN_SEPARATION: f64 = 1e-10;

/// A single octree node.
///
/// A node is in one of three states:
/// - empty leaf: no body, no children
/// - body leaf: `body = Some(i)`, no children
/// - internal: `body = None`, at least one child
///
/// `total_mass` and `com` are only meaningful after summarization.
#[derive(Debug, Clone)]
pub struct OctreeNode {
    pub region: SpatialRegion,
    pub body: Option<usize>,          // Some(i) if this leaf holds body i
    pub total_mass: f64,
    pub com: NVec3,
    pub children: [Option<usize>; 8], // indices into Octree::nodes
}

impl OctreeNode {
    fn empty(region: SpatialRegion) -> Self {
        Self {
            region,
            body: None,
            total_mass: 0.0,
            com: NVec3::zeros(),
            children: [None; 8],
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.iter().all(|c| c.is_none())
    }
}

/// Shape statistics of a built tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TreeStats {
    pub nodes: usize,
    pub occupied_leaves: usize,
    pub depth: usize,
}

/// Arena-backed Barnes–Hut octree over a slice of bodies.
#[derive(Debug, Clone)]
pub struct Octree {
    nodes: Vec<OctreeNode>,
    max_depth: usize,
}

impl Default for Octree {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl Octree {
    pub const ROOT: usize = 0;

    /// An empty tree with the given depth limit. Call [`Octree::rebuild`]
    /// before querying it.
    pub fn new(max_depth: usize) -> Self {
        Self {
            nodes: Vec::new(),
            max_depth,
        }
    }

    /// Build and summarize a fresh tree over `bodies`.
    pub fn build(bodies: &[Body], max_depth: usize) -> Result<Self> {
        let mut tree = Self::new(max_depth);
        tree.rebuild(bodies)?;
        Ok(tree)
    }

    /// Discard the current contents and rebuild over `bodies`.
    ///
    /// 1. Computes the enclosing cube of all bodies.
    /// 2. Creates a root node covering that cube.
    /// 3. Inserts each body, subdividing as needed.
    /// 4. Computes total mass and COM for every node (bottom-up).
    ///
    /// Fails with [`SimError::EmptySystem`] for no bodies and with
    /// [`SimError::DepthExceeded`] when insertion or summarization recurses
    /// past `max_depth`. After a failure the tree contents are unspecified and
    /// must not be queried.
    pub fn rebuild(&mut self, bodies: &[Body]) -> Result<()> {
        let bounds = compute_bounds(bodies)?;

        // keep the allocation, drop the nodes
        self.nodes.clear();
        self.nodes.push(OctreeNode::empty(bounds));

        for i in 0..bodies.len() {
            self.insert(Self::ROOT, i, bodies, 0)?;
        }

        self.summarize(Self::ROOT, bodies, 0)
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn nodes(&self) -> &[OctreeNode] {
        &self.nodes
    }

    pub fn node(&self, idx: usize) -> &OctreeNode {
        &self.nodes[idx]
    }

    /// Root node, or `None` if the tree was never built.
    pub fn root(&self) -> Option<&OctreeNode> {
        self.nodes.get(Self::ROOT)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Net gravitational force on body `target` (not acceleration).
    ///
    /// Walks the tree from the root:
    /// - leaves are evaluated exactly,
    /// - an internal node whose `size / distance < theta` is treated as one
    ///   point mass at its COM,
    /// - anything closer is opened and its children visited.
    ///
    /// `theta = 0` never accepts an internal node, which reduces to the exact
    /// pairwise sum.
    #[allow(non_snake_case)]
    pub fn force_on(&self, target: usize, bodies: &[Body], G: f64, theta: f64) -> NVec3 {
        if self.nodes.is_empty() {
            return NVec3::zeros();
        }
        self.force_from_node(Self::ROOT, target, bodies, G, theta, 0)
    }

    /// Node count, occupied leaf count and depth of the deepest node.
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();
        if !self.nodes.is_empty() {
            self.collect_stats(Self::ROOT, 0, &mut stats);
        }
        stats
    }

    // helpers ==============================================================================

    /// Insert body `body_idx` below `node_idx`, which sits at `depth`.
    ///
    /// - empty leaf: store the body here.
    /// - body leaf: move the resident body into a fresh set of 8 children one
    ///   level down, then fall through to the internal case.
    /// - internal: descend into the child octant holding the body's position,
    ///   creating that child if it is missing.
    fn insert(&mut self, node_idx: usize, body_idx: usize, bodies: &[Body], depth: usize) -> Result<()> {
        if depth > self.max_depth {
            return Err(SimError::DepthExceeded {
                depth,
                max_depth: self.max_depth,
            });
        }

        // Snapshot by value so no &mut node is held across the recursion
        let region = self.nodes[node_idx].region;
        let resident = self.nodes[node_idx].body;
        let is_leaf = self.nodes[node_idx].is_leaf();

        // Case 1: empty leaf
        if resident.is_none() && is_leaf {
            self.nodes[node_idx].body = Some(body_idx);
            return Ok(());
        }

        // Case 2: occupied leaf -> subdivide and push the resident down
        if let Some(existing) = resident {
            self.nodes[node_idx].body = None;
            self.subdivide(node_idx, region);

            let octant = region.octant_of(&bodies[existing].x);
            let child = self.child_or_create(node_idx, octant);
            self.insert(child, existing, bodies, depth + 1)?;
        }

        // Case 3: internal
        let octant = region.octant_of(&bodies[body_idx].x);
        let child = self.child_or_create(node_idx, octant);
        self.insert(child, body_idx, bodies, depth + 1)
    }

    /// Give `node_idx` all 8 (empty) children.
    fn subdivide(&mut self, node_idx: usize, region: SpatialRegion) {
        for octant in 0..8 {
            let new_idx = self.nodes.len();
            self.nodes.push(OctreeNode::empty(region.child(octant)));
            self.nodes[node_idx].children[octant] = Some(new_idx);
        }
    }

    fn child_or_create(&mut self, node_idx: usize, octant: usize) -> usize {
        match self.nodes[node_idx].children[octant] {
            Some(idx) => idx,
            None => {
                let region = self.nodes[node_idx].region.child(octant);
                let new_idx = self.nodes.len();
                self.nodes.push(OctreeNode::empty(region));
                self.nodes[node_idx].children[octant] = Some(new_idx);
                new_idx
            }
        }
    }

    /// Post-order pass filling `total_mass` and `com`.
    ///
    /// - body leaf: the body's mass and position
    /// - empty leaf: zero mass at the zero vector
    /// - internal: sum of child masses, COM weighted by child mass; an internal
    ///   node with zero summed mass keeps a zero COM
    fn summarize(&mut self, node_idx: usize, bodies: &[Body], depth: usize) -> Result<()> {
        if depth > self.max_depth {
            return Err(SimError::DepthExceeded {
                depth,
                max_depth: self.max_depth,
            });
        }

        if let Some(bidx) = self.nodes[node_idx].body {
            let b = &bodies[bidx];
            let node = &mut self.nodes[node_idx];
            node.total_mass = b.m;
            node.com = b.x;
            return Ok(());
        }

        let children = self.nodes[node_idx].children; // [Option<usize>; 8] is Copy
        let mut mass = 0.0;
        let mut weighted = NVec3::zeros();

        for &child_idx in children.iter().flatten() {
            self.summarize(child_idx, bodies, depth + 1)?;
            let child = &self.nodes[child_idx];
            mass += child.total_mass;
            weighted += child.com * child.total_mass;
        }

        let node = &mut self.nodes[node_idx];
        node.total_mass = mass;
        node.com = if mass > 0.0 { weighted / mass } else { NVec3::zeros() };
        Ok(())
    }

    /// Force on `target` due to the subtree at `node_idx`.
    ///
    /// Past `max_depth` this returns zero instead of failing: the walk is
    /// read-only and a truncated estimate is acceptable here.
    #[allow(non_snake_case)]
    fn force_from_node(&self, node_idx: usize, target: usize, bodies: &[Body], G: f64, theta: f64, depth: usize) -> NVec3 {
        if depth > self.max_depth {
            return NVec3::zeros();
        }

        let node = &self.nodes[node_idx];

        // Empty subtree
        if node.total_mass == 0.0 {
            return NVec3::zeros();
        }

        // No self-interaction
        if node.body == Some(target) {
            return NVec3::zeros();
        }

        let b = &bodies[target];
        let r = node.com - b.x;
        let r_mag = r.norm();
        if r_mag < MIN_SEPARATION {
            return NVec3::zeros();
        }

        if node.body.is_some() || node.region.size / r_mag < theta {
            return r * (G * node.total_mass * b.m / (r_mag * r_mag * r_mag));
        }

        node.children
            .iter()
            .flatten()
            .fold(NVec3::zeros(), |acc, &child| {
                acc + self.force_from_node(child, target, bodies, G, theta, depth + 1)
            })
    }

    fn collect_stats(&self, node_idx: usize, depth: usize, stats: &mut TreeStats) {
        let node = &self.nodes[node_idx];
        stats.nodes += 1;
        stats.depth = stats.depth.max(depth);
        if node.body.is_some() {
            stats.occupied_leaves += 1;
        }
        for &child in node.children.iter().flatten() {
            self.collect_stats(child, depth + 1, stats);
        }
    }
}

//! High-level runtime engine settings
//!
//! Selects the integrator, the force model and the Barnes–Hut options
//! used when building and running a `Scenario`

use crate::configuration::config::IntegratorConfig;
use crate::simulation::barnes_hut::{DEFAULT_MAX_DEPTH, DEFAULT_THETA};

#[derive(Debug, Clone)]
pub struct Engine {
    pub integrator: IntegratorConfig, // leapfrog or verlet
    pub barnes_hut: bool, // false = direct, true = barnes-hut
    pub theta: f64, // parameter to determine if use center of mass
    pub max_depth: usize, // tree depth limit
    pub parallel: bool, // parallel force queries
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            integrator: IntegratorConfig::Leapfrog,
            barnes_hut: true,
            theta: DEFAULT_THETA,
            max_depth: DEFAULT_MAX_DEPTH,
            parallel: false,
        }
    }
}

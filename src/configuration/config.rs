//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – integrator, force model and Barnes–Hut options
//! - [`ParametersConfig`] – step size, end time and gravitational constant
//! - [`BodyConfig`]       – initial state for each body
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! An example scenario matching these types:
//!
//! ```yaml
//! engine:
//!   integrator: "leapfrog"  # or "verlet"
//!   barnes_hut: true        # false -> exact pairwise forces
//!   theta: 0.5
//!   max_depth: 40
//!   parallel: false
//!
//! parameters:
//!   t_end: 10000.0          # total simulation time
//!   dt: 1.0                 # fixed step size
//!   G: 2.95912208286e-4     # AU^3 / (solar mass * day^2)
//!
//! bodies:
//!   - name: "Sun"
//!     m: 1.00000597682
//!     x: [0.0, 0.0, 0.0]
//!     v: [0.0, 0.0, 0.0]
//!   - name: "Jupiter"
//!     m: 0.000954786104043
//!     x: [-3.5023653, -3.8169847, -1.5507963]
//!     v: [0.00565429, -0.0041249, -0.00190589]
//! ```
//!
//! Everything under `engine` and `parameters.dt` may be omitted.
//! [`crate::Scenario::build_scenario`] validates the values and maps them onto
//! the runtime types.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::simulation::barnes_hut::{DEFAULT_MAX_DEPTH, DEFAULT_THETA};
use crate::simulation::params::DEFAULT_DT;

/// Which integrator method used by the engine
/// `integrator: "leapfrog"` or `integrator: "verlet"`
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntegratorConfig {
    #[default]
    #[serde(rename = "leapfrog")] // kick-drift-kick, both half kicks use the start-of-step acceleration
    Leapfrog,

    #[serde(rename = "verlet")] // velocity Verlet, second half kick uses the acceleration at the new positions
    Verlet,
}

/// High-level engine configuration
#[derive(Deserialize, Debug, Clone)]
pub struct EngineConfig {
    #[serde(default)]
    pub integrator: IntegratorConfig, // Time integrator used for advancing the system state
    #[serde(default = "default_barnes_hut")]
    pub barnes_hut: bool, // `true` - octree approximation, `false` - direct N^2 summation
    pub theta: Option<f64>, // Opening threshold: a node is taken as its com when size / distance < theta
    pub max_depth: Option<usize>, // Depth limit for tree construction
    #[serde(default)]
    pub parallel: bool, // Evaluate per-body forces on the rayon pool
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            integrator: IntegratorConfig::default(),
            barnes_hut: true,
            theta: None,
            max_depth: None,
            parallel: false,
        }
    }
}

impl EngineConfig {
    pub fn theta_or_default(&self) -> f64 {
        self.theta.unwrap_or(DEFAULT_THETA)
    }

    pub fn max_depth_or_default(&self) -> usize {
        self.max_depth.unwrap_or(DEFAULT_MAX_DEPTH)
    }
}

fn default_barnes_hut() -> bool {
    true
}

fn default_dt() -> f64 {
    DEFAULT_DT
}

/// Global numerical and physical parameters for a scenario
#[allow(non_snake_case)]
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub t_end: f64, // time end
    #[serde(default = "default_dt")]
    pub dt: f64,    // time step size
    pub G: f64,     // gravitational constant
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub name: String, // Label carried into the trajectory output
    pub m: f64,       // Mass of the body
    pub x: [f64; 3],  // Initial position in simulation units
    pub v: [f64; 3],  // Initial velocity in simulation units per time unit
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig, // Engine-level configuration
    pub parameters: ParametersConfig, // Global numerical and physical parameters
    pub bodies: Vec<BodyConfig>, // Bodies that define the initial state of the system
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(s)
    }

    pub fn from_yaml_file(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Ok(serde_yaml::from_reader(reader)?)
    }
}

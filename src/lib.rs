pub mod error;
pub mod simulation;
pub mod configuration;

pub use error::{Result, SimError};

pub use simulation::states::{Body, System, NVec3};
pub use simulation::params::Parameters;
pub use simulation::engine::Engine;
pub use simulation::region::{SpatialRegion, compute_bounds, octant};
pub use simulation::barnes_hut::{Octree, OctreeNode, TreeStats, DEFAULT_MAX_DEPTH, DEFAULT_THETA};
pub use simulation::forces::{ForceModel, BarnesHutGravity, DirectGravity};
pub use simulation::integrator::{leapfrog_step, verlet_step, run};
pub use simulation::trajectory::{TrajectorySink, TrajectoryRecord, CsvSink};
pub use simulation::scenario::Scenario;

pub use configuration::config::{IntegratorConfig, EngineConfig, ParametersConfig, BodyConfig, ScenarioConfig};

//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a runtime bundle
//! (`Scenario`) containing:
//! - engine settings (`Engine`)
//! - numerical parameters (`Parameters`)
//! - system state (`System` with bodies at t = 0)
//!
//! Values are validated here so the integrator can assume positive masses,
//! finite coordinates and a positive step size.

use crate::configuration::config::{BodyConfig, ScenarioConfig};
use crate::error::{Result, SimError};
use crate::simulation::engine::Engine;
use crate::simulation::forces::{BarnesHutGravity, DirectGravity, ForceModel};
use crate::simulation::integrator;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec3, System};
use crate::simulation::trajectory::TrajectorySink;

/// A fully-initialized simulation: settings plus the system at t = 0
#[derive(Debug, Clone)]
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub system: System,
}

impl Scenario {
    /// Assemble a scenario from runtime parts, checking them the same way
    /// [`Scenario::build_scenario`] checks a config
    pub fn new(engine: Engine, parameters: Parameters, system: System) -> Result<Self> {
        validate_engine(&engine)?;
        validate_parameters(&parameters)?;
        if system.is_empty() {
            return Err(SimError::EmptySystem);
        }
        for b in &system.bodies {
            validate_body(b)?;
        }
        Ok(Self {
            engine,
            parameters,
            system,
        })
    }

    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self> {
        // Bodies: map `BodyConfig` -> runtime `Body` using nalgebra vectors
        let bodies: Vec<Body> = cfg.bodies.iter().map(|bc: &BodyConfig| Body {
            name: bc.name.clone(),
            x: NVec3::from(bc.x),
            v: NVec3::from(bc.v),
            m: bc.m,
        }).collect();

        let system = System::new(bodies);

        let parameters = Parameters {
            t_end: cfg.parameters.t_end,
            dt: cfg.parameters.dt,
            G: cfg.parameters.G,
        };

        let engine = Engine {
            integrator: cfg.engine.integrator,
            barnes_hut: cfg.engine.barnes_hut,
            theta: cfg.engine.theta_or_default(),
            max_depth: cfg.engine.max_depth_or_default(),
            parallel: cfg.engine.parallel,
        };

        Self::new(engine, parameters, system)
    }

    /// Force model selected by the engine settings
    pub fn force_model(&self) -> Box<dyn ForceModel + Send> {
        if self.engine.barnes_hut {
            Box::new(
                BarnesHutGravity::new(self.parameters.G, self.engine.theta, self.engine.max_depth)
                    .parallel(self.engine.parallel),
            )
        } else {
            Box::new(DirectGravity { G: self.parameters.G })
        }
    }

    /// Integrate the system to `t_end`, streaming every step into `sink`.
    /// Returns the number of steps taken
    pub fn run<S>(&mut self, sink: &mut S) -> Result<usize>
    where
        S: TrajectorySink + ?Sized,
    {
        let mut forces = self.force_model();
        integrator::run(
            &mut self.system,
            forces.as_mut(),
            &self.parameters,
            self.engine.integrator,
            sink,
        )
    }
}

fn validate_body(b: &Body) -> Result<()> {
    let invalid = |reason: &str| SimError::InvalidBody {
        name: b.name.clone(),
        reason: reason.to_string(),
    };

    if !(b.m.is_finite() && b.m > 0.0) {
        return Err(invalid("mass must be positive and finite"));
    }
    if !b.x.iter().all(|c| c.is_finite()) {
        return Err(invalid("position must be finite"));
    }
    if !b.v.iter().all(|c| c.is_finite()) {
        return Err(invalid("velocity must be finite"));
    }
    Ok(())
}

fn validate_parameters(p: &Parameters) -> Result<()> {
    if !(p.dt.is_finite() && p.dt > 0.0) {
        return Err(SimError::InvalidParameter(format!("dt must be positive, got {}", p.dt)));
    }
    if !(p.t_end.is_finite() && p.t_end >= 0.0) {
        return Err(SimError::InvalidParameter(format!("t_end must be non-negative, got {}", p.t_end)));
    }
    if !p.G.is_finite() {
        return Err(SimError::InvalidParameter(format!("G must be finite, got {}", p.G)));
    }
    Ok(())
}

fn validate_engine(e: &Engine) -> Result<()> {
    if !(e.theta.is_finite() && e.theta >= 0.0) {
        return Err(SimError::InvalidParameter(format!("theta must be non-negative, got {}", e.theta)));
    }
    Ok(())
}

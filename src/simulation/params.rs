//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - integration step size and end time,
//! - gravitational constant `G`

/// Default fixed step size
pub const DEFAULT_DT: f64 = 1.0;

#[allow(non_snake_case)]
#[derive(Debug, Clone)]
pub struct Parameters {
    pub t_end: f64, // time end
    pub dt: f64, // step size
    pub G: f64, // gravitational constant
}

impl Parameters {
    #[allow(non_snake_case)]
    pub fn new(G: f64, t_end: f64) -> Self {
        Self {
            t_end,
            dt: DEFAULT_DT,
            G,
        }
    }

    pub fn with_dt(mut self, dt: f64) -> Self {
        self.dt = dt;
        self
    }

    /// Number of whole steps that fit in `t_end`
    pub fn num_steps(&self) -> usize {
        if self.dt <= 0.0 || self.t_end <= 0.0 {
            return 0;
        }
        (self.t_end / self.dt).floor() as usize
    }
}

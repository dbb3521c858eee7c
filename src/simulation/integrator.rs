//! Fixed-step time integrators for the N-body system
//!
//! Both steppers read accelerations from a [`ForceModel`] into a buffer first
//! and only then mutate bodies, so every force query of a step sees the
//! pre-update positions. [`run`] drives either stepper for
//! `floor(t_end / dt)` steps and feeds each step to a [`TrajectorySink`].

use crate::configuration::config::IntegratorConfig;
use crate::error::{Result, SimError};
use crate::simulation::forces::ForceModel;
use crate::simulation::params::Parameters;
use crate::simulation::states::{NVec3, System};
use crate::simulation::trajectory::TrajectorySink;

/// Advance the system by one step with the single-evaluation leapfrog.
///
/// One acceleration `a_n` from the current positions is used for both half
/// kicks:
///
/// - `v += dt/2 * a_n`
/// - `x += dt * v`
/// - `v += dt/2 * a_n`
///
/// `acc` is scratch space of length `sys.bodies.len()`.
pub fn leapfrog_step<F>(sys: &mut System, forces: &mut F, dt: f64, acc: &mut [NVec3]) -> Result<()>
where
    F: ForceModel + ?Sized,
{
    let half_dt = 0.5 * dt; // half step dt/2

    // a_n from x_n
    forces.accelerations(&*sys, acc)?;

    // Kick: v_n+1/2 = v_n + (1/2 * dt) * a_n
    for (b, a) in sys.bodies.iter_mut().zip(acc.iter()) {
        b.v += half_dt * *a;
    }

    // Drift: x_n+1 = x_n + dt * v_n+1/2
    for b in sys.bodies.iter_mut() {
        b.x += dt * b.v;
    }

    // Second kick with the same a_n
    for (b, a) in sys.bodies.iter_mut().zip(acc.iter()) {
        b.v += half_dt * *a;
    }

    sys.t += dt;
    Ok(())
}

/// Advance the system by one step using velocity Verlet.
///
/// On entry `acc` must hold the accelerations at the current positions; on
/// exit it holds the accelerations at the new positions, ready for the next
/// step. That keeps it at one force evaluation (one tree build) per step.
///
/// If the force evaluation fails, bodies, time and `acc` are restored to
/// their state on entry before the error is returned.
pub fn verlet_step<F>(sys: &mut System, forces: &mut F, dt: f64, acc: &mut [NVec3]) -> Result<()>
where
    F: ForceModel + ?Sized,
{
    let half_dt = 0.5 * dt;

    // the force evaluation needs the drifted positions in place; keep x_n, v_n, a_n to roll back
    let start: Vec<(NVec3, NVec3)> = sys.bodies.iter().map(|b| (b.x, b.v)).collect();
    let a_start = acc.to_vec();

    // Kick: v_n+1/2 = v_n + (1/2 * dt) * a_n
    for (b, a) in sys.bodies.iter_mut().zip(acc.iter()) {
        b.v += half_dt * *a;
    }

    // Drift: x_n+1 = x_n + dt * v_n+1/2
    for b in sys.bodies.iter_mut() {
        b.x += dt * b.v;
    }

    // a_n+1 from x_n+1
    if let Err(e) = forces.accelerations(&*sys, acc) {
        for (b, (x, v)) in sys.bodies.iter_mut().zip(start) {
            b.x = x;
            b.v = v;
        }
        acc.copy_from_slice(&a_start);
        return Err(e);
    }

    // Second kick: v_n+1 = v_n+1/2 + (dt/2) * a_n+1
    for (b, a) in sys.bodies.iter_mut().zip(acc.iter()) {
        b.v += half_dt * *a;
    }

    sys.t += dt;
    Ok(())
}

/// Integrate `sys` from its current time for `params.num_steps()` steps.
///
/// After step `k` (counting from 0) the sink receives the post-step bodies
/// labelled `t0 + (k + 1) * dt`, where `t0` is `sys.t` on entry. The label is
/// computed from the step index, not accumulated, so it does not drift and
/// the last step lands on `t0 + steps * dt`; `sys.t` is set to the same value.
///
/// A failing step (depth overflow) aborts the run with that error and leaves
/// `sys` at the last completed step.
///
/// Returns the number of completed steps.
pub fn run<F, S>(
    sys: &mut System,
    forces: &mut F,
    params: &Parameters,
    integrator: IntegratorConfig,
    sink: &mut S,
) -> Result<usize>
where
    F: ForceModel + ?Sized,
    S: TrajectorySink + ?Sized,
{
    if sys.is_empty() {
        return Err(SimError::EmptySystem);
    }
    if params.dt <= 0.0 || !params.dt.is_finite() {
        return Err(SimError::InvalidParameter(format!("dt must be positive, got {}", params.dt)));
    }

    let steps = params.num_steps();
    let mut acc = vec![NVec3::zeros(); sys.bodies.len()];

    if integrator == IntegratorConfig::Verlet {
        forces.accelerations(&*sys, &mut acc)?;
    }

    let t0 = sys.t;
    for k in 0..steps {
        match integrator {
            IntegratorConfig::Leapfrog => leapfrog_step(sys, forces, params.dt, &mut acc)?,
            IntegratorConfig::Verlet => verlet_step(sys, forces, params.dt, &mut acc)?,
        }
        sys.t = t0 + (k + 1) as f64 * params.dt;
        sink.record(sys.t, &sys.bodies)?;
    }

    sink.finish()?;
    Ok(steps)
}

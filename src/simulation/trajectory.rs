//! Trajectory output
//!
//! The integrator hands every completed step to a [`TrajectorySink`]. Sinks
//! decide what to keep: the in-memory `Vec<TrajectoryRecord>` keeps every
//! (body, step) pair, [`CsvSink`] streams `time,body,x,y,z` rows, and `()`
//! discards everything.

use std::io::Write;

use crate::error::Result;
use crate::simulation::states::Body;

/// Position of one body at one simulated time.
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryRecord {
    pub time: f64,
    pub body: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl TrajectoryRecord {
    pub fn new(time: f64, body: &Body) -> Self {
        Self {
            time,
            body: body.name.clone(),
            x: body.x.x,
            y: body.x.y,
            z: body.x.z,
        }
    }
}

pub trait TrajectorySink {
    /// Called once per completed step with the post-step state.
    fn record(&mut self, time: f64, bodies: &[Body]) -> Result<()>;

    /// Called once after the last step.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

impl TrajectorySink for () {
    fn record(&mut self, _time: f64, _bodies: &[Body]) -> Result<()> {
        Ok(())
    }
}

impl TrajectorySink for Vec<TrajectoryRecord> {
    fn record(&mut self, time: f64, bodies: &[Body]) -> Result<()> {
        self.extend(bodies.iter().map(|b| TrajectoryRecord::new(time, b)));
        Ok(())
    }
}

/// Streams trajectory rows as CSV, writing every `every`-th step.
pub struct CsvSink<W: Write> {
    out: W,
    every: usize,
    steps_seen: usize,
    header_written: bool,
}

impl<W: Write> CsvSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            every: 1,
            steps_seen: 0,
            header_written: false,
        }
    }

    /// Keep one step in `every` (0 is treated as 1).
    pub fn every(mut self, every: usize) -> Self {
        self.every = every.max(1);
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TrajectorySink for CsvSink<W> {
    fn record(&mut self, time: f64, bodies: &[Body]) -> Result<()> {
        let keep = self.steps_seen % self.every == 0;
        self.steps_seen += 1;
        if !keep {
            return Ok(());
        }

        if !self.header_written {
            writeln!(self.out, "time,body,x,y,z")?;
            self.header_written = true;
        }
        for b in bodies {
            writeln!(self.out, "{},{},{},{},{}", time, b.name, b.x.x, b.x.y, b.x.z)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

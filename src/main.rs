use bhgrav::simulation::diagnostics::total_energy;
use bhgrav::{CsvSink, Scenario, ScenarioConfig};

use anyhow::{Context, Result};
use clap::Parser;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file; looked up under `scenarios/` unless the path exists as given
    #[arg(short, long, default_value = "sun_jupiter.yaml")]
    file_name: String,

    /// CSV trajectory output (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Override the scenario's opening threshold
    #[arg(long)]
    theta: Option<f64>,

    /// Write one step out of every N
    #[arg(long, default_value_t = 1)]
    every: usize,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let given = PathBuf::from(file_name);
    let config_path = if given.exists() {
        given
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
    };

    ScenarioConfig::from_yaml_file(&config_path)
        .with_context(|| format!("failed to load scenario {}", config_path.display()))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    if let Some(theta) = args.theta {
        scenario_cfg.engine.theta = Some(theta);
    }

    let mut scenario = Scenario::build_scenario(scenario_cfg)?;

    let out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("cannot create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    let mut sink = CsvSink::new(out).every(args.every);

    let g = scenario.parameters.G;
    let e0 = total_energy(&scenario.system.bodies, g);

    eprintln!(
        "bhgrav: {} bodies, {} steps of dt = {}, theta = {}, {:?}{}",
        scenario.system.len(),
        scenario.parameters.num_steps(),
        scenario.parameters.dt,
        scenario.engine.theta,
        scenario.engine.integrator,
        if scenario.engine.barnes_hut { "" } else { " (direct)" },
    );

    let t0 = Instant::now();
    let steps = scenario.run(&mut sink)?;
    let elapsed = t0.elapsed().as_secs_f64();

    let e1 = total_energy(&scenario.system.bodies, g);
    let drift = if e0 != 0.0 { (e1 - e0) / e0.abs() } else { e1 - e0 };

    eprintln!("bhgrav: {steps} steps in {elapsed:.3} s, t = {}, relative energy drift = {drift:.3e}", scenario.system.t);

    Ok(())
}

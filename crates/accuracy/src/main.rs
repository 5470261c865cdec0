#![deny(clippy::all, clippy::pedantic)]

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use accuracy::{inertia_ratio_sphere_stack, RunRecord, SphereStackConfig};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use physics::SolverKind;
use tracing_subscriber::EnvFilter;

/// Predefined sets of runs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Suite {
    /// Every solver over the full top-sphere mass sweep.
    MassSweep,
    /// Every solver with dt 3e-4 under gravity -100.
    HighGravity,
}

#[derive(Parser, Debug)]
#[command(name = "sphere_stack")]
#[command(about = "Momentum and energy accuracy of a five-sphere stack")]
#[command(version)]
struct Cli {
    /// Contact solver (sequential or direct)
    #[arg(long, default_value = "sequential")]
    solver: SolverKind,

    /// Solver iterations per step
    #[arg(long, default_value_t = 50)]
    iterations: u32,

    /// Time step in seconds
    #[arg(long, default_value_t = 0.001)]
    dt: f64,

    /// Top-sphere masses, comma separated
    #[arg(long, value_delimiter = ',', default_value = "1.0")]
    mass: Vec<f64>,

    /// z component of gravity
    #[arg(long, default_value_t = -1.0, allow_negative_numbers = true)]
    gravity: f64,

    /// z force applied to the top sphere every step
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    force: f64,

    /// Solver convergence tolerance
    #[arg(long, default_value_t = 0.0)]
    tolerance: f64,

    /// Simulated seconds per run
    #[arg(long, default_value_t = 10.0)]
    duration: f64,

    /// Run a predefined suite instead of the individual settings above
    /// (`--duration` still applies)
    #[arg(long, value_enum)]
    suite: Option<Suite>,

    /// Write the JSON report here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl Cli {
    fn configs(&self) -> Vec<SphereStackConfig> {
        let duration = self.duration;
        match self.suite {
            Some(Suite::MassSweep) => SolverKind::ALL
                .into_iter()
                .flat_map(|solver| {
                    SphereStackConfig {
                        solver,
                        duration,
                        ..SphereStackConfig::default()
                    }
                    .mass_sweep()
                })
                .collect(),
            Some(Suite::HighGravity) => SolverKind::ALL
                .into_iter()
                .map(|solver| SphereStackConfig {
                    duration,
                    ..SphereStackConfig::high_gravity(solver)
                })
                .collect(),
            None => self
                .mass
                .iter()
                .map(|&mass| SphereStackConfig {
                    solver: self.solver,
                    iterations: self.iterations,
                    dt: self.dt,
                    mass,
                    gravity: self.gravity,
                    force: self.force,
                    tolerance: self.tolerance,
                    duration,
                })
                .collect(),
        }
    }
}

fn run(config: &SphereStackConfig) -> Result<RunRecord> {
    tracing::info!(
        "{}, dt: {}, iters: {}, mass: {}, gravity: {}, force: {}, tolerance: {}",
        config.solver,
        config.dt,
        config.iterations,
        config.mass,
        config.gravity,
        config.force,
        config.tolerance
    );
    let mut record = RunRecord::new();
    config.record_properties(&mut record);
    inertia_ratio_sphere_stack(config, &mut record)
        .with_context(|| format!("{} run with mass {} failed", config.solver, config.mass))?;
    Ok(record)
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let configs = cli.configs();
    let records = configs.iter().map(run).collect::<Result<Vec<_>>>()?;

    let json = match records.as_slice() {
        [single] => serde_json::to_string_pretty(single),
        all => serde_json::to_string_pretty(all),
    };
    let json = json.context("Failed to serialize report")?;

    match &cli.output {
        Some(path) => {
            fs::write(path, json)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            tracing::info!("Report written to {}", path.display());
        }
        None => {
            writeln!(io::stdout(), "{json}").context("Failed to write report to stdout")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_single_config() {
        let cli = Cli::try_parse_from(["sphere_stack"]).unwrap();
        assert_eq!(cli.configs(), vec![SphereStackConfig::default()]);
    }

    #[test]
    fn mass_list_and_negative_force() {
        let cli = Cli::try_parse_from([
            "sphere_stack",
            "--solver",
            "direct",
            "--mass",
            "0.1,10",
            "--force",
            "-2.5",
        ])
        .unwrap();
        let configs = cli.configs();
        assert_eq!(configs.len(), 2);
        assert_eq!(configs[1].mass, 10.0);
        assert_eq!(configs[0].force, -2.5);
        assert!(configs.iter().all(|c| c.solver == SolverKind::Direct));
    }

    #[test]
    fn suites_cover_every_solver() {
        let cli = Cli::try_parse_from(["sphere_stack", "--suite", "mass-sweep"]).unwrap();
        assert_eq!(
            cli.configs().len(),
            SolverKind::ALL.len() * SphereStackConfig::MASS_SWEEP.len()
        );

        let cli =
            Cli::try_parse_from(["sphere_stack", "--suite", "high-gravity", "--duration", "1"])
                .unwrap();
        let configs = cli.configs();
        assert_eq!(configs.len(), SolverKind::ALL.len());
        assert!(configs.iter().all(|c| c.gravity == -100.0 && c.duration == 1.0));
    }

    #[test]
    fn unknown_solver_is_rejected() {
        assert!(Cli::try_parse_from(["sphere_stack", "--solver", "ode"]).is_err());
    }
}

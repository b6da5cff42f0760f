use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use nalgebra::Vector3;

use flight_assist::config::options::BLOCK_GROUP_NAME;
use flight_assist::config::ConfigStore;
use flight_assist::io::csv;
use flight_assist::sim::{self, SimGyro, SimPanel, SimShip};
use flight_assist::vehicle::BlockGroupBuilder;
use flight_assist::{FlightAssist, Result};

#[derive(Parser)]
#[command(name = "flight-assist", version, about = "Gyroscope flight assist on a simulated rig")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run commands against a rig with fixed telemetry and print the panel
    Run {
        /// Config file (created with defaults when missing)
        #[arg(long, default_value = "flight-assist.cfg")]
        config: PathBuf,

        /// Number of ticks to simulate
        #[arg(long, default_value_t = 60)]
        ticks: u64,

        /// Natural gravity, world frame, "x,y,z"
        #[arg(long, value_parser = parse_vector, default_value = "0,-9.81,0")]
        gravity: Vector3<f64>,

        /// Linear velocity, world frame, "x,y,z"
        #[arg(long, value_parser = parse_vector, default_value = "0,0,0")]
        velocity: Vector3<f64>,

        /// Write per-tick records as CSV
        #[arg(long)]
        csv: Option<String>,

        /// Commands run in order before ticking, e.g. "vector brake"
        commands: Vec<String>,
    },

    /// Write the default config file
    InitConfig {
        #[arg(default_value = "flight-assist.cfg")]
        path: PathBuf,
    },
}

fn parse_vector(s: &str) -> std::result::Result<Vector3<f64>, String> {
    let parts: Vec<f64> = s
        .split(',')
        .map(|p| p.trim().parse::<f64>().map_err(|e| format!("'{}': {}", p, e)))
        .collect::<std::result::Result<_, _>>()?;
    match parts.as_slice() {
        [x, y, z] => Ok(Vector3::new(*x, *y, *z)),
        _ => Err(format!("expected x,y,z but got '{}'", s)),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Run { config, ticks, gravity, velocity, csv, commands } => {
            run(&config, ticks, gravity, velocity, csv.as_deref(), &commands)
        }
        Commands::InitConfig { path } => ConfigStore::defaults().save(&path).map(|()| {
            println!("Wrote default config to {}", path.display());
        }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(
    config_path: &Path,
    ticks: u64,
    gravity: Vector3<f64>,
    velocity: Vector3<f64>,
    csv_path: Option<&str>,
    commands: &[String],
) -> Result<()> {
    let config = ConfigStore::load(config_path)?;
    if !config_path.exists() {
        config.save(config_path)?;
    }

    let ship = SimShip { gravity, velocity, ..SimShip::default() };
    let bindings = BlockGroupBuilder::new(config.get::<String>(BLOCK_GROUP_NAME))
        .controller(ship)
        .gyro(SimGyro::default())
        .panel(SimPanel::default())
        .build()
        .bind()?;

    let mut program = FlightAssist::new(config, bindings)?;
    for command in commands {
        program.run_command(command);
    }

    let records = sim::run(&mut program, ticks);
    if let Some(path) = csv_path {
        csv::write_ticks_file(path, &records)?;
    }

    println!("{}", program.display_text());
    if let Some(last) = records.last() {
        println!(
            "  {} ticks, misalignment {:.4} rad, override {}",
            records.len(),
            last.angle,
            if last.gyro_override { "on" } else { "off" }
        );
    }
    Ok(())
}

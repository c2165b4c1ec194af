//! Dashboard Sim CLI
//!
//! Run the derived-metrics engine or the simulated dashboard from the shell.
//! Every command prints JSON on stdout; logs go to stderr (`RUST_LOG`).
//!
//! Usage:
//!   dashboard-sim allocate --high 2 --medium 1 --low 1 --deployed 78
//!   dashboard-sim route --origin 37.78,-122.45 [--destination <lat,lng>] [--blocked <n>]
//!   dashboard-sim twin --age 72 --vitals 58 --genetics high --hypertension
//!   dashboard-sim trials --count 42 --match-rate 92%
//!   dashboard-sim status --response-time 4.2 --resources 82 --coordination 92 --match-rate 92 --match-time 0.8
//!   dashboard-sim --seed 7 simulate --seconds 300

use clap::{Parser, Subcommand};
use dashboard_metrics::{
    classify, plan_route, predict_allocation, predict_trial_outcome, Coordinate, DeploymentState,
    EmergencySnapshot, GeneticsRisk, SeededSource, StatusInputs, TrialAggregate,
};
use dashboard_sim::forms::DEFAULT_MATCH_RATE;
use dashboard_sim::{parse_leading_number, Dashboard, PatientForm, SimConfig, Simulation};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dashboard-sim")]
#[command(version = "0.1.0")]
#[command(about = "Derived metrics and simulated activity for the response & trials dashboard", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// RNG seed (overrides the config file)
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend resources for an emergency mix
    Allocate {
        #[arg(long, default_value = "0")]
        high: u32,

        #[arg(long, default_value = "0")]
        medium: u32,

        #[arg(long, default_value = "0")]
        low: u32,

        /// Resources currently deployed (percent)
        #[arg(short, long, default_value = "78")]
        deployed: f64,
    },

    /// Plan a route; without an origin the fixed fallback route is used
    Route {
        /// Origin as "lat,lng"
        #[arg(short, long)]
        origin: Option<Coordinate>,

        /// Destination as "lat,lng" (defaults to the configured one)
        #[arg(short, long)]
        destination: Option<Coordinate>,

        /// Blocked road segments to report
        #[arg(short, long)]
        blocked: Option<u32>,
    },

    /// Run the patient digital twin
    Twin {
        #[arg(long)]
        age: Option<i32>,

        /// Vitals score (0-100)
        #[arg(long)]
        vitals: Option<f64>,

        /// Genetic risk: low, medium, high
        #[arg(short, long)]
        genetics: Option<GeneticsRisk>,

        #[arg(long)]
        diabetes: bool,

        #[arg(long)]
        hypertension: bool,

        #[arg(long)]
        cardiovascular: bool,
    },

    /// Predict trial completion, dropout and adverse events
    Trials {
        /// Active trial count
        #[arg(long, default_value = "42")]
        count: u32,

        /// Match rate as shown, e.g. "92" or "92%"
        #[arg(short, long)]
        match_rate: Option<String>,
    },

    /// Classify panel and overall status
    Status {
        /// Average response time (seconds)
        #[arg(long)]
        response_time: f64,

        /// Resources deployed (percent)
        #[arg(long)]
        resources: f64,

        /// Coordination score
        #[arg(long)]
        coordination: f64,

        /// Patient match rate (percent)
        #[arg(long)]
        match_rate: f64,

        /// Average match time (seconds)
        #[arg(long)]
        match_time: f64,
    },

    /// Run the scheduled simulation and print the final snapshot
    Simulate {
        /// Virtual seconds to run
        #[arg(long, default_value = "60")]
        seconds: u64,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    let mut rng = SeededSource::new(config.seed);
    tracing::debug!(seed = ?rng.seed(), "rng ready");

    let result: serde_json::Value = match cli.command {
        Commands::Allocate { high, medium, low, deployed } => {
            let plan = predict_allocation(
                &EmergencySnapshot::new(high, medium, low),
                &DeploymentState::new(deployed)?,
            );
            serde_json::to_value(plan)?
        }
        Commands::Route { origin, destination, blocked } => {
            let plan = plan_route(
                origin.or(config.route_origin),
                destination.unwrap_or(config.route_destination),
                blocked.unwrap_or(config.blocked_segments),
                &mut rng,
            );
            serde_json::to_value(plan)?
        }
        Commands::Twin { age, vitals, genetics, diabetes, hypertension, cardiovascular } => {
            let form = PatientForm {
                age,
                vitals,
                genetics,
                diabetes,
                hypertension,
                cardiovascular,
            };
            let dashboard = Dashboard::new(&config)?;
            serde_json::to_value(dashboard.twin(&form, &mut rng)?)?
        }
        Commands::Trials { count, match_rate } => {
            let rate = match_rate
                .as_deref()
                .and_then(parse_leading_number)
                .unwrap_or(DEFAULT_MATCH_RATE);
            let aggregate = TrialAggregate::new(count, rate)?;
            serde_json::to_value(predict_trial_outcome(&aggregate))?
        }
        Commands::Status { response_time, resources, coordination, match_rate, match_time } => {
            let inputs =
                StatusInputs::new(response_time, resources, coordination, match_rate, match_time)?;
            serde_json::to_value(classify(&inputs))?
        }
        Commands::Simulate { seconds } => {
            let mut simulation = Simulation::new(&config, rng)?;
            let report = simulation.run_for(seconds);
            serde_json::json!({
                "report": report,
                "snapshot": simulation.snapshot()?,
            })
        }
    };

    let output = if cli.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{}", output);

    Ok(())
}

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use diffdrive_runtime::config::SteeringConfig;

/// Keyboard teleop for a two-wheel differential drive base
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON file with steering tunables
    #[arg(long)]
    config: Option<PathBuf>,

    /// Global speed ceiling, 0.1..=1.0
    #[arg(long)]
    max_speed: Option<f64>,

    /// Turn-rate gain, 0.1..=2.0
    #[arg(long)]
    sensitivity: Option<f64>,

    /// Minimum stick deflection, 0.0..=0.2
    #[arg(long)]
    dead_zone: Option<f64>,
}

#[tokio::main]
async fn main() {
    // Setup logging (set RUST_LOG=info or debug)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .init();

    let args = Args::parse();

    let config = match args.config {
        Some(ref path) => match SteeringConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Config error: {}", e);
                std::process::exit(1);
            }
        },
        None => SteeringConfig::default(),
    };
    let config = config.with_overrides(args.max_speed, args.sensitivity, args.dead_zone);

    if let Err(e) = diffdrive_runtime::runtime::run(config).await {
        eprintln!("Teleop error: {}", e);
        std::process::exit(1);
    }
}

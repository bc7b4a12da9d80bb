use crate::app_config::{AppConfig, AppConfigError};
use crate::domain::TargetSpec;
use crate::estimator::{EstimationError, estimate_distance};
use crate::ipinfo::{IpInfoClientError, IpInfoResolver};
use crate::ping::PingProbe;
use crate::report::DistanceReport;
use clap::Parser;
use std::net::IpAddr;
use std::process::ExitCode;
use thiserror::Error;
use tracing::{debug, info};

mod app_config;
mod distance;
mod domain;
mod estimator;
mod geo_coordinate_deserializer;
mod ipinfo;
mod ping;
mod report;

#[derive(Parser, Debug)]
#[command(name = "ipdistance", version)]
#[command(about = "Estimate the distance between two IP addresses or from your own to a target IP.", long_about = None)]
struct Cli {
    /// The target IP address to analyze
    target: IpAddr,

    /// Optional custom source IP address to calculate the distance between two IPs
    #[arg(short, long, value_name = "IP")]
    custom: Option<IpAddr>,

    /// Number of probe packets to send to the target
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u32).range(1..))]
    count: Option<u32>,

    /// Assumed signal propagation speed, 200 km/ms is light in optical fiber
    #[arg(long, value_name = "KM_PER_MS", value_parser = parse_propagation_speed)]
    propagation_speed: Option<f64>,

    /// Log what is being resolved and measured
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

impl Cli {
    fn target_spec(&self) -> TargetSpec {
        TargetSpec {
            target_ip: self.target,
            source_ip: self.custom,
        }
    }
}

fn parse_propagation_speed(value: &str) -> Result<f64, String> {
    let speed = value.parse::<f64>().map_err(|e| format!("{}: {}", value, e))?;
    if speed.is_finite() && speed > 0.0 {
        Ok(speed)
    } else {
        Err(format!("{} is not a positive speed", value))
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };
    tracing_subscriber::fmt().with_max_level(level).with_writer(std::io::stderr).init();

    info!("🪵 Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let result = run(&cli).await;
    match &result {
        Ok(report) => println!("{}", report),
        Err(e) => eprintln!("Error: {}", e),
    }

    ExitCode::from(exit_code(&result))
}

/// A report is a success even without an RTT estimate; any error is not.
fn exit_code(result: &Result<DistanceReport, AppError>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(_) => 1,
    }
}

async fn run(cli: &Cli) -> Result<DistanceReport, AppError> {
    let mut config = AppConfig::load()?;
    if let Some(count) = cli.count {
        config = config.with_sample_count(count);
    }
    if let Some(speed) = cli.propagation_speed {
        config = config.with_propagation_km_per_ms(speed);
    }
    debug!("✅ Loaded configuration");

    let client = ipinfo::new_client(&config)?;
    let resolver = IpInfoResolver::new(client, &config);
    let probe = PingProbe::new(&config);

    Ok(estimate_distance(&cli.target_spec(), &resolver, &probe, &config).await?)
}

#[derive(Error, Debug)]
enum AppError {
    #[error(transparent)]
    Config(#[from] AppConfigError),
    #[error(transparent)]
    Client(#[from] IpInfoClientError),
    #[error(transparent)]
    Estimation(#[from] EstimationError),
}

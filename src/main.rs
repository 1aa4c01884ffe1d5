// Webmo - remote control for a stepper-driven rotating platform
// Main entry point

use anyhow::{Context, Result};
use clap::Parser;
use std::time::Duration;
use tracing_subscriber::prelude::*;

use webmo::client::DeviceClient;
use webmo::config::{load_config, Config};
use webmo::errors::{describe, DeviceError};
use webmo::units;

#[derive(Parser, Debug)]
#[command(name = "webmo")]
#[command(about = "Control a Webmo rotating platform over HTTP", version)]
struct Args {
    /// Device host (default: $WEBMO_HOST, then config file, then webmo.local)
    #[arg(long, global = true)]
    host: Option<String>,

    /// Log requests and responses
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser, Debug)]
enum Command {
    /// Print the device status
    Status,
    /// Rotate until stopped
    Rotate {
        #[arg(long, allow_negative_numbers = true)]
        speed: Option<f64>,
    },
    /// Rotate to an absolute position
    RotateTo {
        #[arg(allow_negative_numbers = true)]
        position: f64,
        abs_range: f64,
        #[arg(long, allow_negative_numbers = true)]
        speed: Option<f64>,
    },
    /// Rotate by an angle relative to the current position
    RotateBy {
        #[arg(allow_negative_numbers = true)]
        degree: f64,
        #[arg(long, allow_negative_numbers = true)]
        speed: Option<f64>,
    },
    /// Rotate back to the home position
    Home,
    /// Stop the motor
    Stop {
        /// Decelerate instead of stopping at once
        #[arg(long)]
        smooth: bool,
        /// Keep the motor energized after stopping
        #[arg(long)]
        lock: bool,
    },
    /// Stop at once without sending a lock preference
    StopHard,
    /// Decelerate to a stop without sending a lock preference
    StopSoft,
    /// Make the current position the new home
    ResetHome,
    /// Unit conversions (no device needed)
    Convert {
        #[command(subcommand)]
        conversion: Conversion,
    },
}

#[derive(Parser, Debug)]
enum Conversion {
    /// Degrees to full steps
    AngleToStep {
        #[arg(allow_negative_numbers = true)]
        angle: f64,
    },
    /// Microsteps to degrees
    StepToAngle {
        #[arg(allow_negative_numbers = true)]
        step: f64,
    },
    /// Step rate to device speed units
    SpeedByStep {
        #[arg(allow_negative_numbers = true)]
        step: f64,
    },
    /// Angular rate to device speed units
    SpeedByAngle {
        #[arg(allow_negative_numbers = true)]
        angle: f64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_tracing(args.verbose);

    if let Command::Convert { conversion } = &args.command {
        println!("{}", convert(conversion));
        return Ok(());
    }

    let config = load_config()?;
    let client = build_client(&config, args.host.as_deref())?;

    match run(&client, args.command).await {
        Ok(body) => {
            if !body.is_empty() {
                println!("{}", body);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", describe(&e, client.base_url()));
            std::process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    // RUST_LOG wins; otherwise warnings only, or debug with -v
    let default_level = if verbose { "webmo=debug" } else { "warn" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Bridge log crate → tracing (reqwest and hyper log through it)
    tracing_log::LogTracer::init().ok();
}

fn build_client(config: &Config, host: Option<&str>) -> Result<DeviceClient> {
    let host = config.resolve_host(host);

    let mut builder = reqwest::Client::builder();
    if let Some(secs) = config.timeout_seconds {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    let http = builder.build().context("Failed to build HTTP client")?;

    Ok(DeviceClient::with_http_client(host, http))
}

async fn run(client: &DeviceClient, command: Command) -> Result<String, DeviceError> {
    match command {
        Command::Status => client.get_status().await,
        Command::Rotate { speed } => client.rotate(speed).await,
        Command::RotateTo {
            position,
            abs_range,
            speed,
        } => client.rotate_to(position, abs_range, speed).await,
        Command::RotateBy { degree, speed } => client.rotate_by(degree, speed).await,
        Command::Home => client.rotate_to_home().await,
        Command::Stop { smooth, lock } => client.stop(Some(smooth), Some(lock)).await,
        Command::StopHard => client.stop_hard().await,
        Command::StopSoft => client.stop_soft().await,
        Command::ResetHome => client.reset_home().await,
        Command::Convert { conversion } => Ok(convert(&conversion).to_string()),
    }
}

fn convert(conversion: &Conversion) -> f64 {
    match *conversion {
        Conversion::AngleToStep { angle } => units::angle_to_step(angle, units::STEP_ANGLE),
        Conversion::StepToAngle { step } => units::step_to_angle(step, units::STEP_ANGLE),
        Conversion::SpeedByStep { step } => units::speed_per_second_by_step(step),
        Conversion::SpeedByAngle { angle } => {
            units::speed_per_second_by_angle(angle, units::STEP_ANGLE)
        }
    }
}

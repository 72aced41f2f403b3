use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use ringflight_common::{SimConfig, Viewport};
use ringflight_hud::Telemetry;
use ringflight_input::{Control, ControlSet};
use ringflight_kernel::{Simulation, terrain};
use ringflight_render::{DebugTextRenderer, Renderer, SceneBuilder};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ringflight-cli", about = "Headless ringflight driver")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML config overriding the default tuning
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and effective constants
    Info,
    /// Fly headlessly with a fixed set of held controls
    Fly {
        /// Simulated seconds to fly
        #[arg(short, long, default_value = "10")]
        seconds: f32,
        /// Fixed timestep in seconds
        #[arg(long, default_value = "0.016")]
        dt: f32,
        /// Control held for the whole flight (repeatable), e.g. pitch-up
        #[arg(long, value_name = "CONTROL")]
        hold: Vec<Control>,
        /// Emit JSON lines instead of text
        #[arg(long)]
        json: bool,
    },
    /// Advance, then print a text rendering of the frame
    Render {
        #[arg(long, default_value = "1280")]
        width: f32,
        #[arg(long, default_value = "720")]
        height: f32,
        /// Simulated seconds to advance before rendering
        #[arg(short, long, default_value = "0")]
        seconds: f32,
        /// Control held while advancing (repeatable)
        #[arg(long, value_name = "CONTROL")]
        hold: Vec<Control>,
    },
    /// Print the effective configuration as YAML
    Config,
}

/// Telemetry taken once per simulated second.
#[derive(Debug, Clone, Copy, Serialize)]
struct FlightSample {
    time: f32,
    ground_contacts: u64,
    #[serde(flatten)]
    telemetry: Telemetry,
}

/// Step size used when advancing before a render.
const RENDER_DT: f32 = 1.0 / 60.0;

fn check_duration(seconds: f32, dt: f32) -> Result<()> {
    if !(dt > 0.0 && dt.is_finite()) {
        bail!("--dt must be a positive number, got {dt}");
    }
    if !(seconds >= 0.0 && seconds.is_finite()) {
        bail!("--seconds must be non-negative, got {seconds}");
    }
    Ok(())
}

/// Advance `sim` in fixed `dt` steps for `seconds`, calling `on_second` at
/// the start and after every whole simulated second.
fn fly(
    sim: &mut Simulation,
    seconds: f32,
    dt: f32,
    controls: ControlSet,
    mut on_second: impl FnMut(FlightSample),
) {
    let sample = |sim: &Simulation| FlightSample {
        time: sim.state().elapsed,
        ground_contacts: sim.ground_contacts(),
        telemetry: Telemetry::from_state(sim.state()),
    };
    on_second(sample(sim));

    let steps = (seconds / dt).round() as u64;
    let mut next_report = 1.0;
    for _ in 0..steps {
        sim.advance(dt, controls);
        if sim.state().elapsed + dt * 0.5 >= next_report {
            on_second(sample(sim));
            next_report += 1.0;
        }
    }
}

fn print_info(config: &SimConfig) {
    let f = &config.flight;
    println!("ringflight-cli v{}", env!("CARGO_PKG_VERSION"));
    println!(
        "flight: control_rate={} throttle_rate={} speed={}..{} gravity={}",
        f.control_rate,
        f.throttle_rate,
        f.base_speed,
        f.base_speed + f.speed_range,
        f.gravity
    );
    println!(
        "camera: focal_length={} near_plane={}",
        config.camera.focal_length, config.camera.near_plane
    );
    println!("frame: max_dt={}", config.frame.max_dt);
    println!(
        "world: rings={} seed={:#x} terrain_max={:.1}",
        config.world.ring_count,
        config.world.ring_seed,
        terrain::MAX_HEIGHT
    );
    println!("controls: {}", Control::ALL.map(|c| c.name()).join(", "));
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = SimConfig::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Info => print_info(&config),
        Commands::Fly {
            seconds,
            dt,
            hold,
            json,
        } => {
            check_duration(seconds, dt)?;
            let controls: ControlSet = hold.into_iter().collect();
            tracing::info!(seconds, dt, held = controls.len(), "flying");

            let mut sim = Simulation::new(&config);
            let mut error = None;
            fly(&mut sim, seconds, dt, controls, |sample| {
                if json {
                    match serde_json::to_string(&sample) {
                        Ok(line) => println!("{line}"),
                        Err(e) => {
                            error.get_or_insert(e);
                        }
                    }
                } else {
                    println!("t={:>6.2}s  {}", sample.time, sample.telemetry);
                }
            });
            if let Some(e) = error {
                return Err(e.into());
            }
            tracing::info!(ground_contacts = sim.ground_contacts(), "flight complete");
        }
        Commands::Render {
            width,
            height,
            seconds,
            hold,
        } => {
            check_duration(seconds, RENDER_DT)?;
            if !(width > 0.0 && height > 0.0) {
                bail!("viewport must be positive, got {width}x{height}");
            }
            let controls: ControlSet = hold.into_iter().collect();
            let mut sim = Simulation::new(&config);
            fly(&mut sim, seconds, RENDER_DT, controls, |_| {});
            let renderer = DebugTextRenderer::new(SceneBuilder::new(&config));
            print!("{}", renderer.render(&sim, Viewport::new(width, height)));
        }
        Commands::Config => {
            print!("{}", config.to_yaml()?);
        }
    }

    Ok(())
}

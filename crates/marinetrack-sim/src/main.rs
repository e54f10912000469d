//! MarineTrack Headless Simulation Harness
//!
//! Seeds a fleet, mounts the tick pipeline against an in-memory map and runs
//! it for a number of ticks. Stands in for the host application.
//!
//! Usage:
//!   cargo run -p marinetrack-sim
//!   cargo run -p marinetrack-sim -- --ticks 600 --seed 7 --json
//!   RUST_LOG=debug cargo run -p marinetrack-sim -- --realtime

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use marinetrack_core::map::{HeadlessMap, HeadlessMapFactory};
use marinetrack_core::prelude::*;
use marinetrack_core::query::FleetStats;

#[derive(Parser)]
#[command(name = "marinetrack-sim", about = "Headless vessel simulation harness")]
struct Cli {
    /// JSON simulation config; defaults are used when absent
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of ticks to run
    #[arg(long, default_value_t = 60)]
    ticks: u64,
    /// Random seed for ambient vessels (overrides the config)
    #[arg(long)]
    seed: Option<u64>,
    /// Sleep one tick period between firings instead of fast-forwarding
    #[arg(long)]
    realtime: bool,
    /// Print the final snapshot as JSON
    #[arg(long)]
    json: bool,
    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            SimulationConfig::from_reader(BufReader::new(file))
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => SimulationConfig::default(),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    if cli.print_config {
        println!("{}", config.to_json_pretty()?);
        return Ok(());
    }

    let period = config.tick_period();
    let manual = ManualClock::new(Utc::now());
    let clock: Box<dyn Clock> = if cli.realtime {
        Box::new(SystemClock)
    } else {
        Box::new(manual.clone())
    };

    let mut ctx: SimulationContext<HeadlessMap> =
        SimulationContext::new(config, clock).context("building simulation")?;
    ctx.attach_map_from(&mut HeadlessMapFactory::default())?;

    let mut host = ManualTimerHost::new();
    ctx.mount(&mut host)?;

    let step = chrono::Duration::from_std(period)?;
    let mut failures = 0u64;
    for _ in 0..cli.ticks {
        if cli.realtime {
            std::thread::sleep(period);
        } else {
            manual.advance(step);
        }
        match ctx.fire_tick() {
            TickOutcome::Advanced { tick, markers } => {
                if let Some(report) = markers {
                    log::debug!("tick {}: {} markers updated", tick, report.updated);
                }
            }
            TickOutcome::Failed(_) => failures += 1,
            TickOutcome::Idle => {}
        }
    }
    ctx.unmount(&mut host);

    let snapshot = ctx.snapshot();
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&*snapshot)?);
        return Ok(());
    }

    println!("=== MarineTrack Simulation ===\n");
    println!("Ticks run:        {} ({} failed)", snapshot.tick, failures);
    if let Some(tracked) = snapshot.tracked() {
        println!(
            "Tracked vessel:   {} at {}, heading {:.1}°",
            tracked.name,
            tracked.position.to_hemisphere_string(),
            tracked.heading
        );
    }
    if let Some(progress) = ctx.tracked_progress() {
        println!("Voyage progress:  {:.4}%", progress * 100.0);
    }
    if let (Some(days), Some(eta)) = (ctx.days_remaining(), ctx.eta()) {
        println!("Days remaining:   {} (ETA {})", days, eta.format("%Y-%m-%d"));
    }

    let stats = FleetStats::from_snapshot(&snapshot);
    println!("\nFleet:            {} vessels, avg {:.1} kn", stats.total, stats.average_speed_knots);
    for kind in VesselKind::all() {
        println!("  {:<12} {}", kind.label(), stats.count(*kind));
    }
    println!(
        "  en route {}, at anchor {}, maneuvering {}",
        stats.en_route, stats.at_anchor, stats.maneuvering
    );
    println!("\nMarkers on map:   {}", ctx.marker_count());

    Ok(())
}

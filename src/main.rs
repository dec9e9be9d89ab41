//! People Counter - Entry Point
//!
//! Command-line front end: edit zones and settings, run the occupancy
//! simulation headless or live, and produce exports.

use std::path::PathBuf;
use std::time::Instant;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tokio::runtime::Runtime;

use people_counter::core::config::SimulationConfig;
use people_counter::core::error::{CounterError, Result};
use people_counter::core::types::{Rect, Vec2, ZoneId};
use people_counter::export::Exporter;
use people_counter::occupancy::fill_percent;
use people_counter::settings::{SettingsAction, SettingsStore};
use people_counter::simulation::{run_live, RunSummary, Simulation, TickReport};
use people_counter::storage::FileStore;
use people_counter::zones::{DrawGesture, Zone, ZoneStore};

/// Zone occupancy counting over a simulated crowd
#[derive(Parser, Debug)]
#[command(name = "people-counter")]
#[command(about = "Count simulated people inside user-drawn zones")]
struct Cli {
    /// Directory holding the zones and settings slots
    #[arg(long, default_value = ".people-counter")]
    data_dir: PathBuf,

    /// TOML file overriding simulation defaults
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Manage zones
    #[command(subcommand)]
    Zones(ZonesCommand),

    /// Show or change project settings
    #[command(subcommand)]
    Settings(SettingsCommand),

    /// Run the simulation
    Run(RunArgs),

    /// Export a report
    Export(ExportArgs),
}

#[derive(Subcommand, Debug)]
enum ZonesCommand {
    /// List zones
    List,
    /// Add a zone by its two drag endpoints, in any order
    Add { x1: f32, y1: f32, x2: f32, y2: f32 },
    /// Rename a zone
    Rename { id: String, name: String },
    /// Delete a zone
    Remove { id: String },
    /// Replace a zone's rectangle
    Move { id: String, x: f32, y: f32, w: f32, h: f32 },
}

#[derive(Subcommand, Debug)]
enum SettingsCommand {
    /// Print current settings
    Show,
    /// Change one or more settings
    Set {
        /// Count above which a zone alerts
        #[arg(long, allow_negative_numbers = true)]
        threshold: Option<i64>,
        /// Address alerts would be sent to
        #[arg(long)]
        email: Option<String>,
    },
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Number of ticks; headless runs default to 100, live runs until Ctrl-C
    #[arg(long)]
    ticks: Option<u64>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Tick on the real-time interval and print every tick
    #[arg(long)]
    live: bool,

    /// Print the final summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ExportFormat {
    Csv,
    Pdf,
}

#[derive(Args, Debug)]
struct ExportArgs {
    #[arg(value_enum)]
    format: ExportFormat,

    /// Output path; defaults to the report's file name in the current directory
    #[arg(long)]
    out: Option<PathBuf>,
}

const DEFAULT_HEADLESS_TICKS: u64 = 100;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("people_counter=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => SimulationConfig::load_from_toml(path)?,
        None => SimulationConfig::default(),
    };

    let store = FileStore::open(&cli.data_dir)?;
    tracing::debug!(dir = %store.dir().display(), "data directory opened");

    match cli.command {
        Command::Zones(cmd) => run_zones(cmd, store),
        Command::Settings(cmd) => run_settings(cmd, store),
        Command::Run(args) => run_simulation(args, config, store),
        Command::Export(args) => run_export(args, store),
    }
}

fn run_zones(cmd: ZonesCommand, store: FileStore) -> Result<()> {
    let mut zones = ZoneStore::open(store);

    match cmd {
        ZonesCommand::List => {
            if zones.is_empty() {
                println!("No zones yet. Add one with `zones add x1 y1 x2 y2`.");
            }
            for zone in zones.zones() {
                print_zone(zone);
            }
        }
        ZonesCommand::Add { x1, y1, x2, y2 } => {
            let mut gesture = DrawGesture::new();
            gesture.begin(Vec2::new(x1, y1));
            gesture.drag(Vec2::new(x2, y2));
            if let Some(rect) = gesture.finish() {
                let zone = zones.add_zone(rect);
                print_zone(&zone);
            }
        }
        ZonesCommand::Rename { id, name } => {
            let id = ZoneId(id);
            if !zones.rename_zone(&id, name) {
                return Err(CounterError::ZoneNotFound(id));
            }
        }
        ZonesCommand::Remove { id } => {
            let id = ZoneId(id);
            match zones.remove_zone(&id) {
                Some(zone) => println!("Removed {}", zone.name),
                None => return Err(CounterError::ZoneNotFound(id)),
            }
        }
        ZonesCommand::Move { id, x, y, w, h } => {
            let id = ZoneId(id);
            if !zones.update_geometry(&id, Rect::new(x, y, w, h)) {
                return Err(CounterError::ZoneNotFound(id));
            }
        }
    }

    Ok(())
}

fn print_zone(zone: &Zone) {
    println!(
        "{}  {:<16} {}  x={} y={} w={} h={}",
        zone.id, zone.name, zone.color, zone.rect.x, zone.rect.y, zone.rect.w, zone.rect.h
    );
}

fn run_settings(cmd: SettingsCommand, store: FileStore) -> Result<()> {
    let mut settings = SettingsStore::open(store);

    if let SettingsCommand::Set { threshold, email } = cmd {
        if let Some(threshold) = threshold {
            settings.dispatch(SettingsAction::SetThreshold(threshold));
        }
        if let Some(email) = email {
            settings.dispatch(SettingsAction::SetAlertEmail(email));
        }
    }

    let view = settings.view();
    println!("threshold:   {}", view.threshold);
    println!("alert email: {}", view.alert_email);
    Ok(())
}

fn run_simulation(args: RunArgs, mut config: SimulationConfig, store: FileStore) -> Result<()> {
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let zones = ZoneStore::open(store.clone());
    let settings = SettingsStore::open(store);

    let mut sim = Simulation::random_walk(config);
    tracing::info!(
        seed = sim.source().seed(),
        entities = sim.source().entities().len(),
        zones = zones.len(),
        "simulation starting"
    );

    let start = Instant::now();
    let mut alert_ticks = 0u64;
    let mut last: Option<TickReport> = None;

    if args.live {
        let rt = Runtime::new()?;
        let shutdown = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!(error = %e, "could not listen for Ctrl-C");
                std::future::pending::<()>().await;
            }
        };
        rt.block_on(run_live(
            &mut sim,
            zones.zones(),
            settings.view(),
            args.ticks,
            shutdown,
            |report| {
                alert_ticks += report.alerts.len() as u64;
                print_tick(zones.zones(), report);
                last = Some(report.clone());
            },
        ));
    } else {
        let ticks = args.ticks.unwrap_or(DEFAULT_HEADLESS_TICKS);
        for _ in 0..ticks {
            let report = sim.run_tick(zones.zones(), settings.view());
            alert_ticks += report.alerts.len() as u64;
            last = Some(report);
        }
    }

    let summary = RunSummary::new(&sim, zones.zones(), last.as_ref(), alert_ticks, start.elapsed());
    if args.json {
        println!("{}", summary.to_json());
    } else {
        println!("{}", summary.summary());
        for zone in &summary.zones {
            println!(
                "  {:<16} {:>3}  {:>5.1}%{}",
                zone.name,
                zone.count,
                zone.fill_percent,
                if zone.in_alert { "  ALERT" } else { "" }
            );
        }
    }

    Ok(())
}

fn print_tick(zones: &[Zone], report: &TickReport) {
    let per_zone: Vec<String> = zones
        .iter()
        .map(|z| {
            let count = report.counts.get(&z.id);
            format!("{}={} ({:.0}%)", z.name, count, fill_percent(count, report.fill_threshold))
        })
        .collect();
    println!(
        "tick {:>5}  total {:>3}  {}{}",
        report.tick,
        report.counts.total,
        per_zone.join("  "),
        if report.alerts.is_empty() { "" } else { "  ALERT" }
    );
}

fn run_export(args: ExportArgs, store: FileStore) -> Result<()> {
    let zones = ZoneStore::open(store);
    let mut exporter = Exporter::new(None);

    let file = match args.format {
        ExportFormat::Csv => exporter.export_csv(zones.zones())?,
        ExportFormat::Pdf => exporter.export_pdf(),
    };

    let path = match args.out {
        Some(path) => {
            file.save_as(&path)?;
            path
        }
        None => file.save_in(&std::env::current_dir()?)?,
    };

    for entry in exporter.activity().entries() {
        println!("{}  {}", entry.time.format("%H:%M:%S"), entry.message);
    }
    println!("Wrote {} ({})", path.display(), file.content_type);
    Ok(())
}

//! `cycle-audit` — how far recorded cycling trips stray from their best
//! routes, and which sections to upgrade on a limited budget.
//!
//! Run with:
//!   cargo run -p cycle-audit --release -- \
//!       --nodes nodes.csv --sections sections.csv --trips trips.csv plan
//!
//! `RUST_LOG` controls verbosity (default `info`).

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};

use cg_core::AnalysisConfig;
use cg_output::{export_network, export_selection, export_trips, CsvWriter, ReportWriter};
use cg_planner::{apply, assess_section, plan_upgrades};
use cg_spatial::{build_front, check_spacing, load_network_csv, DangerChannel, DijkstraRouter, RoadNetwork};
use cg_trips::{load_trips_csv, summarize_deviation, ImpactReport, TripSet};

/// Trips whose fronts are checked for coarse spacing by `deviation`.
const SPACING_SAMPLE: usize = 20;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Node table (`node_id,x,y`).
    #[arg(long)]
    nodes: PathBuf,

    /// Section table (`section_id,start_node,end_node,distance,...`).
    #[arg(long)]
    sections: PathBuf,

    /// Trip table (`trip_id,start_node,end_node,section_id`).
    #[arg(long)]
    trips: PathBuf,

    /// JSON analysis configuration; defaults apply to missing fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Nodes cut off both ends of every trip before analysis.
    #[arg(long, default_value_t = 0)]
    trim: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Distribution of trip deviation from the nearest front label.
    Deviation,
    /// Upgrade a single section and measure the effect on nearby trips.
    Assess {
        #[arg(long)]
        section: u64,
        /// Safety factor; the configured one when omitted.
        #[arg(long)]
        factor: Option<f64>,
    },
    /// Choose upgrades under the length budget and measure the effect.
    Plan {
        /// Upgradable length; the configured one when omitted.
        #[arg(long)]
        budget: Option<f64>,
        /// Write the upgraded network and the selection here.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Write the network tables as CSV.
    Export {
        #[arg(long)]
        out: PathBuf,
    },
    /// Write a reproducible random trip subset for plotting.
    Sample {
        #[arg(long)]
        count: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long)]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    config.validate()?;
    init_thread_pool(&config)?;

    let network = load_network_csv(&args.nodes, &args.sections)
        .with_context(|| format!("loading network from {} and {}", args.nodes.display(), args.sections.display()))?;
    let mut trips =
        load_trips_csv(&args.trips).with_context(|| format!("loading trips from {}", args.trips.display()))?;

    let filter = trips.validate(&network);
    info!(
        "validated {} trips: {} loops and {} gaps near the ends removed",
        filter.checked, filter.loops, filter.near_endpoints
    );
    let profile = trips.retain_min_length(&network, config.min_trip_length);
    info!("length bands {:?}, {} short trips removed", profile.bands, profile.removed);
    if args.trim > 0 {
        let removed = trips.trim_ends(args.trim);
        info!("trimmed {} nodes off each end, {removed} trips too short", args.trim);
    }
    info!("{} trips ready", trips.len());

    match args.command {
        Command::Deviation => run_deviation(&network, &mut trips, &config),
        Command::Assess { section, factor } => {
            run_assess(network, &mut trips, &config, section, factor.unwrap_or(config.safety_factor))
        }
        Command::Plan { budget, out } => {
            let config = AnalysisConfig { budget: budget.unwrap_or(config.budget), ..config };
            run_plan(network, &mut trips, &config, out.as_deref())
        }
        Command::Export { out } => {
            let mut writer = CsvWriter::new(&out)?;
            export_network(&mut writer, &network)?;
            writer.finish()?;
            info!("network written to {}", out.display());
            Ok(())
        }
        Command::Sample { count, seed, out } => {
            let sample = trips.sample(count, seed);
            let mut writer = CsvWriter::new(&out)?;
            export_network(&mut writer, &network)?;
            export_trips(&mut writer, sample.iter(), &network)?;
            writer.finish()?;
            info!("{} sampled trips written to {}", sample.len(), out.display());
            Ok(())
        }
    }
}

// ── Setup ─────────────────────────────────────────────────────────────────────

fn load_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    let Some(path) = path else {
        return Ok(AnalysisConfig::default());
    };
    let file = File::open(path).with_context(|| format!("opening config {}", path.display()))?;
    let config = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing config {}", path.display()))?;
    info!("config loaded from {}", path.display());
    Ok(config)
}

#[cfg(feature = "parallel")]
fn init_thread_pool(config: &AnalysisConfig) -> Result<()> {
    if let Some(threads) = config.num_threads {
        rayon::ThreadPoolBuilder::new().num_threads(threads).build_global()?;
        info!("rayon pool sized to {threads} threads");
    }
    Ok(())
}

#[cfg(not(feature = "parallel"))]
fn init_thread_pool(config: &AnalysisConfig) -> Result<()> {
    if config.num_threads.is_some() {
        warn!("num_threads is ignored without the `parallel` feature");
    }
    Ok(())
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn run_deviation(network: &RoadNetwork, trips: &mut TripSet, config: &AnalysisConfig) -> Result<()> {
    let summary = summarize_deviation(trips.as_mut_slice(), &DijkstraRouter, network);
    info!("mean deviation {:.2}% over {} trips", summary.mean, summary.trips);
    for (bucket, count) in summary.buckets.iter().enumerate() {
        let label = match bucket {
            0..=8 => format!("[{bucket}, {})", bucket + 1),
            9 => "[9, 10]".to_owned(),
            _ => "other".to_owned(),
        };
        info!("  {label:>8}  {count}");
    }

    let mut coarse = 0;
    for trip in trips.iter().take(SPACING_SAMPLE) {
        let Ok((start, end)) = trip.endpoints() else { continue };
        if let Ok(front) = build_front(&DijkstraRouter, network, start, end, DangerChannel::Base) {
            if check_spacing(&front, config.gap_ratio_warning).is_some() {
                coarse += 1;
            }
        }
    }
    if coarse > 0 {
        warn!("{coarse} of the first {SPACING_SAMPLE} trip fronts have a wide gap");
    }
    Ok(())
}

fn run_assess(
    mut network: RoadNetwork,
    trips:       &mut TripSet,
    config:      &AnalysisConfig,
    section:     u64,
    factor:      f64,
) -> Result<()> {
    let assessment = assess_section(
        section,
        factor,
        &mut network,
        trips.as_mut_slice(),
        &DijkstraRouter,
        config.threshold_distance,
    )?;
    info!(
        "segment {} (factor {factor}): {} nodes within {:.1} m",
        assessment.base_id, assessment.nodes, assessment.radius
    );
    log_impact(&assessment.impact);
    Ok(())
}

fn run_plan(mut network: RoadNetwork, trips: &mut TripSet, config: &AnalysisConfig, out: Option<&Path>) -> Result<()> {
    let selection = plan_upgrades(&network, trips.as_slice(), config)?;
    let report = apply(selection, &mut network, trips.as_mut_slice(), &DijkstraRouter, config.safety_factor);
    info!("upgrade segments {:?}", report.selection.base_ids());
    log_impact(&report.impact);

    if let Some(out) = out {
        let mut writer = CsvWriter::new(out)?;
        export_network(&mut writer, &network)?;
        export_selection(&mut writer, &report.selection)?;
        writer.finish()?;
        info!("plan written to {}", out.display());
    }
    Ok(())
}

fn log_impact(impact: &ImpactReport) {
    info!(
        "{} of {} trips impacted ({:.1}%), mean change {:.2}%",
        impact.impacted,
        impact.evaluated,
        impact.impacted_fraction * 100.0,
        impact.mean_improvement
    );
}

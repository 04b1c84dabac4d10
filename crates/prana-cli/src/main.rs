mod diagnostics;
mod session;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use prana_config::{LoadedConfig, load_config};
use prana_core::{
    ChakraId, ExperienceLevel, FigureHost, LayoutEngine, LayoutTrigger, Rect, build_cycle,
    chakra_positions, spine_range,
};
use serde::Serialize;

use crate::diagnostics::TracingDiagnostics;
use crate::session::{SessionOptions, run_session};

/// Session length used when neither --minutes nor --cycles is given.
const DEFAULT_MINUTES: f64 = 3.0;

#[derive(Parser)]
#[command(name = "prana", about = "Chakra breathing sessions and figure layout")]
struct Cli {
    /// Breath configuration file (.toml or .json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the breath cycle for a chakra and level
    Cycle {
        /// Chakra id (aliases such as "solar" or "thirdEye" accepted)
        chakra: String,

        #[arg(long, default_value = "beginner")]
        level: String,

        /// Zero out both hold phases
        #[arg(long)]
        no_holds: bool,
    },

    /// Run a live breathing session in the terminal
    Session {
        chakra: String,

        #[arg(long, default_value = "beginner")]
        level: String,

        /// Session length in minutes
        #[arg(long, conflicts_with = "cycles")]
        minutes: Option<f64>,

        /// Session length as a number of full cycles
        #[arg(long)]
        cycles: Option<u32>,

        #[arg(long)]
        no_holds: bool,

        /// Run the clock this many times faster than real time
        #[arg(long, default_value_t = 1.0)]
        time_scale: f64,
    },

    /// Compute hotspot positions for a container and figure size (JSON)
    Layout {
        /// Container width in pixels
        #[arg(long)]
        width: f64,

        /// Container height in pixels
        #[arg(long)]
        height: f64,

        /// Figure top offset within the container
        #[arg(long, requires = "image_height")]
        image_top: Option<f64>,

        /// Measured figure height; omit to use the unloaded-image fallback
        #[arg(long)]
        image_height: Option<f64>,

        /// Measured figure width (defaults to the container width)
        #[arg(long)]
        image_width: Option<f64>,
    },

    /// Load and validate the breath configuration
    Validate,

    /// Print the chakra anchor table
    Chakras,
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn open_config(cli: &Cli) -> Result<LoadedConfig> {
    load_config(cli.config.as_deref()).context("failed to load breath configuration")
}

fn parse_key(chakra: &str, level: &str) -> Result<(ChakraId, ExperienceLevel)> {
    let chakra = chakra.parse::<ChakraId>()?;
    let level = level.parse::<ExperienceLevel>()?;
    Ok((chakra, level))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Cycle {
            chakra,
            level,
            no_holds,
        } => cmd_cycle(&cli, chakra, level, !no_holds),
        Commands::Session {
            chakra,
            level,
            minutes,
            cycles,
            no_holds,
            time_scale,
        } => {
            cmd_session(&cli, chakra, level, *minutes, *cycles, !no_holds, *time_scale).await
        }
        Commands::Layout {
            width,
            height,
            image_top,
            image_height,
            image_width,
        } => cmd_layout(&cli, *width, *height, *image_top, *image_height, *image_width),
        Commands::Validate => cmd_validate(&cli),
        Commands::Chakras => cmd_chakras(),
    }
}

fn cmd_cycle(cli: &Cli, chakra: &str, level: &str, include_holds: bool) -> Result<()> {
    let loaded = open_config(cli)?;
    let (chakra, level) = parse_key(chakra, level)?;
    let cfg = loaded.config.require(chakra, level)?;
    let cycle = build_cycle(cfg, include_holds);

    println!(
        "{} ({level}), ratio {}, holds {}",
        chakra.label(),
        cfg.breath_ratio,
        if include_holds { "on" } else { "off" }
    );
    for phase in cycle.phases() {
        println!(
            "  {:<12} {:>5.1}s  {:<4}  cue {}",
            phase.name.as_str(),
            phase.duration,
            phase.direction.as_str(),
            cfg.ui.count_cues.get(phase.name)
        );
    }
    println!("cycle: {:.1}s", cycle.length());
    for preset in &cfg.presets {
        println!("  {} min: {} cycles", preset.minutes, preset.cycles);
    }
    Ok(())
}

async fn cmd_session(
    cli: &Cli,
    chakra: &str,
    level: &str,
    minutes: Option<f64>,
    cycles: Option<u32>,
    include_holds: bool,
    time_scale: f64,
) -> Result<()> {
    if !(time_scale.is_finite() && time_scale > 0.0) {
        bail!("--time-scale must be a positive number, got {time_scale}");
    }
    let loaded = open_config(cli)?;
    let (chakra, level) = parse_key(chakra, level)?;
    let cfg = loaded.config.require(chakra, level)?;
    let cycle = build_cycle(cfg, include_holds);

    let total_seconds = match (minutes, cycles) {
        (_, Some(n)) => cfg.session_seconds(n, include_holds),
        (Some(m), None) if m > 0.0 => m * 60.0,
        (Some(m), None) => bail!("--minutes must be positive, got {m}"),
        (None, None) => DEFAULT_MINUTES * 60.0,
    };

    println!(
        "{} ({level}): {:.1}s cycle, {:.0}s session",
        chakra.label(),
        cycle.length(),
        total_seconds
    );
    run_session(
        cycle,
        SessionOptions {
            total_seconds,
            time_scale,
            verbose: cli.verbose,
        },
    )
    .await?;
    Ok(())
}

/// Fixed measurements supplied on the command line.
struct StaticFigure {
    container: Rect,
    image: Option<Rect>,
}

impl FigureHost for StaticFigure {
    fn container(&self) -> Option<Rect> {
        Some(self.container)
    }

    fn figure_image(&self) -> Option<Rect> {
        self.image
    }
}

fn cmd_layout(
    cli: &Cli,
    width: f64,
    height: f64,
    image_top: Option<f64>,
    image_height: Option<f64>,
    image_width: Option<f64>,
) -> Result<()> {
    let host = StaticFigure {
        container: Rect::new(0.0, 0.0, width, height),
        image: image_height.map(|h| {
            Rect::new(
                0.0,
                image_top.unwrap_or(0.0),
                image_width.unwrap_or(width),
                h,
            )
        }),
    };
    let mut engine = LayoutEngine::new();
    if cli.verbose {
        engine = engine.with_diagnostics(Box::new(TracingDiagnostics));
    }
    let geometry = engine.refresh(&host, LayoutTrigger::Mount);
    let json = serde_json::to_string_pretty(geometry).context("failed to serialize layout")?;
    println!("{json}");
    Ok(())
}

#[derive(Serialize)]
struct LevelSummary {
    chakra: ChakraId,
    level: ExperienceLevel,
    ratio: String,
    cycle_seconds: f64,
}

fn cmd_validate(cli: &Cli) -> Result<()> {
    let loaded = open_config(cli)?;
    println!("config: {}", loaded.source);
    println!("levels: {}", loaded.config.len());
    let summaries: Vec<LevelSummary> = loaded
        .config
        .iter()
        .map(|(chakra, level, cfg)| LevelSummary {
            chakra,
            level,
            ratio: cfg.breath_ratio.clone(),
            cycle_seconds: cfg.cycle_length_seconds,
        })
        .collect();
    for s in &summaries {
        println!(
            "  {:<13} {:<13} {:<10} {:>4.0}s",
            s.chakra.as_str(),
            s.level.as_str(),
            s.ratio,
            s.cycle_seconds
        );
    }
    if cli.verbose {
        let json = serde_json::to_string(&summaries).context("failed to serialize summary")?;
        tracing::debug!("{json}");
    }
    println!("ok");
    Ok(())
}

fn cmd_chakras() -> Result<()> {
    for anchor in chakra_positions() {
        println!(
            "{:<13} {:<13} x={:.2} y={:.2}",
            anchor.id.as_str(),
            anchor.id.label(),
            anchor.x,
            anchor.y
        );
    }
    let range = spine_range();
    println!("spine: {:.2}..{:.2}", range.top, range.bottom);
    Ok(())
}

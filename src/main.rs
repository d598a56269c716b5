//! inviewport - Entry Point

use clap::Parser;
use inviewport::model::AppError;
use inviewport::visibility::{Dimension, ScrollSweep, ZeroExtentPolicy};
use std::path::PathBuf;
use tracing::info;

/// Report how much of an element is visible inside a scrollable viewport
#[derive(Parser, Debug)]
#[command(name = "inviewport")]
#[command(version)]
#[command(about = "Report how much of an element is visible inside a scrollable viewport")]
pub struct Args {
    /// Path to scene JSON (reads from stdin if not provided)
    pub scene: Option<PathBuf>,

    /// Dimension to check: vertical, horizontal or both (unknown names fall back to vertical)
    #[arg(short, long)]
    pub dimension: Option<String>,

    /// Override the viewport's vertical scroll offset
    #[arg(long, allow_negative_numbers = true)]
    pub scroll_top: Option<f64>,

    /// Override the viewport's horizontal scroll offset
    #[arg(long, allow_negative_numbers = true)]
    pub scroll_left: Option<f64>,

    /// Re-check at each scroll offset in FROM:TO:STEP and print one JSON line per offset
    #[arg(long, allow_hyphen_values = true)]
    pub sweep: Option<ScrollSweep>,

    /// How to report ratios whose denominator is zero
    #[arg(long, value_enum)]
    pub zero_extent: Option<ZeroExtentPolicy>,

    /// Pretty-print the result record
    #[arg(short, long)]
    pub pretty: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    run(args)?;
    Ok(())
}

fn run(args: Args) -> Result<(), AppError> {
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = inviewport::config::load_config_with_precedence(args.config.clone())?;
        let merged = inviewport::config::merge_config(config_file);
        let with_env = inviewport::config::apply_env_overrides(merged);
        let pretty_override = if args.pretty { Some(true) } else { None };
        inviewport::config::apply_cli_overrides(
            with_env,
            args.dimension.clone(),
            args.zero_extent,
            pretty_override,
        )
    };

    inviewport::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let source = inviewport::source::detect_input_source(args.scene.clone())?;
    let mut scene = source.read_scene()?;

    if args.scroll_top.is_some() || args.scroll_left.is_some() {
        scene.scroll_viewport_to(args.scroll_top, args.scroll_left);
    }

    // An explicit flag beats the scene's own request; the scene beats config
    let dimension = match (&args.dimension, &scene.dimension) {
        (Some(_), _) => config.dimension,
        (None, Some(name)) => Dimension::from_name(Some(name.as_str())),
        (None, None) => config.dimension,
    };

    let check = scene
        .check()
        .dimension(dimension)
        .zero_extent(config.zero_extent);

    let stdout = std::io::stdout().lock();

    match args.sweep {
        Some(sweep) => {
            let measurements = check.measure(&scene)?;
            let frames = sweep.frames(&measurements, dimension, config.zero_extent);
            let written = inviewport::output::write_frames(stdout, frames)?;
            info!(frames = written, %dimension, "Sweep evaluated");
        }
        None => {
            let result = check.run(&scene)?;
            info!(
                %dimension,
                visible = result.visible(),
                percent_visible = result.percent_visible(),
                "Visibility evaluated"
            );
            inviewport::output::write_record(stdout, &result, config.pretty)?;
        }
    }

    Ok(())
}

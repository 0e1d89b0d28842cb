//! Map segment renderer.
//!
//! Reads grids and tiles from a map database and writes one PNG per segment,
//! colored either by tile type or by height.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use map_common::RenderKind;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use map_render::config::{parse_input_file, parse_output_dir};
use map_render::{run, RenderConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum KindArg {
    /// Color cells by tile type
    Tiles,
    /// Color cells by normalized height
    Heights,
}

impl From<KindArg> for RenderKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Tiles => RenderKind::Tiles,
            KindArg::Heights => RenderKind::Heights,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "map-render", version)]
#[command(about = "Render map segments from a map database into PNG images")]
struct Args {
    /// Map database file
    #[arg(value_name = "PATH", value_parser = parse_input_file)]
    input: PathBuf,

    /// Output directory (created if missing)
    #[arg(short, long, default_value = ".", value_parser = parse_output_dir)]
    output: PathBuf,

    /// What to render
    #[arg(short, long, value_enum, default_value_t = KindArg::Tiles)]
    kind: KindArg,

    /// Only render this segment (repeatable)
    #[arg(short, long = "segment", value_name = "ID", allow_negative_numbers = true)]
    segments: Vec<i64>,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_tracing(args.log_level.into(), args.json_logs)?;

    let config = RenderConfig::new(args.input, args.output, args.kind.into())
        .with_segments(args.segments);

    info!(
        input = %config.input.display(),
        output = %config.output_dir.display(),
        kind = %config.kind,
        "Starting map render"
    );

    let summary = run(&config).await?;

    info!(
        images = summary.images_written(),
        missing_tiles = summary.missing_tiles(),
        "Map render complete"
    );

    Ok(())
}

fn init_tracing(level: Level, json: bool) -> Result<()> {
    let builder = FmtSubscriber::builder().with_max_level(level).with_target(true);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }

    Ok(())
}

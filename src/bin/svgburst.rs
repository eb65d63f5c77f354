use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use svgburst::{
    Background, BurstField, BurstRecord, ExportSettings, ExportTarget, FrameSnapshot, Generated,
    InMemorySink, MovSink, MovSinkOpts, Rgba8, StepMode, SvgBurstError, generate, validate,
};

#[derive(Parser, Debug)]
#[command(name = "svgburst", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Merge SVG frames into one animated SVG.
    Assemble(ExportArgs),
    /// Synchronize and validate a burst record, printed as JSON.
    Burst(BurstArgs),
    /// Rasterize the first frame to a PNG.
    Still(ExportArgs),
    /// Encode frames into a MOV with alpha (requires `ffmpeg` on PATH).
    Video(VideoArgs),
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Frame SVG files, in playback order.
    #[arg(required = true)]
    frames: Vec<PathBuf>,

    /// Output path.
    #[arg(long)]
    out: PathBuf,

    /// Export settings JSON; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Milliseconds each frame is shown.
    #[arg(long)]
    interval_ms: Option<f64>,

    /// Background color (`#rrggbb`, `#rrggbbaa`) or `transparent`.
    #[arg(long)]
    background: Option<String>,

    /// Raster width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Raster height in pixels.
    #[arg(long)]
    height: Option<u32>,
}

#[derive(Parser, Debug)]
struct VideoArgs {
    #[command(flatten)]
    export: ExportArgs,

    /// Fail instead of overwriting an existing output.
    #[arg(long, default_value_t = false)]
    no_overwrite: bool,
}

#[derive(Parser, Debug)]
struct BurstArgs {
    /// Burst record JSON; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Slider being swept.
    #[arg(long)]
    slider: Option<String>,

    /// Step mode: `manual_step` or `auto_step`.
    #[arg(long)]
    mode: Option<String>,

    /// Lower sweep bound.
    #[arg(long, allow_hyphen_values = true)]
    min: Option<f64>,

    /// Upper sweep bound.
    #[arg(long, allow_hyphen_values = true)]
    max: Option<f64>,

    /// Slider step (manual step mode).
    #[arg(long)]
    step: Option<f64>,

    /// Milliseconds per frame (manual step mode).
    #[arg(long)]
    interval: Option<f64>,

    /// Frames per second (auto step mode).
    #[arg(long)]
    fps: Option<f64>,

    /// Total milliseconds (auto step mode).
    #[arg(long)]
    duration: Option<f64>,
}

#[derive(Serialize)]
struct BurstReportJson {
    record: BurstRecord,
    invalid: BTreeSet<BurstField>,
    sweep_values: usize,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Assemble(args) => cmd_assemble(args),
        Command::Burst(args) => cmd_burst(args),
        Command::Still(args) => cmd_still(args),
        Command::Video(args) => cmd_video(args),
    }
}

fn export_settings(args: &ExportArgs) -> anyhow::Result<ExportSettings> {
    let mut settings = match &args.config {
        Some(path) => ExportSettings::from_path(path)?,
        None => ExportSettings::default(),
    };
    if let Some(interval_ms) = args.interval_ms {
        settings.interval_ms = interval_ms;
    }
    if let Some(bg) = &args.background {
        settings.background = if bg.eq_ignore_ascii_case("transparent") {
            Background::Transparent
        } else {
            Background::Opaque(Rgba8::parse_hex(bg)?)
        };
    }
    if args.width.is_some() {
        settings.width = args.width;
    }
    if args.height.is_some() {
        settings.height = args.height;
    }
    Ok(settings)
}

fn read_frames(paths: &[PathBuf]) -> anyhow::Result<FrameSnapshot> {
    let documents = paths
        .iter()
        .map(|p| {
            std::fs::read_to_string(p).with_context(|| format!("read frame '{}'", p.display()))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(FrameSnapshot::from_documents(documents))
}

fn write_output(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    svgburst::ensure_parent_dir(path)?;
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

/// Log the detailed error and surface the user notice.
fn notice(err: SvgBurstError) -> anyhow::Error {
    tracing::warn!(error = %err, "generation failed");
    anyhow::anyhow!(err.user_message())
}

fn cmd_assemble(args: ExportArgs) -> anyhow::Result<()> {
    let settings = export_settings(&args)?;
    let snapshot = read_frames(&args.frames)?;
    match generate(&snapshot, &settings, ExportTarget::Svg, |_| {}).map_err(notice)? {
        Generated::Svg(svg) => write_output(&args.out, svg.as_bytes()),
        other => anyhow::bail!("unexpected output for svg export: {other:?}"),
    }
}

fn cmd_still(args: ExportArgs) -> anyhow::Result<()> {
    let settings = export_settings(&args)?;
    let snapshot = read_frames(&args.frames[..1])?;
    let mut sink = InMemorySink::new();
    match generate(&snapshot, &settings, ExportTarget::Raster(&mut sink), |_| {})
        .map_err(notice)?
    {
        Generated::Png(png) => write_output(&args.out, &png),
        other => anyhow::bail!("unexpected output for png export: {other:?}"),
    }
}

fn cmd_video(args: VideoArgs) -> anyhow::Result<()> {
    let settings = export_settings(&args.export)?;
    let snapshot = read_frames(&args.export.frames)?;
    if snapshot.len() < 2 {
        anyhow::bail!("video export needs at least two frames; use `still` for one");
    }

    let mut sink = MovSink::new(MovSinkOpts {
        out_path: args.export.out.clone(),
        overwrite: !args.no_overwrite,
    });
    generate(&snapshot, &settings, ExportTarget::Raster(&mut sink), |p| {
        tracing::debug!(progress = p, "encoding");
    })
    .map_err(notice)?;
    eprintln!("wrote {}", args.export.out.display());
    Ok(())
}

fn cmd_burst(args: BurstArgs) -> anyhow::Result<()> {
    let mut record = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("read burst record '{}'", path.display()))?;
            serde_json::from_str::<BurstRecord>(&text)
                .with_context(|| format!("parse burst record '{}'", path.display()))?
        }
        None => BurstRecord::default(),
    };

    if let Some(mode) = &args.mode {
        let mode: StepMode = serde_json::from_value(serde_json::Value::String(mode.clone()))
            .with_context(|| format!("unknown step mode '{mode}'"))?;
        record.set_mode(mode);
    }
    if let Some(slider) = &args.slider {
        record.select_slider(Some(svgburst::SliderRef(slider.clone())));
    }
    let edits = [
        (BurstField::Min, args.min),
        (BurstField::Max, args.max),
        (BurstField::Step, args.step),
        (BurstField::Interval, args.interval),
        (BurstField::Fps, args.fps),
        (BurstField::Duration, args.duration),
    ];
    for (field, value) in edits {
        if let Some(value) = value {
            record.set(field, value);
        }
    }

    let record = record.normalized();
    let invalid = validate(&record);
    let sweep_values = if invalid.is_empty() {
        record.sweep_values().count()
    } else {
        0
    };
    let report = BurstReportJson {
        record,
        invalid,
        sweep_values,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

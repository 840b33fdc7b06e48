use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use zodiac_reel::{
    ContentData, FfmpegSink, FfmpegSinkOpts, FrameIndex, FrameRange, PngSequenceSink, ReelAssets,
    ReelConfig, ReelSession,
};

#[derive(Parser, Debug)]
#[command(name = "zodiac-reel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame at a time offset as a PNG.
    Frame(FrameArgs),
    /// Render the whole reel as an MP4 (requires `ffmpeg`).
    Render(RenderArgs),
    /// Write a PNG sequence, optionally muxed into an MP4 afterwards.
    Frames(FramesArgs),
    /// Play the reel in real time and encode what the clock produces.
    Record(RecordArgs),
    /// Print the resolved schedule as JSON.
    Schedule(ScheduleArgs),
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Daily content JSON (date plus three zodiacs).
    #[arg(long)]
    content: PathBuf,

    /// Directory with `signs/` and `decor/` images.
    #[arg(long)]
    assets: Option<PathBuf>,

    /// TTF/OTF font used for every text element.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Configuration JSON; omitted values keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the capture frame rate (frames per second).
    #[arg(long)]
    fps: Option<u32>,

    /// Override the per-sign hold duration in seconds.
    #[arg(long)]
    hold: Option<f64>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Time offset in seconds.
    #[arg(long, default_value_t = 0.0)]
    at: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    /// First frame (inclusive).
    #[arg(long)]
    start: Option<u64>,

    /// Last frame (exclusive).
    #[arg(long)]
    end: Option<u64>,

    /// Fail instead of replacing an existing output file.
    #[arg(long)]
    no_overwrite: bool,
}

#[derive(Args, Debug)]
struct FramesArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Output directory for `frame_NNNNNN.png`.
    #[arg(long)]
    dir: PathBuf,

    /// Mux the sequence into this MP4 after writing it.
    #[arg(long)]
    mux: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RecordArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Directory receiving the timestamped recording.
    #[arg(long, default_value = "recordings")]
    dir: PathBuf,

    /// Override the wall-clock ceiling in seconds.
    #[arg(long)]
    ceiling: Option<f64>,
}

#[derive(Args, Debug)]
struct ScheduleArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Write the JSON here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Record(args) => cmd_record(args),
        Command::Schedule(args) => cmd_schedule(args),
    }
}

fn load_config(common: &CommonArgs) -> anyhow::Result<ReelConfig> {
    let mut cfg = match &common.config {
        Some(path) => ReelConfig::from_path(path)?,
        None => ReelConfig::default(),
    };
    if let Some(fps) = common.fps {
        cfg.surface.fps = zodiac_reel::Fps::new(fps, 1)?;
    }
    if let Some(hold) = common.hold {
        cfg.timing.hold_duration = hold;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn load_assets(common: &CommonArgs) -> anyhow::Result<ReelAssets> {
    let assets = match &common.assets {
        Some(dir) => ReelAssets::load(dir, common.font.as_deref())?,
        None => match &common.font {
            Some(font) => {
                let bytes = std::fs::read(font)
                    .with_context(|| format!("read font '{}'", font.display()))?;
                ReelAssets::empty().with_font(bytes)
            }
            None => ReelAssets::empty(),
        },
    };
    if assets.font().is_none() {
        tracing::warn!("no font given; text elements will not be drawn");
    }
    Ok(assets)
}

fn open_session(common: &CommonArgs) -> anyhow::Result<ReelSession> {
    let content = ContentData::from_path(&common.content)?;
    let config = load_config(common)?;
    let assets = load_assets(common)?;
    Ok(ReelSession::new(&content, config, assets)?)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut session = open_session(&args.common)?;
    let frame = session.render_at(args.at)?;
    zodiac_reel::write_png(&args.out, &frame)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut session = open_session(&args.common)?;
    let range = FrameRange::new(
        FrameIndex(args.start.unwrap_or(0)),
        FrameIndex(args.end.unwrap_or_else(|| session.frame_count())),
    )?;
    let ffmpeg = session.config().capture.ffmpeg.clone();
    let mut opts = FfmpegSinkOpts::new(&args.out).with_program(ffmpeg);
    opts.overwrite = !args.no_overwrite;
    let mut sink = FfmpegSink::new(opts);
    let stats = session.render_range(range, &mut sink)?;
    eprintln!(
        "wrote {} ({} frames)",
        args.out.display(),
        stats.frames_pushed
    );
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let mut session = open_session(&args.common)?;
    let mut sink = PngSequenceSink::new(&args.dir);
    let stats = session.render_all(&mut sink)?;
    eprintln!(
        "wrote {} frames to {}",
        stats.frames_pushed,
        args.dir.display()
    );
    if let Some(out) = &args.mux {
        let cfg = session.sink_config();
        zodiac_reel::mux_png_sequence(
            &args.dir,
            cfg.fps,
            (cfg.width, cfg.height),
            out,
            &session.config().capture.ffmpeg,
        )?;
        eprintln!("wrote {}", out.display());
    }
    Ok(())
}

fn cmd_record(args: RecordArgs) -> anyhow::Result<()> {
    let mut config = load_config(&args.common)?;
    if let Some(ceiling) = args.ceiling {
        config.capture.live_ceiling_secs = ceiling;
        config.validate()?;
    }
    let content = ContentData::from_path(&args.common.content)?;
    let assets = load_assets(&args.common)?;
    let mut session = ReelSession::new(&content, config, assets)?;

    let out = zodiac_reel::live_artifact_path(&args.dir);
    let sink = FfmpegSink::new(
        FfmpegSinkOpts::new(&out).with_program(session.config().capture.ffmpeg.clone()),
    );
    let (report, _sink) = session.record_live(sink)?;
    eprintln!(
        "wrote {} ({} frames in {:.1}s{})",
        out.display(),
        report.frames,
        report.elapsed_secs,
        if report.hit_ceiling {
            ", stopped at ceiling"
        } else {
            ""
        }
    );
    Ok(())
}

fn cmd_schedule(args: ScheduleArgs) -> anyhow::Result<()> {
    let mut session = open_session(&args.common)?;
    let schedule = session.schedule()?;
    let json = serde_json::to_string_pretty(&schedule).context("serialize schedule")?;
    match &args.out {
        Some(path) => write_text(path, &json)?,
        None => println!("{json}"),
    }
    Ok(())
}

fn write_text(path: &Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, text).with_context(|| format!("write '{}'", path.display()))
}

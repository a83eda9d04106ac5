use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use captionreel::{
    CaptionConfig, CueSource, Fps, PngSequenceSink, ReelConfig, RenderThreading, ResizeFilter,
};

#[derive(Parser, Debug)]
#[command(name = "captionreel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resize a folder of bitmaps into numbered square PNGs.
    Resize(ResizeArgs),
    /// Render glowing caption frames as numbered PNGs.
    Captions(CaptionsArgs),
    /// Print the caption plan as JSON without rasterizing.
    Plan(PlanArgs),
}

#[derive(Parser, Debug)]
struct ResizeArgs {
    /// JSON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Source directory.
    #[arg(long)]
    src: Option<PathBuf>,

    /// Output directory.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Side length of the square output in pixels.
    #[arg(long)]
    size: Option<u32>,

    /// Input file extension.
    #[arg(long)]
    ext: Option<String>,

    /// Resampling filter.
    #[arg(long, value_enum)]
    filter: Option<ResizeFilter>,
}

#[derive(Parser, Debug)]
struct TimingArgs {
    /// JSON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Transcript text file (defaults to the built-in lyric).
    #[arg(long)]
    lyrics: Option<PathBuf>,

    /// Cue list file, one timestamp per token.
    #[arg(long)]
    cues: Option<PathBuf>,

    /// Simulated frames per second.
    #[arg(long)]
    fps: Option<u32>,
}

#[derive(Parser, Debug)]
struct CaptionsArgs {
    #[command(flatten)]
    timing: TimingArgs,

    /// Font file used to draw captions.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Output directory.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Rasterize frames on a thread pool.
    #[arg(long)]
    parallel: bool,

    /// Worker thread count (implies `--parallel`).
    #[arg(long)]
    threads: Option<usize>,

    /// Frames per scheduling chunk.
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    #[command(flatten)]
    timing: TimingArgs,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Resize(args) => cmd_resize(args),
        Command::Captions(args) => cmd_captions(args),
        Command::Plan(args) => cmd_plan(args),
    }
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "captionreel=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ReelConfig> {
    match path {
        Some(p) => {
            ReelConfig::from_path(p).with_context(|| format!("load config '{}'", p.display()))
        }
        None => Ok(ReelConfig::default()),
    }
}

fn cmd_resize(args: ResizeArgs) -> anyhow::Result<()> {
    let mut opts = load_config(args.config.as_deref())?.resize;
    if let Some(src) = args.src {
        opts.src_dir = src;
    }
    if let Some(out) = args.out {
        opts.out_dir = out;
    }
    if let Some(side) = args.size {
        opts.size = captionreel::Canvas::square(side);
    }
    if let Some(ext) = args.ext {
        opts.extension = ext;
    }
    if let Some(filter) = args.filter {
        opts.filter = filter;
    }

    let report = captionreel::resize_directory(&opts)
        .with_context(|| format!("resize images from '{}'", opts.src_dir.display()))?;
    eprintln!(
        "wrote {} images to {}",
        report.converted.len(),
        opts.out_dir.display()
    );
    Ok(())
}

fn caption_config(timing: &TimingArgs) -> anyhow::Result<CaptionConfig> {
    let mut cfg = load_config(timing.config.as_deref())?.captions;
    if let Some(lyrics) = &timing.lyrics {
        cfg.lyrics_path = Some(lyrics.clone());
    }
    if let Some(cues) = &timing.cues {
        cfg.cues = CueSource::ListFile { path: cues.clone() };
    }
    if let Some(fps) = timing.fps {
        cfg.fps = Fps::new(fps, 1)?;
    }
    Ok(cfg)
}

fn cmd_captions(args: CaptionsArgs) -> anyhow::Result<()> {
    let mut cfg = caption_config(&args.timing)?;
    if let Some(font) = args.font {
        cfg.font_path = font;
    }
    if let Some(out) = args.out {
        cfg.out_dir = out;
    }

    let job = cfg.to_job().context("prepare caption job")?;
    let threading = RenderThreading {
        parallel: args.parallel || args.threads.is_some(),
        chunk_size: args.chunk_size,
        threads: args.threads,
    };

    let mut sink = PngSequenceSink::with_digits(&cfg.out_dir, cfg.digits);
    let stats = captionreel::render_captions(&job, &mut sink, &threading)
        .context("render caption frames")?;

    eprintln!(
        "wrote {} frames to {} ({} rasterized, {} simulated)",
        stats.cues_consumed,
        cfg.out_dir.display(),
        stats.frames_rasterized,
        stats.frames_simulated
    );
    Ok(())
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let cfg = caption_config(&args.timing)?;
    let job = cfg.to_job().context("prepare caption job")?;
    job.validate()?;
    let plan = captionreel::plan_captions(&job.transcript, &job.cues, job.fps)?;

    let stdout = std::io::stdout();
    serde_json::to_writer_pretty(stdout.lock(), &plan).context("write plan JSON")?;
    println!();
    Ok(())
}

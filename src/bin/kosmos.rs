use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "kosmos", version)]
struct Cli {
    /// Log at DEBUG instead of INFO.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the intro at one instant as a PNG.
    Frame(FrameArgs),
    /// Render the whole intro as numbered PNGs.
    Sequence(SequenceArgs),
    /// Print the default configuration as JSON.
    Config,
}

#[derive(Args, Debug)]
struct SessionArgs {
    /// Intro configuration JSON; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Viewport width in pixels.
    #[arg(long, default_value_t = 960)]
    width: u32,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 540)]
    height: u32,

    /// Simulated display refresh rate.
    #[arg(long, default_value_t = 60.0)]
    fps: f64,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    session: SessionArgs,

    /// Instant to render, in milliseconds from the start.
    #[arg(long)]
    at_ms: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct SequenceArgs {
    #[command(flatten)]
    session: SessionArgs,

    /// Output directory for `frame_NNNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,

    /// Write every k-th frame.
    #[arg(long, default_value_t = 1)]
    every: u32,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Sequence(args) => cmd_sequence(args),
        Command::Config => cmd_config(),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn open_session(args: &SessionArgs) -> anyhow::Result<kosmos::IntroSession> {
    let config = match &args.config {
        Some(path) => kosmos::IntroConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => kosmos::IntroConfig::default(),
    };
    if !(args.fps.is_finite() && args.fps > 0.0) {
        anyhow::bail!("--fps must be a positive number");
    }
    let session =
        kosmos::IntroSession::new(config, kosmos::Viewport::new(args.width, args.height))
            .context("create intro session")?;
    Ok(session)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    if !(args.at_ms.is_finite() && args.at_ms >= 0.0) {
        anyhow::bail!("--at-ms must be a non-negative number");
    }
    let mut session = open_session(&args.session)?;
    let dt = 1000.0 / args.session.fps;

    let mut elapsed = 0.0;
    session.tick(0.0);
    while elapsed + dt <= args.at_ms {
        session.tick(dt);
        elapsed += dt;
    }
    if args.at_ms > elapsed {
        session.tick(args.at_ms - elapsed);
    }

    let frame = session
        .render()
        .context("render frame")?
        .context("viewport is empty; nothing to render")?;
    write_png(&args.out, &frame)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_sequence(args: SequenceArgs) -> anyhow::Result<()> {
    let mut session = open_session(&args.session)?;
    let dt = 1000.0 / args.session.fps;
    let every = args.every.max(1);

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let mut written = 0u32;
    for index in 0u32.. {
        let outcome = session.tick(if index == 0 { 0.0 } else { dt });
        if index % every == 0 {
            let frame = session
                .render()
                .context("render frame")?
                .context("viewport is empty; nothing to render")?;
            let path = args.out_dir.join(format!("frame_{index:05}.png"));
            write_png(&path, &frame)?;
            written += 1;
        }
        if !matches!(outcome, kosmos::FrameOutcome::Advanced(_)) {
            break;
        }
    }

    eprintln!("wrote {written} frames to {}", args.out_dir.display());
    Ok(())
}

fn cmd_config() -> anyhow::Result<()> {
    let json = kosmos::IntroConfig::default()
        .to_json_pretty()
        .context("encode default config")?;
    println!("{json}");
    Ok(())
}

fn write_png(path: &Path, frame: &kosmos::FrameRGBA) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        path,
        &frame.to_straight_rgba(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}

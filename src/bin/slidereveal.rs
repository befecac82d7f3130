use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

use slidereveal::{
    FrameIndex, Orchestrator, OrchestratorOpts, PORTRAIT_COMPOSITION_ID, RenderBundle, RenderMode,
    RenderOpts, SceneDescription,
};

#[derive(Parser, Debug)]
#[command(name = "slidereveal", version)]
struct Cli {
    /// Log debug events to stderr.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render an MP4 video (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Serve `POST /api/render` over HTTP.
    Serve(ServeArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Composition id.
    #[arg(long, default_value = PORTRAIT_COMPOSITION_ID)]
    composition: String,
}

#[derive(Args, Debug)]
struct ModeArgs {
    /// Render in this worker executable (default: `slidereveal-worker` next to this binary).
    #[arg(long, conflicts_with = "in_process")]
    worker: Option<PathBuf>,

    /// Render inside this process.
    #[arg(long)]
    in_process: bool,

    /// Parent directory for per-render scratch directories.
    #[arg(long)]
    scratch_root: Option<PathBuf>,

    /// Override rayon worker threads (in-process mode).
    #[arg(long)]
    threads: Option<usize>,

    /// Frames rendered in parallel per chunk (in-process mode).
    #[arg(long, default_value_t = 16)]
    chunk_size: u64,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    /// Composition id.
    #[arg(long, default_value = PORTRAIT_COMPOSITION_ID)]
    composition: String,

    #[command(flatten)]
    mode: ModeArgs,
}

#[derive(Parser, Debug)]
struct ServeArgs {
    /// Listen address.
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: String,

    /// Composition id.
    #[arg(long, default_value = PORTRAIT_COMPOSITION_ID)]
    composition: String,

    /// Directory relative image/audio paths in requests resolve against.
    #[arg(long, default_value = ".")]
    assets_root: PathBuf,

    #[command(flatten)]
    mode: ModeArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
        Command::Serve(args) => cmd_serve(args),
    }
}

fn assets_root_of(in_path: &Path) -> PathBuf {
    in_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf()
}

fn orchestrator_opts(mode: ModeArgs, composition: String, assets_root: PathBuf) -> OrchestratorOpts {
    let render_mode = if mode.in_process {
        RenderMode::InProcess
    } else {
        match mode.worker.or_else(sibling_worker) {
            Some(exe) => RenderMode::IsolatedWorker { exe },
            None => RenderMode::InProcess,
        }
    };
    OrchestratorOpts {
        mode: render_mode,
        composition_id: composition,
        scratch_root: mode.scratch_root,
        assets_root,
        render: RenderOpts {
            chunk_size: mode.chunk_size,
            threads: mode.threads,
        },
        ..OrchestratorOpts::default()
    }
}

fn sibling_worker() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    let worker = exe.with_file_name(format!(
        "slidereveal-worker{}",
        std::env::consts::EXE_SUFFIX
    ));
    worker.is_file().then_some(worker)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let scene = SceneDescription::from_path(&args.in_path)?;
    let session = RenderBundle::load().session(
        &args.composition,
        scene,
        &assets_root_of(&args.in_path),
    )?;
    let frame = session.render_frame(FrameIndex(args.frame))?;
    frame.save_png(&args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let scene = SceneDescription::from_path(&args.in_path)?;
    let opts = orchestrator_opts(args.mode, args.composition, assets_root_of(&args.in_path));
    tracing::info!(mode = ?opts.mode, "rendering");
    let video = Orchestrator::new(opts).export(&scene)?;

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, &video.bytes)
        .with_context(|| format!("write video '{}'", args.out.display()))?;

    eprintln!("wrote {} ({} bytes)", args.out.display(), video.bytes.len());
    Ok(())
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let opts = orchestrator_opts(args.mode, args.composition, args.assets_root);
    tracing::info!(mode = ?opts.mode, "starting export server");
    slidereveal::server::http::serve(&args.addr, Arc::new(Orchestrator::new(opts)))?;
    Ok(())
}

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser;

use slidereveal::{
    PORTRAIT_COMPOSITION_ID, RenderBundle, RenderOpts, RevealError, RevealResult,
    SceneDescription, WorkerResponse,
};

/// Isolated render worker: renders one scene payload to an MP4 next to the payload.
///
/// Stdout carries exactly one JSON response line; logs go to stderr.
#[derive(Parser, Debug)]
#[command(name = "slidereveal-worker", version)]
struct Cli {
    /// Scene payload JSON.
    payload: PathBuf,

    /// Output file name, created in the payload's directory.
    file_name: String,

    /// Composition id.
    #[arg(long, default_value = PORTRAIT_COMPOSITION_ID)]
    composition: String,

    /// Directory relative image/audio paths resolve against (default: the payload's directory).
    #[arg(long)]
    assets_root: Option<PathBuf>,

    /// Override rayon worker threads.
    #[arg(long)]
    threads: Option<usize>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::INFO)
        .init();

    let response = match run(&cli) {
        Ok(output_path) => WorkerResponse::Ok { output_path },
        Err(e) => {
            eprintln!("slidereveal-worker: {e}");
            WorkerResponse::Error {
                message: e.to_string(),
            }
        }
    };
    let code = match response {
        WorkerResponse::Ok { .. } => ExitCode::SUCCESS,
        WorkerResponse::Error { .. } => ExitCode::from(1),
    };
    match response.to_line() {
        Ok(line) => println!("{line}"),
        Err(e) => {
            eprintln!("slidereveal-worker: {e}");
            return ExitCode::from(1);
        }
    }
    code
}

fn run(cli: &Cli) -> RevealResult<PathBuf> {
    if Path::new(&cli.file_name).file_name() != Some(std::ffi::OsStr::new(&cli.file_name)) {
        return Err(RevealError::invalid_payload(format!(
            "output file name '{}' must not contain a directory",
            cli.file_name
        )));
    }
    let payload = std::path::absolute(&cli.payload)
        .with_context(|| format!("resolve payload path '{}'", cli.payload.display()))?;
    let dir = payload
        .parent()
        .ok_or_else(|| RevealError::invalid_payload("payload has no parent directory"))?;
    let scene = SceneDescription::from_path(&payload)?;

    let out = dir.join(&cli.file_name);
    let assets_root = cli.assets_root.clone().unwrap_or_else(|| dir.to_path_buf());
    let opts = RenderOpts {
        threads: cli.threads,
        ..RenderOpts::default()
    };
    RenderBundle::load().render_media(&cli.composition, scene, &out, &assets_root, &opts)?;
    Ok(out)
}

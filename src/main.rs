// videodeck - terminal video catalog browser
// Loads a fixed catalog, then hands stdin/stdout to the command shell

use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use videodeck::{Config, Shell, VideoLibrary};

#[derive(Parser)]
#[command(name = "videodeck")]
#[command(about = "Browse a video catalog: playback control, playlists and search")]
struct Args {
    /// Catalog file to load (`title | id | #tag , #tag` lines, or a .json array)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Use this config file instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable developer logging (stderr + debug output)
    #[arg(long)]
    dev: bool,
}

fn init_logging(log_dir: &Path, dev: bool) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    // Daily rotating file appender, so log lines never mix with the shell output
    let file_appender = tracing_appender::rolling::daily(log_dir, "videodeck.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let default_filter = if dev { "debug" } else { "info,videodeck=debug" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_target(true)
        .with_level(true)
        .with_ansi(false);

    // Dev mode mirrors everything to stderr as well
    let stderr_layer = dev.then(|| fmt::layer().with_writer(io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()?;

    Ok(guard)
}

fn load_library(args: &Args, config: &Config) -> Result<VideoLibrary> {
    match args.catalog.as_ref().or(config.catalog_path.as_ref()) {
        Some(path) => VideoLibrary::load(path)
            .with_context(|| format!("Failed to load catalog {}", path.display())),
        None => Ok(VideoLibrary::builtin()?),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::load()?,
    };

    // Keep the guard alive so buffered log lines are flushed on exit
    let _guard = init_logging(&config.log_dir, args.dev)?;
    info!("videodeck starting up");

    let library = Arc::new(load_library(&args, &config)?);
    info!("Catalog ready with {} videos", library.len());

    if config.shell.show_banner {
        println!("Hello and welcome to videodeck, what would you like to do?");
        println!("    Enter HELP for list of available commands or EXIT to terminate.");
    }

    let mut shell = Shell::new(library).with_prompt(config.shell.prompt.clone());
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout().lock();
    shell.run(&mut input, &mut output)?;

    info!("videodeck shutting down");
    Ok(())
}

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;

use photo_postmortem::{config, pipeline};

#[derive(Parser, Debug)]
#[command(
    name = "photo-postmortem",
    version,
    about = "Extract camera, capture time, creator and focal length from images of any format"
)]
struct Cli {
    /// Image files or directories to process
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// Path to config file (default: config.json next to binary)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Initialize a default config.json and exit
    #[arg(long)]
    init: bool,

    /// Output results as JSON
    #[arg(long)]
    json: bool,

    /// Number of images to extract concurrently (default: available CPUs)
    #[arg(short, long, value_name = "N")]
    jobs: Option<usize>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Handle --init
    if cli.init {
        let config = config::Config::default();
        let path = cli.config.as_deref();
        config.save(path)?;
        let save_path = match path {
            Some(p) => p.to_path_buf(),
            None => config::Config::config_path()?,
        };
        println!("Default config written to {}", save_path.display());
        return Ok(());
    }

    if cli.paths.is_empty() {
        anyhow::bail!("No input files or directories specified. Use --help for usage.");
    }

    // Load config
    let mut config = config::Config::load(cli.config.as_deref())?;
    if cli.json {
        config.output.json = true;
    }

    let images = pipeline::collect_images(&cli.paths);
    if images.is_empty() {
        anyhow::bail!("No supported image files found in the specified paths.");
    }

    let extractor = Arc::new(pipeline::build_extractor(&config)?);
    let jobs = cli
        .jobs
        .unwrap_or_else(|| std::thread::available_parallelism().map_or(1, |n| n.get()))
        .max(1);

    log::info!("Found {} image(s) to process", images.len());
    log::info!("Reader chain: {}", extractor.reader_names().join(" → "));

    // Extractions block on file I/O; run them on the blocking pool, `jobs` at a time.
    let semaphore = Arc::new(Semaphore::new(jobs));
    let mut handles = Vec::with_capacity(images.len());
    for image_path in images.iter().cloned() {
        let permit = semaphore.clone().acquire_owned().await?;
        let extractor = extractor.clone();
        handles.push(tokio::task::spawn_blocking(move || {
            let report = pipeline::extract_image(&image_path, &extractor);
            drop(permit);
            report
        }));
    }

    let mut reports = Vec::with_capacity(handles.len());
    for handle in handles {
        reports.push(handle.await?);
    }

    let total = reports.len();
    if config.output.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for (i, report) in reports.iter().enumerate() {
            log::info!("[{}/{}] {}", i + 1, total, report.path.display());
            if let Some(ref err) = report.error {
                log::error!("  Error: {err}");
                continue;
            }
            if let Some(ref meta) = report.metadata {
                let show = |v: Option<String>| v.unwrap_or_else(|| "-".to_string());
                log::info!("  Camera:       {}", show(meta.camera().map(String::from)));
                log::info!("  Taken:        {}", show(meta.creation_time().map(|t| t.to_string())));
                log::info!("  Creator:      {}", show(meta.creator().map(String::from)));
                log::info!("  Focal length: {}", show(meta.focal_length().map(|f| format!("{f} mm"))));
            }
            if let Some(ref reader) = report.reader {
                log::info!("  Reader: {reader}");
            }
        }
    }

    // Summary
    let success = reports.iter().filter(|r| r.error.is_none()).count();
    let failed = total - success;
    log::info!("Done: {success} succeeded, {failed} failed out of {total} images");

    Ok(())
}

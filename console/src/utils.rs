use std::path::{
    Path,
    PathBuf,
};

use anyhow::bail;
use clap::Args;
use console::style;
use indicatif::{
    ProgressBar,
    ProgressStyle,
};
use cnvtad::prelude::AnnotationConfig;
use log::LevelFilter;

use crate::strings::utils as strings;

#[derive(Args, Debug, Clone)]
pub(crate) struct UtilsArgs {
    #[arg(long, help = strings::THREADS)]
    pub threads:  Option<usize>,
    #[arg(short, long, action = clap::ArgAction::Count, help = strings::VERBOSE)]
    pub verbose:  u8,
    #[arg(long, default_value_t = false, help = strings::PROGRESS)]
    pub progress: bool,
}

impl UtilsArgs {
    /// Sets up logging and the size of the annotation thread pool. Must
    /// run before any annotation, the pool reads `CNVTAD_NUM_THREADS` once.
    pub fn setup(&self) -> anyhow::Result<()> {
        init_logger(self.verbose);
        if let Some(threads) = self.threads {
            if threads == 0 {
                bail!("--threads must be at least 1");
            }
            std::env::set_var("CNVTAD_NUM_THREADS", threads.to_string());
        }
        Ok(())
    }

    /// Progress bar over `total` stages, if `--progress` was given.
    pub fn stages(
        &self,
        total: usize,
    ) -> anyhow::Result<Option<ProgressBar>> {
        if self.progress {
            Ok(Some(init_pbar(total)?))
        }
        else {
            Ok(None)
        }
    }
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let mut builder = pretty_env_logger::formatted_builder();
    builder.filter_level(level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    // A logger set up earlier in the process keeps its configuration.
    builder.try_init().ok();
}

pub fn init_pbar(total: usize) -> anyhow::Result<ProgressBar> {
    let progress_bar = ProgressBar::new(total as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}, ETA: {eta}] [{bar:40.cyan/blue}] {pos:>5.green}/{len:5} {msg}")?
            .progress_chars("#>-"),
    );
    progress_bar.set_message("Processing...");
    Ok(progress_bar)
}

/// Advances `pbar` (if any) and updates its message.
pub fn step(
    pbar: &Option<ProgressBar>,
    message: &str,
) {
    if let Some(pbar) = pbar {
        pbar.inc(1);
        pbar.set_message(message.to_string());
    }
}

pub fn finish(pbar: Option<ProgressBar>) {
    if let Some(pbar) = pbar {
        pbar.finish_and_clear();
    }
}

/// Fails if `path` exists and is not a regular file.
pub fn validate_output(path: &Path) -> anyhow::Result<PathBuf> {
    if path.is_dir() {
        eprintln!(
            "Output path {} is a directory.",
            style(path.display()).red()
        );
        bail!("Output path {} is a directory", path.display());
    }
    Ok(path.to_path_buf())
}

pub fn validate_dir(path: &Path) -> anyhow::Result<PathBuf> {
    if path.exists() && !path.is_dir() {
        eprintln!("Path {} is not a directory.", style(path.display()).red());
        bail!("Output path {} is not a directory", path.display());
    }
    std::fs::create_dir_all(path)?;
    Ok(path.to_path_buf())
}

/// Reads the JSON config at `path`, or the defaults if none is given.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<AnnotationConfig> {
    match path {
        Some(path) => {
            if !path.is_file() {
                eprintln!("Config {} does not exist.", style(path.display()).red());
                bail!("Config file {} not found", path.display());
            }
            let config = AnnotationConfig::from_json(std::fs::File::open(path)?)?;
            log::debug!("Using config {:?}", config);
            Ok(config)
        },
        None => Ok(AnnotationConfig::default()),
    }
}

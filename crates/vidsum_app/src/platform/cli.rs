use std::path::PathBuf;

use clap::Parser;

use super::config::CONFIG_FILENAME;
use super::logging::LogDestination;

/// Summarize YouTube videos in English and Hindi, fetch and upscale their thumbnails.
#[derive(Debug, Parser)]
#[command(name = "vidsum", version)]
pub struct Cli {
    /// RON configuration file; missing file means defaults.
    #[arg(long, default_value = CONFIG_FILENAME)]
    pub config: PathBuf,

    /// Backend base URL, e.g. http://localhost:5000.
    #[arg(long)]
    pub api_url: Option<String>,

    /// Directory for saved thumbnails.
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Where log lines go.
    #[arg(long, value_enum)]
    pub log: Option<LogDestination>,

    /// Video URL to submit right away.
    pub url: Option<String>,
}

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about = "Reconstruct the history of a bingo board snapshot")]
pub struct Args {
    /// Board snapshot to read (JSON)
    #[arg(long, value_name = "PATH")]
    pub board: PathBuf,

    /// Judge deadlines as of this instant (RFC 3339) instead of the current time
    #[arg(long, value_name = "TIMESTAMP")]
    pub now: Option<DateTime<Utc>>,

    /// Print groups as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Also print a summary of the board's current progress
    #[arg(long)]
    pub stats: bool,

    /// Directory for log files
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}

impl Args {
    /// Log directory: `--log-dir`, else the platform data directory, else `./logs`.
    pub fn resolved_log_dir(&self) -> PathBuf {
        if let Some(dir) = &self.log_dir {
            return dir.clone();
        }
        dirs::data_dir()
            .map(|mut path| {
                path.push("bingo-history");
                path.push("logs");
                path
            })
            .unwrap_or_else(|| PathBuf::from("logs"))
    }
}

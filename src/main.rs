use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::EnvFilter;

use bingo_history::{
    BoardStats,
    args::Args,
    load_board, reconstruct_history_at,
    render::{render_groups, render_stats},
};

fn main() -> Result<()> {
    let args = Args::parse();
    let _guard = init_logging(&args.resolved_log_dir())?;

    let board = load_board(&args.board)?;
    let now = args.now.unwrap_or_else(Utc::now);
    info!(
        "Reconstructing history for {} as of {}",
        args.board.display(),
        now
    );

    let groups = reconstruct_history_at(&board, now)
        .with_context(|| format!("failed to reconstruct history for {}", args.board.display()))?;
    info!("Reconstructed {} history groups", groups.len());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&groups)?);
    } else {
        print!("{}", render_groups(&groups, board.cells.len()));
    }

    if args.stats {
        let stats = BoardStats::from_board(&board)?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        } else {
            println!();
            print!("{}", render_stats(&stats));
        }
    }

    Ok(())
}

/// Log to a daily rolling file; `RUST_LOG` overrides the default `info` level.
fn init_logging(log_dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let appender = tracing_appender::rolling::daily(log_dir, "bingo-history.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(false)
        .with_writer(writer)
        .init();

    Ok(guard)
}

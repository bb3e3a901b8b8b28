//! CLI for qfetch, the resumable playlist mirroring tool.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use qfetch_core::{config, logging};
use std::path::PathBuf;

use commands::{
    check_exists_override, run_completions, run_fetch_job, run_reset, run_resolve, run_status,
    RunArgs,
};

/// Top-level CLI for qfetch.
#[derive(Debug, Parser)]
#[command(name = "qfetch")]
#[command(about = "qfetch: mirror HLS playlists and their segments into a content store", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/qfetch/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write logs to this file (truncated) instead of stdout.
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Mirror every playlist in a resource list into a bucket.
    Run {
        /// Job name; reruns with the same name resume from its progress.
        #[arg(long)]
        job: String,
        /// Resource list: one `URL` or `URL<TAB>KEY` per line.
        #[arg(long, value_name = "PATH")]
        list: PathBuf,
        /// Target bucket in the content store.
        #[arg(long)]
        bucket: String,
        /// Playlists processed concurrently (default: `workers` from config).
        #[arg(long, value_name = "N")]
        workers: Option<usize>,
        /// Stat each key before fetching and skip entries already stored.
        #[arg(long, conflicts_with = "no_check_exists")]
        check_exists: bool,
        /// Never stat before fetching, even if the config enables it.
        #[arg(long)]
        no_check_exists: bool,
        /// Store access key (overrides config).
        #[arg(long, env = "QFETCH_ACCESS_KEY", hide_env_values = true)]
        access_key: Option<String>,
        /// Store secret key (overrides config).
        #[arg(long, env = "QFETCH_SECRET_KEY", hide_env_values = true)]
        secret_key: Option<String>,
    },

    /// Show how many entries a job has recorded.
    Status {
        /// Job name.
        #[arg(long)]
        job: String,
    },

    /// Delete a job's progress so the next run starts over.
    Reset {
        /// Job name.
        #[arg(long)]
        job: String,
    },

    /// Download a playlist and print the segment keys and URLs it resolves to.
    Resolve {
        /// Playlist URL.
        url: String,
        /// Target key of the playlist (default: URL path without leading slash).
        #[arg(long)]
        key: Option<String>,
    },

    /// Print shell completions to stdout.
    Completions {
        /// Target shell.
        shell: clap_complete::Shell,
    },
}

impl Cli {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        // Completions go to stdout; keep log lines out of them.
        if let CliCommand::Completions { shell } = cli.command {
            return run_completions(shell);
        }

        logging::init_logging(cli.log_file.as_deref())?;

        let cfg = match &cli.config {
            Some(path) => config::load_from(path)?,
            None => config::load_or_init()?,
        };
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Run {
                job,
                list,
                bucket,
                workers,
                check_exists,
                no_check_exists,
                access_key,
                secret_key,
            } => {
                let args = RunArgs {
                    job,
                    list,
                    bucket,
                    workers,
                    check_exists: check_exists_override(check_exists, no_check_exists),
                    access_key,
                    secret_key,
                };
                run_fetch_job(&cfg, args).await?;
            }
            CliCommand::Status { job } => run_status(&cfg, &job).await?,
            CliCommand::Reset { job } => run_reset(&cfg, &job).await?,
            CliCommand::Resolve { url, key } => run_resolve(&cfg, &url, key.as_deref()).await?,
            CliCommand::Completions { .. } => unreachable!("handled before logging init"),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;

//! `qfetch run` – mirror a resource list into a bucket.

use anyhow::Result;
use qfetch_core::config::QfetchConfig;
use qfetch_core::content_store::QiniuStore;
use qfetch_core::mirror::{self, FetchOptions, WorkerPool};
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments of `qfetch run` after parsing.
#[derive(Debug)]
pub struct RunArgs {
    pub job: String,
    pub list: PathBuf,
    pub bucket: String,
    pub workers: Option<usize>,
    /// `Some` when set on the command line; overrides the config.
    pub check_exists: Option<bool>,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
}

/// `--check-exists` / `--no-check-exists` as an override of the config value.
pub fn check_exists_override(check_exists: bool, no_check_exists: bool) -> Option<bool> {
    match (check_exists, no_check_exists) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

pub async fn run_fetch_job(cfg: &QfetchConfig, args: RunArgs) -> Result<()> {
    let mut store_cfg = cfg.store.clone();
    if let Some(ak) = args.access_key {
        store_cfg.access_key = ak;
    }
    if let Some(sk) = args.secret_key {
        store_cfg.secret_key = sk;
    }
    let store = Arc::new(QiniuStore::new(&store_cfg, &cfg.http)?);

    let opts = FetchOptions {
        job: args.job,
        list_path: args.list,
        bucket: args.bucket,
        check_exists: args.check_exists.unwrap_or(cfg.check_exists),
        state_dir: cfg.resolved_state_dir()?,
        http: cfg.http,
    };

    let pool = WorkerPool::new(args.workers.unwrap_or(cfg.workers));
    let result = mirror::run_fetch(&pool, store, &opts).await;
    pool.shutdown().await;
    let summary = result?;

    println!(
        "job {}: {} done, {} not found, {} pending, {} skipped",
        opts.job,
        summary.done,
        summary.not_found,
        summary.pending(),
        summary.skipped_done + summary.skipped_not_found + summary.skipped_exists
    );
    Ok(())
}

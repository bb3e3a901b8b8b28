//! `qfetch reset` – delete a job's progress stores.

use anyhow::Result;
use qfetch_core::config::QfetchConfig;
use qfetch_core::progress_db::JobStores;

pub async fn run_reset(cfg: &QfetchConfig, job: &str) -> Result<()> {
    let state_dir = cfg.resolved_state_dir()?;
    let removed = JobStores::remove(&state_dir, job).await?;
    if removed == 0 {
        println!("No progress recorded for job {job}.");
    } else {
        println!("Reset job {job} ({removed} file(s) removed)");
    }
    Ok(())
}

//! `qfetch status` – show what a job has recorded so far.

use anyhow::Result;
use qfetch_core::config::QfetchConfig;
use qfetch_core::progress_db::{validate_job_name, JobStores};

pub async fn run_status(cfg: &QfetchConfig, job: &str) -> Result<()> {
    validate_job_name(job)?;
    let state_dir = cfg.resolved_state_dir()?;
    if !JobStores::exists(&state_dir, job) {
        println!("No progress recorded for job {job}.");
        return Ok(());
    }

    let stores = JobStores::open(&state_dir, job).await?;
    let succeeded = stores.succeeded.count().await?;
    let not_found = stores.not_found.count().await?;
    stores.close().await;

    println!("{:<12} {}", "JOB", job);
    println!("{:<12} {}", "SUCCEEDED", succeeded);
    println!("{:<12} {}", "NOT FOUND", not_found);
    println!(
        "{:<12} {}",
        "STORE",
        JobStores::succeeded_path(&state_dir, job).display()
    );
    Ok(())
}

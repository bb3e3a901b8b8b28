//! The pair of progress stores belonging to one named job.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use super::db::ProgressStore;

/// Succeeded and confirmed-absent stores of one job.
#[derive(Clone)]
pub struct JobStores {
    /// URL → key for every fetch the content store confirmed.
    pub succeeded: ProgressStore,
    /// URL → key for playlists the content store reported as not found.
    pub not_found: ProgressStore,
}

/// Job names become file names; reject anything that could escape the state dir.
pub fn validate_job_name(job: &str) -> Result<()> {
    if job.is_empty() || job == "." || job == ".." {
        anyhow::bail!("invalid job name {:?}", job);
    }
    if job.contains(['/', '\\', '\0']) {
        anyhow::bail!("job name must not contain path separators: {:?}", job);
    }
    Ok(())
}

impl JobStores {
    /// Path of the succeeded store: `{state_dir}/{job}.job.db`.
    pub fn succeeded_path(state_dir: &Path, job: &str) -> PathBuf {
        state_dir.join(format!("{}.job.db", job))
    }

    /// Path of the confirmed-absent store: `{state_dir}/{job}.404.job.db`.
    pub fn not_found_path(state_dir: &Path, job: &str) -> PathBuf {
        state_dir.join(format!("{}.404.job.db", job))
    }

    /// Open (or create) both stores of `job`.
    pub async fn open(state_dir: &Path, job: &str) -> Result<Self> {
        validate_job_name(job)?;
        let succeeded = ProgressStore::open_at(Self::succeeded_path(state_dir, job))
            .await
            .context("open fetch progress store")?;
        let not_found = ProgressStore::open_at(Self::not_found_path(state_dir, job))
            .await
            .context("open fetch not-found store")?;
        Ok(Self {
            succeeded,
            not_found,
        })
    }

    /// True if either store file of `job` exists.
    pub fn exists(state_dir: &Path, job: &str) -> bool {
        Self::succeeded_path(state_dir, job).exists() || Self::not_found_path(state_dir, job).exists()
    }

    /// Delete both stores of `job` (with their WAL/SHM side files).
    /// Returns the number of files removed.
    pub async fn remove(state_dir: &Path, job: &str) -> Result<usize> {
        validate_job_name(job)?;
        let mut removed = 0;
        for base in [
            Self::succeeded_path(state_dir, job),
            Self::not_found_path(state_dir, job),
        ] {
            for suffix in ["", "-wal", "-shm"] {
                let mut name = base.clone().into_os_string();
                name.push(suffix);
                let path = PathBuf::from(name);
                match tokio::fs::remove_file(&path).await {
                    Ok(()) => removed += 1,
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                    Err(e) => {
                        return Err(e).with_context(|| format!("remove {}", path.display()))
                    }
                }
            }
        }
        Ok(removed)
    }

    pub async fn close(&self) {
        self.succeeded.close().await;
        self.not_found.close().await;
    }
}

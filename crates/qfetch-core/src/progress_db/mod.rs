//! Persistent fetch progress (SQLite via sqlx).
//!
//! Each job owns two stores keyed by source URL, mapping to the target key the
//! URL was stored under: one for confirmed successful fetches and one for
//! playlists the content store reported as not found. Both live under the
//! state dir and are named after the job, so re-running a job resumes it.

pub mod db;
pub mod job;

pub use db::ProgressStore;
pub use job::{validate_job_name, JobStores};

#[cfg(test)]
mod tests;

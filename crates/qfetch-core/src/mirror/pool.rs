//! Fixed-width worker pool fed by a bounded queue.
//!
//! Created once by the caller and reused for every run: the width never
//! changes after construction. `submit` waits while the queue is full, which
//! keeps the dispatcher at most one queue-length ahead of the workers.

use anyhow::Result;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, Mutex};
use tokio::task::JoinHandle;

use super::job::PlaylistJob;
use super::outcome::PlaylistOutcome;

struct Queued {
    job: PlaylistJob,
    done: oneshot::Sender<PlaylistOutcome>,
}

/// Completion handle for one submitted job.
pub struct JobTicket {
    pub url: String,
    rx: oneshot::Receiver<PlaylistOutcome>,
}

impl JobTicket {
    /// Waits for the job to finish.
    pub async fn wait(self) -> PlaylistOutcome {
        match self.rx.await {
            Ok(outcome) => outcome,
            Err(_) => {
                tracing::error!("job for {} ended without an outcome", self.url);
                PlaylistOutcome::Lost
            }
        }
    }
}

pub struct WorkerPool {
    tx: mpsc::Sender<Queued>,
    width: usize,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawns `width` (at least 1) long-lived workers. Must be called inside a
    /// tokio runtime.
    pub fn new(width: usize) -> Self {
        let width = width.max(1);
        let (tx, rx) = mpsc::channel::<Queued>(width);
        let rx = Arc::new(Mutex::new(rx));
        let workers = (0..width)
            .map(|id| tokio::spawn(worker_loop(id, Arc::clone(&rx))))
            .collect();
        tracing::debug!("worker pool started with {} workers", width);
        Self { tx, width, workers }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Queues `job`, waiting for space if the queue is full.
    pub async fn submit(&self, job: PlaylistJob) -> Result<JobTicket> {
        let url = job.url.clone();
        let (done, rx) = oneshot::channel();
        self.tx
            .send(Queued { job, done })
            .await
            .map_err(|_| anyhow::anyhow!("worker pool is shut down"))?;
        Ok(JobTicket { url, rx })
    }

    /// Stops accepting work and waits for queued jobs to drain.
    pub async fn shutdown(self) {
        drop(self.tx);
        for worker in self.workers {
            let _ = worker.await;
        }
    }
}

async fn worker_loop(id: usize, rx: Arc<Mutex<mpsc::Receiver<Queued>>>) {
    loop {
        let next = rx.lock().await.recv().await;
        let Some(Queued { job, done }) = next else {
            break;
        };
        let url = job.url.clone();
        tracing::debug!(worker = id, "picked playlist {}", url);

        // Own task so a panicking job costs one outcome, not a worker.
        let outcome = match tokio::spawn(job.run()).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(worker = id, "job for {} aborted: {}", url, e);
                PlaylistOutcome::Lost
            }
        };
        let _ = done.send(outcome);
    }
    tracing::debug!(worker = id, "worker stopped");
}

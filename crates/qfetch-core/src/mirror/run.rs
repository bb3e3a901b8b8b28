//! Entry point: scan the resource list, gate, submit, wait.

use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;

use super::context::{Gate, MirrorContext};
use super::job::PlaylistJob;
use super::outcome::RunSummary;
use super::pool::{JobTicket, WorkerPool};
use crate::config::HttpConfig;
use crate::content_store::ContentStore;
use crate::progress_db::JobStores;
use crate::resource_list::{ListItem, ResourceList};

/// Parameters of one fetch run.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Job name; selects the progress stores, so reruns resume.
    pub job: String,
    pub list_path: PathBuf,
    pub bucket: String,
    pub check_exists: bool,
    pub state_dir: PathBuf,
    pub http: HttpConfig,
}

/// Mirrors every playlist in the resource list, resuming from the job's
/// progress stores.
///
/// Fails only if the list or the stores cannot be opened (before any work
/// starts) or the list becomes unreadable midway (after the already
/// submitted jobs finished). Per-playlist failures are logged and tallied.
pub async fn run_fetch(
    pool: &WorkerPool,
    store: Arc<dyn ContentStore>,
    opts: &FetchOptions,
) -> Result<RunSummary> {
    let mut list = ResourceList::open(&opts.list_path).await?;
    let progress = JobStores::open(&opts.state_dir, &opts.job).await?;

    let ctx = Arc::new(MirrorContext {
        bucket: opts.bucket.clone(),
        check_exists: opts.check_exists,
        store,
        progress: progress.clone(),
        http: opts.http,
    });

    tracing::info!(
        job = %opts.job,
        workers = pool.width(),
        check_exists = opts.check_exists,
        "fetch run started for {}",
        opts.list_path.display()
    );

    let mut summary = RunSummary::default();
    let mut tickets = Vec::new();
    let dispatched = dispatch(pool, &ctx, &mut list, &mut summary, &mut tickets).await;

    for ticket in tickets {
        let outcome = ticket.wait().await;
        summary.record(&outcome);
    }
    progress.close().await;
    summary.log();

    dispatched?;
    Ok(summary)
}

async fn dispatch(
    pool: &WorkerPool,
    ctx: &Arc<MirrorContext>,
    list: &mut ResourceList,
    summary: &mut RunSummary,
    tickets: &mut Vec<JobTicket>,
) -> Result<()> {
    while let Some(item) = list.next_item().await? {
        let entry = match item {
            ListItem::Entry(entry) => entry,
            ListItem::Invalid {
                line_no,
                line,
                reason,
            } => {
                tracing::error!("invalid resource line {} {:?}: {}", line_no, line, reason);
                summary.invalid_lines += 1;
                continue;
            }
        };

        match ctx.gate_playlist(&entry.url, &entry.key).await {
            Gate::AlreadyDone => summary.skipped_done += 1,
            Gate::ConfirmedAbsent => summary.skipped_not_found += 1,
            Gate::ExistsRemotely => summary.skipped_exists += 1,
            Gate::Fetch => {
                let job = PlaylistJob {
                    url: entry.url,
                    key: entry.key,
                    ctx: Arc::clone(ctx),
                };
                tickets.push(pool.submit(job).await?);
                summary.submitted += 1;
            }
        }
    }
    Ok(())
}

//! Per-playlist outcomes and the run tally.

/// Terminal state of one submitted playlist job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistOutcome {
    /// Every segment and the playlist itself are in the content store.
    Done { segments: usize },
    /// The store reported the playlist source as not found; recorded as absent.
    NotFound,
    /// The playlist-level fetch failed otherwise; nothing recorded.
    Failed(String),
    /// At least one segment fetch failed, so the playlist was not fetched.
    SegmentsFailed { failed: usize, total: usize },
    /// The playlist text could not be downloaded from its origin.
    Unavailable(String),
    /// The job never reported back (it panicked).
    Lost,
}

/// Counts for one run. Informational only; per-item failures never fail a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub invalid_lines: usize,
    pub skipped_done: usize,
    pub skipped_not_found: usize,
    pub skipped_exists: usize,
    pub submitted: usize,
    pub done: usize,
    pub not_found: usize,
    pub failed: usize,
    pub segments_failed: usize,
    pub unavailable: usize,
}

impl RunSummary {
    pub fn record(&mut self, outcome: &PlaylistOutcome) {
        match outcome {
            PlaylistOutcome::Done { .. } => self.done += 1,
            PlaylistOutcome::NotFound => self.not_found += 1,
            PlaylistOutcome::Failed(_) | PlaylistOutcome::Lost => self.failed += 1,
            PlaylistOutcome::SegmentsFailed { .. } => self.segments_failed += 1,
            PlaylistOutcome::Unavailable(_) => self.unavailable += 1,
        }
    }

    /// Submitted jobs that ended without the playlist being recorded anywhere.
    pub fn pending(&self) -> usize {
        self.failed + self.segments_failed + self.unavailable
    }

    pub fn log(&self) {
        tracing::info!(
            submitted = self.submitted,
            done = self.done,
            not_found = self.not_found,
            pending = self.pending(),
            skipped_done = self.skipped_done,
            skipped_not_found = self.skipped_not_found,
            skipped_exists = self.skipped_exists,
            invalid_lines = self.invalid_lines,
            "fetch run finished"
        );
    }
}

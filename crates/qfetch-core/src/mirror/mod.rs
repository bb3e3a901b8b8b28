//! Mirror orchestration.
//!
//! The dispatcher scans the resource list and gates each playlist against the
//! progress stores (and optionally the content store); survivors become jobs
//! on a fixed-width worker pool. Each job fetches every segment of its
//! playlist and only then the playlist itself:
//! resource list → gate → worker pool → segments → playlist.

mod context;
mod job;
mod outcome;
mod pool;
mod run;

pub use context::{Gate, MirrorContext};
pub use job::{fetch_playlist, PlaylistJob};
pub use outcome::{PlaylistOutcome, RunSummary};
pub use pool::{JobTicket, WorkerPool};
pub use run::{run_fetch, FetchOptions};

//! CLI command handlers, one file per command.

mod completions;
mod reset;
mod resolve;
mod run;
mod status;

pub use completions::run_completions;
pub use reset::run_reset;
pub use resolve::run_resolve;
pub use run::{check_exists_override, run_fetch_job, RunArgs};
pub use status::run_status;

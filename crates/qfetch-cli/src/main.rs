mod cli;

use crate::cli::Cli;

#[tokio::main]
async fn main() {
    // Logging is set up inside dispatch, once --log-file is known.
    if let Err(err) = Cli::run_from_args().await {
        eprintln!("qfetch error: {:#}", err);
        std::process::exit(1);
    }
}

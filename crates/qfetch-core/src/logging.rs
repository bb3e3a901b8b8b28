//! Logging init: a log file when one is requested, otherwise (or when the
//! file cannot be created) standard output.

use anyhow::Result;
use std::fs;
use std::io;
use std::path::Path;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Writer that is either the log file or stdout (used when file clone fails).
enum FileOrStdout {
    File(std::fs::File),
    Stdout,
}

impl io::Write for FileOrStdout {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            FileOrStdout::File(f) => f.write(buf),
            FileOrStdout::Stdout => io::stdout().lock().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            FileOrStdout::File(f) => f.flush(),
            FileOrStdout::Stdout => io::stdout().lock().flush(),
        }
    }
}

struct FileMakeWriter(std::fs::File);

impl<'a> MakeWriter<'a> for FileMakeWriter {
    type Writer = FileOrStdout;

    fn make_writer(&'a self) -> Self::Writer {
        self.0
            .try_clone()
            .map(FileOrStdout::File)
            .unwrap_or(FileOrStdout::Stdout)
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,qfetch=debug"))
}

/// Initialize logging to `log_file` (truncated), or to stdout when `None`.
///
/// If the file cannot be created the run still proceeds, logging to stdout.
pub fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        init_logging_stdout();
        return Ok(());
    };

    let file = match open_log_file(path) {
        Ok(f) => f,
        Err(e) => {
            init_logging_stdout();
            tracing::warn!("cannot open log file {}: {}; logging to stdout", path.display(), e);
            return Ok(());
        }
    };

    let writer: BoxMakeWriter = BoxMakeWriter::new(FileMakeWriter(file));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install log subscriber: {}", e))?;

    tracing::info!("qfetch logging initialized at {}", path.display());
    Ok(())
}

fn open_log_file(path: &Path) -> io::Result<fs::File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::File::create(path)
}

/// Initialize logging to stdout only. Ignores a subscriber that is already installed.
pub fn init_logging_stdout() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stdout)
        .with_ansi(false)
        .try_init();
}

use eyre::Result;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "activity_feed=info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Logs to `path` when given, otherwise to stderr.
pub(crate) fn init(path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => init_file(path),
        None => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_writer(std::io::stderr)
                .try_init();
            Ok(())
        }
    }
}

pub(crate) fn init_file(path: &Path) -> Result<()> {
    let file = File::create(path)
        .map_err(|e| eyre::eyre!("Failed to open log file {}: {}", path.display(), e))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}

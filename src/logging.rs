use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::error::Result;

/// Install the global tracing subscriber.
///
/// Filter comes from `RUST_LOG`, falling back to `logging.level`. Output goes
/// to stderr (stdout carries results) or to `logging.file` when configured.
/// Calling this more than once is harmless.
pub fn init(config: &Config) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.settings.logging.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false);

    let installed = if let Some(path) = config.log_file_path() {
        config.ensure_data_dir()?;
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        builder.with_writer(Mutex::new(file)).try_init()
    } else {
        builder.with_writer(std::io::stderr).try_init()
    };

    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
    Ok(())
}

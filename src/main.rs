//! streamdash: a simulated multi-stream real-time chart in the terminal.
//!
//! Run with:  `RUST_LOG=info streamdash [path/to/streamdash.toml]`

use anyhow::Result;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{fmt::writer::BoxMakeWriter, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // The dashboard owns the terminal, so structured logs go to a file.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(log_writer(dash_config::default_log_path()))
        .with_ansi(false)
        .init();

    tracing::info!("streamdash v{} starting", env!("CARGO_PKG_VERSION"));

    let config_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(dash_config::default_path);

    dash_app::run(config_path).await
}

/// Append to `path`, creating its directory.  Logging is dropped if the
/// file cannot be opened.
fn log_writer(path: PathBuf) -> BoxMakeWriter {
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => BoxMakeWriter::new(Mutex::new(file)),
        Err(e) => {
            eprintln!("streamdash: not logging to '{}': {e}", path.display());
            BoxMakeWriter::new(std::io::sink)
        }
    }
}

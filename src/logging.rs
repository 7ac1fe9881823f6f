use std::{fs, io, sync::Arc};

use tracing_subscriber::{
    filter::LevelFilter, fmt, fmt::time::ChronoLocal, layer::SubscriberExt, util::SubscriberInitExt,
    EnvFilter, Layer,
};

use crate::config::Settings;

/// Sets up the global subscriber: a detailed file log at `settings.log_file`
/// and a short INFO+ console log on stderr.
///
/// `RUST_LOG` overrides `LOG_LEVEL` for the file log.
pub fn init(settings: &Settings) -> io::Result<()> {
    if let Some(dir) = settings.log_file.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }

    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&settings.log_file)?;

    let file_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::layer()
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_filter(file_filter);

    let console_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .compact()
        .with_filter(LevelFilter::INFO);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .map_err(|e| io::Error::other(e.to_string()))
}

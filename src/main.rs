//! Health Assessment: terminal front end.
//!
//! Main entry point for the terminal application.

use anyhow::{Context, Result};
use std::io::IsTerminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use health_assessment::adapters::sanitize::SanitizingMakeWriter;
use health_assessment::config::AppConfig;
use health_assessment::tui::App;

fn main() -> Result<()> {
    let config = AppConfig::from_env().context("Failed to load configuration")?;

    // Writing logs to the terminal would corrupt the TUI (alternate screen):
    // - interactive TTY: log to a file
    // - non-interactive: log to stdout
    let interactive = std::io::stdout().is_terminal();

    let (writer, _guard) = if config.log.mode.use_file(interactive) {
        if let Some(parent) = config.log.file.parent() {
            // Best-effort: a missing directory surfaces on open below.
            let _ = std::fs::create_dir_all(parent);
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log.file)
            .with_context(|| format!("Failed to open log file {}", config.log.file.display()))?;
        tracing_appender::non_blocking(file)
    } else {
        tracing_appender::non_blocking(std::io::stdout())
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(SanitizingMakeWriter::new(writer)))
        .init();

    tracing::info!("Starting Health Assessment...");
    if let Some(path) = &config.dotenv_path {
        tracing::info!(path = %path.display(), "Loaded environment file");
    }
    tracing::debug!(?config, "Configuration loaded");

    let mut app = App::new(&config)?;
    app.run()?;

    tracing::info!("Health Assessment shutdown complete.");
    Ok(())
}

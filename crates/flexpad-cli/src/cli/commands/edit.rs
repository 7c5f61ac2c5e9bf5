//! Default command: run the editor.

use std::path::Path;

use anyhow::{Context, Result};
use flexpad_core::config::Config;
use flexpad_core::logging;
use tracing::{error, info};

/// Loads config, starts the diagnostic log and runs the editor.
///
/// The log comes up before anything else can fail so startup errors are
/// recorded. If the config itself is unreadable the log uses default settings.
pub fn run(config_path: &Path, file: Option<&Path>) -> Result<()> {
    let loaded = Config::load_from(config_path);
    let log_config = loaded.as_ref().map_or_else(|_| Config::default(), Clone::clone);

    let _log_guard = logging::init(&log_config.log_path(), &log_config.log_level)
        .context("start diagnostic log")?;

    let result = loaded
        .context("load config")
        .and_then(|config| start(&config, file));
    if let Err(err) = &result {
        error!(critical = true, "FlexPad stopped: {err:#}");
    }
    result
}

fn start(config: &Config, file: Option<&Path>) -> Result<()> {
    info!(
        version = env!("CARGO_PKG_VERSION"),
        autosave_delay_secs = config.autosave_delay_secs,
        "Starting FlexPad"
    );
    flexpad_tui::run_editor(config, file)?;
    info!("FlexPad closed");
    Ok(())
}

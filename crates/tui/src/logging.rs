use std::{
    fs::{self, OpenOptions},
    path::Path,
    sync::Mutex,
};

use crate::{
    config::AppConfig,
    error::{AppError, Result},
};

/// Sends `tracing` output to the configured log file; stdout belongs to the
/// terminal UI.
pub fn init(config: &AppConfig) -> Result<()> {
    if let Some(parent) = Path::new(&config.log_path).parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_path)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "financy_tui={level},operation_form={level}",
            level = config.log_level
        ))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| AppError::Logging(err.to_string()))
}

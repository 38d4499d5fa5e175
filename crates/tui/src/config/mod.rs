use std::collections::HashMap;

use clap::Parser;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/financy_tui.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    /// Where an interrupted edit is kept until the next start.
    pub state_path: String,
    pub log_path: String,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            state_path: "config/financy_tui_state.json".to_string(),
            log_path: "financy_tui.log".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Resolved settings plus the per-launch arguments.
#[derive(Debug, Clone)]
pub struct Launch {
    pub config: AppConfig,
    /// Operation to edit. Absent or `<= 0` opens a blank form.
    pub operation_id: Option<i64>,
    /// Ignore and discard any saved draft.
    pub fresh: bool,
}

#[derive(Debug, Parser)]
#[command(name = "financy_tui", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override base URL (e.g. http://127.0.0.1:5000).
    #[arg(long)]
    base_url: Option<String>,
    /// Override the draft file path.
    #[arg(long)]
    state_path: Option<String>,
    /// Override the log file path.
    #[arg(long)]
    log_path: Option<String>,
    /// Override the log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,
    /// Operation to edit; omit to create a new one.
    #[arg(long, allow_negative_numbers = true)]
    operation_id: Option<i64>,
    /// Start from the server copy even if a draft exists.
    #[arg(long)]
    fresh: bool,
}

pub fn load() -> Result<Launch> {
    resolve(Args::parse(), None)
}

/// Layers defaults, the config file, `FINANCY_TUI_*` variables and CLI
/// flags, later layers winning. `env` replaces the process environment.
fn resolve(args: Args, env: Option<HashMap<String, String>>) -> Result<Launch> {
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("FINANCY_TUI").source(env));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(state_path) = args.state_path {
        settings.state_path = state_path;
    }
    if let Some(log_path) = args.log_path {
        settings.log_path = log_path;
    }
    if let Some(log_level) = args.log_level {
        settings.log_level = log_level;
    }

    Ok(Launch {
        config: settings,
        operation_id: args.operation_id,
        fresh: args.fresh,
    })
}

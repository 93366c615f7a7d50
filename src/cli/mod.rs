pub mod commands;

use crate::io::config_io::{ConfigError, config_path, data_dir, read_config};
use crate::model::AppConfig;
use crate::tui::LaunchOptions;

use commands::Cli;

/// Load the config file named by the CLI (or the default) and apply overrides
pub fn resolve(cli: &Cli) -> Result<LaunchOptions, ConfigError> {
    let path = cli.config.clone().unwrap_or_else(config_path);
    let config = read_config(&path)?;
    Ok(launch_options(cli, config))
}

/// Command-line flags win over the config file
pub fn launch_options(cli: &Cli, config: AppConfig) -> LaunchOptions {
    let mut popup = config.popup;
    if let Some(width) = cli.width {
        popup.width = width;
    }
    if let Some(height) = cli.height {
        popup.height = height;
    }
    LaunchOptions {
        data_dir: cli.data_dir.clone().unwrap_or_else(|| data_dir(&config)),
        popup,
        ui: config.ui,
    }
}

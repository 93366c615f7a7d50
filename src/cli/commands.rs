use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "kd", about = concat!("[ ] keydo v", env!("CARGO_PKG_VERSION"), " - a keyboard todo popup"), version)]
pub struct Cli {
    /// Config file (default: $XDG_CONFIG_HOME/keydo/config.toml)
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Directory holding tasks.json and the log file
    #[arg(short = 'd', long = "data-dir")]
    pub data_dir: Option<PathBuf>,

    /// Popup width in cells
    #[arg(long)]
    pub width: Option<u16>,

    /// Popup height in cells
    #[arg(long)]
    pub height: Option<u16>,
}

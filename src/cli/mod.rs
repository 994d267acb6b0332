pub mod config;
pub mod console;
pub mod logs;
pub mod rules;

pub use config::ConfigArgs;
pub use logs::LogsArgs;
pub use rules::RulesArgs;

use crate::config::Config;
use crate::logging::{self, LogOutput};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

/// Options shared by every subcommand
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL, overrides backend.base_url
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl GlobalArgs {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load(self.config.as_ref())?;
        if let Some(ref server) = self.server {
            config.backend.base_url = server.clone();
        }
        if self.verbose {
            config.logging.level = "debug".to_string();
        }
        Ok(config)
    }
}

/// Logging for the line-oriented subcommands
pub fn init_cli_logging(config: &Config) -> Result<()> {
    logging::init_logging(&config.logging, LogOutput::parse(&config.logging.output))
}

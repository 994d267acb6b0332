use super::GlobalArgs;
use crate::Config;
use anyhow::Result;
use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Validate a configuration file
    Check {
        /// File to check, defaults to --config
        path: Option<PathBuf>,
    },

    /// Print the default configuration
    Init,
}

pub async fn run(args: ConfigArgs, global: GlobalArgs) -> Result<()> {
    match args.command {
        ConfigCommand::Check { path } => {
            let Some(path) = path.or(global.config) else {
                anyhow::bail!("No configuration file given. Pass a path or --config");
            };
            println!("Checking configuration: {}", path.display());

            let cfg = Config::from_file(&path)?;
            let warnings = cfg.validate()?;

            if warnings.is_empty() {
                println!(" Configuration is valid!");
            } else {
                println!("Configuration loaded with warnings:\n");
                for warning in &warnings {
                    println!("{}", warning);
                }
            }

            if warnings.iter().any(|w| w.starts_with("[X]")) {
                anyhow::bail!("Configuration has errors");
            }

            Ok(())
        }

        ConfigCommand::Init => {
            print!("{}", Config::default().to_toml()?);
            Ok(())
        }
    }
}

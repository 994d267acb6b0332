use crate::config::LoggingConfig;
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Where log lines go
#[derive(Debug, Clone, PartialEq)]
pub enum LogOutput {
    Stdout,
    Stderr,
    File(String),
    /// Logging disabled, used while the terminal UI owns the screen.
    Discard,
}

impl LogOutput {
    pub fn parse(output: &str) -> Self {
        match output {
            "stdout" => LogOutput::Stdout,
            "stderr" => LogOutput::Stderr,
            "none" | "off" => LogOutput::Discard,
            path => LogOutput::File(path.to_string()),
        }
    }

    /// The interactive console cannot share the terminal with log output.
    pub fn for_console(self) -> Self {
        match self {
            LogOutput::Stdout | LogOutput::Stderr => LogOutput::Discard,
            other => other,
        }
    }
}

pub fn init_logging(config: &LoggingConfig, output: LogOutput) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    match output {
        LogOutput::Discard => Ok(()),
        LogOutput::Stdout => install(env_filter, &config.format, std::io::stdout),
        LogOutput::Stderr => install(env_filter, &config.format, std::io::stderr),
        LogOutput::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Failed to open log file: {}", path))?;
            install(env_filter, &config.format, Mutex::new(file))
        }
    }
}

fn install<W>(env_filter: EnvFilter, format: &str, writer: W) -> Result<()>
where
    W: for<'a> fmt::MakeWriter<'a> + Send + Sync + 'static,
{
    let registry = tracing_subscriber::registry().with(env_filter);

    let result = match format {
        "json" => registry.with(fmt::layer().json().with_writer(writer)).try_init(),
        "pretty" => registry.with(fmt::layer().pretty().with_writer(writer)).try_init(),
        _ => registry.with(fmt::layer().with_writer(writer)).try_init(),
    };

    result.context("Failed to install tracing subscriber")
}

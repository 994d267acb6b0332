use super::GlobalArgs;
use crate::client::ApiClient;
use crate::lifecycle::Liveness;
use crate::logs::{LogTailEngine, PollOutcome};
use crate::model::LogEntry;
use crate::notify::StdoutNotifier;
use anyhow::Result;
use clap::{Args, Subcommand};
use std::sync::Arc;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::warn;

#[derive(Args, Debug)]
pub struct LogsArgs {
    #[command(subcommand)]
    pub command: LogsCommand,
}

#[derive(Subcommand, Debug)]
pub enum LogsCommand {
    /// Print the current log snapshot
    Show {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Print the snapshot, then follow new entries until Ctrl+C
    Tail {
        /// Poll interval in milliseconds, overrides logs.poll_interval_ms
        #[arg(short, long)]
        interval_ms: Option<u64>,
    },
}

pub async fn run(args: LogsArgs, global: GlobalArgs) -> Result<()> {
    let config = global.load_config()?;
    super::init_cli_logging(&config)?;

    let engine = line_engine(Arc::new(ApiClient::from_config(&config.backend)?));

    match args.command {
        LogsCommand::Show { format } => {
            engine.load_initial().await?;
            let entries = engine.entries();
            match format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&entries)?),
                "text" => print_entries(&entries),
                _ => anyhow::bail!("Invalid format: {}. Use 'text' or 'json'", format),
            }
        }
        LogsCommand::Tail { interval_ms } => {
            let period = interval_ms
                .map(std::time::Duration::from_millis)
                .unwrap_or_else(|| config.logs.poll_interval());
            if period.is_zero() {
                anyhow::bail!("Poll interval must be greater than 0");
            }

            engine.load_initial().await?;
            print_entries(&engine.entries());

            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => match engine.poll().await {
                        Ok(PollOutcome::Updated { fresh, .. }) => print_entries(&fresh),
                        Ok(_) => {}
                        Err(e) => warn!(error = %e, "poll failed, will retry"),
                    },
                    _ = tokio::signal::ctrl_c() => break,
                }
            }
        }
    }

    Ok(())
}

/// No banner outside the console: new-log alerts go straight to stdout.
fn line_engine(client: Arc<ApiClient>) -> LogTailEngine {
    LogTailEngine::new(client, Arc::new(StdoutNotifier), Liveness::new())
}

fn print_entries(entries: &[LogEntry]) {
    for entry in entries {
        println!("{}", entry.render_line());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::{MockReply, MockTransport};
    use crate::client::ApiPaths;
    use reqwest::Method;
    use serde_json::json;

    #[tokio::test]
    async fn test_line_engine_yields_fresh_entries() {
        let mock = Arc::new(MockTransport::new());
        mock.on(
            Method::GET,
            "/api-logs/initial-logs",
            MockReply::json(200, json!([{ "time": "10:00", "message": "start" }])),
        );
        mock.on(
            Method::GET,
            "/api-logs/updated-logs",
            MockReply::json(
                200,
                json!([
                    { "time": "10:00", "message": "start" },
                    { "time": "10:05", "message": "alert" }
                ]),
            ),
        );
        let engine = line_engine(Arc::new(ApiClient::new(mock, ApiPaths::default())));

        engine.load_initial().await.unwrap();
        match engine.poll().await.unwrap() {
            PollOutcome::Updated { fresh, newest_message } => {
                assert_eq!(fresh.len(), 1);
                assert_eq!(newest_message, "alert");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(engine.entries().len(), 2);
    }
}

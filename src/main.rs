use anyhow::Result;
use clap::{Parser, Subcommand};
use rule_console::cli::{self, GlobalArgs};

#[derive(Parser)]
#[command(name = "rule-console")]
#[command(version = rule_console::VERSION)]
#[command(about = "Operator console for firewall rules and live logs", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive console (default)
    Console,

    /// Manage firewall rules
    Rules(cli::RulesArgs),

    /// Show or follow the backend log snapshot
    Logs(cli::LogsArgs),

    /// Configuration management
    Config(cli::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Console) {
        Commands::Console => cli::console::run(cli.global).await,
        Commands::Rules(args) => cli::rules::run(args, cli.global).await,
        Commands::Logs(args) => cli::logs::run(args, cli.global).await,
        Commands::Config(args) => cli::config::run(args, cli.global).await,
    }
}

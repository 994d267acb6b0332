use super::GlobalArgs;
use crate::console::Console;
use crate::logging::{self, LogOutput};
use crate::tui::{self, app::App};
use anyhow::Result;
use tracing::info;

/// Open the interactive rules and logs console
pub async fn run(global: GlobalArgs) -> Result<()> {
    let config = global.load_config()?;
    // Terminal output would corrupt the screen, so only file logging survives.
    logging::init_logging(
        &config.logging,
        LogOutput::parse(&config.logging.output).for_console(),
    )?;

    for warning in config.validate()? {
        info!(%warning, "configuration warning");
    }

    let mut console = Console::from_config(&config)?;
    info!(backend = %config.backend.base_url, "starting console");
    console.start();

    tui::run_tui(App::new(console)).await
}

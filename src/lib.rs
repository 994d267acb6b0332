pub mod cli;
pub mod client;
pub mod config;
pub mod console;
pub mod error;
pub mod lifecycle;
pub mod logging;
pub mod logs;
pub mod model;
pub mod notify;
pub mod rules;
pub mod tui;

pub use config::Config;
pub use console::Console;
pub use error::ConsoleError;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

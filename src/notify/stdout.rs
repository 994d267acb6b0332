use super::{NotificationKind, Notify};
use tracing::debug;

/// Prints outcomes for the non-interactive subcommands. Errors are not
/// printed here: the failing command returns them and they are reported once
/// on exit.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutNotifier;

impl StdoutNotifier {
    pub fn format(kind: NotificationKind, message: &str) -> String {
        let prefix = match kind {
            NotificationKind::Success => "[ok]",
            NotificationKind::Error => "[error]",
            NotificationKind::NewLog => "[new]",
        };
        format!("{} {}", prefix, message)
    }
}

impl Notify for StdoutNotifier {
    fn notify(&self, kind: NotificationKind, message: String) {
        match kind {
            NotificationKind::Error => debug!(%message, "operation failed"),
            _ => println!("{}", Self::format(kind, &message)),
        }
    }
}

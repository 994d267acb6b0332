pub mod stdout;

pub use stdout::StdoutNotifier;

use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

/// How long a new-log alert stays visible.
pub const NEW_LOG_HIDE_AFTER: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    NewLog,
}

impl NotificationKind {
    /// Only new-log alerts dismiss themselves; outcomes stay until replaced or dismissed.
    pub fn auto_hides(&self) -> bool {
        matches!(self, NotificationKind::NewLog)
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
            NotificationKind::NewLog => "new-log",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NotificationState {
    #[default]
    Hidden,
    Visible(Notification),
}

impl NotificationState {
    pub fn is_visible(&self) -> bool {
        matches!(self, NotificationState::Visible(_))
    }

    pub fn notification(&self) -> Option<&Notification> {
        match self {
            NotificationState::Visible(n) => Some(n),
            NotificationState::Hidden => None,
        }
    }
}

/// Sink for user-facing banner messages, injected into the engines.
pub trait Notify: Send + Sync {
    fn notify(&self, kind: NotificationKind, message: String);
}

#[derive(Default)]
struct BannerState {
    state: NotificationState,
    /// Bumped on every show/dismiss so a late timer cannot hide a newer message.
    generation: u64,
    hide_timer: Option<JoinHandle<()>>,
    torn_down: bool,
}

impl BannerState {
    fn cancel_timer(&mut self) {
        if let Some(timer) = self.hide_timer.take() {
            timer.abort();
        }
    }
}

/// Single-slot banner: the newest notification replaces the current one.
#[derive(Clone)]
pub struct NotificationController {
    inner: Arc<Mutex<BannerState>>,
    hide_after: Duration,
}

impl Default for NotificationController {
    fn default() -> Self {
        Self::new(NEW_LOG_HIDE_AFTER)
    }
}

impl NotificationController {
    pub fn new(hide_after: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(BannerState::default())),
            hide_after,
        }
    }

    pub fn current(&self) -> NotificationState {
        self.inner.lock().state.clone()
    }

    /// Explicit user dismissal
    pub fn dismiss(&self) {
        let mut banner = self.inner.lock();
        banner.cancel_timer();
        banner.generation += 1;
        banner.state = NotificationState::Hidden;
    }

    /// Cancel any pending hide timer and ignore further notifications.
    pub fn teardown(&self) {
        let mut banner = self.inner.lock();
        banner.cancel_timer();
        banner.torn_down = true;
    }

    pub fn has_pending_timer(&self) -> bool {
        self.inner
            .lock()
            .hide_timer
            .as_ref()
            .map_or(false, |timer| !timer.is_finished())
    }

    fn schedule_hide(&self, banner: &mut BannerState) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            debug!("no runtime available, alert will stay until dismissed");
            return;
        };

        let generation = banner.generation;
        let deadline = Instant::now() + self.hide_after;
        let inner = Arc::clone(&self.inner);

        banner.hide_timer = Some(runtime.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            let mut banner = inner.lock();
            if banner.generation == generation {
                banner.state = NotificationState::Hidden;
                banner.hide_timer = None;
            }
        }));
    }
}

impl Notify for NotificationController {
    fn notify(&self, kind: NotificationKind, message: String) {
        let mut banner = self.inner.lock();
        if banner.torn_down {
            debug!(%kind, "notification after teardown ignored");
            return;
        }

        banner.cancel_timer();
        banner.generation += 1;
        banner.state = NotificationState::Visible(Notification { kind, message });

        if kind.auto_hides() {
            self.schedule_hide(&mut banner);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visible(kind: NotificationKind, message: &str) -> NotificationState {
        NotificationState::Visible(Notification {
            kind,
            message: message.to_string(),
        })
    }

    async fn settle() {
        for _ in 0..3 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_log_alert_hides_after_timeout() {
        let banner = NotificationController::default();
        banner.notify(NotificationKind::NewLog, "alert".to_string());

        tokio::time::sleep(Duration::from_millis(4999)).await;
        settle().await;
        assert_eq!(banner.current(), visible(NotificationKind::NewLog, "alert"));

        tokio::time::sleep(Duration::from_millis(2)).await;
        settle().await;
        assert_eq!(banner.current(), NotificationState::Hidden);
        assert!(!banner.has_pending_timer());
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_alert_restarts_countdown() {
        let banner = NotificationController::default();
        banner.notify(NotificationKind::NewLog, "first".to_string());

        tokio::time::sleep(Duration::from_millis(3000)).await;
        banner.notify(NotificationKind::NewLog, "second".to_string());

        // The first timer would have fired at 5000ms.
        tokio::time::sleep(Duration::from_millis(2500)).await;
        settle().await;
        assert_eq!(banner.current(), visible(NotificationKind::NewLog, "second"));

        tokio::time::sleep(Duration::from_millis(2600)).await;
        settle().await;
        assert_eq!(banner.current(), NotificationState::Hidden);
    }

    #[tokio::test(start_paused = true)]
    async fn test_outcome_replaces_alert_and_persists() {
        let banner = NotificationController::default();
        banner.notify(NotificationKind::NewLog, "alert".to_string());
        banner.notify(NotificationKind::Error, "Failed to delete rule: not found".to_string());
        assert!(!banner.has_pending_timer());

        tokio::time::sleep(Duration::from_millis(60_000)).await;
        settle().await;
        assert_eq!(
            banner.current(),
            visible(NotificationKind::Error, "Failed to delete rule: not found")
        );

        banner.dismiss();
        assert_eq!(banner.current(), NotificationState::Hidden);
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_cancels_timer_and_ignores_later_notifications() {
        let banner = NotificationController::default();
        banner.notify(NotificationKind::NewLog, "alert".to_string());
        banner.teardown();
        assert!(!banner.has_pending_timer());

        banner.notify(NotificationKind::Success, "late".to_string());
        assert_eq!(banner.current(), visible(NotificationKind::NewLog, "alert"));
    }

    #[test]
    fn test_notify_without_runtime_keeps_alert_visible() {
        let banner = NotificationController::default();
        banner.notify(NotificationKind::NewLog, "alert".to_string());
        assert!(banner.current().is_visible());
        assert!(!banner.has_pending_timer());
    }
}

//! Single-slot notification holder with an owned expiry timer

use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::{CancellationToken, DropGuard};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
    Warning,
}

impl NotificationKind {
    /// How long a notification of this kind stays up
    pub fn duration(&self) -> Duration {
        match self {
            NotificationKind::Success | NotificationKind::Info => Duration::from_secs(3),
            NotificationKind::Warning | NotificationKind::Error => Duration::from_secs(5),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            NotificationKind::Success => "OK",
            NotificationKind::Error => "ERROR",
            NotificationKind::Info => "INFO",
            NotificationKind::Warning => "WARN",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub kind: NotificationKind,
}

/// Holds at most one notification.
///
/// Showing a new one drops the previous timer guard, which cancels it, so an
/// old timer can never clear a newer notification. Expiry is reported as the
/// notification id on `expired_tx`; the owner calls [`NotificationSlot::expire`].
pub struct NotificationSlot {
    current: Option<Notification>,
    timer: Option<DropGuard>,
    next_id: u64,
    expired_tx: mpsc::UnboundedSender<u64>,
}

impl NotificationSlot {
    pub fn new(expired_tx: mpsc::UnboundedSender<u64>) -> Self {
        NotificationSlot {
            current: None,
            timer: None,
            next_id: 0,
            expired_tx,
        }
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    /// Replace whatever is showing. Must be called inside a Tokio runtime.
    pub fn show(&mut self, message: impl Into<String>, kind: NotificationKind) -> u64 {
        self.timer = None;
        self.next_id += 1;
        let id = self.next_id;
        let message = message.into();
        tracing::debug!(id, kind = kind.as_str(), %message, "Notification");
        self.current = Some(Notification { id, message, kind });

        let token = CancellationToken::new();
        let cancelled = token.clone();
        let expired_tx = self.expired_tx.clone();
        let delay = kind.duration();
        tokio::spawn(async move {
            tokio::select! {
                _ = cancelled.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    let _ = expired_tx.send(id);
                }
            }
        });
        self.timer = Some(token.drop_guard());
        id
    }

    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.show(message, NotificationKind::Success)
    }

    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.show(message, NotificationKind::Error)
    }

    pub fn info(&mut self, message: impl Into<String>) -> u64 {
        self.show(message, NotificationKind::Info)
    }

    /// Clear the slot if `id` is still the one showing. Returns whether it was.
    pub fn expire(&mut self, id: u64) -> bool {
        match &self.current {
            Some(n) if n.id == id => {
                self.current = None;
                self.timer = None;
                true
            }
            _ => false,
        }
    }

    /// Manual dismissal
    pub fn dismiss(&mut self) {
        self.current = None;
        self.timer = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_expires_after_kind_duration() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut slot = NotificationSlot::new(tx);
        let id = slot.success("saved");

        tokio::time::sleep(Duration::from_millis(2_900)).await;
        assert!(rx.try_recv().is_err());
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(rx.try_recv().unwrap(), id);

        assert!(slot.expire(id));
        assert!(slot.current().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_replacement_cancels_previous_timer() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut slot = NotificationSlot::new(tx);
        let first = slot.success("first");

        tokio::time::sleep(Duration::from_secs(2)).await;
        let second = slot.error("second");
        assert_ne!(first, second);
        assert_eq!(slot.current().unwrap().message, "second");

        // Past the first one's expiry instant: nothing fires
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(rx.try_recv().is_err());
        assert_eq!(slot.current().unwrap().id, second);

        // Error kind lives 5s from when it was shown
        tokio::time::sleep(Duration::from_millis(3_100)).await;
        assert_eq!(rx.try_recv().unwrap(), second);
        assert!(slot.expire(second));
    }

    #[tokio::test]
    async fn test_stale_expiry_is_ignored() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut slot = NotificationSlot::new(tx);
        let old = slot.info("old");
        let new = slot.info("new");
        assert!(!slot.expire(old));
        assert_eq!(slot.current().unwrap().id, new);
    }

    #[tokio::test]
    async fn test_dismiss_clears_slot() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut slot = NotificationSlot::new(tx);
        slot.show("careful", NotificationKind::Warning);
        slot.dismiss();
        assert!(slot.current().is_none());
    }

    #[test]
    fn test_durations_per_kind() {
        assert_eq!(NotificationKind::Success.duration(), Duration::from_secs(3));
        assert_eq!(NotificationKind::Info.duration(), Duration::from_secs(3));
        assert_eq!(NotificationKind::Warning.duration(), Duration::from_secs(5));
        assert_eq!(NotificationKind::Error.duration(), Duration::from_secs(5));
    }
}

//! Alert dispatching to every connected display.
//!
//! The dispatcher knows nothing about how a notification looks. It asks a
//! [`Presenter`] for the list of displays, shows one notification on each,
//! and remembers when each one must be closed. The monitor calls
//! [`AlertDispatcher::dismiss_expired`] on every tick, which closes whatever
//! has outlived [`NOTIFICATION_TIMEOUT`].
//!
//! Alerts are never queued or deduplicated: two alerts in quick succession
//! produce two sets of notifications.

use super::clock::AlertKind;
use crate::libs::messages::Message;
use crate::{msg_debug, msg_warning};
use anyhow::Result;
use std::time::{Duration, Instant};

/// How long a notification stays on screen.
pub const NOTIFICATION_TIMEOUT: Duration = Duration::from_millis(30_000);

/// Identifier handed out by a presenter for a shown notification.
pub type NotificationId = u64;

/// A screen notifications can be shown on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Display {
    pub index: usize,
    pub name: String,
}

/// Presentation backend for reminders.
pub trait Presenter {
    /// Displays currently attached.
    fn displays(&self) -> Vec<Display>;

    /// Shows a notification of `kind` on `display`.
    fn show(&mut self, display: &Display, kind: AlertKind) -> Result<NotificationId>;

    /// Closes a previously shown notification.
    fn close(&mut self, id: NotificationId) -> Result<()>;
}

#[derive(Debug, Clone, Copy)]
struct PendingClose {
    id: NotificationId,
    deadline: Instant,
}

/// Shows alerts on all displays and closes them after a fixed delay.
pub struct AlertDispatcher {
    presenter: Box<dyn Presenter>,
    timeout: Duration,
    pending: Vec<PendingClose>,
}

impl AlertDispatcher {
    pub fn new(presenter: Box<dyn Presenter>) -> Self {
        Self::with_timeout(presenter, NOTIFICATION_TIMEOUT)
    }

    pub fn with_timeout(presenter: Box<dyn Presenter>, timeout: Duration) -> Self {
        AlertDispatcher {
            presenter,
            timeout,
            pending: Vec::new(),
        }
    }

    /// Shows `kind` on every display. Returns how many notifications were shown.
    ///
    /// A display that fails to show is skipped with a warning; the others
    /// still receive their notification.
    pub fn dispatch(&mut self, kind: AlertKind, now: Instant) -> usize {
        let deadline = now + self.timeout;
        let mut shown = 0;

        for display in self.presenter.displays() {
            let display_name = &display.name;
            match self.presenter.show(&display, kind) {
                Ok(id) => {
                    msg_debug!(format!("Notification {} shown on {}", id, display_name));
                    self.pending.push(PendingClose { id, deadline });
                    shown += 1;
                }
                Err(e) => msg_warning!(Message::NotificationShowFailed(display_name.clone(), e.to_string())),
            }
        }

        shown
    }

    /// Closes every notification whose deadline is at or before `now`.
    ///
    /// Close failures are ignored; the notification is forgotten either way.
    pub fn dismiss_expired(&mut self, now: Instant) -> usize {
        let (expired, remaining): (Vec<PendingClose>, Vec<PendingClose>) =
            std::mem::take(&mut self.pending).into_iter().partition(|pending| pending.deadline <= now);
        self.pending = remaining;

        for pending in &expired {
            if let Err(e) = self.presenter.close(pending.id) {
                msg_debug!(format!("Failed to close notification {}: {}", pending.id, e));
            }
        }

        expired.len()
    }

    /// Number of notifications still waiting to be closed.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Default)]
    struct Log {
        shown: Vec<(usize, AlertKind)>,
        closed: Vec<NotificationId>,
    }

    struct FakePresenter {
        displays: usize,
        broken_display: Option<usize>,
        next_id: NotificationId,
        log: Arc<Mutex<Log>>,
    }

    impl Presenter for FakePresenter {
        fn displays(&self) -> Vec<Display> {
            (0..self.displays)
                .map(|index| Display {
                    index,
                    name: format!("screen-{}", index),
                })
                .collect()
        }

        fn show(&mut self, display: &Display, kind: AlertKind) -> Result<NotificationId> {
            if self.broken_display == Some(display.index) {
                return Err(anyhow!("display unplugged"));
            }
            self.next_id += 1;
            self.log.lock().shown.push((display.index, kind));
            Ok(self.next_id)
        }

        fn close(&mut self, id: NotificationId) -> Result<()> {
            self.log.lock().closed.push(id);
            Err(anyhow!("already gone"))
        }
    }

    fn dispatcher(displays: usize, broken_display: Option<usize>) -> (AlertDispatcher, Arc<Mutex<Log>>) {
        let log = Arc::new(Mutex::new(Log::default()));
        let presenter = FakePresenter {
            displays,
            broken_display,
            next_id: 0,
            log: log.clone(),
        };
        (AlertDispatcher::new(Box::new(presenter)), log)
    }

    #[test]
    fn test_dispatch_skips_failing_display() {
        let (mut dispatcher, log) = dispatcher(3, Some(1));
        assert_eq!(dispatcher.dispatch(AlertKind::First, Instant::now()), 2);
        assert_eq!(log.lock().shown, vec![(0, AlertKind::First), (2, AlertKind::First)]);
        assert_eq!(dispatcher.pending(), 2);
    }

    #[test]
    fn test_close_errors_are_ignored() {
        let (mut dispatcher, log) = dispatcher(1, None);
        let now = Instant::now();
        dispatcher.dispatch(AlertKind::Repeat, now);
        assert_eq!(dispatcher.dismiss_expired(now + NOTIFICATION_TIMEOUT), 1);
        assert_eq!(dispatcher.pending(), 0);
        assert_eq!(log.lock().closed, vec![1]);
    }
}

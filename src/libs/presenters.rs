//! Presentation backends for break reminders.
//!
//! - [`DesktopPresenter`] sends desktop notifications through `notify-rust`.
//!   The notification server decides where to draw them, so it is exposed as a
//!   single display.
//! - [`ConsolePresenter`] prints reminders to the terminal, for foreground runs
//!   without a notification server. The desktop backend also falls back to it.

use super::alert::{Display, NotificationId, Presenter, NOTIFICATION_TIMEOUT};
use super::clock::AlertKind;
use super::data_storage::APP_NAME;
use crate::libs::messages::Message;
use crate::{msg_debug, msg_warning};
use anyhow::Result;
use notify_rust::{Notification, Timeout};
#[cfg(all(unix, not(target_os = "macos")))]
use std::collections::HashMap;

/// Title and body text for a reminder of the given kind.
pub fn alert_text(kind: AlertKind) -> (String, String) {
    match kind {
        AlertKind::First => (Message::AlertTitleFirst.to_string(), Message::AlertBodyFirst.to_string()),
        AlertKind::Repeat => (Message::AlertTitleRepeat.to_string(), Message::AlertBodyRepeat.to_string()),
    }
}

/// Desktop notification backend.
///
/// A reminder the notification server refuses is printed to the terminal
/// instead.
pub struct DesktopPresenter {
    next_id: NotificationId,
    fallback: ConsolePresenter,
    #[cfg(all(unix, not(target_os = "macos")))]
    handles: HashMap<NotificationId, notify_rust::NotificationHandle>,
}

impl DesktopPresenter {
    pub fn new() -> Self {
        DesktopPresenter {
            next_id: 0,
            fallback: ConsolePresenter::new(),
            #[cfg(all(unix, not(target_os = "macos")))]
            handles: HashMap::new(),
        }
    }
}

impl Default for DesktopPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Presenter for DesktopPresenter {
    fn displays(&self) -> Vec<Display> {
        vec![Display {
            index: 0,
            name: "desktop".to_string(),
        }]
    }

    fn show(&mut self, display: &Display, kind: AlertKind) -> Result<NotificationId> {
        let (title, body) = alert_text(kind);
        let mut notification = Notification::new();
        notification
            .appname(APP_NAME)
            .summary(&title)
            .body(&body)
            .timeout(Timeout::Milliseconds(NOTIFICATION_TIMEOUT.as_millis() as u32));

        #[cfg(all(unix, not(target_os = "macos")))]
        {
            if kind.is_repeat() {
                notification.urgency(notify_rust::Urgency::Critical);
            }
        }

        self.next_id += 1;
        let id = self.next_id;

        match notification.show() {
            #[cfg(all(unix, not(target_os = "macos")))]
            Ok(handle) => {
                self.handles.insert(id, handle);
            }
            #[cfg(not(all(unix, not(target_os = "macos"))))]
            Ok(_) => {}
            Err(e) => {
                let display_name = &display.name;
                msg_debug!(Message::NotificationShowFailed(display_name.clone(), e.to_string()));
                self.fallback.show(display, kind)?;
            }
        }

        Ok(id)
    }

    fn close(&mut self, id: NotificationId) -> Result<()> {
        #[cfg(all(unix, not(target_os = "macos")))]
        {
            if let Some(handle) = self.handles.remove(&id) {
                handle.close();
            }
        }

        // Other platforms expire the notification through its timeout.
        #[cfg(not(all(unix, not(target_os = "macos"))))]
        {
            msg_debug!(format!("Notification {} left to expire", id));
        }

        Ok(())
    }
}

/// Terminal backend: one "display", the current console.
#[derive(Debug, Default)]
pub struct ConsolePresenter {
    next_id: NotificationId,
}

impl ConsolePresenter {
    pub fn new() -> Self {
        ConsolePresenter::default()
    }
}

impl Presenter for ConsolePresenter {
    fn displays(&self) -> Vec<Display> {
        vec![Display {
            index: 0,
            name: "console".to_string(),
        }]
    }

    fn show(&mut self, _display: &Display, kind: AlertKind) -> Result<NotificationId> {
        let (title, body) = alert_text(kind);
        msg_warning!(Message::ConsoleAlert(title, body), true);
        self.next_id += 1;
        Ok(self.next_id)
    }

    fn close(&mut self, id: NotificationId) -> Result<()> {
        msg_debug!(format!("Console notification {} dismissed", id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_text_differs_by_kind() {
        let (first_title, first_body) = alert_text(AlertKind::First);
        let (repeat_title, repeat_body) = alert_text(AlertKind::Repeat);
        assert_ne!(first_title, repeat_title);
        assert_ne!(first_body, repeat_body);
    }

    #[test]
    fn test_console_presenter_ids_increase() {
        let mut presenter = ConsolePresenter::new();
        let displays = presenter.displays();
        assert_eq!(displays.len(), 1);
        let first = presenter.show(&displays[0], AlertKind::First).unwrap();
        let second = presenter.show(&displays[0], AlertKind::Repeat).unwrap();
        assert!(second > first);
        assert!(presenter.close(first).is_ok());
    }
}

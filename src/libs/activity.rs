use crate::libs::messages::Message;
use crate::msg_error;
use parking_lot::Mutex;
use rdev::{listen, Event, EventType};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

/// Shared timestamp of the most recent keyboard or mouse event.
///
/// Cloning is cheap; every clone points at the same timestamp, so the input
/// hook thread and the tick loop can each hold one.
#[derive(Debug, Clone)]
pub struct ActivityTracker {
    last_activity: Arc<Mutex<Instant>>,
}

impl ActivityTracker {
    /// Creates a tracker that treats "now" as the last activity.
    pub fn new() -> Self {
        ActivityTracker {
            last_activity: Arc::new(Mutex::new(Instant::now())),
        }
    }

    pub fn touch(&self) {
        self.touch_at(Instant::now());
    }

    pub fn touch_at(&self, at: Instant) {
        *self.last_activity.lock() = at;
    }

    pub fn last_activity(&self) -> Instant {
        *self.last_activity.lock()
    }

    /// Time since the last activity as seen from `now`.
    pub fn idle_for(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.last_activity())
    }

    /// Starts the OS input hook on a dedicated thread.
    ///
    /// Key presses, mouse buttons, wheel scrolls and pointer movement all count
    /// as activity. `rdev::listen` blocks for the lifetime of the hook; if it
    /// fails the listener is restarted after one second.
    pub fn spawn_listener(&self) -> JoinHandle<()> {
        let shared = self.clone();
        std::thread::spawn(move || loop {
            let tracker = shared.clone();
            if let Err(e) = listen(move |event: Event| {
                if is_user_input(&event.event_type) {
                    tracker.touch();
                }
            }) {
                msg_error!(Message::ActivityListenerFailed(format!("{:?}", e)));
                std::thread::sleep(Duration::from_secs(1));
            } else {
                break;
            }
        })
    }
}

impl Default for ActivityTracker {
    fn default() -> Self {
        Self::new()
    }
}

fn is_user_input(event_type: &EventType) -> bool {
    matches!(
        event_type,
        EventType::KeyPress(_) | EventType::ButtonPress(_) | EventType::Wheel { .. } | EventType::MouseMove { .. }
    )
}

use crate::libs::activity::ActivityTracker;
use crate::libs::alert::{AlertDispatcher, Presenter};
use crate::libs::clock::{Tick, WorkClock};
use crate::libs::messages::Message;
use crate::libs::settings::Settings;
use crate::libs::status::StatusSnapshot;
use crate::{msg_debug, msg_info};
use anyhow::Result;
use chrono::{Local, NaiveTime};
use std::time::{Duration, Instant, SystemTime};
use tokio::time::{self, MissedTickBehavior};

/// Period of the work clock.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

// Ties together the input hook, the work clock and the alert dispatcher.
pub struct Monitor {
    clock: WorkClock,
    dispatcher: AlertDispatcher,
    tracker: ActivityTracker,
    settings_modified: Option<SystemTime>,
}

impl Monitor {
    pub fn new(settings: Settings, presenter: Box<dyn Presenter>) -> Self {
        Monitor {
            clock: WorkClock::new(settings),
            dispatcher: AlertDispatcher::new(presenter),
            tracker: ActivityTracker::new(),
            settings_modified: Settings::modified_at(),
        }
    }

    pub fn clock(&self) -> &WorkClock {
        &self.clock
    }

    pub fn dispatcher(&self) -> &AlertDispatcher {
        &self.dispatcher
    }

    pub fn tracker(&self) -> &ActivityTracker {
        &self.tracker
    }

    // Runs the monitoring loop until the surrounding task is dropped.
    //
    // The input hook runs on its own thread and only writes the activity
    // timestamp. Everything else happens here, once per second. Ticks missed
    // while the process was suspended are skipped, not replayed.
    pub async fn run(&mut self) -> Result<()> {
        let settings = self.clock.settings().clone();
        msg_info!(Message::MonitorStarted {
            work_duration: settings.work_duration_minutes,
            repeat_interval: settings.repeat_interval_minutes,
            idle_threshold: settings.idle_threshold_seconds,
            work_start: Settings::format_time(settings.work_start),
            work_end: Settings::format_time(settings.work_end),
        });

        self.tracker.spawn_listener();

        let mut interval = time::interval(TICK_INTERVAL);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            interval.tick().await;
            self.reload_settings_if_changed();

            let now = Local::now();
            self.tick_at(now.time(), Instant::now());

            if let Err(e) = StatusSnapshot::capture(&self.clock, now).write() {
                msg_debug!(format!("Failed to write status: {}", e));
            }
        }
    }

    // One step of the loop with explicit clocks, so it can be driven from tests.
    pub fn tick_at(&mut self, time_of_day: NaiveTime, now: Instant) -> Tick {
        let previous = self.clock.state();
        let tick = self.clock.tick(time_of_day, self.tracker.idle_for(now));

        if tick.state != previous {
            msg_debug!(Message::ClockStateChanged(format!("{:?}", previous), format!("{:?}", tick.state)));
        }

        if let Some(kind) = tick.alert {
            let shown = self.dispatcher.dispatch(kind, now);
            msg_info!(Message::AlertDispatched { repeat: kind.is_repeat(), displays: shown });
        }

        self.dispatcher.dismiss_expired(now);
        tick
    }

    // Picks up edits made with `init` or `config set` while the watcher runs.
    // Counters are kept; only the thresholds change.
    pub fn reload_settings_if_changed(&mut self) -> bool {
        let modified = Settings::modified_at();
        if modified == self.settings_modified {
            return false;
        }
        self.settings_modified = modified;
        self.clock.apply_settings(Settings::read());
        msg_info!(Message::SettingsReloaded);
        true
    }
}

//! Work clock state machine.
//!
//! The clock is advanced once per second by the monitor. Each tick classifies
//! the user as out of hours, idle, or active, and advances exactly one of two
//! accumulators:
//!
//! - `work_seconds` counts continuous activity until the first reminder fires;
//! - `repeat_seconds` counts activity after that, firing a repeat reminder every
//!   `repeat_interval` minutes.
//!
//! ```text
//!              outside window                      idle >= threshold
//!   ┌────────────┐ ◀──────── any ────────▶ ┌──────┐ ◀──────── any
//!   │ OutOfHours │                         │ Idle │
//!   └────────────┘                         └──────┘
//!                 active ──▶ ┌────────┐ work >= duration ┌──────────┐
//!                            │ Active │ ───────────────▶ │ Reminded │ ◀─┐ repeat >= interval
//!                            └────────┘   (first alert)  └──────────┘ ──┘ (repeat alert)
//! ```
//!
//! Leaving the window or going idle resets both counters and the reminded flag.
//! A missed tick simply undercounts; nothing is caught up.

use super::settings::Settings;
use crate::libs::messages::Message;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Classification produced by the most recent tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClockState {
    OutOfHours,
    Active,
    Idle,
    Reminded,
}

/// Kind of reminder raised by a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertKind {
    /// The work duration was reached for the first time.
    First,
    /// The user kept working through a repeat interval after being reminded.
    Repeat,
}

impl AlertKind {
    pub fn is_repeat(self) -> bool {
        matches!(self, AlertKind::Repeat)
    }
}

/// Result of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub state: ClockState,
    pub alert: Option<AlertKind>,
}

/// Counters driven by the 1 Hz tick.
#[derive(Debug, Clone)]
pub struct WorkClock {
    settings: Settings,
    work_seconds: u64,
    repeat_seconds: u64,
    reminded: bool,
    state: ClockState,
}

impl WorkClock {
    pub fn new(settings: Settings) -> Self {
        WorkClock {
            settings,
            work_seconds: 0,
            repeat_seconds: 0,
            reminded: false,
            state: ClockState::Idle,
        }
    }

    /// Advances the clock by one second.
    ///
    /// # Arguments
    /// * `time_of_day` - local wall-clock time, checked against the work window
    /// * `idle_for` - time elapsed since the last keyboard or mouse event
    pub fn tick(&mut self, time_of_day: NaiveTime, idle_for: Duration) -> Tick {
        if !self.settings.in_work_window(time_of_day) {
            self.reset();
            return self.settle(ClockState::OutOfHours, None);
        }

        if idle_for >= Duration::from_secs(self.settings.idle_threshold_seconds) {
            self.reset();
            return self.settle(ClockState::Idle, None);
        }

        if !self.reminded {
            self.work_seconds += 1;
            if self.work_seconds >= self.settings.work_duration_secs() {
                self.reminded = true;
                self.repeat_seconds = 0;
                return self.settle(ClockState::Reminded, Some(AlertKind::First));
            }
            self.settle(ClockState::Active, None)
        } else {
            self.repeat_seconds += 1;
            if self.repeat_seconds >= self.settings.repeat_interval_secs() {
                self.repeat_seconds = 0;
                return self.settle(ClockState::Reminded, Some(AlertKind::Repeat));
            }
            self.settle(ClockState::Reminded, None)
        }
    }

    /// Zeroes both counters and clears the reminded flag.
    pub fn reset(&mut self) {
        self.work_seconds = 0;
        self.repeat_seconds = 0;
        self.reminded = false;
    }

    /// Swaps in new thresholds while keeping the accumulated counters.
    pub fn apply_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn work_seconds(&self) -> u64 {
        self.work_seconds
    }

    pub fn repeat_seconds(&self) -> u64 {
        self.repeat_seconds
    }

    pub fn is_reminded(&self) -> bool {
        self.reminded
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    /// Minutes until the next repeat reminder, as shown in the status line.
    ///
    /// Computed from whole elapsed minutes, so it reads the full interval for
    /// the entire first minute after a reminder.
    pub fn minutes_to_next_reminder(&self) -> i64 {
        self.settings.repeat_interval_minutes as i64 - (self.repeat_seconds / 60) as i64
    }

    /// Human readable one-line status.
    pub fn status_line(&self) -> String {
        match self.state {
            ClockState::OutOfHours => Message::StatusOutOfHours.to_string(),
            ClockState::Idle => Message::StatusResting.to_string(),
            ClockState::Active => Message::StatusWorking(self.work_seconds / 60).to_string(),
            ClockState::Reminded => Message::StatusBreakSuggested(self.minutes_to_next_reminder()).to_string(),
        }
    }

    fn settle(&mut self, state: ClockState, alert: Option<AlertKind>) -> Tick {
        self.state = state;
        Tick { state, alert }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACTIVE: Duration = Duration::from_secs(0);

    fn noon() -> NaiveTime {
        NaiveTime::from_hms_opt(12, 0, 0).unwrap()
    }

    fn clock(work: u64, repeat: u64) -> WorkClock {
        WorkClock::new(Settings {
            work_duration_minutes: work,
            repeat_interval_minutes: repeat,
            ..Default::default()
        })
    }

    #[test]
    fn test_first_alert_sets_reminded_and_clears_repeat() {
        let mut clock = clock(1, 1);
        for _ in 0..59 {
            assert_eq!(clock.tick(noon(), ACTIVE).alert, None);
        }
        let tick = clock.tick(noon(), ACTIVE);
        assert_eq!(tick.alert, Some(AlertKind::First));
        assert_eq!(tick.state, ClockState::Reminded);
        assert!(clock.is_reminded());
        assert_eq!(clock.repeat_seconds(), 0);
        assert_eq!(clock.work_seconds(), 60);
    }

    #[test]
    fn test_work_seconds_frozen_after_reminder() {
        let mut clock = clock(1, 5);
        for _ in 0..60 {
            clock.tick(noon(), ACTIVE);
        }
        for _ in 0..10 {
            clock.tick(noon(), ACTIVE);
        }
        assert_eq!(clock.work_seconds(), 60);
        assert_eq!(clock.repeat_seconds(), 10);
    }

    #[test]
    fn test_idle_at_threshold_resets() {
        let mut clock = clock(1, 1);
        for _ in 0..30 {
            clock.tick(noon(), ACTIVE);
        }
        let tick = clock.tick(noon(), Duration::from_secs(180));
        assert_eq!(tick.state, ClockState::Idle);
        assert_eq!(clock.work_seconds(), 0);

        clock.tick(noon(), Duration::from_secs(179));
        assert_eq!(clock.work_seconds(), 1);
    }

    #[test]
    fn test_status_line_countdown() {
        let mut clock = clock(1, 30);
        for _ in 0..60 {
            clock.tick(noon(), ACTIVE);
        }
        assert_eq!(clock.minutes_to_next_reminder(), 30);
        for _ in 0..61 {
            clock.tick(noon(), ACTIVE);
        }
        assert_eq!(clock.minutes_to_next_reminder(), 29);
        assert_eq!(clock.status_line(), Message::StatusBreakSuggested(29).to_string());
    }

    #[test]
    fn test_apply_settings_keeps_counters() {
        let mut clock = clock(10, 10);
        for _ in 0..90 {
            clock.tick(noon(), ACTIVE);
        }
        clock.apply_settings(Settings {
            work_duration_minutes: 1,
            ..Default::default()
        });
        assert_eq!(clock.work_seconds(), 90);
        assert_eq!(clock.tick(noon(), ACTIVE).alert, Some(AlertKind::First));
    }
}
